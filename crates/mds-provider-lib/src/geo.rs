//! GeoJSON-shaped geometry and bounding-box filtering primitives.
//!
//! All coordinates are `[longitude, latitude]` pairs in WGS84 degrees, in
//! that order, matching the GeoJSON and MDS conventions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A `[longitude, latitude]` position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate(pub [f64; 2]);

impl Coordinate {
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self([lon, lat])
    }

    pub fn lon(&self) -> f64 {
        self.0[0]
    }

    pub fn lat(&self) -> f64 {
        self.0[1]
    }
}

/// GeoJSON geometry, serialized as `{"type": ..., "coordinates": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point {
        coordinates: Coordinate,
    },
    LineString {
        coordinates: Vec<Coordinate>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Coordinate>>>,
    },
}

impl Geometry {
    /// Build a `Point` geometry.
    pub fn point(lon: f64, lat: f64) -> Self {
        Geometry::Point {
            coordinates: Coordinate::new(lon, lat),
        }
    }

    /// Build a `LineString` geometry from `(lon, lat)` pairs.
    pub fn line_string(points: &[(f64, f64)]) -> Self {
        Geometry::LineString {
            coordinates: points
                .iter()
                .map(|&(lon, lat)| Coordinate::new(lon, lat))
                .collect(),
        }
    }

    /// The position of a `Point`, or `None` for other geometry kinds.
    pub fn as_point(&self) -> Option<Coordinate> {
        match self {
            Geometry::Point { coordinates } => Some(*coordinates),
            _ => None,
        }
    }
}

/// Raised when a `bbox` query value cannot be parsed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    #[error("expected 4 comma-separated values, found {found}")]
    WrongSegmentCount { found: usize },

    #[error("'{segment}' is not a finite number")]
    NonNumeric { segment: String },
}

/// Axis-aligned rectangle `[min_lon, max_lon] × [min_lat, max_lat]`.
///
/// Parsed from the MDS `bbox` query format `min_lon,min_lat,max_lon,max_lat`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Inclusive containment test on both axes.
    pub fn contains(&self, point: Coordinate) -> bool {
        (self.min_lon..=self.max_lon).contains(&point.lon())
            && (self.min_lat..=self.max_lat).contains(&point.lat())
    }

    /// True when at least one of `points` lies inside the box.
    pub fn contains_any(&self, points: &[Coordinate]) -> bool {
        points.iter().any(|&point| self.contains(point))
    }
}

impl FromStr for BoundingBox {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = s.split(',').collect();
        if segments.len() != 4 {
            return Err(GeoError::WrongSegmentCount {
                found: segments.len(),
            });
        }

        let mut values = [0.0_f64; 4];
        for (slot, segment) in values.iter_mut().zip(&segments) {
            *slot = segment
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| GeoError::NonNumeric {
                    segment: segment.to_string(),
                })?;
        }

        let [min_lon, min_lat, max_lon, max_lat] = values;
        Ok(Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        })
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.min_lon, self.min_lat, self.max_lon, self.max_lat
        )
    }
}
