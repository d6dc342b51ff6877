//! Query filter engine for MDS record collections.
//!
//! A [`RecordFilter`] is a conjunction of optional criteria. Filtering is a
//! linear scan that preserves input order and never mutates the input slice.
//!
//! Optional criteria fail open: a malformed `bbox` or `last_updated` value is
//! reported as a [`FilterWarning`], logged, and the criterion is skipped while
//! the remaining criteria still apply.

use thiserror::Error;
use tracing::warn;

use crate::geo::BoundingBox;
use crate::model::{Record, Timestamp};
use crate::query::{QueryParams, PARAM_BBOX, PARAM_DEVICE_ID, PARAM_LAST_UPDATED};

/// Inclusive `[start, end]` window in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl TimeRange {
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, t: Timestamp) -> bool {
        (self.start..=self.end).contains(&t)
    }
}

/// A recoverable problem with an optional filter parameter.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterWarning {
    #[error("ignoring malformed {parameter} filter '{value}': {reason}")]
    MalformedOptionalFilter {
        parameter: String,
        value: String,
        reason: String,
    },
}

impl FilterWarning {
    fn malformed(parameter: &str, value: &str, reason: impl ToString) -> Self {
        FilterWarning::MalformedOptionalFilter {
            parameter: parameter.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Conjunction of optional record criteria. The default filter keeps everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordFilter {
    pub time_range: Option<TimeRange>,
    pub bbox: Option<BoundingBox>,
    pub device_id: Option<String>,
    pub updated_since: Option<Timestamp>,
}

impl RecordFilter {
    pub fn with_time_range(mut self, range: TimeRange) -> Self {
        self.time_range = Some(range);
        self
    }

    pub fn with_bbox(mut self, bbox: BoundingBox) -> Self {
        self.bbox = Some(bbox);
        self
    }

    pub fn with_device_id(mut self, device_id: impl Into<String>) -> Self {
        self.device_id = Some(device_id.into());
        self
    }

    pub fn with_updated_since(mut self, watermark: Timestamp) -> Self {
        self.updated_since = Some(watermark);
        self
    }

    /// Build the optional criteria (`bbox`, `device_id`, `last_updated`) from
    /// query parameters.
    ///
    /// Malformed values are logged and returned as warnings; they never fail
    /// the parse.
    pub fn from_params(params: &QueryParams) -> (Self, Vec<FilterWarning>) {
        let mut filter = Self::default();
        let mut warnings = Vec::new();

        if let Some(raw) = params.get(PARAM_BBOX) {
            match raw.parse::<BoundingBox>() {
                Ok(bbox) => filter.bbox = Some(bbox),
                Err(e) => warnings.push(FilterWarning::malformed(PARAM_BBOX, raw, e)),
            }
        }

        if let Some(raw) = params.get(PARAM_LAST_UPDATED) {
            match raw.trim().parse::<Timestamp>() {
                Ok(watermark) => filter.updated_since = Some(watermark),
                Err(e) => warnings.push(FilterWarning::malformed(PARAM_LAST_UPDATED, raw, e)),
            }
        }

        if let Some(device_id) = params.get(PARAM_DEVICE_ID) {
            filter.device_id = Some(device_id.to_string());
        }

        for warning in &warnings {
            warn!(warning = %warning, "optional filter skipped");
        }

        (filter, warnings)
    }

    /// True when no criterion is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// True when `record` satisfies every criterion that applies to it.
    pub fn matches<R: Record + ?Sized>(&self, record: &R) -> bool {
        if let (Some(range), Some(start)) = (self.time_range, record.start_time()) {
            if !range.contains(start) {
                return false;
            }
        }

        if let Some(bbox) = self.bbox {
            let locations = record.locations();
            if !locations.is_empty() && !bbox.contains_any(&locations) {
                return false;
            }
        }

        if let (Some(wanted), Some(device_id)) = (self.device_id.as_deref(), record.device_id()) {
            if wanted != device_id {
                return false;
            }
        }

        if let (Some(watermark), Some(updated)) = (self.updated_since, record.last_event_time()) {
            if updated < watermark {
                return false;
            }
        }

        true
    }
}

/// Keep the records matching `criteria`, in input order.
pub fn filter<R: Record + Clone>(records: &[R], criteria: &RecordFilter) -> Vec<R> {
    records
        .iter()
        .filter(|record| criteria.matches(*record))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_range_is_inclusive() {
        let range = TimeRange::new(100, 200);
        assert!(range.contains(100));
        assert!(range.contains(200));
        assert!(!range.contains(99));
        assert!(!range.contains(201));
    }

    #[test]
    fn from_params_collects_valid_criteria() {
        let params = QueryParams::from_iter([
            ("bbox", "-1,-1,1,1"),
            ("last_updated", "1700000000000"),
            ("device_id", "vehicle_001"),
        ]);
        let (filter, warnings) = RecordFilter::from_params(&params);

        assert!(warnings.is_empty());
        assert!(filter.bbox.is_some());
        assert_eq!(filter.updated_since, Some(1_700_000_000_000));
        assert_eq!(filter.device_id.as_deref(), Some("vehicle_001"));
    }

    #[test]
    fn from_params_fails_open_on_malformed_values() {
        let params = QueryParams::from_iter([
            ("bbox", "1,2,3"),
            ("last_updated", "yesterday"),
            ("device_id", "vehicle_002"),
        ]);
        let (filter, warnings) = RecordFilter::from_params(&params);

        assert_eq!(warnings.len(), 2);
        assert!(filter.bbox.is_none());
        assert!(filter.updated_since.is_none());
        assert_eq!(filter.device_id.as_deref(), Some("vehicle_002"));
        assert!(warnings[0].to_string().contains("bbox"));
        assert!(warnings[1].to_string().contains("last_updated"));
    }

    #[test]
    fn empty_params_give_empty_filter() {
        let (filter, warnings) = RecordFilter::from_params(&QueryParams::default());
        assert!(filter.is_empty());
        assert!(warnings.is_empty());
    }
}
