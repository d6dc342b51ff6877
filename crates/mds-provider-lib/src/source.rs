//! Record sources behind the Provider API endpoints.
//!
//! Each endpoint reads through a narrow trait so a durable store can replace
//! [`SampleDataSource`] without touching the query or filter code. The sample
//! source fabricates a small fleet relative to the request time.

use uuid::Uuid;

use crate::error::Result;
use crate::filter::TimeRange;
use crate::geo::Geometry;
use crate::model::{
    Event, EventType, PropulsionType, RentalUris, Report, Timestamp, Trip, TripAttributes,
    Vehicle, VehicleAttributes, VehicleState, VehicleType,
};

const MINUTE_MS: Timestamp = 60_000;
const HOUR_MS: Timestamp = 60 * MINUTE_MS;

pub trait VehicleSource {
    /// Current fleet state as of `now_ms`.
    fn vehicles(&self, now_ms: Timestamp) -> Result<Vec<Vehicle>>;
}

pub trait TripSource {
    /// Trips that may fall inside `window`; the caller applies exact filtering.
    fn trips(&self, window: &TimeRange) -> Result<Vec<Trip>>;
}

pub trait EventSource {
    fn events(&self, window: &TimeRange) -> Result<Vec<Event>>;
}

pub trait ReportSource {
    fn reports(&self, start_date: &str) -> Result<Vec<Report>>;
}

/// In-memory fleet used until a real data store is wired in.
///
/// Events and reports are always empty.
#[derive(Debug, Clone)]
pub struct SampleDataSource {
    provider_id: String,
}

impl SampleDataSource {
    pub fn new(provider_id: impl Into<String>) -> Self {
        Self {
            provider_id: provider_id.into(),
        }
    }

    pub fn provider_id(&self) -> &str {
        &self.provider_id
    }

    #[allow(clippy::too_many_arguments)]
    fn vehicle(
        &self,
        index: u32,
        vehicle_id: &str,
        vehicle_type: VehicleType,
        state: VehicleState,
        last_event: EventType,
        last_event_time: Timestamp,
        (lon, lat): (f64, f64),
        battery_percent: u8,
    ) -> Vehicle {
        Vehicle {
            device_id: format!("vehicle_{index:03}"),
            provider_id: self.provider_id.clone(),
            data_provider_id: self.provider_id.clone(),
            vehicle_id: vehicle_id.to_string(),
            vehicle_type,
            propulsion_types: vec![PropulsionType::Electric],
            vehicle_attributes: VehicleAttributes {
                accessible: false,
                air_quality_unhealthy: None,
            },
            vehicle_state: state,
            last_event_types: vec![last_event],
            last_event_time,
            last_event_location: Geometry::point(lon, lat),
            current_location: Geometry::point(lon, lat),
            battery_percent,
            rental_uris: Some(RentalUris::for_vehicle(vehicle_id)),
        }
    }
}

impl VehicleSource for SampleDataSource {
    fn vehicles(&self, now_ms: Timestamp) -> Result<Vec<Vehicle>> {
        let scooter = self.vehicle(
            1,
            "SCO001",
            VehicleType::Scooter,
            VehicleState::Available,
            EventType::ServiceStart,
            now_ms - HOUR_MS,
            (-122.4194, 37.7749),
            85,
        );

        let mut bicycle = self.vehicle(
            2,
            "BIK001",
            VehicleType::Bicycle,
            VehicleState::Reserved,
            EventType::Reserved,
            now_ms - 5 * MINUTE_MS,
            (-122.4094, 37.7849),
            72,
        );
        bicycle.vehicle_attributes.accessible = true;

        let mut on_trip = self.vehicle(
            3,
            "SCO002",
            VehicleType::Scooter,
            VehicleState::OnTrip,
            EventType::TripStart,
            now_ms - 15 * MINUTE_MS,
            (-122.4294, 37.7649),
            45,
        );
        on_trip.rental_uris = None;

        let mut car = self.vehicle(
            4,
            "CAR001",
            VehicleType::Car,
            VehicleState::Available,
            EventType::ServiceStart,
            now_ms - 2 * HOUR_MS,
            (-122.4394, 37.7549),
            90,
        );
        car.vehicle_attributes = VehicleAttributes {
            accessible: true,
            air_quality_unhealthy: Some(false),
        };

        Ok(vec![scooter, bicycle, on_trip, car])
    }
}

impl TripSource for SampleDataSource {
    fn trips(&self, window: &TimeRange) -> Result<Vec<Trip>> {
        let start = window.start;
        let mut trips = Vec::with_capacity(2);

        // A span that would leave the timestamp range yields no trip.
        if let Some((start_time, end_time)) = trip_span(start, HOUR_MS, 1_245_000) {
            trips.push(Trip {
                provider_id: self.provider_id.clone(),
                data_provider_id: self.provider_id.clone(),
                device_id: "vehicle_001".to_string(),
                trip_id: Uuid::new_v4().to_string(),
                trip_duration: 1245,
                trip_distance: 2340,
                route: Geometry::line_string(&[
                    (-122.4194, 37.7749),
                    (-122.4184, 37.7759),
                    (-122.4174, 37.7769),
                    (-122.4164, 37.7779),
                ]),
                accuracy: 15,
                start_time,
                end_time,
                publication_time: end_time,
                start_location: Geometry::point(-122.4194, 37.7749),
                end_location: Geometry::point(-122.4164, 37.7779),
                parking_verification_url: Some("https://example.com/parking/trip_123".to_string()),
                standard_cost: 450,
                actual_cost: 400,
                currency: "USD".to_string(),
                trip_attributes: TripAttributes {
                    accessibility_type: None,
                    surface_type: "paved_smooth".to_string(),
                },
            });
        }

        if let Some((start_time, end_time)) = trip_span(start, 2 * HOUR_MS, 892_000) {
            trips.push(Trip {
                provider_id: self.provider_id.clone(),
                data_provider_id: self.provider_id.clone(),
                device_id: "vehicle_002".to_string(),
                trip_id: Uuid::new_v4().to_string(),
                trip_duration: 892,
                trip_distance: 1580,
                route: Geometry::line_string(&[
                    (-122.4094, 37.7849),
                    (-122.4084, 37.7859),
                    (-122.4074, 37.7869),
                ]),
                accuracy: 12,
                start_time,
                end_time,
                publication_time: end_time,
                start_location: Geometry::point(-122.4094, 37.7849),
                end_location: Geometry::point(-122.4074, 37.7869),
                parking_verification_url: None,
                standard_cost: 320,
                actual_cost: 320,
                currency: "USD".to_string(),
                trip_attributes: TripAttributes {
                    accessibility_type: Some("wheelchair_accessible".to_string()),
                    surface_type: "paved_smooth".to_string(),
                },
            });
        }

        Ok(trips)
    }
}

/// Start and end of a trip beginning `offset_ms` after `window_start`.
fn trip_span(
    window_start: Timestamp,
    offset_ms: Timestamp,
    duration_ms: Timestamp,
) -> Option<(Timestamp, Timestamp)> {
    let start = window_start.checked_add(offset_ms)?;
    Some((start, start.checked_add(duration_ms)?))
}

// TODO: read events from the provider event log once the store exists.
impl EventSource for SampleDataSource {
    fn events(&self, _window: &TimeRange) -> Result<Vec<Event>> {
        Ok(Vec::new())
    }
}

impl ReportSource for SampleDataSource {
    fn reports(&self, _start_date: &str) -> Result<Vec<Report>> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_vehicles_are_relative_to_now() {
        let source = SampleDataSource::new("provider-1");
        let vehicles = source.vehicles(10 * HOUR_MS).unwrap();

        assert_eq!(vehicles.len(), 4);
        assert_eq!(vehicles[0].last_event_time, 9 * HOUR_MS);
        assert!(vehicles.iter().all(|v| v.provider_id == "provider-1"));
        assert!(vehicles[2].rental_uris.is_none());
    }

    #[test]
    fn sample_trips_offset_from_window_start() {
        let source = SampleDataSource::new("p");
        let trips = source.trips(&TimeRange::new(0, i64::MAX)).unwrap();

        assert_eq!(trips[0].start_time, HOUR_MS);
        assert_eq!(trips[1].start_time, 2 * HOUR_MS);
        assert_eq!(trips[0].end_time - trips[0].start_time, 1_245_000);
        assert_ne!(trips[0].trip_id, trips[1].trip_id);
    }

    #[test]
    fn trips_near_timestamp_limit_are_skipped() {
        let source = SampleDataSource::new("p");

        let trips = source.trips(&TimeRange::new(i64::MAX, i64::MAX)).unwrap();
        assert!(trips.is_empty());

        // Only the first trip's span still fits.
        let trips = source
            .trips(&TimeRange::new(i64::MAX - 2 * HOUR_MS, i64::MAX))
            .unwrap();
        assert_eq!(trips.len(), 1);
        assert_eq!(trips[0].device_id, "vehicle_001");
    }

    #[test]
    fn events_and_reports_are_empty() {
        let source = SampleDataSource::new("p");
        assert!(source.events(&TimeRange::new(0, 1)).unwrap().is_empty());
        assert!(source.reports("2024-01").unwrap().is_empty());
    }
}
