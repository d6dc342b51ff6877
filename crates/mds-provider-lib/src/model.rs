//! MDS 2.0 domain records returned by the Provider API.
//!
//! Every record implements [`Record`], which exposes the attributes the
//! filter engine inspects. A record that lacks an attribute returns `None`
//! (or no locations) and is never excluded by a criterion on that attribute.

use serde::{Deserialize, Serialize};

use crate::geo::{Coordinate, Geometry};

/// Epoch milliseconds, UTC.
pub type Timestamp = i64;

/// Attributes the filter engine can select on.
pub trait Record {
    /// Device identifier, for exact-match filtering.
    fn device_id(&self) -> Option<&str> {
        None
    }

    /// Start of the record's time span, for time-range filtering.
    fn start_time(&self) -> Option<Timestamp> {
        None
    }

    /// Time of the most recent event, for watermark filtering.
    fn last_event_time(&self) -> Option<Timestamp> {
        None
    }

    /// Representative points for bounding-box filtering.
    fn locations(&self) -> Vec<Coordinate> {
        Vec::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleType {
    Bicycle,
    Bus,
    CargoBicycle,
    Car,
    DeliveryRobot,
    Moped,
    Motorcycle,
    Scooter,
    Truck,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropulsionType {
    Human,
    ElectricAssist,
    Electric,
    Combustion,
    CombustionDiesel,
    Hybrid,
    HydrogenFuelCell,
    PlugInHybrid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleState {
    Available,
    Elsewhere,
    NonOperational,
    OnTrip,
    Removed,
    Reserved,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    BatteryCharged,
    BatteryLow,
    Comms,
    Compliance,
    Decommissioned,
    Located,
    Maintenance,
    ReservationCancel,
    ReservationStart,
    Reserved,
    ServiceEnd,
    ServiceStart,
    TripCancel,
    TripEnd,
    TripEnterJurisdiction,
    TripLeaveJurisdiction,
    TripStart,
    Unspecified,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleAttributes {
    pub accessible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub air_quality_unhealthy: Option<bool>,
}

/// Deep links for renting a vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentalUris {
    pub android: String,
    pub ios: String,
    pub web: String,
}

impl RentalUris {
    /// Links for the example provider app, keyed by vehicle id.
    pub fn for_vehicle(vehicle_id: &str) -> Self {
        Self {
            android: format!("https://example.com/app?vehicle={vehicle_id}"),
            ios: format!("https://example.com/app?vehicle={vehicle_id}"),
            web: format!("https://example.com/web?vehicle={vehicle_id}"),
        }
    }
}

/// Real-time vehicle status (`/vehicles`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub device_id: String,
    pub provider_id: String,
    pub data_provider_id: String,
    pub vehicle_id: String,
    pub vehicle_type: VehicleType,
    pub propulsion_types: Vec<PropulsionType>,
    pub vehicle_attributes: VehicleAttributes,
    pub vehicle_state: VehicleState,
    pub last_event_types: Vec<EventType>,
    pub last_event_time: Timestamp,
    pub last_event_location: Geometry,
    pub current_location: Geometry,
    pub battery_percent: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rental_uris: Option<RentalUris>,
}

impl Record for Vehicle {
    fn device_id(&self) -> Option<&str> {
        Some(&self.device_id)
    }

    fn last_event_time(&self) -> Option<Timestamp> {
        Some(self.last_event_time)
    }

    fn locations(&self) -> Vec<Coordinate> {
        self.current_location.as_point().into_iter().collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripAttributes {
    pub accessibility_type: Option<String>,
    pub surface_type: String,
}

/// Historical trip (`/trips`). Costs are integer cents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub provider_id: String,
    pub data_provider_id: String,
    pub device_id: String,
    pub trip_id: String,
    /// Seconds.
    pub trip_duration: u32,
    /// Meters.
    pub trip_distance: u32,
    pub route: Geometry,
    pub accuracy: u32,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub publication_time: Timestamp,
    pub start_location: Geometry,
    pub end_location: Geometry,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parking_verification_url: Option<String>,
    pub standard_cost: u32,
    pub actual_cost: u32,
    pub currency: String,
    pub trip_attributes: TripAttributes,
}

impl Record for Trip {
    fn device_id(&self) -> Option<&str> {
        Some(&self.device_id)
    }

    fn start_time(&self) -> Option<Timestamp> {
        Some(self.start_time)
    }

    fn locations(&self) -> Vec<Coordinate> {
        [&self.start_location, &self.end_location]
            .into_iter()
            .filter_map(Geometry::as_point)
            .collect()
    }
}

/// Vehicle status change (`/events`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub provider_id: String,
    pub device_id: String,
    pub event_id: String,
    pub event_types: Vec<EventType>,
    pub vehicle_state: VehicleState,
    pub timestamp: Timestamp,
    pub publication_time: Timestamp,
    pub location: Geometry,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trip_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery_percent: Option<u8>,
}

impl Record for Event {
    fn device_id(&self) -> Option<&str> {
        Some(&self.device_id)
    }

    fn start_time(&self) -> Option<Timestamp> {
        Some(self.timestamp)
    }

    fn locations(&self) -> Vec<Coordinate> {
        self.location.as_point().into_iter().collect()
    }
}

/// Monthly aggregate (`/reports`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub provider_id: String,
    /// `YYYY-MM`.
    pub start_date: String,
    /// ISO 8601 duration, e.g. `P1M`.
    pub duration: String,
    pub special_group_type: Option<String>,
    pub geography_id: Option<String>,
    pub vehicle_type: VehicleType,
    pub trip_count: u32,
    pub rider_count: u32,
}

impl Record for Report {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vehicle_state_serializes_snake_case() {
        let json = serde_json::to_string(&VehicleState::OnTrip).unwrap();
        assert_eq!(json, "\"on_trip\"");
        let json = serde_json::to_string(&EventType::ServiceStart).unwrap();
        assert_eq!(json, "\"service_start\"");
    }

    #[test]
    fn report_exposes_no_filter_attributes() {
        let report = Report {
            provider_id: "p".to_string(),
            start_date: "2024-01".to_string(),
            duration: "P1M".to_string(),
            special_group_type: None,
            geography_id: None,
            vehicle_type: VehicleType::Scooter,
            trip_count: 0,
            rider_count: 0,
        };
        assert!(report.device_id().is_none());
        assert!(report.start_time().is_none());
        assert!(report.locations().is_empty());
    }

    #[test]
    fn rental_uris_embed_vehicle_id() {
        let uris = RentalUris::for_vehicle("SCO001");
        assert!(uris.android.ends_with("vehicle=SCO001"));
        assert!(uris.web.starts_with("https://example.com/web"));
    }
}
