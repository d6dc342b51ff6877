//! Provider status document served by `/status`.

use std::collections::BTreeMap;

use bigdecimal::BigDecimal;
use serde::Serialize;

use crate::config::ProviderConfig;
use crate::geo::{Coordinate, Geometry};
use crate::model::{PropulsionType, Timestamp};
use crate::resource::Resource;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EndpointStatus {
    pub available: bool,
    pub last_updated: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceArea {
    pub service_area_id: String,
    pub start_date: String,
    pub end_date: String,
    pub prev_area: Option<String>,
    pub replacement_area: Option<String>,
    pub geojson: Geometry,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleTypeSummary {
    pub count: u32,
    pub propulsion_types: Vec<PropulsionType>,
}

/// Per-mode pricing. Amounts are held exactly and emitted as JSON numbers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pricing {
    #[serde(serialize_with = "crate::decimal::serialize")]
    pub unlock_fee: BigDecimal,
    #[serde(serialize_with = "crate::decimal::serialize")]
    pub per_minute_rate: BigDecimal,
    pub currency: String,
}

impl Pricing {
    pub fn usd(unlock_fee_cents: i64, per_minute_cents: i64) -> Self {
        Self {
            unlock_fee: cents(unlock_fee_cents),
            per_minute_rate: cents(per_minute_cents),
            currency: "USD".to_string(),
        }
    }
}

fn cents(amount: i64) -> BigDecimal {
    BigDecimal::from(amount) / BigDecimal::from(100_i64)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusDocument {
    pub provider_id: String,
    pub provider_name: String,
    pub mds_version: String,
    pub available_modes: Vec<String>,
    pub endpoints: BTreeMap<String, EndpointStatus>,
    pub agency_endpoints: BTreeMap<String, String>,
    pub service_areas: Vec<ServiceArea>,
    pub vehicle_types: BTreeMap<String, VehicleTypeSummary>,
    pub system_pricing: BTreeMap<String, Pricing>,
}

impl StatusDocument {
    /// Status as of `now_ms`.
    pub fn build(config: &ProviderConfig, now_ms: Timestamp) -> Self {
        let endpoint = |resource: Resource, age_ms: Timestamp| {
            (
                resource.name().to_string(),
                EndpointStatus {
                    available: true,
                    last_updated: now_ms - age_ms,
                },
            )
        };

        let downtown = [
            (-122.5076, 37.7039),
            (-122.3482, 37.7039),
            (-122.3482, 37.8324),
            (-122.5076, 37.8324),
            (-122.5076, 37.7039),
        ]
        .into_iter()
        .map(|(lon, lat)| Coordinate::new(lon, lat))
        .collect();

        Self {
            provider_id: config.provider_id.clone(),
            provider_name: config.provider_name.clone(),
            mds_version: config.mds_version.clone(),
            available_modes: vec!["micromobility".to_string(), "car_share".to_string()],
            endpoints: BTreeMap::from([
                endpoint(Resource::Vehicles, 0),
                endpoint(Resource::Trips, 300_000),
                endpoint(Resource::Events, 300_000),
                endpoint(Resource::Reports, 3_600_000),
            ]),
            agency_endpoints: BTreeMap::from([(
                "gbfs_discovery".to_string(),
                "https://example.com/gbfs.json".to_string(),
            )]),
            service_areas: vec![ServiceArea {
                service_area_id: "sf_downtown".to_string(),
                start_date: "2023-01-01".to_string(),
                end_date: "2025-12-31".to_string(),
                prev_area: None,
                replacement_area: None,
                geojson: Geometry::MultiPolygon {
                    coordinates: vec![vec![downtown]],
                },
            }],
            vehicle_types: BTreeMap::from([
                (
                    "bicycle".to_string(),
                    VehicleTypeSummary {
                        count: 150,
                        propulsion_types: vec![PropulsionType::Electric, PropulsionType::Human],
                    },
                ),
                (
                    "scooter".to_string(),
                    VehicleTypeSummary {
                        count: 300,
                        propulsion_types: vec![PropulsionType::Electric],
                    },
                ),
                (
                    "car".to_string(),
                    VehicleTypeSummary {
                        count: 50,
                        propulsion_types: vec![PropulsionType::Electric],
                    },
                ),
            ]),
            system_pricing: BTreeMap::from([
                ("micromobility".to_string(), Pricing::usd(100, 15)),
                ("car_share".to_string(), Pricing::usd(250, 45)),
            ]),
        }
    }
}
