use std::str::FromStr;

use bigdecimal::BigDecimal;
use serde::Serialize;
use serde_json::Value;

use mds_provider_lib::{
    now_ms, Envelope, ProviderConfig, Resource, SampleDataSource, StatusDocument, VehicleSource,
};

#[derive(Serialize)]
struct Fare {
    trip_id: String,
    #[serde(serialize_with = "mds_provider_lib::decimal::serialize")]
    amount: BigDecimal,
}

#[test]
fn last_updated_tracks_wall_clock() {
    let vehicles = SampleDataSource::new("p").vehicles(now_ms()).unwrap();
    let before = now_ms();
    let envelope = Envelope::build("2.0.2", "vehicles", vehicles, Resource::Vehicles.ttl_seconds());

    assert!((envelope.last_updated - before).abs() <= 1000);
    assert_eq!(envelope.ttl, 300);
}

#[test]
fn ttl_matches_resource_defaults() {
    let expected = [
        (Resource::Vehicles, 300),
        (Resource::Trips, 3600),
        (Resource::Status, 3600),
        (Resource::Reports, 86_400),
    ];
    for (resource, ttl) in expected {
        let envelope = Envelope::build("2.0.2", resource.name(), (), resource.ttl_seconds());
        assert_eq!(envelope.ttl, ttl, "{resource}");
    }
}

#[test]
fn vehicle_envelope_shape() {
    let vehicles = SampleDataSource::new("p").vehicles(1_000_000_000).unwrap();
    let envelope = Envelope::build_at("2.0.2", "vehicles", vehicles, 300, 1_000_000_000);
    let json: Value = serde_json::from_str(&envelope.to_json().unwrap()).unwrap();

    let first = &json["data"]["vehicles"][0];
    assert_eq!(json["version"], "2.0.2");
    assert_eq!(first["device_id"], "vehicle_001");
    assert_eq!(first["vehicle_state"], "available");
    assert_eq!(first["current_location"]["coordinates"][0], -122.4194);
    assert!(first["last_event_time"].is_i64());
    assert!(json["data"]["vehicles"][2].get("rental_uris").is_none());
}

#[test]
fn decimal_payload_serializes_as_number() {
    let fares = vec![Fare {
        trip_id: "t-1".to_string(),
        amount: BigDecimal::from_str("4.505").unwrap(),
    }];
    let envelope = Envelope::build("2.0.2", "fares", fares, 60);
    let json: Value = serde_json::from_str(&envelope.to_json().unwrap()).unwrap();

    let amount = &json["data"]["fares"][0]["amount"];
    assert!(amount.is_number());
    assert!((amount.as_f64().unwrap() - 4.505).abs() < 1e-9);
}

#[test]
fn out_of_range_decimal_still_serializes_as_number() {
    let fares = vec![
        Fare {
            trip_id: "t-big".to_string(),
            amount: BigDecimal::from_str("1e400").unwrap(),
        },
        Fare {
            trip_id: "t-neg".to_string(),
            amount: BigDecimal::from_str("-1e400").unwrap(),
        },
    ];
    let envelope = Envelope::build("2.0.2", "fares", fares, 60);
    let json: Value = serde_json::from_str(&envelope.to_json().unwrap()).unwrap();

    let big = &json["data"]["fares"][0]["amount"];
    let neg = &json["data"]["fares"][1]["amount"];
    assert!(big.is_number());
    assert!(neg.is_number());
    assert!(big.as_f64().unwrap() > 0.0);
    assert!(neg.as_f64().unwrap() < 0.0);
}

#[test]
fn status_document_nests_under_status() {
    let status = StatusDocument::build(&ProviderConfig::default(), 0);
    let envelope = Envelope::build_at("2.0.2", "status", status, 3600, 0);
    let json: Value = serde_json::from_str(&envelope.to_json().unwrap()).unwrap();

    assert_eq!(json["data"]["status"]["provider_name"], "Example Mobility Provider");
    assert_eq!(json["data"]["status"]["mds_version"], "2.0.2");
}
