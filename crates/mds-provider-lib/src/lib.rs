//! MDS Provider API library entry points.
//!
//! This crate holds everything the Provider API Lambdas share beyond HTTP
//! glue: bearer-token authentication and authorizer policies, query parsing,
//! the record filter engine, and the versioned response envelope. The Lambda
//! crates should only depend on the functions exported here instead of
//! reimplementing behavior.
//!

#![deny(warnings)]

pub mod auth;
pub mod config;
pub mod decimal;
pub mod envelope;
pub mod error;
pub mod filter;
pub mod geo;
pub mod listing;
pub mod model;
pub mod policy;
pub mod query;
pub mod resource;
pub mod source;
pub mod status;

pub use auth::{
    redact_token, AuthError, CredentialRecord, CredentialStore, InMemoryCredentialStore,
    TokenAuthority,
};
pub use config::ProviderConfig;
pub use envelope::{now_ms, Envelope};
pub use error::{Error, Result};
pub use filter::{filter, FilterWarning, RecordFilter, TimeRange};
pub use geo::{BoundingBox, Coordinate, GeoError, Geometry};
pub use listing::{list_events, list_reports, list_trips, list_vehicles};
pub use model::{Event, Record, Report, Timestamp, Trip, Vehicle};
pub use policy::{build_decision, resource_pattern, AccessDecision, Effect, PolicyContext};
pub use query::QueryParams;
pub use resource::Resource;
pub use source::{EventSource, ReportSource, SampleDataSource, TripSource, VehicleSource};
pub use status::StatusDocument;
