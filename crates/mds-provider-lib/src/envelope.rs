//! The versioned MDS response envelope.
//!
//! ```json
//! { "version": "2.0.2", "data": { "vehicles": [ ... ] }, "last_updated": 1700000000000, "ttl": 300 }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::Timestamp;

/// Current wall-clock time in epoch milliseconds.
pub fn now_ms() -> Timestamp {
    chrono::Utc::now().timestamp_millis()
}

/// Standard MDS wrapper around a resource payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<P> {
    pub version: String,
    pub data: BTreeMap<String, P>,
    pub last_updated: Timestamp,
    pub ttl: u64,
}

impl<P> Envelope<P> {
    /// Wrap `payload` under `data[resource_name]`, stamping `last_updated`
    /// with the current time.
    pub fn build(
        version: impl Into<String>,
        resource_name: impl Into<String>,
        payload: P,
        ttl_seconds: u64,
    ) -> Self {
        Self::build_at(version, resource_name, payload, ttl_seconds, now_ms())
    }

    /// As [`Envelope::build`], with an explicit `last_updated`.
    pub fn build_at(
        version: impl Into<String>,
        resource_name: impl Into<String>,
        payload: P,
        ttl_seconds: u64,
        last_updated: Timestamp,
    ) -> Self {
        Self {
            version: version.into(),
            data: BTreeMap::from([(resource_name.into(), payload)]),
            last_updated,
            ttl: ttl_seconds,
        }
    }
}

impl<P: Serialize> Envelope<P> {
    /// Serialize the envelope to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
