//! The Provider API resources and their per-resource constants.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Scope reported for paths that do not name a known resource.
pub const UNKNOWN_SCOPE: &str = "unknown:read";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Vehicles,
    Trips,
    Events,
    Reports,
    Status,
}

impl Resource {
    pub const ALL: [Resource; 5] = [
        Resource::Vehicles,
        Resource::Trips,
        Resource::Events,
        Resource::Reports,
        Resource::Status,
    ];

    /// Key under which the payload is nested in the envelope `data` object.
    pub fn name(self) -> &'static str {
        match self {
            Resource::Vehicles => "vehicles",
            Resource::Trips => "trips",
            Resource::Events => "events",
            Resource::Reports => "reports",
            Resource::Status => "status",
        }
    }

    /// Cache freshness hint in seconds; also used for `Cache-Control: max-age`.
    pub fn ttl_seconds(self) -> u64 {
        match self {
            Resource::Vehicles => 300,
            Resource::Trips | Resource::Events | Resource::Status => 3600,
            Resource::Reports => 86_400,
        }
    }

    /// Scope a credential needs to read this resource.
    pub fn permission(self) -> &'static str {
        match self {
            Resource::Vehicles => "vehicles:read",
            Resource::Trips => "trips:read",
            Resource::Events => "events:read",
            Resource::Reports => "reports:read",
            Resource::Status => "status:read",
        }
    }

    /// Resolve the resource from the final segment of a request path or
    /// API Gateway method ARN (`.../prod/GET/vehicles`).
    pub fn from_path(path: &str) -> Option<Self> {
        path.trim_end_matches('/')
            .rsplit('/')
            .next()
            .and_then(|segment| segment.parse().ok())
    }
}

/// Scope required by the endpoint a path or method ARN ends in, or
/// [`UNKNOWN_SCOPE`].
pub fn permission_for_path(path: &str) -> &'static str {
    Resource::from_path(path)
        .map(Resource::permission)
        .unwrap_or(UNKNOWN_SCOPE)
}

impl FromStr for Resource {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resource::ALL
            .into_iter()
            .find(|resource| resource.name() == s)
            .ok_or(())
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
