//! Provider configuration supplied by the deployment environment.
//!
//! # Environment Variables
//!
//! - `MDS_VERSION`: protocol version reported in every envelope (default `2.0.2`)
//! - `PROVIDER_ID`: provider UUID stamped on records and authorizer context
//! - `PROVIDER_NAME`: display name reported by the status endpoint
//!
//! The configuration is read once at cold start and passed down explicitly;
//! nothing below the Lambda entry point reads the environment.

use serde::{Deserialize, Serialize};

/// Protocol version used when `MDS_VERSION` is unset.
pub const DEFAULT_MDS_VERSION: &str = "2.0.2";

/// Provider identifier used when `PROVIDER_ID` is unset.
pub const DEFAULT_PROVIDER_ID: &str = "00000000-0000-0000-0000-000000000000";

/// Provider display name used when `PROVIDER_NAME` is unset.
pub const DEFAULT_PROVIDER_NAME: &str = "Example Mobility Provider";

/// Deployment-level settings shared by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// MDS protocol version string.
    pub mds_version: String,
    /// Provider identifier.
    pub provider_id: String,
    /// Provider display name.
    pub provider_name: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            mds_version: DEFAULT_MDS_VERSION.to_string(),
            provider_id: DEFAULT_PROVIDER_ID.to_string(),
            provider_name: DEFAULT_PROVIDER_NAME.to_string(),
        }
    }
}

impl ProviderConfig {
    /// Create configuration from environment variables.
    ///
    /// Unset or empty variables fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str, default: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            mds_version: read("MDS_VERSION", DEFAULT_MDS_VERSION),
            provider_id: read("PROVIDER_ID", DEFAULT_PROVIDER_ID),
            provider_name: read("PROVIDER_NAME", DEFAULT_PROVIDER_NAME),
        }
    }

    /// Override the provider identifier.
    pub fn with_provider_id(mut self, provider_id: impl Into<String>) -> Self {
        self.provider_id = provider_id.into();
        self
    }
}
