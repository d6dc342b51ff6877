//! Bearer-token authentication against a credential store.
//!
//! [`TokenAuthority::authorize`] strips an optional `Bearer ` prefix, looks
//! the token up through the injected [`CredentialStore`], and emits an audit
//! event for every decision. Failure events carry a redacted token only.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

const BEARER_PREFIX: &str = "Bearer ";

/// Characters of a token kept when it appears in logs.
const REDACTED_PREFIX_CHARS: usize = 4;

/// An API caller known to the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    pub token: String,
    pub agency_id: String,
    /// Granted scopes such as `vehicles:read`.
    pub permissions: BTreeSet<String>,
    /// Requests per unit time. Advisory; not enforced here.
    pub rate_limit: u32,
}

impl CredentialRecord {
    pub fn new<I, P>(token: &str, agency_id: &str, permissions: I, rate_limit: u32) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self {
            token: token.to_string(),
            agency_id: agency_id.to_string(),
            permissions: permissions.into_iter().map(Into::into).collect(),
            rate_limit,
        }
    }

    /// Scopes joined with commas, in sorted order.
    pub fn permissions_csv(&self) -> String {
        self.permissions
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn has_permission(&self, scope: &str) -> bool {
        self.permissions.contains(scope)
    }
}

/// Read-only lookup of credentials by token.
pub trait CredentialStore: Send + Sync {
    fn find(&self, token: &str) -> Option<CredentialRecord>;
}

/// Credential store backed by a fixed in-memory table.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentialStore {
    records: BTreeMap<String, CredentialRecord>,
}

impl InMemoryCredentialStore {
    pub fn from_records(records: impl IntoIterator<Item = CredentialRecord>) -> Self {
        Self {
            records: records
                .into_iter()
                .map(|record| (record.token.clone(), record))
                .collect(),
        }
    }

    /// The statically provisioned agency credentials.
    pub fn with_default_credentials() -> Self {
        Self::from_records([
            CredentialRecord::new(
                "circuit-token-12345",
                "city-of-example",
                ["vehicles:read", "trips:read", "events:read", "reports:read"],
                1000,
            ),
            CredentialRecord::new(
                "circuit-token-67890",
                "city-of-demo",
                ["vehicles:read", "status:read"],
                500,
            ),
        ])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &CredentialRecord> {
        self.records.values()
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn find(&self, token: &str) -> Option<CredentialRecord> {
        self.records.get(token).cloned()
    }
}

/// Authentication failures. Never rendered to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("no authorization token provided")]
    MissingToken,

    #[error("invalid token: {redacted}")]
    InvalidToken { redacted: String },
}

impl AuthError {
    fn reason(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "missing_token",
            AuthError::InvalidToken { .. } => "invalid_token",
        }
    }
}

/// Mask a token for logging: a short prefix followed by `...`.
pub fn redact_token(token: &str) -> String {
    let keep = REDACTED_PREFIX_CHARS.min(token.chars().count() / 2);
    let prefix: String = token.chars().take(keep).collect();
    format!("{prefix}...")
}

/// Resolves bearer tokens to credential records.
pub struct TokenAuthority<S> {
    store: S,
}

impl<S: CredentialStore> TokenAuthority<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validate a raw `Authorization` header value.
    pub fn authorize(&self, raw_header: &str) -> Result<CredentialRecord, AuthError> {
        let result = self.resolve(raw_header);
        match &result {
            Ok(record) => info!(
                agency_id = %record.agency_id,
                rate_limit = record.rate_limit,
                "authorization successful"
            ),
            Err(e) => warn!(reason = e.reason(), error = %e, "authorization failed"),
        }
        result
    }

    fn resolve(&self, raw_header: &str) -> Result<CredentialRecord, AuthError> {
        let token = raw_header.strip_prefix(BEARER_PREFIX).unwrap_or(raw_header);
        if token.is_empty() {
            return Err(AuthError::MissingToken);
        }

        self.store
            .find(token)
            .ok_or_else(|| AuthError::InvalidToken {
                redacted: redact_token(token),
            })
    }
}
