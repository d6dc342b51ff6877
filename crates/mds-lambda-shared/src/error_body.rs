//! Error bodies returned by the data endpoints.
//!
//! Every failure response carries a JSON object with exactly two fields:
//! a short category (`error`) and a human-readable `message`.

use http::StatusCode;
use serde::{Deserialize, Serialize};

use mds_provider_lib::{Error as LibError, Resource};

/// Category for client-side input failures.
pub const ERROR_BAD_REQUEST: &str = "Bad Request";

/// Category for unexpected server-side failures.
pub const ERROR_INTERNAL: &str = "Internal server error";

/// `{"error": ..., "message": ...}` response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }

    /// 400 body for a missing or malformed mandatory parameter.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ERROR_BAD_REQUEST, message)
    }

    /// 500 body; the message never carries internal detail.
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(ERROR_INTERNAL, message)
    }
}

impl std::fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

/// Generic message for a failed read of `resource`.
pub fn failure_message(resource: Resource) -> String {
    match resource {
        Resource::Status => "Failed to retrieve status information".to_string(),
        other => format!("Failed to retrieve {} data", other.name()),
    }
}

/// Map a library error to the status code and body the caller sees.
///
/// Client errors surface their message; everything else collapses to the
/// resource's generic failure message.
pub fn from_lib_error(error: &LibError, resource: Resource) -> (StatusCode, ErrorBody) {
    if error.is_client_error() {
        (
            StatusCode::BAD_REQUEST,
            ErrorBody::bad_request(error.to_string()),
        )
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorBody::internal_error(failure_message(resource)),
        )
    }
}
