//! API Gateway proxy responses.

use std::collections::BTreeMap;

use http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error_body::ErrorBody;

pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const HEADER_CACHE_CONTROL: &str = "Cache-Control";
pub const HEADER_ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";

/// Media type of every response body.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Proxy-integration response: status code, headers and a JSON string body.
///
/// # Example
///
/// ```
/// use mds_lambda_shared::ApiGatewayResponse;
///
/// let response = ApiGatewayResponse::ok(r#"{"version":"2.0.2"}"#.to_string(), 300);
/// assert_eq!(response.status_code, 200);
/// assert_eq!(response.headers["Cache-Control"], "max-age=300");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGatewayResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl ApiGatewayResponse {
    fn with_status(status: StatusCode, body: String) -> Self {
        let headers = BTreeMap::from([
            (HEADER_CONTENT_TYPE.to_string(), CONTENT_TYPE_JSON.to_string()),
            (HEADER_ALLOW_ORIGIN.to_string(), "*".to_string()),
        ]);
        Self {
            status_code: status.as_u16(),
            headers,
            body,
        }
    }

    /// 200 response with a cache lifetime matching the envelope TTL.
    pub fn ok(body: String, ttl_seconds: u64) -> Self {
        let mut response = Self::with_status(StatusCode::OK, body);
        response.headers.insert(
            HEADER_CACHE_CONTROL.to_string(),
            format!("max-age={ttl_seconds}"),
        );
        response
    }

    /// Error response. Never cacheable.
    pub fn error(status: StatusCode, body: &ErrorBody) -> Self {
        let body = serde_json::json!({
            "error": body.error,
            "message": body.message,
        })
        .to_string();
        Self::with_status(status, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_ok_headers() {
        let response = ApiGatewayResponse::ok("{}".to_string(), 3600);

        assert_eq!(response.status_code, 200);
        assert_eq!(response.headers["Content-Type"], "application/json");
        assert_eq!(response.headers["Access-Control-Allow-Origin"], "*");
        assert_eq!(response.headers["Cache-Control"], "max-age=3600");
    }

    #[test]
    fn test_error_has_no_cache_control() {
        let response = ApiGatewayResponse::error(
            StatusCode::BAD_REQUEST,
            &ErrorBody::bad_request("start_time parameter is required"),
        );

        assert_eq!(response.status_code, 400);
        assert!(!response.headers.contains_key("Cache-Control"));
        assert_eq!(response.headers["Access-Control-Allow-Origin"], "*");

        let body: Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(body["error"], "Bad Request");
        assert_eq!(body["message"], "start_time parameter is required");
    }

    #[test]
    fn test_proxy_serialization_is_camel_case() {
        let response = ApiGatewayResponse::ok("{}".to_string(), 300);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["statusCode"], 200);
        assert_eq!(json["body"], "{}");
        assert!(json["headers"].is_object());
    }

    #[test]
    fn test_internal_error_status_code() {
        let response = ApiGatewayResponse::error(
            StatusCode::INTERNAL_SERVER_ERROR,
            &ErrorBody::internal_error("Failed to retrieve trips data"),
        );
        assert_eq!(response.status_code, 500);
        assert!(!response.headers.contains_key("Cache-Control"));
    }
}
