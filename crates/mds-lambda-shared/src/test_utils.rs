//! Test utilities for Lambda handler testing.
//!
//! This module provides shared test infrastructure for all Lambda crates:
//! event builders, a deterministic runtime and body decoding helpers.
//!
//! # Usage
//!
//! These utilities are only available in test builds:
//!
//! ```ignore
//! use mds_lambda_shared::test_utils::{mock_request_id, proxy_event, test_runtime};
//!
//! #[test]
//! fn test_handler() {
//!     let runtime = test_runtime();
//!     let event = proxy_event("/trips", &[("start_time", "0")]);
//!     let request_id = mock_request_id("test-request-123");
//!     // ... test handler logic
//! }
//! ```

use serde_json::{json, Map, Value};

use mds_provider_lib::ProviderConfig;

use crate::response::ApiGatewayResponse;
use crate::runtime::LambdaRuntime;

/// Provider id used by [`test_runtime`].
pub const TEST_PROVIDER_ID: &str = "test-provider";

/// Token mapped to `city-of-example` in the default credential table.
pub const EXAMPLE_TOKEN: &str = "circuit-token-12345";

/// Token mapped to `city-of-demo` in the default credential table.
pub const DEMO_TOKEN: &str = "circuit-token-67890";

/// Example method ARN for authorizer tests.
pub const TEST_METHOD_ARN: &str =
    "arn:aws:execute-api:us-east-1:123456789012:abc123/prod/GET/vehicles";

/// Runtime with default configuration and a fixed provider id.
pub fn test_runtime() -> LambdaRuntime {
    LambdaRuntime::new(ProviderConfig::default().with_provider_id(TEST_PROVIDER_ID))
}

/// Build an API Gateway proxy event for `GET path` with the given query string.
///
/// An empty parameter list produces `"queryStringParameters": null`, as
/// API Gateway does.
pub fn proxy_event(path: &str, params: &[(&str, &str)]) -> Value {
    let query = if params.is_empty() {
        Value::Null
    } else {
        Value::Object(
            params
                .iter()
                .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
                .collect::<Map<_, _>>(),
        )
    };

    json!({
        "resource": path,
        "path": path,
        "httpMethod": "GET",
        "headers": {"Authorization": format!("Bearer {EXAMPLE_TOKEN}")},
        "queryStringParameters": query,
        "requestContext": {
            "requestId": "test-request",
            "authorizer": {"agency_id": "city-of-example"}
        }
    })
}

/// Build a TOKEN authorizer event.
pub fn authorizer_event(authorization_token: &str, method_arn: &str) -> Value {
    json!({
        "type": "TOKEN",
        "authorizationToken": authorization_token,
        "methodArn": method_arn,
    })
}

/// Decode a response body as JSON.
///
/// # Panics
///
/// Panics if the body is not valid JSON.
pub fn body_json(response: &ApiGatewayResponse) -> Value {
    serde_json::from_str(&response.body).expect("response body should be JSON")
}

/// Create a mock Lambda context for testing.
///
/// Returns a request ID string suitable for use in tests.
pub fn mock_request_id(prefix: &str) -> String {
    format!("{}-{}", prefix, std::process::id())
}
