//! Common request handling for the data endpoints.
//!
//! Every data Lambda follows the same sequence: extract query parameters,
//! fetch and filter, wrap in the versioned envelope, and turn any failure
//! into a structured error response. Only the fetch step differs per
//! resource, so it is passed in as a closure.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

use http::StatusCode;
use serde::Serialize;
use tracing::{error, info, warn};

use mds_provider_lib::{now_ms, Envelope, QueryParams, Resource, Result, Timestamp};

use crate::error_body::{failure_message, from_lib_error, ErrorBody};
use crate::requests::ApiGatewayRequest;
use crate::response::ApiGatewayResponse;
use crate::runtime::LambdaRuntime;

/// Serve a collection resource.
///
/// `fetch` receives the request's parameters and the current time and
/// returns the already-filtered records. The same time stamps the
/// envelope's `last_updated`.
pub fn handle_collection<T, F>(
    resource: Resource,
    runtime: &LambdaRuntime,
    request: &ApiGatewayRequest,
    request_id: &str,
    fetch: F,
) -> ApiGatewayResponse
where
    T: Serialize,
    F: FnOnce(&QueryParams, Timestamp) -> Result<Vec<T>>,
{
    handle(resource, runtime, request, request_id, |params, now| {
        let records = fetch(params, now)?;
        Ok((records.len(), records))
    })
}

/// Serve a single-document resource such as status.
pub fn handle_document<P, F>(
    resource: Resource,
    runtime: &LambdaRuntime,
    request: &ApiGatewayRequest,
    request_id: &str,
    build: F,
) -> ApiGatewayResponse
where
    P: Serialize,
    F: FnOnce(&QueryParams, Timestamp) -> Result<P>,
{
    handle(resource, runtime, request, request_id, |params, now| {
        Ok((1, build(params, now)?))
    })
}

fn handle<P, F>(
    resource: Resource,
    runtime: &LambdaRuntime,
    request: &ApiGatewayRequest,
    request_id: &str,
    fetch: F,
) -> ApiGatewayResponse
where
    P: Serialize,
    F: FnOnce(&QueryParams, Timestamp) -> Result<(usize, P)>,
{
    let params = request.query_params();

    info!(
        request_id = %request_id,
        resource = %resource,
        method = request.http_method.as_deref().unwrap_or("-"),
        path = request.path.as_deref().unwrap_or("-"),
        params = ?params.names(),
        agency_id = request.agency_id().unwrap_or("-"),
        "handling request"
    );

    let outcome = catch_unwind(AssertUnwindSafe(|| -> Result<(usize, String)> {
        let now = now_ms();
        let (count, payload) = fetch(&params, now)?;
        let envelope = Envelope::build_at(
            runtime.config().mds_version.as_str(),
            resource.name(),
            payload,
            resource.ttl_seconds(),
            now,
        );
        Ok((count, envelope.to_json()?))
    }));

    match outcome {
        Ok(Ok((count, body))) => {
            info!(
                request_id = %request_id,
                resource = %resource,
                count = count,
                status = 200,
                "request completed"
            );
            ApiGatewayResponse::ok(body, resource.ttl_seconds())
        }
        Ok(Err(e)) => {
            let (status, body) = from_lib_error(&e, resource);
            if status == StatusCode::BAD_REQUEST {
                warn!(
                    request_id = %request_id,
                    resource = %resource,
                    status = status.as_u16(),
                    error = %e,
                    "rejected request"
                );
            } else {
                error!(
                    request_id = %request_id,
                    resource = %resource,
                    status = status.as_u16(),
                    error = %e,
                    "request failed"
                );
            }
            ApiGatewayResponse::error(status, &body)
        }
        Err(payload) => {
            error!(
                request_id = %request_id,
                resource = %resource,
                status = StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                error = %panic_message(&*payload),
                "handler panicked"
            );
            ApiGatewayResponse::error(
                StatusCode::INTERNAL_SERVER_ERROR,
                &ErrorBody::internal_error(failure_message(resource)),
            )
        }
    }
}

/// Text of a panic payload raised with `panic!`, if it carried one.
fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

#[cfg(test)]
mod tests {
    use super::*;
    use mds_provider_lib::{Error, ProviderConfig};
    use std::cell::Cell;
    use serde_json::{json, Value};

    fn runtime() -> LambdaRuntime {
        LambdaRuntime::new(ProviderConfig::default())
    }

    fn request(params: Value) -> ApiGatewayRequest {
        ApiGatewayRequest::from_payload(json!({ "queryStringParameters": params }), "req")
    }

    fn body(response: &ApiGatewayResponse) -> Value {
        serde_json::from_str(&response.body).unwrap()
    }

    #[test]
    fn test_collection_wrapped_in_envelope() {
        let response = handle_collection(
            Resource::Trips,
            &runtime(),
            &request(json!({})),
            "req",
            |_, _| Ok(vec!["a", "b"]),
        );

        assert_eq!(response.status_code, 200);
        assert_eq!(response.headers["Cache-Control"], "max-age=3600");
        let json = body(&response);
        assert_eq!(json["version"], "2.0.2");
        assert_eq!(json["ttl"], 3600);
        assert_eq!(json["data"]["trips"], json!(["a", "b"]));
    }

    #[test]
    fn test_fetch_sees_query_params() {
        let response = handle_collection::<String, _>(
            Resource::Vehicles,
            &runtime(),
            &request(json!({"device_id": "vehicle_003"})),
            "req",
            |params, _| Ok(params.get("device_id").map(str::to_string).into_iter().collect()),
        );

        assert_eq!(body(&response)["data"]["vehicles"], json!(["vehicle_003"]));
    }

    #[test]
    fn test_client_error_is_400() {
        let response = handle_collection::<String, _>(
            Resource::Events,
            &runtime(),
            &request(json!({})),
            "req",
            |_, _| Err(Error::missing_parameter("start_time")),
        );

        assert_eq!(response.status_code, 400);
        assert!(!response.headers.contains_key("Cache-Control"));
        assert_eq!(body(&response)["message"], "start_time parameter is required");
    }

    #[test]
    fn test_source_error_is_500_without_detail() {
        let response = handle_collection::<String, _>(
            Resource::Vehicles,
            &runtime(),
            &request(json!({})),
            "req",
            |_, _| {
                Err(Error::DataSource {
                    message: "secret internal detail".to_string(),
                })
            },
        );

        assert_eq!(response.status_code, 500);
        assert_eq!(
            body(&response),
            json!({"error": "Internal server error", "message": "Failed to retrieve vehicles data"})
        );
    }

    #[test]
    fn test_panic_becomes_500() {
        let response = handle_document::<String, _>(
            Resource::Status,
            &runtime(),
            &request(json!({})),
            "req",
            |_, _| panic!("boom"),
        );

        assert_eq!(response.status_code, 500);
        assert_eq!(
            body(&response)["message"],
            "Failed to retrieve status information"
        );
    }

    #[test]
    fn test_panic_message_extraction() {
        let literal = catch_unwind(|| panic!("static message")).unwrap_err();
        assert_eq!(panic_message(&*literal), "static message");

        let formatted = catch_unwind(|| panic!("overflow at {}", 165)).unwrap_err();
        assert_eq!(panic_message(&*formatted), "overflow at 165");

        let opaque = catch_unwind(|| std::panic::panic_any(42_u8)).unwrap_err();
        assert_eq!(panic_message(&*opaque), "non-string panic payload");
    }

    #[test]
    fn test_fetch_time_stamps_envelope() {
        let seen = Cell::new(0_i64);
        let response = handle_collection::<String, _>(
            Resource::Trips,
            &runtime(),
            &request(json!({})),
            "req",
            |_, now| {
                seen.set(now);
                Ok(Vec::new())
            },
        );

        assert_eq!(body(&response)["last_updated"], seen.get());
    }

    #[test]
    fn test_document_uses_configured_version() {
        let config = ProviderConfig::from_lookup(|key| {
            (key == "MDS_VERSION").then(|| "2.1.0".to_string())
        });
        let runtime = LambdaRuntime::new(config);
        let response = handle_document(
            Resource::Status,
            &runtime,
            &request(json!(null)),
            "req",
            |_, _| Ok(json!({"ok": true})),
        );

        let json = body(&response);
        assert_eq!(json["version"], "2.1.0");
        assert_eq!(json["data"]["status"]["ok"], true);
    }
}
