//! AWS Lambda function for the MDS reports endpoint.
//!
//! Requires `start_date`. Reports are aggregated daily, so responses are
//! cacheable for a full day.

use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

use mds_lambda_shared::{
    get_runtime, handle_collection, init_runtime, init_tracing, ApiGatewayRequest,
    ApiGatewayResponse, LambdaRuntime,
};
use mds_provider_lib::{list_reports, Resource};

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    let _runtime = init_runtime();

    lambda_runtime::run(service_fn(handler)).await
}

async fn handler(event: LambdaEvent<Value>) -> Result<ApiGatewayResponse, Error> {
    let request_id = event.context.request_id.clone();
    Ok(handle_event(event.payload, &request_id, get_runtime()))
}

fn handle_event(payload: Value, request_id: &str, runtime: &LambdaRuntime) -> ApiGatewayResponse {
    let request = ApiGatewayRequest::from_payload(payload, request_id);
    handle_collection(
        Resource::Reports,
        runtime,
        &request,
        request_id,
        |params, _| list_reports(runtime.source(), params),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use mds_lambda_shared::test_utils::{body_json, mock_request_id, proxy_event, test_runtime};
    use serde_json::json;

    fn call(params: &[(&str, &str)]) -> (ApiGatewayResponse, Value) {
        let runtime = test_runtime();
        let response = handle_event(
            proxy_event("/reports", params),
            &mock_request_id("reports"),
            &runtime,
        );
        let body = body_json(&response);
        (response, body)
    }

    #[test]
    fn test_missing_start_date_is_400() {
        let (response, body) = call(&[]);
        assert_eq!(response.status_code, 400);
        assert_eq!(
            body,
            json!({"error": "Bad Request", "message": "start_date parameter is required"})
        );
    }

    #[test]
    fn test_start_time_does_not_satisfy_start_date() {
        let (response, _) = call(&[("start_time", "0")]);
        assert_eq!(response.status_code, 400);
    }

    #[test]
    fn test_any_start_date_value_is_accepted() {
        for value in ["2024-01", "2024-01-01", "last-month"] {
            let (response, body) = call(&[("start_date", value)]);
            assert_eq!(response.status_code, 200, "{value}");
            assert_eq!(body["data"]["reports"], json!([]));
        }
    }

    #[test]
    fn test_reports_ttl_is_one_day() {
        let (response, body) = call(&[("start_date", "2024-01")]);
        assert_eq!(body["ttl"], 86_400);
        assert_eq!(response.headers["Cache-Control"], "max-age=86400");
    }
}
