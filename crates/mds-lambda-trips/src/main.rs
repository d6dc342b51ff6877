//! AWS Lambda function for the MDS trips endpoint.
//!
//! Requires `start_time`; `end_time` defaults to the time of the request.

use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

use mds_lambda_shared::{
    get_runtime, handle_collection, init_runtime, init_tracing, ApiGatewayRequest,
    ApiGatewayResponse, LambdaRuntime,
};
use mds_provider_lib::{list_trips, Resource};

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    // Initialize runtime (logs cold-start timing)
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
        Resource::Trips,
        runtime,
        &request,
        request_id,
        |params, now| list_trips(runtime.source(), params, now),
    )
}
