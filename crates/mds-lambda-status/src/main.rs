//! AWS Lambda function for the MDS provider status endpoint.
//!
//! Reports provider identity, endpoint health, service areas, fleet summary
//! and pricing. Takes no parameters.

use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

use mds_lambda_shared::{
    get_runtime, handle_document, init_runtime, init_tracing, ApiGatewayRequest,
    ApiGatewayResponse, LambdaRuntime,
};
use mds_provider_lib::{Resource, StatusDocument};

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
    handle_document(
        Resource::Status,
        runtime,
        &request,
        request_id,
        |_, now| Ok(StatusDocument::build(runtime.config(), now)),
    )
}
