//! API Gateway TOKEN authorizer for the MDS Provider API.
//!
//! Resolves the bearer token to an agency and returns an IAM policy that
//! allows every method of the API. Rejected tokens fail the invocation with
//! `Unauthorized`, which API Gateway turns into a 401.
//!
//! The scope required by the invoked endpoint is logged but not enforced.

use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing::info;

use mds_lambda_shared::{
    get_runtime, init_runtime, init_tracing, unauthorized, AuthorizerRequest, LambdaRuntime,
};
use mds_provider_lib::policy::allow;
use mds_provider_lib::resource::permission_for_path;
use mds_provider_lib::AccessDecision;

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    let _runtime = init_runtime();

    lambda_runtime::run(service_fn(handler)).await
}

async fn handler(event: LambdaEvent<Value>) -> Result<AccessDecision, Error> {
    let request_id = event.context.request_id.clone();
    authorize_event(event.payload, &request_id, get_runtime())
}

fn authorize_event(
    payload: Value,
    request_id: &str,
    runtime: &LambdaRuntime,
) -> Result<AccessDecision, Error> {
    let request = AuthorizerRequest::from_payload(payload);

    info!(
        request_id = %request_id,
        method_arn = %request.method_arn,
        "authorizing request"
    );

    let record = runtime
        .authority()
        .authorize(&request.authorization_token)
        .map_err(|_| unauthorized())?;

    let required = permission_for_path(&request.method_arn);
    info!(
        request_id = %request_id,
        agency_id = %record.agency_id,
        required_scope = required,
        granted = record.has_permission(required),
        "scope check (advisory)"
    );

    let decision = allow(&record, &request.method_arn, runtime.config());

    info!(
        request_id = %request_id,
        principal_id = %decision.principal_id,
        effect = ?decision.effect(),
        resource = decision.resource(),
        "policy generated"
    );

    Ok(decision)
}
