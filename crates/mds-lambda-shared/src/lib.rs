//! Shared infrastructure for MDS Provider API AWS Lambda functions.
//!
//! This crate provides common functionality used across all Lambda handlers:
//!
//! - [`LambdaRuntime`]: Configuration, credentials and record source built once per cold start
//! - [`init_tracing`]: JSON-formatted tracing for CloudWatch Logs
//! - [`handle_collection`] / [`handle_document`]: the shared request template
//! - [`ApiGatewayResponse`] and [`ErrorBody`]: proxy responses and error bodies
//! - Request types for proxy and TOKEN authorizer events
//!
//! # Testing Support
//!
//! The [`test_utils`] module provides event builders and a deterministic
//! runtime for Lambda handler testing. Enable the `test-utils` feature to
//! access it from dependent crates.

#![deny(warnings)]

mod error_body;
mod handler;
mod requests;
mod response;
mod runtime;
mod tracing_init;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error_body::{failure_message, from_lib_error, ErrorBody, ERROR_BAD_REQUEST, ERROR_INTERNAL};
pub use handler::{handle_collection, handle_document};
pub use requests::{ApiGatewayRequest, AuthorizerRequest, RequestContext};
pub use response::{
    ApiGatewayResponse, CONTENT_TYPE_JSON, HEADER_ALLOW_ORIGIN, HEADER_CACHE_CONTROL,
    HEADER_CONTENT_TYPE,
};
pub use runtime::{get_runtime, init_runtime, LambdaRuntime};
pub use tracing_init::{init_tracing, LogFormat};

/// Error returned to the Lambda runtime when a bearer token is rejected.
///
/// API Gateway maps an authorizer failure with exactly this message to a
/// 401 response.
pub fn unauthorized() -> lambda_runtime::Error {
    "Unauthorized".into()
}
