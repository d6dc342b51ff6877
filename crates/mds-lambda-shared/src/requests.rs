//! Request types for API Gateway proxy and token-authorizer events.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use mds_provider_lib::QueryParams;

/// Identity values the authorizer attached to the request context.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    #[serde(default)]
    pub request_id: Option<String>,

    /// Context map produced by the token authorizer (all values strings).
    #[serde(default)]
    pub authorizer: Option<HashMap<String, Value>>,
}

/// API Gateway REST proxy event.
///
/// Only the fields the handlers read are modelled; everything else in the
/// event is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGatewayRequest {
    #[serde(default)]
    pub path: Option<String>,

    #[serde(default)]
    pub http_method: Option<String>,

    /// Absent (or `null`) when the request has no query string.
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,

    #[serde(default)]
    pub request_context: Option<RequestContext>,
}

impl ApiGatewayRequest {
    /// Decode a raw event payload.
    ///
    /// A payload that does not decode is treated as a request with no
    /// parameters so that mandatory-parameter checks still run.
    pub fn from_payload(payload: Value, request_id: &str) -> Self {
        serde_json::from_value(payload).unwrap_or_else(|e| {
            warn!(
                request_id = %request_id,
                error = %e,
                "undecodable proxy event, treating as empty request"
            );
            Self::default()
        })
    }

    /// Query parameters as a lookup table.
    pub fn query_params(&self) -> QueryParams {
        self.query_string_parameters
            .iter()
            .flatten()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Agency the authorizer resolved for this request, if any.
    pub fn agency_id(&self) -> Option<&str> {
        self.request_context
            .as_ref()?
            .authorizer
            .as_ref()?
            .get("agency_id")?
            .as_str()
    }
}

/// API Gateway TOKEN authorizer event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizerRequest {
    /// Always `TOKEN` for this authorizer type.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,

    /// Raw `Authorization` header value, usually `Bearer <token>`.
    #[serde(default)]
    pub authorization_token: String,

    /// ARN of the method being invoked.
    #[serde(default)]
    pub method_arn: String,
}

impl AuthorizerRequest {
    /// Decode a raw authorizer payload; missing fields become empty strings.
    pub fn from_payload(payload: Value) -> Self {
        serde_json::from_value(payload).unwrap_or_default()
    }
}
