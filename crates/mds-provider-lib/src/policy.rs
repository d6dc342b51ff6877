//! IAM policy documents for the API Gateway Lambda authorizer.
//!
//! An `Allow` decision is scoped to every method of the invoked API stage
//! rather than the single method ARN, so one cached authorizer result
//! covers all endpoints. Values in the decision `context` must be scalar
//! strings, so permissions are comma-joined and the rate limit stringified.

use serde::{Deserialize, Serialize};

use crate::auth::CredentialRecord;
use crate::config::ProviderConfig;

pub const POLICY_VERSION: &str = "2012-10-17";
pub const INVOKE_ACTION: &str = "execute-api:Invoke";

/// Colon-delimited ARN segments kept before the wildcard.
const ARN_PREFIX_SEGMENTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    Allow,
    Deny,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Statement {
    pub action: String,
    pub effect: Effect,
    pub resource: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyDocument {
    pub version: String,
    pub statement: Vec<Statement>,
}

/// Identity forwarded to the backend integration on `Allow`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyContext {
    pub agency_id: String,
    pub permissions: String,
    pub rate_limit: String,
    pub mds_version: String,
    pub provider_id: String,
}

impl PolicyContext {
    pub fn from_credential(record: &CredentialRecord, config: &ProviderConfig) -> Self {
        Self {
            agency_id: record.agency_id.clone(),
            permissions: record.permissions_csv(),
            rate_limit: record.rate_limit.to_string(),
            mds_version: config.mds_version.clone(),
            provider_id: config.provider_id.clone(),
        }
    }
}

/// Authorizer response returned to API Gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessDecision {
    pub principal_id: String,
    pub policy_document: PolicyDocument,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<PolicyContext>,
}

impl AccessDecision {
    pub fn effect(&self) -> Effect {
        self.policy_document
            .statement
            .first()
            .map(|statement| statement.effect)
            .unwrap_or(Effect::Deny)
    }

    pub fn resource(&self) -> &str {
        self.policy_document
            .statement
            .first()
            .map(|statement| statement.resource.as_str())
            .unwrap_or_default()
    }
}

/// Widen a method ARN to every method of its API.
///
/// `arn:aws:execute-api:us-east-1:123456789012:abc123/prod/GET/vehicles`
/// becomes `arn:aws:execute-api:us-east-1:123456789012:*`. Identifiers with
/// fewer than six segments are returned unchanged.
pub fn resource_pattern(resource_arn: &str) -> String {
    let segments: Vec<&str> = resource_arn.split(':').collect();
    if segments.len() > ARN_PREFIX_SEGMENTS {
        format!("{}:*", segments[..ARN_PREFIX_SEGMENTS].join(":"))
    } else {
        resource_arn.to_string()
    }
}

/// Assemble an authorizer decision.
///
/// An `Allow` without a principal or resource is downgraded to `Deny`, and a
/// `Deny` never carries identity context.
pub fn build_decision(
    principal_id: &str,
    effect: Effect,
    resource_arn: &str,
    context: Option<PolicyContext>,
) -> AccessDecision {
    let resource = resource_pattern(resource_arn);
    let effect = match effect {
        Effect::Allow if principal_id.is_empty() || resource.is_empty() => Effect::Deny,
        other => other,
    };
    let context = match effect {
        Effect::Allow => context,
        Effect::Deny => None,
    };

    AccessDecision {
        principal_id: principal_id.to_string(),
        policy_document: PolicyDocument {
            version: POLICY_VERSION.to_string(),
            statement: vec![Statement {
                action: INVOKE_ACTION.to_string(),
                effect,
                resource,
            }],
        },
        context,
    }
}

/// `Allow` decision for an authenticated credential.
pub fn allow(
    record: &CredentialRecord,
    resource_arn: &str,
    config: &ProviderConfig,
) -> AccessDecision {
    build_decision(
        &record.agency_id,
        Effect::Allow,
        resource_arn,
        Some(PolicyContext::from_credential(record, config)),
    )
}
