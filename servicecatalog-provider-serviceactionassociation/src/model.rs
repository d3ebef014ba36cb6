//! CloudFormation-facing model and callback state for the association
//! resource.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use servicecatalog_provider_core::{AssociationKey, HandlerErrorCode, OperationStatus};

pub const TYPE_NAME: &str = "AWS::ServiceCatalog::ServiceActionAssociation";

const MAX_IDENTIFIER_LENGTH: usize = 64;

/// Template-visible state of one association. `Id` is the synthetic primary
/// identifier; the product/provisioning-artifact/service-action triple is the
/// key the service itself understands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResourceModel {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub product_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub provisioning_artifact_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub service_action_id: Option<String>,
}

impl ResourceModel {
    /// The compound key, if every identifying field is present.
    pub fn association_key(&self) -> Option<AssociationKey> {
        Some(AssociationKey {
            product_id: self.product_id.clone()?,
            provisioning_artifact_id: self.provisioning_artifact_id.clone()?,
            service_action_id: self.service_action_id.clone()?,
        })
    }

    /// Rebuild a model from the compound key.
    pub fn from_key(key: &AssociationKey) -> Self {
        Self {
            id: None,
            product_id: Some(key.product_id.clone()),
            provisioning_artifact_id: Some(key.provisioning_artifact_id.clone()),
            service_action_id: Some(key.service_action_id.clone()),
        }
    }
}

/// State threaded across re-invocations of an in-progress Create or Delete.
/// The framework persists it; this code only reads it and decrements the
/// retry counter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CallbackContext {
    pub service_action_id: String,
    pub product_id: String,
    pub provisioning_artifact_id: String,
    pub stabilization_retries_remaining: u32,
}

impl CallbackContext {
    pub fn new(key: &AssociationKey, stabilization_retries_remaining: u32) -> Self {
        Self {
            service_action_id: key.service_action_id.clone(),
            product_id: key.product_id.clone(),
            provisioning_artifact_id: key.provisioning_artifact_id.clone(),
            stabilization_retries_remaining,
        }
    }

    pub fn association_key(&self) -> AssociationKey {
        AssociationKey {
            product_id: self.product_id.clone(),
            provisioning_artifact_id: self.provisioning_artifact_id.clone(),
            service_action_id: self.service_action_id.clone(),
        }
    }
}

/// Outcome envelope for the two-step update, so a failed associate after a
/// successful disassociate is reported as data rather than an error return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateAssociationStatus {
    pub status: OperationStatus,
    pub error_code: Option<HandlerErrorCode>,
    pub error_message: Option<String>,
    pub resource_model: ResourceModel,
}

/// Derive the primary identifier for a new association from the logical
/// resource id and the client request token, capped at 64 characters.
pub fn generate_association_identifier(
    logical_resource_identifier: Option<&str>,
    client_request_token: Option<&str>,
) -> String {
    let logical = logical_resource_identifier
        .filter(|id| !id.is_empty())
        .unwrap_or("resource");
    let mut hasher = DefaultHasher::new();
    client_request_token.unwrap_or_default().hash(&mut hasher);
    let suffix = format!("{:012x}", hasher.finish() & 0xffff_ffff_ffff);
    let max_prefix = MAX_IDENTIFIER_LENGTH - suffix.len() - 1;
    let prefix: String = logical.chars().take(max_prefix).collect();
    format!("{prefix}-{suffix}")
}
