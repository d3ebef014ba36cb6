//! Types modeling the CloudFormation resource-provider invocation contract.
//!
//! The external framework owns this wire format; these types mirror the
//! fields the handlers read and produce.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Terminal or in-progress status of a single handler invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationStatus {
    Success,
    InProgress,
    Failed,
}

/// Error classification reported back to CloudFormation on failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandlerErrorCode {
    NotFound,
    AlreadyExists,
    ServiceLimitExceeded,
    InvalidRequest,
    NotStabilized,
    InternalFailure,
}

/// Lifecycle action CloudFormation is invoking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
    List,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::List => "list",
        };
        f.write_str(name)
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "create" => Ok(Action::Create),
            "read" => Ok(Action::Read),
            "update" => Ok(Action::Update),
            "delete" => Ok(Action::Delete),
            "list" => Ok(Action::List),
            other => Err(format!(
                "unknown action '{other}', expected one of: create, read, update, delete, list"
            )),
        }
    }
}

/// A single handler invocation as delivered by the framework.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceHandlerRequest<M> {
    #[serde(default = "Option::default")]
    pub desired_resource_state: Option<M>,
    #[serde(default = "Option::default")]
    pub previous_resource_state: Option<M>,
    #[serde(default)]
    pub logical_resource_identifier: Option<String>,
    #[serde(default)]
    pub client_request_token: Option<String>,
}

impl<M> Default for ResourceHandlerRequest<M> {
    fn default() -> Self {
        Self {
            desired_resource_state: None,
            previous_resource_state: None,
            logical_resource_identifier: None,
            client_request_token: None,
        }
    }
}

/// Result of one handler invocation.
///
/// `InProgress` events carry the callback context the framework hands back on
/// re-invocation, plus the delay it should wait before doing so.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEvent<M, C> {
    pub status: OperationStatus,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error_code: Option<HandlerErrorCode>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default = "Option::default")]
    pub callback_context: Option<C>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub callback_delay_seconds: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none", default = "Option::default")]
    pub resource_model: Option<M>,
    #[serde(skip_serializing_if = "Option::is_none", default = "Option::default")]
    pub resource_models: Option<Vec<M>>,
}

impl<M, C> ProgressEvent<M, C> {
    /// Terminal success, optionally carrying the resulting resource model.
    pub fn success(resource_model: Option<M>) -> Self {
        Self {
            status: OperationStatus::Success,
            error_code: None,
            message: None,
            callback_context: None,
            callback_delay_seconds: None,
            resource_model,
            resource_models: None,
        }
    }

    /// Terminal success for List, carrying the aggregated models.
    pub fn success_list(resource_models: Vec<M>) -> Self {
        Self {
            status: OperationStatus::Success,
            error_code: None,
            message: None,
            callback_context: None,
            callback_delay_seconds: None,
            resource_model: None,
            resource_models: Some(resource_models),
        }
    }

    /// Ask the framework to re-invoke after `delay_seconds` with `context`.
    pub fn in_progress(resource_model: M, context: C, delay_seconds: u64) -> Self {
        Self {
            status: OperationStatus::InProgress,
            error_code: None,
            message: None,
            callback_context: Some(context),
            callback_delay_seconds: Some(delay_seconds),
            resource_model: Some(resource_model),
            resource_models: None,
        }
    }

    /// Terminal failure with the given classification.
    pub fn failed(error_code: HandlerErrorCode, message: impl Into<String>) -> Self {
        Self {
            status: OperationStatus::Failed,
            error_code: Some(error_code),
            message: Some(message.into()),
            callback_context: None,
            callback_delay_seconds: None,
            resource_model: None,
            resource_models: None,
        }
    }
}
