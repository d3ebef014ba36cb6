//! CloudFormation-facing model for the service action resource.

use serde::{Deserialize, Serialize};

pub const TYPE_NAME: &str = "AWS::ServiceCatalog::ServiceAction";

/// One key/value entry of the action definition (`Name`, `Version`,
/// `AssumeRole`, `Parameters`, ...). Order is preserved as written in the
/// template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DefinitionParameter {
    pub key: String,
    pub value: String,
}

/// Template-visible state of a service action.
///
/// Fields are optional at the wire level; the template schema enforces
/// required-ness before a handler ever runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResourceModel {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub definition_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub definition: Option<Vec<DefinitionParameter>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
}

/// No state survives between invocations for this resource; every operation
/// completes within a single call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackContext {}
