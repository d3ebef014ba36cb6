//! The Service Catalog API surface the providers depend on.
//!
//! Controllers call this trait rather than the SDK client directly; the
//! production implementation lives in [`crate::client`], and tests substitute
//! the scripted double from [`crate::test_util`].

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::error::ApiError;

/// Summary fields shared by list and describe responses.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ServiceActionSummary {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub definition_type: Option<String>,
}

/// Full definition of a service action as returned by the service.
///
/// Definition entries are keyed deterministically so models built from a
/// detail list their parameters in a stable order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ServiceActionDetail {
    pub summary: ServiceActionSummary,
    pub definition: BTreeMap<String, String>,
}

/// One page of summaries plus the continuation token, if any.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SummaryPage {
    pub summaries: Vec<ServiceActionSummary>,
    pub next_page_token: Option<String>,
}

/// Inputs for CreateServiceAction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateServiceActionInput {
    pub name: String,
    pub definition_type: String,
    pub definition: BTreeMap<String, String>,
    pub description: Option<String>,
    pub idempotency_token: Option<String>,
}

/// Inputs for UpdateServiceAction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UpdateServiceActionInput {
    pub id: String,
    pub name: Option<String>,
    pub definition: BTreeMap<String, String>,
    pub description: Option<String>,
}

/// Compound key addressing one service action association.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AssociationKey {
    pub product_id: String,
    pub provisioning_artifact_id: String,
    pub service_action_id: String,
}

/// Injected Service Catalog capability.
///
/// List operations are page-at-a-time; callers own the pagination loop and
/// its termination condition.
#[async_trait]
pub trait ServiceCatalogApi: Send + Sync {
    async fn create_service_action(
        &self,
        input: CreateServiceActionInput,
    ) -> Result<ServiceActionDetail, ApiError>;

    async fn describe_service_action(&self, id: &str) -> Result<ServiceActionDetail, ApiError>;

    async fn update_service_action(
        &self,
        input: UpdateServiceActionInput,
    ) -> Result<ServiceActionDetail, ApiError>;

    async fn delete_service_action(&self, id: &str) -> Result<(), ApiError>;

    async fn list_service_actions(&self, page_token: Option<&str>)
        -> Result<SummaryPage, ApiError>;

    async fn associate_service_action(&self, key: &AssociationKey) -> Result<(), ApiError>;

    async fn disassociate_service_action(&self, key: &AssociationKey) -> Result<(), ApiError>;

    async fn list_associated_service_actions(
        &self,
        product_id: &str,
        provisioning_artifact_id: &str,
        page_token: Option<&str>,
    ) -> Result<SummaryPage, ApiError>;
}
