//! Scripted [`ServiceCatalogApi`] double for controller and handler tests.
//!
//! Each operation pops the next scripted result for that method; an
//! unscripted call panics with the operation name so tests fail loudly on
//! unexpected traffic. Calls are recorded in invocation order.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::{
    AssociationKey, CreateServiceActionInput, ServiceActionDetail, ServiceCatalogApi, SummaryPage,
    UpdateServiceActionInput,
};
use crate::error::ApiError;

type Script<T> = Mutex<VecDeque<Result<T, ApiError>>>;

#[derive(Default)]
pub struct ScriptedServiceCatalog {
    create_results: Script<ServiceActionDetail>,
    describe_results: Script<ServiceActionDetail>,
    update_results: Script<ServiceActionDetail>,
    delete_results: Script<()>,
    list_pages: Script<SummaryPage>,
    associate_results: Script<()>,
    disassociate_results: Script<()>,
    association_pages: Script<SummaryPage>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedServiceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_create(self, result: Result<ServiceActionDetail, ApiError>) -> Self {
        push(&self.create_results, result);
        self
    }

    pub fn with_describe(self, result: Result<ServiceActionDetail, ApiError>) -> Self {
        push(&self.describe_results, result);
        self
    }

    pub fn with_update(self, result: Result<ServiceActionDetail, ApiError>) -> Self {
        push(&self.update_results, result);
        self
    }

    pub fn with_delete(self, result: Result<(), ApiError>) -> Self {
        push(&self.delete_results, result);
        self
    }

    pub fn with_list_page(self, result: Result<SummaryPage, ApiError>) -> Self {
        push(&self.list_pages, result);
        self
    }

    pub fn with_associate(self, result: Result<(), ApiError>) -> Self {
        push(&self.associate_results, result);
        self
    }

    pub fn with_disassociate(self, result: Result<(), ApiError>) -> Self {
        push(&self.disassociate_results, result);
        self
    }

    pub fn with_association_page(self, result: Result<SummaryPage, ApiError>) -> Self {
        push(&self.association_pages, result);
        self
    }

    /// Operations observed so far, in invocation order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock poisoned").clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().expect("calls lock poisoned").push(call);
    }
}

fn push<T>(script: &Script<T>, result: Result<T, ApiError>) {
    script.lock().expect("script lock poisoned").push_back(result);
}

fn next<T>(script: &Script<T>, operation: &str) -> Result<T, ApiError> {
    script
        .lock()
        .expect("script lock poisoned")
        .pop_front()
        .unwrap_or_else(|| panic!("unscripted call to {operation}"))
}

#[async_trait]
impl ServiceCatalogApi for ScriptedServiceCatalog {
    async fn create_service_action(
        &self,
        input: CreateServiceActionInput,
    ) -> Result<ServiceActionDetail, ApiError> {
        self.record(format!("create:{}", input.name));
        next(&self.create_results, "create_service_action")
    }

    async fn describe_service_action(&self, id: &str) -> Result<ServiceActionDetail, ApiError> {
        self.record(format!("describe:{id}"));
        next(&self.describe_results, "describe_service_action")
    }

    async fn update_service_action(
        &self,
        input: UpdateServiceActionInput,
    ) -> Result<ServiceActionDetail, ApiError> {
        self.record(format!("update:{}", input.id));
        next(&self.update_results, "update_service_action")
    }

    async fn delete_service_action(&self, id: &str) -> Result<(), ApiError> {
        self.record(format!("delete:{id}"));
        next(&self.delete_results, "delete_service_action")
    }

    async fn list_service_actions(
        &self,
        page_token: Option<&str>,
    ) -> Result<SummaryPage, ApiError> {
        self.record(format!("list:{}", page_token.unwrap_or("-")));
        next(&self.list_pages, "list_service_actions")
    }

    async fn associate_service_action(&self, key: &AssociationKey) -> Result<(), ApiError> {
        self.record(format!(
            "associate:{}/{}/{}",
            key.product_id, key.provisioning_artifact_id, key.service_action_id
        ));
        next(&self.associate_results, "associate_service_action")
    }

    async fn disassociate_service_action(&self, key: &AssociationKey) -> Result<(), ApiError> {
        self.record(format!(
            "disassociate:{}/{}/{}",
            key.product_id, key.provisioning_artifact_id, key.service_action_id
        ));
        next(&self.disassociate_results, "disassociate_service_action")
    }

    async fn list_associated_service_actions(
        &self,
        product_id: &str,
        provisioning_artifact_id: &str,
        page_token: Option<&str>,
    ) -> Result<SummaryPage, ApiError> {
        self.record(format!(
            "list_associations:{product_id}/{provisioning_artifact_id}:{}",
            page_token.unwrap_or("-")
        ));
        next(&self.association_pages, "list_associated_service_actions")
    }
}
