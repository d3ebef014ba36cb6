//! Translates resource models into Service Catalog calls and back.

use std::collections::BTreeMap;

use log::info;
use servicecatalog_provider_core::{
    ApiError, CreateServiceActionInput, ServiceActionDetail, ServiceCatalogApi,
    UpdateServiceActionInput,
};

use crate::model::{DefinitionParameter, ResourceModel};

pub struct ActionController<'a, C> {
    api: &'a C,
}

impl<'a, C: ServiceCatalogApi> ActionController<'a, C> {
    pub fn new(api: &'a C) -> Self {
        Self { api }
    }

    pub async fn create_service_action(
        &self,
        desired: &ResourceModel,
        idempotency_token: Option<&str>,
    ) -> Result<ServiceActionDetail, ApiError> {
        let input = CreateServiceActionInput {
            name: desired.name.clone().unwrap_or_default(),
            definition_type: desired.definition_type.clone().unwrap_or_default(),
            definition: definition_map(desired.definition.as_deref()),
            description: desired.description.clone(),
            idempotency_token: idempotency_token.map(str::to_string),
        };
        info!(
            "creating service action with name: {}",
            desired.name.as_deref().unwrap_or_default()
        );
        self.api.create_service_action(input).await
    }

    pub async fn describe_service_action(&self, id: &str) -> Result<ServiceActionDetail, ApiError> {
        info!("describing service action with id: {id}");
        self.api.describe_service_action(id).await
    }

    pub async fn update_service_action(
        &self,
        id: &str,
        desired: &ResourceModel,
    ) -> Result<ServiceActionDetail, ApiError> {
        let input = UpdateServiceActionInput {
            id: id.to_string(),
            name: desired.name.clone(),
            definition: definition_map(desired.definition.as_deref()),
            description: desired.description.clone(),
        };
        info!("updating service action with id: {id}");
        self.api.update_service_action(input).await
    }

    pub async fn delete_service_action(&self, id: &str) -> Result<(), ApiError> {
        info!("deleting service action with id: {id}");
        self.api.delete_service_action(id).await
    }

    /// Exhausts pagination and returns every action id in page order.
    pub async fn list_all_service_action_ids(&self) -> Result<Vec<String>, ApiError> {
        info!("listing all service actions");
        let mut ids = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let page = self.api.list_service_actions(page_token.as_deref()).await?;
            ids.extend(page.summaries.into_iter().map(|summary| summary.id));
            // Both an absent and an empty continuation token end the scan.
            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }
        Ok(ids)
    }
}

fn definition_map(parameters: Option<&[DefinitionParameter]>) -> BTreeMap<String, String> {
    parameters
        .unwrap_or_default()
        .iter()
        .map(|parameter| (parameter.key.clone(), parameter.value.clone()))
        .collect()
}

/// Rebuild the template-visible model from a service response.
pub fn model_from_detail(detail: &ServiceActionDetail) -> ResourceModel {
    let definition = detail
        .definition
        .iter()
        .map(|(key, value)| DefinitionParameter {
            key: key.clone(),
            value: value.clone(),
        })
        .collect::<Vec<_>>();
    ResourceModel {
        id: Some(detail.summary.id.clone()),
        name: detail.summary.name.clone(),
        definition_type: detail.summary.definition_type.clone(),
        definition: Some(definition),
        description: detail.summary.description.clone(),
    }
}
