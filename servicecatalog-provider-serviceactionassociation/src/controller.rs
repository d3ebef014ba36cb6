//! Association operations against the Service Catalog API.

use log::{info, warn};
use servicecatalog_provider_core::{
    ApiError, AssociationKey, HandlerErrorCode, OperationStatus, ServiceCatalogApi,
};

use crate::model::{ResourceModel, UpdateAssociationStatus};

pub struct ActionAssociationController<'a, C> {
    api: &'a C,
}

impl<'a, C: ServiceCatalogApi> ActionAssociationController<'a, C> {
    pub fn new(api: &'a C) -> Self {
        Self { api }
    }

    pub async fn associate(&self, key: &AssociationKey) -> Result<(), ApiError> {
        info!(
            "associating service action {} with provisioning artifact {} of product {}",
            key.service_action_id, key.provisioning_artifact_id, key.product_id
        );
        self.api.associate_service_action(key).await
    }

    pub async fn disassociate(&self, key: &AssociationKey) -> Result<(), ApiError> {
        info!(
            "disassociating service action {} from provisioning artifact {} of product {}",
            key.service_action_id, key.provisioning_artifact_id, key.product_id
        );
        self.api.disassociate_service_action(key).await
    }

    /// Whether the service action is currently visible in the association
    /// list for its product/provisioning-artifact pair. Pages are scanned
    /// until a match is found or the list is exhausted.
    pub async fn is_associated(&self, key: &AssociationKey) -> Result<bool, ApiError> {
        let mut page_token: Option<String> = None;
        loop {
            let page = self
                .api
                .list_associated_service_actions(
                    &key.product_id,
                    &key.provisioning_artifact_id,
                    page_token.as_deref(),
                )
                .await?;
            if page
                .summaries
                .iter()
                .any(|summary| summary.id == key.service_action_id)
            {
                info!(
                    "service action {} associated to provisioning artifact {} of product {}",
                    key.service_action_id, key.provisioning_artifact_id, key.product_id
                );
                return Ok(true);
            }
            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }
        info!(
            "service action {} not associated to provisioning artifact {} of product {}",
            key.service_action_id, key.provisioning_artifact_id, key.product_id
        );
        Ok(false)
    }

    /// Every associated service action id, page order preserved.
    pub async fn list_association_ids(
        &self,
        product_id: &str,
        provisioning_artifact_id: &str,
    ) -> Result<Vec<String>, ApiError> {
        info!(
            "listing all service actions associated to provisioning artifact {provisioning_artifact_id} of product {product_id}"
        );
        let mut ids = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let page = self
                .api
                .list_associated_service_actions(
                    product_id,
                    provisioning_artifact_id,
                    page_token.as_deref(),
                )
                .await?;
            ids.extend(page.summaries.into_iter().map(|summary| summary.id));
            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }
        Ok(ids)
    }

    /// Two-step update: disassociate the previous triple, then associate the
    /// desired one. Failures are reported in the returned envelope so the
    /// handler can surface a partial result; a not-found on disassociate
    /// means the old association is already gone and is ignored.
    pub async fn update_association(
        &self,
        previous: &ResourceModel,
        desired: &ResourceModel,
    ) -> UpdateAssociationStatus {
        let Some(previous_key) = previous.association_key() else {
            return invalid_update_state(previous, "previous state is missing association fields");
        };
        let Some(desired_key) = desired.association_key() else {
            return invalid_update_state(previous, "desired state is missing association fields");
        };

        match self.disassociate(&previous_key).await {
            Ok(()) => {}
            Err(ApiError::NotFound(message)) => {
                warn!("disassociate during update found nothing to remove: {message}");
            }
            Err(err) => {
                warn!("disassociate during update failed: {err}");
                return UpdateAssociationStatus {
                    status: OperationStatus::Failed,
                    error_code: Some(HandlerErrorCode::NotStabilized),
                    error_message: Some(err.message().to_string()),
                    resource_model: previous.clone(),
                };
            }
        }

        match self.associate(&desired_key).await {
            Ok(()) => UpdateAssociationStatus {
                status: OperationStatus::Success,
                error_code: None,
                error_message: None,
                resource_model: desired.clone(),
            },
            Err(err) => {
                warn!("associate during update failed: {err}");
                let error_code = match &err {
                    ApiError::NotFound(_) => HandlerErrorCode::NotFound,
                    ApiError::Duplicate(_) => HandlerErrorCode::AlreadyExists,
                    ApiError::LimitExceeded(_) => HandlerErrorCode::ServiceLimitExceeded,
                    _ => HandlerErrorCode::NotStabilized,
                };
                UpdateAssociationStatus {
                    status: OperationStatus::Failed,
                    error_code: Some(error_code),
                    error_message: Some(err.message().to_string()),
                    resource_model: ResourceModel::default(),
                }
            }
        }
    }
}

fn invalid_update_state(previous: &ResourceModel, message: &str) -> UpdateAssociationStatus {
    UpdateAssociationStatus {
        status: OperationStatus::Failed,
        error_code: Some(HandlerErrorCode::InvalidRequest),
        error_message: Some(message.to_string()),
        resource_model: previous.clone(),
    }
}
