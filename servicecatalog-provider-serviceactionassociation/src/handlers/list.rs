//! List handler: every service action associated to the requested
//! product/provisioning-artifact pair.

use servicecatalog_provider_core::{
    translate_api_error, HandlerError, ProgressEvent, ResourceHandlerRequest, ServiceCatalogApi,
};

use crate::controller::ActionAssociationController;
use crate::model::{CallbackContext, ResourceModel, TYPE_NAME};

use super::desired_state;

pub async fn handle<C: ServiceCatalogApi>(
    api: &C,
    request: &ResourceHandlerRequest<ResourceModel>,
) -> Result<ProgressEvent<ResourceModel, CallbackContext>, HandlerError> {
    let desired = desired_state(request)?;
    let product_id = desired
        .product_id
        .as_deref()
        .ok_or_else(|| HandlerError::invalid_request(TYPE_NAME, "ProductId is required"))?;
    let provisioning_artifact_id = desired.provisioning_artifact_id.as_deref().ok_or_else(|| {
        HandlerError::invalid_request(TYPE_NAME, "ProvisioningArtifactId is required")
    })?;

    let controller = ActionAssociationController::new(api);
    let ids = controller
        .list_association_ids(product_id, provisioning_artifact_id)
        .await
        .map_err(|err| translate_api_error(TYPE_NAME, err))?;

    let models = ids
        .into_iter()
        .map(|service_action_id| ResourceModel {
            id: None,
            product_id: Some(product_id.to_string()),
            provisioning_artifact_id: Some(provisioning_artifact_id.to_string()),
            service_action_id: Some(service_action_id),
        })
        .collect();
    Ok(ProgressEvent::success_list(models))
}
