//! Read handler: membership check over the association list.

use log::info;
use servicecatalog_provider_core::{
    translate_api_error, HandlerError, ProgressEvent, ResourceHandlerRequest, ServiceCatalogApi,
};

use crate::controller::ActionAssociationController;
use crate::model::{CallbackContext, ResourceModel, TYPE_NAME};

use super::{desired_state, required_key};

pub async fn handle<C: ServiceCatalogApi>(
    api: &C,
    request: &ResourceHandlerRequest<ResourceModel>,
) -> Result<ProgressEvent<ResourceModel, CallbackContext>, HandlerError> {
    let desired = desired_state(request)?;
    let key = required_key(desired)?;
    let controller = ActionAssociationController::new(api);
    let associated = controller
        .is_associated(&key)
        .await
        .map_err(|err| translate_api_error(TYPE_NAME, err))?;
    if associated {
        Ok(ProgressEvent::success(Some(ResourceModel::from_key(&key))))
    } else {
        let message = format!(
            "service action {} with product id {} and provisioning artifact id {} not found",
            key.service_action_id, key.product_id, key.provisioning_artifact_id
        );
        info!("{message}");
        Err(HandlerError::NotFound {
            type_name: TYPE_NAME,
            message,
        })
    }
}
