//! Update handler: disassociate the previous triple, associate the desired
//! one, and surface the envelope as-is so a partial failure is visible.

use servicecatalog_provider_core::{
    HandlerError, ProgressEvent, ResourceHandlerRequest, ServiceCatalogApi,
};

use crate::controller::ActionAssociationController;
use crate::model::{CallbackContext, ResourceModel, TYPE_NAME};

use super::desired_state;

pub async fn handle<C: ServiceCatalogApi>(
    api: &C,
    request: &ResourceHandlerRequest<ResourceModel>,
) -> Result<ProgressEvent<ResourceModel, CallbackContext>, HandlerError> {
    let desired = desired_state(request)?;
    let previous = request.previous_resource_state.as_ref().ok_or_else(|| {
        HandlerError::invalid_request(TYPE_NAME, "previous resource state is required")
    })?;

    let controller = ActionAssociationController::new(api);
    let status = controller.update_association(previous, desired).await;

    Ok(ProgressEvent {
        status: status.status,
        error_code: status.error_code,
        message: status.error_message,
        callback_context: None,
        callback_delay_seconds: None,
        resource_model: Some(status.resource_model),
        resource_models: None,
    })
}
