//! Create handler: one CreateServiceAction call, idempotent on the client
//! request token.

use servicecatalog_provider_core::{
    translate_api_error, HandlerError, ProgressEvent, ResourceHandlerRequest, ServiceCatalogApi,
};

use crate::controller::{model_from_detail, ActionController};
use crate::model::{CallbackContext, ResourceModel, TYPE_NAME};

use super::desired_state;

pub async fn handle<C: ServiceCatalogApi>(
    api: &C,
    request: &ResourceHandlerRequest<ResourceModel>,
) -> Result<ProgressEvent<ResourceModel, CallbackContext>, HandlerError> {
    let controller = ActionController::new(api);
    let desired = desired_state(request)?;
    let detail = controller
        .create_service_action(desired, request.client_request_token.as_deref())
        .await
        .map_err(|err| translate_api_error(TYPE_NAME, err))?;
    Ok(ProgressEvent::success(Some(model_from_detail(&detail))))
}
