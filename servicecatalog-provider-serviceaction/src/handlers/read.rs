//! Read handler: DescribeServiceAction by id.

use servicecatalog_provider_core::{
    translate_api_error, HandlerError, ProgressEvent, ResourceHandlerRequest, ServiceCatalogApi,
};

use crate::controller::{model_from_detail, ActionController};
use crate::model::{CallbackContext, ResourceModel, TYPE_NAME};

use super::{desired_state, required_id};

pub async fn handle<C: ServiceCatalogApi>(
    api: &C,
    request: &ResourceHandlerRequest<ResourceModel>,
) -> Result<ProgressEvent<ResourceModel, CallbackContext>, HandlerError> {
    let controller = ActionController::new(api);
    let desired = desired_state(request)?;
    let id = required_id(desired)?;
    let detail = controller
        .describe_service_action(id)
        .await
        .map_err(|err| translate_api_error(TYPE_NAME, err))?;
    Ok(ProgressEvent::success(Some(model_from_detail(&detail))))
}
