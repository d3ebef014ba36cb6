//! Delete handler.
//!
//! First invocation issues the disassociate call and returns in-progress;
//! re-invocations poll membership until the association is no longer
//! visible. A missing association surfaces as not-found.

use servicecatalog_provider_core::{
    translate_api_error, HandlerError, ProgressEvent, ResourceHandlerRequest, ServiceCatalogApi,
};

use crate::controller::ActionAssociationController;
use crate::model::{CallbackContext, ResourceModel, TYPE_NAME};
use crate::stabilizer::{
    stabilize, StabilizationTarget, NUMBER_OF_STATE_POLL_RETRIES, POLL_RETRY_DELAY_SECONDS,
};

use super::{desired_state, required_key};

pub async fn handle<C: ServiceCatalogApi>(
    api: &C,
    request: &ResourceHandlerRequest<ResourceModel>,
    callback_context: Option<&CallbackContext>,
) -> Result<ProgressEvent<ResourceModel, CallbackContext>, HandlerError> {
    let desired = desired_state(request)?;

    if let Some(context) = callback_context {
        return stabilize(api, StabilizationTarget::Absent, desired, context).await;
    }

    let key = required_key(desired)?;
    let controller = ActionAssociationController::new(api);
    controller
        .disassociate(&key)
        .await
        .map_err(|err| translate_api_error(TYPE_NAME, err))?;

    let context = CallbackContext::new(&key, NUMBER_OF_STATE_POLL_RETRIES);
    Ok(ProgressEvent::in_progress(
        desired.clone(),
        context,
        POLL_RETRY_DELAY_SECONDS,
    ))
}
