//! Create/Read/Update/Delete/List handlers for the service action resource.

mod create;
mod delete;
mod list;
mod read;
mod update;

use servicecatalog_provider_core::{
    Action, HandlerError, ProgressEvent, ResourceHandlerRequest, ServiceCatalogApi,
};

use crate::model::{CallbackContext, ResourceModel, TYPE_NAME};

/// Route one framework invocation to the matching handler.
///
/// Every operation here completes in a single invocation, so the callback
/// context is never populated.
pub async fn handle_request<C: ServiceCatalogApi>(
    api: &C,
    action: Action,
    request: &ResourceHandlerRequest<ResourceModel>,
    _callback_context: Option<&CallbackContext>,
) -> Result<ProgressEvent<ResourceModel, CallbackContext>, HandlerError> {
    match action {
        Action::Create => create::handle(api, request).await,
        Action::Read => read::handle(api, request).await,
        Action::Update => update::handle(api, request).await,
        Action::Delete => delete::handle(api, request).await,
        Action::List => list::handle(api, request).await,
    }
}

fn desired_state(
    request: &ResourceHandlerRequest<ResourceModel>,
) -> Result<&ResourceModel, HandlerError> {
    request
        .desired_resource_state
        .as_ref()
        .ok_or_else(|| HandlerError::invalid_request(TYPE_NAME, "desired resource state is required"))
}

fn required_id(model: &ResourceModel) -> Result<&str, HandlerError> {
    model
        .id
        .as_deref()
        .ok_or_else(|| HandlerError::invalid_request(TYPE_NAME, "Id is required"))
}
