//! Create/Read/Update/Delete/List handlers for the association resource.

mod create;
mod delete;
mod list;
mod read;
mod update;

use servicecatalog_provider_core::{
    Action, HandlerError, ProgressEvent, ResourceHandlerRequest, ServiceCatalogApi,
};

use crate::model::{CallbackContext, ResourceModel, TYPE_NAME};

/// Route one framework invocation to the matching handler. Create and Delete
/// re-enter through their stabilization path when a callback context is
/// present.
pub async fn handle_request<C: ServiceCatalogApi>(
    api: &C,
    action: Action,
    request: &ResourceHandlerRequest<ResourceModel>,
    callback_context: Option<&CallbackContext>,
) -> Result<ProgressEvent<ResourceModel, CallbackContext>, HandlerError> {
    match action {
        Action::Create => create::handle(api, request, callback_context).await,
        Action::Read => read::handle(api, request).await,
        Action::Update => update::handle(api, request).await,
        Action::Delete => delete::handle(api, request, callback_context).await,
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

fn required_key(
    model: &ResourceModel,
) -> Result<servicecatalog_provider_core::AssociationKey, HandlerError> {
    model.association_key().ok_or_else(|| {
        HandlerError::invalid_request(
            TYPE_NAME,
            "ProductId, ProvisioningArtifactId and ServiceActionId are required",
        )
    })
}
