//! List handler: aggregates every page into id-only models.

use servicecatalog_provider_core::{
    translate_api_error, HandlerError, ProgressEvent, ResourceHandlerRequest, ServiceCatalogApi,
};

use crate::controller::ActionController;
use crate::model::{CallbackContext, ResourceModel, TYPE_NAME};

pub async fn handle<C: ServiceCatalogApi>(
    api: &C,
    _request: &ResourceHandlerRequest<ResourceModel>,
) -> Result<ProgressEvent<ResourceModel, CallbackContext>, HandlerError> {
    let controller = ActionController::new(api);
    let ids = controller
        .list_all_service_action_ids()
        .await
        .map_err(|err| translate_api_error(TYPE_NAME, err))?;
    let models = ids
        .into_iter()
        .map(|id| ResourceModel {
            id: Some(id),
            ..Default::default()
        })
        .collect();
    Ok(ProgressEvent::success_list(models))
}
