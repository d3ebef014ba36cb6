//! Delete handler: DeleteServiceAction by id, success carries no model.

use servicecatalog_provider_core::{
    translate_api_error, HandlerError, ProgressEvent, ResourceHandlerRequest, ServiceCatalogApi,
};

use crate::controller::ActionController;
use crate::model::{CallbackContext, ResourceModel, TYPE_NAME};

use super::{desired_state, required_id};

pub async fn handle<C: ServiceCatalogApi>(
    api: &C,
    request: &ResourceHandlerRequest<ResourceModel>,
) -> Result<ProgressEvent<ResourceModel, CallbackContext>, HandlerError> {
    let controller = ActionController::new(api);
    let desired = desired_state(request)?;
    let id = required_id(desired)?;
    controller
        .delete_service_action(id)
        .await
        .map_err(|err| translate_api_error(TYPE_NAME, err))?;
    Ok(ProgressEvent::success(None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use servicecatalog_provider_core::test_util::ScriptedServiceCatalog;
    use servicecatalog_provider_core::{ApiError, HandlerErrorCode, OperationStatus};

    fn request(id: &str) -> ResourceHandlerRequest<ResourceModel> {
        ResourceHandlerRequest {
            desired_resource_state: Some(ResourceModel {
                id: Some(id.to_string()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_delete_returns_success_without_model() {
        let api = ScriptedServiceCatalog::new().with_delete(Ok(()));

        let event = handle(&api, &request("act-1234")).await.expect("delete succeeds");

        assert_eq!(event.status, OperationStatus::Success);
        assert!(event.resource_model.is_none());
        assert_eq!(api.calls(), vec!["delete:act-1234"]);
    }

    #[tokio::test]
    async fn test_delete_of_missing_action_is_not_found() {
        let api = ScriptedServiceCatalog::new()
            .with_delete(Err(ApiError::NotFound("act-missing".into())));

        let err = handle(&api, &request("act-missing"))
            .await
            .expect_err("delete fails");
        assert_eq!(err.error_code(), HandlerErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_delete_of_action_in_use_is_internal_failure() {
        let api = ScriptedServiceCatalog::new()
            .with_delete(Err(ApiError::InUse("still associated".into())));

        let err = handle(&api, &request("act-1234"))
            .await
            .expect_err("delete fails");
        assert_eq!(err.error_code(), HandlerErrorCode::InternalFailure);
    }
}
