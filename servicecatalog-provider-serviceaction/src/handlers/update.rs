//! Update handler: UpdateServiceAction by id, returning the updated detail.

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
        .update_service_action(id, desired)
        .await
        .map_err(|err| translate_api_error(TYPE_NAME, err))?;
    Ok(ProgressEvent::success(Some(model_from_detail(&detail))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use servicecatalog_provider_core::test_util::ScriptedServiceCatalog;
    use servicecatalog_provider_core::{
        ApiError, HandlerErrorCode, OperationStatus, ServiceActionDetail, ServiceActionSummary,
    };

    fn request() -> ResourceHandlerRequest<ResourceModel> {
        ResourceHandlerRequest {
            desired_resource_state: Some(ResourceModel {
                id: Some("act-1234".into()),
                name: Some("RestartServerV2".into()),
                description: Some("updated description".into()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_update_keeps_id_and_reflects_new_values() {
        let api = ScriptedServiceCatalog::new().with_update(Ok(ServiceActionDetail {
            summary: ServiceActionSummary {
                id: "act-1234".into(),
                name: Some("RestartServerV2".into()),
                description: Some("updated description".into()),
                definition_type: Some("SSM_AUTOMATION".into()),
            },
            definition: Default::default(),
        }));

        let event = handle(&api, &request()).await.expect("update succeeds");

        assert_eq!(event.status, OperationStatus::Success);
        let model = event.resource_model.expect("model present");
        assert_eq!(model.id.as_deref(), Some("act-1234"));
        assert_eq!(model.name.as_deref(), Some("RestartServerV2"));
        assert_eq!(model.description.as_deref(), Some("updated description"));
        assert_eq!(api.calls(), vec!["update:act-1234"]);
    }

    #[tokio::test]
    async fn test_update_translates_invalid_parameters() {
        let api = ScriptedServiceCatalog::new()
            .with_update(Err(ApiError::InvalidParameters("bad definition".into())));

        let err = handle(&api, &request()).await.expect_err("update fails");
        assert_eq!(err.error_code(), HandlerErrorCode::InvalidRequest);
    }
}
