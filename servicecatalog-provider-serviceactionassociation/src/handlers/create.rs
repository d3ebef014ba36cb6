//! Create handler.
//!
//! First invocation issues the associate call and hands back an in-progress
//! event with the full retry budget; re-invocations poll membership until
//! the association becomes visible.

use servicecatalog_provider_core::{
    translate_api_error, HandlerError, ProgressEvent, ResourceHandlerRequest, ServiceCatalogApi,
};

use crate::controller::ActionAssociationController;
use crate::model::{generate_association_identifier, CallbackContext, ResourceModel, TYPE_NAME};
use crate::stabilizer::{
    stabilize, StabilizationTarget, NUMBER_OF_STATE_POLL_RETRIES, POLL_RETRY_DELAY_SECONDS,
};

use super::{desired_state, required_key};

pub async fn handle<C: ServiceCatalogApi>(
    api: &C,
    request: &ResourceHandlerRequest<ResourceModel>,
    callback_context: Option<&CallbackContext>,
) -> Result<ProgressEvent<ResourceModel, CallbackContext>, HandlerError> {
    let desired = desired_with_primary_identifier(request)?;

    if let Some(context) = callback_context {
        return stabilize(api, StabilizationTarget::Present, &desired, context).await;
    }

    let key = required_key(&desired)?;
    let controller = ActionAssociationController::new(api);
    controller
        .associate(&key)
        .await
        .map_err(|err| translate_api_error(TYPE_NAME, err))?;

    let context = CallbackContext::new(&key, NUMBER_OF_STATE_POLL_RETRIES);
    Ok(ProgressEvent::in_progress(
        desired,
        context,
        POLL_RETRY_DELAY_SECONDS,
    ))
}

/// Desired state with the synthetic `Id` filled in when the template did not
/// supply one.
fn desired_with_primary_identifier(
    request: &ResourceHandlerRequest<ResourceModel>,
) -> Result<ResourceModel, HandlerError> {
    let mut desired = desired_state(request)?.clone();
    if desired.id.as_deref().unwrap_or_default().is_empty() {
        desired.id = Some(generate_association_identifier(
            request.logical_resource_identifier.as_deref(),
            request.client_request_token.as_deref(),
        ));
    }
    Ok(desired)
}

#[cfg(test)]
mod tests {
    use super::*;
    use servicecatalog_provider_core::test_util::ScriptedServiceCatalog;
    use servicecatalog_provider_core::{
        ApiError, HandlerErrorCode, OperationStatus, ServiceActionSummary, SummaryPage,
    };

    fn request() -> ResourceHandlerRequest<ResourceModel> {
        ResourceHandlerRequest {
            desired_resource_state: Some(ResourceModel {
                product_id: Some("prod-1".into()),
                provisioning_artifact_id: Some("pa-1".into()),
                service_action_id: Some("act-1".into()),
                ..Default::default()
            }),
            logical_resource_identifier: Some("MyAssociation".into()),
            client_request_token: Some("token-1".into()),
            ..Default::default()
        }
    }

    fn page(ids: &[&str]) -> SummaryPage {
        SummaryPage {
            summaries: ids
                .iter()
                .map(|id| ServiceActionSummary {
                    id: (*id).to_string(),
                    ..Default::default()
                })
                .collect(),
            next_page_token: None,
        }
    }

    #[tokio::test]
    async fn test_first_invocation_returns_in_progress_not_success() {
        let api = ScriptedServiceCatalog::new().with_associate(Ok(()));

        let event = handle(&api, &request(), None).await.expect("associate issued");

        assert_eq!(event.status, OperationStatus::InProgress);
        assert_eq!(event.callback_delay_seconds, Some(POLL_RETRY_DELAY_SECONDS));
        let context = event.callback_context.expect("context populated");
        assert_eq!(
            context.stabilization_retries_remaining,
            NUMBER_OF_STATE_POLL_RETRIES
        );
        assert_eq!(context.service_action_id, "act-1");
        let model = event.resource_model.expect("model present");
        assert!(model.id.as_deref().unwrap_or_default().starts_with("MyAssociation-"));
        assert_eq!(api.calls(), vec!["associate:prod-1/pa-1/act-1"]);
    }

    #[tokio::test]
    async fn test_first_invocation_translates_duplicate() {
        let api = ScriptedServiceCatalog::new()
            .with_associate(Err(ApiError::Duplicate("already associated".into())));

        let err = handle(&api, &request(), None).await.expect_err("create fails");
        assert_eq!(err.error_code(), HandlerErrorCode::AlreadyExists);
    }

    #[tokio::test]
    async fn test_stabilization_sequence_absent_then_present() {
        let context = CallbackContext::new(
            &desired_with_primary_identifier(&request())
                .expect("valid desired state")
                .association_key()
                .expect("complete key"),
            NUMBER_OF_STATE_POLL_RETRIES,
        );

        // First poll: not visible yet.
        let api = ScriptedServiceCatalog::new().with_association_page(Ok(page(&["act-9"])));
        let first = handle(&api, &request(), Some(&context))
            .await
            .expect("first poll");
        assert_eq!(first.status, OperationStatus::InProgress);
        let next_context = first.callback_context.expect("context present");
        assert_eq!(
            next_context.stabilization_retries_remaining,
            NUMBER_OF_STATE_POLL_RETRIES - 1
        );

        // Second poll: visible, terminal success.
        let api = ScriptedServiceCatalog::new().with_association_page(Ok(page(&["act-1"])));
        let second = handle(&api, &request(), Some(&next_context))
            .await
            .expect("second poll");
        assert_eq!(second.status, OperationStatus::Success);
        assert_eq!(
            second
                .resource_model
                .expect("model present")
                .service_action_id
                .as_deref(),
            Some("act-1")
        );
    }

    #[tokio::test]
    async fn test_exhausted_budget_fails_not_stabilized() {
        let context = CallbackContext::new(
            &request()
                .desired_resource_state
                .expect("desired present")
                .association_key()
                .expect("complete key"),
            0,
        );

        let api = ScriptedServiceCatalog::new();
        let err = handle(&api, &request(), Some(&context))
            .await
            .expect_err("not stabilized");
        assert_eq!(err.error_code(), HandlerErrorCode::NotStabilized);
        assert!(api.calls().is_empty());
    }
}
