//! Poll-until-visible stabilization for association Create and Delete.
//!
//! The transition logic is a pure function over (target, observation,
//! remaining budget); the async wrapper owns the single membership query per
//! invocation and the mapping onto progress events.

use servicecatalog_provider_core::{
    translate_api_error, ApiError, HandlerError, ProgressEvent, ServiceCatalogApi,
};

use crate::controller::ActionAssociationController;
use crate::model::{CallbackContext, ResourceModel, TYPE_NAME};

/// Delay the framework should wait before re-invoking, in seconds.
pub const POLL_RETRY_DELAY_SECONDS: u64 = 5;
/// Membership polls allowed before an operation is declared not stabilized.
pub const NUMBER_OF_STATE_POLL_RETRIES: u32 = 40;

/// Desired terminal visibility of the association.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StabilizationTarget {
    /// Create: wait until the association appears in the list.
    Present,
    /// Delete: wait until it no longer does.
    Absent,
}

/// Next step for an in-flight stabilization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StabilizationState {
    Done,
    Pending { retries_remaining: u32 },
    Exhausted,
}

/// Pure transition. A zero budget is exhausted regardless of the
/// observation.
pub fn transition(
    target: StabilizationTarget,
    observed_present: bool,
    retries_remaining: u32,
) -> StabilizationState {
    if retries_remaining == 0 {
        return StabilizationState::Exhausted;
    }
    let achieved = (target == StabilizationTarget::Present) == observed_present;
    if achieved {
        StabilizationState::Done
    } else {
        StabilizationState::Pending {
            retries_remaining: retries_remaining - 1,
        }
    }
}

/// One stabilization invocation: check the budget, poll membership once, and
/// report success, another in-progress round, or not-stabilized.
///
/// A not-found from the membership query is terminal: the product or
/// provisioning artifact itself is gone, so there is nothing to wait for.
pub async fn stabilize<C: ServiceCatalogApi>(
    api: &C,
    target: StabilizationTarget,
    model: &ResourceModel,
    context: &CallbackContext,
) -> Result<ProgressEvent<ResourceModel, CallbackContext>, HandlerError> {
    if context.stabilization_retries_remaining == 0 {
        log::info!("stabilization retries remaining zero");
        return Err(HandlerError::NotStabilized {
            type_name: TYPE_NAME,
            identifier: context.service_action_id.clone(),
        });
    }

    let controller = ActionAssociationController::new(api);
    let observed_present = match controller.is_associated(&context.association_key()).await {
        Ok(observed) => observed,
        Err(ApiError::NotFound(message)) => {
            return Err(HandlerError::NotFound {
                type_name: TYPE_NAME,
                message,
            })
        }
        Err(err) => return Err(translate_api_error(TYPE_NAME, err)),
    };
    log::info!(
        "stabilization retries remaining: {}",
        context.stabilization_retries_remaining
    );

    match transition(target, observed_present, context.stabilization_retries_remaining) {
        StabilizationState::Done => Ok(match target {
            StabilizationTarget::Present => ProgressEvent::success(Some(model.clone())),
            StabilizationTarget::Absent => ProgressEvent::success(None),
        }),
        StabilizationState::Pending { retries_remaining } => Ok(ProgressEvent::in_progress(
            model.clone(),
            CallbackContext {
                stabilization_retries_remaining: retries_remaining,
                ..context.clone()
            },
            POLL_RETRY_DELAY_SECONDS,
        )),
        StabilizationState::Exhausted => Err(HandlerError::NotStabilized {
            type_name: TYPE_NAME,
            identifier: context.service_action_id.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use servicecatalog_provider_core::test_util::ScriptedServiceCatalog;
    use servicecatalog_provider_core::{
        AssociationKey, HandlerErrorCode, OperationStatus, ServiceActionSummary, SummaryPage,
    };

    #[test]
    fn test_transition_zero_budget_is_exhausted_whatever_is_observed() {
        for target in [StabilizationTarget::Present, StabilizationTarget::Absent] {
            for observed in [true, false] {
                assert_eq!(
                    transition(target, observed, 0),
                    StabilizationState::Exhausted
                );
            }
        }
    }

    #[test]
    fn test_transition_done_when_observation_matches_target() {
        assert_eq!(
            transition(StabilizationTarget::Present, true, 3),
            StabilizationState::Done
        );
        assert_eq!(
            transition(StabilizationTarget::Absent, false, 1),
            StabilizationState::Done
        );
    }

    #[test]
    fn test_transition_decrements_while_pending() {
        assert_eq!(
            transition(StabilizationTarget::Present, false, 3),
            StabilizationState::Pending {
                retries_remaining: 2
            }
        );
        assert_eq!(
            transition(StabilizationTarget::Absent, true, 1),
            StabilizationState::Pending {
                retries_remaining: 0
            }
        );
    }

    fn context(retries: u32) -> CallbackContext {
        CallbackContext::new(
            &AssociationKey {
                product_id: "prod-1".into(),
                provisioning_artifact_id: "pa-1".into(),
                service_action_id: "act-1".into(),
            },
            retries,
        )
    }

    fn model() -> ResourceModel {
        ResourceModel {
            id: Some("assoc-1".into()),
            product_id: Some("prod-1".into()),
            provisioning_artifact_id: Some("pa-1".into()),
            service_action_id: Some("act-1".into()),
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
    async fn test_stabilize_fails_without_polling_when_budget_is_spent() {
        let api = ScriptedServiceCatalog::new();
        let err = stabilize(&api, StabilizationTarget::Present, &model(), &context(0))
            .await
            .expect_err("not stabilized");
        assert_eq!(err.error_code(), HandlerErrorCode::NotStabilized);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_stabilize_create_succeeds_once_membership_appears() {
        let api = ScriptedServiceCatalog::new().with_association_page(Ok(page(&["act-1"])));
        let event = stabilize(&api, StabilizationTarget::Present, &model(), &context(5))
            .await
            .expect("stabilized");
        assert_eq!(event.status, OperationStatus::Success);
        assert_eq!(
            event.resource_model.expect("model present").id.as_deref(),
            Some("assoc-1")
        );
    }

    #[tokio::test]
    async fn test_stabilize_create_decrements_while_absent() {
        let api = ScriptedServiceCatalog::new().with_association_page(Ok(page(&["act-9"])));
        let event = stabilize(&api, StabilizationTarget::Present, &model(), &context(5))
            .await
            .expect("in progress");
        assert_eq!(event.status, OperationStatus::InProgress);
        assert_eq!(event.callback_delay_seconds, Some(POLL_RETRY_DELAY_SECONDS));
        let next = event.callback_context.expect("context present");
        assert_eq!(next.stabilization_retries_remaining, 4);
    }

    #[tokio::test]
    async fn test_stabilize_delete_succeeds_without_model_once_absent() {
        let api = ScriptedServiceCatalog::new().with_association_page(Ok(page(&["act-9"])));
        let event = stabilize(&api, StabilizationTarget::Absent, &model(), &context(5))
            .await
            .expect("stabilized");
        assert_eq!(event.status, OperationStatus::Success);
        assert!(event.resource_model.is_none());
    }

    #[tokio::test]
    async fn test_stabilize_not_found_from_membership_is_terminal() {
        let api = ScriptedServiceCatalog::new()
            .with_association_page(Err(ApiError::NotFound("prod-1 gone".into())));
        let err = stabilize(&api, StabilizationTarget::Present, &model(), &context(5))
            .await
            .expect_err("terminal");
        assert_eq!(err.error_code(), HandlerErrorCode::NotFound);
    }
}
