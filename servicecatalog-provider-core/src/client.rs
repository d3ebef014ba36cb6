//! SDK-backed [`ServiceCatalogApi`] implementation and client construction.

use async_trait::async_trait;
use aws_config::{AppName, BehaviorVersion};
use aws_sdk_servicecatalog::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_servicecatalog::types::{ServiceActionDefinitionKey, ServiceActionDefinitionType};
use aws_sdk_servicecatalog::{types, Client};

use crate::api::{
    AssociationKey, CreateServiceActionInput, ServiceActionDetail, ServiceActionSummary,
    ServiceCatalogApi, SummaryPage, UpdateServiceActionInput,
};
use crate::error::ApiError;

/// Appended to the SDK user agent so calls made on behalf of CloudFormation
/// are attributable in service telemetry.
pub const CFN_USER_AGENT_APP_NAME: &str = "cfn-resource-servicecatalog";

/// Build a Service Catalog client from the default credential provider chain,
/// tagged with the resource-provider user-agent suffix.
pub async fn default_client() -> Client {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Ok(app_name) = AppName::new(CFN_USER_AGENT_APP_NAME) {
        loader = loader.app_name(app_name);
    }
    let config = loader.load().await;
    Client::new(&config)
}

/// Production [`ServiceCatalogApi`] backed by the AWS SDK.
pub struct AwsServiceCatalog {
    client: Client,
}

impl AwsServiceCatalog {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ServiceCatalogApi for AwsServiceCatalog {
    async fn create_service_action(
        &self,
        input: CreateServiceActionInput,
    ) -> Result<ServiceActionDetail, ApiError> {
        let mut request = self
            .client
            .create_service_action()
            .name(input.name)
            .definition_type(ServiceActionDefinitionType::from(
                input.definition_type.as_str(),
            ))
            .set_description(input.description)
            .set_idempotency_token(input.idempotency_token);
        for (key, value) in input.definition {
            request = request.definition(ServiceActionDefinitionKey::from(key.as_str()), value);
        }
        let output = request.send().await.map_err(classify)?;
        detail_from_sdk(output.service_action_detail())
    }

    async fn describe_service_action(&self, id: &str) -> Result<ServiceActionDetail, ApiError> {
        let output = self
            .client
            .describe_service_action()
            .id(id)
            .send()
            .await
            .map_err(classify)?;
        detail_from_sdk(output.service_action_detail())
    }

    async fn update_service_action(
        &self,
        input: UpdateServiceActionInput,
    ) -> Result<ServiceActionDetail, ApiError> {
        let mut request = self
            .client
            .update_service_action()
            .id(input.id)
            .set_name(input.name)
            .set_description(input.description);
        for (key, value) in input.definition {
            request = request.definition(ServiceActionDefinitionKey::from(key.as_str()), value);
        }
        let output = request.send().await.map_err(classify)?;
        detail_from_sdk(output.service_action_detail())
    }

    async fn delete_service_action(&self, id: &str) -> Result<(), ApiError> {
        self.client
            .delete_service_action()
            .id(id)
            .send()
            .await
            .map_err(classify)?;
        Ok(())
    }

    async fn list_service_actions(
        &self,
        page_token: Option<&str>,
    ) -> Result<SummaryPage, ApiError> {
        let output = self
            .client
            .list_service_actions()
            .set_page_token(page_token.map(str::to_string))
            .send()
            .await
            .map_err(classify)?;
        Ok(SummaryPage {
            summaries: output
                .service_action_summaries()
                .iter()
                .map(summary_from_sdk)
                .collect(),
            next_page_token: output.next_page_token().map(str::to_string),
        })
    }

    async fn associate_service_action(&self, key: &AssociationKey) -> Result<(), ApiError> {
        self.client
            .associate_service_action_with_provisioning_artifact()
            .product_id(&key.product_id)
            .provisioning_artifact_id(&key.provisioning_artifact_id)
            .service_action_id(&key.service_action_id)
            .send()
            .await
            .map_err(classify)?;
        Ok(())
    }

    async fn disassociate_service_action(&self, key: &AssociationKey) -> Result<(), ApiError> {
        self.client
            .disassociate_service_action_from_provisioning_artifact()
            .product_id(&key.product_id)
            .provisioning_artifact_id(&key.provisioning_artifact_id)
            .service_action_id(&key.service_action_id)
            .send()
            .await
            .map_err(classify)?;
        Ok(())
    }

    async fn list_associated_service_actions(
        &self,
        product_id: &str,
        provisioning_artifact_id: &str,
        page_token: Option<&str>,
    ) -> Result<SummaryPage, ApiError> {
        let output = self
            .client
            .list_service_actions_for_provisioning_artifact()
            .product_id(product_id)
            .provisioning_artifact_id(provisioning_artifact_id)
            .set_page_token(page_token.map(str::to_string))
            .send()
            .await
            .map_err(classify)?;
        Ok(SummaryPage {
            summaries: output
                .service_action_summaries()
                .iter()
                .map(summary_from_sdk)
                .collect(),
            next_page_token: output.next_page_token().map(str::to_string),
        })
    }
}

/// Classify a modeled or transport failure by its error code.
///
/// Matching on the metadata code keeps one classifier across all eight
/// operations instead of one per generated error enum.
fn classify<E, R>(err: SdkError<E, R>) -> ApiError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug,
{
    let message = err
        .message()
        .map(str::to_string)
        .unwrap_or_else(|| DisplayErrorContext(&err).to_string());
    match err.code() {
        Some("ResourceNotFoundException") => ApiError::NotFound(message),
        Some("DuplicateResourceException") => ApiError::Duplicate(message),
        Some("LimitExceededException") => ApiError::LimitExceeded(message),
        Some("InvalidParametersException") => ApiError::InvalidParameters(message),
        Some("ResourceInUseException") => ApiError::InUse(message),
        _ => ApiError::Other(message),
    }
}

fn summary_from_sdk(summary: &types::ServiceActionSummary) -> ServiceActionSummary {
    ServiceActionSummary {
        id: summary.id().unwrap_or_default().to_string(),
        name: summary.name().map(str::to_string),
        description: summary.description().map(str::to_string),
        definition_type: summary
            .definition_type()
            .map(|definition_type| definition_type.as_str().to_string()),
    }
}

fn detail_from_sdk(
    detail: Option<&types::ServiceActionDetail>,
) -> Result<ServiceActionDetail, ApiError> {
    let detail = detail
        .ok_or_else(|| ApiError::Other("service action detail missing from response".to_string()))?;
    let summary = detail
        .service_action_summary()
        .map(summary_from_sdk)
        .unwrap_or_default();
    let definition = detail
        .definition()
        .map(|definition| {
            definition
                .iter()
                .map(|(key, value)| (key.as_str().to_string(), value.clone()))
                .collect()
        })
        .unwrap_or_default();
    Ok(ServiceActionDetail {
        summary,
        definition,
    })
}
