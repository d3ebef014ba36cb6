//! Shared pieces of the Service Catalog CloudFormation resource providers:
//! - the invocation-contract types exchanged with the CloudFormation framework
//! - the `ServiceCatalogApi` capability the controllers call
//! - the SDK-backed client and its error classification
//! - the upstream-to-CloudFormation error translation used by every handler

mod api;
mod client;
mod error;
mod progress;

#[cfg(any(test, feature = "test-util"))]
pub mod test_util;

pub use api::{
    AssociationKey, CreateServiceActionInput, ServiceCatalogApi, ServiceActionDetail,
    ServiceActionSummary, SummaryPage, UpdateServiceActionInput,
};
pub use client::{default_client, AwsServiceCatalog, CFN_USER_AGENT_APP_NAME};
pub use error::{translate_api_error, ApiError, HandlerError};
pub use progress::{
    Action, HandlerErrorCode, OperationStatus, ProgressEvent, ResourceHandlerRequest,
};
