//! CloudFormation resource provider for `AWS::ServiceCatalog::ServiceAction`.
//!
//! Create/Read/Update/Delete are one-call translations to the Service
//! Catalog API; List exhausts pagination and returns id-only models.

mod controller;
pub mod handlers;
mod model;

pub use controller::ActionController;
pub use handlers::handle_request;
pub use model::{CallbackContext, DefinitionParameter, ResourceModel, TYPE_NAME};
