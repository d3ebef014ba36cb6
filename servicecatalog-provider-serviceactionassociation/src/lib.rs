//! CloudFormation resource provider for
//! `AWS::ServiceCatalog::ServiceActionAssociation`.
//!
//! Associations are eventually consistent upstream, so Create and Delete
//! return in-progress events and poll membership across re-invocations until
//! the association becomes (in)visible or the retry budget runs out.

mod controller;
pub mod handlers;
mod model;
pub mod stabilizer;

pub use controller::ActionAssociationController;
pub use handlers::handle_request;
pub use model::{CallbackContext, ResourceModel, UpdateAssociationStatus, TYPE_NAME};
