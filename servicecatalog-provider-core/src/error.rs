//! Error taxonomies on both sides of the providers, and the single
//! translation table between them.

use thiserror::Error;

use crate::progress::{HandlerErrorCode, ProgressEvent};

/// Classified failure from the Service Catalog API.
///
/// Produced at the SDK boundary so that controllers and handlers never see
/// raw transport or modeled-service errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("resource not found: {0}")]
    NotFound(String),
    #[error("duplicate resource: {0}")]
    Duplicate(String),
    #[error("limit exceeded: {0}")]
    LimitExceeded(String),
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
    #[error("resource in use: {0}")]
    InUse(String),
    #[error("service catalog error: {0}")]
    Other(String),
}

impl ApiError {
    /// The upstream message, without the classification prefix.
    pub fn message(&self) -> &str {
        match self {
            ApiError::NotFound(m)
            | ApiError::Duplicate(m)
            | ApiError::LimitExceeded(m)
            | ApiError::InvalidParameters(m)
            | ApiError::InUse(m)
            | ApiError::Other(m) => m,
        }
    }
}

/// Failure surfaced to CloudFormation, typed by the handler error codes the
/// framework understands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    #[error("{type_name} not found: {message}")]
    NotFound {
        type_name: &'static str,
        message: String,
    },
    #[error("{type_name} already exists: {message}")]
    AlreadyExists {
        type_name: &'static str,
        message: String,
    },
    #[error("service limit exceeded for {type_name}: {message}")]
    ServiceLimitExceeded {
        type_name: &'static str,
        message: String,
    },
    #[error("invalid request for {type_name}: {message}")]
    InvalidRequest {
        type_name: &'static str,
        message: String,
    },
    #[error("{type_name} {identifier} did not stabilize")]
    NotStabilized {
        type_name: &'static str,
        identifier: String,
    },
    #[error("internal failure: {message}")]
    InternalFailure { message: String },
}

impl HandlerError {
    pub fn invalid_request(type_name: &'static str, message: impl Into<String>) -> Self {
        HandlerError::InvalidRequest {
            type_name,
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> HandlerErrorCode {
        match self {
            HandlerError::NotFound { .. } => HandlerErrorCode::NotFound,
            HandlerError::AlreadyExists { .. } => HandlerErrorCode::AlreadyExists,
            HandlerError::ServiceLimitExceeded { .. } => HandlerErrorCode::ServiceLimitExceeded,
            HandlerError::InvalidRequest { .. } => HandlerErrorCode::InvalidRequest,
            HandlerError::NotStabilized { .. } => HandlerErrorCode::NotStabilized,
            HandlerError::InternalFailure { .. } => HandlerErrorCode::InternalFailure,
        }
    }

    /// Render this error as the failed progress event the framework expects.
    pub fn into_progress_event<M, C>(self) -> ProgressEvent<M, C> {
        let code = self.error_code();
        ProgressEvent::failed(code, self.to_string())
    }
}

/// Total mapping from the upstream taxonomy to the CloudFormation one.
///
/// Every handler routes through here; in-use and unclassified failures both
/// land on `InternalFailure`.
pub fn translate_api_error(type_name: &'static str, err: ApiError) -> HandlerError {
    match err {
        ApiError::NotFound(message) => HandlerError::NotFound { type_name, message },
        ApiError::Duplicate(message) => HandlerError::AlreadyExists { type_name, message },
        ApiError::LimitExceeded(message) => HandlerError::ServiceLimitExceeded { type_name, message },
        ApiError::InvalidParameters(message) => HandlerError::InvalidRequest { type_name, message },
        ApiError::InUse(message) | ApiError::Other(message) => {
            HandlerError::InternalFailure { message }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TYPE_NAME: &str = "AWS::ServiceCatalog::ServiceAction";

    #[test]
    fn test_translate_not_found() {
        let err = translate_api_error(TYPE_NAME, ApiError::NotFound("no such action".into()));
        assert_eq!(err.error_code(), HandlerErrorCode::NotFound);
        assert!(err.to_string().contains("no such action"));
    }

    #[test]
    fn test_translate_duplicate_to_already_exists() {
        let err = translate_api_error(TYPE_NAME, ApiError::Duplicate("name taken".into()));
        assert_eq!(err.error_code(), HandlerErrorCode::AlreadyExists);
    }

    #[test]
    fn test_translate_limit_exceeded() {
        let err = translate_api_error(TYPE_NAME, ApiError::LimitExceeded("too many".into()));
        assert_eq!(err.error_code(), HandlerErrorCode::ServiceLimitExceeded);
    }

    #[test]
    fn test_translate_invalid_parameters() {
        let err = translate_api_error(TYPE_NAME, ApiError::InvalidParameters("bad key".into()));
        assert_eq!(err.error_code(), HandlerErrorCode::InvalidRequest);
    }

    #[test]
    fn test_translate_catch_all_to_internal_failure() {
        for err in [
            ApiError::InUse("still associated".into()),
            ApiError::Other("throttled".into()),
        ] {
            let translated = translate_api_error(TYPE_NAME, err);
            assert_eq!(translated.error_code(), HandlerErrorCode::InternalFailure);
        }
    }

    #[test]
    fn test_into_progress_event_carries_code_and_message() {
        let err = HandlerError::NotStabilized {
            type_name: TYPE_NAME,
            identifier: "act-123".into(),
        };
        let event = err.into_progress_event::<(), ()>();
        assert_eq!(event.error_code, Some(HandlerErrorCode::NotStabilized));
        assert!(event.message.unwrap_or_default().contains("act-123"));
    }
}
