//! # REST API Errors
//!
//! Every failure a handler can produce, and the status code it maps to.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::store::StoreError;
use crate::upstream::UpstreamError;
use crate::validation::Rejection;

use super::response::Envelope;

/// Result type for REST operations
pub type RestResult<T> = Result<T, ApiError>;

/// Message sent to clients for any 500; details only go to the log
pub const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

/// REST API errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Malformed, missing or wrongly typed body or path parameter
    #[error("{0}")]
    InvalidInput(String),

    /// Unknown id or unknown route
    #[error("{0}")]
    NotFound(String),

    /// The external dependency failed; passed through without retry
    #[error("{0}")]
    UpstreamFailure(String),

    /// Unexpected failure while storing or encoding
    #[error("{0}")]
    Unhandled(String),
}

impl ApiError {
    pub fn route_not_found() -> Self {
        ApiError::NotFound("route not found".to_string())
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::UpstreamFailure(_) => StatusCode::BAD_GATEWAY,
            ApiError::Unhandled(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to the client
    pub fn public_message(&self) -> &str {
        match self {
            ApiError::Unhandled(_) => INTERNAL_ERROR_MESSAGE,
            ApiError::InvalidInput(m) | ApiError::NotFound(m) | ApiError::UpstreamFailure(m) => m,
        }
    }
}

impl From<Rejection> for ApiError {
    fn from(rejection: Rejection) -> Self {
        ApiError::InvalidInput(rejection.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            StoreError::IdSpaceExhausted(_) | StoreError::Poisoned(_) => {
                ApiError::Unhandled(err.to_string())
            }
        }
    }
}

impl From<UpstreamError> for ApiError {
    fn from(err: UpstreamError) -> Self {
        ApiError::UpstreamFailure(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Unhandled(format!("serialization failed: {}", err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        Envelope::failure(self.status_code(), self.public_message()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ResourceId;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::InvalidInput("x".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::route_not_found().status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::UpstreamFailure("x".to_string()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError::Unhandled("x".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_unhandled_hides_details() {
        let err = ApiError::from(StoreError::Poisoned("task"));
        assert_eq!(err.public_message(), INTERNAL_ERROR_MESSAGE);
        assert_eq!(err.to_string(), "task lock poisoned");
    }

    #[test]
    fn test_store_not_found_maps_to_404() {
        let err = ApiError::from(StoreError::NotFound {
            collection: "task",
            id: ResourceId::from_raw(9).unwrap(),
        });
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.public_message(), "task 9 not found");
    }

    #[test]
    fn test_rejection_maps_to_400() {
        let err = ApiError::from(Rejection::MissingField("title"));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.public_message(), "missing required field `title`");
    }
}
