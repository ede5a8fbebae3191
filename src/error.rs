//! Error types for the employee cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

/// Message reported for every failed delete, whatever the cause.
pub const DELETE_FAILED_MESSAGE: &str = "Failed to delete employee.";

/// Header repeating the error message, for clients that ignore bodies.
pub const ERROR_MESSAGE_HEADER: &str = "x-error-message";

// == Upstream Error Enum ==
/// Failures reported by the upstream record service.
///
/// The cache returns these unchanged; it never retries or falls back.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// Upstream reports that the identifier or name does not exist
    #[error("Employee not found upstream: {0}")]
    NotFound(String),

    /// Upstream answered with a non-success status
    #[error("Upstream returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// Network, timeout or decoding failure
    #[error("Upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl UpstreamError {
    /// Returns true when upstream rejected the call for rate limiting.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, UpstreamError::Status { status, .. } if *status == StatusCode::TOO_MANY_REQUESTS.as_u16())
    }
}

// == Delete Failure Tag ==
/// Why a delete sequence failed.
///
/// Callers only ever see [`DELETE_FAILED_MESSAGE`]; the tag is kept for logs and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteFailure {
    /// No record with the requested identifier
    NotFound,
    /// The record has no usable name to delete by
    MissingName,
    /// Upstream did not confirm the deletion
    Refused,
    /// Upstream call failed
    Upstream(String),
}

// == Service Error Enum ==
/// Unified error type for the employee service.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Employee not found
    #[error("Employee not found: {0}")]
    NotFound(String),

    /// Path identifier is not a UUID
    #[error("Invalid UUID format: {0}")]
    InvalidId(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Upstream did not create the employee
    #[error("{0}")]
    CreationFailed(String),

    /// Delete sequence failed
    #[error("Failed to delete employee.")]
    DeleteFailed(DeleteFailure),

    /// A record without identifier was offered to the cache
    #[error("Employee record has no identifier")]
    MissingIdentifier,

    /// Any other upstream failure
    #[error(transparent)]
    Upstream(UpstreamError),
}

impl From<UpstreamError> for ServiceError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::NotFound(id) => ServiceError::NotFound(id),
            other => ServiceError::Upstream(other),
        }
    }
}

impl ServiceError {
    /// HTTP status this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::InvalidId(_)
            | ServiceError::InvalidRequest(_)
            | ServiceError::CreationFailed(_)
            | ServiceError::DeleteFailed(_) => StatusCode::BAD_REQUEST,
            ServiceError::MissingIdentifier => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::Upstream(err) if err.is_rate_limited() => StatusCode::TOO_MANY_REQUESTS,
            ServiceError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        let mut response = (status, Json(ErrorResponse::new(message.clone()))).into_response();
        if let Ok(value) = HeaderValue::from_str(&message) {
            response
                .headers_mut()
                .insert(HeaderName::from_static(ERROR_MESSAGE_HEADER), value);
        }
        response
    }
}

// == Result Type Alias ==
/// Convenience Result type for the employee service.
pub type Result<T> = std::result::Result<T, ServiceError>;
