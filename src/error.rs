//! Error types for the media service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Service Error Enum ==
/// Unified error type for the media service.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Graph API answered with a non-success status or an unreadable body
    #[error("Graph API error: {0}")]
    Remote(String),

    /// Transport-level failure talking to the Graph API (includes timeouts)
    #[error("Graph API request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// No credential stored in a backend
    #[error("Credential not found: {0}")]
    NotFound(String),

    /// Reading or writing a credential backend failed
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Every bootstrap tier was exhausted
    #[error("Bootstrap failed: {0}")]
    Bootstrap(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ServiceError {
    /// Returns true for failures that a later retry may resolve.
    pub fn is_transient(&self) -> bool {
        matches!(self, ServiceError::Remote(_) | ServiceError::Http(_))
    }
}

// == Conversions ==
impl From<std::io::Error> for ServiceError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => ServiceError::NotFound(err.to_string()),
            _ => ServiceError::Persistence(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::Persistence(format!("malformed credential: {}", err))
    }
}

impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ServiceError::NotFound("no credential row".to_string()),
            other => ServiceError::Persistence(other.to_string()),
        }
    }
}

impl From<redis::RedisError> for ServiceError {
    fn from(err: redis::RedisError) -> Self {
        ServiceError::Persistence(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServiceError::Remote(_) | ServiceError::Http(_) => StatusCode::BAD_GATEWAY,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::Persistence(_) | ServiceError::Bootstrap(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the media service.
pub type Result<T> = std::result::Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_not_found_maps_to_not_found() {
        let err: ServiceError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[test]
    fn test_io_other_maps_to_persistence() {
        let err: ServiceError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert!(matches!(err, ServiceError::Persistence(_)));
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err: ServiceError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[test]
    fn test_transient_classification() {
        assert!(ServiceError::Remote("status 500".into()).is_transient());
        assert!(!ServiceError::NotFound("x".into()).is_transient());
        assert!(!ServiceError::Bootstrap("x".into()).is_transient());
    }

    #[test]
    fn test_status_codes() {
        let resp = ServiceError::InvalidRequest("bad".into()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = ServiceError::Remote("status 500".into()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    }
}
