//! Error types and HTTP response conversion
//!
//! Every error that can cross the HTTP boundary goes through one total
//! mapping: [`ApiError::into_response`] produces an [`ErrorModel`] body for
//! every variant, with no fall-through. Variants that carry internal detail
//! (storage failures, I/O, panics) are logged server-side and answered with a
//! generic 500 body so internal text never reaches a client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use utoipa::ToSchema;

use crate::repository::RepositoryError;

/// Result type alias using the crate error
pub type Result<T> = std::result::Result<T, ApiError>;

/// Wire shape of every error response
///
/// `status` is the human-readable status text, `statusCode` the numeric HTTP
/// code, `message` the client-facing explanation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorModel {
    /// Status text (e.g. "Bad Request", "I'm a Teapot")
    pub status: String,

    /// Numeric HTTP status code
    #[serde(rename = "statusCode")]
    pub status_code: u16,

    /// Client-facing message
    pub message: String,
}

impl ErrorModel {
    /// Create an error body from a status code and message
    ///
    /// The status text comes from the code's canonical reason phrase.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: status
                .canonical_reason()
                .unwrap_or("Unknown")
                .to_string(),
            status_code: status.as_u16(),
            message: message.into(),
        }
    }

    /// Create an error body with an explicit status text
    pub fn with_status_text(
        status: StatusCode,
        status_text: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            status: status_text.into(),
            status_code: status.as_u16(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ErrorModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.status, self.status_code, self.message)
    }
}

/// Main error type for the service
#[derive(Debug, Error)]
pub enum ApiError {
    /// The fixture failure: always 418
    #[error("{0}")]
    Teapot(String),

    /// Request validation failed; one message per failed field, in field
    /// declaration order
    #[error("validation failed: {}", .0.join(","))]
    Validation(Vec<String>),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(Box<figment::Error>),

    /// JWT validation or key loading error
    #[error("JWT error: {0}")]
    Jwt(Box<jsonwebtoken::errors::Error>),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Authentication error
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Authorization error
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Resource conflict (409)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Structured repository error with operation context
    #[error("{0}")]
    Repository(#[from] RepositoryError),

    /// Internal server error
    #[error("Internal server error: {0}")]
    Internal(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl ApiError {
    /// The canonical teapot failure
    pub fn teapot() -> Self {
        Self::Teapot("The requested entity body is short and stout.".to_string())
    }
}

/// Message used whenever an error reaches the boundary unclassified
const GENERIC_MESSAGE: &str = "An unexpected error occurred";

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Teapot(msg) => (
                StatusCode::IM_A_TEAPOT,
                // Title-cased status text, matching the widely expected form
                ErrorModel::with_status_text(StatusCode::IM_A_TEAPOT, "I'm a Teapot", msg),
            ),

            ApiError::Validation(messages) => (
                StatusCode::BAD_REQUEST,
                ErrorModel::new(StatusCode::BAD_REQUEST, messages.join(",")),
            ),

            ApiError::Config(e) => {
                tracing::error!("Configuration error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorModel::new(StatusCode::INTERNAL_SERVER_ERROR, GENERIC_MESSAGE),
                )
            }

            ApiError::Jwt(e) => (
                StatusCode::UNAUTHORIZED,
                ErrorModel::new(StatusCode::UNAUTHORIZED, e.to_string()),
            ),

            ApiError::Io(e) => {
                tracing::error!("I/O error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorModel::new(StatusCode::INTERNAL_SERVER_ERROR, GENERIC_MESSAGE),
                )
            }

            ApiError::Unauthorized(msg) => (
                StatusCode::UNAUTHORIZED,
                ErrorModel::new(StatusCode::UNAUTHORIZED, msg),
            ),

            ApiError::Forbidden(msg) => (
                StatusCode::FORBIDDEN,
                ErrorModel::new(StatusCode::FORBIDDEN, msg),
            ),

            ApiError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorModel::new(StatusCode::NOT_FOUND, msg),
            ),

            ApiError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorModel::new(StatusCode::BAD_REQUEST, msg),
            ),

            ApiError::Conflict(msg) => (
                StatusCode::CONFLICT,
                ErrorModel::new(StatusCode::CONFLICT, msg),
            ),

            ApiError::Repository(ref e) => {
                // Storage failures reaching the boundary are never translated
                // into client-facing detail, constraint violations included.
                tracing::error!(
                    operation = %e.operation,
                    kind = %e.kind,
                    entity_type = ?e.entity_type,
                    "Repository error: {}", e.message
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorModel::new(StatusCode::INTERNAL_SERVER_ERROR, GENERIC_MESSAGE),
                )
            }

            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorModel::new(StatusCode::INTERNAL_SERVER_ERROR, GENERIC_MESSAGE),
                )
            }

            ApiError::Other(msg) => {
                tracing::error!("Unexpected error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorModel::new(StatusCode::INTERNAL_SERVER_ERROR, GENERIC_MESSAGE),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

// Manual From implementations for boxed errors
impl From<figment::Error> for ApiError {
    fn from(err: figment::Error) -> Self {
        ApiError::Config(Box::new(err))
    }
}

impl From<jsonwebtoken::errors::Error> for ApiError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        ApiError::Jwt(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_of(response: Response) -> ErrorModel {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        serde_json::from_slice(&bytes).expect("body should be an ErrorModel")
    }

    #[test]
    fn test_error_model_new() {
        let body = ErrorModel::new(StatusCode::NOT_FOUND, "User not found");
        assert_eq!(body.status, "Not Found");
        assert_eq!(body.status_code, 404);
        assert_eq!(body.message, "User not found");
    }

    #[test]
    fn test_error_model_wire_shape() {
        let body = ErrorModel::new(StatusCode::BAD_REQUEST, "oops");
        let json = serde_json::to_value(&body).expect("serializable");
        assert_eq!(json["status"], "Bad Request");
        assert_eq!(json["statusCode"], 400);
        assert_eq!(json["message"], "oops");
    }

    #[tokio::test]
    async fn test_teapot_maps_to_418() {
        let response = ApiError::teapot().into_response();
        assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);

        let body = body_of(response).await;
        assert_eq!(body.status, "I'm a Teapot");
        assert_eq!(body.status_code, 418);
        assert!(!body.message.is_empty());
    }

    #[tokio::test]
    async fn test_validation_joins_messages_in_order() {
        let err = ApiError::Validation(vec![
            "Must provide a valid ID.".to_string(),
            "Display name is required.".to_string(),
        ]);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_of(response).await;
        assert_eq!(
            body.message,
            "Must provide a valid ID.,Display name is required."
        );
    }

    #[tokio::test]
    async fn test_unclassified_is_generic_500() {
        let response = ApiError::Other("pk violation on orders.customer_id".to_string())
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_of(response).await;
        assert_eq!(body.message, "An unexpected error occurred");
        assert!(!body.message.contains("orders"));
    }

    #[tokio::test]
    async fn test_repository_error_does_not_leak() {
        use crate::repository::{RepositoryErrorKind, RepositoryOperation};

        let err = ApiError::Repository(RepositoryError::new(
            RepositoryOperation::Delete,
            RepositoryErrorKind::ConstraintViolation,
            "update or delete on table \"customers\" violates foreign key constraint",
        ));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_of(response).await;
        assert_eq!(body.message, "An unexpected error occurred");
    }

    #[tokio::test]
    async fn test_unauthorized_mapping() {
        let response = ApiError::Unauthorized("Missing bearer token".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = body_of(response).await;
        assert_eq!(body.status, "Unauthorized");
        assert_eq!(body.message, "Missing bearer token");
    }
}
