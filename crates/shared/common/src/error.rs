//! Boundary error handling.
//!
//! `AppError` is what handlers return. Domain failures convert into it and
//! it renders as `{"error": {"code", "message"}}` with a matching status.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::DomainError;
use serde::Serialize;
use thiserror::Error;

/// Application error types mapped to HTTP responses.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    // Resource errors
    #[error("{0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    // Validation
    #[error("{message}")]
    Validation { code: &'static str, message: String },

    #[error("Invalid input: {0}")]
    BadRequest(String),

    // Storage
    #[error("Repository error")]
    Repository(String),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body for HTTP
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Validation { code, .. } => *code,
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Repository(_) => "REPOSITORY_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Validation { .. } | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Repository(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            // Show full message for client errors
            AppError::NotFound(msg) => msg.clone(),
            AppError::Validation { message, .. } => message.clone(),
            AppError::BadRequest(msg) => msg.clone(),
            AppError::Conflict(msg) => {
                // Domain messages already read "... already exists"
                if msg.ends_with("already exists") {
                    msg.clone()
                } else {
                    format!("{} already exists", msg)
                }
            }

            // Hide details for storage/internal errors
            AppError::Repository(cause) => {
                tracing::error!("Repository error: {}", cause);
                "A storage error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
        }
    }
}

// =============================================================================
// HTTP Response (Axum)
// =============================================================================

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.user_message(),
            },
        };

        (status, Json(body)).into_response()
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(v) => AppError::Validation {
                code: v.code(),
                message: v.to_string(),
            },
            DomainError::EmailExists { .. } => AppError::Conflict(err.to_string()),
            DomainError::NotFound(_) => AppError::NotFound(err.to_string()),
            DomainError::Repository(cause) => AppError::Repository(cause),
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    /// Request-level validation failure (malformed JSON, `validator` rules)
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation {
            code: "VALIDATION_ERROR",
            message: msg.into(),
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::ValidationError;

    #[test]
    fn test_validation_keeps_field_code() {
        let err = AppError::from(DomainError::from(ValidationError::EmptyName));

        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "INVALID_NAME");
        assert_eq!(err.user_message(), "Name cannot be empty");
    }

    #[test]
    fn test_email_exists_is_conflict() {
        let err = AppError::from(DomainError::email_exists("a@example.com"));

        assert_eq!(err.status(), StatusCode::CONFLICT);
        assert_eq!(err.code(), "CONFLICT");
        assert_eq!(err.user_message(), "Email a@example.com already exists");
    }

    #[test]
    fn test_not_found_mapping() {
        let err = AppError::from(DomainError::not_found_id(42));

        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.code(), "NOT_FOUND");
        assert_eq!(err.user_message(), "User not found (id=42)");
    }

    #[test]
    fn test_repository_details_hidden() {
        let err = AppError::from(DomainError::repository("connection refused"));

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "REPOSITORY_ERROR");
        assert!(!err.user_message().contains("connection refused"));
    }

    #[test]
    fn test_internal_details_hidden() {
        let err = AppError::from(DomainError::internal("Password hash failed: bad params"));

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "INTERNAL_ERROR");
        assert_eq!(err.user_message(), "An internal error occurred");
    }

    #[test]
    fn test_request_validation_code() {
        let err = AppError::validation("Email format is invalid");
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        assert_eq!(AppError::bad_request("Invalid user ID").code(), "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_error_body_shape() {
        let response = AppError::from(DomainError::not_found_id(7)).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(json["error"]["code"], "NOT_FOUND");
        assert_eq!(json["error"]["message"], "User not found (id=7)");
    }
}
