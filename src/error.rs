// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use validator::ValidationErrors;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("No token provided")]
    Unauthorized,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Failed to authenticate")]
    AuthenticationFailed,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Request body too large: {0}")]
    PayloadTooLarge(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        fields: Vec<FieldError>,
    },

    #[error("Identity provider error: {0}")]
    IdentityProvider(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// A single rejected field in a validation failure.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl AppError {
    /// Build a validation error from `validator` output.
    pub fn validation(message: impl Into<String>, errors: &ValidationErrors) -> Self {
        let mut fields: Vec<FieldError> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, issues)| {
                issues.iter().map(move |issue| FieldError {
                    field: field.to_string(),
                    message: issue
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| issue.code.to_string()),
                })
            })
            .collect();
        fields.sort_by(|a, b| a.field.cmp(&b.field));

        AppError::Validation {
            message: message.into(),
            fields,
        }
    }

    /// HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized | AppError::AuthenticationFailed => StatusCode::UNAUTHORIZED,
            AppError::InvalidToken => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::IdentityProvider(_) => StatusCode::BAD_GATEWAY,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        // Body read failures keep their own status; everything else is the
        // client's payload and maps to 400.
        match rejection.status() {
            StatusCode::PAYLOAD_TOO_LARGE => AppError::PayloadTooLarge(rejection.body_text()),
            _ => AppError::BadRequest(rejection.body_text()),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fields: Vec<FieldError>,
}

const GENERIC_SERVER_ERROR: &str = "Internal server error";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error, message, fields) = match self {
            AppError::Unauthorized => ("unauthorized", "No token provided".to_string(), vec![]),
            AppError::InvalidToken => ("invalid_token", "Invalid token".to_string(), vec![]),
            AppError::AuthenticationFailed => (
                "authentication_failed",
                "Failed to authenticate".to_string(),
                vec![],
            ),
            AppError::NotFound(msg) => ("not_found", msg, vec![]),
            AppError::BadRequest(msg) => ("bad_request", msg, vec![]),
            AppError::PayloadTooLarge(msg) => ("payload_too_large", msg, vec![]),
            AppError::MethodNotAllowed => (
                "method_not_allowed",
                "Method not allowed".to_string(),
                vec![],
            ),
            AppError::Validation { message, fields } => ("validation_failed", message, fields),
            AppError::IdentityProvider(msg) => {
                tracing::warn!(error = %msg, "Identity provider error");
                (
                    "identity_provider_error",
                    "Identity provider request failed".to_string(),
                    vec![],
                )
            }
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                ("database_error", GENERIC_SERVER_ERROR.to_string(), vec![])
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                ("internal_error", GENERIC_SERVER_ERROR.to_string(), vec![])
            }
        };

        let body = ErrorResponse {
            error,
            message,
            fields,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use validator::ValidationError;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::InvalidToken.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            AppError::NotFound("x".to_string()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::BadRequest("x".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::PayloadTooLarge("x".to_string()).status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            AppError::MethodNotAllowed.status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            AppError::Database("down".to_string()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_collects_field_messages() {
        let mut errors = ValidationErrors::new();
        errors.add(
            "url",
            ValidationError::new("url").with_message("url must be an absolute URL".into()),
        );
        errors.add("title", ValidationError::new("required"));

        let err = AppError::validation("Project requires title", &errors);
        let AppError::Validation { message, fields } = err else {
            panic!("expected validation error");
        };

        assert_eq!(message, "Project requires title");
        assert_eq!(
            fields,
            vec![
                FieldError {
                    field: "title".to_string(),
                    message: "required".to_string(),
                },
                FieldError {
                    field: "url".to_string(),
                    message: "url must be an absolute URL".to_string(),
                },
            ]
        );
    }
}
