//! Application error type and envelope rendering

use super::codes::ErrorCode;
use http::StatusCode;
use serde_json::{Value, json};
use thiserror::Error;

/// Application error with a structured error code
///
/// The primary error type for the backend:
/// - Standardized codes via [`ErrorCode`]
/// - A client-facing message key (defaults to the code's key)
/// - Optional structured field errors, mirroring serializer-style output
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Client-facing message key
    pub message: String,
    /// Optional field-level errors, e.g. `{"email": ["email_exists"]}`
    pub errors: Option<Value>,
}

impl AppError {
    /// Create a new error with the default message key for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            errors: None,
        }
    }

    /// Create a new error with a custom message key
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            errors: None,
        }
    }

    /// Attach a field-level error, DRF serializer style
    pub fn with_field(mut self, field: impl Into<String>, detail: impl Into<String>) -> Self {
        let entry = json!([detail.into()]);
        match &mut self.errors {
            Some(Value::Object(map)) => {
                map.insert(field.into(), entry);
            }
            _ => {
                self.errors = Some(json!({ field.into(): entry }));
            }
        }
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    /// Validation error (422) with a custom message key
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Serializer-style validation failure: envelope message `validation_error`,
    /// the specific key under `errors` for the offending field
    pub fn field_validation(
        code: ErrorCode,
        field: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self::with_message(code, "validation_error").with_field(field, detail)
    }

    /// Not found error (404) with a custom message key
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::NotFound, msg)
    }

    /// Missing/invalid bearer authentication (401)
    pub fn unauthorized() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }

    /// Invalid, revoked, or wrong-kind token (400)
    pub fn token_invalid() -> Self {
        Self::new(ErrorCode::TokenInvalid)
    }

    /// Bad login credentials (401)
    pub fn invalid_credentials() -> Self {
        Self::new(ErrorCode::InvalidCredentials)
    }

    /// Role mismatch (403)
    pub fn forbidden(code: ErrorCode) -> Self {
        Self::new(code)
    }

    /// Unexpected internal error; the detail is logged, never sent
    pub fn internal() -> Self {
        Self::new(ErrorCode::InternalError)
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();
        let body = json!({
            "success": false,
            "message": self.message,
            "errors": self.errors,
        });

        (status, Json(body)).into_response()
    }
}
