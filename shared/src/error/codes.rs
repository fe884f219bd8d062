//! Unified error codes for the Mesa backend
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Account errors
//! - 4xxx: Guest errors
//! - 5xxx: Table errors
//! - 9xxx: System errors

use http::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Codes are represented as u16 values for efficient serialization and
/// cross-language compatibility with API clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 1xxx: Auth ====================
    /// Request lacks valid authentication
    NotAuthenticated = 1001,
    /// Invalid email or password
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is malformed, revoked, or of the wrong kind
    TokenInvalid = 1004,
    /// Refresh token missing from the request body
    TokenRequired = 1005,
    /// Account has been disabled
    AccountDisabled = 1006,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Admin role required
    AdminRequired = 2003,
    /// Employee role required
    EmployeeRequired = 2004,
    /// Admin or employee role required
    AdminOrEmployeeRequired = 2005,

    // ==================== 3xxx: Account ====================
    /// Email already registered
    EmailExists = 3001,
    /// Employee not found
    EmployeeNotFound = 3002,
    /// Password does not meet the registration policy
    PasswordInvalid = 3003,
    /// Old password does not match
    PasswordIncorrect = 3004,
    /// New password and confirmation differ
    ConfirmPasswordMismatch = 3005,
    /// Attempt to update an immutable field via this endpoint
    RestrictedField = 3006,

    // ==================== 4xxx: Guest ====================
    /// Guest not found
    GuestNotFound = 4001,

    // ==================== 5xxx: Table ====================
    /// Table not found
    TableNotFound = 5001,
    /// Table number already exists
    TableExists = 5002,
    /// Table is not available for guests
    TableNotAvailable = 5003,
    /// Supplied table access token does not match
    InvalidTableToken = 5004,
    /// Capacity outside the configured bounds
    CapacityInvalid = 5005,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Client-facing message key for this error code
    ///
    /// These are the snake_case keys the frontend translates; they double as
    /// stable identifiers in tests.
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "validation_error",
            ErrorCode::NotFound => "not_found",
            ErrorCode::InvalidRequest => "bad_request",

            // Auth
            ErrorCode::NotAuthenticated => "unauthorized",
            ErrorCode::InvalidCredentials => "invalid_credentials",
            ErrorCode::TokenExpired => "token_expired",
            ErrorCode::TokenInvalid => "token_invalid",
            ErrorCode::TokenRequired => "token_required",
            ErrorCode::AccountDisabled => "account_disabled",

            // Permission
            ErrorCode::PermissionDenied => "permission_denied",
            ErrorCode::AdminRequired => "admin_required",
            ErrorCode::EmployeeRequired => "employee_required",
            ErrorCode::AdminOrEmployeeRequired => "admin_or_employee_required",

            // Account
            ErrorCode::EmailExists => "email_exists",
            ErrorCode::EmployeeNotFound => "employee_not_found",
            ErrorCode::PasswordInvalid => "password_invalid",
            ErrorCode::PasswordIncorrect => "password_incorrect",
            ErrorCode::ConfirmPasswordMismatch => "confirm_password_not_match",
            ErrorCode::RestrictedField => "update_restricted_fields",

            // Guest
            ErrorCode::GuestNotFound => "guest_not_found",

            // Table
            ErrorCode::TableNotFound => "table_not_found",
            ErrorCode::TableExists => "table_already_exists",
            ErrorCode::TableNotAvailable => "table_not_available",
            ErrorCode::InvalidTableToken => "invalid_table_token",
            ErrorCode::CapacityInvalid => "capacity_invalid",

            // System
            ErrorCode::InternalError => "internal_error",
            ErrorCode::DatabaseError => "database_error",
        }
    }

    /// HTTP status for this error code
    ///
    /// Validation problems map to 422, token problems in body flows to 400,
    /// header-auth problems to 401, role mismatches to 403. Internal errors
    /// deliberately map to 400 rather than 500, matching the behavior API
    /// clients already depend on.
    pub const fn http_status(&self) -> StatusCode {
        match self {
            ErrorCode::ValidationFailed
            | ErrorCode::EmailExists
            | ErrorCode::PasswordInvalid
            | ErrorCode::PasswordIncorrect
            | ErrorCode::ConfirmPasswordMismatch
            | ErrorCode::TableExists
            | ErrorCode::TableNotAvailable
            | ErrorCode::InvalidTableToken
            | ErrorCode::CapacityInvalid => StatusCode::UNPROCESSABLE_ENTITY,

            ErrorCode::NotFound
            | ErrorCode::EmployeeNotFound
            | ErrorCode::GuestNotFound
            | ErrorCode::TableNotFound => StatusCode::NOT_FOUND,

            ErrorCode::NotAuthenticated
            | ErrorCode::InvalidCredentials
            | ErrorCode::TokenExpired => StatusCode::UNAUTHORIZED,

            ErrorCode::AccountDisabled
            | ErrorCode::PermissionDenied
            | ErrorCode::AdminRequired
            | ErrorCode::EmployeeRequired
            | ErrorCode::AdminOrEmployeeRequired => StatusCode::FORBIDDEN,

            ErrorCode::InvalidRequest
            | ErrorCode::TokenInvalid
            | ErrorCode::TokenRequired
            | ErrorCode::RestrictedField
            | ErrorCode::InternalError
            | ErrorCode::DatabaseError => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            5 => Ok(ErrorCode::InvalidRequest),

            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1005 => Ok(ErrorCode::TokenRequired),
            1006 => Ok(ErrorCode::AccountDisabled),

            2001 => Ok(ErrorCode::PermissionDenied),
            2003 => Ok(ErrorCode::AdminRequired),
            2004 => Ok(ErrorCode::EmployeeRequired),
            2005 => Ok(ErrorCode::AdminOrEmployeeRequired),

            3001 => Ok(ErrorCode::EmailExists),
            3002 => Ok(ErrorCode::EmployeeNotFound),
            3003 => Ok(ErrorCode::PasswordInvalid),
            3004 => Ok(ErrorCode::PasswordIncorrect),
            3005 => Ok(ErrorCode::ConfirmPasswordMismatch),
            3006 => Ok(ErrorCode::RestrictedField),

            4001 => Ok(ErrorCode::GuestNotFound),

            5001 => Ok(ErrorCode::TableNotFound),
            5002 => Ok(ErrorCode::TableExists),
            5003 => Ok(ErrorCode::TableNotAvailable),
            5004 => Ok(ErrorCode::InvalidTableToken),
            5005 => Ok(ErrorCode::CapacityInvalid),

            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
