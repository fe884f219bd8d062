//! Unified error handling
//!
//! `ErrorCode` enumerates every error the API can return together with its
//! HTTP status and client-facing message key. `AppError` is the concrete
//! error value handlers propagate with `?`; its `IntoResponse` impl renders
//! the standard error envelope.

pub mod codes;
pub mod types;

pub use codes::ErrorCode;
pub use types::{AppError, AppResult};
