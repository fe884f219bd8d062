//! Shared types for the Mesa restaurant backend
//!
//! Cross-cutting pieces used by the server crate and its tests:
//! - Unified error codes and the `AppError` type ([`error`])
//! - The JSON response envelope and pagination types ([`response`])
//! - Closed enumerations for roles and table status ([`models`])
//! - Small time/token utilities ([`util`])

pub mod error;
pub mod models;
pub mod response;
pub mod util;

pub use error::{AppError, AppResult, ErrorCode};
pub use models::{Role, TableStatus};
pub use response::{ApiResponse, Paginated, Pagination};
