//! API response types
//!
//! Standardized response structures for the whole backend

use serde::{Deserialize, Serialize};

/// Unified API response structure
///
/// All successful responses follow this format:
/// ```json
/// {
///     "success": true,
///     "message": "login_success",
///     "data": { ... }
/// }
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Always `true` on this envelope; error responses carry `false`
    pub success: bool,
    /// Human-readable message key (i18n-ready snake_case)
    pub message: String,
    /// Response data (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response with data
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Create a successful response without a data payload
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }
}

impl<T: Serialize> axum::response::IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        axum::Json(self).into_response()
    }
}

/// Pagination metadata echoed back with every list response
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Pagination {
    /// Items per page
    pub limit: u32,
    /// Number of items skipped
    pub offset: u32,
    /// Total number of items matching the query
    pub total: u64,
}

/// Paginated response wrapper
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    /// Page of items
    pub items: Vec<T>,
    /// Pagination metadata
    pub pagination: Pagination,
}

impl<T> Paginated<T> {
    /// Create a new paginated page
    pub fn new(items: Vec<T>, limit: u32, offset: u32, total: u64) -> Self {
        Self {
            items,
            pagination: Pagination {
                limit,
                offset,
                total,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_envelope() {
        let resp = ApiResponse::ok(serde_json::json!({"id": 1}), "success");
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "success");
        assert_eq!(json["data"]["id"], 1);
    }

    #[test]
    fn test_message_only_omits_data() {
        let resp = ApiResponse::<()>::message_only("logout_success");
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["success"], true);
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_paginated() {
        let page = Paginated::new(vec![1, 2, 3], 10, 0, 42);
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.pagination.limit, 10);
        assert_eq!(page.pagination.total, 42);
    }
}
