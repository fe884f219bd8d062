//! Employee management (admin only)
//!
//! These endpoints operate exclusively on EMPLOYEE rows; admin accounts are
//! never listable or editable here.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::Value;
use shared::error::{AppError, ErrorCode};
use shared::models::Role;
use shared::response::{ApiResponse, Paginated};

use super::auth::{AccountView, RegisterRequest, create_account};
use crate::auth::CurrentAccount;
use crate::db::accounts;
use crate::error::ServiceError;
use crate::state::AppState;

const DEFAULT_PAGE_LIMIT: u32 = 10;
const MAX_PAGE_LIMIT: u32 = 100;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl PageQuery {
    pub fn clamp(&self) -> (u32, u32) {
        let limit = self
            .limit
            .unwrap_or(DEFAULT_PAGE_LIMIT)
            .clamp(1, MAX_PAGE_LIMIT);
        (limit, self.offset.unwrap_or(0))
    }
}

/// GET /api/accounts
pub async fn list(
    State(state): State<AppState>,
    current: CurrentAccount,
    Query(page): Query<PageQuery>,
) -> Result<ApiResponse<Paginated<AccountView>>, ServiceError> {
    current.require_admin()?;
    let (limit, offset) = page.clamp();

    let rows = accounts::list_employees(&state.pool, limit, offset).await?;
    let total = accounts::count_employees(&state.pool).await?;

    let items = rows
        .into_iter()
        .map(AccountView::from_row)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ApiResponse::ok(
        Paginated::new(items, limit, offset, total as u64),
        "get_employees_success",
    ))
}

/// POST /api/accounts
///
/// Role is always forced to EMPLOYEE; the creating admin becomes the owner.
pub async fn create(
    State(state): State<AppState>,
    current: CurrentAccount,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, ApiResponse<AccountView>), ServiceError> {
    current.require_admin()?;
    let view = create_account(&state, req, Some(Role::Employee), Some(current.id)).await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::ok(view, "create_employee_success"),
    ))
}

/// GET /api/accounts/detail/{id}
pub async fn detail(
    State(state): State<AppState>,
    current: CurrentAccount,
    Path(id): Path<i64>,
) -> Result<ApiResponse<AccountView>, ServiceError> {
    current.require_admin()?;
    let row = accounts::find_employee(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::EmployeeNotFound))?;
    Ok(ApiResponse::ok(
        AccountView::from_row(row)?,
        "get_employee_success",
    ))
}

/// PUT/PATCH /api/accounts/detail/{id}
///
/// Email stays immutable; an `email` key in the body is dropped rather than
/// rejected. Name, avatar and is_active are the mutable fields.
pub async fn update(
    State(state): State<AppState>,
    current: CurrentAccount,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<ApiResponse<AccountView>, ServiceError> {
    current.require_admin()?;

    accounts::find_employee(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::EmployeeNotFound))?;

    let obj = body
        .as_object()
        .ok_or_else(|| AppError::validation("validation_error"))?;

    let name = obj.get("name").and_then(Value::as_str).map(str::trim);
    if let Some(n) = name {
        if n.is_empty() {
            return Err(AppError::field_validation(
                ErrorCode::ValidationFailed,
                "name",
                "name_blank",
            )
            .into());
        }
    }
    let avatar = obj.get("avatar").and_then(Value::as_str);
    let is_active = obj.get("is_active").and_then(Value::as_bool);

    let row = accounts::update_employee(&state.pool, id, name, avatar, is_active)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::EmployeeNotFound))?;

    Ok(ApiResponse::ok(
        AccountView::from_row(row)?,
        "update_employee_success",
    ))
}

/// DELETE /api/accounts/detail/{id}
pub async fn remove(
    State(state): State<AppState>,
    current: CurrentAccount,
    Path(id): Path<i64>,
) -> Result<ApiResponse<()>, ServiceError> {
    current.require_admin()?;
    let deleted = accounts::delete_employee(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::new(ErrorCode::EmployeeNotFound).into());
    }
    Ok(ApiResponse::message_only("delete_employee_success"))
}
