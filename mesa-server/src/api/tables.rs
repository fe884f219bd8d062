//! Dining table management (staff)

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};
use shared::models::TableStatus;
use shared::response::ApiResponse;
use shared::util::generate_token;

use crate::auth::CurrentAccount;
use crate::db::tables;
use crate::error::ServiceError;
use crate::state::AppState;

const TABLE_TOKEN_LEN: usize = 32;

/// Table as serialized to staff. The access token is included; guests
/// never see this view.
#[derive(Debug, Serialize)]
pub struct TableView {
    pub number: i64,
    pub capacity: i64,
    pub status: TableStatus,
    pub token: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl TableView {
    fn from_row(row: tables::DiningTable) -> Result<Self, AppError> {
        let status = TableStatus::from_db(&row.status).ok_or_else(|| {
            tracing::error!(number = row.number, status = %row.status, "Unknown table status");
            AppError::internal()
        })?;
        Ok(Self {
            number: row.number,
            capacity: row.capacity,
            status,
            token: row.token,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateTableRequest {
    pub number: Option<i64>,
    pub capacity: Option<i64>,
    pub status: Option<TableStatus>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTableRequest {
    pub capacity: Option<i64>,
    pub status: Option<TableStatus>,
    #[serde(rename = "changeToken", default)]
    pub change_token: bool,
}

fn check_capacity(state: &AppState, capacity: i64) -> Result<(), AppError> {
    if capacity < state.table_min_capacity || capacity > state.table_max_capacity {
        return Err(AppError::field_validation(
            ErrorCode::CapacityInvalid,
            "capacity",
            "capacity_invalid",
        ));
    }
    Ok(())
}

/// GET /api/tables
pub async fn list(
    State(state): State<AppState>,
    current: CurrentAccount,
) -> Result<ApiResponse<Vec<TableView>>, ServiceError> {
    current.require_staff()?;
    let rows = tables::list_all(&state.pool).await?;
    let items = rows
        .into_iter()
        .map(TableView::from_row)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ApiResponse::ok(items, "get_all_table_success"))
}

/// POST /api/tables
///
/// The access token is always generated server-side.
pub async fn create(
    State(state): State<AppState>,
    current: CurrentAccount,
    Json(req): Json<CreateTableRequest>,
) -> Result<ApiResponse<TableView>, ServiceError> {
    current.require_staff()?;

    let number = req.number.ok_or_else(|| {
        AppError::field_validation(ErrorCode::ValidationFailed, "number", "number_required")
    })?;
    let capacity = req.capacity.ok_or_else(|| {
        AppError::field_validation(ErrorCode::CapacityInvalid, "capacity", "capacity_invalid")
    })?;
    check_capacity(&state, capacity)?;

    if tables::number_taken(&state.pool, number).await? {
        return Err(AppError::field_validation(
            ErrorCode::TableExists,
            "number",
            "table_already_exists",
        )
        .into());
    }

    let status = req.status.unwrap_or(TableStatus::Available);
    let token = generate_token(TABLE_TOKEN_LEN);
    let row = tables::create(&state.pool, number, capacity, status.as_db(), &token).await?;

    Ok(ApiResponse::ok(
        TableView::from_row(row)?,
        "create_table_success",
    ))
}

/// GET /api/tables/{number}
pub async fn detail(
    State(state): State<AppState>,
    current: CurrentAccount,
    Path(number): Path<i64>,
) -> Result<ApiResponse<TableView>, ServiceError> {
    current.require_staff()?;
    let row = tables::find_by_number(&state.pool, number)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::TableNotFound))?;
    Ok(ApiResponse::ok(
        TableView::from_row(row)?,
        "get_table_success",
    ))
}

/// PUT /api/tables/{number}
///
/// `changeToken: true` rotates the table access token, cutting off anyone
/// holding the old one. The number itself is immutable.
pub async fn update(
    State(state): State<AppState>,
    current: CurrentAccount,
    Path(number): Path<i64>,
    Json(req): Json<UpdateTableRequest>,
) -> Result<ApiResponse<TableView>, ServiceError> {
    current.require_staff()?;

    tables::find_by_number(&state.pool, number)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::TableNotFound))?;

    if let Some(capacity) = req.capacity {
        check_capacity(&state, capacity)?;
    }

    let new_token = req.change_token.then(|| generate_token(TABLE_TOKEN_LEN));
    let row = tables::update(
        &state.pool,
        number,
        req.capacity,
        req.status.map(|s| s.as_db()),
        new_token.as_deref(),
    )
    .await?
    .ok_or_else(|| AppError::new(ErrorCode::TableNotFound))?;

    Ok(ApiResponse::ok(
        TableView::from_row(row)?,
        "update_table_success",
    ))
}

/// DELETE /api/tables/{number}
pub async fn remove(
    State(state): State<AppState>,
    current: CurrentAccount,
    Path(number): Path<i64>,
) -> Result<ApiResponse<()>, ServiceError> {
    current.require_staff()?;
    let deleted = tables::delete(&state.pool, number).await?;
    if !deleted {
        return Err(AppError::new(ErrorCode::TableNotFound).into());
    }
    Ok(ApiResponse::message_only("delete_table_success"))
}
