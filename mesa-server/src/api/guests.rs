//! Guest session endpoints
//!
//! Guest login creates the guest: there is no standing guest credential.
//! Identity is proven by naming an AVAILABLE table and presenting its
//! access token; the reservation and the guest row are committed together.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use shared::error::{AppError, ErrorCode};
use shared::models::TableStatus;
use shared::response::ApiResponse;

use super::auth::{RefreshRequest, logout_for_kind, record_pair, refresh_for_kind};
use crate::auth::{CurrentAccount, TokenKind};
use crate::db::{guests, tables};
use crate::error::{ServiceError, ServiceResult};
use crate::state::AppState;
use crate::util;

/// Guest as serialized to clients
#[derive(Debug, Serialize)]
pub struct GuestView {
    pub id: i64,
    pub name: String,
    #[serde(rename = "tableNumber")]
    pub table_number: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<guests::Guest> for GuestView {
    fn from(row: guests::Guest) -> Self {
        Self {
            id: row.id,
            name: row.name,
            table_number: row.table_number,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GuestLoginRequest {
    pub name: Option<String>,
    #[serde(rename = "tableNumber")]
    pub table_number: Option<i64>,
    #[serde(rename = "tableToken")]
    pub table_token: Option<String>,
}

fn validated_name(name: Option<&str>) -> Result<String, AppError> {
    let name = name.unwrap_or_default().trim();
    if name.chars().count() < 2 {
        return Err(AppError::field_validation(
            ErrorCode::ValidationFailed,
            "name",
            "name_too_short",
        ));
    }
    Ok(name.to_string())
}

/// Validate the table precondition for a reservation: it must exist and be
/// AVAILABLE. Returns the row for token checks.
async fn available_table(
    state: &AppState,
    number: Option<i64>,
) -> ServiceResult<tables::DiningTable> {
    let number = number.ok_or_else(|| {
        AppError::field_validation(ErrorCode::ValidationFailed, "tableNumber", "table_not_found")
    })?;

    let table = tables::find_by_number(&state.pool, number)
        .await?
        .ok_or_else(|| {
            AppError::field_validation(
                ErrorCode::ValidationFailed,
                "tableNumber",
                "table_not_found",
            )
        })?;

    if table.status != TableStatus::Available.as_db() {
        return Err(AppError::field_validation(
            ErrorCode::TableNotAvailable,
            "tableNumber",
            "table_not_available",
        )
        .into());
    }

    Ok(table)
}

/// Reserve the table and create the guest; a lost race reads as the table
/// having just become unavailable.
async fn reserve(state: &AppState, name: &str, number: i64) -> ServiceResult<GuestView> {
    let guest = guests::create_reserving_table(&state.pool, name, number)
        .await?
        .ok_or_else(|| {
            AppError::field_validation(
                ErrorCode::TableNotAvailable,
                "tableNumber",
                "table_not_available",
            )
        })?;
    Ok(guest.into())
}

/// POST /api/guests/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<GuestLoginRequest>,
) -> Result<ApiResponse<Value>, ServiceError> {
    let name = validated_name(req.name.as_deref())?;
    let table = available_table(&state, req.table_number).await?;

    let supplied = req.table_token.as_deref().unwrap_or_default().trim();
    if supplied.is_empty() {
        return Err(AppError::field_validation(
            ErrorCode::ValidationFailed,
            "tableToken",
            "table_token_required",
        )
        .into());
    }
    if !util::tokens_match(supplied, &table.token) {
        tracing::warn!(table = table.number, "Guest login with wrong table token");
        return Err(AppError::field_validation(
            ErrorCode::InvalidTableToken,
            "tableToken",
            "invalid_table_token",
        )
        .into());
    }

    let guest = reserve(&state, &name, table.number).await?;

    let pair = state
        .jwt
        .issue_pair(guest.id, TokenKind::Guest, None)
        .map_err(|e| {
            tracing::error!(error = %e, "Token generation failed");
            AppError::internal()
        })?;
    record_pair(&state, &pair, guest.id, TokenKind::Guest).await;

    let data = json!({
        "accessToken": pair.access.token,
        "refreshToken": pair.refresh.token,
        "guest": guest,
    });
    Ok(ApiResponse::ok(data, "guest_login_success"))
}

/// POST /api/guests/refresh-token
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<ApiResponse<Value>, ServiceError> {
    let data = refresh_for_kind(&state, req.refresh_token, TokenKind::Guest).await?;
    Ok(ApiResponse::ok(data, "guest_token_refresh_success"))
}

/// POST /api/guests/logout
pub async fn logout(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<ApiResponse<()>, ServiceError> {
    logout_for_kind(
        &state,
        req.refresh_token,
        TokenKind::Guest,
        "invalid_guest_token",
    )
    .await?;
    Ok(ApiResponse::message_only("guest_logout_success"))
}

/// POST /api/accounts/guests
///
/// Staff-created guest: reserves the table but issues no tokens and
/// requires no table access token.
pub async fn staff_create(
    State(state): State<AppState>,
    current: CurrentAccount,
    Json(req): Json<GuestLoginRequest>,
) -> Result<ApiResponse<Value>, ServiceError> {
    current.require_staff()?;

    let name = validated_name(req.name.as_deref())?;
    let table = available_table(&state, req.table_number).await?;
    let guest = reserve(&state, &name, table.number).await?;

    Ok(ApiResponse::ok(
        json!({ "guest": guest }),
        "guest_create_account_success",
    ))
}
