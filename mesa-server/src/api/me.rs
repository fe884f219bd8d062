//! Own-profile endpoints

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::Value;
use shared::error::{AppError, ErrorCode};
use shared::response::ApiResponse;

use super::auth::AccountView;
use crate::auth::CurrentAccount;
use crate::db::accounts;
use crate::error::ServiceError;
use crate::state::AppState;
use crate::util;

/// GET /api/me
pub async fn profile(
    State(state): State<AppState>,
    current: CurrentAccount,
) -> Result<ApiResponse<AccountView>, ServiceError> {
    let row = accounts::find_by_id(&state.pool, current.id)
        .await?
        .ok_or_else(|| AppError::not_found("user_not_found"))?;
    Ok(ApiResponse::ok(
        AccountView::from_row(row)?,
        "get_user_success",
    ))
}

/// PATCH /api/me
///
/// Email, password and id are immutable through this endpoint; their
/// presence in the body is rejected outright rather than ignored.
pub async fn update_profile(
    State(state): State<AppState>,
    current: CurrentAccount,
    Json(body): Json<Value>,
) -> Result<ApiResponse<AccountView>, ServiceError> {
    let obj = body.as_object().ok_or_else(|| {
        AppError::with_message(ErrorCode::InvalidRequest, "update_user_failed")
    })?;

    if obj.contains_key("email") || obj.contains_key("password") || obj.contains_key("id") {
        return Err(AppError::new(ErrorCode::RestrictedField).into());
    }

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

    let row = accounts::update_profile(&state.pool, current.id, name, avatar)
        .await?
        .ok_or_else(|| AppError::not_found("user_not_found"))?;

    Ok(ApiResponse::ok(
        AccountView::from_row(row)?,
        "update_user_success",
    ))
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub old_password: Option<String>,
    pub new_password: Option<String>,
    pub confirm_password: Option<String>,
}

/// POST /api/me/change-password
pub async fn change_password(
    State(state): State<AppState>,
    current: CurrentAccount,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<ApiResponse<()>, ServiceError> {
    let row = accounts::find_by_id(&state.pool, current.id)
        .await?
        .ok_or_else(|| AppError::not_found("user_not_found"))?;

    let old = req.old_password.as_deref().unwrap_or_default();
    if !util::verify_password(old, &row.password_hash) {
        return Err(AppError::new(ErrorCode::PasswordIncorrect)
            .with_field("old_password", "password_incorrect")
            .into());
    }

    let new = req.new_password.as_deref().unwrap_or_default();
    let confirm = req.confirm_password.as_deref().unwrap_or_default();
    if new != confirm {
        return Err(AppError::new(ErrorCode::ConfirmPasswordMismatch)
            .with_field("confirm_password", "confirm_password_not_match")
            .into());
    }

    if !util::password_meets_policy(new) {
        return Err(AppError::new(ErrorCode::PasswordInvalid)
            .with_field("new_password", "password_invalid")
            .into());
    }

    let hash = util::hash_password(new).map_err(|e| {
        tracing::error!(error = %e, "Password hashing failed");
        AppError::internal()
    })?;
    accounts::update_password(&state.pool, current.id, &hash).await?;

    Ok(ApiResponse::message_only("change_password_success"))
}
