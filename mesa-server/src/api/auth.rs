//! Account authentication: register, login, refresh, logout
//!
//! The refresh and logout flows are shared with the guest endpoints; the
//! helpers here take the expected `TokenKind` so each endpoint only accepts
//! its own principal's tokens.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use shared::error::{AppError, ErrorCode};
use shared::models::Role;
use shared::response::ApiResponse;

use crate::auth::jwt::IssuedToken;
use crate::auth::{TokenKind, TokenPair, TokenUse};
use crate::db::{accounts, guests, tokens};
use crate::error::{ServiceError, ServiceResult};
use crate::state::AppState;
use crate::util;

/// Account as serialized to clients. No password hash.
#[derive(Debug, Serialize)]
pub struct AccountView {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub avatar: Option<String>,
    pub owner_id: Option<i64>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl AccountView {
    pub fn from_row(row: accounts::Account) -> Result<Self, AppError> {
        let role = Role::from_db(&row.role).ok_or_else(|| {
            tracing::error!(id = row.id, role = %row.role, "Unknown role in database");
            AppError::internal()
        })?;
        Ok(Self {
            id: row.id,
            email: row.email,
            name: row.name,
            role,
            avatar: row.avatar,
            owner_id: row.owner_id,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
    pub avatar: Option<String>,
    pub owner_id: Option<i64>,
}

/// Validate a registration payload and insert the account.
/// Shared with admin employee creation, which forces the role.
pub(crate) async fn create_account(
    state: &AppState,
    req: RegisterRequest,
    forced_role: Option<Role>,
    owner_id: Option<i64>,
) -> ServiceResult<AccountView> {
    let email = util::normalize_email(req.email.as_deref().unwrap_or_default());
    if email.is_empty() {
        return Err(AppError::field_validation(
            ErrorCode::ValidationFailed,
            "email",
            "email_blank",
        )
        .into());
    }
    if !email.contains('@') || email.len() < 6 {
        return Err(AppError::field_validation(
            ErrorCode::ValidationFailed,
            "email",
            "email_invalid",
        )
        .into());
    }

    let name = req.name.as_deref().unwrap_or_default().trim().to_string();
    if name.is_empty() {
        return Err(
            AppError::field_validation(ErrorCode::ValidationFailed, "name", "name_blank").into(),
        );
    }

    let password = req.password.as_deref().unwrap_or_default();
    if !util::password_meets_policy(password) {
        return Err(AppError::field_validation(
            ErrorCode::PasswordInvalid,
            "password",
            "password_invalid",
        )
        .into());
    }

    if accounts::email_taken(&state.pool, &email).await? {
        return Err(
            AppError::field_validation(ErrorCode::EmailExists, "email", "email_exists").into(),
        );
    }

    let hash = util::hash_password(password).map_err(|e| {
        tracing::error!(error = %e, "Password hashing failed");
        AppError::internal()
    })?;

    let role = forced_role.or(req.role).unwrap_or(Role::Employee);
    let row = accounts::create(
        &state.pool,
        &email,
        &name,
        &hash,
        role.as_db(),
        req.avatar.as_deref(),
        owner_id.or(req.owner_id),
    )
    .await?;

    Ok(AccountView::from_row(row)?)
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, ApiResponse<AccountView>), ServiceError> {
    let view = create_account(&state, req, None, None).await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::ok(view, "register_success"),
    ))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<ApiResponse<Value>, ServiceError> {
    let email = util::normalize_email(req.email.as_deref().unwrap_or_default());
    let password = req.password.as_deref().unwrap_or_default();

    // Uniform failure for unknown email and wrong password
    let account = accounts::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| {
            tracing::warn!(%email, "Login with unknown email");
            AppError::invalid_credentials()
        })?;

    if !util::verify_password(password, &account.password_hash) {
        tracing::warn!(id = account.id, "Login with wrong password");
        return Err(AppError::invalid_credentials().into());
    }

    if !account.is_active {
        return Err(AppError::new(ErrorCode::AccountDisabled).into());
    }

    let view = AccountView::from_row(account)?;
    let pair = state
        .jwt
        .issue_pair(view.id, TokenKind::Account, Some(view.role))
        .map_err(|e| {
            tracing::error!(error = %e, "Token generation failed");
            AppError::internal()
        })?;

    record_pair(&state, &pair, view.id, TokenKind::Account).await;

    let data = json!({
        "accessToken": pair.access.token,
        "refreshToken": pair.refresh.token,
        "account": view,
    });
    Ok(ApiResponse::ok(data, "login_success"))
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    #[serde(rename = "refreshToken")]
    pub refresh_token: Option<String>,
}

/// POST /api/auth/refresh-token
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<ApiResponse<Value>, ServiceError> {
    let data = refresh_for_kind(&state, req.refresh_token, TokenKind::Account).await?;
    Ok(ApiResponse::ok(data, "token_refresh_success"))
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<ApiResponse<()>, ServiceError> {
    logout_for_kind(&state, req.refresh_token, TokenKind::Account, "token_invalid").await?;
    Ok(ApiResponse::message_only("logout_success"))
}

// ==================== Shared session helpers ====================

/// Best-effort ledger write for a freshly issued token. Failures are
/// logged and swallowed; a missed record never blocks a login.
pub(crate) async fn record_issued(
    state: &AppState,
    issued: &IssuedToken,
    principal_id: i64,
    kind: TokenKind,
) {
    if let Err(e) = tokens::record_issued(
        &state.pool,
        &issued.jti,
        principal_id,
        kind.as_str(),
        &issued.token,
        issued.issued_at,
        issued.expires_at,
    )
    .await
    {
        tracing::warn!(error = %e, principal_id, "Failed to record issued token");
    }
}

pub(crate) async fn record_pair(
    state: &AppState,
    pair: &TokenPair,
    principal_id: i64,
    kind: TokenKind,
) {
    record_issued(state, &pair.access, principal_id, kind).await;
    record_issued(state, &pair.refresh, principal_id, kind).await;
}

fn require_token(token: Option<String>) -> Result<String, AppError> {
    match token {
        Some(t) if !t.trim().is_empty() => Ok(t),
        _ => Err(AppError::new(ErrorCode::TokenRequired)
            .with_field("refreshToken", "token_required")),
    }
}

/// Validate a refresh token for one principal kind and mint a new access
/// token. The same refresh token is handed back; reuse is permitted.
pub(crate) async fn refresh_for_kind(
    state: &AppState,
    refresh_token: Option<String>,
    kind: TokenKind,
) -> ServiceResult<Value> {
    let token_str = require_token(refresh_token)?;

    let claims = state
        .jwt
        .verify(&token_str)
        .map_err(|_| AppError::token_invalid())?;

    if claims.token_use != TokenUse::Refresh || claims.kind != kind {
        return Err(AppError::token_invalid().into());
    }

    if tokens::is_blacklisted(&state.pool, &claims.jti).await? {
        return Err(AppError::token_invalid().into());
    }

    match kind {
        TokenKind::Account => {
            let account = accounts::find_by_id(&state.pool, claims.sub)
                .await?
                .ok_or_else(AppError::token_invalid)?;
            if !account.is_active {
                // Uniform with every other refresh failure
                return Err(AppError::token_invalid().into());
            }
        }
        TokenKind::Guest => {
            guests::find_by_id(&state.pool, claims.sub)
                .await?
                .ok_or_else(AppError::token_invalid)?;
        }
    }

    let access = state
        .jwt
        .issue(claims.sub, kind, claims.role, TokenUse::Access)
        .map_err(|e| {
            tracing::error!(error = %e, "Token generation failed");
            AppError::internal()
        })?;

    record_issued(state, &access, claims.sub, kind).await;

    Ok(json!({
        "accessToken": access.token,
        "refreshToken": token_str,
    }))
}

/// Blacklist every outstanding token for the principal named by the refresh
/// token. Idempotent: an already-blacklisted token still logs out cleanly.
pub(crate) async fn logout_for_kind(
    state: &AppState,
    refresh_token: Option<String>,
    kind: TokenKind,
    mismatch_key: &str,
) -> ServiceResult<()> {
    let token_str = require_token(refresh_token)?;

    let claims = state
        .jwt
        .verify(&token_str)
        .map_err(|_| AppError::token_invalid())?;

    if claims.token_use != TokenUse::Refresh || claims.kind != kind {
        return Err(AppError::with_message(ErrorCode::TokenInvalid, mismatch_key).into());
    }

    let revoked = tokens::blacklist_all(&state.pool, claims.sub, kind.as_str()).await?;
    tracing::info!(principal_id = claims.sub, kind = kind.as_str(), revoked, "Logout");

    Ok(())
}
