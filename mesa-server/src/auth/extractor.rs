//! Request extractors for the two principal types
//!
//! `CurrentAccount` and `CurrentGuest` are independent verification paths.
//! Both run the full chain: bearer header, signature + expiry, access-token
//! marker, blacklist lookup, discriminator check, principal existence.

use axum::{extract::FromRequestParts, http::request::Parts};
use shared::error::{AppError, ErrorCode};
use shared::models::Role;

use crate::auth::jwt::{Claims, JwtService, TokenKind, TokenUse};
use crate::db::{accounts, guests, tokens};
use crate::state::AppState;

/// Authenticated staff account
#[derive(Debug, Clone)]
pub struct CurrentAccount {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub avatar: Option<String>,
}

/// Authenticated guest
#[derive(Debug, Clone)]
pub struct CurrentGuest {
    pub id: i64,
    pub name: String,
    pub table_number: i64,
}

/// Bearer header + signature + expiry + access marker + blacklist
async fn verify_access(parts: &Parts, state: &AppState) -> Result<Claims, AppError> {
    let auth_header = parts
        .headers
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header).ok_or_else(|| {
            tracing::warn!(uri = %parts.uri, "Malformed authorization header");
            AppError::unauthorized()
        })?,
        None => return Err(AppError::unauthorized()),
    };

    let claims = state.jwt.verify(token).map_err(|e| {
        tracing::warn!(uri = %parts.uri, error = %e, "Token verification failed");
        match e {
            crate::auth::JwtError::Expired => AppError::new(ErrorCode::TokenExpired),
            _ => AppError::unauthorized(),
        }
    })?;

    if claims.token_use != TokenUse::Access {
        return Err(AppError::unauthorized());
    }

    let revoked = tokens::is_blacklisted(&state.pool, &claims.jti)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Blacklist lookup failed");
            AppError::internal()
        })?;
    if revoked {
        tracing::warn!(sub = claims.sub, "Revoked token presented");
        return Err(AppError::unauthorized());
    }

    Ok(claims)
}

impl FromRequestParts<AppState> for CurrentAccount {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(account) = parts.extensions.get::<CurrentAccount>() {
            return Ok(account.clone());
        }

        let claims = verify_access(parts, state).await?;
        if claims.kind != TokenKind::Account {
            tracing::warn!(sub = claims.sub, "Guest token on an account endpoint");
            return Err(AppError::unauthorized());
        }

        let account = accounts::find_by_id(&state.pool, claims.sub)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Account lookup failed");
                AppError::internal()
            })?
            .ok_or_else(AppError::unauthorized)?;

        if !account.is_active {
            return Err(AppError::new(ErrorCode::AccountDisabled));
        }

        let role = Role::from_db(&account.role).ok_or_else(|| {
            tracing::error!(id = account.id, role = %account.role, "Unknown role in database");
            AppError::internal()
        })?;

        let current = CurrentAccount {
            id: account.id,
            email: account.email,
            name: account.name,
            role,
            avatar: account.avatar,
        };
        parts.extensions.insert(current.clone());

        Ok(current)
    }
}

impl FromRequestParts<AppState> for CurrentGuest {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(guest) = parts.extensions.get::<CurrentGuest>() {
            return Ok(guest.clone());
        }

        let claims = verify_access(parts, state).await?;
        if claims.kind != TokenKind::Guest {
            tracing::warn!(sub = claims.sub, "Account token on a guest endpoint");
            return Err(AppError::unauthorized());
        }

        let guest = guests::find_by_id(&state.pool, claims.sub)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Guest lookup failed");
                AppError::internal()
            })?
            .ok_or_else(AppError::unauthorized)?;

        let current = CurrentGuest {
            id: guest.id,
            name: guest.name,
            table_number: guest.table_number,
        };
        parts.extensions.insert(current.clone());

        Ok(current)
    }
}
