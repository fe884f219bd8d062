//! JWT token service
//!
//! Issues and verifies the HS256 tokens for both principal types. Claims
//! carry a closed `kind` discriminator so account and guest tokens can
//! never be confused, and a `token_use` marker separating access from
//! refresh tokens.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use shared::models::Role;
use thiserror::Error;
use uuid::Uuid;

/// Principal discriminator embedded in every token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Account,
    Guest,
}

impl TokenKind {
    /// Canonical database representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Account => "account",
            TokenKind::Guest => "guest",
        }
    }
}

/// Access vs refresh marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenUse {
    Access,
    Refresh,
}

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Principal id
    pub sub: i64,
    /// Principal discriminator
    pub kind: TokenKind,
    /// Account role; absent on guest tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// Access or refresh
    pub token_use: TokenUse,
    /// Token id (uuid v4), the ledger key
    pub jti: String,
    /// Issued at (Unix seconds)
    pub iat: i64,
    /// Expiration (Unix seconds)
    pub exp: i64,
}

/// JWT errors
#[derive(Error, Debug)]
pub enum JwtError {
    #[error("token expired")]
    Expired,

    #[error("invalid token: {0}")]
    Invalid(String),

    #[error("token generation failed: {0}")]
    GenerationFailed(String),
}

/// A freshly minted token with its ledger metadata
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub jti: String,
    pub issued_at: i64,
    pub expires_at: i64,
}

/// Access + refresh pair issued at login
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access: IssuedToken,
    pub refresh: IssuedToken,
}

/// JWT token service
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_minutes: i64,
    refresh_token_days: i64,
}

impl JwtService {
    pub fn new(secret: &str, access_token_minutes: i64, refresh_token_days: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_minutes,
            refresh_token_days,
        }
    }

    fn lifetime(&self, token_use: TokenUse) -> Duration {
        match token_use {
            TokenUse::Access => Duration::minutes(self.access_token_minutes),
            TokenUse::Refresh => Duration::days(self.refresh_token_days),
        }
    }

    /// Mint a single token with a fresh jti
    pub fn issue(
        &self,
        principal_id: i64,
        kind: TokenKind,
        role: Option<Role>,
        token_use: TokenUse,
    ) -> Result<IssuedToken, JwtError> {
        let now = Utc::now();
        let expires = now + self.lifetime(token_use);
        let jti = Uuid::new_v4().to_string();

        let claims = Claims {
            sub: principal_id,
            kind,
            role,
            token_use,
            jti: jti.clone(),
            iat: now.timestamp(),
            exp: expires.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))?;

        Ok(IssuedToken {
            token,
            jti,
            issued_at: now.timestamp_millis(),
            expires_at: expires.timestamp_millis(),
        })
    }

    /// Mint the access + refresh pair issued on login
    pub fn issue_pair(
        &self,
        principal_id: i64,
        kind: TokenKind,
        role: Option<Role>,
    ) -> Result<TokenPair, JwtError> {
        Ok(TokenPair {
            access: self.issue(principal_id, kind, role, TokenUse::Access)?,
            refresh: self.issue(principal_id, kind, role, TokenUse::Refresh)?,
        })
    }

    /// Verify signature and expiry, return the claims
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp"]);

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::Expired,
                _ => JwtError::Invalid(e.to_string()),
            })?;

        Ok(token_data.claims)
    }

    /// Extract the bearer token from an Authorization header value
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ")
    }
}
