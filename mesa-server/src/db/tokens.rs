//! Token ledger storage
//!
//! Two tables back the session model: `outstanding_tokens` records every
//! token ever issued (append-only, keyed by jti) and `blacklisted_tokens`
//! marks revoked jtis. Both writes are idempotent so replayed logouts and
//! duplicate issue records never fail.

use shared::util::now_millis;
use sqlx::SqlitePool;

/// Record an issued token. Idempotent on jti.
pub async fn record_issued(
    pool: &SqlitePool,
    jti: &str,
    principal_id: i64,
    principal_kind: &str,
    token: &str,
    issued_at: i64,
    expires_at: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT OR IGNORE INTO outstanding_tokens
         (jti, principal_id, principal_kind, token, issued_at, expires_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .bind(jti)
    .bind(principal_id)
    .bind(principal_kind)
    .bind(token)
    .bind(issued_at)
    .bind(expires_at)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn is_blacklisted(pool: &SqlitePool, jti: &str) -> Result<bool, sqlx::Error> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM blacklisted_tokens WHERE jti = ?1")
        .bind(jti)
        .fetch_one(pool)
        .await?;
    Ok(count > 0)
}

/// Blacklist every outstanding token for one principal. Logout everywhere.
///
/// Filtering on (principal_id, principal_kind) keeps an account and a guest
/// that happen to share a numeric id from revoking each other's sessions.
/// Idempotent: already-blacklisted jtis are skipped.
pub async fn blacklist_all(
    pool: &SqlitePool,
    principal_id: i64,
    principal_kind: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT OR IGNORE INTO blacklisted_tokens (jti, blacklisted_at)
         SELECT jti, ?3 FROM outstanding_tokens
         WHERE principal_id = ?1 AND principal_kind = ?2",
    )
    .bind(principal_id)
    .bind(principal_kind)
    .bind(now_millis())
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}
