//! Dining table storage

use shared::util::now_millis;
use sqlx::SqlitePool;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DiningTable {
    pub number: i64,
    pub capacity: i64,
    pub status: String,
    pub token: String,
    pub created_at: i64,
    pub updated_at: i64,
}

pub async fn create(
    pool: &SqlitePool,
    number: i64,
    capacity: i64,
    status: &str,
    token: &str,
) -> Result<DiningTable, sqlx::Error> {
    let now = now_millis();
    sqlx::query_as(
        "INSERT INTO dining_tables (number, capacity, status, token, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?5)
         RETURNING *",
    )
    .bind(number)
    .bind(capacity)
    .bind(status)
    .bind(token)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn find_by_number(
    pool: &SqlitePool,
    number: i64,
) -> Result<Option<DiningTable>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM dining_tables WHERE number = ?1")
        .bind(number)
        .fetch_optional(pool)
        .await
}

pub async fn number_taken(pool: &SqlitePool, number: i64) -> Result<bool, sqlx::Error> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM dining_tables WHERE number = ?1")
        .bind(number)
        .fetch_one(pool)
        .await?;
    Ok(count > 0)
}

pub async fn list_all(pool: &SqlitePool) -> Result<Vec<DiningTable>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM dining_tables ORDER BY number")
        .fetch_all(pool)
        .await
}

/// Partial update. `token` is only rotated when a new value is supplied.
pub async fn update(
    pool: &SqlitePool,
    number: i64,
    capacity: Option<i64>,
    status: Option<&str>,
    token: Option<&str>,
) -> Result<Option<DiningTable>, sqlx::Error> {
    sqlx::query_as(
        "UPDATE dining_tables
         SET capacity = COALESCE(?2, capacity),
             status = COALESCE(?3, status),
             token = COALESCE(?4, token),
             updated_at = ?5
         WHERE number = ?1
         RETURNING *",
    )
    .bind(number)
    .bind(capacity)
    .bind(status)
    .bind(token)
    .bind(now_millis())
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &SqlitePool, number: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM dining_tables WHERE number = ?1")
        .bind(number)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
