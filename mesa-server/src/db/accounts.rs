//! Account storage

use shared::util::now_millis;
use sqlx::SqlitePool;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Account {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub role: String,
    pub avatar: Option<String>,
    pub owner_id: Option<i64>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

pub async fn create(
    pool: &SqlitePool,
    email: &str,
    name: &str,
    password_hash: &str,
    role: &str,
    avatar: Option<&str>,
    owner_id: Option<i64>,
) -> Result<Account, sqlx::Error> {
    let now = now_millis();
    sqlx::query_as(
        "INSERT INTO accounts
         (email, name, password_hash, role, avatar, owner_id, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)
         RETURNING *",
    )
    .bind(email)
    .bind(name)
    .bind(password_hash)
    .bind(role)
    .bind(avatar)
    .bind(owner_id)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<Account>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM accounts WHERE email = ?1")
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Account>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM accounts WHERE id = ?1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn email_taken(pool: &SqlitePool, email: &str) -> Result<bool, sqlx::Error> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM accounts WHERE email = ?1")
        .bind(email)
        .fetch_one(pool)
        .await?;
    Ok(count > 0)
}

/// Employee rows only; admins are not managed through the employee endpoints
pub async fn find_employee(pool: &SqlitePool, id: i64) -> Result<Option<Account>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM accounts WHERE id = ?1 AND role = 'EMPLOYEE'")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list_employees(
    pool: &SqlitePool,
    limit: u32,
    offset: u32,
) -> Result<Vec<Account>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM accounts WHERE role = 'EMPLOYEE' ORDER BY id LIMIT ?1 OFFSET ?2")
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
}

pub async fn count_employees(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM accounts WHERE role = 'EMPLOYEE'")
        .fetch_one(pool)
        .await
}

/// Partial update of the mutable profile fields. Absent fields keep their value.
pub async fn update_profile(
    pool: &SqlitePool,
    id: i64,
    name: Option<&str>,
    avatar: Option<&str>,
) -> Result<Option<Account>, sqlx::Error> {
    sqlx::query_as(
        "UPDATE accounts
         SET name = COALESCE(?2, name),
             avatar = COALESCE(?3, avatar),
             updated_at = ?4
         WHERE id = ?1
         RETURNING *",
    )
    .bind(id)
    .bind(name)
    .bind(avatar)
    .bind(now_millis())
    .fetch_optional(pool)
    .await
}

/// Partial update of an employee row. Email stays immutable.
pub async fn update_employee(
    pool: &SqlitePool,
    id: i64,
    name: Option<&str>,
    avatar: Option<&str>,
    is_active: Option<bool>,
) -> Result<Option<Account>, sqlx::Error> {
    sqlx::query_as(
        "UPDATE accounts
         SET name = COALESCE(?2, name),
             avatar = COALESCE(?3, avatar),
             is_active = COALESCE(?4, is_active),
             updated_at = ?5
         WHERE id = ?1 AND role = 'EMPLOYEE'
         RETURNING *",
    )
    .bind(id)
    .bind(name)
    .bind(avatar)
    .bind(is_active)
    .bind(now_millis())
    .fetch_optional(pool)
    .await
}

pub async fn update_password(
    pool: &SqlitePool,
    id: i64,
    password_hash: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE accounts SET password_hash = ?1, updated_at = ?2 WHERE id = ?3")
        .bind(password_hash)
        .bind(now_millis())
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Delete an employee row. Returns whether a row was removed.
pub async fn delete_employee(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM accounts WHERE id = ?1 AND role = 'EMPLOYEE'")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
