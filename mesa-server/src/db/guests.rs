//! Guest storage

use shared::util::now_millis;
use sqlx::SqlitePool;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Guest {
    pub id: i64,
    pub name: String,
    pub table_number: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Guest>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM guests WHERE id = ?1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Create a guest and reserve their table in one transaction.
///
/// The status transition is a check-and-set UPDATE guarded by
/// `status = 'AVAILABLE'`; of two concurrent guests racing for the same
/// table exactly one sees a row change, the other gets `None` and no
/// guest row is created.
pub async fn create_reserving_table(
    pool: &SqlitePool,
    name: &str,
    table_number: i64,
) -> Result<Option<Guest>, sqlx::Error> {
    let now = now_millis();
    let mut tx = pool.begin().await?;

    let updated = sqlx::query(
        "UPDATE dining_tables SET status = 'RESERVED', updated_at = ?2
         WHERE number = ?1 AND status = 'AVAILABLE'",
    )
    .bind(table_number)
    .bind(now)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    if updated == 0 {
        tx.rollback().await?;
        return Ok(None);
    }

    let guest: Guest = sqlx::query_as(
        "INSERT INTO guests (name, table_number, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?3)
         RETURNING *",
    )
    .bind(name)
    .bind(table_number)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(Some(guest))
}
