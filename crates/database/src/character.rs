//! Character rows.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::Character;

/// Create a new character for a user.
pub async fn create_character(
    pool: &SqlitePool,
    id: &str,
    user_id: &str,
    job_class_id: &str,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO characters (id, user_id, job_class_id)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(job_class_id)
    .execute(pool)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return DatabaseError::AlreadyExists {
                    entity: "Character",
                    id: id.to_string(),
                };
            }
        }
        DatabaseError::Sqlx(e)
    })?;

    Ok(())
}

/// Get a character by ID.
pub async fn get_character(pool: &SqlitePool, id: &str) -> Result<Character> {
    sqlx::query_as::<_, Character>(
        r#"
        SELECT id, user_id, job_class_id, created_at
        FROM characters
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Character",
        id: id.to_string(),
    })
}
