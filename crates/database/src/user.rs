//! User rows and the token balance they carry.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::User;

/// Create a new user with a zero token balance.
pub async fn create_user(pool: &SqlitePool, id: &str, name: &str) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO users (id, name)
        VALUES (?, ?)
        "#,
    )
    .bind(id)
    .bind(name)
    .execute(pool)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return DatabaseError::AlreadyExists {
                    entity: "User",
                    id: id.to_string(),
                };
            }
        }
        DatabaseError::Sqlx(e)
    })?;

    Ok(())
}

/// Get a user by ID.
pub async fn get_user(pool: &SqlitePool, id: &str) -> Result<User> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, tokens, created_at
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "User",
        id: id.to_string(),
    })
}

/// Get a user's current token balance.
pub async fn get_balance(pool: &SqlitePool, id: &str) -> Result<i64> {
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT tokens
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "User",
        id: id.to_string(),
    })
}
