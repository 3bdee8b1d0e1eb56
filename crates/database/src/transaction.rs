//! Token ledger entries.
//!
//! Rows are append-only history: inserted once by the ledger commit and
//! never updated or deleted.

use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};

use crate::error::Result;
use crate::models::TokenTransaction;

/// Fields of a new ledger entry; the row ID and timestamp are assigned on
/// insert.
pub(crate) struct NewEntry<'a> {
    pub user_id: &'a str,
    pub character_id: &'a str,
    pub amount: i64,
    pub entry_type: &'a str,
    pub description: &'a str,
    pub metadata: Option<&'a str>,
    pub balance_before: i64,
    pub balance_after: i64,
}

/// Transaction-scoped append of a ledger entry. Returns the assigned row ID.
pub(crate) async fn insert(
    conn: &mut SqliteConnection,
    entry: &NewEntry<'_>,
    created_at: DateTime<Utc>,
) -> Result<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO token_transactions
            (user_id, character_id, amount, entry_type, description, metadata,
             balance_before, balance_after, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(entry.user_id)
    .bind(entry.character_id)
    .bind(entry.amount)
    .bind(entry.entry_type)
    .bind(entry.description)
    .bind(entry.metadata)
    .bind(entry.balance_before)
    .bind(entry.balance_after)
    .bind(created_at.to_rfc3339())
    .fetch_one(conn)
    .await?;

    Ok(id)
}

/// Get recent ledger entries for a user, newest first.
pub async fn list_transactions(
    pool: &SqlitePool,
    user_id: &str,
    limit: i64,
) -> Result<Vec<TokenTransaction>> {
    let rows = sqlx::query_as::<_, TokenTransaction>(
        r#"
        SELECT id, user_id, character_id, amount, entry_type, description, metadata,
               balance_before, balance_after, created_at
        FROM token_transactions
        WHERE user_id = ?
        ORDER BY id DESC
        LIMIT ?
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Count ledger entries for a user.
pub async fn count_transactions(pool: &SqlitePool, user_id: &str) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM token_transactions WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(count)
}
