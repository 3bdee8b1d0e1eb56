//! Purchased boost lookup.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::CharacterBoost;
use reward_core::ActiveBoost;

/// The purchase category that carries a reward multiplier.
const TOKEN_BOOST_CATEGORY: &str = "token_boost";

/// The currently active token boost for a character, if any.
///
/// Only completed, applied, unexpired token-boost purchases qualify. When
/// several are active at once the highest multiplier wins, with the latest
/// expiry breaking ties; the ORDER BY makes the pick deterministic rather
/// than an accident of row order.
pub async fn active_boost(
    pool: &SqlitePool,
    character_id: &str,
    now: DateTime<Utc>,
) -> Result<Option<ActiveBoost>> {
    let row = sqlx::query_as::<_, CharacterBoost>(
        r#"
        SELECT id, character_id, category, status, multiplier, applied_at, expires_at, created_at
        FROM character_boosts
        WHERE character_id = ?
          AND category = ?
          AND status = 'completed'
          AND applied_at IS NOT NULL
          AND datetime(expires_at) > datetime(?)
        ORDER BY multiplier DESC, datetime(expires_at) DESC
        LIMIT 1
        "#,
    )
    .bind(character_id)
    .bind(TOKEN_BOOST_CATEGORY)
    .bind(now.to_rfc3339())
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    // A boost that does not raise the reward is corrupt data, not a no-op.
    if row.multiplier <= 1.0 {
        return Err(DatabaseError::Malformed {
            entity: "CharacterBoost",
            detail: format!("multiplier {} must be > 1", row.multiplier),
        });
    }

    let expires_at = DateTime::parse_from_rfc3339(&row.expires_at)
        .map_err(|e| DatabaseError::Malformed {
            entity: "CharacterBoost",
            detail: format!("expires_at {:?}: {}", row.expires_at, e),
        })?
        .with_timezone(&Utc);

    Ok(Some(ActiveBoost {
        character_id: row.character_id,
        multiplier: row.multiplier,
        expires_at,
    }))
}

/// Record a boost purchase. `applied_at = None` means purchased but never
/// activated, which the lookup ignores.
pub async fn create_boost(
    pool: &SqlitePool,
    character_id: &str,
    category: &str,
    status: &str,
    multiplier: f64,
    applied_at: Option<DateTime<Utc>>,
    expires_at: DateTime<Utc>,
) -> Result<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO character_boosts (character_id, category, status, multiplier, applied_at, expires_at)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(character_id)
    .bind(category)
    .bind(status)
    .bind(multiplier)
    .bind(applied_at.map(|t| t.to_rfc3339()))
    .bind(expires_at.to_rfc3339())
    .fetch_one(pool)
    .await?;

    Ok(id)
}
