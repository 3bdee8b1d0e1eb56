//! Global multiplier event lookup.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::QuestEvent;
use reward_core::QuestType;

/// The highest multiplier among events active at `now` that apply to
/// `quest_type`, or 1.0 when none match.
///
/// `quest_types` is stored as a JSON array of quest type strings; a row
/// that fails to parse is malformed and aborts the lookup rather than
/// being skipped.
pub async fn active_event_multiplier(
    pool: &SqlitePool,
    quest_type: QuestType,
    now: DateTime<Utc>,
) -> Result<f64> {
    let now = now.to_rfc3339();
    let rows = sqlx::query_as::<_, QuestEvent>(
        r#"
        SELECT id, name, quest_types, multiplier, starts_at, ends_at, is_active, created_at
        FROM quest_events
        WHERE is_active = 1
          AND datetime(starts_at) <= datetime(?)
          AND datetime(ends_at) >= datetime(?)
        "#,
    )
    .bind(&now)
    .bind(&now)
    .fetch_all(pool)
    .await?;

    let mut best = 1.0f64;
    for row in rows {
        let types: Vec<QuestType> =
            serde_json::from_str(&row.quest_types).map_err(|e| DatabaseError::Malformed {
                entity: "QuestEvent",
                detail: format!("quest_types {:?}: {}", row.quest_types, e),
            })?;
        if row.multiplier <= 1.0 {
            return Err(DatabaseError::Malformed {
                entity: "QuestEvent",
                detail: format!("multiplier {} must be > 1", row.multiplier),
            });
        }
        if types.contains(&quest_type) && row.multiplier > best {
            best = row.multiplier;
        }
    }

    Ok(best)
}

/// Create a multiplier event covering the given quest types.
pub async fn create_event(
    pool: &SqlitePool,
    name: &str,
    quest_types: &[QuestType],
    multiplier: f64,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
) -> Result<i64> {
    let types = serde_json::to_string(quest_types).map_err(|e| DatabaseError::Malformed {
        entity: "QuestEvent",
        detail: format!("quest_types: {}", e),
    })?;

    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO quest_events (name, quest_types, multiplier, starts_at, ends_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(name)
    .bind(types)
    .bind(multiplier)
    .bind(starts_at.to_rfc3339())
    .bind(ends_at.to_rfc3339())
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Disable an event without deleting its history.
pub async fn deactivate_event(pool: &SqlitePool, id: i64) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE quest_events
        SET is_active = 0
        WHERE id = ?
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "QuestEvent",
            id: id.to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;
    use chrono::TimeZone;

    async fn test_db() -> Database {
        let db = Database::connect_with_pool_size("sqlite::memory:", 1)
            .await
            .unwrap();
        db.migrate().await.unwrap();
        db
    }

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, hour, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn defaults_to_one_without_matching_events() {
        let db = test_db().await;
        let m = active_event_multiplier(db.pool(), QuestType::Daily, at(12))
            .await
            .unwrap();
        assert_eq!(m, 1.0);
    }

    #[tokio::test]
    async fn picks_the_maximum_matching_multiplier() {
        let db = test_db().await;
        let pool = db.pool();

        create_event(pool, "Double Daily", &[QuestType::Daily], 2.0, at(0), at(23))
            .await
            .unwrap();
        create_event(
            pool,
            "Everything Weekend",
            &[QuestType::Daily, QuestType::Weekly],
            1.5,
            at(0),
            at(23),
        )
        .await
        .unwrap();
        // Applies to a different quest type.
        create_event(pool, "Weekly Rush", &[QuestType::Weekly], 3.0, at(0), at(23))
            .await
            .unwrap();

        let m = active_event_multiplier(pool, QuestType::Daily, at(12))
            .await
            .unwrap();
        assert_eq!(m, 2.0);

        let m = active_event_multiplier(pool, QuestType::Weekly, at(12))
            .await
            .unwrap();
        assert_eq!(m, 3.0);

        let m = active_event_multiplier(pool, QuestType::NoDeadline, at(12))
            .await
            .unwrap();
        assert_eq!(m, 1.0);
    }

    #[tokio::test]
    async fn expired_and_deactivated_events_do_not_apply() {
        let db = test_db().await;
        let pool = db.pool();

        create_event(pool, "Over", &[QuestType::Daily], 2.0, at(0), at(10))
            .await
            .unwrap();
        let id = create_event(pool, "Disabled", &[QuestType::Daily], 2.0, at(0), at(23))
            .await
            .unwrap();
        deactivate_event(pool, id).await.unwrap();

        let m = active_event_multiplier(pool, QuestType::Daily, at(12))
            .await
            .unwrap();
        assert_eq!(m, 1.0);
    }

    #[tokio::test]
    async fn malformed_quest_types_abort_the_lookup() {
        let db = test_db().await;
        sqlx::query(
            r#"
            INSERT INTO quest_events (name, quest_types, multiplier, starts_at, ends_at)
            VALUES ('Broken', 'not json', 2.0, ?, ?)
            "#,
        )
        .bind(at(0).to_rfc3339())
        .bind(at(23).to_rfc3339())
        .execute(db.pool())
        .await
        .unwrap();

        let result = active_event_multiplier(db.pool(), QuestType::Daily, at(12)).await;
        assert!(matches!(result, Err(DatabaseError::Malformed { .. })));
    }
}
