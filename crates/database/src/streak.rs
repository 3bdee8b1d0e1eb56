//! Quest streak persistence.
//!
//! The transition logic lives in `reward_core::StreakSnapshot`; this module
//! only loads and stores the one-row-per-user record. The `pub(crate)`
//! connection-level variants compose inside the ledger transaction so the
//! streak advances atomically with the balance.

use sqlx::{SqliteConnection, SqlitePool};

use crate::error::Result;
use crate::models::QuestStreak;
use reward_core::StreakSnapshot;

const SELECT_STREAK: &str = r#"
    SELECT user_id, current_streak, longest_streak, last_completed_date,
           weekly_quests, monthly_quests, updated_at
    FROM quest_streaks
    WHERE user_id = ?
"#;

/// Get a user's streak record, if one exists yet.
pub async fn get_streak(pool: &SqlitePool, user_id: &str) -> Result<Option<QuestStreak>> {
    let row = sqlx::query_as::<_, QuestStreak>(SELECT_STREAK)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

/// Transaction-scoped read of the streak record.
pub(crate) async fn load(
    conn: &mut SqliteConnection,
    user_id: &str,
) -> Result<Option<QuestStreak>> {
    let row = sqlx::query_as::<_, QuestStreak>(SELECT_STREAK)
        .bind(user_id)
        .fetch_optional(conn)
        .await?;

    Ok(row)
}

/// Transaction-scoped upsert of the streak record.
pub(crate) async fn save(
    conn: &mut SqliteConnection,
    user_id: &str,
    streak: &StreakSnapshot,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO quest_streaks
            (user_id, current_streak, longest_streak, last_completed_date,
             weekly_quests, monthly_quests)
        VALUES (?, ?, ?, ?, ?, ?)
        ON CONFLICT(user_id) DO UPDATE SET
            current_streak = excluded.current_streak,
            longest_streak = excluded.longest_streak,
            last_completed_date = excluded.last_completed_date,
            weekly_quests = excluded.weekly_quests,
            monthly_quests = excluded.monthly_quests,
            updated_at = datetime('now')
        "#,
    )
    .bind(user_id)
    .bind(streak.current_streak)
    .bind(streak.longest_streak)
    .bind(streak.last_completed)
    .bind(streak.weekly_quests)
    .bind(streak.monthly_quests)
    .execute(conn)
    .await?;

    Ok(())
}
