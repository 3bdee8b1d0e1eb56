//! The atomic reward commit.
//!
//! One SQLite transaction covers the whole read-modify-write: the
//! pre-transition streak and first-of-day flag are read, the pure
//! calculator runs on them, and the streak upsert, balance update, and
//! ledger append all land together or not at all. Two concurrent commits
//! for the same user serialize on SQLite's write lock; the loser surfaces
//! as a BUSY/LOCKED error that the engine maps to a retryable conflict.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::{streak, transaction};
use reward_core::calculator::calculate_reward;
use reward_core::{
    GradingResult, LedgerEntry, QuestContext, RewardOutcome, StreakSnapshot,
};

/// Ledger entry category for quest rewards.
pub const QUEST_REWARD_ENTRY: &str = "quest_reward";

/// Compute and apply the reward for one graded submission.
///
/// `boost_multiplier` and `event_multiplier` come from the lookups the
/// engine ran just before; everything else is read inside the transaction
/// so a retry recomputes against fresh state. The first-of-day flag falls
/// out of the streak record: the user has already completed a quest today
/// exactly when `last_completed_date` is today.
#[allow(clippy::too_many_arguments)]
pub async fn commit_reward(
    pool: &SqlitePool,
    user_id: &str,
    character_id: &str,
    quest: &QuestContext,
    grading: &GradingResult,
    boost_multiplier: f64,
    event_multiplier: f64,
    now: DateTime<Utc>,
    today: NaiveDate,
) -> Result<RewardOutcome> {
    let mut tx = pool.begin().await?;

    let streak_before: StreakSnapshot = streak::load(&mut tx, user_id)
        .await?
        .map(StreakSnapshot::from)
        .unwrap_or_default();
    let first_of_day = streak_before.last_completed != Some(today);

    let breakdown = calculate_reward(
        quest,
        grading,
        boost_multiplier,
        event_multiplier,
        first_of_day,
        streak_before.current_streak,
    );
    let streak_after = streak_before.advance(today);

    let balance_after = sqlx::query_scalar::<_, i64>(
        r#"
        UPDATE users
        SET tokens = tokens + ?
        WHERE id = ?
        RETURNING tokens
        "#,
    )
    .bind(breakdown.final_tokens)
    .bind(user_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "User",
        id: user_id.to_string(),
    })?;
    let balance_before = balance_after - breakdown.final_tokens;

    streak::save(&mut tx, user_id, &streak_after).await?;

    let metadata = serde_json::to_string(&breakdown).map_err(|e| DatabaseError::Malformed {
        entity: "TokenTransaction",
        detail: format!("breakdown metadata: {}", e),
    })?;
    let description = format!("Quest reward: {}", quest.id);
    let entry = transaction::NewEntry {
        user_id,
        character_id,
        amount: breakdown.final_tokens,
        entry_type: QUEST_REWARD_ENTRY,
        description: &description,
        metadata: Some(&metadata),
        balance_before,
        balance_after,
    };
    let id = transaction::insert(&mut tx, &entry, now).await?;

    tx.commit().await?;

    tracing::debug!(
        "Applied reward entry {} for user {}: {} tokens ({} -> {})",
        id,
        user_id,
        breakdown.final_tokens,
        balance_before,
        balance_after
    );

    Ok(RewardOutcome {
        breakdown,
        transaction: LedgerEntry {
            id,
            user_id: user_id.to_string(),
            character_id: character_id.to_string(),
            amount: entry.amount,
            entry_type: QUEST_REWARD_ENTRY.to_string(),
            description,
            balance_before,
            balance_after,
            created_at: now,
        },
        streak: streak_after,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{character, user, Database};
    use chrono::TimeZone;
    use reward_core::{AttributeRatings, QuestType, RewardBreakdown};

    async fn test_db() -> Database {
        let db = Database::connect_with_pool_size("sqlite::memory:", 1)
            .await
            .unwrap();
        db.migrate().await.unwrap();
        user::create_user(db.pool(), "user-1", "Alice").await.unwrap();
        character::create_character(db.pool(), "char-1", "user-1", "warrior")
            .await
            .unwrap();
        db
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, 18, 30, 0).unwrap()
    }

    fn today() -> NaiveDate {
        now().date_naive()
    }

    fn quest(base_tokens: i64) -> QuestContext {
        QuestContext {
            id: "quest-7".to_string(),
            quest_type: QuestType::Daily,
            base_tokens,
            token_multiplier: 1.0,
        }
    }

    fn grading(ai_score: i64, rating: i64) -> GradingResult {
        GradingResult {
            ai_score,
            ratings: AttributeRatings {
                agi: rating,
                str: rating,
                dex: rating,
                vit: rating,
                int: rating,
            },
        }
    }

    #[tokio::test]
    async fn applies_balance_streak_and_ledger_entry_together() {
        let db = test_db().await;
        let pool = db.pool();

        let outcome = commit_reward(
            pool, "user-1", "char-1", &quest(50), &grading(80, 4), 1.0, 1.0, now(), today(),
        )
        .await
        .unwrap();

        assert_eq!(outcome.breakdown.final_tokens, 95);
        assert_eq!(outcome.transaction.balance_before, 0);
        assert_eq!(outcome.transaction.balance_after, 95);
        assert_eq!(outcome.streak.current_streak, 1);

        assert_eq!(user::get_balance(pool, "user-1").await.unwrap(), 95);

        let row = streak::get_streak(pool, "user-1").await.unwrap().unwrap();
        assert_eq!(row.current_streak, 1);
        assert_eq!(row.last_completed_date, Some(today()));

        let entries = transaction::list_transactions(pool, "user-1", 10).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].amount, 95);
        assert_eq!(entries[0].entry_type, QUEST_REWARD_ENTRY);

        // The breakdown is preserved as JSON metadata for auditability.
        let stored: RewardBreakdown =
            serde_json::from_str(entries[0].metadata.as_deref().unwrap()).unwrap();
        assert_eq!(stored, outcome.breakdown);
    }

    #[tokio::test]
    async fn same_day_commit_skips_first_of_day_bonus() {
        let db = test_db().await;
        let pool = db.pool();

        commit_reward(
            pool, "user-1", "char-1", &quest(50), &grading(80, 4), 1.0, 1.0, now(), today(),
        )
        .await
        .unwrap();
        let second = commit_reward(
            pool, "user-1", "char-1", &quest(50), &grading(80, 4), 1.0, 1.0, now(), today(),
        )
        .await
        .unwrap();

        assert!(second.breakdown.applied_bonuses.is_empty());
        assert_eq!(second.breakdown.final_tokens, 85);
        assert_eq!(second.transaction.balance_before, 95);
        assert_eq!(second.streak.current_streak, 1);
        assert_eq!(second.streak.weekly_quests, 2);
    }

    #[tokio::test]
    async fn failed_commit_leaves_no_partial_state() {
        let db = test_db().await;
        let pool = db.pool();

        commit_reward(
            pool, "user-1", "char-1", &quest(50), &grading(80, 4), 1.0, 1.0, now(), today(),
        )
        .await
        .unwrap();

        // Force a failure after the balance update and streak upsert have
        // already executed inside the transaction.
        sqlx::query(
            r#"
            CREATE TRIGGER inject_fault BEFORE INSERT ON token_transactions
            BEGIN
                SELECT RAISE(ABORT, 'injected fault');
            END
            "#,
        )
        .execute(pool)
        .await
        .unwrap();

        let result = commit_reward(
            pool, "user-1", "char-1", &quest(50), &grading(80, 4), 1.0, 1.0, now(), today(),
        )
        .await;
        assert!(result.is_err());

        // Balance, streak, and ledger all reverted together.
        assert_eq!(user::get_balance(pool, "user-1").await.unwrap(), 95);
        let row = streak::get_streak(pool, "user-1").await.unwrap().unwrap();
        assert_eq!(row.weekly_quests, 1);
        assert_eq!(
            transaction::count_transactions(pool, "user-1").await.unwrap(),
            1
        );

        // Once the fault is removed the same commit goes through.
        sqlx::query("DROP TRIGGER inject_fault").execute(pool).await.unwrap();
        commit_reward(
            pool, "user-1", "char-1", &quest(50), &grading(80, 4), 1.0, 1.0, now(), today(),
        )
        .await
        .unwrap();
        assert_eq!(user::get_balance(pool, "user-1").await.unwrap(), 180);
    }

    #[tokio::test]
    async fn unknown_user_is_rejected() {
        let db = test_db().await;

        let result = commit_reward(
            db.pool(), "ghost", "char-1", &quest(50), &grading(80, 4), 1.0, 1.0, now(), today(),
        )
        .await;
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));
    }

    #[tokio::test]
    async fn consecutive_day_extends_streak_and_pays_pre_transition_tier() {
        let db = test_db().await;
        let pool = db.pool();

        // Walk a three-day streak, one commit per day.
        let mut day = today();
        for _ in 0..3 {
            commit_reward(
                pool, "user-1", "char-1", &quest(100), &grading(100, 3), 1.0, 1.0, now(), day,
            )
            .await
            .unwrap();
            day = day.succ_opt().unwrap();
        }

        // Fourth day: the user walks in with streak 3, so tier +10 applies.
        let outcome = commit_reward(
            pool, "user-1", "char-1", &quest(100), &grading(100, 3), 1.0, 1.0, now(), day,
        )
        .await
        .unwrap();

        assert_eq!(outcome.streak.current_streak, 4);
        assert_eq!(outcome.streak.longest_streak, 4);
        assert!(outcome
            .breakdown
            .applied_bonuses
            .contains(&"Streak Bonus (3 days) +10".to_string()));
    }
}
