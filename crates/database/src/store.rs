//! `RewardStore` implementation over the SQLite layer.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;

use crate::{boost, event, ledger};
use reward_core::{
    ActiveBoost, GradingResult, QuestContext, QuestType, RewardOutcome, RewardStore, StoreError,
};

/// Production reward store backed by the SQLite pool.
///
/// Lock contention from concurrent same-user commits surfaces as
/// [`StoreError::Conflict`]; everything else maps per
/// [`DatabaseError`](crate::DatabaseError)'s classification.
#[derive(Debug, Clone)]
pub struct SqliteRewardStore {
    pool: SqlitePool,
}

impl SqliteRewardStore {
    /// Wrap a connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a reference to the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl RewardStore for SqliteRewardStore {
    async fn lookup_boost(
        &self,
        character_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<ActiveBoost>, StoreError> {
        boost::active_boost(&self.pool, character_id, now)
            .await
            .map_err(StoreError::from)
    }

    async fn lookup_event(
        &self,
        quest_type: QuestType,
        now: DateTime<Utc>,
    ) -> Result<f64, StoreError> {
        event::active_event_multiplier(&self.pool, quest_type, now)
            .await
            .map_err(StoreError::from)
    }

    async fn commit_reward(
        &self,
        user_id: &str,
        character_id: &str,
        quest: &QuestContext,
        grading: &GradingResult,
        boost_multiplier: f64,
        event_multiplier: f64,
        now: DateTime<Utc>,
        today: NaiveDate,
    ) -> Result<RewardOutcome, StoreError> {
        ledger::commit_reward(
            &self.pool,
            user_id,
            character_id,
            quest,
            grading,
            boost_multiplier,
            event_multiplier,
            now,
            today,
        )
        .await
        .map_err(StoreError::from)
    }
}
