//! The reward submission service.

use std::time::Duration;

use reward_core::{
    Clock, GradingResult, QuestContext, RewardError, RewardOutcome, RewardStore, StoreError,
};
use tracing::{debug, info, warn};

/// Default number of commit attempts per submission.
const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Base delay between conflict retries; scaled by the attempt number.
const RETRY_BACKOFF: Duration = Duration::from_millis(20);

/// Coordinates one reward application end to end.
///
/// The store and clock are injected so tests can substitute fakes; the
/// service itself holds no mutable state and can be shared freely.
pub struct RewardService<S, C> {
    store: S,
    clock: C,
    max_attempts: u32,
}

impl<S: RewardStore, C: Clock> RewardService<S, C> {
    /// Create a service with the default retry budget.
    pub fn new(store: S, clock: C) -> Self {
        Self {
            store,
            clock,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Override the number of commit attempts (minimum 1).
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Apply the reward for one graded quest submission.
    ///
    /// Each attempt re-reads boosts, events, streak, and balance, so a
    /// retry after a conflict recomputes the breakdown against fresh
    /// state rather than reusing a stale one. Only
    /// [`StoreError::Conflict`] is retried; lookup failures and malformed
    /// records abort the call.
    pub async fn submit_reward(
        &self,
        user_id: &str,
        character_id: &str,
        quest: &QuestContext,
        grading: &GradingResult,
    ) -> Result<RewardOutcome, RewardError> {
        if quest.base_tokens < 0 {
            return Err(RewardError::InvalidQuest(format!(
                "quest {} has negative base reward {}",
                quest.id, quest.base_tokens
            )));
        }

        let mut last_conflict = None;

        for attempt in 1..=self.max_attempts {
            if attempt > 1 {
                tokio::time::sleep(RETRY_BACKOFF * attempt).await;
            }

            let now = self.clock.now();
            let today = self.clock.today();

            let boost = self.store.lookup_boost(character_id, now).await?;
            let boost_multiplier = boost.as_ref().map_or(1.0, |b| b.multiplier);
            let event_multiplier = self.store.lookup_event(quest.quest_type, now).await?;

            debug!(
                "Resolved multipliers for character {}: boost {}, event {}",
                character_id, boost_multiplier, event_multiplier
            );

            match self
                .store
                .commit_reward(
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
            {
                Ok(outcome) => {
                    info!(
                        "Committed reward for user {}: {} tokens (quest {}, streak {})",
                        user_id,
                        outcome.breakdown.final_tokens,
                        quest.id,
                        outcome.streak.current_streak
                    );
                    return Ok(outcome);
                }
                Err(StoreError::Conflict(detail)) => {
                    warn!(
                        "Ledger conflict for user {} (attempt {}/{}): {}",
                        user_id, attempt, self.max_attempts, detail
                    );
                    last_conflict = Some(StoreError::Conflict(detail));
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(RewardError::RetriesExhausted {
            attempts: self.max_attempts,
            last: last_conflict
                .unwrap_or_else(|| StoreError::Conflict("retry budget exhausted".to_string())),
        })
    }
}
