//! The capability trait the persistence layer implements.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::error::StoreError;
use crate::types::{ActiveBoost, GradingResult, QuestContext, QuestType, RewardOutcome};

/// Capabilities the reward engine needs from persistence: two read-only
/// lookups and one atomic commit.
///
/// `commit_reward` is the transactional boundary. Inside one transaction
/// the implementation must read the user's pre-transition streak and
/// first-of-day flag, run the pure calculator, advance the streak, apply
/// the balance delta, and append the ledger entry — all or nothing. A
/// conflicting concurrent commit for the same user surfaces as
/// [`StoreError::Conflict`], and the engine re-runs the whole attempt
/// against fresh state.
#[async_trait]
pub trait RewardStore: Send + Sync {
    /// The currently applied, unexpired token boost for a character, if
    /// any. Missing boosts are `Ok(None)`, never an error.
    async fn lookup_boost(
        &self,
        character_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<ActiveBoost>, StoreError>;

    /// The highest multiplier among events active at `now` that apply to
    /// `quest_type`, or 1.0 when none match.
    async fn lookup_event(
        &self,
        quest_type: QuestType,
        now: DateTime<Utc>,
    ) -> Result<f64, StoreError>;

    /// Atomically compute and apply the reward for one graded submission.
    #[allow(clippy::too_many_arguments)]
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
    ) -> Result<RewardOutcome, StoreError>;
}
