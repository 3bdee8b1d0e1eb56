//! Reward submission service for Questline.
//!
//! This crate drives the whole reward flow for one graded quest
//! submission: resolve the character's purchased boost and any active
//! event multiplier, then hand both to the store's atomic commit, which
//! calculates the reward and advances the streak in one transaction.
//! Conflicting concurrent submissions for the same user are retried a
//! bounded number of times with freshly read state.
//!
//! # Example
//!
//! ```no_run
//! use reward_engine::RewardService;
//! use reward_core::{AttributeRatings, GradingResult, QuestContext, QuestType, SystemClock};
//! # async fn example(store: impl reward_core::RewardStore) -> Result<(), reward_core::RewardError> {
//! let service = RewardService::new(store, SystemClock);
//!
//! let quest = QuestContext {
//!     id: "quest-7".to_string(),
//!     quest_type: QuestType::Daily,
//!     base_tokens: 50,
//!     token_multiplier: 1.0,
//! };
//! let grading = GradingResult {
//!     ai_score: 80,
//!     ratings: AttributeRatings { agi: 4, str: 4, dex: 4, vit: 4, int: 4 },
//! };
//!
//! let outcome = service.submit_reward("user-1", "char-1", &quest, &grading).await?;
//! println!("credited {} tokens", outcome.breakdown.final_tokens);
//! # Ok(())
//! # }
//! ```

mod service;

pub use service::RewardService;

// Re-export core types for convenience
pub use reward_core::{
    ActiveBoost, AttributeRatings, Clock, FixedClock, GradingResult, LedgerEntry, QuestContext,
    QuestType, RewardBreakdown, RewardError, RewardOutcome, RewardStore, StoreError,
    StreakSnapshot, SystemClock,
};
