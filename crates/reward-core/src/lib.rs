//! Core types and logic for the Questline reward engine.
//!
//! This crate provides the shared interface for the reward subsystem:
//!
//! - [`calculator`] - Pure reward calculation from a graded submission
//! - [`StreakSnapshot`] - The daily-completion streak state machine
//! - [`RewardStore`] - The trait the persistence layer implements
//! - [`Clock`] - Injectable time source for expiry and day-boundary checks
//! - [`RewardError`] / [`StoreError`] - Error types for reward operations
//!
//! No I/O happens here; everything in this crate is deterministic given its
//! inputs. The `database` crate implements [`RewardStore`] over SQLite and
//! the `engine` crate drives the whole flow.
//!
//! # Example
//!
//! ```rust
//! use reward_core::calculator::calculate_reward;
//! use reward_core::{AttributeRatings, GradingResult, QuestContext, QuestType};
//!
//! let quest = QuestContext {
//!     id: "quest-1".to_string(),
//!     quest_type: QuestType::Daily,
//!     base_tokens: 100,
//!     token_multiplier: 1.0,
//! };
//! let grading = GradingResult {
//!     ai_score: 100,
//!     ratings: AttributeRatings { agi: 3, str: 3, dex: 3, vit: 3, int: 3 },
//! };
//!
//! let breakdown = calculate_reward(&quest, &grading, 1.0, 1.0, false, 0);
//! assert_eq!(breakdown.final_tokens, 200);
//! ```

pub mod calculator;
mod clock;
mod error;
mod store;
mod streak;
mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{RewardError, StoreError};
pub use store::RewardStore;
pub use streak::streak_bonus;
pub use types::{
    ActiveBoost, AttributeRatings, GradingResult, LedgerEntry, QuestContext, QuestType,
    RewardBreakdown, RewardOutcome, StreakSnapshot, UnknownQuestType,
};

// Re-export async_trait for implementors of `RewardStore`
pub use async_trait::async_trait;
