//! Domain types for reward calculation.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Deadline category of a quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestType {
    /// Resets every day.
    Daily,
    /// Resets every week.
    Weekly,
    /// No deadline; can be completed at any time.
    NoDeadline,
}

impl QuestType {
    /// Canonical string form, as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestType::Daily => "daily",
            QuestType::Weekly => "weekly",
            QuestType::NoDeadline => "no_deadline",
        }
    }
}

/// Error returned when parsing an unknown quest type string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown quest type: {0}")]
pub struct UnknownQuestType(pub String);

impl std::str::FromStr for QuestType {
    type Err = UnknownQuestType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(QuestType::Daily),
            "weekly" => Ok(QuestType::Weekly),
            "no_deadline" => Ok(QuestType::NoDeadline),
            other => Err(UnknownQuestType(other.to_string())),
        }
    }
}

/// The quest being rewarded. Immutable for the duration of a calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestContext {
    /// Quest ID.
    pub id: String,
    /// Deadline category, used for event matching.
    pub quest_type: QuestType,
    /// Fixed token value configured per quest, before multipliers. Must be >= 0.
    pub base_tokens: i64,
    /// Configured per-quest multiplier. Informational; not applied by the
    /// calculator.
    pub token_multiplier: f64,
}

/// Per-attribute ratings from grading, each nominally in [1, 5].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeRatings {
    pub agi: i64,
    pub str: i64,
    pub dex: i64,
    pub vit: i64,
    pub int: i64,
}

impl AttributeRatings {
    /// Whether every attribute was rated exactly 5. Out-of-range values
    /// never qualify.
    pub fn is_perfect(&self) -> bool {
        [self.agi, self.str, self.dex, self.vit, self.int]
            .iter()
            .all(|&r| r == 5)
    }
}

/// Result of the external grading step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradingResult {
    /// Quality score in [0, 100]. Clamped defensively by the calculator.
    pub ai_score: i64,
    /// Per-attribute ratings.
    pub ratings: AttributeRatings,
}

/// A purchased, time-limited reward multiplier for one character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveBoost {
    /// Character the boost applies to.
    pub character_id: String,
    /// Reward multiplier, always > 1.
    pub multiplier: f64,
    /// When the boost stops applying.
    pub expires_at: DateTime<Utc>,
}

/// Per-user daily-completion streak state.
///
/// Mirrors the persisted streak row; the transition logic lives in
/// [`StreakSnapshot::advance`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakSnapshot {
    /// Consecutive calendar days with at least one completion.
    pub current_streak: i64,
    /// Highest `current_streak` ever reached. Always >= `current_streak`.
    pub longest_streak: i64,
    /// Calendar day of the most recent completion.
    pub last_completed: Option<NaiveDate>,
    /// Completions counted this week. Period rollover is owned by an
    /// external job, not this engine.
    pub weekly_quests: i64,
    /// Completions counted this month. Same caveat as `weekly_quests`.
    pub monthly_quests: i64,
}

/// Full audit breakdown of one reward calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardBreakdown {
    /// Quest's configured base reward.
    pub base_tokens: i64,
    /// Multiplier derived from the quality score.
    pub performance_multiplier: f64,
    /// Active purchased boost, or 1.0.
    pub boost_multiplier: f64,
    /// Best matching event multiplier, or 1.0.
    pub event_multiplier: f64,
    /// Sum of additive bonuses.
    pub bonus_tokens: i64,
    /// Final amount credited, floored once at the very end.
    pub final_tokens: i64,
    /// Human-readable labels for each bonus that applied, in order.
    pub applied_bonuses: Vec<String>,
}

/// An appended ledger entry. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Row ID.
    pub id: i64,
    /// User whose balance changed.
    pub user_id: String,
    /// Character the reward was earned with.
    pub character_id: String,
    /// Signed token delta.
    pub amount: i64,
    /// Entry category (e.g., "quest_reward").
    pub entry_type: String,
    /// Human-readable description.
    pub description: String,
    /// Balance before this entry was applied.
    pub balance_before: i64,
    /// Balance after this entry was applied.
    pub balance_after: i64,
    /// When the entry was created.
    pub created_at: DateTime<Utc>,
}

/// Everything produced by one committed reward application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardOutcome {
    /// The calculation that produced the credited amount.
    pub breakdown: RewardBreakdown,
    /// The ledger entry that was appended.
    pub transaction: LedgerEntry,
    /// The streak state after this submission's transition.
    pub streak: StreakSnapshot,
}
