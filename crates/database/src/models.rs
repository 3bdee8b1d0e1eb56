//! Database models.

use chrono::NaiveDate;
use reward_core::StreakSnapshot;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A user account owning the token balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    /// User UUID (e.g., "c27fb365-0c84-4cf2-8555-814bb065e448")
    pub id: String,
    /// Display name
    pub name: String,
    /// Current token balance. Mutated only through the ledger.
    pub tokens: i64,
    /// Creation timestamp.
    pub created_at: String,
}

/// A character belonging to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Character {
    /// Character UUID.
    pub id: String,
    /// Owning user.
    pub user_id: String,
    /// Job class identifier (e.g., "warrior", "mage").
    pub job_class_id: String,
    /// Creation timestamp.
    pub created_at: String,
}

/// Per-user streak record. One row per user, never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct QuestStreak {
    /// Owning user.
    pub user_id: String,
    /// Consecutive calendar days with at least one completion.
    pub current_streak: i64,
    /// Highest streak ever reached.
    pub longest_streak: i64,
    /// Calendar day of the most recent completion.
    pub last_completed_date: Option<NaiveDate>,
    /// Completions this week (reset cadence owned by an external job).
    pub weekly_quests: i64,
    /// Completions this month (same caveat).
    pub monthly_quests: i64,
    /// Last update timestamp.
    pub updated_at: String,
}

impl From<QuestStreak> for StreakSnapshot {
    fn from(row: QuestStreak) -> Self {
        StreakSnapshot {
            current_streak: row.current_streak,
            longest_streak: row.longest_streak,
            last_completed: row.last_completed_date,
            weekly_quests: row.weekly_quests,
            monthly_quests: row.monthly_quests,
        }
    }
}

/// An append-only token ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct TokenTransaction {
    /// Auto-incrementing ID.
    pub id: i64,
    /// User whose balance changed.
    pub user_id: String,
    /// Character the tokens were earned with.
    pub character_id: String,
    /// Signed token delta.
    pub amount: i64,
    /// Entry category (e.g., "quest_reward").
    pub entry_type: String,
    /// Human-readable description.
    pub description: String,
    /// JSON reward breakdown, for auditability.
    pub metadata: Option<String>,
    /// Balance before this entry.
    pub balance_before: i64,
    /// Balance after this entry.
    pub balance_after: i64,
    /// Creation timestamp (RFC 3339).
    pub created_at: String,
}

/// A purchased boost row, as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CharacterBoost {
    /// Auto-incrementing ID.
    pub id: i64,
    /// Character the boost was purchased for.
    pub character_id: String,
    /// Purchase category; only "token_boost" rows affect rewards.
    pub category: String,
    /// Purchase status; only "completed" rows affect rewards.
    pub status: String,
    /// Reward multiplier. Must be > 1 to be honored.
    pub multiplier: f64,
    /// When the boost was applied; null means never activated.
    pub applied_at: Option<String>,
    /// Expiry timestamp (RFC 3339).
    pub expires_at: String,
    /// Creation timestamp.
    pub created_at: String,
}

/// A global multiplier event row, as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct QuestEvent {
    /// Auto-incrementing ID.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// JSON array of quest type strings this event applies to.
    pub quest_types: String,
    /// Reward multiplier. Must be > 1 to be honored.
    pub multiplier: f64,
    /// Window start (RFC 3339).
    pub starts_at: String,
    /// Window end (RFC 3339).
    pub ends_at: String,
    /// Whether the event is enabled at all.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: String,
}
