//! Pure reward calculation.
//!
//! Converts a graded submission plus its resolved multipliers into a final
//! token amount with a full audit breakdown. No I/O, no clock access: the
//! caller resolves boosts, events, the first-of-day flag, and the
//! pre-transition streak value before calling in.

use crate::streak::streak_bonus;
use crate::types::{GradingResult, QuestContext, RewardBreakdown};

/// Fraction of the base reward granted when all five ratings are exactly 5.
pub const PERFECT_SCORE_BONUS_RATE: f64 = 0.3;

/// Fraction of the base reward granted on the first completion of a
/// calendar day.
pub const FIRST_QUEST_BONUS_RATE: f64 = 0.2;

/// Map a 0-100 quality score onto the performance multiplier.
///
/// Linear: score 0 -> 0.5x, score 100 -> 2.0x. Scores outside [0, 100]
/// are clamped first.
pub fn performance_multiplier(ai_score: i64) -> f64 {
    let score = ai_score.clamp(0, 100) as f64;
    0.5 + (score / 100.0) * 1.5
}

/// Compute the token reward for one graded submission.
///
/// Multiplicative factors compose before bonuses are added, and a single
/// floor is applied at the very end:
///
/// `final = floor(base * performance * boost * event + bonuses)`
///
/// `streak_before` is the user's streak *walking into* this submission,
/// i.e. before the day's transition is applied. Deterministic given its
/// inputs; never returns a negative amount for a non-negative base.
pub fn calculate_reward(
    quest: &QuestContext,
    grading: &GradingResult,
    boost_multiplier: f64,
    event_multiplier: f64,
    first_of_day: bool,
    streak_before: i64,
) -> RewardBreakdown {
    let base = quest.base_tokens;
    let performance = performance_multiplier(grading.ai_score);

    let mut bonus_tokens: i64 = 0;
    let mut applied_bonuses = Vec::new();

    if grading.ratings.is_perfect() {
        bonus_tokens += (base as f64 * PERFECT_SCORE_BONUS_RATE).floor() as i64;
        applied_bonuses.push("Perfect Score Bonus +30%".to_string());
    }

    if first_of_day {
        bonus_tokens += (base as f64 * FIRST_QUEST_BONUS_RATE).floor() as i64;
        applied_bonuses.push("First Quest of the Day +20%".to_string());
    }

    let tier = streak_bonus(streak_before);
    if tier > 0 {
        bonus_tokens += tier;
        applied_bonuses.push(format!("Streak Bonus ({} days) +{}", streak_before, tier));
    }

    bonus_tokens += job_class_bonus(quest);

    let final_tokens = (base as f64 * performance * boost_multiplier * event_multiplier
        + bonus_tokens as f64)
        .floor() as i64;

    RewardBreakdown {
        base_tokens: base,
        performance_multiplier: performance,
        boost_multiplier,
        event_multiplier,
        bonus_tokens,
        final_tokens,
        applied_bonuses,
    }
}

/// Bonus for completing a quest matching the character's job class.
///
/// Quests carry no preferred job class yet, so this always contributes 0.
/// Kept as the extension point for when quest metadata grows one.
fn job_class_bonus(_quest: &QuestContext) -> i64 {
    0
}
