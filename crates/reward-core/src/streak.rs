//! Daily-completion streak state machine.
//!
//! Day comparisons are calendar-day boundaries (midnight to midnight), not
//! elapsed 24h periods: a completion at 23:59 followed by one at 00:01 the
//! next day counts as consecutive.

use chrono::NaiveDate;

use crate::types::StreakSnapshot;

/// Streak bonus tier table, keyed by the streak the user walks in with
/// (before this submission's transition is applied).
pub fn streak_bonus(current_streak: i64) -> i64 {
    match current_streak {
        s if s >= 30 => 200,
        s if s >= 14 => 100,
        s if s >= 7 => 50,
        s if s >= 3 => 10,
        _ => 0,
    }
}

impl StreakSnapshot {
    /// State after a user's very first completion.
    pub fn first_completion(today: NaiveDate) -> Self {
        Self {
            current_streak: 1,
            longest_streak: 1,
            last_completed: Some(today),
            weekly_quests: 1,
            monthly_quests: 1,
        }
    }

    /// Apply one completed submission on `today` and return the new state.
    ///
    /// Same day: only the weekly/monthly counters advance. Exactly one
    /// calendar day later: the streak extends. A gap of more than one day
    /// resets the streak to 1, leaving `longest_streak` untouched.
    pub fn advance(&self, today: NaiveDate) -> Self {
        // A record with no completion date is treated like a first
        // completion (defensive; should not occur in practice).
        let Some(last) = self.last_completed else {
            return Self::first_completion(today);
        };

        match (today - last).num_days() {
            1 => {
                let current = self.current_streak + 1;
                Self {
                    current_streak: current,
                    longest_streak: self.longest_streak.max(current),
                    last_completed: Some(today),
                    weekly_quests: self.weekly_quests + 1,
                    monthly_quests: self.monthly_quests + 1,
                }
            }
            d if d > 1 => Self {
                current_streak: 1,
                longest_streak: self.longest_streak,
                last_completed: Some(today),
                weekly_quests: 1,
                monthly_quests: 1,
            },
            // Same day; negative diffs (clock skew) are treated the same
            // rather than resetting an earned streak.
            _ => Self {
                weekly_quests: self.weekly_quests + 1,
                monthly_quests: self.monthly_quests + 1,
                ..self.clone()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn day(n: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap() + chrono::Days::new(n as u64)
    }

    #[test]
    fn tier_boundaries() {
        let cases = [
            (0, 0),
            (2, 0),
            (3, 10),
            (6, 10),
            (7, 50),
            (13, 50),
            (14, 100),
            (29, 100),
            (30, 200),
            (90, 200),
        ];
        for (streak, bonus) in cases {
            assert_eq!(streak_bonus(streak), bonus, "streak {}", streak);
        }
    }

    #[test]
    fn first_completion_initializes_everything_to_one() {
        let s = StreakSnapshot::default().advance(day(0));
        assert_eq!(s, StreakSnapshot::first_completion(day(0)));
        assert_eq!(s.current_streak, 1);
        assert_eq!(s.longest_streak, 1);
        assert_eq!(s.weekly_quests, 1);
    }

    #[test]
    fn same_day_only_bumps_counters() {
        let s = StreakSnapshot::first_completion(day(0));
        let s1 = s.advance(day(0));
        let s2 = s1.advance(day(0));

        assert_eq!(s2.current_streak, 1);
        assert_eq!(s2.longest_streak, 1);
        assert_eq!(s2.last_completed, Some(day(0)));
        assert_eq!(s2.weekly_quests, 3);
        assert_eq!(s2.monthly_quests, 3);
    }

    #[test]
    fn consecutive_day_extends_streak() {
        let mut s = StreakSnapshot::first_completion(day(0));
        for n in 1..=6 {
            s = s.advance(day(n));
        }
        assert_eq!(s.current_streak, 7);
        assert_eq!(s.longest_streak, 7);
        assert_eq!(s.last_completed, Some(day(6)));
        assert_eq!(s.weekly_quests, 7);
    }

    #[test]
    fn midnight_boundary_counts_as_consecutive() {
        // 23:59 then 00:01 the next day is a calendar-day diff of 1.
        let s = StreakSnapshot::first_completion(day(4)).advance(day(5));
        assert_eq!(s.current_streak, 2);
    }

    #[test]
    fn gap_resets_current_but_keeps_longest() {
        let mut s = StreakSnapshot::first_completion(day(0));
        for n in 1..=9 {
            s = s.advance(day(n));
        }
        assert_eq!(s.current_streak, 10);

        let after_gap = s.advance(day(15));
        assert_eq!(after_gap.current_streak, 1);
        assert_eq!(after_gap.longest_streak, 10);
        assert_eq!(after_gap.last_completed, Some(day(15)));
        assert_eq!(after_gap.weekly_quests, 1);
        assert_eq!(after_gap.monthly_quests, 1);
    }

    #[test]
    fn longest_dominates_current_under_random_gap_sequences() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let mut s = StreakSnapshot::default();
            let mut today = day(0);
            for _ in 0..60 {
                today = today + chrono::Days::new(rng.gen_range(0..=4));
                s = s.advance(today);
                assert!(
                    s.longest_streak >= s.current_streak,
                    "violated by {:?}",
                    s
                );
                assert!(s.current_streak >= 1);
            }
        }
    }
}
