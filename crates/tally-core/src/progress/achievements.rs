//! Achievement catalog and predicate interpreter.
//!
//! Predicates are a tagged condition enum evaluated by a small
//! interpreter instead of closures capturing state, so the rule set can
//! be inspected and tested independently of the engine.

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use super::state::ProgressState;

/// Condition kinds an achievement can test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Condition {
    /// At least one event has ever been logged.
    FirstLog,
    /// Lifetime logged-event count reached n.
    LogEventsAtLeast { n: u64 },
    /// Current streak reached n consecutive days.
    StreakAtLeast { n: u32 },
    /// Lifetime perfect-day count reached n.
    PerfectDaysAtLeast { n: u32 },
    /// Lifetime accumulated quantity reached n.
    TotalLoggedAtLeast { n: u64 },
    /// Level reached n.
    LevelAtLeast { n: u8 },
    /// Today's accumulated quantity reached n in a single day.
    IntakeInOneDayAtLeast { n: u32 },
    /// An event was logged before the given hour (UTC).
    LoggedBeforeHour { hour: u32 },
    /// An event was logged at or after the given hour (UTC).
    LoggedAfterHour { hour: u32 },
}

impl Condition {
    /// Evaluate against the current state. `now` is the instant of the
    /// triggering event, used by the time-of-day conditions.
    pub fn holds(&self, state: &ProgressState, now: DateTime<Utc>) -> bool {
        match *self {
            Condition::FirstLog => state.stats.log_events >= 1,
            Condition::LogEventsAtLeast { n } => state.stats.log_events >= n,
            Condition::StreakAtLeast { n } => state.streak >= n,
            Condition::PerfectDaysAtLeast { n } => state.stats.perfect_days >= n,
            Condition::TotalLoggedAtLeast { n } => state.stats.total_logged >= n,
            Condition::LevelAtLeast { n } => state.level >= n,
            Condition::IntakeInOneDayAtLeast { n } => state.current_intake >= n,
            Condition::LoggedBeforeHour { hour } => now.hour() < hour,
            Condition::LoggedAfterHour { hour } => now.hour() >= hour,
        }
    }
}

/// One achievement definition.
#[derive(Debug, Clone, Copy)]
pub struct AchievementDef {
    pub id: &'static str,
    pub title: &'static str,
    pub xp_reward: u64,
    pub condition: Condition,
}

/// The fixed, ordered catalog. Unlock order in a ChangeSet follows this
/// order, and `state.achievements` keys are always a subset of these ids.
pub static CATALOG: &[AchievementDef] = &[
    AchievementDef {
        id: "first_log",
        title: "First Drop",
        xp_reward: 25,
        condition: Condition::FirstLog,
    },
    AchievementDef {
        id: "fifty_logs",
        title: "Habit Forming",
        xp_reward: 75,
        condition: Condition::LogEventsAtLeast { n: 50 },
    },
    AchievementDef {
        id: "streak_3",
        title: "Three in a Row",
        xp_reward: 50,
        condition: Condition::StreakAtLeast { n: 3 },
    },
    AchievementDef {
        id: "streak_7",
        title: "Full Week",
        xp_reward: 150,
        condition: Condition::StreakAtLeast { n: 7 },
    },
    AchievementDef {
        id: "streak_30",
        title: "Iron Month",
        xp_reward: 500,
        condition: Condition::StreakAtLeast { n: 30 },
    },
    AchievementDef {
        id: "perfect_10",
        title: "Ten Perfect Days",
        xp_reward: 200,
        condition: Condition::PerfectDaysAtLeast { n: 10 },
    },
    AchievementDef {
        id: "total_50k",
        title: "Fifty Thousand",
        xp_reward: 250,
        condition: Condition::TotalLoggedAtLeast { n: 50_000 },
    },
    AchievementDef {
        id: "level_5",
        title: "Halfway Up",
        xp_reward: 100,
        condition: Condition::LevelAtLeast { n: 5 },
    },
    AchievementDef {
        id: "big_day",
        title: "Overachiever",
        xp_reward: 100,
        condition: Condition::IntakeInOneDayAtLeast { n: 3000 },
    },
    AchievementDef {
        id: "early_bird",
        title: "Early Bird",
        xp_reward: 50,
        condition: Condition::LoggedBeforeHour { hour: 8 },
    },
];

/// Look up a catalog entry by id.
pub fn find(id: &str) -> Option<&'static AchievementDef> {
    CATALOG.iter().find(|def| def.id == id)
}
