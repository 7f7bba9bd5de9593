//! Progression domain: state model, rules engine, level table,
//! achievement catalog, and the day-rollover policy.

pub mod achievements;
pub mod day;
pub mod engine;
pub mod levels;
pub mod reminder;
pub mod state;

pub use achievements::{AchievementDef, Condition, CATALOG};
pub use day::{apply_rollover, DayKey};
pub use engine::{achievement_title, evaluate_achievements, grant_xp, log_intake, ChangeSet, LevelChange};
pub use levels::{level_for_xp, level_progress, title_for_level, xp_to_next, Level, LEVELS, MAX_LEVEL};
pub use reminder::is_within_active_window;
pub use state::{LifetimeStats, LogEntry, ProgressState, Settings, Unlock, GOAL_MAX, GOAL_MIN};
