//! The progression state document.
//!
//! A single serializable aggregate owned by the running application
//! instance. It is mutated only through the rules engine and the day
//! rollover policy, and persisted after every mutation. Every field
//! carries a serde default so a document written by an older version
//! loads cleanly, merged with defaults -- same idiom as the TOML config.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::day::DayKey;

pub const GOAL_MIN: u32 = 500;
pub const GOAL_MAX: u32 = 5000;

/// One logged event: a positive quantity at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub amount: u32,
    pub at: DateTime<Utc>,
    pub day: DayKey,
}

/// Record of a single achievement unlock. Insert-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unlock {
    pub unlocked_at: DateTime<Utc>,
}

/// User-tunable preferences carried inside the state document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_true")]
    pub sound_enabled: bool,
    #[serde(default = "default_true")]
    pub notifications_enabled: bool,
    /// Minutes between reminders. Always positive.
    #[serde(default = "default_reminder_interval")]
    pub reminder_interval_min: u32,
    #[serde(default = "default_window_start")]
    pub active_window_start: NaiveTime,
    #[serde(default = "default_window_end")]
    pub active_window_end: NaiveTime,
}

/// Derived lifetime counters, kept consistent with `history` by the
/// rules engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifetimeStats {
    #[serde(default)]
    pub days_tracked: u32,
    #[serde(default)]
    pub total_logged: u64,
    #[serde(default)]
    pub perfect_days: u32,
    #[serde(default)]
    pub best_streak: u32,
    #[serde(default)]
    pub log_events: u64,
}

/// The full progression state for one tracked entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressState {
    /// Accumulated quantity for the active day. Reset by rollover.
    #[serde(default)]
    pub current_intake: u32,
    /// Target quantity per day, clamped to 500..=5000.
    #[serde(default = "default_goal")]
    pub daily_goal: u32,
    /// Cosmetic XP counter kept for display parity with `total_xp`.
    #[serde(default)]
    pub xp: u64,
    /// The sole level-determining quantity. Monotonic non-decreasing.
    #[serde(default)]
    pub total_xp: u64,
    #[serde(default = "default_level")]
    pub level: u8,
    /// Consecutive-day goal-completion counter.
    #[serde(default)]
    pub streak: u32,
    /// Calendar day of the most recent logged event.
    #[serde(default)]
    pub last_active: Option<DayKey>,
    /// Append-only audit trail. Insertion order is chronological.
    #[serde(default)]
    pub history: Vec<LogEntry>,
    /// Unlocked achievements by id. Keys are never removed.
    #[serde(default)]
    pub achievements: BTreeMap<String, Unlock>,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub stats: LifetimeStats,
}

fn default_true() -> bool {
    true
}
fn default_reminder_interval() -> u32 {
    60
}
fn default_window_start() -> NaiveTime {
    NaiveTime::from_hms_opt(8, 0, 0).expect("valid time")
}
fn default_window_end() -> NaiveTime {
    NaiveTime::from_hms_opt(22, 0, 0).expect("valid time")
}
fn default_goal() -> u32 {
    2000
}
fn default_level() -> u8 {
    1
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            notifications_enabled: true,
            reminder_interval_min: default_reminder_interval(),
            active_window_start: default_window_start(),
            active_window_end: default_window_end(),
        }
    }
}

impl Default for ProgressState {
    fn default() -> Self {
        Self {
            current_intake: 0,
            daily_goal: default_goal(),
            xp: 0,
            total_xp: 0,
            level: 1,
            streak: 0,
            last_active: None,
            history: Vec::new(),
            achievements: BTreeMap::new(),
            settings: Settings::default(),
            stats: LifetimeStats::default(),
        }
    }
}

impl ProgressState {
    /// Total quantity logged on the given calendar day, recomputed from
    /// the audit trail.
    pub fn total_for_day(&self, day: DayKey) -> u32 {
        self.history
            .iter()
            .filter(|e| e.day == day)
            .map(|e| e.amount)
            .sum()
    }

    /// Totals for the seven days ending today (oldest first).
    pub fn week_totals(&self, today: DayKey) -> [u32; 7] {
        let mut totals = [0u32; 7];
        let mut day = today;
        for slot in (0..7).rev() {
            totals[slot] = self.total_for_day(day);
            day = day.pred();
        }
        totals
    }

    /// Whether today's goal has been met.
    pub fn goal_met(&self) -> bool {
        self.current_intake >= self.daily_goal
    }

    /// Set the daily goal, clamping to the permitted 500..=5000 range.
    pub fn set_daily_goal(&mut self, goal: u32) -> u32 {
        self.daily_goal = goal.clamp(GOAL_MIN, GOAL_MAX);
        self.daily_goal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn day(d: u32) -> DayKey {
        DayKey::new(NaiveDate::from_ymd_opt(2026, 3, d).unwrap())
    }

    #[test]
    fn default_state_is_fresh() {
        let state = ProgressState::default();
        assert_eq!(state.level, 1);
        assert_eq!(state.daily_goal, 2000);
        assert!(state.last_active.is_none());
        assert!(state.history.is_empty());
    }

    #[test]
    fn goal_is_clamped() {
        let mut state = ProgressState::default();
        assert_eq!(state.set_daily_goal(100), GOAL_MIN);
        assert_eq!(state.set_daily_goal(9000), GOAL_MAX);
        assert_eq!(state.set_daily_goal(1500), 1500);
    }

    #[test]
    fn total_for_day_sums_only_matching_entries() {
        let mut state = ProgressState::default();
        let at = Utc.with_ymd_and_hms(2026, 3, 5, 9, 0, 0).unwrap();
        state.history.push(LogEntry { amount: 250, at, day: day(5) });
        state.history.push(LogEntry { amount: 500, at, day: day(5) });
        state.history.push(LogEntry { amount: 300, at, day: day(6) });
        assert_eq!(state.total_for_day(day(5)), 750);
        assert_eq!(state.total_for_day(day(6)), 300);
        assert_eq!(state.total_for_day(day(7)), 0);
    }

    #[test]
    fn week_totals_ordered_oldest_first() {
        let mut state = ProgressState::default();
        let at = Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).unwrap();
        state.history.push(LogEntry { amount: 100, at, day: day(10) });
        state.history.push(LogEntry { amount: 700, at, day: day(4) });
        let totals = state.week_totals(day(10));
        assert_eq!(totals[6], 100);
        assert_eq!(totals[0], 700);
        assert_eq!(totals[3], 0);
    }

    #[test]
    fn state_document_roundtrip() {
        let mut state = ProgressState::default();
        state.current_intake = 750;
        state.total_xp = 430;
        state.level = 3;
        state.streak = 4;
        state.last_active = Some(day(9));
        let at = Utc.with_ymd_and_hms(2026, 3, 9, 14, 30, 0).unwrap();
        state.history.push(LogEntry { amount: 750, at, day: day(9) });
        state
            .achievements
            .insert("first_log".into(), Unlock { unlocked_at: at });
        state.stats.total_logged = 750;
        state.stats.log_events = 1;

        let json = serde_json::to_string(&state).unwrap();
        let back: ProgressState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn missing_fields_merge_with_defaults() {
        // A minimal document from an older version still loads.
        let back: ProgressState = serde_json::from_str(r#"{"current_intake": 300}"#).unwrap();
        assert_eq!(back.current_intake, 300);
        assert_eq!(back.daily_goal, 2000);
        assert_eq!(back.level, 1);
        assert!(back.settings.notifications_enabled);
    }
}
