//! Calendar-day handling and the day-rollover policy.
//!
//! Day boundaries are detected with an explicit calendar-day value type
//! rather than formatted date strings, so equality and "yesterday" are
//! well-defined regardless of locale.

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::state::ProgressState;

/// A calendar day in UTC. Ordered, comparable, serializable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayKey(pub NaiveDate);

impl DayKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// The day containing the given instant.
    pub fn from_instant(at: DateTime<Utc>) -> Self {
        Self(at.date_naive())
    }

    /// The previous calendar day.
    pub fn pred(&self) -> Self {
        Self(self.0 - Days::new(1))
    }

    /// The next calendar day.
    pub fn succ(&self) -> Self {
        Self(self.0 + Days::new(1))
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }
}

impl From<DateTime<Utc>> for DayKey {
    fn from(at: DateTime<Utc>) -> Self {
        Self::from_instant(at)
    }
}

impl std::fmt::Display for DayKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Apply the day-rollover policy. Invoked once per state load/resume.
///
/// - No last-active day: first-ever run, nothing to do.
/// - Same day: normal intra-day operation, nothing to do.
/// - Exactly yesterday: the streak survives only if yesterday's logged
///   total met the goal; today's intake starts at zero.
/// - A gap of two or more days: the streak is broken unconditionally.
///
/// Never mutates `best_streak`, `history`, or achievements.
pub fn apply_rollover(state: &mut ProgressState, today: DayKey) {
    let last = match state.last_active {
        Some(day) => day,
        None => return,
    };

    if last == today {
        return;
    }

    if last == today.pred() {
        let yesterday_total = state.total_for_day(last);
        if yesterday_total < state.daily_goal {
            state.streak = 0;
        }
    } else {
        state.streak = 0;
    }

    state.current_intake = 0;
}
