//! Active-window predicate consumed by the reminder scheduler.
//!
//! Scheduling itself is outside the core; only the window test lives
//! here because it depends on the user's settings.

use chrono::NaiveTime;

use super::state::Settings;

/// Whether `t` falls inside the active window `[start, end)`.
///
/// A window whose start is after its end wraps midnight: 22:00..06:00
/// covers late evening and early morning.
pub fn is_within_active_window(t: NaiveTime, start: NaiveTime, end: NaiveTime) -> bool {
    if start <= end {
        start <= t && t < end
    } else {
        t >= start || t < end
    }
}

impl Settings {
    /// Window test against these settings.
    pub fn in_active_window(&self, t: NaiveTime) -> bool {
        is_within_active_window(t, self.active_window_start, self.active_window_end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn normal_window() {
        let (start, end) = (t(8, 0), t(22, 0));
        assert!(is_within_active_window(t(8, 0), start, end));
        assert!(is_within_active_window(t(12, 30), start, end));
        assert!(!is_within_active_window(t(22, 0), start, end));
        assert!(!is_within_active_window(t(7, 59), start, end));
    }

    #[test]
    fn wrapping_window_crosses_midnight() {
        let (start, end) = (t(22, 0), t(6, 0));
        assert!(is_within_active_window(t(23, 0), start, end));
        assert!(is_within_active_window(t(2, 0), start, end));
        assert!(!is_within_active_window(t(12, 0), start, end));
        assert!(!is_within_active_window(t(6, 0), start, end));
    }

    #[test]
    fn settings_default_window() {
        let settings = Settings::default();
        assert!(settings.in_active_window(t(9, 0)));
        assert!(!settings.in_active_window(t(23, 30)));
    }
}
