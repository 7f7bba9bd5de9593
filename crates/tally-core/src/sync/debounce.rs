//! Trailing-edge debounce for remote writes.
//!
//! Every local mutation schedules a remote put, but repeated mutations
//! inside the window collapse into a single write of the latest state:
//! scheduling cancels and replaces whatever was pending and re-arms the
//! deadline. The gateway drains the slot once the deadline passes.

use chrono::{DateTime, Duration, Utc};

use crate::progress::ProgressState;

struct Pending {
    state: ProgressState,
    due_at: DateTime<Utc>,
}

/// A single-slot, cancel-and-replace scheduled write.
pub struct DebouncedWrite {
    window: Duration,
    pending: Option<Pending>,
}

impl DebouncedWrite {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Schedule a write of `state`, replacing any pending write and
    /// restarting the window. Last write wins.
    pub fn schedule(&mut self, state: ProgressState, now: DateTime<Utc>) {
        self.pending = Some(Pending {
            state,
            due_at: now + self.window,
        });
    }

    /// Drop any pending write.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Deadline of the pending write, if any.
    pub fn due_at(&self) -> Option<DateTime<Utc>> {
        self.pending.as_ref().map(|p| p.due_at)
    }

    /// Take the pending state if its deadline has passed.
    pub fn take_due(&mut self, now: DateTime<Utc>) -> Option<ProgressState> {
        if self.pending.as_ref()?.due_at <= now {
            self.pending.take().map(|p| p.state)
        } else {
            None
        }
    }

    /// Take the pending state regardless of deadline (explicit flush).
    pub fn take_now(&mut self) -> Option<ProgressState> {
        self.pending.take().map(|p| p.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_770_000_000 + secs, 0).unwrap()
    }

    fn state_with_xp(xp: u64) -> ProgressState {
        let mut s = ProgressState::default();
        s.total_xp = xp;
        s
    }

    #[test]
    fn nothing_due_before_window_elapses() {
        let mut dw = DebouncedWrite::new(Duration::seconds(2));
        dw.schedule(state_with_xp(1), at(0));
        assert!(dw.is_pending());
        assert!(dw.take_due(at(1)).is_none());
        assert!(dw.is_pending());
    }

    #[test]
    fn due_after_window() {
        let mut dw = DebouncedWrite::new(Duration::seconds(2));
        dw.schedule(state_with_xp(1), at(0));
        let taken = dw.take_due(at(2)).unwrap();
        assert_eq!(taken.total_xp, 1);
        assert!(!dw.is_pending());
    }

    #[test]
    fn reschedule_resets_timer_and_keeps_latest() {
        let mut dw = DebouncedWrite::new(Duration::seconds(2));
        dw.schedule(state_with_xp(1), at(0));
        dw.schedule(state_with_xp(2), at(1));

        // The first deadline has passed but the replacement re-armed it.
        assert!(dw.take_due(at(2)).is_none());
        let taken = dw.take_due(at(3)).unwrap();
        assert_eq!(taken.total_xp, 2);
    }

    #[test]
    fn cancel_clears_pending() {
        let mut dw = DebouncedWrite::new(Duration::seconds(2));
        dw.schedule(state_with_xp(1), at(0));
        dw.cancel();
        assert!(dw.take_due(at(10)).is_none());
    }

    #[test]
    fn take_now_ignores_deadline() {
        let mut dw = DebouncedWrite::new(Duration::seconds(2));
        dw.schedule(state_with_xp(7), at(0));
        assert_eq!(dw.take_now().unwrap().total_xp, 7);
        assert!(!dw.is_pending());
    }
}
