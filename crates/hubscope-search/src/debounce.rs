//! Debounce scheduler.
//!
//! Coalesces rapid input changes into a single deferred trigger. The
//! scheduler holds at most one pending edit; each new edit replaces it and
//! restarts the delay window, so intermediate queries never fire. The owner
//! polls [`DebounceScheduler::due`] from its tick handler.
//!
//! Time is passed in explicitly so the window is testable without sleeping.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct Pending {
    query: String,
    deadline: Instant,
}

/// Fixed-delay edit coalescer.
#[derive(Debug, Clone)]
pub struct DebounceScheduler {
    delay: Duration,
    pending: Option<Pending>,
}

impl DebounceScheduler {
    /// Create a scheduler with the given quiet period.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Record an edit, restarting the delay window.
    ///
    /// Any previously pending query is dropped; only the value present when
    /// the window elapses will trigger. Empty queries flow through like any
    /// other edit — the trigger handles them without a network call.
    pub fn note_edit(&mut self, query: impl Into<String>, now: Instant) {
        self.pending = Some(Pending {
            query: query.into(),
            deadline: now + self.delay,
        });
    }

    /// Take the pending query if its window has elapsed.
    ///
    /// Yields each armed edit at most once.
    pub fn due(&mut self, now: Instant) -> Option<String> {
        if self.pending.as_ref().is_some_and(|p| now >= p.deadline) {
            self.pending.take().map(|p| p.query)
        } else {
            None
        }
    }

    /// Drop any pending edit without firing it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Whether an edit is waiting for its window to elapse.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// The configured quiet period.
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(500);

    #[test]
    fn fires_once_after_quiet_period() {
        let mut debounce = DebounceScheduler::new(DELAY);
        let t0 = Instant::now();
        debounce.note_edit("test", t0);
        assert_eq!(debounce.due(t0 + Duration::from_millis(499)), None);
        assert_eq!(debounce.due(t0 + DELAY), Some("test".to_owned()));
        // Fired exactly once.
        assert_eq!(debounce.due(t0 + Duration::from_secs(10)), None);
        assert!(!debounce.is_armed());
    }

    #[test]
    fn rapid_edits_collapse_to_last_value() {
        let mut debounce = DebounceScheduler::new(DELAY);
        let t0 = Instant::now();
        let step = Duration::from_millis(100);
        for (i, q) in ["t", "te", "tes", "test"].iter().enumerate() {
            debounce.note_edit(*q, t0 + step * i as u32);
        }
        // The window restarts from the last edit at t0+300ms.
        let last_edit = t0 + step * 3;
        assert_eq!(debounce.due(last_edit + Duration::from_millis(499)), None);
        assert_eq!(debounce.due(last_edit + DELAY), Some("test".to_owned()));
        assert_eq!(debounce.due(last_edit + DELAY * 2), None);
    }

    #[test]
    fn new_edit_replaces_pending_window() {
        let mut debounce = DebounceScheduler::new(DELAY);
        let t0 = Instant::now();
        debounce.note_edit("old", t0);
        debounce.note_edit("new", t0 + Duration::from_millis(400));
        // The old deadline has passed, but "old" was superseded.
        assert_eq!(debounce.due(t0 + DELAY), None);
        assert_eq!(
            debounce.due(t0 + Duration::from_millis(400) + DELAY),
            Some("new".to_owned())
        );
    }

    #[test]
    fn cancel_drops_pending_edit() {
        let mut debounce = DebounceScheduler::new(DELAY);
        let t0 = Instant::now();
        debounce.note_edit("test", t0);
        debounce.cancel();
        assert!(!debounce.is_armed());
        assert_eq!(debounce.due(t0 + DELAY), None);
    }

    #[test]
    fn empty_query_still_schedules() {
        let mut debounce = DebounceScheduler::new(DELAY);
        let t0 = Instant::now();
        debounce.note_edit("", t0);
        assert!(debounce.is_armed());
        assert_eq!(debounce.due(t0 + DELAY), Some(String::new()));
    }
}
