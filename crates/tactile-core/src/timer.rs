//! Cooperative single-shot timers.
//!
//! Timers never fire on their own: whoever owns one polls it with the current
//! time from the event loop (see `TouchDispatcher::process_timers`).

/// Interval used to express "never time out".
pub const UNBOUNDED_INTERVAL_MS: i64 = i64::MAX;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SingleShotTimer {
    interval_ms: i64,
    started_at: Option<i64>,
}

impl SingleShotTimer {
    pub fn new(interval_ms: i64) -> Self {
        Self {
            interval_ms: interval_ms.max(0),
            started_at: None,
        }
    }

    pub fn interval_ms(&self) -> i64 {
        self.interval_ms
    }

    /// Changing the interval of a running timer moves its deadline.
    pub fn set_interval_ms(&mut self, interval_ms: i64) {
        self.interval_ms = interval_ms.max(0);
    }

    /// (Re)starts the countdown from `now`.
    pub fn start(&mut self, now: i64) {
        self.started_at = Some(now);
    }

    pub fn stop(&mut self) {
        self.started_at = None;
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn deadline(&self) -> Option<i64> {
        self.started_at
            .map(|started| started.saturating_add(self.interval_ms))
    }

    /// Returns true exactly once when the deadline has been reached, stopping
    /// the timer.
    pub fn take_expired(&mut self, now: i64) -> bool {
        match self.deadline() {
            Some(deadline) if now >= deadline => {
                self.started_at = None;
                true
            }
            _ => false,
        }
    }
}
