//! Cancellable delayed trigger for search-as-you-type.
//!
//! Deterministic: callers pass the current `Instant`, and the host sleeps
//! until [`SearchDebounce::deadline`]. Each new input replaces the pending
//! deadline, so only the last keystroke of a burst fires.

use std::time::{Duration, Instant};

pub const DEFAULT_SEARCH_DELAY: Duration = Duration::from_millis(300);

#[derive(Debug, Clone)]
pub struct SearchDebounce {
    delay: Duration,
    pending: Option<Instant>,
}

impl Default for SearchDebounce {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DELAY)
    }
}

impl SearchDebounce {
    pub fn new(delay: Duration) -> Self {
        Self { delay, pending: None }
    }

    /// Cancel any pending trigger and schedule a new one `delay` after `now`.
    pub fn schedule(&mut self, now: Instant) {
        self.pending = Some(now + self.delay);
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending
    }

    /// Consume the pending trigger if it is due at `now`.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.pending {
            Some(deadline) if now >= deadline => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }
}
