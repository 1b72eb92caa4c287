//! Debounce timer for suggestion fetches
//!
//! A single deadline slot: each schedule replaces the previous deadline, so
//! only the most recently scheduled fetch ever fires. Time is passed in
//! explicitly so tests can drive the timer with synthetic instants.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            deadline: None,
        }
    }

    /// Schedule (or reschedule) the deadline at `now + delay`.
    ///
    /// Any previously pending deadline is replaced; this is the only
    /// cancellation primitive the controller needs.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Drop any pending deadline without firing it.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_ready(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| now >= deadline)
    }

    /// Consume a due deadline. Returns `true` exactly once per schedule.
    pub fn take_ready(&mut self, now: Instant) -> bool {
        if self.is_ready(now) {
            self.deadline = None;
            true
        } else {
            false
        }
    }

    pub fn has_pending(&self) -> bool {
        self.deadline.is_some()
    }
}

#[cfg(test)]
#[path = "debouncer_tests.rs"]
mod debouncer_tests;
