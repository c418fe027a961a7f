//! Cancellable one-shot deadlines.
//!
//! All deferral in the engine (tooltip delay, pointer debounce) runs
//! through these: arm replaces any pending deadline atomically, so at
//! most one of each kind exists, and `fire` observes expiry exactly
//! once. Time is always passed in by the caller, which keeps every
//! timing test deterministic.

use std::time::{Duration, Instant};

/// A single cancellable deadline.
#[derive(Debug, Default)]
pub struct Deadline {
    at: Option<Instant>,
}

impl Deadline {
    /// Arm (or re-arm) the deadline `delay` from `now`. Any previously
    /// pending deadline is replaced.
    pub fn arm(&mut self, now: Instant, delay: Duration) {
        self.at = Some(now + delay);
    }

    pub fn cancel(&mut self) {
        self.at = None;
    }

    pub fn is_armed(&self) -> bool {
        self.at.is_some()
    }

    /// True exactly once when the deadline has passed; clears itself.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.at {
            Some(at) if now >= at => {
                self.at = None;
                true
            }
            _ => false,
        }
    }

    /// The next instant `fire` could return true, for hosts that want to
    /// schedule their next tick instead of polling.
    pub fn next_wake(&self) -> Option<Instant> {
        self.at
    }
}
