//! Clock-driven debounce gate.
//!
//! # Responsibility
//! - Hold back keystroke-driven work until a quiet period has elapsed.
//!
//! # Invariants
//! - At most one payload is pending; a new trigger replaces it and resets the
//!   deadline.
//! - Time only advances through the `Instant`s callers pass in, so any timer
//!   primitive (event loop tick, test step) can drive it.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct Pending<T> {
    due_at: Instant,
    payload: T,
}

/// Delays a payload until `delay` has passed since the last trigger.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedules `payload`, cancelling whatever was pending.
    pub fn trigger(&mut self, now: Instant, payload: T) {
        self.pending = Some(Pending {
            due_at: now + self.delay,
            payload,
        });
    }

    /// Releases the pending payload once its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|pending| now >= pending.due_at);
        if due {
            self.flush()
        } else {
            None
        }
    }

    /// Releases the pending payload immediately.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|pending| pending.payload)
    }

    /// Drops the pending payload without running it.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Deadline of the pending payload, for hosts that arm a real timer.
    pub fn due_at(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.due_at)
    }
}
