//! Single-slot debouncer.
//!
//! Holds at most one pending action. Scheduling a new action replaces the
//! pending one (last write wins), and an action only becomes available once
//! its delay has elapsed. Time is passed in explicitly so the host decides how
//! often to poll.

use std::time::{Duration, Instant};

#[derive(Debug)]
struct Pending<A> {
    action: A,
    due: Instant,
}

/// Coalesces bursts of actions into the last one.
#[derive(Debug)]
pub struct Debouncer<A> {
    delay: Duration,
    pending: Option<Pending<A>>,
}

impl<A> Debouncer<A> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Schedule `action` to fire `delay` after `now`.
    ///
    /// Returns the action it replaced, if any.
    pub fn schedule(&mut self, action: A, now: Instant) -> Option<A> {
        let due = now + self.delay;
        self.pending
            .replace(Pending { action, due })
            .map(|replaced| replaced.action)
    }

    /// Take the pending action if its delay has elapsed.
    pub fn take_due(&mut self, now: Instant) -> Option<A> {
        if self.pending.as_ref().is_some_and(|p| p.due <= now) {
            self.pending.take().map(|p| p.action)
        } else {
            None
        }
    }

    /// Drop the pending action without firing it.
    pub fn cancel(&mut self) -> Option<A> {
        self.pending.take().map(|p| p.action)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
