//! Trailing-edge debounce for deciding when a rewrite pass runs.
//!
//! The engine itself never schedules anything. Hosts feed edit signals into a
//! [`Debouncer`] and poll it with the current time; it fires once the signals
//! have been quiet for the configured delay. Every new signal pushes the
//! deadline back with no upper bound. After firing, the debouncer counts as
//! in flight until [`Debouncer::finish`], so passes never overlap.
//!
//! Time is passed in explicitly, which keeps the state machine deterministic
//! and lets callers drive it from any event loop.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
    in_flight: bool,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
            in_flight: false,
        }
    }

    /// Takes effect from the next [`Debouncer::signal`].
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Records an edit, (re)starting the quiet period from `now`.
    pub fn signal(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Drops a pending fire. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// How long until a pending fire is due; `None` if nothing is pending.
    pub fn time_until_fire(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Returns true exactly once per quiet period, when it has elapsed.
    ///
    /// A `true` result marks the debouncer in flight; call
    /// [`Debouncer::finish`] when the pass (including applying its edits) is
    /// done. While in flight, signals still re-arm the deadline but `poll`
    /// stays false.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.in_flight {
            return false;
        }
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.in_flight = true;
                true
            }
            _ => false,
        }
    }

    pub fn finish(&mut self) {
        self.in_flight = false;
    }

    /// Runs `pass` if due, marking the debouncer finished afterwards.
    pub fn run_if_due<T>(&mut self, now: Instant, pass: impl FnOnce() -> T) -> Option<T> {
        if !self.poll(now) {
            return None;
        }
        let out = pass();
        self.finish();
        Some(out)
    }
}
