//! Query debouncing.
//!
//! [`Debouncer`] holds at most one scheduled action. Scheduling replaces
//! whatever was pending, so only the last call in a burst ever fires. Nothing
//! here sleeps or spawns: the event loop asks for [`Debouncer::next_deadline`]
//! to bound its poll timeout and calls [`Debouncer::take_due`] on every tick.
//!
//! Time comes from an injected [`Clock`] so tests can drive it by hand.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall clock backed by [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Hand-driven clock for tests and replays.
///
/// Clones share the same time, so a test can keep one handle and give another
/// to the component under test.
///
/// # Examples
///
/// ```
/// use sysref::search::debounce::{Clock, ManualClock};
/// use std::time::Duration;
///
/// let clock = ManualClock::new();
/// let start = clock.now();
/// clock.advance(Duration::from_millis(300));
/// assert_eq!(clock.now() - start, Duration::from_millis(300));
/// ```
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    elapsed: Arc<Mutex<Duration>>,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            elapsed: Arc::new(Mutex::new(Duration::ZERO)),
        }
    }

    /// Moves time forward by `by`.
    pub fn advance(&self, by: Duration) {
        let mut elapsed = self.elapsed.lock().unwrap_or_else(PoisonError::into_inner);
        *elapsed += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        let elapsed = *self.elapsed.lock().unwrap_or_else(PoisonError::into_inner);
        self.origin + elapsed
    }
}

/// A single-slot timer arena.
///
/// `A` is whatever the owner wants handed back when the timer fires.
pub struct Debouncer<A> {
    clock: Arc<dyn Clock>,
    pending: Option<(Instant, A)>,
}

impl<A> Debouncer<A> {
    /// Creates an idle debouncer reading time from `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock, pending: None }
    }

    /// Arms the timer to release `action` after `delay`.
    ///
    /// Any pending action is dropped unfired. A zero delay follows the same
    /// rule and becomes due on the next [`take_due`](Self::take_due).
    pub fn schedule(&mut self, delay: Duration, action: A) {
        let deadline = self.clock.now() + delay;
        if self.pending.replace((deadline, action)).is_some() {
            tracing::trace!("debounce timer superseded");
        }
    }

    /// Drops the pending action, if any, without firing it.
    pub fn cancel_all(&mut self) {
        if self.pending.take().is_some() {
            tracing::trace!("debounce timer cancelled");
        }
    }

    /// Returns `true` while an action is armed.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Instant at which the pending action becomes due.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(deadline, _)| *deadline)
    }

    /// Time left until the pending action is due, zero if already due.
    #[must_use]
    pub fn time_until_due(&self) -> Option<Duration> {
        self.next_deadline()
            .map(|deadline| deadline.saturating_duration_since(self.clock.now()))
    }

    /// Releases the pending action if its deadline has passed.
    pub fn take_due(&mut self) -> Option<A> {
        let now = self.clock.now();
        match &self.pending {
            Some((deadline, _)) if *deadline <= now => self.pending.take().map(|(_, action)| action),
            _ => None,
        }
    }
}

impl<A> std::fmt::Debug for Debouncer<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debouncer")
            .field("deadline", &self.next_deadline())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn debouncer() -> (ManualClock, Debouncer<&'static str>) {
        let clock = ManualClock::new();
        let debouncer = Debouncer::new(Arc::new(clock.clone()));
        (clock, debouncer)
    }

    #[test]
    fn fires_once_after_the_delay() {
        let (clock, mut debouncer) = debouncer();
        debouncer.schedule(Duration::from_millis(300), "search");

        clock.advance(Duration::from_millis(299));
        assert_eq!(debouncer.take_due(), None);

        clock.advance(Duration::from_millis(1));
        assert_eq!(debouncer.take_due(), Some("search"));
        assert_eq!(debouncer.take_due(), None);
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn rescheduling_replaces_and_restarts_the_timer() {
        let (clock, mut debouncer) = debouncer();
        debouncer.schedule(Duration::from_millis(300), "sql");
        clock.advance(Duration::from_millis(100));
        debouncer.schedule(Duration::from_millis(300), "sqlite");

        clock.advance(Duration::from_millis(250));
        assert_eq!(debouncer.take_due(), None);

        clock.advance(Duration::from_millis(50));
        assert_eq!(debouncer.take_due(), Some("sqlite"));
    }

    #[test]
    fn cancel_drops_the_action() {
        let (clock, mut debouncer) = debouncer();
        debouncer.schedule(Duration::from_millis(300), "search");
        debouncer.cancel_all();
        clock.advance(Duration::from_secs(1));
        assert_eq!(debouncer.take_due(), None);
        assert_eq!(debouncer.next_deadline(), None);
    }

    #[test]
    fn zero_delay_still_replaces() {
        let (_clock, mut debouncer) = debouncer();
        debouncer.schedule(Duration::from_millis(300), "first");
        debouncer.schedule(Duration::ZERO, "second");
        assert_eq!(debouncer.time_until_due(), Some(Duration::ZERO));
        assert_eq!(debouncer.take_due(), Some("second"));
        assert_eq!(debouncer.take_due(), None);
    }
}
