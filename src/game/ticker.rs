use std::time::{Duration, Instant};

/// A cancellable periodic timer.
///
/// The ticker does not run anything by itself; the event loop asks it how
/// long it may block for input ([`Ticker::timeout()`]) and then whether a tick
/// is due ([`Ticker::fire()`]).  Ticks that are missed while the loop is busy
/// are not made up for later, and a late tick does not shift the ones after
/// it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Ticker {
    period: Duration,
    next: Option<Instant>,
}

impl Ticker {
    pub(crate) fn new(period: Duration) -> Ticker {
        Ticker { period, next: None }
    }

    pub(crate) fn period(&self) -> Duration {
        self.period
    }

    /// Schedule the first tick for one period after `now`.  Restarting an
    /// active ticker discards its pending tick.
    pub(crate) fn start(&mut self, now: Instant) {
        self.next = Some(now + self.period);
    }

    pub(crate) fn cancel(&mut self) {
        self.next = None;
    }

    #[cfg(test)]
    pub(crate) fn is_active(&self) -> bool {
        self.next.is_some()
    }

    /// Time remaining until the next tick, or `None` if cancelled
    pub(crate) fn timeout(&self, now: Instant) -> Option<Duration> {
        self.next.map(|when| when.saturating_duration_since(now))
    }

    /// If a tick is due at `now`, schedule the following one and return
    /// `true`.
    ///
    /// Ticks stay on the schedule set by [`Ticker::start()`]: the next one is
    /// the first multiple of the period after `now`, however late this is
    /// called.
    pub(crate) fn fire(&mut self, now: Instant) -> bool {
        match self.next {
            Some(when) if when <= now => {
                let mut next = when + self.period;
                while next <= now && !self.period.is_zero() {
                    next += self.period;
                }
                self.next = Some(next);
                true
            }
            _ => false,
        }
    }
}
