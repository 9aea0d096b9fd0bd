//! Time sources for message timestamps

use chrono::{DateTime, Duration, Utc};
use std::cell::Cell;
use std::fmt::Debug;
use std::rc::Rc;

/// Source of the current time
pub trait Clock: Debug {
    /// Current instant
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Hand-driven clock for tests and simulations
///
/// Clones share the same instant, so a test can keep one handle while a
/// session owns another. Each read advances the clock by `step` (zero for a
/// frozen clock).
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<DateTime<Utc>>>,
    step: Duration,
}

impl ManualClock {
    /// Clock that never moves on its own
    #[must_use]
    pub fn frozen(at: DateTime<Utc>) -> Self {
        Self::stepping(at, Duration::zero())
    }

    /// Clock that advances by `step` after every read
    #[must_use]
    pub fn stepping(start: DateTime<Utc>, step: Duration) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
            step,
        }
    }

    /// Move forward
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    /// Jump to an instant
    pub fn set(&self, at: DateTime<Utc>) {
        self.now.set(at);
    }

    /// Current instant without stepping
    #[must_use]
    pub fn peek(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        let current = self.now.get();
        self.now.set(current + self.step);
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn frozen_clock_stays_put() {
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap();
        let clock = ManualClock::frozen(at);
        assert_eq!(clock.now(), at);
        assert_eq!(clock.now(), at);
    }

    #[test]
    fn clones_share_time() {
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap();
        let clock = ManualClock::stepping(at, Duration::seconds(30));
        let handle = clock.clone();

        assert_eq!(clock.now(), at);
        assert_eq!(handle.peek(), at + Duration::seconds(30));

        handle.advance(Duration::minutes(1));
        assert_eq!(clock.now(), at + Duration::seconds(90));
    }

    #[test]
    fn set_jumps_every_handle() {
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 1, 15, 17, 30, 0).unwrap();
        let clock = ManualClock::frozen(at);
        let handle = clock.clone();

        handle.set(later);
        assert_eq!(clock.now(), later);
        assert_eq!(handle.peek(), later);
    }
}
