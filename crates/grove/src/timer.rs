//! Periodic deadlines that catch up instead of drifting.

use std::time::{Duration, Instant};

/// A repeating deadline.
///
/// Polling after the deadline fires exactly once, however late the poll is,
/// and moves the deadline forward by whole periods until it is in the future
/// again. Missed periods are reported rather than replayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    /// Interval between firings.
    period: Duration,
    /// Next deadline.
    next: Instant,
}

impl Timer {
    /// A timer whose first deadline is one period from now.
    pub fn new(period: Duration) -> Self {
        Self::starting_at(period, Instant::now())
    }

    /// A timer whose first deadline is one period after `now`.
    pub fn starting_at(period: Duration, now: Instant) -> Self {
        Self {
            period,
            next: now + period,
        }
    }

    /// The firing interval.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// The next deadline.
    pub fn next(&self) -> Instant {
        self.next
    }

    /// Time left before the deadline, zero if it has passed.
    pub fn remaining_at(&self, now: Instant) -> Duration {
        self.next.saturating_duration_since(now)
    }

    /// Poll against the current time.
    pub fn poll(&mut self) -> Option<u32> {
        self.poll_at(Instant::now())
    }

    /// Fire if the deadline is at or before `now`. On firing, returns the
    /// number of whole periods that were skipped beyond the one that fired.
    pub fn poll_at(&mut self, now: Instant) -> Option<u32> {
        if self.next > now {
            return None;
        }
        if self.period.is_zero() {
            self.next = now;
            return Some(0);
        }
        let mut skipped = 0;
        self.next += self.period;
        while self.next <= now {
            self.next += self.period;
            skipped += 1;
        }
        Some(skipped)
    }

    /// Restart the timer so the next deadline is one period from now.
    pub fn reset(&mut self) {
        self.reset_at(Instant::now());
    }

    /// Restart the timer so the next deadline is one period after `now`.
    pub fn reset_at(&mut self, now: Instant) {
        self.next = now + self.period;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;

    #[test]
    fn catches_up_by_whole_periods() -> Result<()> {
        let t0 = Instant::now();
        let mut t = Timer::starting_at(Duration::from_millis(500), t0);
        assert_eq!(t.poll_at(t0 + Duration::from_millis(499)), None);
        assert_eq!(t.poll_at(t0 + Duration::from_millis(1300)), Some(1));
        assert_eq!(t.next(), t0 + Duration::from_millis(1500));
        assert_eq!(t.poll_at(t0 + Duration::from_millis(1400)), None);
        assert_eq!(
            t.remaining_at(t0 + Duration::from_millis(1400)),
            Duration::from_millis(100)
        );
        assert_eq!(t.poll_at(t0 + Duration::from_millis(1500)), Some(0));
        assert_eq!(t.next(), t0 + Duration::from_millis(2000));
        Ok(())
    }

    #[test]
    fn reset_and_zero_period() -> Result<()> {
        let t0 = Instant::now();
        let mut t = Timer::starting_at(Duration::from_millis(500), t0);
        t.reset_at(t0 + Duration::from_millis(300));
        assert_eq!(t.next(), t0 + Duration::from_millis(800));
        assert_eq!(t.remaining_at(t0 + Duration::from_secs(9)), Duration::ZERO);

        let mut z = Timer::starting_at(Duration::ZERO, t0);
        assert_eq!(z.poll_at(t0), Some(0));
        assert_eq!(z.poll_at(t0), Some(0));
        Ok(())
    }
}
