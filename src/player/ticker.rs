//! Deadline-based playback timer
//!
//! The ticker never runs on its own thread. The event loop polls it with the
//! current time and it reports whether a tick is due. Because the deadline is
//! plain data owned by the player, dropping the player drops the timer: there
//! is nothing left that could fire afterwards.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    next_due: Option<Instant>,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Ticker {
            interval,
            next_due: None,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.next_due
    }

    /// Schedule the first tick one interval from `now`
    pub fn arm(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
    }

    /// Cancel the pending tick, if any
    pub fn disarm(&mut self) {
        self.next_due = None;
    }

    /// Change the interval.
    ///
    /// An armed ticker is cancelled and rescheduled one new interval from
    /// `now`, so the old deadline can never fire in addition to the new one.
    pub fn set_interval(&mut self, interval: Duration, now: Instant) {
        self.interval = interval;
        if self.is_armed() {
            self.arm(now);
        }
    }

    /// Returns true at most once per elapsed deadline, then reschedules
    /// from `now`. A late poll does not produce catch-up ticks.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn disarmed_ticker_never_fires() {
        let start = Instant::now();
        let mut ticker = Ticker::new(100 * MS);
        assert!(!ticker.poll(start + 10_000 * MS));
    }

    #[test]
    fn fires_once_per_interval() {
        let start = Instant::now();
        let mut ticker = Ticker::new(100 * MS);
        ticker.arm(start);
        assert!(!ticker.poll(start + 99 * MS));
        assert!(ticker.poll(start + 100 * MS));
        assert!(!ticker.poll(start + 150 * MS));
        assert!(ticker.poll(start + 200 * MS));
    }

    #[test]
    fn late_poll_does_not_catch_up() {
        let start = Instant::now();
        let mut ticker = Ticker::new(100 * MS);
        ticker.arm(start);
        assert!(ticker.poll(start + 1_000 * MS));
        assert!(!ticker.poll(start + 1_050 * MS));
    }

    #[test]
    fn interval_change_reschedules_from_now() {
        let start = Instant::now();
        let mut ticker = Ticker::new(1_000 * MS);
        ticker.arm(start);
        // old deadline would have been start + 1000
        ticker.set_interval(500 * MS, start + 900 * MS);
        assert!(!ticker.poll(start + 1_000 * MS));
        assert!(ticker.poll(start + 1_400 * MS));
    }

    #[test]
    fn interval_change_while_disarmed_stays_disarmed() {
        let start = Instant::now();
        let mut ticker = Ticker::new(1_000 * MS);
        ticker.set_interval(10 * MS, start);
        assert!(!ticker.is_armed());
        assert!(!ticker.poll(start + 100 * MS));
    }
}
