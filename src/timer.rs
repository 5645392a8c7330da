use std::time::{Duration, Instant};

/// A cancellable periodic deadline. The caller supplies the current time, so
/// the same code runs against the real clock and against test instants.
#[derive(Debug, Clone)]
pub struct Interval {
    period: Duration,
    next_due: Option<Instant>,
}

impl Interval {
    pub fn new(period: Duration) -> Self {
        Self { period, next_due: None }
    }

    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.period);
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.next_due
    }

    /// Consumes one due period. Periods missed by more than one interval
    /// are dropped rather than fired in a burst.
    pub fn fire(&mut self, now: Instant) -> bool {
        let Some(due) = self.next_due else {
            return false;
        };
        if due > now {
            return false;
        }
        let mut next = due + self.period;
        if next <= now {
            next = now + self.period;
        }
        self.next_due = Some(next);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn idle_interval_never_fires() {
        let t0 = Instant::now();
        let mut iv = Interval::new(ms(100));
        assert!(!iv.is_running());
        assert!(!iv.fire(t0 + ms(1000)));
    }

    #[test]
    fn fires_once_per_period() {
        let t0 = Instant::now();
        let mut iv = Interval::new(ms(100));
        iv.start(t0);
        assert!(!iv.fire(t0 + ms(99)));
        assert!(iv.fire(t0 + ms(100)));
        assert!(!iv.fire(t0 + ms(150)));
        assert!(iv.fire(t0 + ms(210)));
        assert_eq!(iv.next_due(), Some(t0 + ms(300)));
    }

    #[test]
    fn late_poll_skips_missed_periods() {
        let t0 = Instant::now();
        let mut iv = Interval::new(ms(100));
        iv.start(t0);
        assert!(iv.fire(t0 + ms(550)));
        assert!(!iv.fire(t0 + ms(550)));
        assert_eq!(iv.next_due(), Some(t0 + ms(650)));
    }

    #[test]
    fn cancel_stops_firing() {
        let t0 = Instant::now();
        let mut iv = Interval::new(ms(100));
        iv.start(t0);
        iv.cancel();
        assert!(!iv.is_running());
        assert!(!iv.fire(t0 + ms(500)));
    }
}
