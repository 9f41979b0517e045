//! Leading-edge throttling for scroll and resize refreshes.

use std::time::{Duration, Instant};

/// Leading-edge rate limiter.
///
/// The first call in a window runs; calls arriving before `limit` has elapsed
/// are dropped, not queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Throttle {
    limit: Duration,
    last: Option<Instant>,
}

impl Throttle {
    /// Creates a throttle admitting at most one call per `limit`.
    pub fn new(limit: Duration) -> Self {
        Self { limit, last: None }
    }

    /// Returns `true` if a call at `now` may run, and starts a new window
    /// when it does.
    pub fn ready(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.saturating_duration_since(last) < self.limit => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }

    /// Forgets the current window.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_calls_inside_the_window() {
        let start = Instant::now();
        let mut throttle = Throttle::new(Duration::from_millis(100));
        assert!(throttle.ready(start));
        assert!(!throttle.ready(start + Duration::from_millis(10)));
        assert!(!throttle.ready(start + Duration::from_millis(99)));
        assert!(throttle.ready(start + Duration::from_millis(100)));
        assert!(!throttle.ready(start + Duration::from_millis(150)));
    }

    #[test]
    fn reset_opens_a_new_window() {
        let start = Instant::now();
        let mut throttle = Throttle::new(Duration::from_secs(1));
        assert!(throttle.ready(start));
        throttle.reset();
        assert!(throttle.ready(start));
    }
}
