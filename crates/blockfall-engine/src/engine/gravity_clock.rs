use std::time::Duration;

/// Schedules gravity steps from elapsed time.
///
/// The clock does not read any real timer. Its owner feeds it the time that
/// passed since the previous call, which keeps the game loop independent from
/// any frame callback and lets tests run on synthetic time.
///
/// A cancelled clock never fires. Cancelling is idempotent.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use blockfall_engine::GravityClock;
///
/// let mut clock = GravityClock::new();
/// clock.arm(Duration::from_millis(100));
///
/// assert!(!clock.advance(Duration::from_millis(60)));
/// assert!(clock.advance(Duration::from_millis(60)));
///
/// clock.cancel();
/// clock.cancel();
/// assert!(!clock.advance(Duration::from_secs(10)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GravityClock {
    interval: Duration,
    accumulated: Duration,
    armed: bool,
}

impl GravityClock {
    /// Creates a cancelled clock.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            interval: Duration::ZERO,
            accumulated: Duration::ZERO,
            armed: false,
        }
    }

    /// Starts the clock from zero with the given interval.
    pub fn arm(&mut self, interval: Duration) {
        self.interval = interval;
        self.accumulated = Duration::ZERO;
        self.armed = true;
    }

    /// Stops the clock and drops any accumulated time.
    pub fn cancel(&mut self) {
        self.armed = false;
        self.accumulated = Duration::ZERO;
    }

    /// Changes the interval without resetting the accumulated time.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.armed
    }

    /// Adds elapsed time and reports whether a gravity step is due.
    ///
    /// A step is due once the accumulated time exceeds the interval. The
    /// accumulator then restarts from zero, so at most one step is reported
    /// per call.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        if !self.armed {
            return false;
        }
        self.accumulated = self.accumulated.saturating_add(elapsed);
        if self.accumulated > self.interval {
            self.accumulated = Duration::ZERO;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_fires_only_after_interval_is_exceeded() {
        let mut clock = GravityClock::new();
        clock.arm(100 * MS);
        assert!(!clock.advance(100 * MS));
        assert!(clock.advance(MS));
        // Accumulator restarted.
        assert!(!clock.advance(50 * MS));
    }

    #[test]
    fn test_one_step_per_call() {
        let mut clock = GravityClock::new();
        clock.arm(100 * MS);
        assert!(clock.advance(1000 * MS));
        assert!(!clock.advance(MS));
    }

    #[test]
    fn test_new_clock_is_cancelled() {
        let mut clock = GravityClock::new();
        assert!(!clock.is_armed());
        assert!(!clock.advance(Duration::from_secs(60)));
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut clock = GravityClock::new();
        clock.cancel();
        clock.arm(10 * MS);
        clock.cancel();
        clock.cancel();
        assert!(!clock.is_armed());
        assert!(!clock.advance(Duration::from_secs(1)));
    }

    #[test]
    fn test_rearm_drops_stale_time() {
        let mut clock = GravityClock::new();
        clock.arm(100 * MS);
        assert!(!clock.advance(90 * MS));
        clock.arm(100 * MS);
        assert!(!clock.advance(90 * MS));
    }

    #[test]
    fn test_set_interval_keeps_accumulated_time() {
        let mut clock = GravityClock::new();
        clock.arm(100 * MS);
        assert!(!clock.advance(60 * MS));
        clock.set_interval(50 * MS);
        assert_eq!(clock.interval(), 50 * MS);
        assert!(clock.advance(MS));
    }
}
