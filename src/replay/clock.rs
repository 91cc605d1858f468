// Simulated clock
//
// The only timing authority of a replay. One unit per rendering tick,
// starting from an arbitrary (often epoch-like) value.

/// Monotonic tick counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimClock {
    now: u64,
}

impl SimClock {
    pub fn new(start: u64) -> Self {
        Self { now: start }
    }

    /// Current tick value
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Move forward by exactly one tick
    pub fn advance(&mut self) {
        self.now = self.now.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_configured_value() {
        let clock = SimClock::new(1_670_170_000);
        assert_eq!(clock.now(), 1_670_170_000);
    }

    #[test]
    fn test_advance_by_one() {
        let mut clock = SimClock::new(0);
        for expected in 1..=5 {
            clock.advance();
            assert_eq!(clock.now(), expected);
        }
    }

    #[test]
    fn test_advance_never_wraps() {
        let mut clock = SimClock::new(u64::MAX);
        clock.advance();
        assert_eq!(clock.now(), u64::MAX);
    }
}
