// ABOUTME: Backoff policies applied between retry attempts.
// ABOUTME: Deterministic in the attempt number so tests can stub the delay.

use crate::types::Attempt;
use std::time::Duration;

pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(100);
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(5);

/// Computes how long to wait after a failed attempt.
pub trait Backoff: Send + Sync {
    fn delay(&self, attempt: Attempt) -> Duration;
}

/// Exponential growth from `base`, capped at `cap`.
///
/// Attempt #1 waits nothing; attempt #n waits `base * 2^(n-2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CappedExponential {
    pub base: Duration,
    pub cap: Duration,
}

impl CappedExponential {
    pub fn new(base: Duration, cap: Duration) -> Self {
        Self { base, cap }
    }
}

impl Default for CappedExponential {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_DELAY, DEFAULT_MAX_DELAY)
    }
}

impl Backoff for CappedExponential {
    fn delay(&self, attempt: Attempt) -> Duration {
        if attempt == Attempt::FIRST {
            return Duration::ZERO;
        }
        let exponent = attempt.get() - 2;
        let factor = 2u32.checked_pow(exponent).unwrap_or(u32::MAX);
        self.base
            .checked_mul(factor)
            .map_or(self.cap, |delay| delay.min(self.cap))
    }
}

/// Never waits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoDelay;

impl Backoff for NoDelay {
    fn delay(&self, _attempt: Attempt) -> Duration {
        Duration::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attempt(n: u32) -> Attempt {
        Attempt::new(n).unwrap()
    }

    #[test]
    fn first_attempt_has_no_delay() {
        assert_eq!(CappedExponential::default().delay(Attempt::FIRST), Duration::ZERO);
    }

    #[test]
    fn delay_doubles_until_cap() {
        let backoff = CappedExponential::new(Duration::from_millis(100), Duration::from_secs(1));
        assert_eq!(backoff.delay(attempt(2)), Duration::from_millis(100));
        assert_eq!(backoff.delay(attempt(3)), Duration::from_millis(200));
        assert_eq!(backoff.delay(attempt(4)), Duration::from_millis(400));
        assert_eq!(backoff.delay(attempt(5)), Duration::from_millis(800));
        assert_eq!(backoff.delay(attempt(6)), Duration::from_secs(1));
        assert_eq!(backoff.delay(attempt(10)), Duration::from_secs(1));
    }

    #[test]
    fn huge_attempt_numbers_saturate_at_cap() {
        let backoff = CappedExponential::default();
        assert_eq!(backoff.delay(attempt(u32::MAX)), DEFAULT_MAX_DELAY);
        assert_eq!(backoff.delay(attempt(40)), DEFAULT_MAX_DELAY);
    }

    #[test]
    fn delay_is_non_decreasing() {
        let backoff = CappedExponential::default();
        let delays: Vec<_> = (1..=11).map(|n| backoff.delay(attempt(n))).collect();
        assert!(delays.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn delay_is_deterministic() {
        let backoff = CappedExponential::default();
        assert_eq!(backoff.delay(attempt(7)), backoff.delay(attempt(7)));
    }

    #[test]
    fn worst_case_total_wait_is_bounded() {
        let backoff = CappedExponential::default();
        let total: Duration = (1..=10).map(|n| backoff.delay(attempt(n))).sum();
        assert!(total <= DEFAULT_MAX_DELAY * 10);
    }

    #[test]
    fn no_delay_never_waits() {
        assert_eq!(NoDelay.delay(attempt(9)), Duration::ZERO);
    }
}
