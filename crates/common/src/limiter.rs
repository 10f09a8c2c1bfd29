//! Sliding-window attempt limiter
//!
//! Bounds how often an operation may be attempted within a rolling time
//! window. Non-blocking: a throttled caller gets the remaining wait back and
//! decides for itself whether to sleep or give up.

use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Outcome of an [`AttemptLimiter::allow`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptResult {
    /// The attempt was recorded and may proceed
    Allowed,
    /// Over the limit; retry after the given duration
    Throttled(Duration),
}

impl AttemptResult {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }

    pub fn wait_duration(&self) -> Option<Duration> {
        match self {
            Self::Allowed => None,
            Self::Throttled(d) => Some(*d),
        }
    }
}

/// Sliding-window limiter for retryable operations
#[derive(Debug)]
pub struct AttemptLimiter {
    window: Duration,
    max: usize,
    attempts: Mutex<Vec<Instant>>,
}

impl AttemptLimiter {
    /// Allow at most `max` attempts per `window`
    pub fn new(max: usize, window: Duration) -> Self {
        Self {
            window,
            max,
            attempts: Mutex::new(Vec::new()),
        }
    }

    /// Record an attempt when within limits
    ///
    /// Stale attempts that have left the window are dropped first. When
    /// throttled, the returned wait is the time until the oldest remaining
    /// attempt expires.
    pub fn allow(&self) -> AttemptResult {
        self.allow_at(Instant::now())
    }

    fn allow_at(&self, now: Instant) -> AttemptResult {
        let mut attempts = self.attempts.lock().expect("limiter lock poisoned");

        attempts.retain(|ts| now.duration_since(*ts) < self.window);

        if attempts.len() >= self.max {
            let oldest = attempts[0];
            let wait = self.window.saturating_sub(now.duration_since(oldest));
            return AttemptResult::Throttled(wait);
        }

        attempts.push(now);
        AttemptResult::Allowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allows_up_to_max() {
        let limiter = AttemptLimiter::new(3, Duration::from_secs(60));
        let now = Instant::now();

        assert!(limiter.allow_at(now).is_allowed());
        assert!(limiter.allow_at(now).is_allowed());
        assert!(limiter.allow_at(now).is_allowed());
        assert!(!limiter.allow_at(now).is_allowed());
    }

    #[test]
    fn test_throttled_reports_wait() {
        let limiter = AttemptLimiter::new(1, Duration::from_secs(10));
        let now = Instant::now();

        assert!(limiter.allow_at(now).is_allowed());

        let result = limiter.allow_at(now + Duration::from_secs(4));
        let wait = result.wait_duration().expect("should be throttled");
        assert_eq!(wait, Duration::from_secs(6));
    }

    #[test]
    fn test_window_expiry_frees_slots() {
        let limiter = AttemptLimiter::new(2, Duration::from_secs(10));
        let now = Instant::now();

        assert!(limiter.allow_at(now).is_allowed());
        assert!(limiter.allow_at(now).is_allowed());
        assert!(!limiter.allow_at(now + Duration::from_secs(5)).is_allowed());

        // Both attempts have aged out
        assert!(limiter.allow_at(now + Duration::from_secs(11)).is_allowed());
    }
}
