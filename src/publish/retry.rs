//! Backoff between publish attempts.

use std::time::Duration;

/// How often and how patiently a failed record update is retried.
///
/// Attempt `n` (1-based) is followed by a pause of
/// `initial_delay * multiplier^(n-1)`, never longer than `max_delay`.
/// With the defaults that is 5s then 10s, for three attempts in total.
///
/// ```
/// use dnsup::publish::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::new()
///     .with_max_attempts(4)
///     .with_initial_delay(Duration::from_secs(2))
///     .with_multiplier(3.0);
///
/// assert_eq!(policy.delay_for_retry(2), Duration::from_secs(18));
/// assert!(!policy.should_retry(4));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Upper bound on attempts, counting the first request.
    pub max_attempts: u32,
    /// Pause after the first failed attempt.
    pub initial_delay: Duration,
    /// Longest pause between two attempts.
    pub max_delay: Duration,
    /// Growth factor from one pause to the next.
    pub multiplier: f64,
}

impl RetryPolicy {
    /// Three attempts, 5s initial pause doubling up to 60s.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_secs(5),
            max_delay: Duration::from_secs(60),
            multiplier: 2.0,
        }
    }

    /// Caps the number of attempts. `1` disables retrying.
    ///
    /// # Panics
    ///
    /// Panics on `0`.
    #[must_use]
    pub const fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        assert!(max_attempts > 0, "a publish needs at least one attempt");
        self.max_attempts = max_attempts;
        self
    }

    #[must_use]
    pub const fn with_initial_delay(mut self, initial_delay: Duration) -> Self {
        self.initial_delay = initial_delay;
        self
    }

    #[must_use]
    pub const fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    /// # Panics
    ///
    /// Panics unless `multiplier` is positive and finite.
    #[must_use]
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        assert!(
            multiplier.is_finite() && multiplier > 0.0,
            "backoff multiplier must be positive and finite"
        );
        self.multiplier = multiplier;
        self
    }

    /// Pause before retry number `retry`, where `0` is the first retry.
    #[must_use]
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        let exponent = i32::try_from(retry).unwrap_or(i32::MAX);
        let secs = self.initial_delay.as_secs_f64() * self.multiplier.powi(exponent);

        Duration::try_from_secs_f64(secs).map_or(self.max_delay, |delay| delay.min(self.max_delay))
    }

    /// Whether attempt number `attempt` (1-based) may be followed by another.
    #[must_use]
    pub const fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new()
    }
}
