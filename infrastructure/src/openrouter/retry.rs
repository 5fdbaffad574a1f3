//! Retry policy for inference calls
//!
//! Injected into the client at construction time rather than read from
//! process-wide constants, so tests and callers can tune it.

use std::time::Duration;

/// Status codes worth retrying: rate limits and transient server errors.
const DEFAULT_RETRYABLE_STATUSES: &[u16] = &[429, 500, 502, 503, 504];

/// Bounded exponential-backoff retry configuration
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Delay before the first retry; doubles each attempt
    pub base_delay: Duration,
    /// Ceiling for any computed or server-suggested delay
    pub max_delay: Duration,
    /// HTTP status codes eligible for retry
    pub retryable_statuses: Vec<u16>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            retryable_statuses: DEFAULT_RETRYABLE_STATUSES.to_vec(),
        }
    }
}

impl RetryPolicy {
    /// Whether a response status should be retried
    pub fn is_retryable(&self, status: u16) -> bool {
        self.retryable_statuses.contains(&status)
    }

    /// Exponential backoff for the given 0-indexed attempt, capped at
    /// `max_delay`
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let factor = 1u32 << attempt.min(16);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }

    /// Delay to honor from a `Retry-After` header, capped at `max_delay`
    pub fn clamp_retry_after(&self, seconds: f64) -> Duration {
        if !seconds.is_finite() || seconds < 0.0 {
            return self.base_delay;
        }
        Duration::from_secs_f64(seconds).min(self.max_delay)
    }

    /// Whether another attempt remains after the given 0-indexed one
    pub fn has_attempts_after(&self, attempt: u32) -> bool {
        attempt + 1 < self.max_attempts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles_and_caps() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff_delay(0), Duration::from_secs(1));
        assert_eq!(policy.backoff_delay(1), Duration::from_secs(2));
        assert_eq!(policy.backoff_delay(2), Duration::from_secs(4));
        assert_eq!(policy.backoff_delay(10), Duration::from_secs(30));
    }

    #[test]
    fn test_default_retryable_statuses() {
        let policy = RetryPolicy::default();
        for status in [429, 500, 502, 503, 504] {
            assert!(policy.is_retryable(status), "{status} should be retryable");
        }
        for status in [400, 401, 403, 404, 200] {
            assert!(!policy.is_retryable(status), "{status} should be terminal");
        }
    }

    #[test]
    fn test_retry_after_clamped() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.clamp_retry_after(5.0), Duration::from_secs(5));
        assert_eq!(policy.clamp_retry_after(120.0), Duration::from_secs(30));
    }

    #[test]
    fn test_retry_after_garbage_falls_back_to_base() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.clamp_retry_after(f64::NAN), policy.base_delay);
        assert_eq!(policy.clamp_retry_after(-3.0), policy.base_delay);
    }

    #[test]
    fn test_attempt_accounting() {
        let policy = RetryPolicy::default();
        assert!(policy.has_attempts_after(0));
        assert!(policy.has_attempts_after(1));
        assert!(!policy.has_attempts_after(2));
    }
}
