use rand::Rng;
use std::time::Duration;

/// Decision returned by the retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Give up and surface the last error.
    NoRetry,
    /// Retry after the given delay.
    RetryAfter(Duration),
}

/// Bounded backoff for replaying one queued request.
///
/// `retries` counts retries after the first attempt, so a request is sent at
/// most `retries + 1` times. The wait before retry `n` is
/// `min(max_timeout, min_timeout * r * factor^(n-1))` with `r` drawn from
/// `[1, 2)` when `randomize` is set and `1` otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    pub retries: u32,
    pub factor: f64,
    pub min_timeout: Duration,
    pub max_timeout: Duration,
    pub randomize: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 3,
            factor: 1.0,
            min_timeout: Duration::from_millis(500),
            max_timeout: Duration::from_millis(1000),
            randomize: false,
        }
    }
}

impl RetryPolicy {
    /// Decide what to do after `failures` failed attempts (1-based).
    pub fn decide(&self, failures: u32) -> RetryDecision {
        if failures == 0 || failures > self.retries {
            return RetryDecision::NoRetry;
        }
        RetryDecision::RetryAfter(self.backoff(failures))
    }

    /// Backoff before retry number `retry` (1-based).
    pub fn backoff(&self, retry: u32) -> Duration {
        let random = if self.randomize {
            rand::thread_rng().gen_range(1.0..2.0)
        } else {
            1.0
        };
        let exp = retry.saturating_sub(1).min(i32::MAX as u32) as i32;
        let raw_ms = self.min_timeout.as_secs_f64() * 1000.0 * random * self.factor.powi(exp);
        let max_ms = self.max_timeout.as_secs_f64() * 1000.0;
        let ms = if raw_ms.is_finite() { raw_ms.min(max_ms) } else { max_ms };
        Duration::from_millis(ms.max(0.0).round() as u64)
    }
}
