//! Retry loop: run an async attempt until success or the policy says stop.

use std::fmt::Display;
use std::future::Future;

use super::policy::{RetryDecision, RetryPolicy};

/// Runs `attempt` until it succeeds or the retry policy is exhausted, sleeping
/// for the backoff between attempts. The closure receives the 1-based attempt
/// number. On exhaustion the last error is returned.
pub async fn run_with_retry<T, E, F, Fut>(policy: &RetryPolicy, mut attempt: F) -> Result<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let mut n = 1u32;
    loop {
        match attempt(n).await {
            Ok(v) => return Ok(v),
            Err(e) => match policy.decide(n) {
                RetryDecision::NoRetry => {
                    tracing::debug!(attempts = n, error = %e, "retries exhausted");
                    return Err(e);
                }
                RetryDecision::RetryAfter(d) => {
                    tracing::debug!(attempt = n, delay_ms = d.as_millis() as u64, error = %e, "retrying");
                    tokio::time::sleep(d).await;
                    n += 1;
                }
            },
        }
    }
}
