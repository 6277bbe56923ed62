//! Retry and backoff policy.
//!
//! This module holds the offline-error classifier (which failures are worth
//! queueing) and the bounded backoff used when replaying a queued request, so
//! the interceptor and the replay path share one consistent policy.

mod classify;
mod policy;
mod run;

pub use classify::{classify_curl_error, classify_http_status, is_offline_error};
pub use policy::{RetryDecision, RetryPolicy};
pub use run::run_with_retry;
