//! Replay pass over the queue.

use futures::stream::{self, StreamExt};

use super::OfflineTransport;
use crate::config::MARKER_HEADER;
use crate::error::OfflineError;
use crate::queue::PendingRequest;
use crate::retry::run_with_retry;
use crate::store::KeyValueStore;
use crate::transport::Transport;

/// Outcome of one `drain_queue` pass. Each record's outcome is independent.
#[derive(Debug, Default)]
pub struct DrainReport {
    /// Keys delivered and removed from the queue.
    pub delivered: Vec<String>,
    /// Records that are still queued (retries exhausted, or store trouble).
    pub failures: Vec<OfflineError>,
    /// Keys whose stored value could not be parsed; left untouched.
    pub skipped: Vec<String>,
}

impl DrainReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Collapse to the first failure, for callers that want a single error.
    pub fn into_result(self) -> Result<Vec<String>, OfflineError> {
        match self.failures.into_iter().next() {
            Some(e) => Err(e),
            None => Ok(self.delivered),
        }
    }
}

impl<T: Transport, S: KeyValueStore> OfflineTransport<T, S> {
    /// Replay every queued record once (each under the retry policy).
    ///
    /// Works from a snapshot of the queue keys taken at the start; records
    /// queued meanwhile wait for the next pass. Overlapping passes may both
    /// resend a record; whichever succeeds first removes it and the other
    /// removal is a no-op. Only a failure to list the queue fails the call.
    pub async fn drain_queue(&self) -> Result<DrainReport, OfflineError> {
        let keys = self.queue.keys().await?;
        let mut report = DrainReport::default();
        if keys.is_empty() {
            return Ok(report);
        }

        let loaded =
            futures::future::join_all(keys.iter().map(|key| self.queue.load(key))).await;
        let mut records = Vec::with_capacity(keys.len());
        for (key, res) in keys.into_iter().zip(loaded) {
            match res {
                Ok(Some(pending)) => records.push(pending),
                // Removed by an overlapping drain.
                Ok(None) => {}
                Err(e @ OfflineError::Decode { .. }) => {
                    tracing::warn!(key = %key, error = %e, "skipping unreadable queued request");
                    report.skipped.push(key);
                }
                Err(OfflineError::Store(source)) => {
                    tracing::warn!(key = %key, error = %source, "could not load queued request");
                    report.failures.push(OfflineError::LoadFailed { key, source });
                }
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "could not load queued request");
                    report.failures.push(e);
                }
            }
        }

        let limit = self
            .options
            .drain_concurrency
            .unwrap_or(records.len())
            .max(1);
        tracing::debug!(records = records.len(), limit, "draining queue");

        let outcomes: Vec<Result<String, OfflineError>> = stream::iter(records)
            .map(|pending| self.replay(pending))
            .buffer_unordered(limit)
            .collect()
            .await;

        for outcome in outcomes {
            match outcome {
                Ok(key) => report.delivered.push(key),
                Err(e) => report.failures.push(e),
            }
        }
        tracing::info!(
            delivered = report.delivered.len(),
            failed = report.failures.len(),
            skipped = report.skipped.len(),
            "drain finished"
        );
        Ok(report)
    }

    /// Resend one record through the inner transport, tagged as a replay.
    async fn replay(&self, pending: PendingRequest) -> Result<String, OfflineError> {
        let PendingRequest { key, request } = pending;
        let mut request = request.to_request();
        request
            .headers
            .insert(MARKER_HEADER.to_string(), "true".to_string());

        let inner = &self.inner;
        let req = &request;
        let sent = run_with_retry(&self.options.retry, move |attempt| {
            tracing::trace!(attempt, url = %req.url, "replaying queued request");
            inner.send(req)
        })
        .await;

        match sent {
            Ok(response) => {
                self.queue.remove(&key).await.map_err(|e| match e {
                    OfflineError::Store(source) => OfflineError::RemoveFailed {
                        key: key.clone(),
                        source,
                    },
                    other => other,
                })?;
                tracing::info!(key = %key, status = response.status, "replayed queued request");
                Ok(key)
            }
            Err(source) => {
                tracing::warn!(key = %key, error = %source, "replay exhausted retries; keeping request queued");
                Err(OfflineError::ReplayExhausted { key, source })
            }
        }
    }
}
