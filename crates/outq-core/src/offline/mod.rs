//! Offline interceptor: send now if possible, otherwise queue and send later.
//!
//! `OfflineTransport` wraps a real `Transport` and implements the same trait.
//! A fresh send that fails with a connectivity error is serialized into the
//! request queue; `drain_queue` replays queued records under the retry policy
//! and deletes each one only after a confirmed successful send.
//!
//! Replays go straight to the inner transport with the marker header set, so
//! a replay failure is never queued a second time. A caller that replays by
//! hand through `send` gets the same treatment by setting the marker header.

mod drain;
mod options;


pub use drain::DrainReport;
pub use options::{OfflineOptions, PlaceholderBuilder};

use async_trait::async_trait;

use crate::config::MARKER_HEADER;
use crate::queue::RequestQueue;
use crate::retry::is_offline_error;
use crate::store::KeyValueStore;
use crate::transport::{HttpRequest, HttpResponse, Transport, TransportError};

pub struct OfflineTransport<T, S> {
    inner: T,
    queue: RequestQueue<S>,
    options: OfflineOptions,
}

impl<T: Transport, S: KeyValueStore> OfflineTransport<T, S> {
    /// Wrap `inner` with default options.
    pub fn new(inner: T, store: S) -> Self {
        Self::with_options(inner, store, OfflineOptions::default())
    }

    pub fn with_options(inner: T, store: S, options: OfflineOptions) -> Self {
        let queue = RequestQueue::new(store, options.prefix.clone());
        Self {
            inner,
            queue,
            options,
        }
    }

    pub fn queue(&self) -> &RequestQueue<S> {
        &self.queue
    }

    /// A request carrying the marker header is a replay of a queued record.
    pub fn is_replay(request: &HttpRequest) -> bool {
        request.header(MARKER_HEADER).is_some()
    }

    async fn dispatch(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let replay = Self::is_replay(request);

        if !replay && self.options.send_from_storage_first {
            // Best effort: a stuck backlog must not block new traffic.
            match self.drain_queue().await {
                Ok(report) if !report.failures.is_empty() => {
                    tracing::warn!(
                        failed = report.failures.len(),
                        delivered = report.delivered.len(),
                        "pre-send drain left requests queued"
                    );
                }
                Ok(_) => {}
                Err(e) => tracing::warn!(error = %e, "pre-send drain failed"),
            }
        }

        match self.inner.send(request).await {
            Ok(response) => Ok(response),
            Err(err) if replay => Err(err),
            Err(err) => self.on_fresh_failure(request, err).await,
        }
    }

    /// Queue the request if the failure is a connectivity one, then either
    /// return the placeholder or hand the original error back.
    async fn on_fresh_failure(
        &self,
        request: &HttpRequest,
        err: TransportError,
    ) -> Result<HttpResponse, TransportError> {
        if !is_offline_error(&err) {
            return Err(err);
        }
        let Some(stored) = (self.options.serializer)(request) else {
            tracing::debug!(url = %request.url, "serializer declined to queue request");
            return Err(err);
        };

        match self.queue.push(&stored).await {
            Ok(key) => {
                tracing::info!(key = %key, code = %err.code, "request queued for later delivery");
                match &self.options.placeholder {
                    Some(build) => Ok(build(request, &err)),
                    None => Err(err),
                }
            }
            Err(e) => {
                tracing::error!(url = %request.url, error = %e, "could not queue failed request");
                Err(err)
            }
        }
    }
}

#[async_trait]
impl<T: Transport, S: KeyValueStore> Transport for OfflineTransport<T, S> {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.dispatch(request).await
    }
}
