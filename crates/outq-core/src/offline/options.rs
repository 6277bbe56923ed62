use std::fmt;
use std::sync::Arc;

use crate::config::{OutqConfig, DEFAULT_PREFIX};
use crate::queue::{default_serializer, RequestSerializer, StoredRequest};
use crate::retry::RetryPolicy;
use crate::transport::{HttpRequest, HttpResponse, TransportError};

/// Builds the response handed back in place of a queued connectivity failure.
pub type PlaceholderBuilder =
    Arc<dyn Fn(&HttpRequest, &TransportError) -> HttpResponse + Send + Sync>;

/// Behaviour of an `OfflineTransport`. Resolved once at construction.
#[derive(Clone)]
pub struct OfflineOptions {
    /// Namespace prefix for queue keys.
    pub prefix: String,
    /// What to persist for a failed request; `None` from it means "don't queue".
    pub serializer: RequestSerializer,
    /// When set, a queued failure returns this instead of the error.
    pub placeholder: Option<PlaceholderBuilder>,
    /// Drain the queue before each fresh send.
    pub send_from_storage_first: bool,
    /// Backoff for each replayed record.
    pub retry: RetryPolicy,
    /// Cap on records replayed at once during a drain (None = no cap).
    pub drain_concurrency: Option<usize>,
}

impl Default for OfflineOptions {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            serializer: default_serializer(),
            placeholder: None,
            send_from_storage_first: false,
            retry: RetryPolicy::default(),
            drain_concurrency: None,
        }
    }
}

impl OfflineOptions {
    /// Options from the file config; the function-valued fields keep their defaults.
    pub fn from_config(cfg: &OutqConfig) -> Self {
        Self {
            prefix: cfg.prefix.clone(),
            send_from_storage_first: cfg.send_from_storage_first,
            retry: cfg.retry_policy(),
            drain_concurrency: cfg.drain_concurrency,
            ..Self::default()
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_serializer<F>(mut self, f: F) -> Self
    where
        F: Fn(&HttpRequest) -> Option<StoredRequest> + Send + Sync + 'static,
    {
        self.serializer = Arc::new(f);
        self
    }

    pub fn with_placeholder<F>(mut self, f: F) -> Self
    where
        F: Fn(&HttpRequest, &TransportError) -> HttpResponse + Send + Sync + 'static,
    {
        self.placeholder = Some(Arc::new(f));
        self
    }

    pub fn with_send_from_storage_first(mut self, yes: bool) -> Self {
        self.send_from_storage_first = yes;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_drain_concurrency(mut self, limit: Option<usize>) -> Self {
        self.drain_concurrency = limit;
        self
    }
}

impl fmt::Debug for OfflineOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OfflineOptions")
            .field("prefix", &self.prefix)
            .field("placeholder", &self.placeholder.is_some())
            .field("send_from_storage_first", &self.send_from_storage_first)
            .field("retry", &self.retry)
            .field("drain_concurrency", &self.drain_concurrency)
            .finish_non_exhaustive()
    }
}
