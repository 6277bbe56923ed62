//! Errors raised by the queue and the replay path.

use crate::store::StoreError;
use crate::transport::TransportError;

#[derive(Debug, thiserror::Error)]
pub enum OfflineError {
    #[error("store: {0}")]
    Store(#[from] StoreError),

    /// A stored record could not be parsed back into a request.
    #[error("decode queued request {key}: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("encode request for queue: {0}")]
    Encode(#[source] serde_json::Error),

    /// Every replay attempt failed; the record stays queued.
    #[error("replay of {key} exhausted retries: {source}")]
    ReplayExhausted {
        key: String,
        #[source]
        source: TransportError,
    },

    /// A queued record could not be read from the store.
    #[error("load queued request {key}: {source}")]
    LoadFailed {
        key: String,
        #[source]
        source: StoreError,
    },

    /// The replay succeeded but the record could not be deleted afterwards.
    #[error("remove delivered request {key}: {source}")]
    RemoveFailed {
        key: String,
        #[source]
        source: StoreError,
    },
}

impl OfflineError {
    /// Queue key the error refers to, if any.
    pub fn key(&self) -> Option<&str> {
        match self {
            OfflineError::Decode { key, .. }
            | OfflineError::LoadFailed { key, .. }
            | OfflineError::ReplayExhausted { key, .. }
            | OfflineError::RemoveFailed { key, .. } => Some(key),
            OfflineError::Store(_) | OfflineError::Encode(_) => None,
        }
    }
}
