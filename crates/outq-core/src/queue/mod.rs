//! Namespaced queue of pending requests on top of a `KeyValueStore`.
//!
//! Keys look like `<prefix>_<ordinal>_<uuid>`. Only keys under
//! `<prefix>_` belong to the queue; anything else in a shared store is
//! never read, overwritten or removed.
//!
//! The ordinal comes from a counter owned by the queue and is re-synced
//! upward from the number of queued keys in the store, so keys sort roughly
//! in creation order. Writers in other processes can still race for the same
//! ordinal; the uuid suffix keeps their keys distinct.

mod record;

pub use record::{default_serializer, PendingRequest, RequestSerializer, StoredRequest};

use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::OfflineError;
use crate::store::KeyValueStore;

pub struct RequestQueue<S> {
    store: S,
    prefix: String,
    namespace: String,
    next_ordinal: AtomicU64,
}

impl<S: KeyValueStore> RequestQueue<S> {
    pub fn new(store: S, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let namespace = format!("{prefix}_");
        Self {
            store,
            prefix,
            namespace,
            next_ordinal: AtomicU64::new(0),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// True if `key` lies inside this queue's namespace.
    pub fn owns(&self, key: &str) -> bool {
        key.starts_with(&self.namespace)
    }

    /// Queued keys, sorted lexicographically (approximate FIFO).
    pub async fn keys(&self) -> Result<Vec<String>, OfflineError> {
        let mut keys: Vec<String> = self
            .store
            .keys()
            .await?
            .into_iter()
            .filter(|k| self.owns(k))
            .collect();
        keys.sort();
        Ok(keys)
    }

    pub async fn len(&self) -> Result<usize, OfflineError> {
        Ok(self.keys().await?.len())
    }

    pub async fn is_empty(&self) -> Result<bool, OfflineError> {
        Ok(self.len().await? == 0)
    }

    /// Persist a request under a fresh key and return the key.
    pub async fn push(&self, request: &StoredRequest) -> Result<String, OfflineError> {
        let value = serde_json::to_string(request).map_err(OfflineError::Encode)?;
        let queued = self.len().await? as u64;
        let ordinal = self.next_ordinal(queued);
        let key = format!("{}{}_{}", self.namespace, ordinal, uuid::Uuid::new_v4());
        self.store.set_item(&key, &value).await?;
        tracing::debug!(key = %key, method = %request.method, url = %request.url, "queued request");
        Ok(key)
    }

    /// Load one record. `Ok(None)` if it is gone (or not ours); `Decode` if it
    /// is present but unparseable.
    pub async fn load(&self, key: &str) -> Result<Option<PendingRequest>, OfflineError> {
        if !self.owns(key) {
            return Ok(None);
        }
        let Some(raw) = self.store.get_item(key).await? else {
            return Ok(None);
        };
        let request = serde_json::from_str::<StoredRequest>(&raw).map_err(|source| {
            OfflineError::Decode {
                key: key.to_string(),
                source,
            }
        })?;
        Ok(Some(PendingRequest {
            key: key.to_string(),
            request,
        }))
    }

    /// All decodable records in key order. Undecodable records are logged and skipped.
    pub async fn pending(&self) -> Result<Vec<PendingRequest>, OfflineError> {
        let mut out = Vec::new();
        for key in self.keys().await? {
            match self.load(&key).await {
                Ok(Some(p)) => out.push(p),
                Ok(None) => {}
                Err(e @ OfflineError::Decode { .. }) => {
                    tracing::warn!(key = %key, error = %e, "skipping unreadable queued request");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(out)
    }

    /// Remove a record. Absent keys and keys outside the namespace are a no-op.
    pub async fn remove(&self, key: &str) -> Result<(), OfflineError> {
        if !self.owns(key) {
            tracing::debug!(key = %key, "refusing to remove key outside queue namespace");
            return Ok(());
        }
        self.store.remove_item(key).await?;
        Ok(())
    }

    /// Next ordinal: never below the observed queue size, never repeated by
    /// this queue instance.
    fn next_ordinal(&self, observed: u64) -> u64 {
        let prev = self
            .next_ordinal
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                Some(n.max(observed) + 1)
            })
            .unwrap_or_else(|n| n);
        prev.max(observed)
    }
}
