//! Durable key/value storage consumed by the request queue.
//!
//! The queue only needs four string operations, so any backend that can
//! offer them (SQLite, memory, a browser-like local store) plugs in here.
//! Backends must tolerate concurrent calls on their own; the queue takes
//! no locks.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use async_trait::async_trait;
use std::sync::Arc;

/// Failure inside a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("sqlite: {0}")]
    Sqlite(#[from] sqlx::Error),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Backend(String),
}

/// String key/value store.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Value for `key`, or `None` when absent.
    async fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;
    /// Insert or overwrite `key`.
    async fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;
    /// Delete `key`. Deleting an absent key is not an error.
    async fn remove_item(&self, key: &str) -> Result<(), StoreError>;
    /// All keys, in no particular order.
    async fn keys(&self) -> Result<Vec<String>, StoreError>;
}

#[async_trait]
impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get_item(key).await
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set_item(key, value).await
    }

    async fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove_item(key).await
    }

    async fn keys(&self) -> Result<Vec<String>, StoreError> {
        (**self).keys().await
    }
}
