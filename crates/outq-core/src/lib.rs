pub mod config;
pub mod error;
pub mod logging;
pub mod offline;
pub mod queue;
pub mod retry;
pub mod store;
pub mod transport;

pub use config::{OutqConfig, DEFAULT_PREFIX, MARKER_HEADER};
pub use error::OfflineError;
pub use offline::{DrainReport, OfflineOptions, OfflineTransport};
pub use queue::{PendingRequest, RequestQueue, StoredRequest};
pub use retry::RetryPolicy;
pub use store::{KeyValueStore, MemoryStore, SqliteStore, StoreError};
pub use transport::{
    CurlTransport, ErrorCode, HttpRequest, HttpResponse, Method, Transport, TransportError,
};
