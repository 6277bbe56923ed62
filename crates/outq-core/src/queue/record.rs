//! The durable form of a request and the serializer hook that produces it.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::transport::{Headers, HttpRequest, Method};

/// Decides what (if anything) of a failed request gets queued.
/// Returning `None` means "do not queue"; the original error propagates.
pub type RequestSerializer = Arc<dyn Fn(&HttpRequest) -> Option<StoredRequest> + Send + Sync>;

/// The storable subset of an `HttpRequest`: target, method, headers, body.
///
/// Hooks and timeouts are not persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default)]
    pub method: Method,
    pub url: String,
    #[serde(default)]
    pub headers: Headers,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl StoredRequest {
    /// Default serializer: base address, method, path, headers and body.
    pub fn from_request(request: &HttpRequest) -> Option<StoredRequest> {
        Some(StoredRequest {
            base_url: request.base_url.clone(),
            method: request.method,
            url: request.url.clone(),
            headers: request.headers.clone(),
            data: request.body.clone(),
        })
    }

    /// Rebuild a sendable request. The result carries no hooks.
    pub fn to_request(&self) -> HttpRequest {
        HttpRequest {
            base_url: self.base_url.clone(),
            method: self.method,
            url: self.url.clone(),
            headers: self.headers.clone(),
            body: self.data.clone(),
            ..HttpRequest::default()
        }
    }
}

/// A queued request together with its store key.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRequest {
    pub key: String,
    pub request: StoredRequest,
}

/// The default serializer wrapped for `OfflineOptions`.
pub fn default_serializer() -> RequestSerializer {
    Arc::new(StoredRequest::from_request)
}
