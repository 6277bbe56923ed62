//! Transport abstraction: the request/response model and the `Transport` trait.
//!
//! Anything that can put an `HttpRequest` on the wire implements `Transport`.
//! The offline interceptor implements the same trait, so callers keep issuing
//! requests exactly as before once it is wrapped around a real transport.

mod libcurl;
mod error;
mod parse;

pub use libcurl::CurlTransport;
pub use error::{ErrorCode, TransportError};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Header map. Names keep the caller's spelling; lookups are case-insensitive.
pub type Headers = BTreeMap<String, String>;

/// Response hook applied by the transport after a successful send.
pub type TransformResponse = Arc<dyn Fn(HttpResponse) -> HttpResponse + Send + Sync>;

/// HTTP method. Serialized lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
        }
    }
}

impl std::str::FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "PATCH" => Ok(Method::Patch),
            "DELETE" => Ok(Method::Delete),
            "HEAD" => Ok(Method::Head),
            "OPTIONS" => Ok(Method::Options),
            other => Err(format!("unsupported HTTP method: {other}")),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An outgoing request as the application builds it.
///
/// `timeout` and `transform_response` only live for the duration of a send;
/// they are dropped when a request is persisted.
#[derive(Clone, Default)]
pub struct HttpRequest {
    pub base_url: Option<String>,
    pub method: Method,
    /// Path relative to `base_url`, or an absolute URL.
    pub url: String,
    pub headers: Headers,
    pub body: Option<serde_json::Value>,
    pub timeout: Option<Duration>,
    pub transform_response: Option<TransformResponse>,
}

impl HttpRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_transform_response<F>(mut self, f: F) -> Self
    where
        F: Fn(HttpResponse) -> HttpResponse + Send + Sync + 'static,
    {
        self.transform_response = Some(Arc::new(f));
        self
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Resolve `url` against `base_url` the way browsers combine a base and a path:
    /// absolute URLs win, otherwise exactly one slash joins the two.
    pub fn full_url(&self) -> String {
        match self.base_url.as_deref() {
            Some(base) if !base.is_empty() && !is_absolute_url(&self.url) => {
                if self.url.is_empty() {
                    base.to_string()
                } else {
                    format!(
                        "{}/{}",
                        base.trim_end_matches('/'),
                        self.url.trim_start_matches('/')
                    )
                }
            }
            _ => self.url.clone(),
        }
    }
}

impl fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpRequest")
            .field("base_url", &self.base_url)
            .field("method", &self.method)
            .field("url", &self.url)
            .field("headers", &self.headers)
            .field("body", &self.body)
            .field("timeout", &self.timeout)
            .field("transform_response", &self.transform_response.is_some())
            .finish()
    }
}

/// A response received from (or synthesized in place of) the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Headers,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }

    /// Build a response with a JSON body and matching content type.
    pub fn json<T: Serialize>(status: u16, value: &T) -> serde_json::Result<Self> {
        let body = serde_json::to_vec(value)?;
        let mut headers = Headers::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        Ok(Self {
            status,
            headers,
            body,
        })
    }

    /// Decode the body as JSON.
    pub fn body_json<T: serde::de::DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_slice(&self.body)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// Something that performs one network send.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(request).await
    }
}

pub(crate) fn find_header<'a>(headers: &'a Headers, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

fn is_absolute_url(url: &str) -> bool {
    // scheme "://" or protocol-relative "//"
    url.starts_with("//")
        || url
            .split_once("://")
            .map(|(scheme, _)| {
                !scheme.is_empty()
                    && scheme
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
            })
            .unwrap_or(false)
}
