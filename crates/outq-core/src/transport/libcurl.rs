//! Blocking libcurl transport, driven from the tokio blocking pool.

use async_trait::async_trait;
use std::str;
use std::time::Duration;

use super::parse::parse_headers;
use super::{find_header, ErrorCode, HttpRequest, HttpResponse, Method, Transport, TransportError};
use crate::config::TransportConfig;
use crate::retry::{classify_curl_error, classify_http_status};

/// `Transport` backed by the curl crate (libcurl easy interface).
///
/// Each send runs one easy handle on `spawn_blocking`. Follows redirects and
/// treats any non-2xx status as a `BadResponse` error carrying the response.
#[derive(Debug, Clone, Copy)]
pub struct CurlTransport {
    pub connect_timeout: Duration,
    /// Used when the request does not set its own timeout.
    pub timeout: Duration,
}

impl Default for CurlTransport {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(30),
        }
    }
}

impl CurlTransport {
    pub fn from_config(cfg: &TransportConfig) -> Self {
        Self {
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
            timeout: Duration::from_secs(cfg.timeout_secs),
        }
    }
}

#[async_trait]
impl Transport for CurlTransport {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let this = *self;
        let request = request.clone();
        tokio::task::spawn_blocking(move || -> Result<HttpResponse, TransportError> {
            let response = perform(&this, &request)?;
            Ok(match request.transform_response.as_ref() {
                Some(hook) => hook(response),
                None => response,
            })
        })
        .await
        .map_err(|e| TransportError::new(ErrorCode::Other, format!("send task failed: {e}")))?
    }
}

fn curl_err(e: curl::Error) -> TransportError {
    TransportError::new(classify_curl_error(&e), e.to_string())
}

/// Runs in the current thread; call from `spawn_blocking` if used from async code.
fn perform(opts: &CurlTransport, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
    let full_url = request.full_url();
    url::Url::parse(&full_url).map_err(|e| {
        TransportError::new(
            ErrorCode::InvalidRequest,
            format!("invalid URL {full_url:?}: {e}"),
        )
    })?;

    let mut easy = curl::easy::Easy::new();
    easy.url(&full_url).map_err(curl_err)?;
    easy.follow_location(true).map_err(curl_err)?;
    easy.connect_timeout(opts.connect_timeout).map_err(curl_err)?;
    easy.timeout(request.timeout.unwrap_or(opts.timeout))
        .map_err(curl_err)?;

    let body = encode_body(request)?;
    match (&body, request.method) {
        // HEAD never carries a body and never expects one back.
        (_, Method::Head) => easy.nobody(true).map_err(curl_err)?,
        (Some(bytes), method) => {
            easy.post_fields_copy(bytes).map_err(curl_err)?;
            if method != Method::Post {
                easy.custom_request(method.as_str()).map_err(curl_err)?;
            }
        }
        (None, Method::Get) => {}
        (None, Method::Post) => {
            easy.post(true).map_err(curl_err)?;
            easy.post_field_size(0).map_err(curl_err)?;
        }
        (None, method) => easy.custom_request(method.as_str()).map_err(curl_err)?,
    }

    // Build curl list for headers ("Name: value").
    let mut list = curl::easy::List::new();
    for (k, v) in &request.headers {
        list.append(&format!("{}: {}", k.trim(), v.trim()))
            .map_err(curl_err)?;
    }
    if body.is_some()
        && request.method != Method::Head
        && find_header(&request.headers, "content-type").is_none()
    {
        if let Some(serde_json::Value::String(_)) = request.body {
            list.append("Content-Type: text/plain").map_err(curl_err)?;
        } else {
            list.append("Content-Type: application/json").map_err(curl_err)?;
        }
    }
    easy.http_headers(list).map_err(curl_err)?;

    let mut header_lines: Vec<String> = Vec::new();
    let mut data: Vec<u8> = Vec::new();
    {
        let mut transfer = easy.transfer();
        transfer
            .header_function(|chunk| {
                if let Ok(s) = str::from_utf8(chunk) {
                    header_lines.push(s.trim_end().to_string());
                }
                true
            })
            .map_err(curl_err)?;
        transfer
            .write_function(|chunk| {
                data.extend_from_slice(chunk);
                Ok(chunk.len())
            })
            .map_err(curl_err)?;
        transfer.perform().map_err(curl_err)?;
    }

    let code = easy.response_code().map_err(curl_err)?;
    let (parsed_status, headers) = parse_headers(&header_lines);
    let status = u16::try_from(code)
        .ok()
        .filter(|c| *c != 0)
        .or(parsed_status)
        .unwrap_or(0);

    let response = HttpResponse {
        status,
        headers,
        body: data,
    };
    tracing::debug!(
        method = %request.method,
        url = %full_url,
        status,
        "transport send completed"
    );

    match classify_http_status(status) {
        Ok(()) => Ok(response),
        Err(_) => Err(TransportError::status(response)),
    }
}

/// Strings are sent verbatim; any other JSON value is serialized.
fn encode_body(request: &HttpRequest) -> Result<Option<Vec<u8>>, TransportError> {
    match &request.body {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s.as_bytes().to_vec())),
        Some(value) => serde_json::to_vec(value).map(Some).map_err(|e| {
            TransportError::new(
                ErrorCode::InvalidRequest,
                format!("encode request body: {e}"),
            )
        }),
    }
}
