//! Transport-level failure type.

use super::HttpResponse;
use std::fmt;

/// Symbolic failure code reported by a transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Network-level failure: connection refused, DNS, reset, nothing received.
    Network,
    /// Connect/read timed out before a response arrived.
    ConnectionAborted,
    /// A response arrived with a non-2xx status.
    BadResponse,
    /// The send was cancelled by the caller.
    Canceled,
    /// The request could not be built (bad URL, unsupported scheme, body encoding).
    InvalidRequest,
    /// Anything else.
    Other,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Network => "ERR_NETWORK",
            ErrorCode::ConnectionAborted => "ECONNABORTED",
            ErrorCode::BadResponse => "ERR_BAD_RESPONSE",
            ErrorCode::Canceled => "ERR_CANCELED",
            ErrorCode::InvalidRequest => "ERR_INVALID_REQUEST",
            ErrorCode::Other => "ERR_OTHER",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned by `Transport::send`.
///
/// `response` is `Some` only when the server actually answered; its absence is
/// what separates "unreachable" from "reached but rejected".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code}: {message}")]
pub struct TransportError {
    pub code: ErrorCode,
    pub message: String,
    pub response: Option<HttpResponse>,
}

impl TransportError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            response: None,
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Network, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConnectionAborted, message)
    }

    /// A non-2xx response, kept on the error so callers can inspect it.
    pub fn status(response: HttpResponse) -> Self {
        Self {
            code: ErrorCode::BadResponse,
            message: format!("request failed with status code {}", response.status),
            response: Some(response),
        }
    }

    pub fn has_response(&self) -> bool {
        self.response.is_some()
    }
}
