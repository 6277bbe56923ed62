//! Classify transport failures: offline (queue it) versus everything else.

use crate::transport::{ErrorCode, TransportError};

/// True when the destination was unreachable: no response at all, and a
/// network-level or connect/read-timeout code.
///
/// Status errors, cancellations and malformed requests are never offline.
pub fn is_offline_error(err: &TransportError) -> bool {
    !err.has_response()
        && matches!(err.code, ErrorCode::Network | ErrorCode::ConnectionAborted)
}

/// Classify an HTTP status: 2xx passes, anything else is a `BadResponse`.
pub fn classify_http_status(status: u16) -> Result<(), ErrorCode> {
    match status {
        200..=299 => Ok(()),
        _ => Err(ErrorCode::BadResponse),
    }
}

/// Classify a curl error into a transport error code.
pub fn classify_curl_error(e: &curl::Error) -> ErrorCode {
    if e.is_operation_timedout() {
        return ErrorCode::ConnectionAborted;
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
        || e.is_ssl_connect_error()
    {
        return ErrorCode::Network;
    }
    if e.is_aborted_by_callback() {
        return ErrorCode::Canceled;
    }
    if e.is_url_malformed() || e.is_unsupported_protocol() {
        return ErrorCode::InvalidRequest;
    }
    ErrorCode::Other
}
