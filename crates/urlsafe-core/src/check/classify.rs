//! Classify transport errors for failure kinds and logging.

use super::model::TransportErrorKind;
use super::transport::TransportError;

/// Classify a curl error.
pub fn classify_curl_error(e: &curl::Error) -> TransportErrorKind {
    if e.is_operation_timedout() {
        return TransportErrorKind::Timeout;
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
    {
        return TransportErrorKind::Connection;
    }
    TransportErrorKind::Other
}

/// Classify any transport error.
pub fn classify_transport_error(e: &TransportError) -> TransportErrorKind {
    match e {
        TransportError::Curl(ce) => classify_curl_error(ce),
        TransportError::BodyTooLarge(_) | TransportError::Other(_) => TransportErrorKind::Other,
    }
}
