//! Safety-check client.
//!
//! Issues one `POST {api_base}/check-url` per check through an injected
//! [`Transport`] and normalizes every outcome (verdict, HTTP error, transport
//! failure, unreadable body) into a [`CheckResult`]. No retry, no cache.

mod classify;
mod client;
mod http;
mod model;
mod transport;

pub use classify::{classify_curl_error, classify_transport_error};
pub use client::{SafetyCheckClient, CHECK_PATH};
pub use http::{CurlTransport, MAX_RESPONSE_BYTES};
pub use model::{
    CheckFailure, CheckRequest, CheckResult, FailureKind, SafetyStatus, SourceVerdict,
    TransportErrorKind, Verdict,
};
pub use transport::{HttpResponse, Transport, TransportError};
