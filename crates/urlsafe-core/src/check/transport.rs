//! HTTP transport seam for the check client.

/// Raw HTTP response: status code and body bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u32,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Request never produced an HTTP response.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// libcurl reported an error (timeout, connection, DNS, ...).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// Response body exceeded the transport's size cap; the transfer was aborted.
    #[error("response body exceeds {0} bytes")]
    BodyTooLarge(usize),
    /// Any other transport failure, e.g. from a test double or a join error.
    #[error("{0}")]
    Other(String),
}

/// Sends one JSON POST and returns the raw response.
///
/// Implementations are blocking; the client runs them on tokio's blocking pool.
pub trait Transport: Send + Sync {
    fn post_json(&self, url: &str, body: &[u8]) -> Result<HttpResponse, TransportError>;
}
