//! libcurl-backed [`Transport`].

use std::time::Duration;

use super::transport::{HttpResponse, Transport, TransportError};
use crate::config::UrlsafeConfig;

/// Largest response body buffered before the transfer is aborted.
pub const MAX_RESPONSE_BYTES: usize = 1024 * 1024;

/// Blocking JSON POST over libcurl with finite connect and total timeouts.
#[derive(Debug, Clone)]
pub struct CurlTransport {
    connect_timeout: Duration,
    timeout: Duration,
    max_body: usize,
}

impl CurlTransport {
    pub fn new(connect_timeout: Duration, timeout: Duration) -> Self {
        Self {
            connect_timeout,
            timeout,
            max_body: MAX_RESPONSE_BYTES,
        }
    }

    /// Override the response body cap.
    pub fn with_max_body(mut self, max_body: usize) -> Self {
        self.max_body = max_body;
        self
    }

    pub fn from_config(cfg: &UrlsafeConfig) -> Self {
        Self::new(cfg.connect_timeout(), cfg.request_timeout())
    }
}

impl Default for CurlTransport {
    fn default() -> Self {
        Self::from_config(&UrlsafeConfig::default())
    }
}

impl Transport for CurlTransport {
    fn post_json(&self, url: &str, body: &[u8]) -> Result<HttpResponse, TransportError> {
        let mut response: Vec<u8> = Vec::new();
        let mut overflowed = false;

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.post(true)?;
        easy.post_fields_copy(body)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.timeout)?;

        let mut list = curl::easy::List::new();
        list.append("Content-Type: application/json")?;
        list.append("Accept: application/json")?;
        easy.http_headers(list)?;

        let performed = {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                if response.len() + data.len() > self.max_body {
                    overflowed = true;
                    return Ok(0); // abort transfer
                }
                response.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()
        };
        if overflowed {
            return Err(TransportError::BodyTooLarge(self.max_body));
        }
        performed?;

        let status = easy.response_code()?;
        Ok(HttpResponse {
            status,
            body: response,
        })
    }
}
