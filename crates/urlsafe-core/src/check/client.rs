//! Safety-check client: one request per check, every outcome normalized.

use std::sync::Arc;

use super::classify::classify_transport_error;
use super::http::CurlTransport;
use super::model::{
    CheckRequest, CheckResponse, CheckResult, FailureKind, TransportErrorKind,
};
use super::transport::{HttpResponse, Transport};
use crate::config::UrlsafeConfig;

/// Path of the check endpoint, appended to the configured API base.
pub const CHECK_PATH: &str = "/check-url";

/// Client for `POST {api_base}/check-url`.
#[derive(Clone)]
pub struct SafetyCheckClient {
    endpoint: String,
    transport: Arc<dyn Transport>,
}

impl SafetyCheckClient {
    /// Builds a client for `api_base` using the given transport.
    pub fn new(api_base: &str, transport: Arc<dyn Transport>) -> Self {
        let endpoint = format!("{}{}", api_base.trim_end_matches('/'), CHECK_PATH);
        Self {
            endpoint,
            transport,
        }
    }

    /// Builds a client with a curl transport from configuration.
    pub fn from_config(cfg: &UrlsafeConfig) -> Self {
        Self::new(&cfg.api_base, Arc::new(CurlTransport::from_config(cfg)))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Checks `url` against the endpoint. Never fails: errors become [`CheckResult::Failure`].
    pub async fn check(&self, url: &str) -> CheckResult {
        let body = match serde_json::to_vec(&CheckRequest { url }) {
            Ok(b) => b,
            Err(e) => {
                return CheckResult::failure(
                    FailureKind::Transport(TransportErrorKind::Other),
                    e.to_string(),
                )
            }
        };

        tracing::debug!(endpoint = %self.endpoint, url, "sending check request");
        let joined = tokio::task::spawn_blocking({
            let transport = Arc::clone(&self.transport);
            let endpoint = self.endpoint.clone();
            move || transport.post_json(&endpoint, &body)
        })
        .await;

        match joined {
            Ok(Ok(response)) => interpret_response(response),
            Ok(Err(e)) => {
                let kind = classify_transport_error(&e);
                tracing::warn!(url, ?kind, "check request failed: {}", e);
                CheckResult::failure(FailureKind::Transport(kind), e.to_string())
            }
            Err(e) => {
                tracing::warn!(url, "check task join failed: {}", e);
                CheckResult::failure(
                    FailureKind::Transport(TransportErrorKind::Other),
                    e.to_string(),
                )
            }
        }
    }
}

/// Map a raw HTTP response to a result: non-2xx is a server error, 2xx must parse.
pub(crate) fn interpret_response(response: HttpResponse) -> CheckResult {
    if !response.is_success() {
        tracing::warn!(status = response.status, "check endpoint returned an error");
        return CheckResult::failure(
            FailureKind::Server(response.status),
            format!("HTTP error! status: {}", response.status),
        );
    }
    match serde_json::from_slice::<CheckResponse>(&response.body) {
        Ok(parsed) => CheckResult::Success(parsed.into_verdict()),
        Err(e) => {
            tracing::warn!("unreadable check response: {}", e);
            CheckResult::failure(
                FailureKind::MalformedResponse,
                format!("Malformed response from server: {e}"),
            )
        }
    }
}
