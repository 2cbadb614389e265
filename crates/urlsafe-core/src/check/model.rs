//! Wire and result types for the check endpoint.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Overall or per-source verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SafetyStatus {
    Safe,
    Unsafe,
}

impl SafetyStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SafetyStatus::Safe => "safe",
            SafetyStatus::Unsafe => "unsafe",
        }
    }
}

impl fmt::Display for SafetyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One contributing source's opinion. Order is display order only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceVerdict {
    /// Provider name, e.g. "Google Safe Browsing". Also accepted as `source` on the wire.
    #[serde(alias = "source")]
    pub name: String,
    pub result: SafetyStatus,
}

/// Request body: `{ "url": "..." }`.
#[derive(Debug, Serialize)]
pub struct CheckRequest<'a> {
    pub url: &'a str,
}

/// Consumed fields of a 2xx response body.
#[derive(Debug, Deserialize)]
pub(crate) struct CheckResponse {
    pub(crate) status: SafetyStatus,
    #[serde(default)]
    pub(crate) sources: Option<Vec<SourceVerdict>>,
}

/// Parsed verdict of a successful check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub status: SafetyStatus,
    /// Never null; empty when the service sent no per-source list.
    pub sources: Vec<SourceVerdict>,
}

impl CheckResponse {
    pub(crate) fn into_verdict(self) -> Verdict {
        Verdict {
            status: self.status,
            sources: self.sources.unwrap_or_default(),
        }
    }
}

/// Coarse class of a transport-level failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// Connect or total timeout elapsed.
    Timeout,
    /// DNS, refused connection, reset, empty reply.
    Connection,
    /// Anything else (bad URL, TLS, worker panic).
    Other,
}

/// Why a check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The request never produced an HTTP response.
    Transport(TransportErrorKind),
    /// Non-2xx HTTP status; body is not parsed.
    Server(u32),
    /// 2xx status but the body is not a recognizable verdict. Counted as a server error.
    MalformedResponse,
}

impl FailureKind {
    pub fn is_server_error(self) -> bool {
        matches!(self, FailureKind::Server(_) | FailureKind::MalformedResponse)
    }
}

/// Failed check with a human-readable reason (never empty).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckFailure {
    pub kind: FailureKind,
    pub reason: String,
}

impl fmt::Display for CheckFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason)
    }
}

/// Outcome of one call to the check endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckResult {
    Success(Verdict),
    Failure(CheckFailure),
}

impl CheckResult {
    pub(crate) fn failure(kind: FailureKind, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        let reason = if reason.trim().is_empty() {
            "An error occurred".to_string()
        } else {
            reason
        };
        CheckResult::Failure(CheckFailure { kind, reason })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, CheckResult::Success(_))
    }
}
