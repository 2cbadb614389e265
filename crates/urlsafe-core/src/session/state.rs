//! Session states and the legal transitions between them.

use std::fmt;

use crate::check::CheckFailure;
use crate::report::SafetyReport;

/// Monotonically increasing session identifier (generation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionId(pub(crate) u64);

impl SessionId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle of one check session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Loading,
    Succeeded(SafetyReport),
    Failed(CheckFailure),
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Loading => "loading",
            SessionState::Succeeded(_) => "succeeded",
            SessionState::Failed(_) => "failed",
        }
    }

    /// Succeeded and Failed are final for a session; only a new session leaves them.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Succeeded(_) | SessionState::Failed(_))
    }

    /// Idle → Loading → Succeeded | Failed. Nothing else within one session.
    pub fn can_transition_to(&self, next: &SessionState) -> bool {
        matches!(
            (self, next),
            (SessionState::Idle, SessionState::Loading)
                | (SessionState::Loading, SessionState::Succeeded(_))
                | (SessionState::Loading, SessionState::Failed(_))
        )
    }

    pub fn report(&self) -> Option<&SafetyReport> {
        match self {
            SessionState::Succeeded(r) => Some(r),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&CheckFailure> {
        match self {
            SessionState::Failed(f) => Some(f),
            _ => None,
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
