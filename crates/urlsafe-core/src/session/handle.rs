//! Handle to one check session, held by the presentation layer.

use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;

use super::state::{SessionId, SessionState};
use super::Shared;
use crate::validate::CandidateUrl;

/// Observes and controls one session. Dropping it cancels the session.
pub struct SessionHandle {
    id: SessionId,
    url: CandidateUrl,
    state: watch::Receiver<SessionState>,
    shared: Arc<Shared>,
}

impl SessionHandle {
    pub(super) fn new(
        id: SessionId,
        url: CandidateUrl,
        state: watch::Receiver<SessionState>,
        shared: Arc<Shared>,
    ) -> Self {
        Self {
            id,
            url,
            state,
            shared,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn url(&self) -> &CandidateUrl {
        &self.url
    }

    /// Latest state of this session.
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Suppress every later transition of this session. Idempotent.
    pub fn cancel(&self) {
        if self.shared.deactivate(self.id) {
            tracing::debug!(session = %self.id, "session cancelled");
        }
    }

    /// Wait for the next state change. `None` once the session was cancelled or superseded.
    pub async fn changed(&mut self) -> Option<SessionState> {
        self.state.changed().await.ok()?;
        Some(self.state.borrow_and_update().clone())
    }

    /// Wait until the session is terminal, or ends; returns the last state seen.
    pub async fn settled(&mut self) -> SessionState {
        loop {
            let current = self.state.borrow_and_update().clone();
            if current.is_terminal() {
                return current;
            }
            if self.state.changed().await.is_err() {
                return self.state();
            }
        }
    }
}

impl fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionHandle")
            .field("id", &self.id)
            .field("url", &self.url)
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

impl Drop for SessionHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}
