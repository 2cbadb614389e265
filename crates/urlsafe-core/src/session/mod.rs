//! Check sessions: the Idle → Loading → Succeeded/Failed lifecycle of one check.
//!
//! [`CheckSessions`] is the arena. Every started session gets the next
//! [`SessionId`] and becomes the single active session, superseding any
//! earlier one. A check result is applied only while its session id is still
//! the active one; the comparison and the state update happen under one lock,
//! so once [`SessionHandle::cancel`] returns no late result can land.
//! Results for superseded or cancelled sessions are dropped.

mod error;
mod handle;
mod state;


pub use error::SessionError;
pub use handle::SessionHandle;
pub use state::{SessionId, SessionState};

use jiff::Timestamp;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;

use crate::check::{CheckResult, SafetyCheckClient};
use crate::notify::Notifier;
use crate::report::SafetyReport;
use crate::validate::CandidateUrl;

struct Active {
    id: SessionId,
    state: watch::Sender<SessionState>,
}

pub(crate) struct Shared {
    client: SafetyCheckClient,
    notifier: Arc<dyn Notifier>,
    next_id: AtomicU64,
    active: Mutex<Option<Active>>,
}

impl Shared {
    fn lock_active(&self) -> MutexGuard<'_, Option<Active>> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_active(&self, id: SessionId) -> bool {
        self.lock_active().as_ref().is_some_and(|a| a.id == id)
    }

    /// Move session `id` to the state built by `next`, if it is still active.
    ///
    /// `next` runs under the lock, only when the transition happens. Entering
    /// `Failed` pushes the reason to the notifier before the lock is released,
    /// so a session cancelled concurrently never raises a toast. Returns false
    /// for stale sessions and for transitions the state machine forbids.
    fn apply(&self, id: SessionId, next: impl FnOnce() -> SessionState) -> bool {
        let active = self.lock_active();
        let Some(a) = active.as_ref().filter(|a| a.id == id) else {
            return false;
        };
        let next = next();
        let current = a.state.borrow().clone();
        if !current.can_transition_to(&next) {
            tracing::warn!(session = %id, from = %current, to = %next, "ignoring illegal transition");
            return false;
        }
        tracing::debug!(session = %id, from = %current, to = %next, "session transition");
        let reason = next.failure().map(|f| f.reason.clone());
        a.state.send_replace(next);
        if let Some(reason) = reason {
            self.notifier.notify(&reason);
        }
        true
    }

    /// Stop tracking `id`; returns false if it was not the active session.
    pub(crate) fn deactivate(&self, id: SessionId) -> bool {
        let mut active = self.lock_active();
        if active.as_ref().is_some_and(|a| a.id == id) {
            *active = None;
            true
        } else {
            false
        }
    }
}

/// Starts and tracks check sessions for one screen.
#[derive(Clone)]
pub struct CheckSessions {
    shared: Arc<Shared>,
}

impl CheckSessions {
    pub fn new(client: SafetyCheckClient, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            shared: Arc::new(Shared {
                client,
                notifier,
                next_id: AtomicU64::new(1),
                active: Mutex::new(None),
            }),
        }
    }

    /// Id of the session whose results would currently be applied.
    pub fn active_session(&self) -> Option<SessionId> {
        self.shared.lock_active().as_ref().map(|a| a.id)
    }

    /// Start a session for `url`: enters Loading immediately and issues one check.
    ///
    /// Supersedes any previous session. Must be called from within a tokio
    /// runtime. Dropping the returned handle cancels the session.
    pub fn start_session(&self, url: CandidateUrl) -> SessionHandle {
        let id = SessionId(self.shared.next_id.fetch_add(1, Ordering::Relaxed));
        let (tx, rx) = watch::channel(SessionState::Idle);
        if let Some(prev) = self.shared.lock_active().replace(Active { id, state: tx }) {
            tracing::debug!(session = %prev.id, by = %id, "session superseded");
        }
        tracing::info!(session = %id, url = %url, "starting check session");
        self.shared.apply(id, || SessionState::Loading);

        tokio::spawn(run_check(Arc::clone(&self.shared), id, url.clone()));
        SessionHandle::new(id, url, rx, Arc::clone(&self.shared))
    }

    /// Manual retry from `Failed`: cancels `handle`'s session and starts a fresh one for the same URL.
    pub fn retry(&self, handle: &SessionHandle) -> Result<SessionHandle, SessionError> {
        let state = handle.state();
        if !matches!(state, SessionState::Failed(_)) {
            return Err(SessionError::NotRetryable {
                id: handle.id(),
                state: state.name(),
            });
        }
        handle.cancel();
        tracing::info!(session = %handle.id(), "retrying check");
        Ok(self.start_session(handle.url().clone()))
    }
}

async fn run_check(shared: Arc<Shared>, id: SessionId, url: CandidateUrl) {
    if !shared.is_active(id) {
        tracing::debug!(session = %id, "session ended before the check was sent");
        return;
    }
    let result = shared.client.check(url.as_str()).await;

    let applied = shared.apply(id, move || match result {
        CheckResult::Success(verdict) => {
            SessionState::Succeeded(SafetyReport::new(url.as_str(), verdict, Timestamp::now()))
        }
        CheckResult::Failure(f) => SessionState::Failed(f),
    });
    if !applied {
        tracing::debug!(session = %id, "discarding stale check result");
    }
}
