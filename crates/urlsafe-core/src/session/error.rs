use super::state::SessionId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// Retry is only offered from `Failed`.
    #[error("session {id} cannot be retried from state {state}")]
    NotRetryable { id: SessionId, state: &'static str },
}
