//! Notification surface: transient error messages for the user.

mod toast;

pub use toast::{Toast, ToastPhase, ToastSurface, ToastTiming};

/// Receives transient messages (e.g. a failed check's reason).
///
/// Check sessions call this while holding their own lock: implementations
/// must return promptly and must not call back into `CheckSessions`.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Discards every message.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _message: &str) {}
}
