//! Toast with a timed, cancellable auto-dismiss.
//!
//! A toast is `Visible` for `visible`, then `Dismissing` for `exit`, then gone.
//! Showing a new toast or dismissing the current one aborts the pending timer;
//! dropping the surface aborts it too. Each toast carries an id so a timer that
//! was already running when it got aborted cannot touch a newer toast.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use super::Notifier;
use crate::config::ToastConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastTiming {
    pub visible: Duration,
    pub exit: Duration,
}

impl From<&ToastConfig> for ToastTiming {
    fn from(cfg: &ToastConfig) -> Self {
        Self {
            visible: Duration::from_millis(cfg.visible_ms),
            exit: Duration::from_millis(cfg.exit_ms),
        }
    }
}

impl Default for ToastTiming {
    fn default() -> Self {
        Self::from(&ToastConfig::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    Visible,
    Dismissing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub phase: ToastPhase,
    pub shown_at: Instant,
}

pub struct ToastSurface {
    timing: ToastTiming,
    view: Arc<watch::Sender<Option<Toast>>>,
    timer: Mutex<Option<JoinHandle<()>>>,
    next_id: AtomicU64,
}

impl ToastSurface {
    pub fn new(timing: ToastTiming) -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            timing,
            view: Arc::new(tx),
            timer: Mutex::new(None),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn timing(&self) -> ToastTiming {
        self.timing
    }

    /// Receiver for renderers; yields `None` when nothing is shown.
    pub fn subscribe(&self) -> watch::Receiver<Option<Toast>> {
        self.view.subscribe()
    }

    pub fn current(&self) -> Option<Toast> {
        self.view.borrow().clone()
    }

    /// Show `message`, replacing any current toast and restarting the timer.
    pub fn show(&self, message: &str) {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let mut timer = self.timer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(old) = timer.take() {
            old.abort();
        }
        self.view.send_replace(Some(Toast {
            id,
            message: message.to_string(),
            phase: ToastPhase::Visible,
            shown_at: Instant::now(),
        }));
        *timer = self.spawn_timer(id, Some(self.timing.visible));
    }

    /// Close the current toast early: skip to the exit phase.
    pub fn dismiss(&self) {
        let mut timer = self.timer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(old) = timer.take() {
            old.abort();
        }
        let id = match self.view.borrow().as_ref() {
            Some(t) if t.phase == ToastPhase::Visible => t.id,
            _ => return,
        };
        set_phase(&self.view, id, ToastPhase::Dismissing);
        *timer = self.spawn_timer(id, None);
    }

    /// Fraction of the visible period left for the current toast, in [0.0, 1.0].
    pub fn remaining_fraction(&self) -> f64 {
        let view = self.view.borrow();
        let toast = match view.as_ref() {
            Some(t) if t.phase == ToastPhase::Visible => t,
            _ => return 0.0,
        };
        if self.timing.visible.is_zero() {
            return 0.0;
        }
        let elapsed = toast.shown_at.elapsed().as_secs_f64();
        (1.0 - elapsed / self.timing.visible.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// `visible` is `None` when the toast is already in its exit phase.
    fn spawn_timer(&self, id: u64, visible: Option<Duration>) -> Option<JoinHandle<()>> {
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(h) => h,
            Err(_) => {
                tracing::warn!("no tokio runtime; toast {} will not auto-dismiss", id);
                return None;
            }
        };
        let view = Arc::clone(&self.view);
        let exit = self.timing.exit;
        Some(handle.spawn(async move {
            if let Some(visible) = visible {
                tokio::time::sleep(visible).await;
                set_phase(&view, id, ToastPhase::Dismissing);
            }
            tokio::time::sleep(exit).await;
            view.send_if_modified(|cur| {
                if cur.as_ref().is_some_and(|t| t.id == id) {
                    *cur = None;
                    true
                } else {
                    false
                }
            });
        }))
    }
}

fn set_phase(view: &watch::Sender<Option<Toast>>, id: u64, phase: ToastPhase) {
    view.send_if_modified(|cur| match cur {
        Some(t) if t.id == id && t.phase != phase => {
            t.phase = phase;
            true
        }
        _ => false,
    });
}

impl Default for ToastSurface {
    fn default() -> Self {
        Self::new(ToastTiming::default())
    }
}

impl Drop for ToastSurface {
    fn drop(&mut self) {
        let timer = self.timer.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(t) = timer.take() {
            t.abort();
        }
    }
}

impl Notifier for ToastSurface {
    fn notify(&self, message: &str) {
        self.show(message);
    }
}
