//! Transient notifications drawn above every modal.
//!
//! Only one toast is visible at a time. Showing a new one replaces the
//! current one; an expired toast is dropped the next time the slot is read.
//! A single [`ExpiryTimer`] thread redraws the window when the latest toast
//! expires.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

use crate::redraw::RedrawHandle;

/// Visual style of a toast.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ToastKind {
    #[default]
    Info,
    Success,
    Error,
}

/// A transient notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Text to show.
    pub message: String,
    /// Visual style.
    pub kind: ToastKind,
    /// When the toast stops being drawn.
    pub expires_at: Instant,
}

impl Toast {
    /// Create a toast that expires `lifetime` after `now`.
    pub fn new(message: impl Into<String>, kind: ToastKind, now: Instant, lifetime: Duration) -> Self {
        Self {
            message: message.into(),
            kind,
            expires_at: now + lifetime,
        }
    }

    /// Whether the toast is still visible at `now`.
    pub fn is_visible_at(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Holder for the latest toast.
#[derive(Debug, Default)]
pub(crate) struct ToastSlot {
    current: Mutex<Option<Toast>>,
}

impl ToastSlot {
    /// Replace the current toast.
    pub(crate) fn show(&self, toast: Toast) {
        let mut current = self.current.lock();
        if let Some(previous) = current.as_ref() {
            tracing::trace!(target: "horizon_nav::app", replaced = %previous.message, "toast replaced");
        }
        *current = Some(toast);
    }

    /// The toast visible at `now`, clearing it if it has expired.
    pub(crate) fn active(&self, now: Instant) -> Option<Toast> {
        let mut current = self.current.lock();
        match current.as_ref() {
            Some(toast) if toast.is_visible_at(now) => Some(toast.clone()),
            Some(_) => {
                *current = None;
                None
            }
            None => None,
        }
    }
}

#[derive(Debug, Default)]
struct TimerState {
    deadline: Option<Instant>,
    running: bool,
    stopped: bool,
}

#[derive(Debug, Default)]
struct TimerShared {
    state: Mutex<TimerState>,
    wake: Condvar,
}

/// Requests one redraw when the latest deadline passes.
///
/// The worker thread is started on first use and reused afterwards; a new
/// deadline replaces the pending one. Dropping the timer stops the thread.
#[derive(Debug)]
pub(crate) struct ExpiryTimer {
    shared: Arc<TimerShared>,
    redraw: RedrawHandle,
}

impl ExpiryTimer {
    pub(crate) fn new(redraw: RedrawHandle) -> Self {
        Self {
            shared: Arc::new(TimerShared::default()),
            redraw,
        }
    }

    /// Redraw at `deadline` instead of any earlier scheduled time.
    pub(crate) fn schedule(&self, deadline: Instant) {
        let mut state = self.shared.state.lock();
        state.deadline = Some(deadline);
        if !state.running {
            let shared = Arc::clone(&self.shared);
            let redraw = self.redraw.clone();
            let spawned = thread::Builder::new()
                .name("horizon-nav-toast".into())
                .spawn(move || run_timer(&shared, &redraw));
            match spawned {
                Ok(_) => state.running = true,
                Err(err) => {
                    tracing::warn!(target: "horizon_nav::app", %err, "failed to start toast expiry timer");
                }
            }
        }
        self.shared.wake.notify_one();
    }

    /// Whether the worker thread has been started.
    pub(crate) fn is_running(&self) -> bool {
        self.shared.state.lock().running
    }
}

impl Drop for ExpiryTimer {
    fn drop(&mut self) {
        self.shared.state.lock().stopped = true;
        self.shared.wake.notify_one();
    }
}

fn run_timer(shared: &TimerShared, redraw: &RedrawHandle) {
    let mut state = shared.state.lock();
    while !state.stopped {
        match state.deadline {
            None => shared.wake.wait(&mut state),
            Some(deadline) if Instant::now() >= deadline => {
                state.deadline = None;
                parking_lot::MutexGuard::unlocked(&mut state, || redraw.invalidate());
            }
            Some(deadline) => {
                shared.wake.wait_until(&mut state, deadline);
            }
        }
    }
    tracing::trace!(target: "horizon_nav::app", "toast expiry timer stopped");
}
