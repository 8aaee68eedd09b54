//! Coalescing redraw requests.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crossbeam_channel::{Sender, TrySendError};
use parking_lot::RwLock;

use horizon_nav_core::Invalidator;

use crate::event::WindowEvent;

struct RedrawState {
    pending: AtomicBool,
    requests: AtomicU64,
    events: Sender<WindowEvent>,
    backend: RwLock<Option<Box<dyn Invalidator>>>,
}

/// The application's reload primitive.
///
/// Any number of [`invalidate`](Self::invalidate) calls between two frames
/// produce at most one pending frame. With a backend installed (for example a
/// winit window) the request is forwarded to it and the backend coalesces;
/// without one a single `Frame` event is queued on the event loop.
///
/// Cloning shares the same state; every method is callable from any thread.
#[derive(Clone)]
pub struct RedrawHandle {
    state: Arc<RedrawState>,
}

impl RedrawHandle {
    pub(crate) fn new(events: Sender<WindowEvent>) -> Self {
        Self {
            state: Arc::new(RedrawState {
                pending: AtomicBool::new(false),
                requests: AtomicU64::new(0),
                events,
                backend: RwLock::new(None),
            }),
        }
    }

    /// Route future redraw requests to `backend` instead of the event queue.
    pub fn set_backend(&self, backend: impl Invalidator + 'static) {
        *self.state.backend.write() = Some(Box::new(backend));
    }

    /// Request a frame.
    pub fn invalidate(&self) {
        self.state.requests.fetch_add(1, Ordering::Relaxed);

        if let Some(backend) = self.state.backend.read().as_ref() {
            backend.invalidate();
            return;
        }

        if self.state.pending.swap(true, Ordering::AcqRel) {
            return;
        }

        match self.state.events.try_send(WindowEvent::frame()) {
            Ok(()) => {
                tracing::trace!(target: "horizon_nav::event_loop", "queued redraw");
            }
            Err(TrySendError::Full(_)) => {
                self.state.pending.store(false, Ordering::Release);
                tracing::warn!(target: "horizon_nav::event_loop", "event queue full, redraw request dropped");
            }
            Err(TrySendError::Disconnected(_)) => {
                tracing::trace!(target: "horizon_nav::event_loop", "redraw after event loop exit ignored");
            }
        }
    }

    /// Whether a queued frame has not been processed yet.
    pub fn is_pending(&self) -> bool {
        self.state.pending.load(Ordering::Acquire)
    }

    /// Total number of redraw requests, coalesced or not.
    pub fn request_count(&self) -> u64 {
        self.state.requests.load(Ordering::Relaxed)
    }

    /// Called by the event loop when a frame starts, re-arming the handle.
    pub(crate) fn frame_started(&self) {
        self.state.pending.store(false, Ordering::Release);
    }
}

impl Invalidator for RedrawHandle {
    fn invalidate(&self) {
        RedrawHandle::invalidate(self)
    }
}

impl fmt::Debug for RedrawHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedrawHandle")
            .field("pending", &self.is_pending())
            .field("requests", &self.request_count())
            .field("has_backend", &self.state.backend.read().is_some())
            .finish()
    }
}

static_assertions::assert_impl_all!(RedrawHandle: Send, Sync, Clone);
