//! Window events consumed by the event loop.

use crossbeam_channel::{Sender, TrySendError};

use horizon_nav_core::{KeyEvent, Size};

use crate::error::{AppError, Result};

/// Events delivered by the window backend, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowEvent {
    /// Draw a frame. `size` is the new window size when it changed.
    Frame {
        /// New window size, if it changed since the last frame.
        size: Option<Size>,
    },

    /// A raw key event for the active page and modals.
    Key(KeyEvent),

    /// The window is gone; the loop stops after this event.
    Destroy,
}

impl WindowEvent {
    /// A frame event with no size change.
    pub fn frame() -> Self {
        Self::Frame { size: None }
    }

    /// A frame event for a resized window.
    pub fn resized(size: Size) -> Self {
        Self::Frame { size: Some(size) }
    }

    /// Short name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Frame { .. } => "frame",
            Self::Key(_) => "key",
            Self::Destroy => "destroy",
        }
    }
}

/// What the event loop does after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    /// Keep running.
    Continue,
    /// The window was destroyed; stop.
    Exit,
}

/// Thread-safe handle for posting events to the event loop.
///
/// Cheap to clone; hand one to the window backend.
#[derive(Debug, Clone)]
pub struct EventSender {
    sender: Sender<WindowEvent>,
}

impl EventSender {
    pub(crate) fn new(sender: Sender<WindowEvent>) -> Self {
        Self { sender }
    }

    /// Post an event, blocking while the queue is full.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::EventLoopExited`] once the event loop is gone.
    pub fn send(&self, event: WindowEvent) -> Result<()> {
        tracing::trace!(target: "horizon_nav::event_loop", kind = event.kind(), "posting event");
        self.sender
            .send(event)
            .map_err(|_| AppError::EventLoopExited)
    }

    /// Post an event without blocking.
    ///
    /// Returns `Ok(false)` if the queue is full and the event was dropped.
    pub fn try_send(&self, event: WindowEvent) -> Result<bool> {
        match self.sender.try_send(event) {
            Ok(()) => Ok(true),
            Err(TrySendError::Full(event)) => {
                tracing::warn!(target: "horizon_nav::event_loop", kind = event.kind(), "event queue full, dropping event");
                Ok(false)
            }
            Err(TrySendError::Disconnected(_)) => Err(AppError::EventLoopExited),
        }
    }

    /// Post a key event.
    pub fn key(&self, event: KeyEvent) -> Result<()> {
        self.send(WindowEvent::Key(event))
    }

    /// Post a destroy event.
    pub fn destroy(&self) -> Result<()> {
        self.send(WindowEvent::Destroy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use horizon_nav_core::NamedKey;

    #[test]
    fn test_send_after_receiver_dropped() {
        let (tx, rx) = crossbeam_channel::bounded(1);
        let sender = EventSender::new(tx);
        drop(rx);

        assert!(matches!(sender.destroy(), Err(AppError::EventLoopExited)));
    }

    #[test]
    fn test_try_send_reports_full_queue() {
        let (tx, rx) = crossbeam_channel::bounded(1);
        let sender = EventSender::new(tx);

        assert!(sender.try_send(WindowEvent::frame()).unwrap());
        assert!(!sender.try_send(WindowEvent::frame()).unwrap());
        assert_eq!(rx.len(), 1);
    }

    #[test]
    fn test_key_helper() {
        let (tx, rx) = crossbeam_channel::bounded(4);
        let sender = EventSender::new(tx);
        sender.key(KeyEvent::pressed(NamedKey::Escape)).unwrap();

        assert_eq!(
            rx.try_recv().unwrap(),
            WindowEvent::Key(KeyEvent::pressed(NamedKey::Escape))
        );
    }
}
