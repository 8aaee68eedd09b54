//! The single-threaded consumer of window events.
//!
//! All page and modal per-frame callbacks and all rendering happen on the
//! thread running [`EventLoop`]. Other threads only talk to it by mutating
//! the [`App`](crate::App) and requesting a redraw.

use std::sync::Arc;
use std::time::Instant;

use crossbeam_channel::Receiver;

use horizon_nav_core::logging::span_names;
use horizon_nav_core::{
    dispatch_key, KeyEvent, LayoutContext, Modal, PageNavigator, PerfSpan, Size, WindowNavigator,
};

use crate::app::App;
use crate::config::ModalInputPolicy;
use crate::error::{AppError, Result};
use crate::event::{LoopControl, WindowEvent};
use crate::surface::Surface;

/// Window size assumed until the backend reports one.
pub const DEFAULT_WINDOW_SIZE: Size = Size::new(1024, 768);

/// Drains [`WindowEvent`]s and turns them into lifecycle calls and frames.
pub struct EventLoop {
    app: Arc<App>,
    receiver: Receiver<WindowEvent>,
    frame: u64,
    size: Size,
}

impl EventLoop {
    pub(crate) fn new(app: Arc<App>, receiver: Receiver<WindowEvent>) -> Self {
        Self {
            app,
            receiver,
            frame: 0,
            size: DEFAULT_WINDOW_SIZE,
        }
    }

    /// Set the initial window size.
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    /// The application this loop serves.
    pub fn app(&self) -> &Arc<App> {
        &self.app
    }

    /// Number of frames rendered so far.
    pub fn frames_rendered(&self) -> u64 {
        self.frame
    }

    /// Current window size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Number of events waiting in the queue.
    pub fn pending_events(&self) -> usize {
        self.receiver.len()
    }

    /// Process events until the window is destroyed.
    ///
    /// Blocks the calling thread between events.
    pub fn run(mut self, surface: &mut dyn Surface) -> Result<()> {
        tracing::info!(target: "horizon_nav::event_loop", title = %self.app.config().title, "event loop started");
        loop {
            let event = self
                .receiver
                .recv()
                .map_err(|_| AppError::EventLoopExited)?;
            if self.dispatch(event, surface) == LoopControl::Exit {
                tracing::info!(target: "horizon_nav::event_loop", frames = self.frame, "event loop stopped");
                return Ok(());
            }
        }
    }

    /// Process every queued event without blocking.
    pub fn run_pending(&mut self, surface: &mut dyn Surface) -> LoopControl {
        while let Ok(event) = self.receiver.try_recv() {
            if self.dispatch(event, surface) == LoopControl::Exit {
                return LoopControl::Exit;
            }
        }
        LoopControl::Continue
    }

    /// Process a single event.
    pub fn dispatch(&mut self, event: WindowEvent, surface: &mut dyn Surface) -> LoopControl {
        tracing::trace!(target: "horizon_nav::event_loop", kind = event.kind(), "dispatching event");
        match event {
            WindowEvent::Frame { size } => {
                if let Some(size) = size {
                    self.size = size;
                }
                self.render_frame(surface);
                LoopControl::Continue
            }
            WindowEvent::Key(event) => {
                self.route_key(&event);
                LoopControl::Continue
            }
            WindowEvent::Destroy => {
                self.app.shutdown();
                LoopControl::Exit
            }
        }
    }

    /// Modals that take part in input handling under the configured policy.
    fn input_modals(&self) -> Vec<Arc<dyn Modal>> {
        match self.app.config().modal_input {
            ModalInputPolicy::TopOnly => self.app.top_modal().into_iter().collect(),
            ModalInputPolicy::All => self.app.modals(),
        }
    }

    fn render_frame(&mut self, surface: &mut dyn Surface) {
        self.app.redraw_handle().frame_started();
        self.frame += 1;
        let _span = PerfSpan::new(span_names::FRAME);

        if let Some(page) = self.app.current_page() {
            page.handle_user_interactions();
        }
        for modal in self.input_modals() {
            modal.handle();
        }

        // Interaction may have navigated; render from fresh state.
        let page = self.app.current_page();
        let modals = self.app.modals();

        let ctx = LayoutContext::new(self.frame, self.size, Instant::now());
        surface.begin_frame(&ctx);
        surface.fill_background(&ctx);

        if let Some(page) = page {
            let mut page_ctx = ctx.clone();
            let dimensions = page.layout(&mut page_ctx);
            surface.present_page(page.id(), dimensions, &page_ctx);
        }

        let mut layer = ctx.clone();
        for modal in &modals {
            layer = layer.next_layer();
            let mut modal_ctx = layer.clone();
            let dimensions = modal.layout(&mut modal_ctx);
            surface.present_modal(modal.id(), dimensions, &modal_ctx);
        }

        if let Some(toast) = self.app.active_toast(ctx.now()) {
            surface.draw_toast(&toast, &layer.next_layer());
        }

        surface.end_frame(&ctx);
        tracing::trace!(target: "horizon_nav::event_loop", frame = self.frame, modals = modals.len(), "frame rendered");
    }

    fn route_key(&self, event: &KeyEvent) {
        let mut delivered = 0usize;

        if let Some(page) = self.app.current_page()
            && let Some(handler) = page.as_key_handler()
            && dispatch_key(handler, event)
        {
            delivered += 1;
        }

        for modal in self.input_modals() {
            if let Some(handler) = modal.as_key_handler()
                && dispatch_key(handler, event)
            {
                delivered += 1;
            }
        }

        tracing::trace!(target: "horizon_nav::event_loop", key = %event.key, delivered, "key routed");
    }
}

impl std::fmt::Debug for EventLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventLoop")
            .field("frame", &self.frame)
            .field("size", &self.size)
            .field("pending_events", &self.receiver.len())
            .finish()
    }
}

static_assertions::assert_impl_all!(EventLoop: Send);
