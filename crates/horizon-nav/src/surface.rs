//! The graphics backend seen by the event loop.

use horizon_nav_core::{Dimensions, LayoutContext};

use crate::toast::Toast;

/// Draw target for one window.
///
/// The event loop calls these in a fixed order per frame:
/// `begin_frame`, `fill_background`, `present_page`, `present_modal` for each
/// modal bottom to top, `draw_toast` if one is active, then `end_frame`.
/// Pages and modals do their own drawing inside `layout`; the surface only
/// hears about the results.
pub trait Surface {
    fn begin_frame(&mut self, _ctx: &LayoutContext) {}

    fn fill_background(&mut self, _ctx: &LayoutContext) {}

    fn present_page(&mut self, _id: &str, _dimensions: Dimensions, _ctx: &LayoutContext) {}

    fn present_modal(&mut self, _id: &str, _dimensions: Dimensions, _ctx: &LayoutContext) {}

    fn draw_toast(&mut self, _toast: &Toast, _ctx: &LayoutContext) {}

    fn end_frame(&mut self, _ctx: &LayoutContext) {}
}

/// A surface that draws nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeadlessSurface;

impl Surface for HeadlessSurface {}

/// One call received by a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCall {
    BeginFrame(u64),
    Background,
    Page(String),
    Modal { id: String, layer: usize },
    Toast(String),
    EndFrame(u64),
}

/// A surface that records every call, for tests and demos.
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    calls: Vec<SurfaceCall>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls received so far.
    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    /// Return and forget the recorded calls.
    pub fn take(&mut self) -> Vec<SurfaceCall> {
        std::mem::take(&mut self.calls)
    }

    /// Number of completed frames.
    pub fn frames(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, SurfaceCall::EndFrame(_)))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn begin_frame(&mut self, ctx: &LayoutContext) {
        self.calls.push(SurfaceCall::BeginFrame(ctx.frame()));
    }

    fn fill_background(&mut self, _ctx: &LayoutContext) {
        self.calls.push(SurfaceCall::Background);
    }

    fn present_page(&mut self, id: &str, _dimensions: Dimensions, _ctx: &LayoutContext) {
        self.calls.push(SurfaceCall::Page(id.to_owned()));
    }

    fn present_modal(&mut self, id: &str, _dimensions: Dimensions, ctx: &LayoutContext) {
        self.calls.push(SurfaceCall::Modal {
            id: id.to_owned(),
            layer: ctx.layer,
        });
    }

    fn draw_toast(&mut self, toast: &Toast, _ctx: &LayoutContext) {
        self.calls.push(SurfaceCall::Toast(toast.message.clone()));
    }

    fn end_frame(&mut self, ctx: &LayoutContext) {
        self.calls.push(SurfaceCall::EndFrame(ctx.frame()));
    }
}
