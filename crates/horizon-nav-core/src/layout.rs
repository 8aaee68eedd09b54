//! Layout values passed through to pages and modals.
//!
//! Horizon Nav does not draw anything itself. A [`LayoutContext`] is built by
//! the event loop once per frame and handed to the current page and then to
//! each modal; whatever they paint goes through their own rendering stack.

use std::time::Instant;

/// A size in physical pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    /// The zero size.
    pub const ZERO: Self = Self {
        width: 0,
        height: 0,
    };

    /// Create a size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Check if either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// The space a page or modal used during layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dimensions {
    /// Occupied size.
    pub size: Size,
    /// Distance from the top edge to the text baseline, if any.
    pub baseline: u32,
}

impl Dimensions {
    /// Dimensions covering `size` with no baseline.
    pub const fn of(size: Size) -> Self {
        Self { size, baseline: 0 }
    }
}

/// Per-frame context handed to `layout`.
#[derive(Debug, Clone)]
pub struct LayoutContext {
    frame: u64,
    now: Instant,
    /// Maximum size available to the callee.
    pub max: Size,
    /// Paint layer: 0 for the page, 1.. for modals in stacking order.
    pub layer: usize,
}

impl LayoutContext {
    /// Create a context for frame number `frame`.
    pub fn new(frame: u64, max: Size, now: Instant) -> Self {
        Self {
            frame,
            now,
            max,
            layer: 0,
        }
    }

    /// Monotonic frame counter, starting at 1 for the first rendered frame.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Time the frame started.
    pub fn now(&self) -> Instant {
        self.now
    }

    /// The same frame, one paint layer higher.
    pub fn next_layer(&self) -> Self {
        Self {
            layer: self.layer + 1,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_is_empty() {
        assert!(Size::ZERO.is_empty());
        assert!(Size::new(10, 0).is_empty());
        assert!(!Size::new(800, 600).is_empty());
    }

    #[test]
    fn test_next_layer_keeps_frame() {
        let ctx = LayoutContext::new(7, Size::new(800, 600), Instant::now());
        let above = ctx.next_layer().next_layer();
        assert_eq!(above.layer, 2);
        assert_eq!(above.frame(), 7);
        assert_eq!(above.max, ctx.max);
    }
}
