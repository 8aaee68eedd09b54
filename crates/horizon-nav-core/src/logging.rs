//! Logging facilities for Horizon Nav.
//!
//! Horizon Nav uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("horizon_nav_core=debug,horizon_nav=trace")
//!         .init();
//!
//!     // Your application code...
//! }
//! ```
//!
//! Stack mutations are logged at `debug`, per-event traffic at `trace` and
//! unexpected but tolerated situations (such as a dismiss request that
//! matches nothing) at `warn`.

/// Span names used throughout Horizon Nav for tracing.
pub mod span_names {
    /// Per-frame processing span.
    pub const FRAME: &str = "horizon_nav::frame";
    /// Page stack mutation span.
    pub const PAGE_STACK: &str = "horizon_nav::page_stack";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "horizon_nav_core";
    /// Page stack target.
    pub const PAGE_STACK: &str = "horizon_nav_core::page_stack";
    /// Modal list target.
    pub const MODAL: &str = "horizon_nav_core::modal";
    /// Navigator target.
    pub const NAVIGATOR: &str = "horizon_nav_core::navigator";
    /// Application context target.
    pub const APP: &str = "horizon_nav::app";
    /// Event loop target.
    pub const EVENT_LOOP: &str = "horizon_nav::event_loop";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Used to time a frame or a single navigation operation.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "horizon_nav::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}
