//! Horizon Nav - navigation and lifecycle runtime for desktop applications.
//!
//! This is the main crate. It re-exports everything from
//! [`horizon_nav_core`] and adds the application layer:
//!
//! - [`App`], the root window navigator with a back-stack, modal list and
//!   toasts, built by [`AppBuilder`]
//! - [`EventLoop`], the single thread that turns [`WindowEvent`]s into
//!   lifecycle calls and frames
//! - [`Surface`], the seam to the graphics backend
//! - [`AppConfig`], loadable from TOML
//! - a winit bridge (feature `winit`, on by default)
//!
//! # Example
//!
//! ```
//! use horizon_nav::{App, AppConfig, HeadlessSurface, WindowEvent};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (app, event_loop) = App::builder(AppConfig::with_title("Wallet")).build()?;
//!     app.event_sender().send(WindowEvent::Destroy)?;
//!     event_loop.run(&mut HeadlessSurface)?;
//!     Ok(())
//! }
//! ```

pub use horizon_nav_core::*;

mod app;
mod config;
mod error;
mod event;
mod event_loop;
pub mod prelude;
mod redraw;
mod surface;
mod toast;
#[cfg(feature = "winit")]
pub mod winit_bridge;

pub use app::{App, AppBuilder};
pub use config::{AppConfig, ModalInputPolicy};
pub use error::{AppError, BoxError};
pub use event::{EventSender, LoopControl, WindowEvent};
pub use event_loop::{EventLoop, DEFAULT_WINDOW_SIZE};
pub use redraw::RedrawHandle;
pub use surface::{HeadlessSurface, RecordingSurface, Surface, SurfaceCall};
pub use toast::{Toast, ToastKind};
#[cfg(feature = "winit")]
pub use winit_bridge::{WindowInvalidator, WinitBridge};
