//! Prelude module for Horizon Nav.
//!
//! ```ignore
//! use horizon_nav::prelude::*;
//! ```
//!
//! This provides the page and modal contracts, the navigator traits and the
//! application types most pages need.

// ============================================================================
// Contracts
// ============================================================================

pub use horizon_nav_core::{
    Closable, Dimensions, KeyEvent, KeyEventHandler, KeySet, LayoutContext, Modal, Page,
    PageModalBase, Size,
};
pub use horizon_nav_core::{Key, NamedKey};

// ============================================================================
// Navigation
// ============================================================================

pub use horizon_nav_core::{MasterPage, ModalKey, PageNavigator, WindowNavigator};

// ============================================================================
// Application
// ============================================================================

pub use crate::{App, AppConfig, EventLoop, Surface, ToastKind, WindowEvent};
