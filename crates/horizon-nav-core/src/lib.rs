//! Core systems for Horizon Nav.
//!
//! This crate provides the navigation and lifecycle runtime that decides which
//! page and which modals are active in a window:
//!
//! - **Contracts**: the [`Page`] and [`Modal`] traits and their optional
//!   [`Closable`] and [`KeyEventHandler`] capabilities
//! - **PageStack**: a deduplicating, lock-protected stack of pages with
//!   precisely ordered lifecycle callbacks
//! - **ModalStack**: an ordered modal list with stable [`ModalKey`] handles
//! - **Navigators**: [`SimpleWindowNavigator`], the attachment point for a
//!   window's pages and modals, and [`MasterPage`], a page hosting sub-pages
//! - **Parent resolution**: [`PageModalBase`] finds the window navigator at
//!   the root of any chain of nested navigators
//!
//! # Example
//!
//! ```
//! use std::sync::Weak;
//!
//! use horizon_nav_core::{
//!     Dimensions, LayoutContext, Page, PageModalBase, PageNavigator, SimpleWindowNavigator,
//! };
//!
//! struct Overview {
//!     base: PageModalBase,
//! }
//!
//! impl Page for Overview {
//!     fn id(&self) -> &str {
//!         self.base.id()
//!     }
//!     fn on_attached_to_navigator(&self, navigator: Weak<dyn PageNavigator>) {
//!         self.base.attach_to_page_navigator(navigator);
//!     }
//!     fn on_navigated_to(&self) {}
//!     fn handle_user_interactions(&self) {}
//!     fn layout(&self, ctx: &mut LayoutContext) -> Dimensions {
//!         Dimensions::of(ctx.max)
//!     }
//!     fn on_navigated_from(&self) {}
//! }
//!
//! let window = SimpleWindowNavigator::new(|| {});
//! window.display(std::sync::Arc::new(Overview {
//!     base: PageModalBase::new("overview"),
//! }));
//! assert_eq!(window.current_page_id().as_deref(), Some("overview"));
//! ```

mod base;
mod error;
mod key;
mod layout;
pub mod logging;
mod master_page;
mod modal_stack;
mod navigator;
mod page;
mod page_stack;
mod window_navigator;

#[cfg(test)]
pub(crate) mod testing;

pub use base::PageModalBase;
pub use error::{NavError, Result};
pub use key::{Key, KeyEvent, KeySet, KeyState, KeyboardModifiers, NamedKey};
pub use layout::{Dimensions, LayoutContext, Size};
pub use logging::PerfSpan;
pub use master_page::MasterPage;
pub use modal_stack::{ModalKey, ModalStack};
pub use navigator::{Invalidator, PageNavigator, WindowNavigator};
pub use page::{dispatch_key, retire_page, Closable, KeyEventHandler, Modal, Page};
pub use page_stack::PageStack;
pub use window_navigator::SimpleWindowNavigator;
