//! Reusable identity and parent tracking for pages and modals.
//!
//! [`PageModalBase`] is meant to be embedded in concrete page and modal types,
//! much like a widget embeds its object base. It records the navigator passed
//! to `on_attached_to_navigator` as a weak reference and resolves the window
//! navigator at the root of the chain on demand.
//!
//! ```ignore
//! struct ReceivePage {
//!     base: PageModalBase,
//! }
//!
//! impl Page for ReceivePage {
//!     fn id(&self) -> &str {
//!         self.base.id()
//!     }
//!
//!     fn on_attached_to_navigator(&self, navigator: Weak<dyn PageNavigator>) {
//!         self.base.attach_to_page_navigator(navigator);
//!     }
//!
//!     fn handle_user_interactions(&self) {
//!         if self.copy_clicked() {
//!             self.base.window_navigator().show_modal(copied_modal());
//!         }
//!     }
//!     // ...
//! }
//! ```

use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use crate::error::{NavError, Result};
use crate::navigator::{PageNavigator, WindowNavigator};

/// The navigator a page or modal was attached to.
#[derive(Clone)]
enum ParentRef {
    /// A page navigator, possibly nested inside another page.
    Page(Weak<dyn PageNavigator>),
    /// A window navigator (modals are always attached to one).
    Window(Weak<dyn WindowNavigator>),
}

/// Identity plus a weak parent-navigator reference.
pub struct PageModalBase {
    id: String,
    parent: RwLock<Option<ParentRef>>,
}

impl PageModalBase {
    /// Create a detached base with the given ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent: RwLock::new(None),
        }
    }

    /// The ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Record the page navigator that displayed this page.
    pub fn attach_to_page_navigator(&self, navigator: Weak<dyn PageNavigator>) {
        *self.parent.write() = Some(ParentRef::Page(navigator));
    }

    /// Record the window navigator that showed this modal.
    pub fn attach_to_window(&self, navigator: Weak<dyn WindowNavigator>) {
        *self.parent.write() = Some(ParentRef::Window(navigator));
    }

    /// Whether a navigator has been recorded.
    pub fn is_attached(&self) -> bool {
        self.parent.read().is_some()
    }

    /// The immediate parent navigator, if attached and still alive.
    pub fn parent_navigator(&self) -> Option<Arc<dyn PageNavigator>> {
        match self.parent.read().clone()? {
            ParentRef::Page(navigator) => navigator.upgrade(),
            ParentRef::Window(navigator) => {
                navigator.upgrade().map(|window| window as Arc<dyn PageNavigator>)
            }
        }
    }

    /// Resolve the window navigator at the root of the parent chain.
    ///
    /// # Errors
    ///
    /// Fails if this base was never attached, if a navigator in the chain
    /// has been dropped, or if the chain ends without a window navigator.
    pub fn try_window_navigator(&self) -> Result<Arc<dyn WindowNavigator>> {
        let parent = self
            .parent
            .read()
            .clone()
            .ok_or_else(|| NavError::detached(&self.id))?;

        match parent {
            ParentRef::Window(navigator) => navigator
                .upgrade()
                .ok_or_else(|| NavError::navigator_dropped(&self.id)),
            ParentRef::Page(navigator) => navigator
                .upgrade()
                .ok_or_else(|| NavError::navigator_dropped(&self.id))?
                .window_navigator()
                .ok_or_else(|| NavError::no_window_navigator(&self.id)),
        }
    }

    /// Resolve the window navigator at the root of the parent chain.
    ///
    /// # Panics
    ///
    /// Panics if resolution fails. Using a page or modal before it has been
    /// attached is a programming error.
    pub fn window_navigator(&self) -> Arc<dyn WindowNavigator> {
        match self.try_window_navigator() {
            Ok(window) => window,
            Err(err) => {
                tracing::error!(target: "horizon_nav_core::navigator", id = %self.id, %err, "window navigator unresolved");
                panic!("{err}")
            }
        }
    }
}

impl fmt::Debug for PageModalBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageModalBase")
            .field("id", &self.id)
            .field("attached", &self.is_attached())
            .finish()
    }
}

static_assertions::assert_impl_all!(PageModalBase: Send, Sync);
