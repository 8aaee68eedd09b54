//! Navigator traits.
//!
//! A [`PageNavigator`] owns an ordered set of pages. A [`WindowNavigator`]
//! additionally owns the modal list and the re-render trigger for a whole
//! window. Nested navigators (such as [`MasterPage`](crate::MasterPage))
//! implement [`PageNavigator::window_navigator`] by asking their own parent,
//! so any page can reach its window no matter how deep it sits.

use std::sync::Arc;

use crate::modal_stack::ModalKey;
use crate::page::{Modal, Page};

/// Something that can display and close pages.
pub trait PageNavigator: Send + Sync {
    /// The visible page, if any.
    fn current_page(&self) -> Option<Arc<dyn Page>>;

    /// ID of the visible page, if any.
    fn current_page_id(&self) -> Option<String> {
        self.current_page().map(|page| page.id().to_owned())
    }

    /// Attach `page` and make it the visible page. A page with the same ID
    /// already held by the navigator is replaced.
    fn display(&self, page: Arc<dyn Page>);

    /// Close the visible page. Returns `false` if there was none.
    fn close_current_page(&self) -> bool;

    /// Close every page above the page with ID `id`, making it visible.
    /// Returns `false` if nothing was closed.
    fn close_pages_after(&self, id: &str) -> bool;

    /// Close every page, then attach and display `page`.
    fn clear_stack_and_display(&self, page: Arc<dyn Page>);

    /// Close every page.
    fn close_all_pages(&self);

    /// The window navigator at the root of this navigator's chain.
    ///
    /// Window navigators return themselves.
    fn window_navigator(&self) -> Option<Arc<dyn WindowNavigator>>;
}

/// The attachment point for a window's pages and modals.
pub trait WindowNavigator: PageNavigator {
    /// Attach and show `modal` above everything else. Modals with equal IDs
    /// stack; nothing is deduplicated.
    fn show_modal(&self, modal: Arc<dyn Modal>) -> ModalKey;

    /// Dismiss the most recently shown modal with ID `id`.
    /// Returns `false` if none matched.
    fn dismiss_modal(&self, id: &str) -> bool;

    /// Dismiss the modal instance returned by `show_modal`.
    fn dismiss_modal_by_key(&self, key: ModalKey) -> bool;

    /// The most recently shown modal.
    fn top_modal(&self) -> Option<Arc<dyn Modal>>;

    /// All modals, bottom first.
    fn modals(&self) -> Vec<Arc<dyn Modal>>;

    /// Request a redraw of the whole window from current state.
    ///
    /// Idempotent and callable from any thread.
    fn reload(&self);
}

/// The injected "request a new frame" primitive.
pub trait Invalidator: Send + Sync {
    fn invalidate(&self);
}

impl<F> Invalidator for F
where
    F: Fn() + Send + Sync,
{
    fn invalidate(&self) {
        self()
    }
}
