//! A window navigator built from a page stack and a modal list.

use std::fmt;
use std::sync::{Arc, Weak};

use crate::modal_stack::{ModalKey, ModalStack};
use crate::navigator::{Invalidator, PageNavigator, WindowNavigator};
use crate::page::{Modal, Page};
use crate::page_stack::PageStack;

/// The default [`WindowNavigator`].
///
/// Page operations are delegated to a [`PageStack`]; modals live in an
/// independently locked [`ModalStack`]. Every mutation ends with a call to
/// the injected [`Invalidator`].
///
/// # Example
///
/// ```ignore
/// use horizon_nav_core::{PageNavigator, SimpleWindowNavigator, WindowNavigator};
///
/// let window = SimpleWindowNavigator::new(move || proxy.request_redraw());
/// window.display(OverviewPage::new());
/// window.show_modal(InfoModal::new("Wallet synced"));
/// ```
pub struct SimpleWindowNavigator {
    me: Weak<SimpleWindowNavigator>,
    pages: PageStack,
    modals: ModalStack,
    invalidator: Box<dyn Invalidator>,
}

impl SimpleWindowNavigator {
    /// Create a navigator that calls `invalidator` whenever it changes.
    pub fn new(invalidator: impl Invalidator + 'static) -> Arc<Self> {
        Arc::new_cyclic(|me| Self {
            me: me.clone(),
            pages: PageStack::new(),
            modals: ModalStack::new(),
            invalidator: Box::new(invalidator),
        })
    }

    /// The underlying page stack.
    pub fn page_stack(&self) -> &PageStack {
        &self.pages
    }

    /// The underlying modal list.
    pub fn modal_stack(&self) -> &ModalStack {
        &self.modals
    }

    fn weak_page_navigator(&self) -> Weak<dyn PageNavigator> {
        self.me.clone()
    }

    fn weak_window_navigator(&self) -> Weak<dyn WindowNavigator> {
        self.me.clone()
    }

    fn finish_dismiss(&self, modal: Option<Arc<dyn Modal>>) -> bool {
        let Some(modal) = modal else {
            return false;
        };
        tracing::debug!(target: "horizon_nav_core::modal", id = modal.id(), remaining = self.modals.len(), "dismissed modal");
        modal.on_dismiss();
        self.reload();
        true
    }
}

impl PageNavigator for SimpleWindowNavigator {
    fn current_page(&self) -> Option<Arc<dyn Page>> {
        self.pages.top()
    }

    fn display(&self, page: Arc<dyn Page>) {
        self.pages.push(page, self.weak_page_navigator());
        self.reload();
    }

    fn close_current_page(&self) -> bool {
        let closed = self.pages.pop();
        self.reload();
        closed
    }

    fn close_pages_after(&self, id: &str) -> bool {
        let closed = self.pages.pop_after(|page| page.id() == id);
        self.reload();
        closed
    }

    fn clear_stack_and_display(&self, page: Arc<dyn Page>) {
        page.on_attached_to_navigator(self.weak_page_navigator());
        self.pages.reset(vec![page]);
        self.reload();
    }

    fn close_all_pages(&self) {
        self.pages.reset(Vec::new());
        self.reload();
    }

    fn window_navigator(&self) -> Option<Arc<dyn WindowNavigator>> {
        self.me.upgrade().map(|me| me as Arc<dyn WindowNavigator>)
    }
}

impl WindowNavigator for SimpleWindowNavigator {
    fn show_modal(&self, modal: Arc<dyn Modal>) -> ModalKey {
        let key = self.modals.push(Arc::clone(&modal));
        tracing::debug!(target: "horizon_nav_core::modal", id = modal.id(), depth = self.modals.len(), "showing modal");
        modal.on_attached_to_navigator(self.weak_window_navigator());
        modal.on_resume();
        self.reload();
        key
    }

    fn dismiss_modal(&self, id: &str) -> bool {
        let removed = self.modals.remove_last_matching(id);
        if removed.is_none() {
            tracing::warn!(target: "horizon_nav_core::modal", id, "no modal to dismiss");
        }
        self.finish_dismiss(removed)
    }

    fn dismiss_modal_by_key(&self, key: ModalKey) -> bool {
        let removed = self.modals.remove(key);
        self.finish_dismiss(removed)
    }

    fn top_modal(&self) -> Option<Arc<dyn Modal>> {
        self.modals.top()
    }

    fn modals(&self) -> Vec<Arc<dyn Modal>> {
        self.modals.snapshot()
    }

    fn reload(&self) {
        self.invalidator.invalidate();
    }
}

impl fmt::Debug for SimpleWindowNavigator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpleWindowNavigator")
            .field("pages", &self.pages)
            .field("modals", &self.modals)
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(SimpleWindowNavigator: Send, Sync);

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::testing::{Journal, ReloadCounter, TestModal, TestPage};

    fn window() -> (Arc<SimpleWindowNavigator>, ReloadCounter) {
        let counter = ReloadCounter::default();
        (SimpleWindowNavigator::new(counter.invalidator()), counter)
    }

    #[test]
    fn test_display_attaches_and_reloads() {
        let journal = Journal::new();
        let (window, reloads) = window();
        let page = TestPage::new("overview", &journal);

        window.display(page.clone());

        assert_eq!(window.current_page_id().as_deref(), Some("overview"));
        assert!(page.base.is_attached());
        assert_eq!(reloads.count(), 1);
        assert_eq!(journal.take(), vec!["overview:attached", "overview:navigated_to"]);
    }

    #[test]
    fn test_display_sequence_keeps_backing_order() {
        let journal = Journal::new();
        let (window, _) = window();
        let page1 = TestPage::new("page1", &journal);
        let page2 = TestPage::new("page2", &journal);

        window.display(page1.clone());
        window.display(page2);
        window.display(page1);

        assert_eq!(window.page_stack().ids(), vec!["page2", "page1"]);
    }

    #[test]
    fn test_page_resolves_window() {
        let journal = Journal::new();
        let (window, _) = window();
        let page = TestPage::new("overview", &journal);
        window.display(page.clone());

        let resolved = page.base.window_navigator();
        assert_eq!(resolved.current_page_id().as_deref(), Some("overview"));
    }

    #[test]
    fn test_close_current_page_on_empty_stack() {
        let (window, reloads) = window();
        assert!(!window.close_current_page());
        assert_eq!(reloads.count(), 1);
    }

    #[test]
    fn test_close_pages_after() {
        let journal = Journal::new();
        let (window, _) = window();
        for id in ["wallets", "overview", "send"] {
            window.display(TestPage::closable(id, &journal));
        }

        assert!(window.close_pages_after("wallets"));
        assert_eq!(window.current_page_id().as_deref(), Some("wallets"));
        assert!(!window.close_pages_after("missing"));
    }

    #[test]
    fn test_clear_stack_and_display() {
        let journal = Journal::new();
        let (window, _) = window();
        let old = TestPage::closable("old", &journal);
        window.display(old.clone());
        journal.take();

        let fresh = TestPage::new("fresh", &journal);
        window.clear_stack_and_display(fresh.clone());

        assert_eq!(window.page_stack().ids(), vec!["fresh"]);
        assert_eq!(
            journal.take(),
            vec![
                "fresh:attached",
                "old:navigated_from",
                "old:closed",
                "fresh:navigated_to",
            ]
        );
    }

    #[test]
    fn test_close_all_pages() {
        let journal = Journal::new();
        let (window, _) = window();
        window.display(TestPage::new("a", &journal));
        window.display(TestPage::new("b", &journal));

        window.close_all_pages();

        assert!(window.current_page().is_none());
    }

    #[test]
    fn test_show_modal_stacks_equal_ids() {
        let journal = Journal::new();
        let (window, reloads) = window();
        let m1 = TestModal::new("x", &journal);
        let m2 = TestModal::new("x", &journal);

        window.show_modal(m1);
        window.show_modal(m2.clone());

        let top = window.top_modal().unwrap();
        assert!(std::ptr::addr_eq(Arc::as_ptr(&top), Arc::as_ptr(&m2)));
        assert_eq!(window.modals().len(), 2);
        assert_eq!(reloads.count(), 2);
        assert_eq!(m2.count("attached"), 1);
        assert_eq!(m2.count("resumed"), 1);
    }

    #[test]
    fn test_dismiss_modal_removes_most_recent_match() {
        let journal = Journal::new();
        let (window, _) = window();
        let m1 = TestModal::new("x", &journal);
        let m2 = TestModal::new("y", &journal);
        let m3 = TestModal::new("x", &journal);
        window.show_modal(m1.clone());
        window.show_modal(m2.clone());
        window.show_modal(m3.clone());

        assert!(window.dismiss_modal("x"));

        assert_eq!(window.modal_stack().ids(), vec!["x", "y"]);
        assert_eq!(m3.count("dismissed"), 1);
        assert_eq!(m1.count("dismissed"), 0);
    }

    #[test]
    fn test_dismiss_modal_without_match() {
        let journal = Journal::new();
        let (window, reloads) = window();
        window.show_modal(TestModal::new("x", &journal));

        assert!(!window.dismiss_modal("y"));
        assert_eq!(window.modals().len(), 1);
        assert_eq!(reloads.count(), 1);
    }

    #[test]
    fn test_dismiss_modal_by_key() {
        let journal = Journal::new();
        let (window, _) = window();
        let first = TestModal::new("confirm", &journal);
        let key = window.show_modal(first.clone());
        window.show_modal(TestModal::new("confirm", &journal));

        assert!(window.dismiss_modal_by_key(key));
        assert!(!window.dismiss_modal_by_key(key));
        assert_eq!(first.count("dismissed"), 1);
        assert_eq!(window.modals().len(), 1);
    }

    #[test]
    fn test_modal_resolves_window() {
        let journal = Journal::new();
        let (window, _) = window();
        let modal = TestModal::new("info", &journal);
        window.show_modal(modal.clone());

        let resolved = modal.base.try_window_navigator().unwrap();
        assert_eq!(resolved.modals().len(), 1);
    }

    #[test]
    fn test_dropped_window_is_reported() {
        let journal = Journal::new();
        let modal = TestModal::new("info", &journal);
        {
            let (window, _) = window();
            window.show_modal(modal.clone());
            window.dismiss_modal("info");
        }
        assert_eq!(
            modal.base.try_window_navigator().err(),
            Some(crate::NavError::navigator_dropped("info"))
        );
    }

    #[test]
    fn test_concurrent_show_modal() {
        let journal = Journal::new();
        let (window, reloads) = window();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let window = window.clone();
                let journal = journal.clone();
                thread::spawn(move || {
                    for j in 0..25 {
                        window.show_modal(TestModal::new(&format!("m{i}-{j}"), &journal));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(window.modals().len(), 200);
        assert_eq!(reloads.count(), 200);
    }
}
