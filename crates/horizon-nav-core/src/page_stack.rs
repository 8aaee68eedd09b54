//! Deduplicating page stack with ordered lifecycle callbacks.
//!
//! A [`PageStack`] holds pages bottom first; the last page is the visible
//! one. No two pages in a stack share an ID. Every operation takes the stack
//! lock once and keeps it until the lifecycle callbacks it triggers have run,
//! so two mutations of the same stack never interleave their callbacks.
//!
//! # Re-entrancy
//!
//! Callbacks run while the lock is held and the stack is between states.
//! A page must not call back into the stack that is notifying it from inside
//! `on_navigated_to`, `on_navigated_from` or `on_closed`; doing so deadlocks.
//! Navigation requests made from `handle_user_interactions` or from other
//! threads are fine.

use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::navigator::PageNavigator;
use crate::page::{retire_page, Page};

/// An ordered, deduplicated stack of pages.
pub struct PageStack {
    pages: Mutex<Vec<Arc<dyn Page>>>,
}

impl PageStack {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self {
            pages: Mutex::new(Vec::new()),
        }
    }

    /// The visible page.
    pub fn top(&self) -> Option<Arc<dyn Page>> {
        self.pages.lock().last().cloned()
    }

    /// Number of pages.
    pub fn len(&self) -> usize {
        self.pages.lock().len()
    }

    /// Check if the stack is empty.
    pub fn is_empty(&self) -> bool {
        self.pages.lock().is_empty()
    }

    /// Page IDs, bottom first.
    pub fn ids(&self) -> Vec<String> {
        self.pages
            .lock()
            .iter()
            .map(|page| page.id().to_owned())
            .collect()
    }

    /// Check if a page with `id` is on the stack.
    pub fn contains(&self, id: &str) -> bool {
        self.pages.lock().iter().any(|page| page.id() == id)
    }

    /// Push `page`, attach it to `navigator` and navigate to it.
    ///
    /// The previous top is navigated from unless it has the same ID as
    /// `page`. Any page already on the stack with that ID is navigated from,
    /// closed and removed, so pushing a page that is present moves it to the
    /// top with a fresh navigated-to.
    pub fn push(&self, page: Arc<dyn Page>, navigator: Weak<dyn PageNavigator>) {
        let mut pages = self.pages.lock();

        if let Some(top) = pages.last() {
            if top.id() != page.id() {
                top.on_navigated_from();
            }
        }

        if let Some(index) = pages.iter().position(|existing| existing.id() == page.id()) {
            let existing = pages.remove(index);
            tracing::debug!(target: "horizon_nav_core::page_stack", id = existing.id(), index, "replacing page with duplicate ID");
            retire_page(existing.as_ref());
        }

        pages.push(Arc::clone(&page));
        tracing::debug!(target: "horizon_nav_core::page_stack", id = page.id(), depth = pages.len(), "pushed page");

        page.on_attached_to_navigator(navigator);
        page.on_navigated_to();
    }

    /// Remove the top page, navigating to the page below it.
    ///
    /// Returns `false` if the stack was empty.
    pub fn pop(&self) -> bool {
        let mut pages = self.pages.lock();

        let Some(page) = pages.pop() else {
            return false;
        };
        tracing::debug!(target: "horizon_nav_core::page_stack", id = page.id(), depth = pages.len(), "popped page");
        retire_page(page.as_ref());

        if let Some(top) = pages.last() {
            top.on_navigated_to();
        }
        true
    }

    /// Remove every page above the top-most page matching `matcher`, and
    /// navigate to the matched page.
    ///
    /// Returns `true` if at least one page was removed. When nothing matches
    /// the stack is left untouched and no callbacks run. A match already on
    /// top is navigated to again and `false` is returned.
    pub fn pop_after<F>(&self, matcher: F) -> bool
    where
        F: Fn(&dyn Page) -> bool,
    {
        let mut pages = self.pages.lock();

        let Some(index) = pages.iter().rposition(|page| matcher(page.as_ref())) else {
            return false;
        };
        let removed = pages.split_off(index + 1);
        tracing::debug!(
            target: "horizon_nav_core::page_stack",
            id = pages[index].id(),
            removed = removed.len(),
            "popped pages above match"
        );
        for page in removed.iter().rev() {
            retire_page(page.as_ref());
        }

        pages[index].on_navigated_to();
        !removed.is_empty()
    }

    /// Replace the whole stack with `new_pages` (bottom first).
    ///
    /// Every current page is navigated from and closed. The last of
    /// `new_pages`, if any, is navigated to. Attaching the new pages is the
    /// caller's job.
    pub fn reset(&self, new_pages: Vec<Arc<dyn Page>>) {
        let mut pages = self.pages.lock();

        let old = std::mem::replace(&mut *pages, new_pages);
        tracing::debug!(
            target: "horizon_nav_core::page_stack",
            closed = old.len(),
            depth = pages.len(),
            "reset stack"
        );
        for page in old.iter().rev() {
            retire_page(page.as_ref());
        }

        if let Some(top) = pages.last() {
            top.on_navigated_to();
        }
    }

    /// Drop every page, sending only `on_closed`.
    ///
    /// For owners whose visible page has already been navigated from, such
    /// as a master page being closed by its own navigator.
    pub fn discard(&self) {
        let mut pages = self.pages.lock();

        let old = std::mem::take(&mut *pages);
        tracing::debug!(target: "horizon_nav_core::page_stack", closed = old.len(), "discarded stack");
        for page in old.iter().rev() {
            if let Some(closable) = page.as_closable() {
                closable.on_closed();
            }
        }
    }
}

impl Default for PageStack {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PageStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageStack").field("pages", &self.ids()).finish()
    }
}

static_assertions::assert_impl_all!(PageStack: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{detached_navigator, Journal, TestPage};

    fn push(stack: &PageStack, page: &Arc<TestPage>) {
        stack.push(page.clone(), detached_navigator());
    }

    #[test]
    fn test_empty_stack() {
        let stack = PageStack::new();
        assert!(stack.top().is_none());
        assert!(stack.is_empty());
        assert!(!stack.pop());
        assert!(!stack.pop_after(|_| true));
    }

    #[test]
    fn test_push_navigates_from_previous_top() {
        let journal = Journal::new();
        let stack = PageStack::new();
        let a = TestPage::closable("a", &journal);
        let b = TestPage::closable("b", &journal);

        push(&stack, &a);
        push(&stack, &b);

        assert_eq!(stack.ids(), vec!["a", "b"]);
        assert_eq!(
            journal.take(),
            vec![
                "a:attached",
                "a:navigated_to",
                "a:navigated_from",
                "b:attached",
                "b:navigated_to",
            ]
        );
    }

    #[test]
    fn test_push_duplicate_id_replaces_instance() {
        let journal = Journal::new();
        let stack = PageStack::new();
        let old = TestPage::closable("a", &journal);
        push(&stack, &old);
        journal.take();

        let new = TestPage::closable("a", &journal);
        push(&stack, &new);

        assert_eq!(stack.len(), 1);
        let top = stack.top().unwrap();
        assert!(std::ptr::addr_eq(Arc::as_ptr(&top), Arc::as_ptr(&new)));
        assert_eq!(old.count("navigated_from"), 1);
        assert_eq!(old.count("closed"), 1);
        assert_eq!(new.count("attached"), 1);
        assert_eq!(new.count("navigated_to"), 1);
        assert_eq!(new.count("navigated_from"), 0);
    }

    #[test]
    fn test_push_existing_moves_it_to_top() {
        let journal = Journal::new();
        let stack = PageStack::new();
        let page1 = TestPage::new("page1", &journal);
        let page2 = TestPage::new("page2", &journal);

        push(&stack, &page1);
        push(&stack, &page2);
        push(&stack, &page1);

        assert_eq!(stack.ids(), vec!["page2", "page1"]);
        assert_eq!(stack.top().unwrap().id(), "page1");
    }

    #[test]
    fn test_pop_navigates_to_page_below() {
        let journal = Journal::new();
        let stack = PageStack::new();
        let a = TestPage::closable("a", &journal);
        let b = TestPage::closable("b", &journal);
        push(&stack, &a);
        push(&stack, &b);
        journal.take();

        assert!(stack.pop());

        assert_eq!(stack.top().unwrap().id(), "a");
        assert_eq!(
            journal.take(),
            vec!["b:navigated_from", "b:closed", "a:navigated_to"]
        );
    }

    #[test]
    fn test_pop_non_closable_page() {
        let journal = Journal::new();
        let stack = PageStack::new();
        let a = TestPage::new("a", &journal);
        push(&stack, &a);
        journal.take();

        assert!(stack.pop());
        assert!(stack.is_empty());
        assert_eq!(journal.take(), vec!["a:navigated_from"]);
    }

    #[test]
    fn test_pop_after_no_match_is_noop() {
        let journal = Journal::new();
        let stack = PageStack::new();
        push(&stack, &TestPage::closable("a", &journal));
        push(&stack, &TestPage::closable("b", &journal));
        journal.take();

        assert!(!stack.pop_after(|page| page.id() == "nonexistent"));

        assert_eq!(stack.ids(), vec!["a", "b"]);
        assert!(journal.take().is_empty());
    }

    #[test]
    fn test_pop_after_removes_pages_above_match() {
        let journal = Journal::new();
        let stack = PageStack::new();
        for id in ["a", "b", "c", "d"] {
            push(&stack, &TestPage::closable(id, &journal));
        }
        journal.take();

        assert!(stack.pop_after(|page| page.id() == "b"));

        assert_eq!(stack.ids(), vec!["a", "b"]);
        assert_eq!(
            journal.take(),
            vec![
                "d:navigated_from",
                "d:closed",
                "c:navigated_from",
                "c:closed",
                "b:navigated_to",
            ]
        );
    }

    #[test]
    fn test_pop_after_match_on_top_navigates_to_it() {
        let journal = Journal::new();
        let stack = PageStack::new();
        push(&stack, &TestPage::new("a", &journal));
        push(&stack, &TestPage::new("b", &journal));
        journal.take();

        assert!(!stack.pop_after(|page| page.id() == "b"));
        assert_eq!(stack.ids(), vec!["a", "b"]);
        assert_eq!(journal.take(), vec!["b:navigated_to"]);
    }

    #[test]
    fn test_discard_only_closes() {
        let journal = Journal::new();
        let stack = PageStack::new();
        push(&stack, &TestPage::closable("a", &journal));
        push(&stack, &TestPage::new("b", &journal));
        push(&stack, &TestPage::closable("c", &journal));
        journal.take();

        stack.discard();

        assert!(stack.is_empty());
        assert_eq!(journal.take(), vec!["c:closed", "a:closed"]);
    }

    #[test]
    fn test_contains() {
        let journal = Journal::new();
        let stack = PageStack::new();
        push(&stack, &TestPage::new("a", &journal));

        assert!(stack.contains("a"));
        assert!(!stack.contains("b"));
        stack.pop();
        assert!(!stack.contains("a"));
    }

    #[test]
    fn test_reset_with_no_pages_empties_stack() {
        let journal = Journal::new();
        let stack = PageStack::new();
        let a = TestPage::closable("a", &journal);
        let b = TestPage::closable("b", &journal);
        push(&stack, &a);
        push(&stack, &b);

        stack.reset(Vec::new());

        assert!(stack.top().is_none());
        for page in [&a, &b] {
            assert_eq!(page.count("closed"), 1);
        }
        // `a` was already navigated from when `b` was pushed
        assert_eq!(a.count("navigated_from"), 2);
        assert_eq!(b.count("navigated_from"), 1);
    }

    #[test]
    fn test_reset_navigates_to_last_new_page() {
        let journal = Journal::new();
        let stack = PageStack::new();
        push(&stack, &TestPage::new("old", &journal));
        journal.take();

        let x = TestPage::new("x", &journal);
        let y = TestPage::new("y", &journal);
        let pages: Vec<Arc<dyn Page>> = vec![x, y];
        stack.reset(pages);

        assert_eq!(stack.ids(), vec!["x", "y"]);
        assert_eq!(journal.take(), vec!["old:navigated_from", "y:navigated_to"]);
    }

    #[test]
    fn test_debug_lists_ids() {
        let journal = Journal::new();
        let stack = PageStack::new();
        push(&stack, &TestPage::new("home", &journal));
        assert_eq!(format!("{stack:?}"), r#"PageStack { pages: ["home"] }"#);
    }
}
