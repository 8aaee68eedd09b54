//! A page that hosts its own stack of sub-pages.
//!
//! [`MasterPage`] is both a [`Page`] (it is displayed by some parent
//! navigator) and a [`PageNavigator`] (sub-pages are displayed on it). Its
//! page callbacks are forwarded to the current sub-page. Structural changes
//! never redraw the master page alone: they ask the window navigator at the
//! root of the chain to reload the whole window, however deeply the master
//! page is nested.
//!
//! ```ignore
//! let wallet = MasterPage::new("wallet");
//! window.display(wallet.clone());
//!
//! // Sub-pages attach to the master page, not to the window.
//! wallet.display(TransactionsPage::new());
//! wallet.display(TransactionDetailsPage::new(tx_hash));
//! wallet.close_current_page(); // back to transactions
//! ```

use std::fmt;
use std::sync::{Arc, Weak};

use crate::base::PageModalBase;
use crate::layout::{Dimensions, LayoutContext};
use crate::navigator::{PageNavigator, WindowNavigator};
use crate::page::{Closable, Page};
use crate::page_stack::PageStack;

/// A page with nested sub-pages.
pub struct MasterPage {
    me: Weak<MasterPage>,
    base: PageModalBase,
    sub_pages: PageStack,
}

impl MasterPage {
    /// Create a master page with no sub-pages.
    pub fn new(id: impl Into<String>) -> Arc<Self> {
        Arc::new_cyclic(|me| Self {
            me: me.clone(),
            base: PageModalBase::new(id),
            sub_pages: PageStack::new(),
        })
    }

    /// Identity and parent tracking.
    pub fn base(&self) -> &PageModalBase {
        &self.base
    }

    /// The sub-page stack.
    pub fn sub_pages(&self) -> &PageStack {
        &self.sub_pages
    }

    fn weak_navigator(&self) -> Weak<dyn PageNavigator> {
        self.me.clone()
    }

    /// Ask the root window to redraw.
    ///
    /// # Panics
    ///
    /// Panics if this master page has not been displayed by a navigator that
    /// leads to a window.
    fn reload_window(&self) {
        self.base.window_navigator().reload();
    }
}

impl Page for MasterPage {
    fn id(&self) -> &str {
        self.base.id()
    }

    fn on_attached_to_navigator(&self, navigator: Weak<dyn PageNavigator>) {
        self.base.attach_to_page_navigator(navigator);
    }

    fn on_navigated_to(&self) {
        if let Some(page) = self.sub_pages.top() {
            page.on_navigated_to();
        }
    }

    fn handle_user_interactions(&self) {
        if let Some(page) = self.sub_pages.top() {
            page.handle_user_interactions();
        }
    }

    fn layout(&self, ctx: &mut LayoutContext) -> Dimensions {
        match self.sub_pages.top() {
            Some(page) => page.layout(ctx),
            None => Dimensions::of(ctx.max),
        }
    }

    fn on_navigated_from(&self) {
        if let Some(page) = self.sub_pages.top() {
            page.on_navigated_from();
        }
    }

    fn as_closable(&self) -> Option<&dyn Closable> {
        Some(self)
    }
}

impl Closable for MasterPage {
    /// Close every sub-page. The visible one was already navigated from
    /// through [`Page::on_navigated_from`], so only `on_closed` is sent.
    fn on_closed(&self) {
        tracing::debug!(target: "horizon_nav_core::navigator", id = self.base.id(), sub_pages = self.sub_pages.len(), "closing master page");
        self.sub_pages.discard();
    }
}

impl PageNavigator for MasterPage {
    fn current_page(&self) -> Option<Arc<dyn Page>> {
        self.sub_pages.top()
    }

    fn display(&self, page: Arc<dyn Page>) {
        self.sub_pages.push(page, self.weak_navigator());
        self.reload_window();
    }

    fn close_current_page(&self) -> bool {
        let closed = self.sub_pages.pop();
        self.reload_window();
        closed
    }

    fn close_pages_after(&self, id: &str) -> bool {
        let closed = self.sub_pages.pop_after(|page| page.id() == id);
        self.reload_window();
        closed
    }

    fn clear_stack_and_display(&self, page: Arc<dyn Page>) {
        page.on_attached_to_navigator(self.weak_navigator());
        self.sub_pages.reset(vec![page]);
        self.reload_window();
    }

    fn close_all_pages(&self) {
        self.sub_pages.reset(Vec::new());
        self.reload_window();
    }

    fn window_navigator(&self) -> Option<Arc<dyn WindowNavigator>> {
        self.base.try_window_navigator().ok()
    }
}

impl fmt::Debug for MasterPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MasterPage")
            .field("id", &self.base.id())
            .field("sub_pages", &self.sub_pages)
            .finish()
    }
}

static_assertions::assert_impl_all!(MasterPage: Send, Sync);
