//! The application context.
//!
//! An [`App`] owns everything the window shows: the root page with its
//! back-stack, the modal list, the active toast and the redraw handle. It is
//! built once by [`AppBuilder`] and shared as `Arc<App>`; there is no global
//! instance. Pages reach it through their navigator chain like any other
//! [`WindowNavigator`].
//!
//! # Threading
//!
//! The modal list and the root page state are guarded by separate locks, so
//! background threads may show modals or navigate at any time. Page callbacks
//! triggered by a navigation run while the root lock is held; a callback must
//! not navigate the same `App` re-entrantly from inside `on_navigated_to`,
//! `on_navigated_from` or `on_closed`. Callbacks issued by the event loop
//! (`handle_user_interactions`, `layout`, key handling) run without any lock
//! and may navigate freely.

use std::fmt;
use std::sync::{Arc, Weak};
use std::time::Instant;

use parking_lot::Mutex;

use horizon_nav_core::{
    retire_page, Invalidator, Modal, ModalKey, ModalStack, Page, PageNavigator, WindowNavigator,
};

use crate::config::AppConfig;
use crate::error::{AppError, BoxError, Result};
use crate::event::EventSender;
use crate::event_loop::EventLoop;
use crate::redraw::RedrawHandle;
use crate::toast::{ExpiryTimer, Toast, ToastKind, ToastSlot};

type StartupHook = Box<dyn FnOnce(&Arc<App>) -> std::result::Result<(), BoxError>>;

/// Root page state: the visible page and the pages it was pushed over.
#[derive(Default)]
struct RootPages {
    current: Option<Arc<dyn Page>>,
    back_stack: Vec<Arc<dyn Page>>,
}

impl RootPages {
    /// Retire the current page and then every back-stack page, top-most first.
    fn retire_all(&mut self) {
        if let Some(current) = self.current.take() {
            retire_page(current.as_ref());
        }
        while let Some(page) = self.back_stack.pop() {
            if let Some(closable) = page.as_closable() {
                closable.on_closed();
            }
        }
    }
}

/// The root window navigator and application context.
pub struct App {
    me: Weak<App>,
    config: AppConfig,
    redraw: RedrawHandle,
    events: EventSender,
    pages: Mutex<RootPages>,
    modals: ModalStack,
    toasts: ToastSlot,
    toast_timer: ExpiryTimer,
}

impl App {
    /// Start building an application with `config`.
    pub fn builder(config: AppConfig) -> AppBuilder {
        AppBuilder::new(config)
    }

    /// The configuration the application was built with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Handle for posting window events from the backend.
    pub fn event_sender(&self) -> EventSender {
        self.events.clone()
    }

    /// The redraw handle behind [`reload`](WindowNavigator::reload).
    pub fn redraw_handle(&self) -> &RedrawHandle {
        &self.redraw
    }

    /// Forward redraw requests to a window backend instead of the event queue.
    pub fn set_invalidator(&self, invalidator: impl Invalidator + 'static) {
        self.redraw.set_backend(invalidator);
    }

    /// Show `page`. With `keep_back_stack`, the current page is remembered
    /// and can be returned to with [`close_current_page`](PageNavigator::close_current_page);
    /// otherwise it is closed for good.
    ///
    /// The back-stack is not deduplicated. Changing to the instance that is
    /// already current sends no callbacks.
    pub fn change_page(&self, page: Arc<dyn Page>, keep_back_stack: bool) {
        page.on_attached_to_navigator(self.weak_page_navigator());
        {
            let mut pages = self.pages.lock();
            let already_current = pages
                .current
                .as_ref()
                .is_some_and(|current| std::ptr::addr_eq(Arc::as_ptr(current), Arc::as_ptr(&page)));
            if already_current {
                tracing::debug!(target: "horizon_nav::app", id = page.id(), "page already current");
                return;
            }
            if let Some(previous) = pages.current.take() {
                if keep_back_stack {
                    previous.on_navigated_from();
                    pages.back_stack.push(previous);
                } else {
                    retire_page(previous.as_ref());
                }
            }
            tracing::debug!(
                target: "horizon_nav::app",
                id = page.id(),
                keep_back_stack,
                depth = pages.back_stack.len(),
                "changing page"
            );
            page.on_navigated_to();
            pages.current = Some(page);
        }
        self.reload();
    }

    /// IDs of the back-stack, oldest first.
    pub fn back_stack_ids(&self) -> Vec<String> {
        self.pages
            .lock()
            .back_stack
            .iter()
            .map(|page| page.id().to_owned())
            .collect()
    }

    /// The modal list.
    pub fn modal_stack(&self) -> &ModalStack {
        &self.modals
    }

    /// Show a transient notification above every modal.
    ///
    /// Replaces any visible toast. The window is redrawn again once the toast
    /// expires so it disappears without further input.
    pub fn show_toast(&self, message: impl Into<String>, kind: ToastKind) {
        let lifetime = self.config.toast_lifetime();
        let toast = Toast::new(message, kind, Instant::now(), lifetime);
        tracing::debug!(target: "horizon_nav::app", message = %toast.message, ?kind, "showing toast");
        let expires_at = toast.expires_at;
        self.toasts.show(toast);
        self.reload();
        self.toast_timer.schedule(expires_at);
    }

    /// The toast visible at `now`, if any.
    pub fn active_toast(&self, now: Instant) -> Option<Toast> {
        self.toasts.active(now)
    }

    /// Send navigated-from to the visible page and forget it.
    ///
    /// Called by the event loop when the window is destroyed.
    pub(crate) fn shutdown(&self) {
        let current = self.pages.lock().current.take();
        if let Some(page) = current {
            tracing::debug!(target: "horizon_nav::app", id = page.id(), "window destroyed");
            page.on_navigated_from();
        }
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
        tracing::debug!(target: "horizon_nav::app", id = modal.id(), remaining = self.modals.len(), "dismissed modal");
        modal.on_dismiss();
        self.reload();
        true
    }
}

impl PageNavigator for App {
    fn current_page(&self) -> Option<Arc<dyn Page>> {
        self.pages.lock().current.clone()
    }

    fn display(&self, page: Arc<dyn Page>) {
        self.change_page(page, true);
    }

    fn close_current_page(&self) -> bool {
        let closed = {
            let mut pages = self.pages.lock();
            match pages.current.take() {
                Some(current) => {
                    retire_page(current.as_ref());
                    if let Some(previous) = pages.back_stack.pop() {
                        tracing::debug!(target: "horizon_nav::app", from = current.id(), to = previous.id(), "navigating back");
                        previous.on_navigated_to();
                        pages.current = Some(previous);
                    }
                    true
                }
                None => false,
            }
        };
        if closed {
            self.reload();
        }
        closed
    }

    fn close_pages_after(&self, id: &str) -> bool {
        let closed = {
            let mut pages = self.pages.lock();
            if let Some(current) = pages.current.as_ref().filter(|page| page.id() == id) {
                current.on_navigated_to();
                return false;
            }
            match pages.back_stack.iter().rposition(|page| page.id() == id) {
                Some(index) => {
                    let above = pages.back_stack.split_off(index + 1);
                    if let Some(current) = pages.current.take() {
                        retire_page(current.as_ref());
                    }
                    for page in above.into_iter().rev() {
                        if let Some(closable) = page.as_closable() {
                            closable.on_closed();
                        }
                    }
                    if let Some(target) = pages.back_stack.pop() {
                        target.on_navigated_to();
                        pages.current = Some(target);
                    }
                    true
                }
                None => false,
            }
        };
        if closed {
            self.reload();
        }
        closed
    }

    fn clear_stack_and_display(&self, page: Arc<dyn Page>) {
        page.on_attached_to_navigator(self.weak_page_navigator());
        {
            let mut pages = self.pages.lock();
            pages.retire_all();
            tracing::debug!(target: "horizon_nav::app", id = page.id(), "cleared pages");
            page.on_navigated_to();
            pages.current = Some(page);
        }
        self.reload();
    }

    fn close_all_pages(&self) {
        self.pages.lock().retire_all();
        self.reload();
    }

    fn window_navigator(&self) -> Option<Arc<dyn WindowNavigator>> {
        self.me.upgrade().map(|me| me as Arc<dyn WindowNavigator>)
    }
}

impl WindowNavigator for App {
    fn show_modal(&self, modal: Arc<dyn Modal>) -> ModalKey {
        let key = self.modals.push(Arc::clone(&modal));
        tracing::debug!(target: "horizon_nav::app", id = modal.id(), depth = self.modals.len(), "showing modal");
        modal.on_attached_to_navigator(self.weak_window_navigator());
        modal.on_resume();
        self.reload();
        key
    }

    fn dismiss_modal(&self, id: &str) -> bool {
        let removed = self.modals.remove_last_matching(id);
        if removed.is_none() {
            tracing::warn!(target: "horizon_nav::app", id, "no modal to dismiss");
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
        self.redraw.invalidate();
    }
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pages = self.pages.lock();
        f.debug_struct("App")
            .field("title", &self.config.title)
            .field("current", &pages.current.as_ref().map(|page| page.id().to_owned()))
            .field("back_stack", &pages.back_stack.len())
            .field("modals", &self.modals.ids())
            .finish()
    }
}

static_assertions::assert_impl_all!(App: Send, Sync);

/// Builder for an [`App`] and its [`EventLoop`].
///
/// # Example
///
/// ```ignore
/// let (app, event_loop) = App::builder(AppConfig::with_title("Wallet"))
///     .on_startup(|app| {
///         app.display(OverviewPage::new());
///         Ok(())
///     })
///     .build()?;
/// event_loop.run(&mut surface)?;
/// ```
pub struct AppBuilder {
    config: AppConfig,
    startup: Option<StartupHook>,
}

impl AppBuilder {
    /// Create a builder with `config`.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            startup: None,
        }
    }

    /// Run `hook` once the application exists, before the event loop is
    /// returned. Typically displays the first page.
    pub fn on_startup<F>(mut self, hook: F) -> Self
    where
        F: FnOnce(&Arc<App>) -> std::result::Result<(), BoxError> + 'static,
    {
        self.startup = Some(Box::new(hook));
        self
    }

    /// Validate the configuration, create the application and run the
    /// startup hook.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidConfig`] for unusable configuration values
    /// and [`AppError::Startup`] if the startup hook fails.
    pub fn build(self) -> Result<(Arc<App>, EventLoop)> {
        self.config.validate()?;

        let (sender, receiver) = crossbeam_channel::bounded(self.config.event_queue_capacity);
        let redraw = RedrawHandle::new(sender.clone());
        let toast_timer = ExpiryTimer::new(redraw.clone());
        let app = Arc::new_cyclic(|me| App {
            me: me.clone(),
            config: self.config,
            redraw,
            toast_timer,
            events: EventSender::new(sender),
            pages: Mutex::new(RootPages::default()),
            modals: ModalStack::new(),
            toasts: ToastSlot::default(),
        });
        tracing::info!(target: "horizon_nav::app", title = %app.config.title, "application created");

        if let Some(hook) = self.startup {
            hook(&app).map_err(|err| {
                tracing::error!(target: "horizon_nav::app", %err, "startup hook failed");
                AppError::Startup(err)
            })?;
        }

        let event_loop = EventLoop::new(Arc::clone(&app), receiver);
        Ok((app, event_loop))
    }
}

impl fmt::Debug for AppBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppBuilder")
            .field("config", &self.config)
            .field("has_startup_hook", &self.startup.is_some())
            .finish()
    }
}
