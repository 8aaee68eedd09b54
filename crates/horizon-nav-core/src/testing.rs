//! Lifecycle-recording pages and modals for unit tests.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::base::PageModalBase;
use crate::key::{KeyEvent, KeySet};
use crate::layout::{Dimensions, LayoutContext};
use crate::navigator::{PageNavigator, WindowNavigator};
use crate::page::{Closable, KeyEventHandler, Modal, Page};
use crate::window_navigator::SimpleWindowNavigator;

/// Shared, ordered record of lifecycle calls (`"<id>:<event>"`).
#[derive(Clone, Default)]
pub(crate) struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, id: &str, event: &str) {
        self.0.lock().push(format!("{id}:{event}"));
    }

    /// Drain everything recorded so far.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.0.lock())
    }
}

/// A navigator reference that never upgrades.
pub(crate) fn detached_navigator() -> Weak<dyn PageNavigator> {
    Weak::<SimpleWindowNavigator>::new()
}

pub(crate) struct TestPage {
    pub base: PageModalBase,
    journal: Journal,
    events: Mutex<Vec<String>>,
    closable: bool,
    keys: KeySet,
}

impl TestPage {
    fn build(id: &str, journal: &Journal, closable: bool, keys: KeySet) -> Arc<Self> {
        Arc::new(Self {
            base: PageModalBase::new(id),
            journal: journal.clone(),
            events: Mutex::new(Vec::new()),
            closable,
            keys,
        })
    }

    pub fn new(id: &str, journal: &Journal) -> Arc<Self> {
        Self::build(id, journal, false, KeySet::None)
    }

    pub fn closable(id: &str, journal: &Journal) -> Arc<Self> {
        Self::build(id, journal, true, KeySet::None)
    }

    pub fn with_keys(id: &str, journal: &Journal, keys: KeySet) -> Arc<Self> {
        Self::build(id, journal, false, keys)
    }

    fn record(&self, event: &str) {
        self.events.lock().push(event.to_owned());
        self.journal.record(self.base.id(), event);
    }

    /// How many times this instance saw `event`.
    pub fn count(&self, event: &str) -> usize {
        self.events.lock().iter().filter(|e| *e == event).count()
    }
}

impl Page for TestPage {
    fn id(&self) -> &str {
        self.base.id()
    }

    fn on_attached_to_navigator(&self, navigator: Weak<dyn PageNavigator>) {
        self.base.attach_to_page_navigator(navigator);
        self.record("attached");
    }

    fn on_navigated_to(&self) {
        self.record("navigated_to");
    }

    fn handle_user_interactions(&self) {
        self.record("interactions");
    }

    fn layout(&self, ctx: &mut LayoutContext) -> Dimensions {
        self.record("layout");
        Dimensions::of(ctx.max)
    }

    fn on_navigated_from(&self) {
        self.record("navigated_from");
    }

    fn as_closable(&self) -> Option<&dyn Closable> {
        if self.closable { Some(self) } else { None }
    }

    fn as_key_handler(&self) -> Option<&dyn KeyEventHandler> {
        if self.keys == KeySet::None { None } else { Some(self) }
    }
}

impl Closable for TestPage {
    fn on_closed(&self) {
        self.record("closed");
    }
}

impl KeyEventHandler for TestPage {
    fn keys_to_handle(&self) -> KeySet {
        self.keys.clone()
    }

    fn handle_key_event(&self, event: &KeyEvent) {
        self.record(&format!("key {}", event.key));
    }
}

pub(crate) struct TestModal {
    pub base: PageModalBase,
    journal: Journal,
    events: Mutex<Vec<String>>,
}

impl TestModal {
    pub fn new(id: &str, journal: &Journal) -> Arc<Self> {
        Arc::new(Self {
            base: PageModalBase::new(id),
            journal: journal.clone(),
            events: Mutex::new(Vec::new()),
        })
    }

    fn record(&self, event: &str) {
        self.events.lock().push(event.to_owned());
        self.journal.record(self.base.id(), event);
    }

    pub fn count(&self, event: &str) -> usize {
        self.events.lock().iter().filter(|e| *e == event).count()
    }
}

impl Modal for TestModal {
    fn id(&self) -> &str {
        self.base.id()
    }

    fn on_attached_to_navigator(&self, navigator: Weak<dyn WindowNavigator>) {
        self.base.attach_to_window(navigator);
        self.record("attached");
    }

    fn on_resume(&self) {
        self.record("resumed");
    }

    fn handle(&self) {
        self.record("handle");
    }

    fn layout(&self, ctx: &mut LayoutContext) -> Dimensions {
        self.record("layout");
        Dimensions::of(ctx.max)
    }

    fn on_dismiss(&self) {
        self.record("dismissed");
    }
}

/// Counts `invalidate` calls.
#[derive(Clone, Default)]
pub(crate) struct ReloadCounter(Arc<Mutex<usize>>);

impl ReloadCounter {
    pub fn count(&self) -> usize {
        *self.0.lock()
    }

    pub fn invalidator(&self) -> impl Fn() + Send + Sync + 'static {
        let counter = self.0.clone();
        move || *counter.lock() += 1
    }
}
