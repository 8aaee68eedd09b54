//! Ordered modal list with stable handles.
//!
//! Modals live in a slot table so each shown instance gets a [`ModalKey`]
//! that stays valid until that instance is dismissed, even when several
//! modals share an ID. A separate ordering list keeps the stacking order;
//! its last entry is the top modal.
//!
//! The list lock only covers the bookkeeping. Lifecycle callbacks
//! (attach, resume, dismiss) are the owner's job and run after the lock has
//! been released.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::page::Modal;

new_key_type! {
    /// Handle to one shown modal instance.
    pub struct ModalKey;
}

#[derive(Default)]
struct ModalEntries {
    slots: SlotMap<ModalKey, Arc<dyn Modal>>,
    order: Vec<ModalKey>,
}

impl ModalEntries {
    fn remove_at(&mut self, position: usize) -> Option<Arc<dyn Modal>> {
        let key = self.order.remove(position);
        self.slots.remove(key)
    }
}

/// A thread-safe, ordered list of modals.
#[derive(Default)]
pub struct ModalStack {
    entries: Mutex<ModalEntries>,
}

impl ModalStack {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `modal` on top. No uniqueness check.
    pub fn push(&self, modal: Arc<dyn Modal>) -> ModalKey {
        let mut entries = self.entries.lock();
        let key = entries.slots.insert(modal);
        entries.order.push(key);
        key
    }

    /// Remove the most recently pushed modal with ID `id`.
    pub fn remove_last_matching(&self, id: &str) -> Option<Arc<dyn Modal>> {
        let mut entries = self.entries.lock();
        let position = entries
            .order
            .iter()
            .rposition(|key| entries.slots.get(*key).is_some_and(|modal| modal.id() == id))?;
        entries.remove_at(position)
    }

    /// Remove the modal instance identified by `key`.
    pub fn remove(&self, key: ModalKey) -> Option<Arc<dyn Modal>> {
        let mut entries = self.entries.lock();
        let position = entries.order.iter().position(|k| *k == key)?;
        entries.remove_at(position)
    }

    /// The top modal.
    pub fn top(&self) -> Option<Arc<dyn Modal>> {
        let entries = self.entries.lock();
        let key = entries.order.last()?;
        entries.slots.get(*key).cloned()
    }

    /// Look up a shown modal by key.
    pub fn get(&self, key: ModalKey) -> Option<Arc<dyn Modal>> {
        self.entries.lock().slots.get(key).cloned()
    }

    /// All modals, bottom first, as one consistent snapshot.
    pub fn snapshot(&self) -> Vec<Arc<dyn Modal>> {
        let entries = self.entries.lock();
        entries
            .order
            .iter()
            .filter_map(|key| entries.slots.get(*key).cloned())
            .collect()
    }

    /// Remove every modal, returning them bottom first.
    pub fn drain(&self) -> Vec<Arc<dyn Modal>> {
        let mut entries = self.entries.lock();
        let order = std::mem::take(&mut entries.order);
        order
            .into_iter()
            .filter_map(|key| entries.slots.remove(key))
            .collect()
    }

    /// Modal IDs, bottom first.
    pub fn ids(&self) -> Vec<String> {
        self.snapshot()
            .iter()
            .map(|modal| modal.id().to_owned())
            .collect()
    }

    /// Number of modals shown.
    pub fn len(&self) -> usize {
        self.entries.lock().order.len()
    }

    /// Check if no modal is shown.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().order.is_empty()
    }
}

impl fmt::Debug for ModalStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModalStack").field("modals", &self.ids()).finish()
    }
}

static_assertions::assert_impl_all!(ModalStack: Send, Sync);
