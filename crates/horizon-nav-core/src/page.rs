//! Page and modal contracts.
//!
//! A [`Page`] is a full-screen unit of UI; a [`Modal`] is an overlay stacked
//! above the current page. Both are shared as `Arc<dyn _>` between the
//! navigator that displays them and whatever background work they start, so
//! every callback takes `&self` and implementations keep their mutable state
//! behind a lock.
//!
//! # Lifecycle
//!
//! Pages move through *attached* → *navigated-to* → *navigated-from*, may be
//! navigated to again any number of times, and finally receive
//! [`Closable::on_closed`] when a navigator discards them. Modals move through
//! *attached* → *resumed* → *dismissed*.
//!
//! Optional capabilities are exposed through accessor methods rather than
//! downcasts:
//!
//! ```ignore
//! impl Page for SettingsPage {
//!     // ...
//!     fn as_closable(&self) -> Option<&dyn Closable> {
//!         Some(self)
//!     }
//! }
//! ```

use std::sync::Weak;

use crate::key::{KeyEvent, KeySet};
use crate::layout::{Dimensions, LayoutContext};
use crate::navigator::{PageNavigator, WindowNavigator};

/// A full-screen navigable unit of UI.
pub trait Page: Send + Sync {
    /// Identity of the page. A navigator never holds two pages with the same
    /// ID at once.
    fn id(&self) -> &str;

    /// Called when a navigator takes the page. `navigator` is a weak
    /// back-reference used for delegation only.
    fn on_attached_to_navigator(&self, navigator: Weak<dyn PageNavigator>);

    /// The page became visible.
    fn on_navigated_to(&self);

    /// React to input gathered since the last frame. Called once per frame
    /// while the page is visible, before `layout`.
    fn handle_user_interactions(&self);

    /// Lay out the page for the current frame.
    fn layout(&self, ctx: &mut LayoutContext) -> Dimensions;

    /// The page is no longer visible. It may be navigated to again.
    fn on_navigated_from(&self);

    /// Pages that need a final cleanup notification return `Some(self)`.
    fn as_closable(&self) -> Option<&dyn Closable> {
        None
    }

    /// Pages that consume raw key events return `Some(self)`.
    fn as_key_handler(&self) -> Option<&dyn KeyEventHandler> {
        None
    }
}

/// An overlay stacked above the current page.
///
/// Unlike pages, several modals with the same ID may be shown at once.
pub trait Modal: Send + Sync {
    /// Identity of the modal, used by `dismiss_modal`.
    fn id(&self) -> &str;

    /// Called when a window navigator shows the modal.
    fn on_attached_to_navigator(&self, navigator: Weak<dyn WindowNavigator>);

    /// The modal became visible.
    fn on_resume(&self);

    /// Per-frame interaction handling.
    fn handle(&self);

    /// Lay out the modal for the current frame.
    fn layout(&self, ctx: &mut LayoutContext) -> Dimensions;

    /// The modal was removed and will never be shown again.
    fn on_dismiss(&self);

    /// Modals that consume raw key events return `Some(self)`.
    fn as_key_handler(&self) -> Option<&dyn KeyEventHandler> {
        None
    }
}

/// Receives a notification when a navigator discards the page for good.
pub trait Closable {
    fn on_closed(&self);
}

/// Receives raw key events while active.
pub trait KeyEventHandler {
    /// Keys this handler wants. Queried for every key event.
    fn keys_to_handle(&self) -> KeySet;

    /// Handle a key from [`keys_to_handle`](Self::keys_to_handle).
    fn handle_key_event(&self, event: &KeyEvent);
}

/// Deliver `event` to `handler` if it asked for the key.
///
/// Returns `true` if the handler received the event.
pub fn dispatch_key(handler: &dyn KeyEventHandler, event: &KeyEvent) -> bool {
    if handler.keys_to_handle().contains(&event.key) {
        handler.handle_key_event(event);
        true
    } else {
        false
    }
}

/// Send the final lifecycle notifications to a page being discarded:
/// navigated-from, then closed if the page is closable.
pub fn retire_page(page: &dyn Page) {
    page.on_navigated_from();
    if let Some(closable) = page.as_closable() {
        closable.on_closed();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::{Key, NamedKey};
    use parking_lot::Mutex;

    struct EscapeHandler {
        seen: Mutex<Vec<Key>>,
    }

    impl KeyEventHandler for EscapeHandler {
        fn keys_to_handle(&self) -> KeySet {
            KeySet::of([NamedKey::Escape])
        }

        fn handle_key_event(&self, event: &KeyEvent) {
            self.seen.lock().push(event.key.clone());
        }
    }

    #[test]
    fn test_dispatch_key_filters_by_key_set() {
        let handler = EscapeHandler {
            seen: Mutex::new(Vec::new()),
        };

        assert!(!dispatch_key(&handler, &KeyEvent::pressed(NamedKey::Enter)));
        assert!(dispatch_key(&handler, &KeyEvent::pressed(NamedKey::Escape)));

        assert_eq!(*handler.seen.lock(), vec![Key::Named(NamedKey::Escape)]);
    }
}
