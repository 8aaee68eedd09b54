//! Keyboard event types routed to pages and modals.
//!
//! The window backend converts its own key events into [`KeyEvent`]; pages
//! and modals that want raw keys implement
//! [`KeyEventHandler`](crate::KeyEventHandler) and declare the keys they care
//! about with a [`KeySet`].

use std::fmt;

/// Named (non-character) keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedKey {
    Enter,
    Escape,
    Tab,
    Space,
    Backspace,
    Delete,
    Insert,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    PageUp,
    PageDown,
    /// Function key `F1`..`F24`.
    F(u8),
}

/// A logical key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// A named key such as Enter or Escape.
    Named(NamedKey),
    /// A key that produces text. Stored lowercase.
    Character(String),
    /// A key the backend could not identify.
    Unidentified,
}

impl Key {
    /// Create a character key. The text is stored lowercase so that
    /// `Key::character("A") == Key::character("a")`.
    pub fn character(text: impl AsRef<str>) -> Self {
        Self::Character(text.as_ref().to_lowercase())
    }
}

impl From<NamedKey> for Key {
    fn from(key: NamedKey) -> Self {
        Self::Named(key)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(NamedKey::F(n)) => write!(f, "F{n}"),
            Self::Named(named) => write!(f, "{named:?}"),
            Self::Character(text) => write!(f, "{}", text.to_uppercase()),
            Self::Unidentified => write!(f, "Unidentified"),
        }
    }
}

/// Keyboard modifier state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held.
    pub control: bool,
    /// The Alt key is held (Option on macOS).
    pub alt: bool,
    /// The Meta/Super key is held (Windows key, Cmd on macOS).
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        shift: true,
        control: false,
        alt: false,
        meta: false,
    };

    /// Control modifier only.
    pub const CTRL: Self = Self {
        shift: false,
        control: true,
        alt: false,
        meta: false,
    };

    /// Check if no modifiers are pressed.
    pub fn is_empty(&self) -> bool {
        !self.shift && !self.control && !self.alt && !self.meta
    }
}

/// Whether a key went down or up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum KeyState {
    #[default]
    Pressed,
    Released,
}

/// A key event delivered to the active page and modals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// The logical key.
    pub key: Key,
    /// Modifiers held when the event occurred.
    pub modifiers: KeyboardModifiers,
    /// Press or release.
    pub state: KeyState,
}

impl KeyEvent {
    /// A key press with no modifiers.
    pub fn pressed(key: impl Into<Key>) -> Self {
        Self {
            key: key.into(),
            modifiers: KeyboardModifiers::NONE,
            state: KeyState::Pressed,
        }
    }

    /// A key release with no modifiers.
    pub fn released(key: impl Into<Key>) -> Self {
        Self {
            key: key.into(),
            modifiers: KeyboardModifiers::NONE,
            state: KeyState::Released,
        }
    }

    /// Set the modifiers.
    pub fn with_modifiers(mut self, modifiers: KeyboardModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// The set of keys a handler wants to receive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum KeySet {
    /// Nothing; the handler is temporarily deaf.
    #[default]
    None,
    /// Every key.
    All,
    /// Only the listed keys.
    Only(Vec<Key>),
}

impl KeySet {
    /// Build a set from a list of keys.
    pub fn of<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<Key>,
    {
        Self::Only(keys.into_iter().map(Into::into).collect())
    }

    /// Check whether `key` belongs to the set.
    pub fn contains(&self, key: &Key) -> bool {
        match self {
            Self::None => false,
            Self::All => true,
            Self::Only(keys) => keys.contains(key),
        }
    }
}
