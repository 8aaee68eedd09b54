//! Glue between a winit window and the event loop.
//!
//! ```ignore
//! let window = Arc::new(event_loop.create_window(attributes)?);
//! app.set_invalidator(WindowInvalidator::new(Arc::clone(&window)));
//! let mut bridge = WinitBridge::new(app.event_sender());
//!
//! // in ApplicationHandler::window_event
//! bridge.forward(&event)?;
//! ```

use std::sync::Arc;

use winit::event::{ElementState, Modifiers, WindowEvent as WinitWindowEvent};
use winit::keyboard::{Key as WinitKey, NamedKey as WinitNamedKey};
use winit::window::Window;

use horizon_nav_core::{Invalidator, Key, KeyEvent, KeyState, KeyboardModifiers, NamedKey, Size};

use crate::error::Result;
use crate::event::{EventSender, WindowEvent};

/// Translates winit window events into [`WindowEvent`]s.
///
/// Keeps track of the modifier state so key events carry it.
#[derive(Debug, Clone)]
pub struct WinitBridge {
    sender: EventSender,
    modifiers: KeyboardModifiers,
}

impl WinitBridge {
    pub fn new(sender: EventSender) -> Self {
        Self {
            sender,
            modifiers: KeyboardModifiers::NONE,
        }
    }

    /// Modifiers currently held.
    pub fn modifiers(&self) -> KeyboardModifiers {
        self.modifiers
    }

    /// Forward `event` if the event loop cares about it.
    ///
    /// Returns `Ok(true)` if an event was posted.
    pub fn forward(&mut self, event: &WinitWindowEvent) -> Result<bool> {
        let translated = match event {
            WinitWindowEvent::RedrawRequested => WindowEvent::frame(),
            WinitWindowEvent::Resized(size) => {
                WindowEvent::resized(Size::new(size.width, size.height))
            }
            WinitWindowEvent::CloseRequested | WinitWindowEvent::Destroyed => WindowEvent::Destroy,
            WinitWindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = from_winit_modifiers(modifiers);
                return Ok(false);
            }
            WinitWindowEvent::KeyboardInput { event, .. } => WindowEvent::Key(KeyEvent {
                key: from_winit_key(&event.logical_key),
                modifiers: self.modifiers,
                state: match event.state {
                    ElementState::Pressed => KeyState::Pressed,
                    ElementState::Released => KeyState::Released,
                },
            }),
            _ => return Ok(false),
        };
        self.sender.send(translated)?;
        Ok(true)
    }
}

/// Converts a winit logical key.
pub fn from_winit_key(key: &WinitKey) -> Key {
    match key {
        WinitKey::Named(named) => from_winit_named_key(named),
        WinitKey::Character(text) => Key::character(text.as_str()),
        WinitKey::Unidentified(_) | WinitKey::Dead(_) => Key::Unidentified,
    }
}

fn from_winit_named_key(key: &WinitNamedKey) -> Key {
    let named = match key {
        WinitNamedKey::Enter => NamedKey::Enter,
        WinitNamedKey::Escape => NamedKey::Escape,
        WinitNamedKey::Tab => NamedKey::Tab,
        WinitNamedKey::Space => NamedKey::Space,
        WinitNamedKey::Backspace => NamedKey::Backspace,
        WinitNamedKey::Delete => NamedKey::Delete,
        WinitNamedKey::Insert => NamedKey::Insert,
        WinitNamedKey::ArrowUp => NamedKey::ArrowUp,
        WinitNamedKey::ArrowDown => NamedKey::ArrowDown,
        WinitNamedKey::ArrowLeft => NamedKey::ArrowLeft,
        WinitNamedKey::ArrowRight => NamedKey::ArrowRight,
        WinitNamedKey::Home => NamedKey::Home,
        WinitNamedKey::End => NamedKey::End,
        WinitNamedKey::PageUp => NamedKey::PageUp,
        WinitNamedKey::PageDown => NamedKey::PageDown,

        WinitNamedKey::F1 => NamedKey::F(1),
        WinitNamedKey::F2 => NamedKey::F(2),
        WinitNamedKey::F3 => NamedKey::F(3),
        WinitNamedKey::F4 => NamedKey::F(4),
        WinitNamedKey::F5 => NamedKey::F(5),
        WinitNamedKey::F6 => NamedKey::F(6),
        WinitNamedKey::F7 => NamedKey::F(7),
        WinitNamedKey::F8 => NamedKey::F(8),
        WinitNamedKey::F9 => NamedKey::F(9),
        WinitNamedKey::F10 => NamedKey::F(10),
        WinitNamedKey::F11 => NamedKey::F(11),
        WinitNamedKey::F12 => NamedKey::F(12),

        _ => return Key::Unidentified,
    };
    Key::Named(named)
}

/// Converts winit modifiers.
pub fn from_winit_modifiers(modifiers: &Modifiers) -> KeyboardModifiers {
    let state = modifiers.state();
    KeyboardModifiers {
        shift: state.shift_key(),
        control: state.control_key(),
        alt: state.alt_key(),
        meta: state.super_key(),
    }
}

/// Redraws a winit window on [`reload`](horizon_nav_core::WindowNavigator::reload).
///
/// winit coalesces repeated `request_redraw` calls into one
/// `RedrawRequested` event.
#[derive(Debug, Clone)]
pub struct WindowInvalidator {
    window: Arc<Window>,
}

impl WindowInvalidator {
    pub fn new(window: Arc<Window>) -> Self {
        Self { window }
    }
}

impl Invalidator for WindowInvalidator {
    fn invalidate(&self) {
        self.window.request_redraw();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalSize;

    fn bridge() -> (WinitBridge, crossbeam_channel::Receiver<WindowEvent>) {
        let (tx, rx) = crossbeam_channel::bounded(8);
        (WinitBridge::new(EventSender::new(tx)), rx)
    }

    #[test]
    fn test_named_keys() {
        assert_eq!(
            from_winit_key(&WinitKey::Named(WinitNamedKey::Escape)),
            Key::Named(NamedKey::Escape)
        );
        assert_eq!(
            from_winit_key(&WinitKey::Named(WinitNamedKey::F5)),
            Key::Named(NamedKey::F(5))
        );
        assert_eq!(
            from_winit_key(&WinitKey::Named(WinitNamedKey::AudioVolumeUp)),
            Key::Unidentified
        );
    }

    #[test]
    fn test_character_keys_are_lowercased() {
        assert_eq!(
            from_winit_key(&WinitKey::Character("Q".into())),
            Key::character("q")
        );
    }

    #[test]
    fn test_window_events() {
        let (mut bridge, rx) = bridge();

        assert!(bridge.forward(&WinitWindowEvent::RedrawRequested).unwrap());
        assert!(
            bridge
                .forward(&WinitWindowEvent::Resized(PhysicalSize::new(640, 480)))
                .unwrap()
        );
        assert!(bridge.forward(&WinitWindowEvent::CloseRequested).unwrap());
        assert!(!bridge.forward(&WinitWindowEvent::Focused(true)).unwrap());

        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            events,
            [
                WindowEvent::frame(),
                WindowEvent::resized(Size::new(640, 480)),
                WindowEvent::Destroy,
            ]
        );
    }
}
