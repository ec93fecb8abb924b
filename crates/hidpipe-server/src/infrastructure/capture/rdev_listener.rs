//! Global input listener backed by the `rdev` crate.
//!
//! `rdev::listen` blocks its thread forever and invokes the supplied
//! callback for every input event on the system, so `start()` parks it on a
//! dedicated capture thread and forwards mapped events through a channel.
//!
//! Platform identities outside HidPipe's closed key/button sets (numpad
//! keys, extra mouse buttons, `Unknown` codes) are legal inputs and are
//! dropped here, silently, before the encoder ever sees them.

use std::sync::mpsc;

use hidpipe_core::{InputEvent, Key, MouseButton};
use tracing::{error, trace};

use super::{CaptureError, InputListener};

/// Production [`InputListener`] over the `rdev` global hook.
pub struct RdevListener;

impl RdevListener {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RdevListener {
    fn default() -> Self {
        Self::new()
    }
}

impl InputListener for RdevListener {
    fn start(&self) -> Result<mpsc::Receiver<InputEvent>, CaptureError> {
        let (tx, rx) = mpsc::channel();

        std::thread::Builder::new()
            .name("hidpipe-capture".to_string())
            .spawn(move || {
                let result = rdev::listen(move |event| {
                    if let Some(mapped) = map_event(&event.event_type) {
                        // A send error means the pump has shut down; the
                        // listener thread just keeps draining the hook.
                        let _ = tx.send(mapped);
                    } else {
                        trace!(event_type = ?event.event_type, "unmapped input event dropped");
                    }
                });
                if let Err(e) = result {
                    error!("global input listener terminated: {e:?}");
                }
            })
            .map_err(|e| CaptureError::ListenFailed(e.to_string()))?;

        Ok(rx)
    }

    fn stop(&self) {
        // rdev offers no way to unhook a running listener; the capture
        // thread lives until process exit. The pump dropping its receiver
        // is what ends event delivery.
    }
}

// ── Platform-to-domain mapping ────────────────────────────────────────────────

fn map_event(event: &rdev::EventType) -> Option<InputEvent> {
    match *event {
        rdev::EventType::KeyPress(key) => map_key(key).map(InputEvent::KeyDown),
        rdev::EventType::KeyRelease(key) => map_key(key).map(InputEvent::KeyUp),
        rdev::EventType::ButtonPress(button) => map_button(button).map(|button| {
            InputEvent::MouseButton {
                button,
                pressed: true,
            }
        }),
        rdev::EventType::ButtonRelease(button) => map_button(button).map(|button| {
            InputEvent::MouseButton {
                button,
                pressed: false,
            }
        }),
        rdev::EventType::MouseMove { x, y } => Some(InputEvent::MouseMove {
            x: x as i32,
            y: y as i32,
        }),
        rdev::EventType::Wheel { delta_x, delta_y } => Some(InputEvent::MouseScroll {
            dx: delta_x as i32,
            dy: delta_y as i32,
        }),
    }
}

fn map_button(button: rdev::Button) -> Option<MouseButton> {
    match button {
        rdev::Button::Left => Some(MouseButton::Left),
        rdev::Button::Middle => Some(MouseButton::Middle),
        rdev::Button::Right => Some(MouseButton::Right),
        rdev::Button::Unknown(_) => None,
    }
}

fn map_key(key: rdev::Key) -> Option<Key> {
    match key {
        rdev::Key::KeyA => Some(Key::A),
        rdev::Key::KeyB => Some(Key::B),
        rdev::Key::KeyC => Some(Key::C),
        rdev::Key::KeyD => Some(Key::D),
        rdev::Key::KeyE => Some(Key::E),
        rdev::Key::KeyF => Some(Key::F),
        rdev::Key::KeyG => Some(Key::G),
        rdev::Key::KeyH => Some(Key::H),
        rdev::Key::KeyI => Some(Key::I),
        rdev::Key::KeyJ => Some(Key::J),
        rdev::Key::KeyK => Some(Key::K),
        rdev::Key::KeyL => Some(Key::L),
        rdev::Key::KeyM => Some(Key::M),
        rdev::Key::KeyN => Some(Key::N),
        rdev::Key::KeyO => Some(Key::O),
        rdev::Key::KeyP => Some(Key::P),
        rdev::Key::KeyQ => Some(Key::Q),
        rdev::Key::KeyR => Some(Key::R),
        rdev::Key::KeyS => Some(Key::S),
        rdev::Key::KeyT => Some(Key::T),
        rdev::Key::KeyU => Some(Key::U),
        rdev::Key::KeyV => Some(Key::V),
        rdev::Key::KeyW => Some(Key::W),
        rdev::Key::KeyX => Some(Key::X),
        rdev::Key::KeyY => Some(Key::Y),
        rdev::Key::KeyZ => Some(Key::Z),
        rdev::Key::Num0 => Some(Key::Digit0),
        rdev::Key::Num1 => Some(Key::Digit1),
        rdev::Key::Num2 => Some(Key::Digit2),
        rdev::Key::Num3 => Some(Key::Digit3),
        rdev::Key::Num4 => Some(Key::Digit4),
        rdev::Key::Num5 => Some(Key::Digit5),
        rdev::Key::Num6 => Some(Key::Digit6),
        rdev::Key::Num7 => Some(Key::Digit7),
        rdev::Key::Num8 => Some(Key::Digit8),
        rdev::Key::Num9 => Some(Key::Digit9),
        rdev::Key::BackQuote => Some(Key::Backquote),
        rdev::Key::Minus => Some(Key::Minus),
        rdev::Key::Equal => Some(Key::Equal),
        rdev::Key::BackSlash => Some(Key::Backslash),
        rdev::Key::Dot => Some(Key::Period),
        rdev::Key::Comma => Some(Key::Comma),
        rdev::Key::Slash => Some(Key::Slash),
        rdev::Key::SemiColon => Some(Key::Semicolon),
        rdev::Key::Quote => Some(Key::Quote),
        rdev::Key::LeftBracket => Some(Key::BracketLeft),
        rdev::Key::RightBracket => Some(Key::BracketRight),
        rdev::Key::Backspace => Some(Key::Backspace),
        rdev::Key::Space => Some(Key::Space),
        rdev::Key::Tab => Some(Key::Tab),
        rdev::Key::Return => Some(Key::Enter),
        rdev::Key::Escape => Some(Key::Escape),
        rdev::Key::F1 => Some(Key::F1),
        rdev::Key::F2 => Some(Key::F2),
        rdev::Key::F3 => Some(Key::F3),
        rdev::Key::F4 => Some(Key::F4),
        rdev::Key::F5 => Some(Key::F5),
        rdev::Key::F6 => Some(Key::F6),
        rdev::Key::F7 => Some(Key::F7),
        rdev::Key::F8 => Some(Key::F8),
        rdev::Key::F9 => Some(Key::F9),
        rdev::Key::F10 => Some(Key::F10),
        rdev::Key::F11 => Some(Key::F11),
        rdev::Key::F12 => Some(Key::F12),
        rdev::Key::PrintScreen => Some(Key::PrintScreen),
        rdev::Key::ScrollLock => Some(Key::ScrollLock),
        rdev::Key::Pause => Some(Key::Pause),
        rdev::Key::Insert => Some(Key::Insert),
        rdev::Key::Home => Some(Key::Home),
        rdev::Key::PageUp => Some(Key::PageUp),
        rdev::Key::Delete => Some(Key::Delete),
        rdev::Key::End => Some(Key::End),
        rdev::Key::PageDown => Some(Key::PageDown),
        rdev::Key::UpArrow => Some(Key::ArrowUp),
        rdev::Key::LeftArrow => Some(Key::ArrowLeft),
        rdev::Key::DownArrow => Some(Key::ArrowDown),
        rdev::Key::RightArrow => Some(Key::ArrowRight),
        rdev::Key::ControlLeft => Some(Key::ControlLeft),
        rdev::Key::ControlRight => Some(Key::ControlRight),
        rdev::Key::ShiftLeft => Some(Key::ShiftLeft),
        rdev::Key::ShiftRight => Some(Key::ShiftRight),
        // rdev reports the left Alt as plain `Alt` and the right one as
        // `AltGr` on every platform it supports.
        rdev::Key::Alt => Some(Key::AltLeft),
        rdev::Key::AltGr => Some(Key::AltGr),
        rdev::Key::MetaLeft => Some(Key::MetaLeft),
        rdev::Key::MetaRight => Some(Key::MetaRight),
        rdev::Key::CapsLock => Some(Key::CapsLock),
        rdev::Key::NumLock => Some(Key::NumLock),
        // Numpad, Fn, IntlBackslash, Unknown(_): outside the wire's key set.
        _ => None,
    }
}
