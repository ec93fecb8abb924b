//! PS/2 Scan Code Set 2 translation table.
//!
//! Make codes only; the wire protocol carries press/release in a flag bit,
//! so break codes (`F0`-prefixed) never appear here. Extended keys keep the
//! `E0` prefix folded into the high byte (e.g. right Ctrl is `0xE014`), which
//! is why scancodes are 16-bit even though most keys fit in one byte.
//!
//! These constants follow the keyboard controller convention of the consumer
//! and must not be re-derived from another scancode set.

use super::Key;

/// Returns the Set-2 make code for `key`.
///
/// Total over [`Key`]: every recognized key has exactly one scancode.
pub fn scancode(key: Key) -> u16 {
    match key {
        Key::A => 0x1C,
        Key::B => 0x32,
        Key::C => 0x21,
        Key::D => 0x23,
        Key::E => 0x24,
        Key::F => 0x2B,
        Key::G => 0x34,
        Key::H => 0x33,
        Key::I => 0x43,
        Key::J => 0x3B,
        Key::K => 0x42,
        Key::L => 0x4B,
        Key::M => 0x3A,
        Key::N => 0x31,
        Key::O => 0x44,
        Key::P => 0x4D,
        Key::Q => 0x15,
        Key::R => 0x2D,
        Key::S => 0x1B,
        Key::T => 0x2C,
        Key::U => 0x3C,
        Key::V => 0x2A,
        Key::W => 0x1D,
        Key::X => 0x22,
        Key::Y => 0x35,
        Key::Z => 0x1A,
        Key::Digit0 => 0x45,
        Key::Digit1 => 0x16,
        Key::Digit2 => 0x1E,
        Key::Digit3 => 0x26,
        Key::Digit4 => 0x25,
        Key::Digit5 => 0x2E,
        Key::Digit6 => 0x36,
        Key::Digit7 => 0x3D,
        Key::Digit8 => 0x3E,
        Key::Digit9 => 0x46,
        Key::Backquote => 0x0E,
        Key::Minus => 0x4E,
        Key::Equal => 0x55,
        Key::Backslash => 0x5D,
        Key::Period => 0x41,
        Key::Comma => 0x49,
        Key::Slash => 0x4A,
        Key::Semicolon => 0x4C,
        Key::Quote => 0x52,
        Key::BracketLeft => 0x54,
        Key::BracketRight => 0x5B,
        Key::Backspace => 0x66,
        Key::Space => 0x29,
        Key::Tab => 0x0D,
        Key::Enter => 0x5A,
        Key::Escape => 0x76,
        // The function row is famously non-contiguous in Set 2.
        Key::F1 => 0x05,
        Key::F2 => 0x06,
        Key::F3 => 0x04,
        Key::F4 => 0x0C,
        Key::F5 => 0x03,
        Key::F6 => 0x0B,
        Key::F7 => 0x83,
        Key::F8 => 0x0A,
        Key::F9 => 0x01,
        Key::F10 => 0x09,
        Key::F11 => 0x78,
        Key::F12 => 0x07,
        Key::PrintScreen => 0xE012,
        Key::ScrollLock => 0x7E,
        Key::Pause => 0xE013,
        Key::Insert => 0xE070,
        Key::Home => 0xE06C,
        Key::PageUp => 0xE07D,
        Key::Delete => 0xE071,
        Key::End => 0xE069,
        Key::PageDown => 0xE07A,
        Key::ArrowUp => 0xE075,
        Key::ArrowLeft => 0xE06B,
        Key::ArrowDown => 0xE072,
        Key::ArrowRight => 0xE074,
        Key::ControlLeft => 0x14,
        Key::ControlRight => 0xE014,
        Key::ShiftLeft => 0x12,
        Key::ShiftRight => 0x59,
        Key::AltLeft => 0x11,
        // AltGr shares the right-Alt make code.
        Key::AltRight => 0xE011,
        Key::AltGr => 0xE011,
        Key::MetaLeft => 0xE01F,
        Key::MetaRight => 0xE027,
        Key::ContextMenu => 0xE02F,
        Key::CapsLock => 0x58,
        Key::NumLock => 0x77,
    }
}

/// Reverse lookup: the key whose make code is `code`, if any.
///
/// Used by frame decoding. The `AltRight`/`AltGr` pair shares `0xE011`;
/// lookup resolves it to `AltRight` ([`Key::ALL`] ordering).
pub fn key_for_scancode(code: u16) -> Option<Key> {
    Key::ALL.iter().copied().find(|&key| scancode(key) == code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_a_has_expected_scancode() {
        assert_eq!(scancode(Key::A), 0x1C);
    }

    #[test]
    fn test_extended_keys_carry_e0_prefix() {
        for key in [
            Key::PrintScreen,
            Key::Pause,
            Key::Insert,
            Key::Home,
            Key::PageUp,
            Key::Delete,
            Key::End,
            Key::PageDown,
            Key::ArrowUp,
            Key::ArrowLeft,
            Key::ArrowDown,
            Key::ArrowRight,
            Key::ControlRight,
            Key::AltRight,
            Key::AltGr,
            Key::MetaLeft,
            Key::MetaRight,
            Key::ContextMenu,
        ] {
            assert_eq!(scancode(key) >> 8, 0xE0, "{key:?} should be extended");
        }
    }

    #[test]
    fn test_reverse_lookup_round_trips_every_key() {
        for key in Key::ALL {
            let resolved = key_for_scancode(scancode(key)).expect("code must resolve");
            // AltGr aliases AltRight on the wire; everything else is bijective.
            if key == Key::AltGr {
                assert_eq!(resolved, Key::AltRight);
            } else {
                assert_eq!(resolved, key);
            }
        }
    }

    #[test]
    fn test_reverse_lookup_rejects_unknown_code() {
        assert_eq!(key_for_scancode(0xFFFF), None);
        assert_eq!(key_for_scancode(0x00), None);
    }

    #[test]
    fn test_scancodes_are_unique_apart_from_altgr_alias() {
        // Arrange
        let mut seen = std::collections::HashMap::new();

        // Act / Assert
        for key in Key::ALL {
            if let Some(prev) = seen.insert(scancode(key), key) {
                assert!(
                    (prev, key) == (Key::AltRight, Key::AltGr),
                    "unexpected scancode collision between {prev:?} and {key:?}"
                );
            }
        }
    }
}
