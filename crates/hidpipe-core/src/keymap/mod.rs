//! The closed set of keys HidPipe recognizes and their scancode tables.
//!
//! The canonical representation on the wire is the PS/2 Scan Code Set 2 make
//! code, widened to 16 bits so that `E0`-prefixed extended keys fit without a
//! format change. Translation lives in [`ps2`].
//!
//! Platform key identities that have no [`Key`] equivalent are dropped at the
//! capture boundary, before they ever reach the encoder; inside this crate
//! every `Key` has exactly one scancode.

pub mod ps2;

use serde::{Deserialize, Serialize};

/// Every key HidPipe can forward.
///
/// Covers the US-ASCII main block, function keys, the navigation cluster,
/// arrows, and modifiers. Deliberately *not* extensible: the wire consumer
/// only understands this fixed set, and a closed enum lets the scancode
/// table be checked for completeness at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
    // Digits (main block, not numpad)
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,
    // Punctuation
    Backquote, Minus, Equal, Backslash,
    Period, Comma, Slash, Semicolon, Quote,
    BracketLeft, BracketRight,
    // Whitespace and control
    Backspace, Space, Tab, Enter, Escape,
    // Function row
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,
    PrintScreen, ScrollLock, Pause,
    // Navigation cluster
    Insert, Home, PageUp, Delete, End, PageDown,
    // Arrows
    ArrowUp, ArrowLeft, ArrowDown, ArrowRight,
    // Modifiers
    ControlLeft, ControlRight,
    ShiftLeft, ShiftRight,
    AltLeft, AltRight, AltGr,
    MetaLeft, MetaRight,
    ContextMenu, CapsLock, NumLock,
}

impl Key {
    /// Number of distinct key identities.
    pub const COUNT: usize = Self::ALL.len();

    /// Every key, in declaration order.
    ///
    /// `AltRight` precedes `AltGr` so that reverse scancode lookup resolves
    /// their shared extended code to `AltRight`.
    pub const ALL: [Key; 89] = [
        Key::A, Key::B, Key::C, Key::D, Key::E, Key::F, Key::G, Key::H,
        Key::I, Key::J, Key::K, Key::L, Key::M, Key::N, Key::O, Key::P,
        Key::Q, Key::R, Key::S, Key::T, Key::U, Key::V, Key::W, Key::X,
        Key::Y, Key::Z,
        Key::Digit0, Key::Digit1, Key::Digit2, Key::Digit3, Key::Digit4,
        Key::Digit5, Key::Digit6, Key::Digit7, Key::Digit8, Key::Digit9,
        Key::Backquote, Key::Minus, Key::Equal, Key::Backslash,
        Key::Period, Key::Comma, Key::Slash, Key::Semicolon, Key::Quote,
        Key::BracketLeft, Key::BracketRight,
        Key::Backspace, Key::Space, Key::Tab, Key::Enter, Key::Escape,
        Key::F1, Key::F2, Key::F3, Key::F4, Key::F5, Key::F6, Key::F7,
        Key::F8, Key::F9, Key::F10, Key::F11, Key::F12,
        Key::PrintScreen, Key::ScrollLock, Key::Pause,
        Key::Insert, Key::Home, Key::PageUp, Key::Delete, Key::End,
        Key::PageDown,
        Key::ArrowUp, Key::ArrowLeft, Key::ArrowDown, Key::ArrowRight,
        Key::ControlLeft, Key::ControlRight,
        Key::ShiftLeft, Key::ShiftRight,
        Key::AltLeft, Key::AltRight, Key::AltGr,
        Key::MetaLeft, Key::MetaRight,
        Key::ContextMenu, Key::CapsLock, Key::NumLock,
    ];

    /// Dense index for array-backed per-key state.
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}
