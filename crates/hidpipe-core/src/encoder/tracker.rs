//! Per-key press state used to suppress duplicate or inconsistent
//! keyboard transitions.
//!
//! OS listeners deliver auto-repeat as a stream of extra press callbacks, and
//! a listener armed while a key is held can see a release with no matching
//! press. Neither is an error; both simply produce no frame.

use crate::keymap::Key;

/// Boolean press state for every recognized key.
///
/// Backed by a fixed array indexed by the key's enum discriminant, so lookup
/// is O(1) without hashing. All keys start released.
#[derive(Debug)]
pub struct KeyStateTracker {
    pressed: [bool; Key::COUNT],
}

impl KeyStateTracker {
    /// Creates a tracker with every key released.
    pub fn new() -> Self {
        Self {
            pressed: [false; Key::COUNT],
        }
    }

    /// Marks `key` pressed if it currently is not.
    ///
    /// Returns `true` when the state changed (a frame should be emitted) and
    /// `false` for a duplicate press, which the caller must absorb silently.
    pub fn try_mark_pressed(&mut self, key: Key) -> bool {
        let slot = &mut self.pressed[key.index()];
        if *slot {
            return false;
        }
        *slot = true;
        true
    }

    /// Marks `key` released if it currently is pressed.
    ///
    /// Returns `false` for a release without a matching press.
    pub fn try_mark_released(&mut self, key: Key) -> bool {
        let slot = &mut self.pressed[key.index()];
        if !*slot {
            return false;
        }
        *slot = false;
        true
    }

    /// Whether `key` is currently considered pressed.
    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed[key.index()]
    }
}

impl Default for KeyStateTracker {
    fn default() -> Self {
        Self::new()
    }
}
