//! Event encoder: turns abstract input events into wire frames.
//!
//! Pure state machine with no I/O. Each call to [`EventEncoder::handle_at`]
//! consumes one capture callback and produces zero or one [`Frame`]; the
//! caller writes it to the byte sink.
//!
//! # Motion coalescing
//!
//! Capture libraries can deliver mouse positions at a much higher rate than
//! the pipe consumer wants to see. The encoder bounds the output rate with a
//! time window (default 10 ms): motion arriving inside the window accumulates
//! instead of emitting, and the next emission folds the accumulated deltas
//! in. Net displacement is never dropped, only clamped to the 8-bit magnitude
//! the wire can carry. Scroll events are not coalesced; the OS already rate
//! limits them.

pub mod tracker;

use std::time::{Duration, Instant};

use tracing::trace;

use crate::keymap::{ps2, Key};
use crate::protocol::frame::{Frame, MouseButton};

pub use tracker::KeyStateTracker;

/// Default minimum interval between emitted motion frames.
pub const DEFAULT_COALESCE_WINDOW: Duration = Duration::from_millis(10);

/// One capture callback's worth of input, already mapped to HidPipe's closed
/// key and button sets. Unknown platform identities never reach the encoder;
/// the capture boundary drops them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Absolute cursor position.
    MouseMove { x: i32, y: i32 },
    /// Button transition.
    MouseButton { button: MouseButton, pressed: bool },
    /// Wheel motion.
    MouseScroll { dx: i32, dy: i32 },
    /// Key went down.
    KeyDown(Key),
    /// Key came up.
    KeyUp(Key),
}

/// Encoder state: cursor tracking, pending coalesced motion, and key press
/// state. One instance lives for the whole capture session.
#[derive(Debug)]
pub struct EventEncoder {
    coalesce_window: Duration,
    last_position: (i32, i32),
    /// Time of the last emitted motion frame; `None` until the first one.
    last_motion_emit: Option<Instant>,
    pending_dx: i32,
    pending_dy: i32,
    keys: KeyStateTracker,
}

impl EventEncoder {
    /// Creates an encoder with the default 10 ms coalescing window.
    pub fn new() -> Self {
        Self::with_coalesce_window(DEFAULT_COALESCE_WINDOW)
    }

    /// Creates an encoder with a custom coalescing window.
    pub fn with_coalesce_window(window: Duration) -> Self {
        Self {
            coalesce_window: window,
            last_position: (0, 0),
            last_motion_emit: None,
            pending_dx: 0,
            pending_dy: 0,
            keys: KeyStateTracker::new(),
        }
    }

    /// Encodes one event against the current clock.
    pub fn handle(&mut self, event: InputEvent) -> Option<Frame> {
        self.handle_at(event, Instant::now())
    }

    /// Encodes one event, with the timestamp injected for testability.
    ///
    /// Returns `None` when the event is absorbed: motion inside the
    /// coalescing window, duplicate key presses, releases without a press.
    pub fn handle_at(&mut self, event: InputEvent, now: Instant) -> Option<Frame> {
        match event {
            InputEvent::MouseMove { x, y } => self.encode_motion(x, y, now),
            InputEvent::MouseButton { button, pressed } => {
                Some(Frame::MouseButton { button, pressed })
            }
            InputEvent::MouseScroll { dx, dy } => Some(Frame::mouse_scroll(dx, dy)),
            InputEvent::KeyDown(key) => self.encode_key(key, true),
            InputEvent::KeyUp(key) => self.encode_key(key, false),
        }
    }

    // ── Mouse motion ──────────────────────────────────────────────────────────

    fn encode_motion(&mut self, x: i32, y: i32, now: Instant) -> Option<Frame> {
        let dx = x - self.last_position.0;
        let dy = y - self.last_position.1;
        // Position tracking must never drift, even when the frame is withheld.
        self.last_position = (x, y);

        let within_window = self
            .last_motion_emit
            .is_some_and(|last| now.duration_since(last) < self.coalesce_window);

        if within_window {
            self.pending_dx += dx;
            self.pending_dy += dy;
            trace!(
                pending_dx = self.pending_dx,
                pending_dy = self.pending_dy,
                "motion coalesced"
            );
            return None;
        }

        self.last_motion_emit = Some(now);
        let total_dx = self.pending_dx + dx;
        let total_dy = self.pending_dy + dy;
        self.pending_dx = 0;
        self.pending_dy = 0;
        Some(Frame::mouse_move(total_dx, total_dy))
    }

    // ── Keyboard ──────────────────────────────────────────────────────────────

    fn encode_key(&mut self, key: Key, pressed: bool) -> Option<Frame> {
        let changed = if pressed {
            self.keys.try_mark_pressed(key)
        } else {
            self.keys.try_mark_released(key)
        };
        if !changed {
            trace!(?key, pressed, "redundant key transition dropped");
            return None;
        }
        Some(Frame::Key {
            scancode: ps2::scancode(key),
            pressed,
        })
    }
}

impl Default for EventEncoder {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn encoder() -> EventEncoder {
        EventEncoder::new()
    }

    // ── Motion coalescing ─────────────────────────────────────────────────────

    #[test]
    fn test_first_motion_emits_immediately() {
        // Arrange
        let mut enc = encoder();

        // Act
        let frame = enc.handle_at(InputEvent::MouseMove { x: 10, y: 5 }, Instant::now());

        // Assert
        assert_eq!(frame, Some(Frame::MouseMove { dx: 10, dy: 5 }));
    }

    #[test]
    fn test_motion_inside_window_is_withheld() {
        // Arrange
        let mut enc = encoder();
        let t0 = Instant::now();
        enc.handle_at(InputEvent::MouseMove { x: 10, y: 0 }, t0);

        // Act – 5 ms later, inside the 10 ms window
        let frame = enc.handle_at(
            InputEvent::MouseMove { x: 14, y: 2 },
            t0 + Duration::from_millis(5),
        );

        // Assert
        assert_eq!(frame, None);
    }

    #[test]
    fn test_coalesced_motion_preserves_net_displacement() {
        // Arrange
        let mut enc = encoder();
        let t0 = Instant::now();
        enc.handle_at(InputEvent::MouseMove { x: 10, y: 0 }, t0);

        // Act – two withheld samples, then one past the window
        enc.handle_at(
            InputEvent::MouseMove { x: 14, y: 2 },
            t0 + Duration::from_millis(3),
        );
        enc.handle_at(
            InputEvent::MouseMove { x: 20, y: -4 },
            t0 + Duration::from_millis(6),
        );
        let frame = enc.handle_at(
            InputEvent::MouseMove { x: 25, y: -1 },
            t0 + Duration::from_millis(12),
        );

        // Assert – total displacement since the last emission is (15, -1)
        assert_eq!(frame, Some(Frame::MouseMove { dx: 15, dy: -1 }));
    }

    #[test]
    fn test_accumulators_reset_after_emission() {
        // Arrange
        let mut enc = encoder();
        let t0 = Instant::now();
        enc.handle_at(InputEvent::MouseMove { x: 10, y: 10 }, t0);
        enc.handle_at(
            InputEvent::MouseMove { x: 20, y: 20 },
            t0 + Duration::from_millis(5),
        );
        enc.handle_at(
            InputEvent::MouseMove { x: 30, y: 30 },
            t0 + Duration::from_millis(15),
        );

        // Act – next emission must not re-count the folded deltas
        let frame = enc.handle_at(
            InputEvent::MouseMove { x: 31, y: 31 },
            t0 + Duration::from_millis(30),
        );

        // Assert
        assert_eq!(frame, Some(Frame::MouseMove { dx: 1, dy: 1 }));
    }

    #[test]
    fn test_large_motion_saturates_per_axis() {
        // Arrange
        let mut enc = encoder();

        // Act
        let frame = enc.handle_at(InputEvent::MouseMove { x: -9000, y: 40 }, Instant::now());

        // Assert – dx clamps, dy does not
        assert_eq!(frame, Some(Frame::MouseMove { dx: -255, dy: 40 }));
    }

    #[test]
    fn test_position_tracking_does_not_drift_while_withholding() {
        // Arrange
        let mut enc = encoder();
        let t0 = Instant::now();
        enc.handle_at(InputEvent::MouseMove { x: 100, y: 100 }, t0);
        enc.handle_at(
            InputEvent::MouseMove { x: 105, y: 100 },
            t0 + Duration::from_millis(2),
        );

        // Act – emission computes its delta from the latest position
        let frame = enc.handle_at(
            InputEvent::MouseMove { x: 106, y: 100 },
            t0 + Duration::from_millis(20),
        );

        // Assert – 5 pending + 1 fresh
        assert_eq!(frame, Some(Frame::MouseMove { dx: 6, dy: 0 }));
    }

    // ── Buttons and scroll ────────────────────────────────────────────────────

    #[test]
    fn test_every_button_transition_emits() {
        // Arrange
        let mut enc = encoder();
        let now = Instant::now();

        // Act / Assert – no dedup for buttons
        for _ in 0..2 {
            let frame = enc.handle_at(
                InputEvent::MouseButton {
                    button: MouseButton::Right,
                    pressed: true,
                },
                now,
            );
            assert_eq!(
                frame,
                Some(Frame::MouseButton {
                    button: MouseButton::Right,
                    pressed: true
                })
            );
        }
    }

    #[test]
    fn test_scroll_is_not_coalesced() {
        // Arrange
        let mut enc = encoder();
        let t0 = Instant::now();

        // Act – two scrolls back to back, well inside the motion window
        let first = enc.handle_at(InputEvent::MouseScroll { dx: 0, dy: 1 }, t0);
        let second = enc.handle_at(
            InputEvent::MouseScroll { dx: 0, dy: 1 },
            t0 + Duration::from_millis(1),
        );

        // Assert
        assert_eq!(first, Some(Frame::MouseScroll { dx: 0, dy: 1 }));
        assert_eq!(second, Some(Frame::MouseScroll { dx: 0, dy: 1 }));
    }

    #[test]
    fn test_scroll_clamps_like_motion() {
        let mut enc = encoder();
        let frame = enc.handle_at(
            InputEvent::MouseScroll { dx: 9000, dy: -9000 },
            Instant::now(),
        );
        assert_eq!(frame, Some(Frame::MouseScroll { dx: 255, dy: -255 }));
    }

    // ── Keyboard ──────────────────────────────────────────────────────────────

    #[test]
    fn test_key_press_emits_scancode_frame() {
        let mut enc = encoder();
        let frame = enc.handle_at(InputEvent::KeyDown(Key::A), Instant::now());
        assert_eq!(
            frame,
            Some(Frame::Key {
                scancode: 0x1C,
                pressed: true
            })
        );
    }

    #[test]
    fn test_repeated_key_press_is_absorbed() {
        // Arrange
        let mut enc = encoder();
        let now = Instant::now();
        enc.handle_at(InputEvent::KeyDown(Key::A), now);

        // Act – auto-repeat delivers the press again
        let frame = enc.handle_at(InputEvent::KeyDown(Key::A), now);

        // Assert
        assert_eq!(frame, None);
    }

    #[test]
    fn test_release_after_press_emits_then_rearms() {
        // Arrange
        let mut enc = encoder();
        let now = Instant::now();
        enc.handle_at(InputEvent::KeyDown(Key::A), now);

        // Act
        let release = enc.handle_at(InputEvent::KeyUp(Key::A), now);
        let second_press = enc.handle_at(InputEvent::KeyDown(Key::A), now);

        // Assert
        assert_eq!(
            release,
            Some(Frame::Key {
                scancode: 0x1C,
                pressed: false
            })
        );
        assert!(second_press.is_some());
    }

    #[test]
    fn test_release_without_press_is_absorbed() {
        let mut enc = encoder();
        let frame = enc.handle_at(InputEvent::KeyUp(Key::Escape), Instant::now());
        assert_eq!(frame, None);
    }

    #[test]
    fn test_extended_key_emits_extended_scancode() {
        let mut enc = encoder();
        let frame = enc.handle_at(InputEvent::KeyDown(Key::ArrowUp), Instant::now());
        assert_eq!(
            frame,
            Some(Frame::Key {
                scancode: 0xE075,
                pressed: true
            })
        );
    }
}
