//! Binary codec for HidPipe frames.
//!
//! Wire format (first byte, low nibble is the tag):
//! ```text
//! MouseMove   0001  bit4: dx sign  bit5: dy sign   [|dx|:1][|dy|:1]
//! MouseButton 0010  bit4: pressed                  [button:1]
//! MouseScroll 0011  bit4: dx sign  bit5: dy sign   [|dx|:1][|dy|:1]
//! Key         0100  bit4: pressed                  [scancode:2 LE]
//! ```
//! Sign bits mean "negative"; magnitudes are absolute values already clamped
//! to [0, 255]. Frames are self-describing but not length-prefixed: a reader
//! decodes the tag nibble first to learn how many payload bytes follow.
//! Multi-byte integers are little-endian.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest delta magnitude a motion or scroll frame can carry.
pub const DELTA_MAX: i32 = 255;

/// Low nibble of the first byte holding the frame tag.
const TAG_MASK: u8 = 0x0F;
/// Bit 4: dx-negative for motion/scroll, pressed for button/key.
const FLAG_BIT4: u8 = 1 << 4;
/// Bit 5: dy-negative for motion/scroll.
const FLAG_BIT5: u8 = 1 << 5;

/// Errors that can occur while decoding a frame.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrameError {
    /// The byte slice ends before the frame's payload does.
    #[error("insufficient data: need at least {needed} bytes, got {available}")]
    InsufficientData { needed: usize, available: usize },

    /// The tag nibble is not a recognized frame kind.
    #[error("unknown frame tag: 0x{0:X}")]
    UnknownTag(u8),

    /// The button id byte is outside the 3-entry button table.
    #[error("unknown button id: {0}")]
    UnknownButton(u8),
}

// ── Frame kinds ───────────────────────────────────────────────────────────────

/// Tag values carried in the low nibble of a frame's first byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum FrameKind {
    MouseMove = 0x1,
    MouseButton = 0x2,
    MouseScroll = 0x3,
    Key = 0x4,
}

impl TryFrom<u8> for FrameKind {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x1 => Ok(FrameKind::MouseMove),
            0x2 => Ok(FrameKind::MouseButton),
            0x3 => Ok(FrameKind::MouseScroll),
            0x4 => Ok(FrameKind::Key),
            _ => Err(()),
        }
    }
}

/// Mouse button identifier and its wire id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum MouseButton {
    Left = 0,
    Middle = 1,
    Right = 2,
}

impl TryFrom<u8> for MouseButton {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(MouseButton::Left),
            1 => Ok(MouseButton::Middle),
            2 => Ok(MouseButton::Right),
            _ => Err(()),
        }
    }
}

// ── Frame ─────────────────────────────────────────────────────────────────────

/// One self-contained unit of the wire format.
///
/// Deltas are stored pre-clamped; the constructors saturate so an out-of-range
/// value can never be encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frame {
    /// Relative cursor motion, each axis in [-255, 255].
    MouseMove { dx: i16, dy: i16 },
    /// A button transition.
    MouseButton { button: MouseButton, pressed: bool },
    /// Wheel motion, each axis in [-255, 255].
    MouseScroll { dx: i16, dy: i16 },
    /// A key transition, carrying the PS/2 Set-2 make code.
    Key { scancode: u16, pressed: bool },
}

/// Saturating clamp of a raw delta to the encodable range.
pub(crate) fn clamp_delta(value: i32) -> i16 {
    value.clamp(-DELTA_MAX, DELTA_MAX) as i16
}

impl Frame {
    /// Builds a motion frame, saturating each axis independently to
    /// [-255, 255]. Magnitude beyond the range is lost by design.
    pub fn mouse_move(dx: i32, dy: i32) -> Self {
        Frame::MouseMove {
            dx: clamp_delta(dx),
            dy: clamp_delta(dy),
        }
    }

    /// Builds a scroll frame with the same saturating policy as motion.
    pub fn mouse_scroll(dx: i32, dy: i32) -> Self {
        Frame::MouseScroll {
            dx: clamp_delta(dx),
            dy: clamp_delta(dy),
        }
    }

    /// Returns the tag for this frame.
    pub fn kind(&self) -> FrameKind {
        match self {
            Frame::MouseMove { .. } => FrameKind::MouseMove,
            Frame::MouseButton { .. } => FrameKind::MouseButton,
            Frame::MouseScroll { .. } => FrameKind::MouseScroll,
            Frame::Key { .. } => FrameKind::Key,
        }
    }

    /// Total encoded size in bytes, including the tag byte.
    pub fn wire_len(&self) -> usize {
        match self {
            Frame::MouseMove { .. } | Frame::MouseScroll { .. } | Frame::Key { .. } => 3,
            Frame::MouseButton { .. } => 2,
        }
    }

    /// Appends the encoded frame to `buf`.
    pub fn encode_into(&self, buf: &mut Vec<u8>) {
        match *self {
            Frame::MouseMove { dx, dy } => encode_deltas(buf, FrameKind::MouseMove, dx, dy),
            Frame::MouseScroll { dx, dy } => encode_deltas(buf, FrameKind::MouseScroll, dx, dy),
            Frame::MouseButton { button, pressed } => {
                let mut head = FrameKind::MouseButton as u8;
                if pressed {
                    head |= FLAG_BIT4;
                }
                buf.push(head);
                buf.push(button as u8);
            }
            Frame::Key { scancode, pressed } => {
                let mut head = FrameKind::Key as u8;
                if pressed {
                    head |= FLAG_BIT4;
                }
                buf.push(head);
                buf.extend_from_slice(&scancode.to_le_bytes());
            }
        }
    }

    /// Encodes the frame into a fresh byte vector.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.wire_len());
        self.encode_into(&mut buf);
        buf
    }

    /// Decodes one frame from the beginning of `bytes`.
    ///
    /// Returns the frame and the number of bytes consumed so a stream reader
    /// can advance its cursor.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError`] if the tag is unknown, the button id is out of
    /// range, or the slice is shorter than the frame's payload.
    pub fn decode(bytes: &[u8]) -> Result<(Frame, usize), FrameError> {
        let head = *bytes.first().ok_or(FrameError::InsufficientData {
            needed: 1,
            available: 0,
        })?;
        let tag = head & TAG_MASK;
        let kind = FrameKind::try_from(tag).map_err(|_| FrameError::UnknownTag(tag))?;

        match kind {
            FrameKind::MouseMove => {
                let (dx, dy) = decode_deltas(head, bytes)?;
                Ok((Frame::MouseMove { dx, dy }, 3))
            }
            FrameKind::MouseScroll => {
                let (dx, dy) = decode_deltas(head, bytes)?;
                Ok((Frame::MouseScroll { dx, dy }, 3))
            }
            FrameKind::MouseButton => {
                require_len(bytes, 2)?;
                let button =
                    MouseButton::try_from(bytes[1]).map_err(|_| FrameError::UnknownButton(bytes[1]))?;
                Ok((
                    Frame::MouseButton {
                        button,
                        pressed: head & FLAG_BIT4 != 0,
                    },
                    2,
                ))
            }
            FrameKind::Key => {
                require_len(bytes, 3)?;
                let scancode = u16::from_le_bytes([bytes[1], bytes[2]]);
                Ok((
                    Frame::Key {
                        scancode,
                        pressed: head & FLAG_BIT4 != 0,
                    },
                    3,
                ))
            }
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn encode_deltas(buf: &mut Vec<u8>, kind: FrameKind, dx: i16, dy: i16) {
    debug_assert!(dx.unsigned_abs() <= DELTA_MAX as u16);
    debug_assert!(dy.unsigned_abs() <= DELTA_MAX as u16);

    let mut head = kind as u8;
    if dx < 0 {
        head |= FLAG_BIT4;
    }
    if dy < 0 {
        head |= FLAG_BIT5;
    }
    buf.push(head);
    buf.push(dx.unsigned_abs() as u8);
    buf.push(dy.unsigned_abs() as u8);
}

fn decode_deltas(head: u8, bytes: &[u8]) -> Result<(i16, i16), FrameError> {
    require_len(bytes, 3)?;
    let mut dx = bytes[1] as i16;
    let mut dy = bytes[2] as i16;
    if head & FLAG_BIT4 != 0 {
        dx = -dx;
    }
    if head & FLAG_BIT5 != 0 {
        dy = -dy;
    }
    Ok((dx, dy))
}

fn require_len(bytes: &[u8], needed: usize) -> Result<(), FrameError> {
    if bytes.len() < needed {
        Err(FrameError::InsufficientData {
            needed,
            available: bytes.len(),
        })
    } else {
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(frame: Frame) -> Frame {
        let encoded = frame.encode();
        let (decoded, consumed) = Frame::decode(&encoded).expect("decode failed");
        assert_eq!(consumed, encoded.len(), "consumed must equal encoded size");
        decoded
    }

    // ── Exact byte layouts ────────────────────────────────────────────────────

    #[test]
    fn test_mouse_move_positive_deltas_encode_exact_bytes() {
        let frame = Frame::mouse_move(10, 5);
        assert_eq!(frame.encode(), vec![0x01, 0x0A, 0x05]);
    }

    #[test]
    fn test_mouse_move_negative_dx_sets_sign_bit() {
        let frame = Frame::mouse_move(-300, 0);
        assert_eq!(frame.encode(), vec![0x11, 0xFF, 0x00]);
    }

    #[test]
    fn test_mouse_move_negative_dy_sets_bit_five() {
        let frame = Frame::mouse_move(3, -7);
        assert_eq!(frame.encode(), vec![0x21, 0x03, 0x07]);
    }

    #[test]
    fn test_button_press_and_release_encode_exact_bytes() {
        let press = Frame::MouseButton {
            button: MouseButton::Left,
            pressed: true,
        };
        let release = Frame::MouseButton {
            button: MouseButton::Left,
            pressed: false,
        };
        assert_eq!(press.encode(), vec![0x12, 0x00]);
        assert_eq!(release.encode(), vec![0x02, 0x00]);
    }

    #[test]
    fn test_key_press_encodes_scancode_little_endian() {
        let frame = Frame::Key {
            scancode: 0x001C,
            pressed: true,
        };
        assert_eq!(frame.encode(), vec![0x14, 0x1C, 0x00]);
    }

    #[test]
    fn test_extended_scancode_uses_both_payload_bytes() {
        let frame = Frame::Key {
            scancode: 0xE012,
            pressed: false,
        };
        assert_eq!(frame.encode(), vec![0x04, 0x12, 0xE0]);
    }

    // ── Saturating clamp ──────────────────────────────────────────────────────

    #[test]
    fn test_clamp_is_saturating_and_symmetric() {
        assert_eq!(Frame::mouse_move(9000, -9000), Frame::MouseMove { dx: 255, dy: -255 });
        assert_eq!(Frame::mouse_scroll(-9000, 9000), Frame::MouseScroll { dx: -255, dy: 255 });
    }

    #[test]
    fn test_clamp_leaves_in_range_values_untouched() {
        assert_eq!(Frame::mouse_move(255, -255), Frame::MouseMove { dx: 255, dy: -255 });
        assert_eq!(Frame::mouse_move(0, 0), Frame::MouseMove { dx: 0, dy: 0 });
    }

    // ── Round trips ───────────────────────────────────────────────────────────

    #[test]
    fn test_mouse_move_round_trip() {
        let frame = Frame::mouse_move(-42, 17);
        assert_eq!(round_trip(frame), frame);
    }

    #[test]
    fn test_scroll_round_trip() {
        let frame = Frame::mouse_scroll(0, -3);
        assert_eq!(round_trip(frame), frame);
    }

    #[test]
    fn test_all_buttons_round_trip() {
        for button in [MouseButton::Left, MouseButton::Middle, MouseButton::Right] {
            for pressed in [true, false] {
                let frame = Frame::MouseButton { button, pressed };
                assert_eq!(round_trip(frame), frame);
            }
        }
    }

    #[test]
    fn test_key_round_trip_identifies_letter_a() {
        use crate::keymap::{ps2, Key};

        let frame = Frame::Key {
            scancode: 0x1C,
            pressed: true,
        };
        let decoded = round_trip(frame);
        match decoded {
            Frame::Key { scancode, pressed } => {
                assert!(pressed);
                assert_eq!(ps2::key_for_scancode(scancode), Some(Key::A));
            }
            other => panic!("expected key frame, got {other:?}"),
        }
    }

    // ── Decode errors ─────────────────────────────────────────────────────────

    #[test]
    fn test_decode_empty_slice_returns_insufficient_data() {
        assert_eq!(
            Frame::decode(&[]),
            Err(FrameError::InsufficientData {
                needed: 1,
                available: 0
            })
        );
    }

    #[test]
    fn test_decode_truncated_payload_returns_insufficient_data() {
        // Key frame headers promise 2 payload bytes.
        let result = Frame::decode(&[0x14, 0x1C]);
        assert!(matches!(result, Err(FrameError::InsufficientData { .. })));
    }

    #[test]
    fn test_decode_unknown_tag_is_rejected() {
        assert_eq!(Frame::decode(&[0x0F, 0, 0]), Err(FrameError::UnknownTag(0x0F)));
    }

    #[test]
    fn test_decode_unknown_button_id_is_rejected() {
        assert_eq!(Frame::decode(&[0x12, 0x09]), Err(FrameError::UnknownButton(0x09)));
    }

    #[test]
    fn test_wire_len_matches_encoded_length() {
        let frames = [
            Frame::mouse_move(1, 2),
            Frame::mouse_scroll(-1, 0),
            Frame::MouseButton {
                button: MouseButton::Middle,
                pressed: true,
            },
            Frame::Key {
                scancode: 0xE071,
                pressed: false,
            },
        ];
        for frame in frames {
            assert_eq!(frame.encode().len(), frame.wire_len());
        }
    }
}
