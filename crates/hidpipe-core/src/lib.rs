//! # hidpipe-core
//!
//! Shared library for HidPipe containing the binary frame protocol, the
//! PS/2 Set-2 scancode translation tables, and the input event encoder.
//!
//! This crate is used by the server binary and by any consumer that wants to
//! parse the frame stream. It has zero dependencies on OS APIs, input hooks,
//! or pipes.
//!
//! # Architecture overview
//!
//! HidPipe turns raw host input (mouse motion, buttons, scroll, keyboard)
//! into a compact binary stream written to a named pipe, where a virtual HID
//! driver or a hobby-OS UART bridge picks it up. This crate defines:
//!
//! - **`protocol`** – How bytes look on the wire. Each event becomes one
//!   self-describing frame: a tag nibble plus flag bits in the first byte,
//!   followed by zero to two payload bytes (three for key events).
//!
//! - **`keymap`** – The closed set of recognized keys and the static table
//!   translating each one to its 16-bit PS/2 Set-2 scancode, including the
//!   `E0`-prefixed extended codes.
//!
//! - **`encoder`** – Pure transformation from an abstract input event plus
//!   encoder state into zero or one frame. Holds the mouse-motion coalescing
//!   state machine and the per-key press/release tracker.

pub mod encoder;
pub mod keymap;
pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `hidpipe_core::Frame` instead of `hidpipe_core::protocol::frame::Frame`.
pub use encoder::{EventEncoder, InputEvent, KeyStateTracker};
pub use keymap::Key;
pub use protocol::frame::{Frame, FrameError, FrameKind, MouseButton};
