//! The HidPipe binary frame protocol.

pub mod frame;

pub use frame::{Frame, FrameError, FrameKind, MouseButton, DELTA_MAX};
