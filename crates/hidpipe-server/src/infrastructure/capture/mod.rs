//! Input capture infrastructure.
//!
//! Production capture uses the `rdev` global listener, which invokes a
//! callback on its own internal thread for every mouse and keyboard event.
//! The callback maps each platform event to a [`InputEvent`] and pushes it
//! into an `mpsc` channel; the application layer drains the channel on a
//! single pump thread, which is what serializes access to the encoder state.
//!
//! # Testability
//!
//! The [`InputListener`] trait allows unit tests to inject synthetic events
//! without hooking the OS.

use std::sync::mpsc;

use hidpipe_core::InputEvent;

pub mod mock;
pub mod rdev_listener;

/// Error type for input capture operations.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("failed to start global input listener: {0}")]
    ListenFailed(String),
    #[error("capture has already been stopped")]
    AlreadyStopped,
}

/// Trait abstracting input event production.
///
/// The production implementation is [`rdev_listener::RdevListener`];
/// tests use [`mock::MockInputListener`].
pub trait InputListener: Send {
    /// Starts the listener and returns a receiver for captured events.
    ///
    /// Unknown platform keys and buttons are dropped inside the listener;
    /// every event on the channel is already within HidPipe's closed sets.
    fn start(&self) -> Result<mpsc::Receiver<InputEvent>, CaptureError>;

    /// Stops the listener and releases what the platform allows.
    fn stop(&self);
}
