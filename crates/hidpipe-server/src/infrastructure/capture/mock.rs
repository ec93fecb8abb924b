//! Mock input listener for unit testing.
//!
//! Allows tests to inject synthetic [`InputEvent`]s without hooking the OS.

use std::sync::{
    mpsc::{self, Sender},
    Arc, Mutex,
};

use hidpipe_core::InputEvent;

use super::{CaptureError, InputListener};

/// A mock implementation of [`InputListener`] that lets tests inject events.
pub struct MockInputListener {
    sender: Arc<Mutex<Option<Sender<InputEvent>>>>,
}

impl MockInputListener {
    /// Creates a new mock listener.
    pub fn new() -> Self {
        Self {
            sender: Arc::new(Mutex::new(None)),
        }
    }

    /// Injects a synthetic event, as if captured from hardware.
    ///
    /// Panics if `start()` has not been called or `stop()` already has.
    pub fn inject_event(&self, event: InputEvent) {
        let guard = self.sender.lock().expect("lock poisoned");
        if let Some(ref sender) = *guard {
            sender
                .send(event)
                .expect("receiver has been dropped; call start() first");
        } else {
            panic!("MockInputListener::inject_event called before start()");
        }
    }
}

impl Default for MockInputListener {
    fn default() -> Self {
        Self::new()
    }
}

impl InputListener for MockInputListener {
    fn start(&self) -> Result<mpsc::Receiver<InputEvent>, CaptureError> {
        let (tx, rx) = mpsc::channel();
        *self.sender.lock().expect("lock poisoned") = Some(tx);
        Ok(rx)
    }

    fn stop(&self) {
        // Drop the sender to close the channel
        *self.sender.lock().expect("lock poisoned") = None;
    }
}
