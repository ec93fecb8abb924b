//! ForwardInputUseCase: turns captured input events into pipe writes.
//!
//! This use case is the heart of the server. It feeds every captured
//! [`InputEvent`] through the [`EventEncoder`], which owns all filtering
//! policy (key-repeat suppression, motion coalescing), and writes each
//! emitted frame to the injected [`FrameSink`].
//!
//! # Architecture
//!
//! The service depends only on the `FrameSink` trait; the production sink
//! is a named pipe, tests record bytes in memory. All encoder state is
//! owned here and mutated from a single pump thread, so no locking is
//! needed around it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use hidpipe_core::{EventEncoder, InputEvent};
use thiserror::Error;
use tracing::trace;

use crate::infrastructure::transport::{FrameSink, TransportError};

/// How long the pump blocks on the channel before re-checking the running flag.
const PUMP_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Error type for the forward-input use case.
///
/// Any sink failure is fatal: the reader side of the pipe is gone or the
/// filesystem is broken, and neither is recoverable from here.
#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("sink error: {0}")]
    Sink(#[from] TransportError),
}

/// Encodes input events and writes the resulting frames to a sink.
pub struct ForwardInputService<S: FrameSink> {
    encoder: EventEncoder,
    sink: S,
    frames_written: u64,
}

impl<S: FrameSink> ForwardInputService<S> {
    pub fn new(encoder: EventEncoder, sink: S) -> Self {
        Self {
            encoder,
            sink,
            frames_written: 0,
        }
    }

    /// Handles one captured event, writing a frame if the encoder emits one.
    pub fn handle_event(&mut self, event: InputEvent) -> Result<(), ForwardError> {
        self.handle_event_at(event, Instant::now())
    }

    /// Like [`handle_event`](Self::handle_event) with an explicit timestamp,
    /// so tests can exercise the coalescing window deterministically.
    pub fn handle_event_at(&mut self, event: InputEvent, now: Instant) -> Result<(), ForwardError> {
        if let Some(frame) = self.encoder.handle_at(event, now) {
            let bytes = frame.encode();
            self.sink.write_frame(&bytes)?;
            self.frames_written += 1;
            trace!(?frame, len = bytes.len(), "frame written");
        }
        Ok(())
    }

    /// Number of frames written to the sink since construction.
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }
}

/// Drains the capture channel into `service` until the channel closes, the
/// running flag clears, or a sink write fails.
///
/// Runs on a dedicated thread; being the only caller into the service is
/// what serializes the encoder state.
pub fn pump<S: FrameSink>(
    rx: &Receiver<InputEvent>,
    service: &mut ForwardInputService<S>,
    running: &AtomicBool,
) -> Result<(), ForwardError> {
    while running.load(Ordering::SeqCst) {
        match rx.recv_timeout(PUMP_POLL_INTERVAL) {
            Ok(event) => service.handle_event(event)?,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    Ok(())
}
