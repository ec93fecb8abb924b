//! Frame transport infrastructure.
//!
//! The server's only output surface is a byte sink that consumes encoded
//! frames. The production sink is a Unix named pipe ([`fifo::FifoSink`]);
//! tests substitute in-memory doubles. Transport failure is fatal to the
//! forwarding session: a sink error propagates up and stops the pump.

use std::io;
use std::path::PathBuf;

/// Error type for transport operations.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("failed to create pipe at {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to open pipe at {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write frame: {0}")]
    Write(#[from] io::Error),
}

/// Destination for encoded frames.
///
/// Implementations must deliver each frame completely before returning;
/// callers treat any error as unrecoverable and tear the session down.
pub trait FrameSink: Send {
    /// Writes one encoded frame and flushes it through to the reader.
    fn write_frame(&mut self, frame: &[u8]) -> Result<(), TransportError>;
}

#[cfg(unix)]
pub mod fifo;
