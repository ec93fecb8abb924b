//! Named-pipe frame sink.
//!
//! Creates the FIFO if it does not already exist, then opens it for
//! writing. The open blocks until a reader attaches, which matches how the
//! downstream consumer attaches to the pipe before the stream starts.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use nix::sys::stat::Mode;
use nix::unistd::mkfifo;
use tracing::debug;

use super::{FrameSink, TransportError};

/// [`FrameSink`] backed by a Unix named pipe.
pub struct FifoSink {
    file: File,
    path: PathBuf,
}

impl FifoSink {
    /// Creates the FIFO at `path` (tolerating one that already exists) and
    /// opens it for writing. Blocks until a reader opens the other end.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TransportError> {
        let path = path.as_ref().to_path_buf();

        match mkfifo(&path, Mode::from_bits_truncate(0o644)) {
            Ok(()) => debug!(path = %path.display(), "created named pipe"),
            // A pre-existing pipe from an earlier run is fine to reuse.
            Err(nix::errno::Errno::EEXIST) => {
                debug!(path = %path.display(), "reusing existing named pipe");
            }
            Err(e) => {
                return Err(TransportError::Create {
                    path,
                    source: std::io::Error::from_raw_os_error(e as i32),
                });
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .open(&path)
            .map_err(|source| TransportError::Open {
                path: path.clone(),
                source,
            })?;

        Ok(Self { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FrameSink for FifoSink {
    fn write_frame(&mut self, frame: &[u8]) -> Result<(), TransportError> {
        self.file.write_all(frame)?;
        // Flush per frame so the reader sees each event as it happens
        // rather than on some buffer boundary.
        self.file.flush()?;
        Ok(())
    }
}
