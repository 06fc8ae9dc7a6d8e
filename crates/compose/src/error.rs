//! Error types for composite stream operations.

use std::io;

use precompress::ChunkFormatError;
use thiserror::Error;

/// Result type for composite stream operations.
pub type ComposeResult<T> = Result<T, ComposeError>;

/// Errors that can occur while composing a stream.
#[derive(Debug, Error)]
pub enum ComposeError {
    /// The sink or the codec failed.
    #[error("I/O error: {0}")]
    Io(
        #[from]
        #[source]
        io::Error,
    ),
    /// A precompressed buffer was rejected; nothing was written.
    #[error("invalid precompressed chunk: {0}")]
    Format(
        #[from]
        #[source]
        ChunkFormatError,
    ),
    /// The stream was already closed.
    #[error("composite stream is closed")]
    Closed,
    /// The stream is write-only and not seekable.
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),
}

impl From<ComposeError> for io::Error {
    fn from(err: ComposeError) -> Self {
        match err {
            ComposeError::Io(inner) => inner,
            ComposeError::Format(_) => Self::new(io::ErrorKind::InvalidData, err),
            ComposeError::Closed => Self::new(io::ErrorKind::BrokenPipe, err),
            ComposeError::Unsupported(_) => Self::new(io::ErrorKind::Unsupported, err),
        }
    }
}
