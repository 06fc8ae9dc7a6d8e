//! Errors raised while inspecting precompressed chunk buffers.

use thiserror::Error;

/// A buffer handed to the composer was not produced by
/// [`PreCompressionWriter`](crate::PreCompressionWriter).
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ChunkFormatError {
    /// The buffer is shorter than the smallest terminal marker.
    #[error("precompressed chunk of {len} bytes is too short to carry a terminal marker")]
    TooShort {
        /// Length of the rejected buffer.
        len: usize,
    },
    /// The buffer does not end in a recognised terminal marker.
    #[error("chunk was not produced by a precompression writer: unrecognized terminal marker")]
    UnrecognizedTerminal,
}
