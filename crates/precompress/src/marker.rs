//! Byte-exact deflate markers used to splice chunks.
//!
//! ## Layout
//!
//! ```text
//! sync marker         00 00 FF FF                     (LEN/NLEN of an empty stored block)
//! compressed terminal 00 00 FF FF 03 00               (sync marker + final empty static block)
//! stored terminal     00 00 FF FF 01 00 00 FF FF      (sync marker + final empty stored block)
//! ```
//!
//! Every chunk ends in one of the two terminals. Splicing drops everything after
//! the sync marker, leaving byte-aligned interior data that the next chunk (or the
//! composer's own terminator) can follow directly.

use crate::error::ChunkFormatError;
use crate::quality::Quality;

/// Length and complement of an empty stored block: the byte-alignment point
/// produced by a sync flush.
pub const SYNC_MARKER: [u8; 4] = [0x00, 0x00, 0xFF, 0xFF];

/// A complete empty non-final stored block starting on a byte boundary.
pub const EMPTY_STORED_BLOCK: [u8; 5] = [0x00, 0x00, 0x00, 0xFF, 0xFF];

const COMPRESSED_TERMINAL: [u8; 6] = [0x00, 0x00, 0xFF, 0xFF, 0x03, 0x00];
const STORED_TERMINAL: [u8; 9] = [0x00, 0x00, 0xFF, 0xFF, 0x01, 0x00, 0x00, 0xFF, 0xFF];

/// Canonical end-of-chunk shapes.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Terminal {
    /// Sync marker followed by an empty final static-Huffman block.
    Compressed,
    /// Sync marker followed by an empty final stored block.
    Stored,
}

impl Terminal {
    /// Returns the terminal legal after content produced at `quality`.
    #[must_use]
    pub const fn for_quality(quality: Quality) -> Self {
        if quality.is_store() {
            Self::Stored
        } else {
            Self::Compressed
        }
    }

    /// Returns the full terminal, sync marker included.
    #[must_use]
    pub const fn bytes(self) -> &'static [u8] {
        match self {
            Self::Compressed => &COMPRESSED_TERMINAL,
            Self::Stored => &STORED_TERMINAL,
        }
    }

    /// Returns the bytes that follow the sync marker: the final block itself.
    #[must_use]
    pub fn suffix(self) -> &'static [u8] {
        &self.bytes()[SYNC_MARKER.len()..]
    }

    /// Returns the quality a spliced chunk is recorded under.
    ///
    /// Compressed terminals cannot tell [`Quality::Fast`] from
    /// [`Quality::Maximum`]; both terminate identically.
    #[must_use]
    pub const fn quality(self) -> Quality {
        match self {
            Self::Compressed => Quality::Maximum,
            Self::Stored => Quality::Store,
        }
    }

    /// Identifies the terminal `chunk` ends with, if any.
    ///
    /// The stored shape is checked first because it is the longer pattern.
    #[must_use]
    pub fn detect(chunk: &[u8]) -> Option<Self> {
        [Self::Stored, Self::Compressed]
            .into_iter()
            .find(|terminal| chunk.ends_with(terminal.bytes()))
    }
}

/// Splits a chunk into its spliceable body and the terminal it ended with.
///
/// The body keeps the sync marker; only the terminal's [`suffix`](Terminal::suffix)
/// is dropped.
pub fn split_chunk(chunk: &[u8]) -> Result<(&[u8], Terminal), ChunkFormatError> {
    if chunk.len() < COMPRESSED_TERMINAL.len() {
        return Err(ChunkFormatError::TooShort { len: chunk.len() });
    }
    let terminal = Terminal::detect(chunk).ok_or(ChunkFormatError::UnrecognizedTerminal)?;
    let body = &chunk[..chunk.len() - terminal.suffix().len()];
    Ok((body, terminal))
}
