//! Raw-deflate session that only ever ends on a sync flush.
//!
//! ## Compression Model
//!
//! Input is fed with `FlushCompress::None` and written to the sink as soon as
//! the compressor emits it. [`DeflateSession::sync_flush`] drains the remaining
//! bits with `FlushCompress::Sync`, which closes the current block with an
//! empty stored block (`00 00 FF FF` on a byte boundary). The session never
//! calls `FlushCompress::Finish`, so it never writes a final block: its output
//! is always interior data that more deflate blocks may follow.

use std::io::{self, Write};

use flate2::{Compress, FlushCompress};

use crate::debug_chunk::{trace_session_flushed, trace_session_opened};
use crate::quality::Quality;

/// Scratch buffer size for compressor output (32 KiB).
pub const OUTPUT_CHUNK_SIZE: usize = 32 * 1024;

/// One deflate compression context shared by consecutive raw writes.
///
/// The session does not own its sink; each call borrows the writer so the
/// same sink can interleave session output with verbatim chunk bytes.
pub struct DeflateSession {
    compressor: Compress,
    quality: Quality,
    output: Vec<u8>,
    /// Input was accepted since the last sync flush.
    dirty: bool,
}

impl DeflateSession {
    /// Opens a session at `quality`.
    #[must_use]
    pub fn new(quality: Quality) -> Self {
        trace_session_opened(quality);
        Self {
            compressor: Compress::new(quality.into(), false), // false = raw deflate, no zlib header
            quality,
            output: vec![0u8; OUTPUT_CHUNK_SIZE],
            dirty: true,
        }
    }

    /// Returns the quality this session compresses at.
    #[must_use]
    pub const fn quality(&self) -> Quality {
        self.quality
    }

    /// Returns the number of uncompressed bytes consumed so far.
    #[must_use]
    pub fn total_in(&self) -> u64 {
        self.compressor.total_in()
    }

    /// Returns the number of compressed bytes produced so far.
    #[must_use]
    pub fn total_out(&self) -> u64 {
        self.compressor.total_out()
    }

    /// Compresses `input`, writing whatever the compressor emits to `sink`.
    pub fn write<W: Write + ?Sized>(&mut self, sink: &mut W, input: &[u8]) -> io::Result<()> {
        let mut input = input;
        while !input.is_empty() {
            let before_in = self.compressor.total_in();
            let before_out = self.compressor.total_out();

            self.compressor
                .compress(input, &mut self.output, FlushCompress::None)
                .map_err(|e| io::Error::other(e.to_string()))?;

            let consumed = (self.compressor.total_in() - before_in) as usize;
            let produced = (self.compressor.total_out() - before_out) as usize;

            if produced > 0 {
                sink.write_all(&self.output[..produced])?;
            }
            if consumed == 0 && produced == 0 {
                return Err(io::Error::other("deflate session made no progress"));
            }
            input = &input[consumed..];
            self.dirty = true;
        }
        Ok(())
    }

    /// Drains the compressor to a byte boundary ending in the sync marker.
    ///
    /// Returns the number of bytes written. A flush with no input since the
    /// previous flush writes nothing, so markers are never duplicated.
    pub fn sync_flush<W: Write + ?Sized>(&mut self, sink: &mut W) -> io::Result<u64> {
        if !self.dirty {
            return Ok(0);
        }

        let mut flushed = 0u64;
        loop {
            let before_out = self.compressor.total_out();

            self.compressor
                .compress(&[], &mut self.output, FlushCompress::Sync)
                .map_err(|e| io::Error::other(e.to_string()))?;

            let produced = (self.compressor.total_out() - before_out) as usize;
            if produced > 0 {
                sink.write_all(&self.output[..produced])?;
                flushed += produced as u64;
            }

            // A full output buffer means the flush may still be pending.
            if produced < self.output.len() {
                break;
            }
        }

        self.dirty = false;
        trace_session_flushed(self.quality, flushed);
        Ok(flushed)
    }
}
