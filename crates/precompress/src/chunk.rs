//! Producer of relocatable deflate chunks.
//!
//! A [`PreCompressionWriter`] compresses everything written to it through a
//! single [`DeflateSession`]. Closing the writer sync-flushes the session and
//! appends the empty final block for its quality, so the output is both a
//! complete raw-deflate stream and, once the final block is stripped, an
//! interior fragment that can be spliced anywhere in a larger stream.
//!
//! # Examples
//!
//! ```
//! use std::io::Write;
//! use precompress::{PreCompressionWriter, Quality, Terminal};
//!
//! # fn main() -> std::io::Result<()> {
//! let mut writer = PreCompressionWriter::new(Vec::new(), Quality::Store);
//! writer.write_all(b"first ")?;
//! writer.write_all(b"second")?;
//! let chunk = writer.finish()?;
//! assert!(chunk.ends_with(Terminal::Stored.bytes()));
//! # Ok(())
//! # }
//! ```

use std::io::{self, Write};

use crate::common::CountingWriter;
use crate::debug_chunk::{trace_chunk_finished, trace_drop_close_failed};
use crate::marker::{EMPTY_STORED_BLOCK, Terminal};
use crate::quality::Quality;
use crate::session::DeflateSession;

/// Write-only stream producing one precompressed chunk.
pub struct PreCompressionWriter<W: Write> {
    sink: Option<CountingWriter<W>>,
    session: DeflateSession,
    leave_open: bool,
    closed: bool,
}

impl<W: Write> PreCompressionWriter<W> {
    /// Creates a writer that compresses into `sink` and drops the sink on close.
    #[must_use]
    pub fn new(sink: W, quality: Quality) -> Self {
        Self::with_leave_open(sink, quality, false)
    }

    /// Creates a writer; when `leave_open` is set the sink survives
    /// [`close`](Self::close) and stays reachable through [`get_ref`](Self::get_ref).
    #[must_use]
    pub fn with_leave_open(sink: W, quality: Quality, leave_open: bool) -> Self {
        Self {
            sink: Some(CountingWriter::new(sink)),
            session: DeflateSession::new(quality),
            leave_open,
            closed: false,
        }
    }

    /// Returns the quality chunk content is compressed at.
    #[must_use]
    pub const fn quality(&self) -> Quality {
        self.session.quality()
    }

    /// Returns the number of chunk bytes written to the sink so far.
    #[must_use]
    pub fn bytes_written(&self) -> u64 {
        self.sink.as_ref().map_or(0, CountingWriter::bytes)
    }

    /// Reports whether the chunk has been completed.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    /// Provides immutable access to the sink while it is attached.
    #[must_use]
    pub fn get_ref(&self) -> Option<&W> {
        self.sink.as_ref().map(CountingWriter::get_ref)
    }

    /// Completes the chunk. Runs at most once; later calls return `Ok(())`.
    ///
    /// The sink is flushed and then dropped unless the writer was created with
    /// `leave_open`.
    pub fn close(&mut self) -> io::Result<()> {
        self.complete(self.leave_open)
    }

    /// Completes the chunk and returns the sink, regardless of `leave_open`.
    ///
    /// Fails if an earlier [`close`](Self::close) already released the sink.
    pub fn finish(mut self) -> io::Result<W> {
        self.complete(true)?;
        self.sink
            .take()
            .map(CountingWriter::into_inner)
            .ok_or_else(closed_error)
    }

    fn complete(&mut self, retain_sink: bool) -> io::Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        let Some(sink) = self.sink.as_mut() else {
            return Ok(());
        };
        self.session.sync_flush(sink)?;
        if sink.bytes() == 0 {
            // Some backends emit nothing when flushing an untouched stream.
            sink.write_all(&EMPTY_STORED_BLOCK)?;
        }
        if !sink.ends_with_sync_marker() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "deflate sync flush did not end on a sync marker",
            ));
        }
        let terminal = Terminal::for_quality(self.session.quality());
        sink.write_all(terminal.suffix())?;
        sink.flush()?;
        trace_chunk_finished(self.session.quality(), self.session.total_in(), sink.bytes());

        if !retain_sink {
            self.sink = None;
        }
        Ok(())
    }
}

impl<W: Write> Write for PreCompressionWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.closed {
            return Err(closed_error());
        }
        let sink = self.sink.as_mut().ok_or_else(closed_error)?;
        self.session.write(sink, buf)?;
        Ok(buf.len())
    }

    /// Sync-flushes the session so everything written so far is decodable.
    fn flush(&mut self) -> io::Result<()> {
        if self.closed {
            return Ok(());
        }
        let sink = self.sink.as_mut().ok_or_else(closed_error)?;
        self.session.sync_flush(sink)?;
        sink.flush()
    }
}

impl<W: Write> Drop for PreCompressionWriter<W> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        if let Err(error) = self.close() {
            trace_drop_close_failed(&error);
        }
    }
}

fn closed_error() -> io::Error {
    io::Error::new(io::ErrorKind::BrokenPipe, "precompression writer is closed")
}

/// Compresses `input` into a new chunk buffer.
pub fn compress_chunk(input: &[u8], quality: Quality) -> io::Result<Vec<u8>> {
    let mut writer = PreCompressionWriter::new(Vec::new(), quality);
    writer.write_all(input)?;
    writer.finish()
}
