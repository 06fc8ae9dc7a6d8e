//! Write-only stream that splices precompressed chunks and raw data.
//!
//! ## State machine
//!
//! ```text
//! Pending --first byte--> Idle <--raw write / quality change, chunk--> RawRun
//!    \                      \                                            /
//!     `------------------ close / drop --------> Closed <---------------'
//! ```
//!
//! - `Pending`: nothing accepted yet; the header is still unwritten.
//! - `Idle`: header written, the sink's tail is a sync marker.
//! - `RawRun`: a [`DeflateSession`] is compressing consecutive raw writes.
//!   Ending the run only sync-flushes it, so the tail is again a sync marker.
//! - `Closed`: the terminator and trailer were written (if a header was).

use std::io::{self, Read, Seek, SeekFrom, Write};

use precompress::session::DeflateSession;
use precompress::{CountingWriter, Quality, Terminal, split_chunk};

use crate::debug_compose::{
    trace_chunk_spliced, trace_drop_close_failed, trace_header_written, trace_raw_run_ended,
    trace_stream_closed,
};
use crate::error::{ComposeError, ComposeResult};
use crate::format::ContainerFormat;
use crate::options::ComposeOptions;

enum Phase {
    Pending,
    Idle,
    RawRun(DeflateSession),
    Closed,
}

/// Composes one gzip or raw-deflate stream from precompressed chunks and raw
/// bytes.
///
/// Raw bytes go through [`Write`]; chunks produced by
/// [`PreCompressionWriter`](precompress::PreCompressionWriter) go through
/// [`write_precompressed`](Self::write_precompressed). The header is written
/// before the first payload byte, and the single terminator when the stream
/// is closed, explicitly or on drop.
///
/// # Examples
///
/// ```
/// use std::io::Write;
/// use compose::CompositeStream;
/// use precompress::{Quality, compress_chunk};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let cached = compress_chunk(b"<header/>", Quality::Maximum)?;
///
/// let mut stream = CompositeStream::gzip(Vec::new());
/// stream.write_precompressed(&cached)?;
/// stream.set_quality(Quality::Fast)?;
/// stream.write_all(b"<body>fresh</body>")?;
/// let body = stream.finish()?;
/// assert_eq!(&body[..2], &[0x1F, 0x8B]);
/// assert!(body.ends_with(&[0x00, 0x00, 0xFF, 0xFF, 0x03, 0x00]));
/// # Ok(())
/// # }
/// ```
pub struct CompositeStream<W: Write> {
    sink: Option<CountingWriter<W>>,
    format: ContainerFormat,
    leave_open: bool,
    phase: Phase,
    /// Quality for the next raw session.
    quality: Quality,
    /// Quality of the most recently accepted content; selects the terminator.
    last_used: Quality,
}

impl<W: Write> CompositeStream<W> {
    /// Creates a gzip-framed stream that closes `sink` on disposal.
    #[must_use]
    pub fn gzip(sink: W) -> Self {
        Self::with_options(sink, ComposeOptions::new(ContainerFormat::Gzip))
    }

    /// Creates a bare deflate stream that closes `sink` on disposal.
    #[must_use]
    pub fn deflate(sink: W) -> Self {
        Self::with_options(sink, ComposeOptions::new(ContainerFormat::Deflate))
    }

    /// Creates a stream from explicit options.
    #[must_use]
    pub fn with_options(sink: W, options: ComposeOptions) -> Self {
        Self {
            sink: Some(CountingWriter::new(sink)),
            format: options.format(),
            leave_open: options.leave_open(),
            phase: Phase::Pending,
            quality: options.quality(),
            last_used: options.quality(),
        }
    }

    /// Returns the container format.
    #[must_use]
    pub const fn format(&self) -> ContainerFormat {
        self.format
    }

    /// Returns the quality applied to the next raw write.
    #[must_use]
    pub const fn quality(&self) -> Quality {
        self.quality
    }

    /// Returns the quality of the most recently accepted content.
    #[must_use]
    pub const fn last_used_quality(&self) -> Quality {
        self.last_used
    }

    /// Changes the quality for subsequent raw writes.
    ///
    /// An active raw run is sync-flushed, never terminated; the next raw write
    /// opens a fresh session at the new quality.
    pub fn set_quality(&mut self, quality: Quality) -> ComposeResult<()> {
        self.ensure_open()?;
        self.end_raw_run()?;
        self.quality = quality;
        Ok(())
    }

    /// Splices a chunk produced by
    /// [`PreCompressionWriter`](precompress::PreCompressionWriter).
    ///
    /// The chunk's terminal identifies its quality and is stripped down to the
    /// sync marker before the rest is copied verbatim. A buffer without a
    /// recognised terminal is rejected before anything is written.
    pub fn write_precompressed(&mut self, chunk: &[u8]) -> ComposeResult<()> {
        self.ensure_open()?;
        let (body, terminal) = split_chunk(chunk)?;
        let quality = terminal.quality();

        self.end_raw_run()?;
        let sink = self.sink.as_mut().ok_or(ComposeError::Closed)?;
        if matches!(self.phase, Phase::Pending) {
            self.format.write_header(sink, quality)?;
            trace_header_written(self.format, quality);
            self.phase = Phase::Idle;
        }
        sink.write_all(body)?;
        self.last_used = quality;
        trace_chunk_spliced(quality, body.len());
        Ok(())
    }

    /// Returns the number of bytes written to the sink so far.
    #[must_use]
    pub fn bytes_written(&self) -> u64 {
        self.sink.as_ref().map_or(0, CountingWriter::bytes)
    }

    /// Reports whether the stream has been closed.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        matches!(self.phase, Phase::Closed)
    }

    /// Always `false`: the stream is write-only.
    #[must_use]
    pub const fn can_read(&self) -> bool {
        false
    }

    /// Always `false`: spliced output cannot be repositioned.
    #[must_use]
    pub const fn can_seek(&self) -> bool {
        false
    }

    /// Reports whether writes are still accepted.
    #[must_use]
    pub const fn can_write(&self) -> bool {
        self.sink.is_some() && !self.is_closed()
    }

    /// Always fails with [`ComposeError::Unsupported`].
    pub fn position(&self) -> ComposeResult<u64> {
        Err(ComposeError::Unsupported("position"))
    }

    /// Always fails with [`ComposeError::Unsupported`].
    pub fn set_position(&mut self, _position: u64) -> ComposeResult<()> {
        Err(ComposeError::Unsupported("set position"))
    }

    /// Returns the length of the sink, restoring its position afterwards.
    pub fn sink_len(&mut self) -> io::Result<u64>
    where
        W: Seek,
    {
        let sink = self
            .sink
            .as_mut()
            .ok_or(ComposeError::Closed)?
            .get_mut();
        let current = sink.stream_position()?;
        let end = sink.seek(SeekFrom::End(0))?;
        if current != end {
            sink.seek(SeekFrom::Start(current))?;
        }
        Ok(end)
    }

    /// Provides immutable access to the sink while it is attached.
    #[must_use]
    pub fn get_ref(&self) -> Option<&W> {
        self.sink.as_ref().map(CountingWriter::get_ref)
    }

    /// Closes the stream. Runs at most once; later calls return `Ok(())`.
    ///
    /// Flushes any raw run, then, if anything was ever accepted, writes the
    /// terminator for the last-used quality and the container trailer. The
    /// sink is flushed and dropped unless the stream was created with
    /// `leave_open`.
    pub fn close(&mut self) -> ComposeResult<()> {
        self.dispose(self.leave_open)
    }

    /// Closes the stream and returns the sink, regardless of `leave_open`.
    ///
    /// Fails with [`ComposeError::Closed`] if an earlier [`close`](Self::close)
    /// already released the sink.
    pub fn finish(mut self) -> ComposeResult<W> {
        self.dispose(true)?;
        self.sink
            .take()
            .map(CountingWriter::into_inner)
            .ok_or(ComposeError::Closed)
    }

    const fn ensure_open(&self) -> ComposeResult<()> {
        if self.is_closed() {
            Err(ComposeError::Closed)
        } else {
            Ok(())
        }
    }

    fn write_raw(&mut self, buf: &[u8]) -> ComposeResult<()> {
        self.ensure_open()?;
        if buf.is_empty() {
            return Ok(());
        }

        let quality = self.quality;
        let sink = self.sink.as_mut().ok_or(ComposeError::Closed)?;
        if matches!(self.phase, Phase::Pending) {
            self.format.write_header(sink, quality)?;
            trace_header_written(self.format, quality);
            self.phase = Phase::Idle;
        }
        if matches!(self.phase, Phase::Idle) {
            self.phase = Phase::RawRun(DeflateSession::new(quality));
            self.last_used = quality;
        }
        if let Phase::RawRun(session) = &mut self.phase {
            session.write(sink, buf)?;
        }
        Ok(())
    }

    /// Sync-flushes and drops the active session, if any.
    fn end_raw_run(&mut self) -> ComposeResult<()> {
        let Phase::RawRun(session) = &mut self.phase else {
            return Ok(());
        };
        let sink = self.sink.as_mut().ok_or(ComposeError::Closed)?;
        let flushed = session.sync_flush(sink)?;
        trace_raw_run_ended(session.quality(), session.total_in(), flushed);
        self.phase = Phase::Idle;
        Ok(())
    }

    fn dispose(&mut self, retain_sink: bool) -> ComposeResult<()> {
        let header_written = match &self.phase {
            Phase::Closed => return Ok(()),
            Phase::Pending => false,
            Phase::Idle | Phase::RawRun(_) => true,
        };
        let phase = std::mem::replace(&mut self.phase, Phase::Closed);

        let Some(sink) = self.sink.as_mut() else {
            return Ok(());
        };
        if let Phase::RawRun(mut session) = phase {
            let flushed = session.sync_flush(sink)?;
            trace_raw_run_ended(session.quality(), session.total_in(), flushed);
        }
        if header_written {
            // The tail already ends in a sync marker; only the final block is missing.
            sink.write_all(Terminal::for_quality(self.last_used).suffix())?;
            self.format.write_trailer(sink)?;
        }
        sink.flush()?;
        trace_stream_closed(self.format, self.last_used, header_written, sink.bytes());

        if !retain_sink {
            self.sink = None;
        }
        Ok(())
    }
}

impl<W: Write> Write for CompositeStream<W> {
    /// Compresses `buf` at the current quality. Zero-length writes are no-ops.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_raw(buf)?;
        Ok(buf.len())
    }

    /// Sync-flushes an active raw run without ending it, then flushes the sink.
    fn flush(&mut self) -> io::Result<()> {
        let Some(sink) = self.sink.as_mut() else {
            return Ok(());
        };
        if let Phase::RawRun(session) = &mut self.phase {
            session.sync_flush(sink)?;
        }
        sink.flush()
    }
}

impl<W: Write> Read for CompositeStream<W> {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(ComposeError::Unsupported("read").into())
    }
}

impl<W: Write> Seek for CompositeStream<W> {
    fn seek(&mut self, _pos: SeekFrom) -> io::Result<u64> {
        Err(ComposeError::Unsupported("seek").into())
    }
}

impl<W: Write> Drop for CompositeStream<W> {
    fn drop(&mut self) {
        if self.is_closed() {
            return;
        }
        if let Err(error) = self.close() {
            trace_drop_close_failed(&error);
        }
    }
}

/// Splices `chunks` in order into a new buffer framed as `format`.
///
/// Returns an empty buffer when `chunks` is empty.
pub fn splice_to_vec<'a, I>(format: ContainerFormat, chunks: I) -> ComposeResult<Vec<u8>>
where
    I: IntoIterator<Item = &'a [u8]>,
{
    let mut stream = CompositeStream::with_options(Vec::new(), ComposeOptions::new(format));
    for chunk in chunks {
        stream.write_precompressed(chunk)?;
    }
    stream.finish()
}
