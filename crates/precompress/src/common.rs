use std::io::{self, Write};

use crate::marker::SYNC_MARKER;

/// Sink wrapper that counts the bytes written and remembers the last four.
///
/// The remembered tail lets callers confirm that a flush left the stream on a
/// sync marker before anything is appended after it.
#[derive(Debug)]
pub struct CountingWriter<W> {
    inner: W,
    bytes: u64,
    tail: [u8; 4],
}

impl<W> CountingWriter<W> {
    /// Wraps `inner`.
    pub const fn new(inner: W) -> Self {
        Self {
            inner,
            bytes: 0,
            tail: [0; 4],
        }
    }

    /// Returns the number of bytes accepted by the inner writer.
    #[must_use]
    pub const fn bytes(&self) -> u64 {
        self.bytes
    }

    /// Reports whether the most recently written bytes are the sync marker.
    #[must_use]
    pub fn ends_with_sync_marker(&self) -> bool {
        self.bytes >= SYNC_MARKER.len() as u64 && self.tail == SYNC_MARKER
    }

    /// Provides immutable access to the inner writer.
    #[must_use]
    pub const fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Provides mutable access to the inner writer.
    ///
    /// Bytes written through this reference bypass the counter.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    /// Returns the inner writer.
    pub fn into_inner(self) -> W {
        self.inner
    }

    fn record(&mut self, written: &[u8]) {
        self.bytes = self.bytes.saturating_add(written.len() as u64);
        let keep = written.len().min(self.tail.len());
        self.tail.rotate_left(keep);
        let start = self.tail.len() - keep;
        self.tail[start..].copy_from_slice(&written[written.len() - keep..]);
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.inner.write(buf)?;
        self.record(&buf[..written]);
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_bytes_across_writes() {
        let mut writer = CountingWriter::new(Vec::new());
        writer.write_all(b"abc").unwrap();
        writer.write_all(b"defgh").unwrap();
        assert_eq!(writer.bytes(), 8);
        assert_eq!(writer.into_inner(), b"abcdefgh");
    }

    #[test]
    fn tracks_marker_split_across_writes() {
        let mut writer = CountingWriter::new(Vec::new());
        writer.write_all(&[0x42, 0x00]).unwrap();
        assert!(!writer.ends_with_sync_marker());
        writer.write_all(&[0x00]).unwrap();
        writer.write_all(&[0xFF, 0xFF]).unwrap();
        assert!(writer.ends_with_sync_marker());
        writer.write_all(&[0x03]).unwrap();
        assert!(!writer.ends_with_sync_marker());
    }

    #[test]
    fn short_output_never_matches_marker() {
        let mut writer = CountingWriter::new(Vec::new());
        writer.write_all(&[0xFF, 0xFF]).unwrap();
        assert!(!writer.ends_with_sync_marker());
    }
}
