//! Shared helpers for decoding composed output in tests.
//!
//! Composed gzip output deliberately carries no CRC32/ISIZE trailer, which
//! `flate2::read::GzDecoder` rejects. [`inflate_gzip_body`] checks the fixed
//! 10-byte header by hand and inflates the deflate payload that follows.

use std::io::{self, Read};

use flate2::read::DeflateDecoder;

/// Payload used across the round-trip suites.
pub const SAMPLE_TEXT: &[u8] = b"I am a compressed chunk of text";

/// Length of the fixed gzip header written by the composer.
pub const GZIP_HEADER_LEN: usize = 10;

/// Inflates a raw deflate stream.
pub fn inflate_raw(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut decoder = DeflateDecoder::new(data);
    let mut output = Vec::new();
    decoder.read_to_end(&mut output)?;
    Ok(output)
}

/// Validates the gzip magic and method, then inflates the body.
pub fn inflate_gzip_body(data: &[u8]) -> io::Result<Vec<u8>> {
    if data.len() < GZIP_HEADER_LEN || data[..3] != [0x1F, 0x8B, 0x08] {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "missing gzip deflate header",
        ));
    }
    inflate_raw(&data[GZIP_HEADER_LEN..])
}

/// Concatenates `times` copies of `data`.
#[must_use]
pub fn repeat_payload(data: &[u8], times: usize) -> Vec<u8> {
    data.repeat(times)
}

/// Builds a deterministic, moderately compressible buffer of `len` bytes.
#[must_use]
pub fn patterned_payload(len: usize) -> Vec<u8> {
    (0..len).map(|i| b"splice-me"[i % 9] ^ ((i / 97) as u8)).collect()
}
