//! Container framing around the composed deflate payload.
//!
//! ## Gzip header (RFC 1952)
//!
//! ```text
//! 1F 8B   magic
//! 08      method: deflate
//! 00      flags: none
//! 00 x4   modification time: unset
//! XF      extra flags: 02 unless the first content was stored, then 00
//! 00      operating system
//! ```
//!
//! Neither format writes a trailer. Spliced chunks are opaque, so the
//! composer never sees the uncompressed bytes a gzip CRC32/ISIZE would cover.

use core::fmt;
use core::str::FromStr;
use std::io::{self, Write};

use precompress::Quality;

/// Length of the fixed gzip member header.
pub const GZIP_HEADER_LEN: usize = 10;

/// Extra-flags value for content compressed at maximum effort.
pub const GZIP_XFL_MAXIMUM: u8 = 0x02;

/// Extra-flags value when the first content was stored.
pub const GZIP_XFL_NONE: u8 = 0x00;

const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];
const GZIP_METHOD_DEFLATE: u8 = 0x08;

/// Builds the gzip header tagged with the quality of the first content.
///
/// [`Quality::Fast`] shares the maximum-effort tag.
#[must_use]
pub const fn gzip_header(quality: Quality) -> [u8; GZIP_HEADER_LEN] {
    let xfl = if quality.is_store() {
        GZIP_XFL_NONE
    } else {
        GZIP_XFL_MAXIMUM
    };
    [
        GZIP_MAGIC[0],
        GZIP_MAGIC[1],
        GZIP_METHOD_DEFLATE,
        0x00,
        0x00,
        0x00,
        0x00,
        0x00,
        xfl,
        0x00,
    ]
}

/// Framing applied around the composed payload.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ContainerFormat {
    /// Gzip member header, no trailer.
    #[default]
    Gzip,
    /// Bare deflate block sequence for embedding elsewhere.
    Deflate,
}

impl ContainerFormat {
    /// Returns the canonical lowercase name used for display and parsing.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Gzip => "gzip",
            Self::Deflate => "deflate",
        }
    }

    /// Writes the header that precedes the first payload byte.
    pub fn write_header<W: Write + ?Sized>(self, sink: &mut W, quality: Quality) -> io::Result<()> {
        match self {
            Self::Gzip => sink.write_all(&gzip_header(quality)),
            Self::Deflate => Ok(()),
        }
    }

    /// Writes the trailer that follows the terminator.
    pub fn write_trailer<W: Write + ?Sized>(self, _sink: &mut W) -> io::Result<()> {
        match self {
            Self::Gzip | Self::Deflate => Ok(()),
        }
    }
}

impl fmt::Display for ContainerFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a container format name cannot be parsed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContainerFormatParseError {
    input: String,
}

impl ContainerFormatParseError {
    /// Creates a parse error capturing the original input.
    #[must_use]
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }

    /// Returns the invalid input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for ContainerFormatParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported container format: {}", self.input)
    }
}

impl std::error::Error for ContainerFormatParseError {}

impl FromStr for ContainerFormat {
    type Err = ContainerFormatParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gzip" | "gz" | "x-gzip" => Ok(Self::Gzip),
            "deflate" | "raw" => Ok(Self::Deflate),
            other => Err(ContainerFormatParseError::new(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gzip_header_tags_first_quality() {
        assert_eq!(
            gzip_header(Quality::Maximum),
            [0x1F, 0x8B, 0x08, 0, 0, 0, 0, 0, 0x02, 0]
        );
        assert_eq!(gzip_header(Quality::Fast), gzip_header(Quality::Maximum));
        assert_eq!(
            gzip_header(Quality::Store),
            [0x1F, 0x8B, 0x08, 0, 0, 0, 0, 0, 0x00, 0]
        );
    }

    #[test]
    fn deflate_writes_no_framing() {
        let mut out = Vec::new();
        ContainerFormat::Deflate
            .write_header(&mut out, Quality::Maximum)
            .unwrap();
        ContainerFormat::Deflate.write_trailer(&mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn gzip_writes_header_only() {
        let mut out = Vec::new();
        ContainerFormat::Gzip
            .write_header(&mut out, Quality::Store)
            .unwrap();
        ContainerFormat::Gzip.write_trailer(&mut out).unwrap();
        assert_eq!(out, gzip_header(Quality::Store));
    }

    #[test]
    fn parsing_accepts_names_and_aliases() {
        assert_eq!("gzip".parse::<ContainerFormat>().unwrap(), ContainerFormat::Gzip);
        assert_eq!("GZ".parse::<ContainerFormat>().unwrap(), ContainerFormat::Gzip);
        assert_eq!("deflate".parse::<ContainerFormat>().unwrap(), ContainerFormat::Deflate);
        assert_eq!(" raw ".parse::<ContainerFormat>().unwrap(), ContainerFormat::Deflate);
    }

    #[test]
    fn parsing_rejects_unknown_formats() {
        let err = "brotli".parse::<ContainerFormat>().expect_err("brotli unsupported");
        assert_eq!(err.input(), "brotli");
    }

    #[test]
    fn display_round_trips_through_parse() {
        for format in [ContainerFormat::Gzip, ContainerFormat::Deflate] {
            assert_eq!(format.to_string().parse::<ContainerFormat>().unwrap(), format);
        }
    }
}
