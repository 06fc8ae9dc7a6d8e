#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `precompress` produces raw-deflate chunks that can later be spliced into a
//! larger compressed stream without being decompressed again. Every chunk is
//! byte aligned and ends in one of two canonical terminal markers, which the
//! composer strips and replaces with a single terminator for the whole
//! composite.
//!
//! # Design
//!
//! - [`session::DeflateSession`] wraps [`flate2::Compress`] in raw-deflate
//!   mode. It feeds input with no flush and drains with a sync flush, so the
//!   emitted bytes always end on the `00 00 FF FF` sync marker and never carry
//!   a final block of their own.
//! - [`chunk::PreCompressionWriter`] drives one session over a caller-owned
//!   sink and appends the empty final block matching its [`Quality`] when it
//!   is closed.
//! - [`marker::Terminal`] describes the two terminal shapes and splits a chunk
//!   into its interior body and trailing suffix.
//!
//! # Invariants
//!
//! - Chunk output ends with `00 00 FF FF 03 00` for [`Quality::Maximum`] and
//!   [`Quality::Fast`], and with `00 00 FF FF 01 00 00 FF FF` for
//!   [`Quality::Store`].
//! - Chunks never carry a zlib or gzip header.
//! - Codec errors surface as [`std::io::Error`] values; malformed chunk
//!   buffers are reported through [`ChunkFormatError`].
//!
//! # Examples
//!
//! ```
//! use precompress::{Quality, Terminal, compress_chunk};
//!
//! # fn main() -> std::io::Result<()> {
//! let chunk = compress_chunk(b"relocatable payload", Quality::Maximum)?;
//! assert!(chunk.ends_with(Terminal::Compressed.bytes()));
//! # Ok(())
//! # }
//! ```

pub mod chunk;
mod common;
pub mod debug_chunk;
mod error;
pub mod marker;
pub mod quality;
pub mod session;

pub use chunk::{PreCompressionWriter, compress_chunk};
pub use common::CountingWriter;
pub use error::ChunkFormatError;
pub use marker::{SYNC_MARKER, Terminal, split_chunk};
pub use quality::{Quality, QualityParseError};
