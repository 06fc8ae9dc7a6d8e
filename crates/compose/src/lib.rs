#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `compose` assembles one compressed response body out of chunks that were
//! compressed ahead of time by [`precompress`] and raw bytes compressed on the
//! fly, without inflating anything. The result is either a gzip member or a
//! bare deflate stream.
//!
//! # Design
//!
//! [`CompositeStream`] owns the sink and tracks an explicit phase: no header
//! yet, idle between contents, or inside a raw run backed by a
//! [`precompress::session::DeflateSession`]. Raw runs and spliced chunks both
//! leave the sink on a sync marker, so any of them can follow any other. The
//! stream writes the container header before the first payload byte and the one
//! real final block when it is closed.
//!
//! # Invariants
//!
//! - At most one header, written lazily and tagged with the first content's
//!   quality.
//! - At most one terminator, written on close, matching the quality of the
//!   most recently accepted content.
//! - If nothing was ever accepted the sink receives no bytes at all.
//!
//! # Errors
//!
//! Operations return [`ComposeResult`]. Rejected chunks surface as
//! [`ComposeError::Format`] before any byte is written; reads, seeks and
//! position queries always fail with [`ComposeError::Unsupported`]. At the
//! [`std::io::Write`] boundary errors convert into [`std::io::Error`].
//!
//! # Examples
//!
//! ```
//! use compose::{ContainerFormat, splice_to_vec};
//! use precompress::{Quality, compress_chunk};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let head = compress_chunk(b"cached head ", Quality::Maximum)?;
//! let tail = compress_chunk(b"cached tail", Quality::Store)?;
//! let body = splice_to_vec(ContainerFormat::Deflate, [&head[..], &tail[..]])?;
//! assert!(body.ends_with(&[0x00, 0x00, 0xFF, 0xFF, 0x01, 0x00, 0x00, 0xFF, 0xFF]));
//! # Ok(())
//! # }
//! ```

pub mod debug_compose;
mod error;
pub mod format;
mod options;
mod stream;

pub use error::{ComposeError, ComposeResult};
pub use format::{ContainerFormat, ContainerFormatParseError};
pub use options::ComposeOptions;
pub use stream::{CompositeStream, splice_to_vec};
