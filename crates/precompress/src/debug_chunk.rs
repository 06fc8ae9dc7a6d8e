//! Tracing hooks for chunk production.
//!
//! All tracing is conditionally compiled behind the `tracing` feature flag and
//! produces no-op inline functions when disabled.

#[cfg(feature = "tracing")]
const CHUNK_TARGET: &str = "splice::chunk";

use crate::quality::Quality;

/// Traces a deflate session being opened.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_session_opened(quality: Quality) {
    tracing::trace!(target: CHUNK_TARGET, quality = %quality, "session_opened");
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_session_opened(_quality: Quality) {}

/// Traces a sync flush and the number of bytes it drained.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_session_flushed(quality: Quality, flushed: u64) {
    tracing::trace!(
        target: CHUNK_TARGET,
        quality = %quality,
        flushed = flushed,
        "session_flushed"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_session_flushed(_quality: Quality, _flushed: u64) {}

/// Traces a completed chunk.
///
/// # Arguments
///
/// * `quality` - Quality the chunk was compressed at
/// * `uncompressed` - Raw bytes accepted by the writer
/// * `compressed` - Chunk length, terminal included
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_chunk_finished(quality: Quality, uncompressed: u64, compressed: u64) {
    tracing::debug!(
        target: CHUNK_TARGET,
        quality = %quality,
        uncompressed = uncompressed,
        compressed = compressed,
        "chunk_finished"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_chunk_finished(_quality: Quality, _uncompressed: u64, _compressed: u64) {}

/// Traces a close that failed while the writer was being dropped.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_drop_close_failed(error: &std::io::Error) {
    tracing::warn!(target: CHUNK_TARGET, error = %error, "drop_close_failed");
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_drop_close_failed(_error: &std::io::Error) {}
