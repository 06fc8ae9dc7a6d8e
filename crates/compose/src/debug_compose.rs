//! Tracing hooks for composite stream assembly.
//!
//! All tracing is conditionally compiled behind the `tracing` feature flag and
//! produces no-op inline functions when disabled.

use precompress::Quality;

use crate::format::ContainerFormat;

/// Target name for tracing events.
#[cfg(feature = "tracing")]
const COMPOSE_TARGET: &str = "splice::compose";

/// Traces the container header being written ahead of the first payload byte.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_header_written(format: ContainerFormat, quality: Quality) {
    tracing::debug!(
        target: COMPOSE_TARGET,
        format = %format,
        quality = %quality,
        "header_written"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_header_written(_format: ContainerFormat, _quality: Quality) {}

/// Traces the end of a raw run and the bytes its final sync flush drained.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_raw_run_ended(quality: Quality, consumed: u64, flushed: u64) {
    tracing::trace!(
        target: COMPOSE_TARGET,
        quality = %quality,
        consumed = consumed,
        flushed = flushed,
        "raw_run_ended"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_raw_run_ended(_quality: Quality, _consumed: u64, _flushed: u64) {}

/// Traces a precompressed chunk being spliced in.
///
/// # Arguments
///
/// * `quality` - Quality inferred from the chunk's terminal
/// * `body_len` - Bytes copied to the sink after stripping the final block
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_chunk_spliced(quality: Quality, body_len: usize) {
    tracing::trace!(
        target: COMPOSE_TARGET,
        quality = %quality,
        body_len = body_len,
        "chunk_spliced"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_chunk_spliced(_quality: Quality, _body_len: usize) {}

/// Traces the stream being closed.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_stream_closed(
    format: ContainerFormat,
    last_used: Quality,
    header_written: bool,
    total_bytes: u64,
) {
    tracing::debug!(
        target: COMPOSE_TARGET,
        format = %format,
        last_used = %last_used,
        header_written = header_written,
        total_bytes = total_bytes,
        "stream_closed"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_stream_closed(
    _format: ContainerFormat,
    _last_used: Quality,
    _header_written: bool,
    _total_bytes: u64,
) {
}

/// Traces a close that failed while the stream was being dropped.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_drop_close_failed(error: &crate::ComposeError) {
    tracing::warn!(target: COMPOSE_TARGET, error = %error, "drop_close_failed");
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_drop_close_failed(_error: &crate::ComposeError) {}
