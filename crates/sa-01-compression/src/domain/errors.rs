//! # Compression Errors

use thiserror::Error;

/// Errors that can occur while compressing or decompressing a payload.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CompressionError {
    /// The deflate stream could not be produced.
    #[error("Compression failed: {0}")]
    CompressFailed(String),

    /// The input is not a valid zlib stream.
    #[error("Decompression failed: {0}")]
    DecompressFailed(String),

    /// Input ended before the stream did.
    #[error("Compressed stream truncated after {consumed_bytes} bytes")]
    TruncatedStream { consumed_bytes: usize },

    /// No worker answered within the request timeout.
    #[error("Compression request timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },

    /// The worker pool is gone.
    #[error("Compression workers unavailable: {0}")]
    Unavailable(String),
}
