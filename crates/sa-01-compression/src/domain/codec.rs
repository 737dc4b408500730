//! # Deflate Codec
//!
//! Chunked zlib compression at the best-ratio level.

use crate::domain::errors::CompressionError;
use flate2::{Compress, Compression, Decompress, FlushCompress, FlushDecompress, Status};
use tracing::debug;

/// Size of the intermediate output buffer.
pub const CHUNK_SIZE: usize = 1_024;

/// Compress `raw` with best-ratio deflate.
///
/// Output chunks are appended until the compressor reports stream end.
pub fn compress(raw: &[u8]) -> Result<Vec<u8>, CompressionError> {
    let mut deflater = Compress::new(Compression::best(), true);
    let mut buffer = [0u8; CHUNK_SIZE];
    let mut output = Vec::with_capacity(raw.len() / 2 + CHUNK_SIZE);

    loop {
        let consumed = deflater.total_in() as usize;
        let produced_before = deflater.total_out();

        let status = deflater
            .compress(&raw[consumed..], &mut buffer, FlushCompress::Finish)
            .map_err(|e| CompressionError::CompressFailed(e.to_string()))?;

        let produced = (deflater.total_out() - produced_before) as usize;
        output.extend_from_slice(&buffer[..produced]);

        if status == Status::StreamEnd {
            break;
        }
        if produced == 0 && deflater.total_in() as usize == consumed {
            return Err(CompressionError::CompressFailed(
                "compressor made no progress".to_string(),
            ));
        }
    }

    debug!(
        original_kib = raw.len() / CHUNK_SIZE,
        compressed_kib = output.len() / CHUNK_SIZE,
        original_bytes = raw.len(),
        compressed_bytes = output.len(),
        "Payload compressed"
    );

    Ok(output)
}

/// Inverse of [`compress`].
///
/// Fails with `TruncatedStream` when input runs out before stream end.
pub fn decompress(compressed: &[u8]) -> Result<Vec<u8>, CompressionError> {
    let mut inflater = Decompress::new(true);
    let mut buffer = [0u8; CHUNK_SIZE];
    let mut output = Vec::with_capacity(compressed.len().saturating_mul(2));

    loop {
        let consumed = inflater.total_in() as usize;
        let produced_before = inflater.total_out();

        let status = inflater
            .decompress(&compressed[consumed..], &mut buffer, FlushDecompress::None)
            .map_err(|e| CompressionError::DecompressFailed(e.to_string()))?;

        let produced = (inflater.total_out() - produced_before) as usize;
        output.extend_from_slice(&buffer[..produced]);

        if status == Status::StreamEnd {
            break;
        }
        if produced == 0 && inflater.total_in() as usize == consumed {
            return Err(CompressionError::TruncatedStream {
                consumed_bytes: consumed,
            });
        }
    }

    debug!(
        compressed_kib = compressed.len() / CHUNK_SIZE,
        decompressed_kib = output.len() / CHUNK_SIZE,
        "Payload decompressed"
    );

    Ok(output)
}
