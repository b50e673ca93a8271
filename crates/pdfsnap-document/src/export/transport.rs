// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Transport encoding: PDF bytes to the base64 text the storage API accepts.
//
// Bytes are encoded in bounded chunks appended to one output buffer. Each
// chunk except the last is a multiple of three bytes long, so no chunk emits
// padding and the concatenation is byte-for-byte the one-shot encoding.
// Getting that alignment wrong silently corrupts every file larger than one
// chunk.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use pdfsnap_core::error::SnapError;
use tracing::{debug, instrument};

/// Encode `bytes` as standard base64, at most about `chunk_size` input bytes
/// per step. `chunk_size` is rounded down to a multiple of three (minimum 3).
#[instrument(skip(bytes), fields(bytes_len = bytes.len()))]
pub fn encode_transport(bytes: &[u8], chunk_size: usize) -> String {
    let step = (chunk_size / 3).max(1) * 3;
    let mut encoded = String::with_capacity(bytes.len().div_ceil(3) * 4);

    for chunk in bytes.chunks(step) {
        STANDARD.encode_string(chunk, &mut encoded);
    }

    debug!(step, chunks = bytes.len().div_ceil(step), encoded_len = encoded.len(), "Transport encoding complete");
    encoded
}

/// Inverse of [`encode_transport`].
pub fn decode_transport(text: &str) -> Result<Vec<u8>, SnapError> {
    STANDARD
        .decode(text.trim())
        .map_err(|err| SnapError::Encoding(format!("stored data is not valid base64: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic bytes covering every value, without repeating a short period.
    fn sample(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i.wrapping_mul(31) ^ (i >> 7)) as u8).collect()
    }

    #[test]
    fn empty_input() {
        assert_eq!(encode_transport(&[], 8192), "");
        assert!(decode_transport("").unwrap().is_empty());
    }

    #[test]
    fn round_trips_across_chunk_boundaries() {
        let chunk = 8192;
        for len in [1, 2, 3, chunk - 1, chunk, chunk + 1, 3 * chunk + 5, 100_003] {
            let bytes = sample(len);
            let encoded = encode_transport(&bytes, chunk);
            assert_eq!(decode_transport(&encoded).unwrap(), bytes, "len {len}");
        }
    }

    #[test]
    fn matches_one_shot_encoding_for_unaligned_chunks() {
        let bytes = sample(1000);
        for chunk in [1, 2, 4, 5, 7, 8192] {
            assert_eq!(encode_transport(&bytes, chunk), STANDARD.encode(&bytes), "chunk {chunk}");
        }
    }

    #[test]
    fn no_padding_inside_the_stream() {
        let encoded = encode_transport(&sample(20_000), 8192);
        let trimmed = encoded.trim_end_matches('=');
        assert!(!trimmed.contains('='));
    }

    #[test]
    fn rejects_corrupt_text() {
        assert!(matches!(decode_transport("@@@@"), Err(SnapError::Encoding(_))));
    }
}
