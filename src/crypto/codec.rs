//! # Text Codec
//!
//! Reversible binary↔text encoding for carrying opaque byte buffers across
//! the text-only service boundary.
//!
//! Standard base64 with padding. `decode(encode(b)) == b` for every byte
//! sequence, including empty, all-zero, and non-printable input. Decoding is
//! strict: characters outside the alphabet, bad padding, or trailing garbage
//! fail with a [`CodecError`](crate::error::Error::Codec) rather than being
//! truncated or substituted.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::{Error, Result};

/// Encode bytes as base64 text
pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode base64 text back into bytes
///
/// Fails with `CodecError` on any malformed input.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(text)
        .map_err(|e| Error::Codec(e.to_string()))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_basic() {
        let data = b"hello world";
        assert_eq!(decode(&encode(data)).unwrap(), data);
    }

    #[test]
    fn test_round_trip_empty() {
        assert_eq!(encode(b""), "");
        assert_eq!(decode("").unwrap(), b"");
    }

    #[test]
    fn test_round_trip_all_zero() {
        let data = [0u8; 64];
        assert_eq!(decode(&encode(&data)).unwrap(), data);
    }

    #[test]
    fn test_round_trip_all_ff() {
        let data = [0xFFu8; 64];
        assert_eq!(decode(&encode(&data)).unwrap(), data);
    }

    #[test]
    fn test_round_trip_every_byte_value() {
        let data: Vec<u8> = (0u8..=255).collect();
        assert_eq!(decode(&encode(&data)).unwrap(), data);
    }

    #[test]
    fn test_wrong_alphabet_rejected() {
        let err = decode("not base64!!").unwrap_err();
        assert_eq!(err.kind(), "CodecError");
    }

    #[test]
    fn test_bad_padding_rejected() {
        // Valid prefix with the padding stripped off mid-quantum
        assert!(decode("AAAA=").is_err());
        assert!(decode("A").is_err());
    }
}
