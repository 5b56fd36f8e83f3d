//! # Symmetric Cipher Engine
//!
//! Bulk encryption of envelope plaintext under a per-envelope
//! [`SymmetricKey`], using AES-256-GCM.
//!
//! ## Layout
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    CIPHERTEXT BUFFER LAYOUT                         │
//! ├─────────────────────────────────────────────────────────────────────┤
//! │                                                                     │
//! │   nonce (12 bytes) │ ciphertext (len(plaintext)) │ tag (16 bytes)  │
//! │                                                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A fresh nonce is drawn from the [`RandomSource`] for every encryption and
//! carried in front of the ciphertext, so an envelope needs exactly one
//! opaque ciphertext field. The authenticated mode means any modification of
//! the buffer is detected at decryption time; there is no unauthenticated
//! block-at-a-time path.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce as AesNonce};

use crate::crypto::keys::SymmetricKey;
use crate::crypto::rng::RandomSource;
use crate::error::{Error, Result};

/// Size of the AES-GCM nonce in bytes (96 bits)
pub const NONCE_SIZE: usize = 12;

/// Size of the AES-GCM authentication tag in bytes (128 bits)
pub const TAG_SIZE: usize = 16;

/// Encrypt plaintext under a symmetric key
///
/// Returns `nonce || ciphertext || tag` as a single buffer. Calling twice
/// with the same key and plaintext produces different output, because the
/// nonce is freshly drawn each time.
pub fn encrypt(key: &SymmetricKey, plaintext: &[u8], rng: &RandomSource) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| Error::KeySetup(format!("invalid cipher key: {}", e)))?;

    let mut nonce = [0u8; NONCE_SIZE];
    rng.fill_bytes(&mut nonce);

    let ciphertext = cipher
        .encrypt(AesNonce::from_slice(&nonce), plaintext)
        .map_err(|_| Error::KeySetup("cipher rejected plaintext".into()))?;

    let mut out = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    out.extend_from_slice(&nonce);
    out.extend_from_slice(&ciphertext);
    Ok(out)
}

/// Decrypt a `nonce || ciphertext || tag` buffer
///
/// Fails with `IntegrityFailure` when the buffer is truncated, when any bit
/// of it was flipped, or when the key does not match. A wrong plaintext is
/// never returned undetected.
pub fn decrypt(key: &SymmetricKey, data: &[u8]) -> Result<Vec<u8>> {
    if data.len() < NONCE_SIZE + TAG_SIZE {
        return Err(Error::Integrity);
    }

    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| Error::KeySetup(format!("invalid cipher key: {}", e)))?;

    let (nonce, ciphertext) = data.split_at(NONCE_SIZE);
    cipher
        .decrypt(AesNonce::from_slice(nonce), ciphertext)
        .map_err(|_| Error::Integrity)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_key() -> SymmetricKey {
        SymmetricKey::from_bytes([42u8; 32])
    }

    #[test]
    fn test_encrypt_decrypt_round_trip() {
        let rng = RandomSource::new();
        let key = test_key();
        let plaintext = b"hello world";

        let ciphertext = encrypt(&key, plaintext, &rng).unwrap();
        let decrypted = decrypt(&key, &ciphertext).unwrap();

        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn test_empty_plaintext_round_trip() {
        let rng = RandomSource::new();
        let key = test_key();

        let ciphertext = encrypt(&key, b"", &rng).unwrap();
        assert_eq!(ciphertext.len(), NONCE_SIZE + TAG_SIZE);
        assert_eq!(decrypt(&key, &ciphertext).unwrap(), b"");
    }

    #[test]
    fn test_fresh_nonce_per_call() {
        let rng = RandomSource::new();
        let key = test_key();

        let ct1 = encrypt(&key, b"same input", &rng).unwrap();
        let ct2 = encrypt(&key, b"same input", &rng).unwrap();
        assert_ne!(ct1, ct2);
    }

    #[test]
    fn test_tampered_ciphertext_detected() {
        let rng = RandomSource::new();
        let key = test_key();
        let mut ciphertext = encrypt(&key, b"hello world", &rng).unwrap();

        for i in 0..ciphertext.len() {
            ciphertext[i] ^= 0x01;
            let err = decrypt(&key, &ciphertext).unwrap_err();
            assert_eq!(err.kind(), "IntegrityFailure");
            ciphertext[i] ^= 0x01;
        }
    }

    #[test]
    fn test_wrong_key_detected() {
        let rng = RandomSource::new();
        let ciphertext = encrypt(&test_key(), b"hello", &rng).unwrap();

        let other = SymmetricKey::from_bytes([43u8; 32]);
        let err = decrypt(&other, &ciphertext).unwrap_err();
        assert_eq!(err.kind(), "IntegrityFailure");
    }

    #[test]
    fn test_truncated_input_detected() {
        let rng = RandomSource::new();
        let key = test_key();
        let ciphertext = encrypt(&key, b"hello", &rng).unwrap();

        let err = decrypt(&key, &ciphertext[..NONCE_SIZE + TAG_SIZE - 1]).unwrap_err();
        assert_eq!(err.kind(), "IntegrityFailure");

        let err = decrypt(&key, b"").unwrap_err();
        assert_eq!(err.kind(), "IntegrityFailure");
    }
}
