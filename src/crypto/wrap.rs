//! # Key Wrapping Engine
//!
//! Asymmetric encryption of a per-envelope [`SymmetricKey`] so that only the
//! intended recipient can recover it.
//!
//! ## Scheme
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        KEY WRAP FLOW                                │
//! ├─────────────────────────────────────────────────────────────────────┤
//! │                                                                     │
//! │  1. Ephemeral X25519 keypair (fresh from the RandomSource)         │
//! │                                                                     │
//! │  2. ECDH: ephemeral_private × recipient_public → shared secret     │
//! │                                                                     │
//! │  3. HKDF-SHA256(                                                   │
//! │       ikm  = shared secret,                                        │
//! │       salt = ephemeral_public ‖ recipient_public,                  │
//! │       info = "envelope-key-wrap-v1"                                │
//! │     ) → wrap key (32 bytes)                                        │
//! │                                                                     │
//! │  4. AES-256-GCM(wrap key, fresh nonce, symmetric key bytes)        │
//! │                                                                     │
//! │  Output: ephemeral_public(32) ‖ nonce(12) ‖ ciphertext+tag(48)     │
//! │                                                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The recipient repeats steps 2–3 with its private key and the embedded
//! ephemeral public key, then opens the AEAD. A wrong private key or any
//! corruption of the blob fails the authentication tag, so [`unwrap`] fails
//! explicitly rather than handing back garbage key bytes.
//!
//! The ephemeral secret is consumed by the key agreement and cannot be
//! reused; wrapping the same key twice produces unrelated blobs.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce as AesNonce};
use hkdf::Hkdf;
use sha2::Sha256;
use x25519_dalek::{EphemeralSecret, PublicKey as X25519PublicKey};

use crate::crypto::cipher::{NONCE_SIZE, TAG_SIZE};
use crate::crypto::keys::{EncryptionKeyPair, SymmetricKey, SYMMETRIC_KEY_SIZE};
use crate::crypto::rng::RandomSource;
use crate::error::{Error, Result};

/// Exact size of a wrapped key blob in bytes
pub const WRAPPED_KEY_SIZE: usize = 32 + NONCE_SIZE + SYMMETRIC_KEY_SIZE + TAG_SIZE;

/// Domain separation string for the wrap-key derivation
const WRAP_INFO: &[u8] = b"envelope-key-wrap-v1";

/// Derive the AEAD key protecting the wrapped symmetric key
///
/// Salting with both public keys binds the derived key to this particular
/// (ephemeral, recipient) pairing.
fn derive_wrap_key(
    shared: &[u8; 32],
    ephemeral_public: &[u8; 32],
    recipient_public: &[u8; 32],
) -> Result<[u8; 32]> {
    let mut salt = [0u8; 64];
    salt[..32].copy_from_slice(ephemeral_public);
    salt[32..].copy_from_slice(recipient_public);

    let hkdf = Hkdf::<Sha256>::new(Some(&salt), shared);
    let mut key = [0u8; 32];
    hkdf.expand(WRAP_INFO, &mut key)
        .map_err(|_| Error::KeySetup("HKDF expansion failed".into()))?;
    Ok(key)
}

/// Wrap a symmetric key for a recipient's X25519 public key
///
/// Requires fresh randomness for the ephemeral keypair and the AEAD nonce;
/// both are drawn from `rng` inside the call.
pub fn wrap(
    key: &SymmetricKey,
    recipient_public: &[u8; 32],
    rng: &RandomSource,
) -> Result<Vec<u8>> {
    let ephemeral = rng.with_rng(|r| EphemeralSecret::random_from_rng(&mut *r));
    let ephemeral_public = X25519PublicKey::from(&ephemeral).to_bytes();

    let shared = ephemeral
        .diffie_hellman(&X25519PublicKey::from(*recipient_public))
        .to_bytes();
    let wrap_key = derive_wrap_key(&shared, &ephemeral_public, recipient_public)?;

    let cipher = Aes256Gcm::new_from_slice(&wrap_key)
        .map_err(|e| Error::KeySetup(format!("invalid wrap key: {}", e)))?;

    let mut nonce = [0u8; NONCE_SIZE];
    rng.fill_bytes(&mut nonce);

    let sealed = cipher
        .encrypt(AesNonce::from_slice(&nonce), key.as_bytes().as_slice())
        .map_err(|_| Error::KeySetup("key wrapping failed".into()))?;

    let mut out = Vec::with_capacity(WRAPPED_KEY_SIZE);
    out.extend_from_slice(&ephemeral_public);
    out.extend_from_slice(&nonce);
    out.extend_from_slice(&sealed);
    Ok(out)
}

/// Recover a symmetric key from a wrapped blob
///
/// Fails with `KeyUnwrapError` when the blob is truncated or corrupt, or
/// when `recipient` is not the keypair the blob was wrapped for.
pub fn unwrap(wrapped: &[u8], recipient: &EncryptionKeyPair) -> Result<SymmetricKey> {
    if wrapped.len() != WRAPPED_KEY_SIZE {
        return Err(Error::KeyUnwrap(format!(
            "wrapped key must be {} bytes, got {}",
            WRAPPED_KEY_SIZE,
            wrapped.len()
        )));
    }

    let ephemeral_public: [u8; 32] = wrapped[..32]
        .try_into()
        .map_err(|_| Error::KeyUnwrap("malformed ephemeral public key".into()))?;
    let nonce = &wrapped[32..32 + NONCE_SIZE];
    let sealed = &wrapped[32 + NONCE_SIZE..];

    let shared = recipient.diffie_hellman(&ephemeral_public);
    let wrap_key = derive_wrap_key(&shared, &ephemeral_public, &recipient.public_bytes())?;

    let cipher = Aes256Gcm::new_from_slice(&wrap_key)
        .map_err(|e| Error::KeySetup(format!("invalid wrap key: {}", e)))?;

    let key_bytes = cipher
        .decrypt(AesNonce::from_slice(nonce), sealed)
        .map_err(|_| Error::KeyUnwrap("wrong private key or corrupt wrapped key".into()))?;

    SymmetricKey::from_slice(&key_bytes)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_unwrap_round_trip() {
        let rng = RandomSource::new();
        let recipient = EncryptionKeyPair::generate(&rng);
        let key = SymmetricKey::generate(&rng);

        let wrapped = wrap(&key, &recipient.public_bytes(), &rng).unwrap();
        assert_eq!(wrapped.len(), WRAPPED_KEY_SIZE);

        let recovered = unwrap(&wrapped, &recipient).unwrap();
        assert_eq!(recovered.as_bytes(), key.as_bytes());
    }

    #[test]
    fn test_wrong_private_key_fails_explicitly() {
        let rng = RandomSource::new();
        let recipient = EncryptionKeyPair::generate(&rng);
        let stranger = EncryptionKeyPair::generate(&rng);
        let key = SymmetricKey::generate(&rng);

        let wrapped = wrap(&key, &recipient.public_bytes(), &rng).unwrap();
        let err = unwrap(&wrapped, &stranger).unwrap_err();
        assert_eq!(err.kind(), "KeyUnwrapError");
    }

    #[test]
    fn test_truncated_blob_fails_explicitly() {
        let rng = RandomSource::new();
        let recipient = EncryptionKeyPair::generate(&rng);
        let key = SymmetricKey::generate(&rng);

        let wrapped = wrap(&key, &recipient.public_bytes(), &rng).unwrap();
        for len in [0, 31, 32, WRAPPED_KEY_SIZE - 1] {
            let err = unwrap(&wrapped[..len], &recipient).unwrap_err();
            assert_eq!(err.kind(), "KeyUnwrapError");
        }
    }

    #[test]
    fn test_corrupt_blob_fails_explicitly() {
        let rng = RandomSource::new();
        let recipient = EncryptionKeyPair::generate(&rng);
        let key = SymmetricKey::generate(&rng);

        let wrapped = wrap(&key, &recipient.public_bytes(), &rng).unwrap();

        // Flip one bit in each region: ephemeral key, nonce, sealed key
        for index in [0, 33, WRAPPED_KEY_SIZE - 1] {
            let mut corrupt = wrapped.clone();
            corrupt[index] ^= 0x01;
            let err = unwrap(&corrupt, &recipient).unwrap_err();
            assert_eq!(err.kind(), "KeyUnwrapError");
        }
    }

    #[test]
    fn test_fresh_ephemeral_per_wrap() {
        let rng = RandomSource::new();
        let recipient = EncryptionKeyPair::generate(&rng);
        let key = SymmetricKey::generate(&rng);

        let w1 = wrap(&key, &recipient.public_bytes(), &rng).unwrap();
        let w2 = wrap(&key, &recipient.public_bytes(), &rng).unwrap();

        // Same key, same recipient: the blobs (including the embedded
        // ephemeral public keys) must still be unrelated.
        assert_ne!(w1, w2);
        assert_ne!(w1[..32], w2[..32]);
    }
}
