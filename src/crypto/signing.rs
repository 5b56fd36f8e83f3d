//! # Signing Engine
//!
//! Plaintext digests and digital signatures over them.
//!
//! The digest is SHA-256 over the original plaintext bytes, computed before
//! encryption; the signature is Ed25519 over the 32-byte digest. Ed25519 is
//! deterministic: signing does not consume randomness, so there is no
//! per-signature nonce to mismanage.
//!
//! Verification is total: any signature input that does not verify (wrong
//! key, wrong digest, truncated or bit-flipped bytes, non-canonical points)
//! yields `false`. It never panics and never errors. `true` means the
//! signature is valid (conventional polarity).

use ed25519_dalek::{Signature as Ed25519Signature, Signer, Verifier, VerifyingKey};
use sha2::{Digest as _, Sha256};

use crate::crypto::keys::SigningKeyPair;
use crate::error::{Error, Result};

/// Size of a plaintext digest in bytes (SHA-256)
pub const DIGEST_SIZE: usize = 32;

/// Size of an Ed25519 signature in bytes
pub const SIGNATURE_SIZE: usize = 64;

/// An Ed25519 signature over a plaintext digest
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Signature([u8; SIGNATURE_SIZE]);

impl Signature {
    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; SIGNATURE_SIZE]) -> Self {
        Self(bytes)
    }

    /// Create from a slice (must be exactly 64 bytes)
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        let bytes: [u8; SIGNATURE_SIZE] = slice.try_into().map_err(|_| {
            Error::Parse(format!(
                "signature must be {} bytes, got {}",
                SIGNATURE_SIZE,
                slice.len()
            ))
        })?;
        Ok(Self(bytes))
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8; SIGNATURE_SIZE] {
        &self.0
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Compute the SHA-256 digest of a plaintext
///
/// Deterministic: the same input always produces the same digest.
pub fn digest(data: &[u8]) -> [u8; DIGEST_SIZE] {
    Sha256::digest(data).into()
}

/// Sign a digest with the sender's private key
pub fn sign(keypair: &SigningKeyPair, digest_value: &[u8; DIGEST_SIZE]) -> Signature {
    let sig = keypair.signing_key().sign(digest_value);
    Signature(sig.to_bytes())
}

/// Verify a signature over a digest with the sender's public key
///
/// Returns `true` iff `signature` is a valid signature of `digest_value`
/// under `public_key`. `signature` may be any byte slice; malformed input
/// simply fails to verify.
pub fn verify(public_key: &[u8; 32], digest_value: &[u8; DIGEST_SIZE], signature: &[u8]) -> bool {
    let Ok(verifying_key) = VerifyingKey::from_bytes(public_key) else {
        return false;
    };
    let Ok(sig_bytes) = <[u8; SIGNATURE_SIZE]>::try_from(signature) else {
        return false;
    };

    let sig = Ed25519Signature::from_bytes(&sig_bytes);
    verifying_key.verify(digest_value, &sig).is_ok()
}

// ============================================================================
// TESTS
// ============================================================================
