//! # Envelope Module
//!
//! The unit of exchange: a sealed, signed message for one recipient.
//!
//! ## Envelope anatomy
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                            ENVELOPE                                     │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ciphertext            AES-256-GCM output of the cleartext, under a   │
//! │                        fresh per-envelope symmetric key (base64)      │
//! │                                                                         │
//! │  encryptedSymmetricKey the symmetric key wrapped for the recipient's  │
//! │                        X25519 public key (base64)                     │
//! │                                                                         │
//! │  digest                SHA-256 of the ORIGINAL cleartext, computed    │
//! │                        before encryption (base64)                     │
//! │                                                                         │
//! │  signature             Ed25519 signature over the digest, made with   │
//! │                        the sender's private key (base64)              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`build`] runs cipher → wrap → digest → sign and assembles the four
//! fields; the envelope is immutable once returned and is never persisted
//! here. Transport and storage belong to the embedding application.
//! [`open`] mirrors the stages in reverse and returns the recovered
//! cleartext together with an authenticity verdict. The verdict is data:
//! an inauthentic envelope still yields its cleartext, and the caller
//! decides whether to discard it.

mod builder;
mod opener;

use serde::{Deserialize, Serialize};

pub use builder::build;
pub use opener::open;

use crate::error::{Error, Result};

/// Largest cleartext accepted by the builder, in bytes
pub const MAX_CLEARTEXT_LEN: usize = 64 * 1024;

/// Largest text-encoded field accepted by the opener, in characters
///
/// Base64 expansion of the largest legal ciphertext (cleartext bound plus
/// nonce and tag overhead), rounded up.
pub(crate) const MAX_ENCODED_FIELD_LEN: usize = 4 * (MAX_CLEARTEXT_LEN + 64) / 3;

/// A sealed, signed message for one recipient
///
/// Field names are the wire names of the boundary protocol; all four values
/// are text-encoded binary. Construct with [`build`], consume with [`open`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Envelope {
    /// Encrypted cleartext (base64)
    pub ciphertext: String,

    /// Symmetric key wrapped for the recipient (base64)
    #[serde(rename = "encryptedSymmetricKey")]
    pub encrypted_symmetric_key: String,

    /// SHA-256 digest of the original cleartext (base64)
    pub digest: String,

    /// Ed25519 signature over the digest (base64)
    pub signature: String,
}

/// The result of opening an envelope
///
/// Both checks are reported individually; [`OpenedEnvelope::is_authentic`]
/// is their conjunction. The cleartext is always present; a failed check
/// downgrades trust in it, it does not hide it.
#[derive(Debug)]
pub struct OpenedEnvelope {
    /// The recovered cleartext bytes
    pub cleartext: Vec<u8>,
    /// Whether the recomputed digest matches the transported digest
    pub digest_ok: bool,
    /// Whether the signature verifies over the transported digest
    pub signature_ok: bool,
}

impl OpenedEnvelope {
    /// Combined integrity and signature verdict
    pub fn is_authentic(&self) -> bool {
        self.digest_ok && self.signature_ok
    }

    /// Consume the result, yielding the cleartext only if authentic
    ///
    /// For callers whose policy is strict rejection: a digest mismatch
    /// becomes `IntegrityFailure`, a bad signature `AuthenticityFailure`.
    pub fn into_authentic(self) -> Result<Vec<u8>> {
        if !self.digest_ok {
            return Err(Error::Integrity);
        }
        if !self.signature_ok {
            return Err(Error::Authenticity);
        }
        Ok(self.cleartext)
    }
}

// ============================================================================
// TESTS
// ============================================================================
