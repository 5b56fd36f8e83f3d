//! # Key Management
//!
//! Key material for the envelope service.
//!
//! ## Key Types
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                           KEY TYPES                                 │
//! ├─────────────────────────────────────────────────────────────────────┤
//! │                                                                     │
//! │  SigningKeyPair (Ed25519)     — signs plaintext digests;           │
//! │                                 public half verifies them          │
//! │                                                                     │
//! │  EncryptionKeyPair (X25519)   — unwraps symmetric keys sent to     │
//! │                                 this identity; public half is      │
//! │                                 what senders wrap against          │
//! │                                                                     │
//! │  KeyPair                      — one identity = one signing pair    │
//! │                                 plus one encryption pair           │
//! │                                                                     │
//! │  PublicKey                    — the shareable halves of a KeyPair, │
//! │                                 hex round-trippable for transport  │
//! │                                                                     │
//! │  SymmetricKey                 — 32 ephemeral bytes, one per        │
//! │                                 envelope, zeroized on drop         │
//! │                                                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Private components never leave the owning process; only [`PublicKey`]
//! values travel across the boundary.

use ed25519_dalek::{SigningKey, VerifyingKey};
use serde::{Deserialize, Serialize};
use x25519_dalek::{PublicKey as X25519PublicKey, StaticSecret};
use zeroize::ZeroizeOnDrop;

use crate::crypto::rng::RandomSource;
use crate::error::{Error, Result};

/// Size of a symmetric envelope key in bytes (256 bits, AES-256)
pub const SYMMETRIC_KEY_SIZE: usize = 32;

/// Size of a public key component in bytes
pub const PUBLIC_KEY_SIZE: usize = 32;

/// Combined keypair for one identity: signing plus encryption keys
///
/// Private halves are zeroized when the struct is dropped. Public halves can
/// be shared freely via [`KeyPair::public_keys`].
#[derive(ZeroizeOnDrop)]
pub struct KeyPair {
    /// Ed25519 keypair for signing digests
    pub signing: SigningKeyPair,
    /// X25519 keypair for unwrapping symmetric keys
    pub encryption: EncryptionKeyPair,
}

impl KeyPair {
    /// Generate a new random keypair from the given random source
    pub fn generate(rng: &RandomSource) -> Self {
        Self {
            signing: SigningKeyPair::generate(rng),
            encryption: EncryptionKeyPair::generate(rng),
        }
    }

    /// Build a keypair from raw 32-byte seeds
    ///
    /// Deterministic: the same seeds always produce the same keys. The
    /// embedding application's key-management layer is responsible for
    /// sourcing and storing seeds securely.
    pub fn from_seeds(signing: &[u8; 32], encryption: &[u8; 32]) -> Self {
        Self {
            signing: SigningKeyPair::from_bytes(signing),
            encryption: EncryptionKeyPair::from_bytes(encryption),
        }
    }

    /// Get the public keys for sharing with others
    pub fn public_keys(&self) -> PublicKey {
        PublicKey {
            signing: self.signing.public_bytes(),
            encryption: self.encryption.public_bytes(),
        }
    }
}

/// Ed25519 signing keypair
#[derive(ZeroizeOnDrop)]
pub struct SigningKeyPair {
    /// Private signing key (secret)
    #[zeroize(skip)] // ed25519_dalek::SigningKey handles its own zeroization
    secret: SigningKey,
}

impl SigningKeyPair {
    /// Generate a new random signing keypair
    pub fn generate(rng: &RandomSource) -> Self {
        let secret = rng.with_rng(|r| SigningKey::generate(r));
        Self { secret }
    }

    /// Create from raw bytes
    pub fn from_bytes(bytes: &[u8; 32]) -> Self {
        Self {
            secret: SigningKey::from_bytes(bytes),
        }
    }

    /// Get the public key bytes
    pub fn public_bytes(&self) -> [u8; 32] {
        self.secret.verifying_key().to_bytes()
    }

    /// Get the verifying key for signature verification
    pub fn verifying_key(&self) -> VerifyingKey {
        self.secret.verifying_key()
    }

    /// Get reference to the signing key
    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.secret
    }
}

/// X25519 encryption keypair for key wrapping
#[derive(ZeroizeOnDrop)]
pub struct EncryptionKeyPair {
    /// Private encryption key (secret)
    #[zeroize(skip)] // x25519_dalek handles its own zeroization
    secret: StaticSecret,
    /// Public encryption key (derived from secret)
    #[zeroize(skip)]
    public: X25519PublicKey,
}

impl EncryptionKeyPair {
    /// Generate a new random encryption keypair
    pub fn generate(rng: &RandomSource) -> Self {
        let secret = rng.with_rng(|r| StaticSecret::random_from_rng(&mut *r));
        let public = X25519PublicKey::from(&secret);
        Self { secret, public }
    }

    /// Create from raw bytes
    pub fn from_bytes(bytes: &[u8; 32]) -> Self {
        let secret = StaticSecret::from(*bytes);
        let public = X25519PublicKey::from(&secret);
        Self { secret, public }
    }

    /// Get the public key bytes
    pub fn public_bytes(&self) -> [u8; 32] {
        self.public.to_bytes()
    }

    /// Perform Diffie-Hellman key agreement with a peer's public key
    pub(crate) fn diffie_hellman(&self, their_public: &[u8; 32]) -> [u8; 32] {
        let their_public = X25519PublicKey::from(*their_public);
        self.secret.diffie_hellman(&their_public).to_bytes()
    }
}

/// Public keys that can be safely shared with others
///
/// Serializes with each component as hex; the combined [`PublicKey::to_hex`]
/// form (128 characters, signing then encryption) is what travels in
/// `recipientKey`/`senderKey` request fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PublicKey {
    /// Ed25519 public key for signature verification (32 bytes)
    #[serde(with = "hex_bytes")]
    pub signing: [u8; 32],

    /// X25519 public key for key wrapping (32 bytes)
    #[serde(with = "hex_bytes")]
    pub encryption: [u8; 32],
}

impl PublicKey {
    /// Create a PublicKey from raw bytes
    pub fn from_bytes(signing: [u8; 32], encryption: [u8; 32]) -> Self {
        Self { signing, encryption }
    }

    /// Encode as a 128-character hex string
    pub fn to_hex(&self) -> String {
        format!("{}{}", hex::encode(self.signing), hex::encode(self.encryption))
    }

    /// Decode from a 128-character hex string
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        if hex_str.len() != 128 {
            return Err(Error::Parse(format!(
                "public key must be 128 hex characters, got {}",
                hex_str.len()
            )));
        }

        let bytes = hex::decode(hex_str)
            .map_err(|e| Error::Parse(format!("invalid public key hex: {}", e)))?;

        let signing: [u8; 32] = bytes[0..32]
            .try_into()
            .map_err(|_| Error::Parse("invalid signing key length".into()))?;

        let encryption: [u8; 32] = bytes[32..64]
            .try_into()
            .map_err(|_| Error::Parse("invalid encryption key length".into()))?;

        Ok(Self { signing, encryption })
    }
}

/// An ephemeral symmetric key for one envelope
///
/// Fixed 32-byte length matching the cipher's key-size requirement; any
/// other length is a `KeySetupError`. Zeroized when dropped, and never
/// reused across unrelated envelopes.
#[derive(ZeroizeOnDrop)]
pub struct SymmetricKey([u8; SYMMETRIC_KEY_SIZE]);

impl std::fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SymmetricKey(REDACTED)")
    }
}

impl SymmetricKey {
    /// Generate a fresh random symmetric key
    pub fn generate(rng: &RandomSource) -> Self {
        let mut bytes = [0u8; SYMMETRIC_KEY_SIZE];
        rng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Create from exactly 32 bytes
    pub fn from_bytes(bytes: [u8; SYMMETRIC_KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Create from a slice, rejecting any length the cipher does not accept
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        let bytes: [u8; SYMMETRIC_KEY_SIZE] = slice.try_into().map_err(|_| {
            Error::KeySetup(format!(
                "symmetric key must be {} bytes, got {}",
                SYMMETRIC_KEY_SIZE,
                slice.len()
            ))
        })?;
        Ok(Self(bytes))
    }

    /// Get the raw key bytes
    pub(crate) fn as_bytes(&self) -> &[u8; SYMMETRIC_KEY_SIZE] {
        &self.0
    }
}

/// Serde helper for serializing 32-byte arrays as hex
mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &[u8; 32], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<[u8; 32], D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(&s).map_err(serde::de::Error::custom)?;
        bytes.try_into().map_err(|_| serde::de::Error::custom("Invalid length"))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keypair_generation() {
        let rng = RandomSource::new();
        let kp1 = KeyPair::generate(&rng);
        let kp2 = KeyPair::generate(&rng);

        assert_ne!(kp1.signing.public_bytes(), kp2.signing.public_bytes());
        assert_ne!(kp1.encryption.public_bytes(), kp2.encryption.public_bytes());
    }

    #[test]
    fn test_keypair_from_seeds() {
        let kp1 = KeyPair::from_seeds(&[1u8; 32], &[2u8; 32]);
        let kp2 = KeyPair::from_seeds(&[1u8; 32], &[2u8; 32]);

        assert_eq!(kp1.signing.public_bytes(), kp2.signing.public_bytes());
        assert_eq!(kp1.encryption.public_bytes(), kp2.encryption.public_bytes());
    }

    #[test]
    fn test_diffie_hellman_agreement() {
        let rng = RandomSource::new();
        let alice = EncryptionKeyPair::generate(&rng);
        let bob = EncryptionKeyPair::generate(&rng);

        let alice_shared = alice.diffie_hellman(&bob.public_bytes());
        let bob_shared = bob.diffie_hellman(&alice.public_bytes());

        assert_eq!(alice_shared, bob_shared);
    }

    #[test]
    fn test_public_key_hex_round_trip() {
        let rng = RandomSource::new();
        let public = KeyPair::generate(&rng).public_keys();

        let hex = public.to_hex();
        assert_eq!(hex.len(), 128);
        assert_eq!(PublicKey::from_hex(&hex).unwrap(), public);
    }

    #[test]
    fn test_public_key_bad_hex_rejected() {
        assert_eq!(PublicKey::from_hex("abc").unwrap_err().kind(), "ParseError");

        let not_hex = "zz".repeat(64);
        assert_eq!(PublicKey::from_hex(&not_hex).unwrap_err().kind(), "ParseError");
    }

    #[test]
    fn test_public_key_serde_round_trip() {
        let rng = RandomSource::new();
        let public = KeyPair::generate(&rng).public_keys();

        let json = serde_json::to_string(&public).unwrap();
        let restored: PublicKey = serde_json::from_str(&json).unwrap();
        assert_eq!(public, restored);
    }

    #[test]
    fn test_symmetric_key_length_enforced() {
        assert!(SymmetricKey::from_slice(&[0u8; 32]).is_ok());

        let err = SymmetricKey::from_slice(&[0u8; 16]).unwrap_err();
        assert_eq!(err.kind(), "KeySetupError");

        let err = SymmetricKey::from_slice(&[0u8; 33]).unwrap_err();
        assert_eq!(err.kind(), "KeySetupError");
    }

    #[test]
    fn test_symmetric_keys_are_unique() {
        let rng = RandomSource::new();
        let k1 = SymmetricKey::generate(&rng);
        let k2 = SymmetricKey::generate(&rng);
        assert_ne!(k1.as_bytes(), k2.as_bytes());
    }
}
