//! # Envelope Core
//!
//! A hybrid encryption envelope library: bulk-encrypt a message with a fresh
//! symmetric key, wrap that key for one recipient, and authenticate the
//! message with a signed digest; then undo it all on the receiving side
//! with an explicit authenticity verdict.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ENVELOPE CORE MODULES                            │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  service — command boundary                                      │  │
//! │  │  {helloWorld, encrypt, decrypt, sign, verify} → handlers        │  │
//! │  └────────────────────────────┬─────────────────────────────────────┘  │
//! │                               │                                         │
//! │  ┌────────────────────────────▼─────────────────────────────────────┐  │
//! │  │  envelope — orchestration                                        │  │
//! │  │  build: cipher → wrap → digest → sign                            │  │
//! │  │  open:  decode → unwrap → decrypt → digest check → verify        │  │
//! │  └────────────────────────────┬─────────────────────────────────────┘  │
//! │                               │                                         │
//! │  ┌────────────────────────────▼─────────────────────────────────────┐  │
//! │  │  crypto — primitives                                             │  │
//! │  │  cipher (AES-256-GCM) · wrap (X25519+HKDF) · signing             │  │
//! │  │  (SHA-256/Ed25519) · codec (base64) · keys · RandomSource        │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Hierarchy
//!
//! - [`error`] - Error types for the entire library
//! - [`crypto`] - Cryptographic primitives (keys, cipher, wrapping, signing)
//! - [`envelope`] - Envelope construction and opening
//! - [`service`] - The command-dispatched boundary for embedding applications
//!
//! ## Security Model
//!
//! | Property        | Mechanism                                            |
//! |-----------------|------------------------------------------------------|
//! | Confidentiality | AES-256-GCM under a fresh per-envelope key           |
//! | Key distribution| X25519 ephemeral ECDH + HKDF-SHA256 key wrapping     |
//! | Integrity       | AEAD tag plus SHA-256 digest of the cleartext        |
//! | Authenticity    | Ed25519 signature over the digest                    |
//!
//! The library is transport-free and storage-free: it is called once per
//! request and returns once per call. Identity provisioning, request
//! correlation, and persistence belong to the embedding application.
//!
//! ## Example
//!
//! ```
//! use envelope_core::{build, open, KeyPair, RandomSource};
//!
//! let rng = RandomSource::new();
//! let sender = KeyPair::generate(&rng);
//! let recipient = KeyPair::generate(&rng);
//!
//! let envelope = build(
//!     b"hello world",
//!     &recipient.public_keys().encryption,
//!     &sender.signing,
//!     &rng,
//! ).unwrap();
//!
//! let opened = open(
//!     &envelope,
//!     &recipient.encryption,
//!     &sender.public_keys().signing,
//! ).unwrap();
//!
//! assert_eq!(opened.cleartext, b"hello world");
//! assert!(opened.is_authentic());
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod crypto;
pub mod envelope;
pub mod error;
pub mod service;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use crypto::{KeyPair, PublicKey, RandomSource, SymmetricKey};
pub use envelope::{build, open, Envelope, OpenedEnvelope};
pub use error::{Error, Result};
pub use service::CryptoService;

/// Returns the version of the envelope core
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
