//! # Cryptography Module
//!
//! All cryptographic primitives used by the envelope core.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     CRYPTOGRAPHIC ARCHITECTURE                          │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌───────────────┐   feeds    ┌─────────────────────────────────────┐  │
//! │  │ RandomSource  │──────────► │ SymmetricKey · nonces · ephemerals  │  │
//! │  │ (one CSPRNG,  │            └─────────────────────────────────────┘  │
//! │  │  mutex-kept)  │                                                     │
//! │  └───────────────┘                                                     │
//! │                                                                         │
//! │  ┌───────────────┐  ┌───────────────┐  ┌─────────────────────────────┐ │
//! │  │ cipher        │  │ wrap          │  │ signing                     │ │
//! │  │               │  │               │  │                             │ │
//! │  │ AES-256-GCM   │  │ X25519 ECDH   │  │ SHA-256 digest              │ │
//! │  │ bulk payload  │  │ + HKDF-SHA256 │  │ Ed25519 sign/verify         │ │
//! │  │ encryption    │  │ + AES-256-GCM │  │ over the digest             │ │
//! │  └───────────────┘  └───────────────┘  └─────────────────────────────┘ │
//! │                                                                         │
//! │  ┌───────────────┐                                                     │
//! │  │ codec         │  base64 text encoding for every binary field that  │
//! │  │               │  crosses the text-only boundary                    │
//! │  └───────────────┘                                                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Algorithm Choices
//!
//! | Algorithm    | Purpose        | Why Chosen                            |
//! |--------------|----------------|---------------------------------------|
//! | AES-256-GCM  | Bulk cipher    | Authenticated, hardware accelerated   |
//! | X25519       | Key wrapping   | Fast ECDH, small keys                 |
//! | Ed25519      | Signatures     | Deterministic, widely audited         |
//! | SHA-256      | Digests        | Standard collision-resistant hash     |
//! | HKDF-SHA256  | Key derivation | Well-analyzed extract-and-expand      |
//!
//! ## Security Considerations
//!
//! 1. **Key zeroization**: secret key material is zeroized when dropped
//! 2. **Explicit randomness**: every randomized operation takes a
//!    [`RandomSource`] by reference; there is no ambient global RNG
//! 3. **No key reuse**: fresh symmetric key, nonce, and ephemeral keypair
//!    per envelope

pub mod cipher;
pub mod codec;
mod keys;
mod rng;
pub mod signing;
pub mod wrap;

pub use keys::{
    EncryptionKeyPair, KeyPair, PublicKey, SigningKeyPair, SymmetricKey, PUBLIC_KEY_SIZE,
    SYMMETRIC_KEY_SIZE,
};
pub use rng::RandomSource;
pub use signing::{Signature, DIGEST_SIZE, SIGNATURE_SIZE};
pub use wrap::WRAPPED_KEY_SIZE;
