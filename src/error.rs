//! # Error Handling
//!
//! This module provides the error types for the envelope core.
//!
//! Every failure that can cross the service boundary carries one of a fixed
//! set of kinds, reported to the embedding application as the `errorKind`
//! field of an error response:
//!
//! | Kind                  | Meaning                                            |
//! |-----------------------|----------------------------------------------------|
//! | `ParseError`          | Malformed request payload or unknown command       |
//! | `KeySetupError`       | Key length/parameters invalid for the cipher       |
//! | `KeyUnwrapError`      | Wrapped key unrecoverable with the given key       |
//! | `IntegrityFailure`    | Ciphertext or plaintext failed integrity checks    |
//! | `AuthenticityFailure` | Signature does not verify                          |
//! | `CodecError`          | Malformed text encoding                            |
//! | `BufferOverflowError` | Input exceeds a declared bound                     |
//!
//! Orchestration failures inside the envelope builder/opener are wrapped with
//! the name of the failing stage; the wrapper keeps the underlying kind so
//! the boundary contract is unchanged.

use thiserror::Error;

/// Result type alias for envelope core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the envelope core
///
/// Variants map one-to-one onto the boundary error kinds; see the module
/// documentation for the table.
#[derive(Error, Debug)]
pub enum Error {
    /// Request payload is malformed or names an unknown command
    #[error("malformed request: {0}")]
    Parse(String),

    /// Key material has the wrong length or parameters for the cipher
    #[error("cipher key setup failed: {0}")]
    KeySetup(String),

    /// The wrapped symmetric key cannot be recovered
    ///
    /// Raised when the private key does not correspond to the public key the
    /// symmetric key was wrapped for, or when the wrapped blob is truncated
    /// or corrupt. Never silently yields garbage key bytes.
    #[error("wrapped key cannot be recovered: {0}")]
    KeyUnwrap(String),

    /// The ciphertext failed authenticated decryption
    #[error("ciphertext failed integrity verification")]
    Integrity,

    /// A signature did not verify against the digest and public key
    #[error("signature verification failed")]
    Authenticity,

    /// Text-encoded input could not be decoded
    #[error("malformed text encoding: {0}")]
    Codec(String),

    /// An input exceeded a declared size bound
    #[error("input of {actual} bytes exceeds the {limit}-byte bound")]
    BufferOverflow {
        /// Observed input length in bytes
        actual: usize,
        /// The declared bound that was exceeded
        limit: usize,
    },

    /// A builder/opener stage failed; wraps the stage-local error
    #[error("{stage} stage failed: {source}")]
    Stage {
        /// Name of the orchestration stage that failed
        stage: &'static str,
        /// The underlying failure
        source: Box<Error>,
    },
}

impl Error {
    /// The stable `errorKind` string reported across the service boundary
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Parse(_) => "ParseError",
            Error::KeySetup(_) => "KeySetupError",
            Error::KeyUnwrap(_) => "KeyUnwrapError",
            Error::Integrity => "IntegrityFailure",
            Error::Authenticity => "AuthenticityFailure",
            Error::Codec(_) => "CodecError",
            Error::BufferOverflow { .. } => "BufferOverflowError",
            Error::Stage { source, .. } => source.kind(),
        }
    }

    /// Tag this error with the orchestration stage it occurred in
    ///
    /// Already-tagged errors pass through unchanged so nested orchestrations
    /// report the innermost stage.
    pub(crate) fn at_stage(self, stage: &'static str) -> Self {
        match self {
            tagged @ Error::Stage { .. } => tagged,
            other => Error::Stage {
                stage,
                source: Box::new(other),
            },
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Parse(err.to_string())
    }
}

// ============================================================================
// TESTS
// ============================================================================
