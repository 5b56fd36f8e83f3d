//! # Service Boundary
//!
//! The command-dispatched entry point consumed by the embedding application.
//!
//! ## Protocol
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        REQUEST / RESPONSE FLOW                          │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Request (JSON object, one per call):                                  │
//! │    { "command": "encrypt" | "decrypt" | "sign" | "verify"              │
//! │                | "helloWorld",                                         │
//! │      ...named string fields... }                                       │
//! │                                                                         │
//! │  Response: the request object enriched with the operation's outputs   │
//! │    encrypt → ciphertext, encryptedSymmetricKey, digest, signature      │
//! │    decrypt → cleartext, isAuthentic                                    │
//! │    sign    → digest, signature                                         │
//! │    verify  → isAuthentic                                               │
//! │                                                                         │
//! │  Error response: { "errorKind": "...", "message": "..." }              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Fields the service does not recognize ride through to the response
//! untouched, so callers can attach correlation ids to match asynchronous
//! replies to requests.
//!
//! Each request is processed synchronously and completes before the response
//! is produced. The service never initiates transport and holds no state
//! between requests beyond its identity and the random source.

mod dispatch_envelope;
mod dispatch_signing;
mod dispatcher;

use serde_json::{json, Value};
use tracing::{debug, info};

use crate::crypto::{KeyPair, PublicKey, RandomSource};
use crate::error::{Error, Result};

/// The envelope service: one identity plus a random source
///
/// Construct once with the identity supplied by the embedding application's
/// key-management layer, then feed it boundary messages via
/// [`CryptoService::handle_message`]. The service is `Send + Sync`; the only
/// shared mutable state is the mutex-guarded random source.
pub struct CryptoService {
    identity: KeyPair,
    rng: RandomSource,
}

impl CryptoService {
    /// Create a service around the given identity
    pub fn new(identity: KeyPair) -> Self {
        info!(version = env!("CARGO_PKG_VERSION"), "envelope service created");
        Self {
            identity,
            rng: RandomSource::new(),
        }
    }

    /// Create a service with an explicit random source
    ///
    /// Lets the embedding application share one `RandomSource` across
    /// components, or seed it deterministically in tests.
    pub fn with_rng(identity: KeyPair, rng: RandomSource) -> Self {
        Self { identity, rng }
    }

    /// The shareable public halves of this service's identity
    pub fn public_keys(&self) -> PublicKey {
        self.identity.public_keys()
    }

    /// Handle one boundary message, returning one response
    ///
    /// `message` is a JSON object with a `command` field. The return value
    /// is always a serialized JSON object: the enriched request on success,
    /// `{errorKind, message}` on failure. This function never panics on any
    /// input.
    pub fn handle_message(&self, message: &str) -> String {
        match self.try_handle(message) {
            Ok(response) => response.to_string(),
            Err(err) => {
                debug!(kind = err.kind(), "request failed: {}", err);
                json!({
                    "errorKind": err.kind(),
                    "message": err.to_string(),
                })
                .to_string()
            }
        }
    }

    fn try_handle(&self, message: &str) -> Result<Value> {
        let request: Value = serde_json::from_str(message)?;
        if !request.is_object() {
            return Err(Error::Parse("request must be a JSON object".into()));
        }

        let command = dispatcher::require_str(&request, "command")?;
        debug!(command, "dispatching request");
        dispatcher::dispatch(self, command, &request)
    }

    pub(crate) fn identity(&self) -> &KeyPair {
        &self.identity
    }

    pub(crate) fn rng(&self) -> &RandomSource {
        &self.rng
    }
}

// ============================================================================
// TESTS
// ============================================================================
