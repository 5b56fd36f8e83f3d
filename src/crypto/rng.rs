//! # Random Source
//!
//! Process-wide cryptographically secure randomness, initialized once and
//! passed by reference into every operation that needs it.
//!
//! ## Design
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        RANDOM SOURCE                                │
//! ├─────────────────────────────────────────────────────────────────────┤
//! │                                                                     │
//! │   OS entropy ──► StdRng (seeded once) ──► Mutex ──► RandomSource   │
//! │                                                                     │
//! │   Consumers (all take &RandomSource):                              │
//! │   • SymmetricKey generation (one fresh key per envelope)           │
//! │   • AES-GCM nonces (one fresh nonce per encryption)                │
//! │   • Ephemeral X25519 keys (one per key wrap)                       │
//! │   • KeyPair generation                                             │
//! │                                                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The generator sits behind a mutex so that concurrent callers are
//! serialized: two draws can never observe the same generator state and so
//! can never produce identical output. There is deliberately no global
//! instance; the embedding application owns the `RandomSource` and threads
//! it through explicitly.

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// A shared, mutex-guarded CSPRNG context
///
/// Construct one per service (or per process) with [`RandomSource::new`] and
/// pass it by reference into key generation, encryption, and key wrapping.
pub struct RandomSource {
    inner: Mutex<StdRng>,
}

impl RandomSource {
    /// Create a random source seeded from operating-system entropy
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Create a random source from a fixed seed
    ///
    /// Deterministic: the same seed replays the same stream. Intended for
    /// tests and reproduction of failures, never for production envelopes.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            inner: Mutex::new(StdRng::from_seed(seed)),
        }
    }

    /// Fill `dest` with random bytes
    pub fn fill_bytes(&self, dest: &mut [u8]) {
        self.inner.lock().fill_bytes(dest);
    }

    /// Run `f` with exclusive access to the underlying generator
    ///
    /// Used internally to drive dalek key generation, which wants a
    /// `RngCore + CryptoRng` value. The lock is held only for the duration
    /// of the closure.
    pub(crate) fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        f(&mut self.inner.lock())
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
