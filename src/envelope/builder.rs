//! Envelope construction: cipher → wrap → digest → sign.

use tracing::trace;

use crate::crypto::{cipher, codec, signing, wrap};
use crate::crypto::{RandomSource, SigningKeyPair, SymmetricKey};
use crate::error::{Error, Result};

use super::{Envelope, MAX_CLEARTEXT_LEN};

/// Build an envelope containing `cleartext` for one recipient
///
/// Stages run in fixed order; the first failure aborts the build and the
/// returned error names the stage it occurred in.
///
/// ## Parameters
///
/// - `cleartext`: the message bytes (at most [`MAX_CLEARTEXT_LEN`])
/// - `recipient_public`: the recipient's X25519 public key; only the holder
///   of the matching private key can unwrap the symmetric key
/// - `sender`: the sender's signing keypair; its public half is what
///   receivers verify the envelope against
/// - `rng`: randomness for the symmetric key, cipher nonce, and ephemeral
///   wrap keypair
pub fn build(
    cleartext: &[u8],
    recipient_public: &[u8; 32],
    sender: &SigningKeyPair,
    rng: &RandomSource,
) -> Result<Envelope> {
    if cleartext.len() > MAX_CLEARTEXT_LEN {
        return Err(Error::BufferOverflow {
            actual: cleartext.len(),
            limit: MAX_CLEARTEXT_LEN,
        }
        .at_stage("bounds-check"));
    }

    // Fresh key per envelope; never reused, never supplied by the caller.
    let symmetric_key = SymmetricKey::generate(rng);
    trace!(len = cleartext.len(), "building envelope");

    let ciphertext = cipher::encrypt(&symmetric_key, cleartext, rng)
        .map_err(|e| e.at_stage("encrypt"))?;
    trace!(len = ciphertext.len(), "cleartext encrypted");

    let wrapped_key = wrap::wrap(&symmetric_key, recipient_public, rng)
        .map_err(|e| e.at_stage("wrap-key"))?;
    trace!("symmetric key wrapped for recipient");

    // Digest and signature cover the original cleartext, not the ciphertext.
    let digest = signing::digest(cleartext);
    let signature = signing::sign(sender, &digest);
    trace!("digest signed");

    Ok(Envelope {
        ciphertext: codec::encode(&ciphertext),
        encrypted_symmetric_key: codec::encode(&wrapped_key),
        digest: codec::encode(&digest),
        signature: codec::encode(signature.as_ref()),
    })
}

// ============================================================================
// TESTS
// ============================================================================
