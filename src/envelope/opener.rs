//! Envelope opening: decode → unwrap → decrypt → digest check → verify.

use tracing::trace;

use crate::crypto::{cipher, codec, signing, wrap};
use crate::crypto::{EncryptionKeyPair, DIGEST_SIZE};
use crate::error::{Error, Result};

use super::{Envelope, OpenedEnvelope, MAX_ENCODED_FIELD_LEN};

/// Open an envelope addressed to `recipient`, verifying it against the
/// sender's signing public key
///
/// Hard failures (malformed encoding, unrecoverable key, tampered
/// ciphertext) abort with the stage-tagged error. Once a cleartext is
/// recovered, digest and signature problems are reported as verdict flags on
/// the returned [`OpenedEnvelope`], never by withholding the cleartext.
///
/// All intermediate key material is dropped at the end of the call; nothing
/// is cached across invocations.
pub fn open(
    envelope: &Envelope,
    recipient: &EncryptionKeyPair,
    sender_public: &[u8; 32],
) -> Result<OpenedEnvelope> {
    let ciphertext = decode_field(&envelope.ciphertext).map_err(|e| e.at_stage("decode"))?;
    let wrapped_key =
        decode_field(&envelope.encrypted_symmetric_key).map_err(|e| e.at_stage("decode"))?;
    let digest_bytes = decode_field(&envelope.digest).map_err(|e| e.at_stage("decode"))?;
    let signature_bytes = decode_field(&envelope.signature).map_err(|e| e.at_stage("decode"))?;
    trace!(len = ciphertext.len(), "envelope fields decoded");

    let symmetric_key =
        wrap::unwrap(&wrapped_key, recipient).map_err(|e| e.at_stage("unwrap-key"))?;
    trace!("symmetric key unwrapped");

    let cleartext =
        cipher::decrypt(&symmetric_key, &ciphertext).map_err(|e| e.at_stage("decrypt"))?;
    trace!(len = cleartext.len(), "ciphertext decrypted");

    // The digest travels with the envelope; recompute over what we actually
    // decrypted and compare.
    let recomputed = signing::digest(&cleartext);
    let digest_ok = digest_bytes.as_slice() == recomputed.as_slice();

    // The signature is verified over the TRANSMITTED digest: a forged digest
    // field fails here unless the forger also holds the sender's key.
    let signature_ok = match <[u8; DIGEST_SIZE]>::try_from(digest_bytes.as_slice()) {
        Ok(transmitted) => signing::verify(sender_public, &transmitted, &signature_bytes),
        Err(_) => false,
    };
    trace!(digest_ok, signature_ok, "envelope verdict computed");

    Ok(OpenedEnvelope {
        cleartext,
        digest_ok,
        signature_ok,
    })
}

/// Bounds-check and text-decode one envelope field
fn decode_field(text: &str) -> Result<Vec<u8>> {
    if text.len() > MAX_ENCODED_FIELD_LEN {
        return Err(Error::BufferOverflow {
            actual: text.len(),
            limit: MAX_ENCODED_FIELD_LEN,
        });
    }
    codec::decode(text)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{codec, KeyPair, RandomSource};
    use crate::envelope::build;

    struct Parties {
        rng: RandomSource,
        sender: KeyPair,
        recipient: KeyPair,
    }

    fn parties() -> Parties {
        let rng = RandomSource::new();
        let sender = KeyPair::generate(&rng);
        let recipient = KeyPair::generate(&rng);
        Parties { rng, sender, recipient }
    }

    fn seal(p: &Parties, cleartext: &[u8]) -> Envelope {
        build(
            cleartext,
            &p.recipient.encryption.public_bytes(),
            &p.sender.signing,
            &p.rng,
        )
        .unwrap()
    }

    #[test]
    fn test_round_trip_is_authentic() {
        let p = parties();
        let envelope = seal(&p, b"hello world");

        let opened = open(
            &envelope,
            &p.recipient.encryption,
            &p.sender.signing.public_bytes(),
        )
        .unwrap();

        assert_eq!(opened.cleartext, b"hello world");
        assert!(opened.digest_ok);
        assert!(opened.signature_ok);
        assert!(opened.is_authentic());
    }

    #[test]
    fn test_round_trip_empty_cleartext() {
        let p = parties();
        let envelope = seal(&p, b"");

        let opened = open(
            &envelope,
            &p.recipient.encryption,
            &p.sender.signing.public_bytes(),
        )
        .unwrap();

        assert_eq!(opened.cleartext, b"");
        assert!(opened.is_authentic());
    }

    #[test]
    fn test_wrong_recipient_key_fails_explicitly() {
        let p = parties();
        let envelope = seal(&p, b"hello world");

        let stranger = KeyPair::generate(&p.rng);
        let err = open(
            &envelope,
            &stranger.encryption,
            &p.sender.signing.public_bytes(),
        )
        .unwrap_err();

        assert_eq!(err.kind(), "KeyUnwrapError");
    }

    #[test]
    fn test_tampered_ciphertext_is_integrity_failure() {
        let p = parties();
        let envelope = seal(&p, b"hello world");

        let mut raw = codec::decode(&envelope.ciphertext).unwrap();
        let last = raw.len() - 1;
        raw[last] ^= 0x01;
        let tampered = Envelope {
            ciphertext: codec::encode(&raw),
            ..envelope
        };

        let err = open(
            &tampered,
            &p.recipient.encryption,
            &p.sender.signing.public_bytes(),
        )
        .unwrap_err();
        assert_eq!(err.kind(), "IntegrityFailure");
    }

    #[test]
    fn test_tampered_digest_field_flags_both_checks() {
        let p = parties();
        let envelope = seal(&p, b"hello world");

        let mut digest = codec::decode(&envelope.digest).unwrap();
        digest[0] ^= 0x01;
        let tampered = Envelope {
            digest: codec::encode(&digest),
            ..envelope
        };

        let opened = open(
            &tampered,
            &p.recipient.encryption,
            &p.sender.signing.public_bytes(),
        )
        .unwrap();

        // Cleartext still comes back; the verdict carries the damage.
        assert_eq!(opened.cleartext, b"hello world");
        assert!(!opened.digest_ok);
        assert!(!opened.signature_ok);
        assert!(!opened.is_authentic());
    }

    #[test]
    fn test_tampered_signature_is_inauthentic_but_intact() {
        let p = parties();
        let envelope = seal(&p, b"hello world");

        let mut signature = codec::decode(&envelope.signature).unwrap();
        signature[0] ^= 0x01;
        let tampered = Envelope {
            signature: codec::encode(&signature),
            ..envelope
        };

        let opened = open(
            &tampered,
            &p.recipient.encryption,
            &p.sender.signing.public_bytes(),
        )
        .unwrap();

        assert_eq!(opened.cleartext, b"hello world");
        assert!(opened.digest_ok);
        assert!(!opened.signature_ok);
        assert!(!opened.is_authentic());
    }

    #[test]
    fn test_wrong_sender_key_is_inauthentic() {
        let p = parties();
        let envelope = seal(&p, b"hello world");

        let impostor = KeyPair::generate(&p.rng);
        let opened = open(
            &envelope,
            &p.recipient.encryption,
            &impostor.signing.public_bytes(),
        )
        .unwrap();

        assert_eq!(opened.cleartext, b"hello world");
        assert!(opened.digest_ok);
        assert!(!opened.signature_ok);
    }

    #[test]
    fn test_malformed_encoding_rejected() {
        let p = parties();
        let envelope = seal(&p, b"hello world");

        let broken = Envelope {
            ciphertext: "not base64!!".into(),
            ..envelope
        };

        let err = open(
            &broken,
            &p.recipient.encryption,
            &p.sender.signing.public_bytes(),
        )
        .unwrap_err();
        assert_eq!(err.kind(), "CodecError");
        assert!(err.to_string().contains("decode"));
    }

    #[test]
    fn test_oversized_field_rejected() {
        let p = parties();
        let envelope = seal(&p, b"hello world");

        let oversized = Envelope {
            ciphertext: "A".repeat(MAX_ENCODED_FIELD_LEN + 4),
            ..envelope
        };

        let err = open(
            &oversized,
            &p.recipient.encryption,
            &p.sender.signing.public_bytes(),
        )
        .unwrap_err();
        assert_eq!(err.kind(), "BufferOverflowError");
    }

    #[test]
    fn test_truncated_wrapped_key_fails_explicitly() {
        let p = parties();
        let envelope = seal(&p, b"hello world");

        let raw = codec::decode(&envelope.encrypted_symmetric_key).unwrap();
        let truncated = Envelope {
            encrypted_symmetric_key: codec::encode(&raw[..raw.len() - 4]),
            ..envelope
        };

        let err = open(
            &truncated,
            &p.recipient.encryption,
            &p.sender.signing.public_bytes(),
        )
        .unwrap_err();
        assert_eq!(err.kind(), "KeyUnwrapError");
    }
}
