//! Handlers for the standalone signing commands: `sign` digests and signs a
//! cleartext, `verify` checks a digest/signature pair against a sender key.
//!
//! These are the builder's digest-and-sign and the opener's verify stages
//! exposed on their own, for callers that want authenticity without
//! confidentiality.

use serde_json::{json, Value};

use crate::crypto::{codec, signing, PublicKey, DIGEST_SIZE};
use crate::envelope::MAX_CLEARTEXT_LEN;
use crate::error::{Error, Result};

use super::dispatcher::{enrich, require_str};
use super::CryptoService;

/// `sign`: consume `{cleartext}`, produce `{digest, signature}`
pub(super) fn sign(service: &CryptoService, request: &Value) -> Result<Value> {
    let cleartext = require_str(request, "cleartext")?;
    if cleartext.len() > MAX_CLEARTEXT_LEN {
        return Err(Error::BufferOverflow {
            actual: cleartext.len(),
            limit: MAX_CLEARTEXT_LEN,
        });
    }

    let digest = signing::digest(cleartext.as_bytes());
    let signature = signing::sign(&service.identity().signing, &digest);

    enrich(
        request,
        json!({
            "digest": codec::encode(&digest),
            "signature": codec::encode(signature.as_ref()),
        }),
    )
}

/// `verify`: consume `{digest, signature, senderKey}`, produce
/// `{isAuthentic}`
///
/// A signature that does not match is data (`isAuthentic: false`), not an
/// error; only malformed encodings fail the request.
pub(super) fn verify(request: &Value) -> Result<Value> {
    let sender = PublicKey::from_hex(require_str(request, "senderKey")?)?;
    let digest_bytes = codec::decode(require_str(request, "digest")?)?;
    let signature_bytes = codec::decode(require_str(request, "signature")?)?;

    let is_authentic = match <[u8; DIGEST_SIZE]>::try_from(digest_bytes.as_slice()) {
        Ok(digest) => signing::verify(&sender.signing, &digest, &signature_bytes),
        Err(_) => false,
    };

    enrich(request, json!({ "isAuthentic": is_authentic }))
}
