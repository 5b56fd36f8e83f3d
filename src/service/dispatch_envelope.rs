//! Handlers for the envelope commands: `encrypt` builds an envelope for a
//! recipient, `decrypt` opens one and reports its authenticity verdict.

use serde_json::{json, Value};

use crate::crypto::PublicKey;
use crate::envelope::{self, Envelope};
use crate::error::{Error, Result};

use super::dispatcher::{enrich, require_str};
use super::CryptoService;

/// `encrypt`: consume `{cleartext, recipientKey}`, produce the four
/// envelope fields
///
/// The symmetric key is wrapped for `recipientKey`'s encryption half; the
/// digest is signed with the service identity's private signing key.
pub(super) fn encrypt(service: &CryptoService, request: &Value) -> Result<Value> {
    let cleartext = require_str(request, "cleartext")?;
    let recipient = PublicKey::from_hex(require_str(request, "recipientKey")?)?;

    let envelope = envelope::build(
        cleartext.as_bytes(),
        &recipient.encryption,
        &service.identity().signing,
        service.rng(),
    )?;

    enrich(request, serde_json::to_value(&envelope)?)
}

/// `decrypt`: consume the four envelope fields plus `senderKey`, produce
/// `{cleartext, isAuthentic}`
///
/// The wrapped key is opened with the service identity's private encryption
/// key; the signature is checked against `senderKey`'s signing half. An
/// inauthentic envelope still returns its cleartext: `isAuthentic` carries
/// the verdict and the caller decides policy.
pub(super) fn decrypt(service: &CryptoService, request: &Value) -> Result<Value> {
    let envelope: Envelope = serde_json::from_value(request.clone())?;
    let sender = PublicKey::from_hex(require_str(request, "senderKey")?)?;

    let opened = envelope::open(&envelope, &service.identity().encryption, &sender.signing)?;

    let is_authentic = opened.is_authentic();
    let cleartext = String::from_utf8(opened.cleartext)
        .map_err(|_| Error::Parse("decrypted cleartext is not valid UTF-8".into()))?;

    enrich(
        request,
        json!({
            "cleartext": cleartext,
            "isAuthentic": is_authentic,
        }),
    )
}
