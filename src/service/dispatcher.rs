//! # Command Dispatcher
//!
//! Routes boundary commands to their handlers. The mapping is a plain static
//! match: there is exactly one behavioral variant per command, so no
//! polymorphic dispatch is needed.
//!
//! Handler implementations live in domain sub-modules:
//!   - `dispatch_envelope` — encrypt / decrypt (full envelope orchestration)
//!   - `dispatch_signing`  — sign / verify (standalone signing stages)
//!
//! Handlers take the parsed request object and return it enriched with their
//! outputs; unrecognized request fields (for example a caller-side
//! correlation id) pass through untouched.

use serde_json::Value;

use crate::error::{Error, Result};

use super::{dispatch_envelope, dispatch_signing, CryptoService};

// ============================================================================
// HELPERS  (pub(super) so handler modules can use them)
// ============================================================================

/// Fetch a required string field from the request object
pub(super) fn require_str<'a>(request: &'a Value, field: &str) -> Result<&'a str> {
    request[field]
        .as_str()
        .ok_or_else(|| Error::Parse(format!("missing string field: {}", field)))
}

/// Return the request object with the handler's output fields merged in
pub(super) fn enrich(request: &Value, additions: Value) -> Result<Value> {
    let mut response = request.clone();
    let target = response
        .as_object_mut()
        .ok_or_else(|| Error::Parse("request must be a JSON object".into()))?;
    if let Value::Object(map) = additions {
        for (key, value) in map {
            target.insert(key, value);
        }
    }
    Ok(response)
}

// ============================================================================
// MAIN DISPATCHER
// ============================================================================

pub(super) fn dispatch(service: &CryptoService, command: &str, request: &Value) -> Result<Value> {
    match command {
        // ── Integration smoke test ──────────────────────────────────
        "helloWorld" => Ok(request.clone()),

        // ── Envelope ────────────────────────────────────────────────
        "encrypt" => dispatch_envelope::encrypt(service, request),
        "decrypt" => dispatch_envelope::decrypt(service, request),

        // ── Signing ─────────────────────────────────────────────────
        "sign" => dispatch_signing::sign(service, request),
        "verify" => dispatch_signing::verify(request),

        _ => Err(Error::Parse(format!("unknown command: {}", command))),
    }
}
