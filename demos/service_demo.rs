//! # Service Demo
//!
//! Demonstrates the command boundary the embedding application talks to:
//! JSON in, JSON out, one response per request.
//!
//! ## Run
//!
//! ```bash
//! cargo run --example service_demo
//! ```

use envelope_core::{CryptoService, KeyPair, RandomSource};
use serde_json::json;

fn main() {
    println!("=== Envelope Core: Service Boundary Demo ===\n");

    let rng = RandomSource::new();
    let alice = CryptoService::new(KeyPair::generate(&rng));
    let bob = CryptoService::new(KeyPair::generate(&rng));

    // helloWorld: integration smoke test, echoes the request
    println!("> helloWorld");
    let response = alice.handle_message(r#"{"command":"helloWorld","callback":"callback1"}"#);
    println!("< {}\n", response);

    // encrypt: Alice seals "hello world" for Bob
    println!("> encrypt (Alice → Bob)");
    let request = json!({
        "command": "encrypt",
        "cleartext": "hello world",
        "recipientKey": bob.public_keys().to_hex(),
        "callback": "callback2",
    });
    let sealed: serde_json::Value =
        serde_json::from_str(&alice.handle_message(&request.to_string())).expect("valid JSON");
    println!("< ciphertext = {}...\n", &sealed["ciphertext"].as_str().unwrap()[..24]);

    // decrypt: Bob opens it, verifying against Alice's public key
    println!("> decrypt (Bob, verifying Alice)");
    let request = json!({
        "command": "decrypt",
        "ciphertext": sealed["ciphertext"],
        "encryptedSymmetricKey": sealed["encryptedSymmetricKey"],
        "digest": sealed["digest"],
        "signature": sealed["signature"],
        "senderKey": alice.public_keys().to_hex(),
        "callback": "callback3",
    });
    let opened: serde_json::Value =
        serde_json::from_str(&bob.handle_message(&request.to_string())).expect("valid JSON");
    println!(
        "< cleartext = {:?}, isAuthentic = {}\n",
        opened["cleartext"].as_str().unwrap(),
        opened["isAuthentic"]
    );

    // verify with the wrong sender key: data, not an error
    println!("> verify (against Bob's key instead of Alice's)");
    let request = json!({
        "command": "verify",
        "digest": sealed["digest"],
        "signature": sealed["signature"],
        "senderKey": bob.public_keys().to_hex(),
    });
    println!("< {}\n", bob.handle_message(&request.to_string()));

    // An unknown command produces a tagged error object
    println!("> selfDestruct");
    println!("< {}", alice.handle_message(r#"{"command":"selfDestruct"}"#));

    println!("\n=== Demo complete ===");
}
