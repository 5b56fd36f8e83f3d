//! # Envelope Demo
//!
//! Demonstrates sealing and opening an envelope between two parties.
//!
//! ## Run
//!
//! ```bash
//! cargo run --example envelope_demo
//! ```

use envelope_core::crypto::codec;
use envelope_core::{build, open, KeyPair, RandomSource};

fn main() {
    println!("=== Envelope Core: Seal & Open Demo ===\n");

    // Step 1: Create two parties (Alice sends, Bob receives)
    println!("Step 1: Creating keypairs for Alice and Bob...");

    let rng = RandomSource::new();
    let alice = KeyPair::generate(&rng);
    let bob = KeyPair::generate(&rng);

    println!(
        "  Alice's public signing key:    {}...",
        hex::encode(&alice.public_keys().signing[..8])
    );
    println!(
        "  Bob's public encryption key:   {}...",
        hex::encode(&bob.public_keys().encryption[..8])
    );
    println!();

    // Step 2: Alice seals an envelope for Bob
    println!("Step 2: Alice seals an envelope for Bob...");
    let message = b"hello world";

    let envelope = build(
        message,
        &bob.public_keys().encryption,
        &alice.signing,
        &rng,
    )
    .expect("Failed to build envelope");

    println!("  ciphertext:            {}...", &envelope.ciphertext[..24]);
    println!("  encryptedSymmetricKey: {}...", &envelope.encrypted_symmetric_key[..24]);
    println!("  digest:                {}", envelope.digest);
    println!("  signature:             {}...", &envelope.signature[..24]);
    println!();

    // Step 3: Bob opens it and checks the verdict
    println!("Step 3: Bob opens the envelope...");

    let opened = open(&envelope, &bob.encryption, &alice.public_keys().signing)
        .expect("Failed to open envelope");

    println!(
        "  cleartext:   {:?}",
        String::from_utf8_lossy(&opened.cleartext)
    );
    println!("  digest ok:   {}", opened.digest_ok);
    println!("  signature ok: {}", opened.signature_ok);
    println!("  authentic:   {}", opened.is_authentic());
    println!();

    // Step 4: Tamper with the signature and watch the verdict flip
    println!("Step 4: Tampering with the signature...");

    let mut signature = codec::decode(&envelope.signature).expect("decode signature");
    signature[0] ^= 0x01;
    let mut tampered = envelope.clone();
    tampered.signature = codec::encode(&signature);

    let opened = open(&tampered, &bob.encryption, &alice.public_keys().signing)
        .expect("Failed to open tampered envelope");

    println!(
        "  cleartext still recovered: {:?}",
        String::from_utf8_lossy(&opened.cleartext)
    );
    println!("  authentic: {} (caller decides what to do)", opened.is_authentic());
    println!();

    // Step 5: A stranger tries to open Bob's envelope
    println!("Step 5: A stranger tries Bob's envelope with their own key...");

    let stranger = KeyPair::generate(&rng);
    match open(&envelope, &stranger.encryption, &alice.public_keys().signing) {
        Ok(_) => println!("  unexpected success!"),
        Err(err) => println!("  rejected: [{}] {}", err.kind(), err),
    }

    println!("\n=== Demo complete ===");
}
