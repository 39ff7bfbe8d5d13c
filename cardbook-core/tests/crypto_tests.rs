//! Tests for card encryption (crypto)
//!
//! Covers:
//! - Encrypt/decrypt round trips, including the property-based law
//! - Nonce freshness (same plaintext, different ciphertexts)
//! - Failure modes: wrong key, tampering, truncation
//! - Key loading through providers

mod common;

use cardbook_core::{
    DecryptionError, EncryptionService, FileKeyProvider, KeyProvider, SymmetricKey,
};
use common::strategies::plaintext_strategy;
use common::test_service;
use proptest::prelude::*;

// === Round Trip Tests ===

#[test]
fn test_encrypt_decrypt_round_trip() {
    let service = test_service();
    let ciphertext = service.encrypt("4111111111111111").unwrap();
    assert_eq!(service.decrypt(&ciphertext).unwrap(), "4111111111111111");
}

#[test]
fn test_round_trip_empty_string() {
    let service = test_service();
    let ciphertext = service.encrypt("").unwrap();
    assert_eq!(service.decrypt(&ciphertext).unwrap(), "");
}

#[test]
fn test_round_trip_non_ascii() {
    let service = test_service();
    let ciphertext = service.encrypt("str. Ărțarului 7, București").unwrap();
    assert_eq!(
        service.decrypt(&ciphertext).unwrap(),
        "str. Ărțarului 7, București"
    );
}

#[test]
fn test_ciphertext_hides_plaintext() {
    let service = test_service();
    let plaintext = "4111111111111111";
    let ciphertext = service.encrypt(plaintext).unwrap();

    // nonce (24) + body + tag (16)
    assert_eq!(ciphertext.len(), 24 + plaintext.len() + 16);
    let window_found = ciphertext
        .windows(plaintext.len())
        .any(|w| w == plaintext.as_bytes());
    assert!(!window_found);
}

#[test]
fn test_same_plaintext_different_ciphertexts() {
    let service = test_service();
    let first = service.encrypt("4111111111111111").unwrap();
    let second = service.encrypt("4111111111111111").unwrap();
    assert_ne!(first, second);
}

// === Failure Mode Tests ===

#[test]
fn test_decrypt_with_wrong_key_fails() {
    let service = test_service();
    let other = test_service();

    let ciphertext = service.encrypt("4111111111111111").unwrap();
    let result = other.decrypt(&ciphertext);
    assert!(matches!(result, Err(DecryptionError::DecryptionFailed)));
}

#[test]
fn test_decrypt_tampered_ciphertext_fails() {
    let service = test_service();
    let mut ciphertext = service.encrypt("4111111111111111").unwrap();

    let last = ciphertext.len() - 1;
    ciphertext[last] ^= 0x01;
    let result = service.decrypt(&ciphertext);
    assert!(matches!(result, Err(DecryptionError::DecryptionFailed)));
}

#[test]
fn test_decrypt_tampered_nonce_fails() {
    let service = test_service();
    let mut ciphertext = service.encrypt("4111111111111111").unwrap();

    ciphertext[0] ^= 0x01;
    let result = service.decrypt(&ciphertext);
    assert!(matches!(result, Err(DecryptionError::DecryptionFailed)));
}

#[test]
fn test_decrypt_truncated_ciphertext_fails() {
    let service = test_service();

    for len in [0, 1, 24, 39] {
        let result = service.decrypt(&vec![0u8; len]);
        assert!(
            matches!(result, Err(DecryptionError::CiphertextTooShort)),
            "length {} should be too short",
            len
        );
    }
}

// === Key Material Tests ===

#[test]
fn test_symmetric_key_debug_is_redacted() {
    let key = SymmetricKey::from_bytes([0xAB; 32]);
    let debug = format!("{:?}", key);
    assert!(debug.contains("REDACTED"));
    assert!(!debug.contains("171")); // 0xAB
    assert!(!debug.to_lowercase().contains("ab, ab"));
}

#[test]
fn test_generated_keys_are_distinct() {
    let first = SymmetricKey::generate();
    let second = SymmetricKey::generate();
    assert_ne!(first.as_bytes(), second.as_bytes());
}

#[test]
fn test_service_from_file_provider() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let provider = FileKeyProvider::new(temp_dir.path().join("card.key"));

    let key = SymmetricKey::generate();
    provider.save_key(&key).unwrap();

    // Two services from the same provider share the key material
    let service = EncryptionService::from_provider(&provider).unwrap();
    let ciphertext = service.encrypt("4111111111111111").unwrap();

    let reloaded = EncryptionService::from_provider(&provider).unwrap();
    assert_eq!(reloaded.decrypt(&ciphertext).unwrap(), "4111111111111111");
}

#[test]
fn test_provider_key_round_trips_exactly() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let provider = FileKeyProvider::new(temp_dir.path().join("card.key"));

    let key = SymmetricKey::from_bytes([0x42; 32]);
    provider.save_key(&key).unwrap();
    assert_eq!(provider.load_key().unwrap().as_bytes(), &[0x42; 32]);
}

// === Property Tests ===

proptest! {
    #[test]
    fn prop_decrypt_inverts_encrypt(plaintext in plaintext_strategy()) {
        let service = test_service();
        let ciphertext = service.encrypt(&plaintext).unwrap();
        prop_assert_eq!(service.decrypt(&ciphertext).unwrap(), plaintext);
    }
}
