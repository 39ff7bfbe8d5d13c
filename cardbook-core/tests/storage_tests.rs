// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tests for contact storage
//!
//! Covers:
//! - Schema migration on open
//! - Create / load / list round-trips
//! - The UNIQUE (owner_user_id, email) backstop
//! - Card numbers at rest: ciphertext only, decryptable across reopen

mod common;

use cardbook_core::{
    CardBrand, ContactField, CreateError, DecryptionError, EncryptionService, Storage,
    SymmetricKey,
};
use common::{test_storage, valid_draft};
use tempfile::TempDir;

// === Open / Migration Tests ===

#[test]
fn test_open_creates_database_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("contacts.db");

    let storage = Storage::open(&path, EncryptionService::new(SymmetricKey::generate())).unwrap();
    assert!(path.exists());
    assert_eq!(storage.schema_version().unwrap(), 1);
}

#[test]
fn test_in_memory_storage_is_migrated() {
    let storage = test_storage();
    assert_eq!(storage.schema_version().unwrap(), 1);
}

// === Create / Load Tests ===

#[test]
fn test_create_then_load_round_trips_fields() {
    let storage = test_storage();
    let created = storage.create_contact(&valid_draft()).unwrap();

    let loaded = storage.load_contact(created.id()).unwrap().unwrap();
    assert_eq!(loaded.id(), created.id());
    assert_eq!(loaded.name(), "Ana-Maria");
    assert_eq!(loaded.date_of_birth(), created.date_of_birth());
    assert_eq!(loaded.phone(), created.phone());
    assert_eq!(loaded.address(), created.address());
    assert_eq!(loaded.email(), created.email());
    assert_eq!(loaded.card_ciphertext(), created.card_ciphertext());
    assert_eq!(loaded.brand(), CardBrand::Visa);
    assert_eq!(loaded.owner_user_id(), created.owner_user_id());
    assert_eq!(loaded.owner_file_id(), created.owner_file_id());
    assert_eq!(loaded.created_at(), created.created_at());
}

#[test]
fn test_load_missing_contact_returns_none() {
    let storage = test_storage();
    assert!(storage.load_contact("no-such-id").unwrap().is_none());
}

#[test]
fn test_rejected_draft_leaves_no_row() {
    let storage = test_storage();
    let mut draft = valid_draft();
    draft.card_number = "4111111111111112".to_string();

    let result = storage.create_contact(&draft);
    assert!(matches!(result, Err(CreateError::Rejected(_))));
    assert!(storage.list_contacts("user-1").unwrap().is_empty());
}

#[test]
fn test_list_contacts_filters_by_owner() {
    let storage = test_storage();
    storage.create_contact(&valid_draft()).unwrap();

    let mut other = valid_draft();
    other.owner_user_id = "user-2".to_string();
    other.email = "bela@example.com".to_string();
    storage.create_contact(&other).unwrap();

    let mine = storage.list_contacts("user-1").unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].owner_user_id(), "user-1");

    assert_eq!(storage.list_contacts("user-2").unwrap().len(), 1);
    assert!(storage.list_contacts("user-3").unwrap().is_empty());
}

// === Uniqueness Tests ===

#[test]
fn test_duplicate_email_same_owner_rejected() {
    let storage = test_storage();
    storage.create_contact(&valid_draft()).unwrap();

    let mut duplicate = valid_draft();
    duplicate.name = "Ana".to_string();
    let result = storage.create_contact(&duplicate);

    match result {
        Err(CreateError::Rejected(errors)) => {
            assert!(errors.has_field(ContactField::Email));
            assert_eq!(
                errors.field_messages(),
                vec![("email", "has already been taken")]
            );
        }
        other => panic!("expected uniqueness rejection, got {:?}", other),
    }
    assert_eq!(storage.list_contacts("user-1").unwrap().len(), 1);
}

#[test]
fn test_same_email_different_owner_accepted() {
    let storage = test_storage();
    storage.create_contact(&valid_draft()).unwrap();

    let mut other_owner = valid_draft();
    other_owner.owner_user_id = "user-2".to_string();
    assert!(storage.create_contact(&other_owner).is_ok());
}

// === At-Rest Encryption Tests ===

#[test]
fn test_database_file_never_contains_plaintext_card() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("contacts.db");

    let storage = Storage::open(&path, EncryptionService::new(SymmetricKey::generate())).unwrap();
    let draft = valid_draft();
    storage.create_contact(&draft).unwrap();
    drop(storage);

    let raw = std::fs::read(&path).unwrap();
    let window_found = raw
        .windows(draft.card_number.len())
        .any(|w| w == draft.card_number.as_bytes());
    assert!(!window_found, "plaintext card number found in database file");
}

#[test]
fn test_reopen_with_same_key_decrypts() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("contacts.db");
    let key_bytes = *SymmetricKey::generate().as_bytes();

    let id = {
        let storage = Storage::open(
            &path,
            EncryptionService::new(SymmetricKey::from_bytes(key_bytes)),
        )
        .unwrap();
        storage.create_contact(&valid_draft()).unwrap().id().to_string()
    };

    let reopened = Storage::open(
        &path,
        EncryptionService::new(SymmetricKey::from_bytes(key_bytes)),
    )
    .unwrap();
    let loaded = reopened.load_contact(&id).unwrap().unwrap();
    let masked = loaded.masked_card_number(reopened.crypto()).unwrap();
    assert_eq!(masked, "**********1111");
}

#[test]
fn test_reopen_with_different_key_fails_decryption() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("contacts.db");

    let id = {
        let storage =
            Storage::open(&path, EncryptionService::new(SymmetricKey::generate())).unwrap();
        storage.create_contact(&valid_draft()).unwrap().id().to_string()
    };

    // Loading still works; only the masked projection needs the key
    let reopened =
        Storage::open(&path, EncryptionService::new(SymmetricKey::generate())).unwrap();
    let loaded = reopened.load_contact(&id).unwrap().unwrap();

    let result = loaded.masked_card_number(reopened.crypto());
    assert!(matches!(result, Err(DecryptionError::DecryptionFailed)));
}
