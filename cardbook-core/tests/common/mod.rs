// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Common Test Utilities
//!
//! Shared fixtures and helpers used across test modules. Each test binary
//! pulls in the subset it needs.

#![allow(dead_code)]

pub mod strategies;

use cardbook_core::{
    ContactDraft, EmailDirectory, EncryptionService, Storage, StorageError, SymmetricKey,
};

/// A draft that passes every validator (Visa test number).
pub fn valid_draft() -> ContactDraft {
    ContactDraft {
        name: "Ana-Maria".to_string(),
        date_of_birth: "1990-05-21".to_string(),
        phone: "(+40) 721-234-56-78".to_string(),
        address: "12 Lipscani St, Bucharest".to_string(),
        email: "ana.maria@example.com".to_string(),
        card_number: "4111111111111111".to_string(),
        owner_user_id: "user-1".to_string(),
        owner_file_id: "file-1".to_string(),
    }
}

/// Fresh encryption service with a random key.
pub fn test_service() -> EncryptionService {
    EncryptionService::new(SymmetricKey::generate())
}

/// In-memory storage with a random key.
pub fn test_storage() -> Storage {
    Storage::in_memory(test_service()).expect("in-memory storage should open")
}

/// Directory with a fixed set of taken (owner, email) pairs.
pub struct MockDirectory {
    taken: Vec<(String, String)>,
}

impl MockDirectory {
    pub fn empty() -> Self {
        MockDirectory { taken: Vec::new() }
    }

    pub fn with_taken(owner: &str, email: &str) -> Self {
        MockDirectory {
            taken: vec![(owner.to_string(), email.to_string())],
        }
    }
}

impl EmailDirectory for MockDirectory {
    fn email_taken(&self, owner_user_id: &str, email: &str) -> Result<bool, StorageError> {
        Ok(self
            .taken
            .iter()
            .any(|(owner, email_)| owner == owner_user_id && email_ == email))
    }
}

/// Directory that fails every probe.
pub struct FailingDirectory;

impl EmailDirectory for FailingDirectory {
    fn email_taken(&self, _owner_user_id: &str, _email: &str) -> Result<bool, StorageError> {
        Err(StorageError::InvalidData("directory unavailable".to_string()))
    }
}
