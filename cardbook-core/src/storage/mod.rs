// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Persistent Storage Module
//!
//! SQLite-backed store for validated contact records. Creation runs the
//! full validation pipeline before any row is written; card numbers reach
//! the database only in encrypted form.

mod contacts;
mod error;
pub mod migration;

pub use error::StorageError;

use std::path::Path;

use rusqlite::Connection;
use tracing::info;

use crate::crypto::EncryptionService;

/// SQLite-based contact storage.
///
/// Owns the card encryption service; every creation call shares the same
/// process-wide key.
pub struct Storage {
    conn: Connection,
    /// Card encryption service used by record creation
    pub(crate) crypto: EncryptionService,
}

impl Storage {
    /// Opens or creates a storage database at the given path.
    pub fn open<P: AsRef<Path>>(path: P, crypto: EncryptionService) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        let storage = Storage { conn, crypto };
        storage.run_migrations()?;
        info!("contact storage opened at schema v{}", storage.schema_version()?);
        Ok(storage)
    }

    /// Creates an in-memory storage (for testing).
    pub fn in_memory(crypto: EncryptionService) -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let storage = Storage { conn, crypto };
        storage.run_migrations()?;
        Ok(storage)
    }

    /// Runs all pending schema migrations.
    fn run_migrations(&self) -> Result<(), StorageError> {
        let migrations = migration::all_migrations();
        migration::MigrationRunner::run(&self.conn, &migrations)
    }

    /// Returns the current schema version.
    pub fn schema_version(&self) -> Result<u32, StorageError> {
        migration::MigrationRunner::current_version(&self.conn)
    }

    /// Returns the card encryption service, for masked card projections of
    /// loaded records.
    pub fn crypto(&self) -> &EncryptionService {
        &self.crypto
    }
}
