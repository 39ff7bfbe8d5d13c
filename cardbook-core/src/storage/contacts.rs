// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Contact storage operations.

use chrono::NaiveDate;
use rusqlite::params;
use tracing::debug;

use super::{Storage, StorageError};
use crate::card::CardBrand;
use crate::contact::{validate_then_prepare, Contact, ContactDraft, CreateError, EmailDirectory};
use crate::validation::{ContactField, ValidationError, ValidationErrors};

/// Internal struct for database row data.
pub(super) struct ContactRow {
    pub id: String,
    pub name: String,
    pub date_of_birth: String,
    pub phone: String,
    pub address: String,
    pub email: String,
    pub card_ciphertext: Vec<u8>,
    pub brand: String,
    pub owner_user_id: String,
    pub owner_file_id: String,
    pub created_at: i64,
}

impl Storage {
    // === Contact Operations ===

    /// Validates a draft and persists the resulting record.
    ///
    /// The storage itself answers the email uniqueness probe. If two
    /// creations race past the probe with the same owner and email, the
    /// schema's UNIQUE constraint rejects the second insert and it surfaces
    /// as the same uniqueness rejection the probe would have produced.
    pub fn create_contact(&self, draft: &ContactDraft) -> Result<Contact, CreateError> {
        let contact = validate_then_prepare(draft, self, &self.crypto)?;
        self.insert_contact(&contact)?;
        debug!("contact {} persisted", contact.id());
        Ok(contact)
    }

    fn insert_contact(&self, contact: &Contact) -> Result<(), CreateError> {
        let result = self.conn.execute(
            "INSERT INTO contacts
             (id, name, date_of_birth, phone, address, email, card_ciphertext,
              brand, owner_user_id, owner_file_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                contact.id(),
                contact.name(),
                contact.date_of_birth().to_string(),
                contact.phone(),
                contact.address(),
                contact.email(),
                contact.card_ciphertext(),
                contact.brand().name(),
                contact.owner_user_id(),
                contact.owner_file_id(),
                contact.created_at() as i64,
            ],
        );

        match result {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                // Lost race on (owner_user_id, email)
                let mut errors = ValidationErrors::new();
                errors.add(ValidationError::Uniqueness {
                    field: ContactField::Email,
                });
                Err(CreateError::Rejected(errors))
            }
            Err(e) => Err(CreateError::Storage(StorageError::Database(e))),
        }
    }

    /// Loads a contact by ID.
    pub fn load_contact(&self, id: &str) -> Result<Option<Contact>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, date_of_birth, phone, address, email, card_ciphertext,
                    brand, owner_user_id, owner_file_id, created_at
             FROM contacts WHERE id = ?1",
        )?;

        let result = stmt.query_row(params![id], read_row);

        match result {
            Ok(row) => Ok(Some(row_to_contact(row)?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(StorageError::Database(e)),
        }
    }

    /// Lists all contacts belonging to an owner, newest first.
    pub fn list_contacts(&self, owner_user_id: &str) -> Result<Vec<Contact>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, date_of_birth, phone, address, email, card_ciphertext,
                    brand, owner_user_id, owner_file_id, created_at
             FROM contacts WHERE owner_user_id = ?1
             ORDER BY created_at DESC, id",
        )?;

        let rows = stmt.query_map(params![owner_user_id], read_row)?;

        let mut contacts = Vec::new();
        for row_result in rows {
            let row = row_result?;
            contacts.push(row_to_contact(row)?);
        }

        Ok(contacts)
    }
}

impl EmailDirectory for Storage {
    fn email_taken(&self, owner_user_id: &str, email: &str) -> Result<bool, StorageError> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM contacts WHERE owner_user_id = ?1 AND email = ?2",
            params![owner_user_id, email],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}

/// Maps one result row into a `ContactRow`.
fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ContactRow> {
    Ok(ContactRow {
        id: row.get(0)?,
        name: row.get(1)?,
        date_of_birth: row.get(2)?,
        phone: row.get(3)?,
        address: row.get(4)?,
        email: row.get(5)?,
        card_ciphertext: row.get(6)?,
        brand: row.get(7)?,
        owner_user_id: row.get(8)?,
        owner_file_id: row.get(9)?,
        created_at: row.get(10)?,
    })
}

/// Converts a database row to a Contact. The card ciphertext stays
/// encrypted; loading never touches the encryption key.
fn row_to_contact(row: ContactRow) -> Result<Contact, StorageError> {
    let date_of_birth = NaiveDate::parse_from_str(&row.date_of_birth, "%Y-%m-%d")
        .map_err(|e| StorageError::InvalidData(format!("bad date_of_birth: {}", e)))?;

    Ok(Contact::from_stored(
        row.id,
        row.name,
        date_of_birth,
        row.phone,
        row.address,
        row.email,
        row.card_ciphertext,
        CardBrand::from_name(&row.brand),
        row.owner_user_id,
        row.owner_file_id,
        row.created_at as u64,
    ))
}
