//! Contact Module
//!
//! The contact record and its creation pipeline: eager field validation,
//! card brand stamping, and card-number encryption, in that order. A draft
//! either becomes a `Contact` ready for persistence or is rejected with the
//! full set of field failures.

mod masked;

use std::time::{SystemTime, UNIX_EPOCH};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use zeroize::Zeroize;

use crate::card::{self, CardBrand};
use crate::crypto::{EncryptionError, EncryptionService};
use crate::storage::StorageError;
use crate::validation::format;
use crate::validation::{ContactField, ValidationError, ValidationErrors};

/// Errors from the contact creation path.
#[derive(Error, Debug)]
pub enum CreateError {
    /// One or more field validations failed; nothing was encrypted or stored.
    #[error("contact validation failed: {0}")]
    Rejected(#[from] ValidationErrors),
    /// Card encryption failed; nothing was stored.
    #[error("card encryption failed: {0}")]
    Encryption(#[from] EncryptionError),
    /// The backing store failed during the uniqueness probe or the insert.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Read-side collaborator for the email uniqueness rule.
///
/// Backed by the contact store in production. The store's UNIQUE constraint
/// stays authoritative when two creations race on the same owner and email.
pub trait EmailDirectory {
    /// Returns true if a contact of this owner already uses the email.
    fn email_taken(&self, owner_user_id: &str, email: &str) -> Result<bool, StorageError>;
}

/// A contact as supplied by the caller, before validation.
///
/// `card_number` is plaintext here and only here; it never survives into a
/// prepared record.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ContactDraft {
    pub name: String,
    pub date_of_birth: String,
    pub phone: String,
    pub address: String,
    pub email: String,
    pub card_number: String,
    pub owner_user_id: String,
    pub owner_file_id: String,
}

/// A validated contact with its card number encrypted, ready for storage.
#[derive(Clone, Debug)]
pub struct Contact {
    /// Unique identifier (16 random bytes, hex-encoded)
    id: String,
    name: String,
    date_of_birth: NaiveDate,
    phone: String,
    address: String,
    email: String,
    /// Encrypted canonical card digits; the plaintext is gone by the time
    /// this struct exists
    card_ciphertext: Vec<u8>,
    /// Issuing network, stamped from the digits before encryption
    brand: CardBrand,
    owner_user_id: String,
    owner_file_id: String,
    /// Unix timestamp of when the record was prepared
    created_at: u64,
}

impl Contact {
    /// Rebuilds a contact from stored row data.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_stored(
        id: String,
        name: String,
        date_of_birth: NaiveDate,
        phone: String,
        address: String,
        email: String,
        card_ciphertext: Vec<u8>,
        brand: CardBrand,
        owner_user_id: String,
        owner_file_id: String,
        created_at: u64,
    ) -> Self {
        Contact {
            id,
            name,
            date_of_birth,
            phone,
            address,
            email,
            card_ciphertext,
            brand,
            owner_user_id,
            owner_file_id,
            created_at,
        }
    }

    /// Returns the contact's unique identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the contact's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the date of birth.
    pub fn date_of_birth(&self) -> NaiveDate {
        self.date_of_birth
    }

    /// Returns the phone number.
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Returns the address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Returns the email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the encrypted card number.
    pub fn card_ciphertext(&self) -> &[u8] {
        &self.card_ciphertext
    }

    /// Returns the card's issuing network.
    pub fn brand(&self) -> CardBrand {
        self.brand
    }

    /// Returns the id of the owning user.
    pub fn owner_user_id(&self) -> &str {
        &self.owner_user_id
    }

    /// Returns the id of the file this contact was imported from.
    pub fn owner_file_id(&self) -> &str {
        &self.owner_file_id
    }

    /// Returns the Unix timestamp of creation.
    pub fn created_at(&self) -> u64 {
        self.created_at
    }
}

/// Validates a draft and, on success, prepares it for persistence.
///
/// Every validator runs; failures accumulate instead of short-circuiting,
/// so a rejection reports all of them at once. On success the card brand is
/// stamped from the canonical plaintext digits, those same digits are
/// encrypted, and the transient plaintext buffer is zeroized.
///
/// A directory probe failure aborts with `CreateError::Storage`; validation
/// cannot complete without the uniqueness answer.
pub fn validate_then_prepare(
    draft: &ContactDraft,
    directory: &dyn EmailDirectory,
    crypto: &EncryptionService,
) -> Result<Contact, CreateError> {
    let mut errors = ValidationErrors::new();

    check_presence(draft, &mut errors);
    check_formats(draft, &mut errors);
    let date_of_birth = check_date(draft, &mut errors);
    check_email_unique(draft, directory, &mut errors)?;
    let card_digits = check_card(draft, &mut errors);

    match (date_of_birth, card_digits, errors.is_empty()) {
        (Some(date_of_birth), Some(mut digits), true) => {
            let brand = card::detect_brand(&digits);
            let ciphertext = match crypto.encrypt(&digits) {
                Ok(ciphertext) => ciphertext,
                Err(e) => {
                    digits.zeroize();
                    return Err(CreateError::Encryption(e));
                }
            };
            digits.zeroize();

            let contact = Contact {
                id: generate_id(),
                name: draft.name.clone(),
                date_of_birth,
                phone: draft.phone.clone(),
                address: draft.address.clone(),
                email: draft.email.clone(),
                card_ciphertext: ciphertext,
                brand,
                owner_user_id: draft.owner_user_id.clone(),
                owner_file_id: draft.owner_file_id.clone(),
                created_at: now_timestamp(),
            };
            debug!("contact {} validated, brand {}", contact.id, brand.name());
            Ok(contact)
        }
        _ => {
            debug!("contact draft rejected with {} error(s)", errors.len());
            Err(CreateError::Rejected(errors))
        }
    }
}

/// Presence checks over every required field, in declaration order.
fn check_presence(draft: &ContactDraft, errors: &mut ValidationErrors) {
    let required: [(ContactField, &str); 8] = [
        (ContactField::Name, &draft.name),
        (ContactField::DateOfBirth, &draft.date_of_birth),
        (ContactField::Phone, &draft.phone),
        (ContactField::Address, &draft.address),
        (ContactField::Email, &draft.email),
        (ContactField::CardNumber, &draft.card_number),
        (ContactField::OwnerUserId, &draft.owner_user_id),
        (ContactField::OwnerFileId, &draft.owner_file_id),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            errors.add(ValidationError::Presence { field });
        }
    }
}

/// Shape checks for name, phone, and email. Blank values are skipped here;
/// the presence check already reported them.
fn check_formats(draft: &ContactDraft, errors: &mut ValidationErrors) {
    if !draft.name.trim().is_empty() && !format::is_name_format(&draft.name) {
        errors.add(ValidationError::Format {
            field: ContactField::Name,
            message: "must be alphanumeric or with '-'",
        });
    }
    if !draft.phone.trim().is_empty() && !format::is_phone_format(&draft.phone) {
        errors.add(ValidationError::Format {
            field: ContactField::Phone,
            message: "format must be (+00) 000 000 00 00 or (+00) 000-000-00-00",
        });
    }
    if !draft.email.trim().is_empty() && !format::is_email_format(&draft.email) {
        errors.add(ValidationError::Format {
            field: ContactField::Email,
            message: "is invalid",
        });
    }
}

/// Strict `YYYY-MM-DD` parse. Reports a format failure and yields None for
/// any other shape or a calendar-impossible date.
fn check_date(draft: &ContactDraft, errors: &mut ValidationErrors) -> Option<NaiveDate> {
    if draft.date_of_birth.trim().is_empty() {
        return None;
    }
    match format::parse_strict_date(&draft.date_of_birth) {
        Some(date) => Some(date),
        None => {
            errors.add(ValidationError::Format {
                field: ContactField::DateOfBirth,
                message: "format must be 'YYYY-MM-DD'",
            });
            None
        }
    }
}

/// Probes the directory for an existing owner/email pair. Skipped for a
/// blank email.
fn check_email_unique(
    draft: &ContactDraft,
    directory: &dyn EmailDirectory,
    errors: &mut ValidationErrors,
) -> Result<(), StorageError> {
    if draft.email.trim().is_empty() {
        return Ok(());
    }
    if directory.email_taken(&draft.owner_user_id, &draft.email)? {
        errors.add(ValidationError::Uniqueness {
            field: ContactField::Email,
        });
    }
    Ok(())
}

/// Canonicalizes the card number and runs the Luhn checksum. Yields the
/// canonical digit string only when both pass.
fn check_card(draft: &ContactDraft, errors: &mut ValidationErrors) -> Option<String> {
    if draft.card_number.trim().is_empty() {
        return None;
    }
    match card::canonical_digits(&draft.card_number) {
        Some(digits) if card::is_valid_luhn(&digits) => Some(digits),
        _ => {
            errors.add(ValidationError::Card {
                field: ContactField::CardNumber,
            });
            None
        }
    }
}

/// Generates a unique contact id (16 random bytes, hex-encoded).
fn generate_id() -> String {
    let rng = ring::rand::SystemRandom::new();
    let random_bytes = ring::rand::generate::<[u8; 16]>(&rng)
        .expect("System RNG should not fail")
        .expose();
    hex::encode(random_bytes)
}

/// Returns the current Unix timestamp in seconds.
fn now_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_secs()
}
