// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Contact Validation
//!
//! Field-level error taxonomy and the aggregate error set produced by one
//! validation run. Every validator reports into the same collection, so a
//! rejected draft carries all of its failures at once rather than the first
//! one encountered.

pub mod format;

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// The contact fields that validation can report against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    Name,
    DateOfBirth,
    Phone,
    Address,
    Email,
    CardNumber,
    OwnerUserId,
    OwnerFileId,
}

impl ContactField {
    /// Returns the field name as used in error payloads.
    pub fn name(&self) -> &'static str {
        match self {
            ContactField::Name => "name",
            ContactField::DateOfBirth => "date_of_birth",
            ContactField::Phone => "phone",
            ContactField::Address => "address",
            ContactField::Email => "email",
            ContactField::CardNumber => "card_number",
            ContactField::OwnerUserId => "owner_user_id",
            ContactField::OwnerFileId => "owner_file_id",
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single field-level validation failure.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} can't be blank")]
    Presence { field: ContactField },
    /// A present value does not match the shape required for its field.
    #[error("{field} {message}")]
    Format {
        field: ContactField,
        message: &'static str,
    },
    /// Another contact of the same owner already uses this value.
    #[error("{field} has already been taken")]
    Uniqueness { field: ContactField },
    /// The card number failed the character policy or the Luhn checksum.
    #[error("{field} please enter a valid card number")]
    Card { field: ContactField },
}

impl ValidationError {
    /// Returns the field this failure refers to.
    pub fn field(&self) -> ContactField {
        match self {
            ValidationError::Presence { field }
            | ValidationError::Format { field, .. }
            | ValidationError::Uniqueness { field }
            | ValidationError::Card { field } => *field,
        }
    }

    /// Returns the message without the field prefix.
    pub fn message(&self) -> &'static str {
        match self {
            ValidationError::Presence { .. } => "can't be blank",
            ValidationError::Format { message, .. } => message,
            ValidationError::Uniqueness { .. } => "has already been taken",
            ValidationError::Card { .. } => "please enter a valid card number",
        }
    }
}

/// Aggregate of every failure recorded during one validation run.
///
/// Validators never short-circuit; the order of entries is the order the
/// validators ran in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Creates an empty error set.
    pub fn new() -> Self {
        ValidationErrors { errors: Vec::new() }
    }

    /// Records a failure.
    pub(crate) fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Returns true if no validator failed.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of recorded failures.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterates over the failures in the order they were recorded.
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter()
    }

    /// Returns true if any failure refers to the given field.
    pub fn has_field(&self, field: ContactField) -> bool {
        self.errors.iter().any(|e| e.field() == field)
    }

    /// Returns the failures as (field name, message) pairs.
    pub fn field_messages(&self) -> Vec<(&'static str, &'static str)> {
        self.errors
            .iter()
            .map(|e| (e.field().name(), e.message()))
            .collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.errors {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}", error)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
