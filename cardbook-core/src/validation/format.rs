// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Format Validators
//!
//! Pure syntactic predicates for contact fields. Patterns compile once and
//! match against the whole value; a partial match is a failure.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9-]+$").unwrap());

// Country code in parentheses, then 3-3-2-2 digit groups. Each group
// boundary independently accepts '-' or a space.
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\(\+\d{2}\)\s\d{3}[- ]\d{3}[- ]\d{2}[- ]\d{2}$").unwrap());

// Mailbox grammar from RFC 6068: dot-atom local part, hostname domain with
// 63-octet labels. A dotless domain is accepted ("user@localhost").
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .unwrap()
});

/// Parses a date of birth, accepting only the exact `YYYY-MM-DD` template.
///
/// The shape is checked before the calendar parse so values the parser
/// would tolerate, such as single-digit months ("1990-5-21"), are still
/// rejected. Calendar-impossible dates ("2023-02-30") fail the parse step.
pub fn parse_strict_date(value: &str) -> Option<NaiveDate> {
    let bytes = value.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    let digits_ok = bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !digits_ok {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Returns true if the value is a calendar-valid date in strict
/// `YYYY-MM-DD` form.
pub fn is_strict_date(value: &str) -> bool {
    parse_strict_date(value).is_some()
}

/// Returns true if the value matches `(+00) 000 000 00 00` or
/// `(+00) 000-000-00-00`, including mixes of the two separators.
pub fn is_phone_format(value: &str) -> bool {
    PHONE_RE.is_match(value)
}

/// Returns true if the value is a plausible mailbox address.
pub fn is_email_format(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Returns true if the value is non-empty and contains only letters,
/// digits, and '-'.
pub fn is_name_format(value: &str) -> bool {
    NAME_RE.is_match(value)
}
