// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Proptest Strategies
//!
//! Reusable proptest strategies for property-based testing.
//! Import these in property test files to avoid duplication.

use proptest::prelude::*;

// ============================================================
// Card Number Strategies
// ============================================================

/// Strategy for digit strings of card-number lengths (12-19 digits).
pub fn digit_string_strategy() -> impl Strategy<Value = String> {
    "[0-9]{12,19}"
}

/// Strategy for Luhn-valid card numbers: a random digit body with the
/// correct check digit appended.
pub fn luhn_valid_strategy() -> impl Strategy<Value = String> {
    "[0-9]{11,18}".prop_map(|body| {
        let check = luhn_check_digit(&body);
        format!("{}{}", body, check)
    })
}

/// Computes the check digit that makes `body` plus that digit pass the
/// Luhn checksum.
///
/// The appended digit occupies the rightmost (undoubled) position, which
/// shifts every body digit one position left; body digits at even distance
/// from the body's right end are the doubled ones.
pub fn luhn_check_digit(body: &str) -> char {
    let sum: u32 = body
        .bytes()
        .rev()
        .enumerate()
        .map(|(i, b)| {
            let digit = u32::from(b - b'0');
            if i % 2 == 0 {
                let doubled = digit * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                digit
            }
        })
        .sum();
    let check = (10 - (sum % 10)) % 10;
    char::from_digit(check, 10).expect("check digit is 0-9")
}

// ============================================================
// Plaintext Strategies
// ============================================================

/// Strategy for arbitrary encryption payloads, including empty strings and
/// non-ASCII content.
pub fn plaintext_strategy() -> impl Strategy<Value = String> {
    ".{0,64}"
}
