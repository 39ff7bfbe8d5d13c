// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Luhn Checksum
//!
//! Checksum validation for payment card numbers, with the character policy
//! applied up front: ASCII spaces and hyphens are formatting and are
//! stripped, any other non-digit invalidates the whole value.

/// Returns the canonical digit string for a card number.
///
/// None when the value contains a character other than a digit, a space, or
/// a hyphen, or when no digits remain after stripping. Such values fail
/// validation outright rather than being repaired.
pub(crate) fn canonical_digits(number: &str) -> Option<String> {
    let mut digits = String::with_capacity(number.len());
    for c in number.chars() {
        match c {
            '0'..='9' => digits.push(c),
            ' ' | '-' => {}
            _ => return None,
        }
    }
    if digits.is_empty() {
        None
    } else {
        Some(digits)
    }
}

/// Validates a card number with the Luhn checksum.
///
/// Walking right to left, every second digit is doubled and 9 is subtracted
/// from doubled values above 9; the number passes when the digit sum is a
/// multiple of 10. Values rejected by the character policy simply fail.
pub fn is_valid_luhn(number: &str) -> bool {
    match canonical_digits(number) {
        Some(digits) => luhn_sum(&digits) % 10 == 0,
        None => false,
    }
}

/// Luhn-weighted digit sum of an all-digit string.
fn luhn_sum(digits: &str) -> u32 {
    digits
        .bytes()
        .rev()
        .enumerate()
        .map(|(i, b)| {
            let digit = u32::from(b - b'0');
            if i % 2 == 1 {
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
        .sum()
}
