// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Card Brand Detection
//!
//! Luhn checksum plus issuing-network classification for payment card
//! numbers. Classification is independent of checksum validity: a mistyped
//! number with a recognizable prefix still reports its brand.

mod luhn;

use std::fmt;

pub use luhn::is_valid_luhn;
pub(crate) use luhn::canonical_digits;

/// Issuing network of a payment card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardBrand {
    Visa,
    MasterCard,
    Amex,
    Discover,
    DinersClub,
    Jcb,
    UnionPay,
    Maestro,
    /// No classification rule matched.
    Unknown,
}

impl CardBrand {
    /// Canonical display name, as stored alongside the record.
    pub fn name(&self) -> &'static str {
        match self {
            CardBrand::Visa => "Visa",
            CardBrand::MasterCard => "MasterCard",
            CardBrand::Amex => "Amex",
            CardBrand::Discover => "Discover",
            CardBrand::DinersClub => "DinersClub",
            CardBrand::Jcb => "JCB",
            CardBrand::UnionPay => "UnionPay",
            CardBrand::Maestro => "Maestro",
            CardBrand::Unknown => "Unknown",
        }
    }

    /// Restores a brand from its stored name. Unrecognized names map to
    /// `Unknown` rather than failing the record.
    pub fn from_name(name: &str) -> CardBrand {
        match name {
            "Visa" => CardBrand::Visa,
            "MasterCard" => CardBrand::MasterCard,
            "Amex" => CardBrand::Amex,
            "Discover" => CardBrand::Discover,
            "DinersClub" => CardBrand::DinersClub,
            "JCB" => CardBrand::Jcb,
            "UnionPay" => CardBrand::UnionPay,
            "Maestro" => CardBrand::Maestro,
            _ => CardBrand::Unknown,
        }
    }
}

impl fmt::Display for CardBrand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One classification rule: inclusive prefix ranges plus accepted lengths.
///
/// Range bounds are digit strings of equal width; a number matches when its
/// leading digits of that width fall inside the range.
struct BrandRule {
    brand: CardBrand,
    prefixes: &'static [(&'static str, &'static str)],
    lengths: &'static [usize],
}

/// Classification table. Scanned in order, first match wins, so rules that
/// carve out of another network's space (Discover and UnionPay inside
/// Maestro's 56-69) come before the broader rule.
const BRAND_RULES: &[BrandRule] = &[
    BrandRule {
        brand: CardBrand::Visa,
        prefixes: &[("4", "4")],
        lengths: &[13, 16, 19],
    },
    BrandRule {
        brand: CardBrand::MasterCard,
        prefixes: &[("51", "55"), ("2221", "2720")],
        lengths: &[16],
    },
    BrandRule {
        brand: CardBrand::Amex,
        prefixes: &[("34", "34"), ("37", "37")],
        lengths: &[15],
    },
    BrandRule {
        brand: CardBrand::Discover,
        prefixes: &[("6011", "6011"), ("644", "649"), ("65", "65")],
        lengths: &[16, 17, 18, 19],
    },
    BrandRule {
        brand: CardBrand::DinersClub,
        prefixes: &[("300", "305"), ("36", "36"), ("38", "39")],
        lengths: &[14, 15, 16, 17, 18, 19],
    },
    BrandRule {
        brand: CardBrand::Jcb,
        prefixes: &[("3528", "3589")],
        lengths: &[16, 17, 18, 19],
    },
    BrandRule {
        brand: CardBrand::UnionPay,
        prefixes: &[("62", "62")],
        lengths: &[16, 17, 18, 19],
    },
    BrandRule {
        brand: CardBrand::Maestro,
        prefixes: &[("50", "50"), ("56", "69")],
        lengths: &[12, 13, 14, 15, 16, 17, 18, 19],
    },
];

/// True if the number's leading digits fall inside the inclusive range.
///
/// Bounds have equal width, so lexicographic comparison of the digit prefix
/// is numeric comparison.
fn prefix_in_range(digits: &str, low: &str, high: &str) -> bool {
    let width = low.len();
    if digits.len() < width {
        return false;
    }
    let prefix = &digits[..width];
    prefix >= low && prefix <= high
}

/// Classifies a card number by issuing network.
///
/// The number is canonicalized first; values rejected by the character
/// policy, or matching no rule's prefix and length, classify as `Unknown`.
pub fn detect_brand(number: &str) -> CardBrand {
    let digits = match canonical_digits(number) {
        Some(digits) => digits,
        None => return CardBrand::Unknown,
    };
    for rule in BRAND_RULES {
        if rule.lengths.contains(&digits.len())
            && rule
                .prefixes
                .iter()
                .any(|(low, high)| prefix_in_range(&digits, low, high))
        {
            return rule.brand;
        }
    }
    CardBrand::Unknown
}
