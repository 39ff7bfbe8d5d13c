// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Masked Card Projection
//!
//! Display-safe read path for the stored card number. The stored value is
//! decrypted transiently and only the last four digits survive into the
//! projection.

use zeroize::Zeroize;

use super::Contact;
use crate::crypto::{DecryptionError, EncryptionService};

/// Number of mask characters before the visible suffix.
const MASK_LEN: usize = 10;
/// Number of trailing digits left visible.
const VISIBLE_SUFFIX: usize = 4;

impl Contact {
    /// Returns the display form of the card number: ten `*` followed by the
    /// last four digits, regardless of the card's actual length.
    ///
    /// The card value is decrypted for the duration of this call and the
    /// plaintext buffer is zeroized before returning. Decryption failures
    /// (corrupted ciphertext, wrong key) propagate to the caller.
    pub fn masked_card_number(
        &self,
        crypto: &EncryptionService,
    ) -> Result<String, DecryptionError> {
        let mut digits = crypto.decrypt(&self.card_ciphertext)?;
        let suffix_start = digits.len().saturating_sub(VISIBLE_SUFFIX);

        let mut masked = String::with_capacity(MASK_LEN + VISIBLE_SUFFIX);
        for _ in 0..MASK_LEN {
            masked.push('*');
        }
        masked.push_str(&digits[suffix_start..]);

        digits.zeroize();
        Ok(masked)
    }
}
