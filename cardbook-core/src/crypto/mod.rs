// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

pub mod encryption;
pub mod keys;

pub use encryption::{DecryptionError, EncryptionError, EncryptionService, SymmetricKey};
pub use keys::{ConfigError, FileKeyProvider, KeyProvider};

#[cfg(feature = "secure-storage")]
pub use keys::KeyringKeyProvider;
