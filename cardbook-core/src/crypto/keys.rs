// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Key Material Providers
//!
//! Sources for the process-wide card encryption key. The key is loaded once
//! during initialization; missing or malformed key material is a
//! configuration failure that aborts startup, never a per-record error.

use std::path::PathBuf;

use base64::Engine;
use thiserror::Error;

use super::encryption::SymmetricKey;

/// Configuration error types (fatal at startup).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Key material not found: {0}")]
    KeyNotFound(String),
    #[error("Invalid key material: {0}")]
    InvalidKey(String),
    #[error("Failed to read key material: {0}")]
    Io(#[from] std::io::Error),
}

/// Supplies the card encryption key to `EncryptionService`.
///
/// Implementations should use platform-native secure storage when available:
/// - macOS: Keychain
/// - Linux: Secret Service (GNOME Keyring, KDE Wallet)
/// - Windows: Credential Manager
///
/// File-based key material is the fallback for headless deployments.
pub trait KeyProvider: Send + Sync {
    /// Loads the card encryption key.
    fn load_key(&self) -> Result<SymmetricKey, ConfigError>;
}

/// File-based key provider. The file holds a base64-encoded 32-byte key.
pub struct FileKeyProvider {
    path: PathBuf,
}

impl FileKeyProvider {
    /// Creates a provider reading from the given key file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Writes a key to the file, base64-encoded. Used when provisioning a
    /// fresh deployment.
    pub fn save_key(&self, key: &SymmetricKey) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let encoded = base64::engine::general_purpose::STANDARD.encode(key.as_bytes());
        std::fs::write(&self.path, encoded)?;
        Ok(())
    }
}

impl KeyProvider for FileKeyProvider {
    fn load_key(&self) -> Result<SymmetricKey, ConfigError> {
        if !self.path.exists() {
            return Err(ConfigError::KeyNotFound(self.path.display().to_string()));
        }
        let encoded = std::fs::read_to_string(&self.path)?;
        decode_key(encoded.trim())
    }
}

/// Decodes base64 key material into a 32-byte key.
fn decode_key(encoded: &str) -> Result<SymmetricKey, ConfigError> {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .map_err(|e| ConfigError::InvalidKey(format!("not valid base64: {}", e)))?;
    let bytes: [u8; 32] = bytes
        .try_into()
        .map_err(|b: Vec<u8>| ConfigError::InvalidKey(format!("expected 32 bytes, got {}", b.len())))?;
    Ok(SymmetricKey::from_bytes(bytes))
}

/// Platform keychain provider using the `keyring` crate.
/// Available when the `secure-storage` feature is enabled.
#[cfg(feature = "secure-storage")]
pub struct KeyringKeyProvider {
    service: String,
    entry: String,
}

#[cfg(feature = "secure-storage")]
impl KeyringKeyProvider {
    /// Creates a keychain provider.
    ///
    /// # Arguments
    /// * `service` - The service name for keychain entries (e.g., "cardbook")
    /// * `entry` - The entry name holding the key
    pub fn new(service: impl Into<String>, entry: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            entry: entry.into(),
        }
    }

    /// Writes a key to the keychain. Used when provisioning a fresh
    /// deployment.
    pub fn save_key(&self, key: &SymmetricKey) -> Result<(), ConfigError> {
        let entry = keyring::Entry::new(&self.service, &self.entry)
            .map_err(|e| ConfigError::InvalidKey(format!("Keyring error: {}", e)))?;
        entry
            .set_secret(key.as_bytes())
            .map_err(|e| ConfigError::InvalidKey(format!("Failed to save to keychain: {}", e)))
    }
}

#[cfg(feature = "secure-storage")]
impl KeyProvider for KeyringKeyProvider {
    fn load_key(&self) -> Result<SymmetricKey, ConfigError> {
        let entry = keyring::Entry::new(&self.service, &self.entry)
            .map_err(|e| ConfigError::InvalidKey(format!("Keyring error: {}", e)))?;

        match entry.get_secret() {
            Ok(secret) => {
                let bytes: [u8; 32] = secret.try_into().map_err(|b: Vec<u8>| {
                    ConfigError::InvalidKey(format!("expected 32 bytes, got {}", b.len()))
                })?;
                Ok(SymmetricKey::from_bytes(bytes))
            }
            Err(keyring::Error::NoEntry) => Err(ConfigError::KeyNotFound(format!(
                "{}/{}",
                self.service, self.entry
            ))),
            Err(e) => Err(ConfigError::InvalidKey(format!(
                "Failed to load from keychain: {}",
                e
            ))),
        }
    }
}
