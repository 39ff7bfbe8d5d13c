// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Symmetric Card Encryption (XChaCha20-Poly1305)
//!
//! Authenticated encryption for card numbers at rest. One key serves the
//! whole process; it is loaded once at startup through a `KeyProvider` and
//! injected into the service.
//!
//! Ciphertext format: `nonce (24 bytes) || ciphertext || tag (16 bytes)`

use chacha20poly1305::aead::{Aead, KeyInit};
use chacha20poly1305::XChaCha20Poly1305;
use ring::rand::{SecureRandom, SystemRandom};
use thiserror::Error;
use zeroize::Zeroize;

use super::keys::{ConfigError, KeyProvider};

/// Encryption error types.
#[derive(Error, Debug)]
pub enum EncryptionError {
    #[error("Encryption failed")]
    EncryptionFailed,
}

/// Decryption error types.
#[derive(Error, Debug)]
pub enum DecryptionError {
    #[error("Ciphertext too short")]
    CiphertextTooShort,
    #[error("Decryption failed: data may be corrupted or wrong key")]
    DecryptionFailed,
    #[error("Decrypted value is not valid UTF-8")]
    NotUtf8,
}

/// Nonce size for XChaCha20-Poly1305 (192 bits = 24 bytes).
const NONCE_SIZE: usize = 24;
/// Authentication tag size.
const TAG_SIZE: usize = 16;

/// 256-bit symmetric encryption key.
#[derive(Clone)]
pub struct SymmetricKey {
    bytes: [u8; 32],
}

impl std::fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Don't expose key bytes in debug output
        f.debug_struct("SymmetricKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

impl Drop for SymmetricKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl SymmetricKey {
    /// Generates a new random symmetric key.
    pub fn generate() -> Self {
        let rng = SystemRandom::new();
        let key = ring::rand::generate::<[u8; 32]>(&rng)
            .expect("System RNG should not fail")
            .expose();
        SymmetricKey { bytes: key }
    }

    /// Creates a key from raw bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        SymmetricKey { bytes }
    }

    /// Returns a reference to the key bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }
}

/// Encrypts and decrypts card numbers with the process-wide key.
///
/// The key is immutable after construction, so one instance can be shared
/// by concurrent record creations.
pub struct EncryptionService {
    key: SymmetricKey,
}

impl EncryptionService {
    /// Creates a service around an already-loaded key.
    pub fn new(key: SymmetricKey) -> Self {
        EncryptionService { key }
    }

    /// Creates a service with the key loaded from the given provider.
    ///
    /// Missing or malformed key material fails here, at process startup,
    /// never during individual record operations.
    pub fn from_provider(provider: &dyn KeyProvider) -> Result<Self, ConfigError> {
        Ok(EncryptionService {
            key: provider.load_key()?,
        })
    }

    /// Encrypts a plaintext string.
    ///
    /// Output format: `nonce (24 bytes) || ciphertext || tag (16 bytes)`.
    /// The nonce is random per call, so encrypting the same value twice
    /// yields different ciphertexts.
    pub fn encrypt(&self, plaintext: &str) -> Result<Vec<u8>, EncryptionError> {
        let rng = SystemRandom::new();

        // Generate random 24-byte nonce
        let mut nonce_bytes = [0u8; NONCE_SIZE];
        rng.fill(&mut nonce_bytes)
            .map_err(|_| EncryptionError::EncryptionFailed)?;

        let cipher = XChaCha20Poly1305::new(self.key.as_bytes().into());
        let nonce = chacha20poly1305::XNonce::from_slice(&nonce_bytes);

        let ciphertext = cipher
            .encrypt(nonce, plaintext.as_bytes())
            .map_err(|_| EncryptionError::EncryptionFailed)?;

        let mut output = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        output.extend_from_slice(&nonce_bytes);
        output.extend_from_slice(&ciphertext);

        Ok(output)
    }

    /// Decrypts a ciphertext produced by `encrypt`.
    ///
    /// Fails when the data is shorter than a nonce plus a tag, when the
    /// authentication tag does not verify (corruption or a different key),
    /// or when the recovered bytes are not UTF-8.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<String, DecryptionError> {
        let min_size = NONCE_SIZE + TAG_SIZE;
        if ciphertext.len() < min_size {
            return Err(DecryptionError::CiphertextTooShort);
        }

        let nonce = chacha20poly1305::XNonce::from_slice(&ciphertext[..NONCE_SIZE]);
        let cipher = XChaCha20Poly1305::new(self.key.as_bytes().into());

        let plaintext = cipher
            .decrypt(nonce, &ciphertext[NONCE_SIZE..])
            .map_err(|_| DecryptionError::DecryptionFailed)?;

        String::from_utf8(plaintext).map_err(|e| {
            let mut bytes = e.into_bytes();
            bytes.zeroize();
            DecryptionError::NotUtf8
        })
    }
}
