//! Cardbook Core Library
//!
//! Contact records with strictly validated fields and card numbers held
//! encrypted at rest (XChaCha20-Poly1305). A draft is validated as a whole,
//! rejected with every field failure at once, or persisted with its card
//! number replaced by ciphertext.

pub mod card;
pub mod contact;
pub mod crypto;
pub mod storage;
pub mod validation;

pub use card::{detect_brand, is_valid_luhn, CardBrand};
pub use contact::{validate_then_prepare, Contact, ContactDraft, CreateError, EmailDirectory};
pub use crypto::{
    ConfigError, DecryptionError, EncryptionError, EncryptionService, FileKeyProvider, KeyProvider,
    SymmetricKey,
};
#[cfg(feature = "secure-storage")]
pub use crypto::KeyringKeyProvider;
pub use storage::{Storage, StorageError};
pub use validation::{ContactField, ValidationError, ValidationErrors};
