// src/lib.rs
//! credential-vault: a local vault for encrypted password records
//!
//! Features:
//! - SQLCipher-backed credential table with validated CRUD and search
//! - Ciphertext and salt stored and replaced only as a pair
//! - JSON export, and import with re-encryption under a new master password
//! - In-place master password change
//! - Full secure-gate integration for plaintext and key material

pub mod aliases;
pub mod cancel;
pub mod config;
pub mod consts;
pub mod crypto;
pub mod db;
pub mod error;
pub mod export;
pub mod import;
#[cfg(feature = "logging")]
pub mod logging;
pub mod record;
pub mod rotate_keys;
pub mod transport;

// Re-export everything users need at the crate root
pub use aliases::{DbPassword, MasterPassword, PlainText};
pub use cancel::CancelToken;
pub use config::load as load_config;
pub use crypto::{generate_salt, seal, AesCryptCipher, Cipher};
pub use db::{ConnectParams, CredentialStore};
pub use error::{Result, VaultError};
pub use export::{export_to_json, ExportSummary};
pub use import::{import_from_json, ImportFailure, ImportReport};
pub use record::{Credential, CredentialUpdate, SealedSecret};
pub use rotate_keys::rekey_store;
