// src/db/mod.rs
//! Backing store: SQLCipher connection and the credential table

pub mod conn;
pub mod store;

pub use conn::ConnectParams;
pub use store::CredentialStore;
