// src/aliases.rs
//! Re-exports secure-gate's ergonomic secret types
//!
//! Every secret the vault touches in memory goes through one of these
//! wrappers so it is zeroized on drop.

pub use secure_gate::dynamic_alias;

// Dynamic secrets
dynamic_alias!(MasterPassword, String); // Key material handed to the cipher
dynamic_alias!(DbPassword, String); // SQLCipher database key
dynamic_alias!(PlainText, Vec<u8>); // Decrypted credential password, alive only between decrypt and re-encrypt
