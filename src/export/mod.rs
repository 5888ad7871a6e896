// src/export/mod.rs
//! Export utilities for the credential vault
//!
//! Ciphertext leaves the vault still encrypted; only the byte encoding
//! changes (base64). The file is still worth protecting.

pub use json::{export_to_json, ExportSummary};

pub mod json;
