// src/transport.rs
//! Flat JSON transport format used to move a vault between master passwords
//!
//! ```json
//! [{ "title": "...", "username": "...", "email": "...",
//!    "password": "<base64>", "salt": "<base64>" }]
//! ```
//!
//! The ciphertext stays encrypted in the file. Ids are never written; a
//! legacy `id` field is accepted on read and ignored.

use std::fs;
use std::io::Write;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Deserializer, Serialize};
use tempfile::NamedTempFile;

use crate::error::Result;
use crate::record::Credential;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportRecord {
    #[serde(default, skip_serializing)]
    pub id: Option<i64>,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub username: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    pub password: String,
    pub salt: String,
}

impl TransportRecord {
    pub fn from_credential(cred: &Credential) -> Self {
        Self {
            id: None,
            title: cred.title.clone(),
            username: cred.username.clone().unwrap_or_default(),
            email: cred.email.clone().unwrap_or_default(),
            password: STANDARD.encode(&cred.encrypted_password),
            salt: STANDARD.encode(&cred.salt),
        }
    }

    /// Decoded `(ciphertext, salt)`
    pub fn decode_secret(&self) -> Result<(Vec<u8>, Vec<u8>)> {
        Ok((STANDARD.decode(&self.password)?, STANDARD.decode(&self.salt)?))
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

pub fn read_transport(path: &Path) -> Result<Vec<TransportRecord>> {
    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(&content)?)
}

/// Write `records` atomically and return the BLAKE3 hex digest of the bytes
pub fn write_transport(path: &Path, records: &[TransportRecord]) -> Result<String> {
    let bytes = serde_json::to_vec_pretty(records)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(&bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;

    Ok(blake3::hash(&bytes).to_hex().to_string())
}
