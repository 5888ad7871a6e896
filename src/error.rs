// src/error.rs
//! Public error type for the entire crate

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, VaultError>;

#[derive(Error, Debug)]
pub enum VaultError {
    /// Caller passed an empty, malformed or out-of-range value. Raised before
    /// any storage access.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A stored row did not decode into a well-formed credential
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    #[error("Transport source not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("Database error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Could not open credential store at {target}: {source}")]
    Connect {
        target: String,
        #[source]
        source: rusqlite::Error,
    },

    /// Raw query rejected by the engine. Callers are expected to abort.
    #[error("Fatal error while executing query `{query}`: {source}")]
    Fatal {
        query: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Crypto operation failed: {0}")]
    Crypto(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Transport file error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid base64 in transport file: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Operation cancelled after {completed} record(s)")]
    Cancelled { completed: usize },
}

impl VaultError {
    /// Whether the error must terminate the process at the top-level boundary
    pub fn is_fatal(&self) -> bool {
        matches!(self, VaultError::Fatal { .. } | VaultError::Connect { .. })
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        VaultError::InvalidArgument(msg.into())
    }
}

impl From<aescrypt_rs::AescryptError> for VaultError {
    fn from(err: aescrypt_rs::AescryptError) -> Self {
        VaultError::Crypto(err.to_string())
    }
}
