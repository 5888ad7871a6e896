// src/config/defaults.rs
use std::path::PathBuf;

use crate::config::app::{ConnectionConfig, CryptoConfig, LoggingConfig};
use crate::consts::DEFAULT_KDF_ITERATIONS;

pub const DEFAULT_DB_USER: &str = "vault";
pub const DEFAULT_LOG_FILTER: &str = "info";

/// `<platform data dir>/credvault`, or `./credvault` when the platform has none
pub fn default_host() -> String {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("credvault")
        .display()
        .to_string()
}

pub fn default_user() -> String {
    DEFAULT_DB_USER.into()
}

pub fn default_connection() -> ConnectionConfig {
    ConnectionConfig {
        host: default_host(),
        user: default_user(),
        password: String::new(),
        database: None,
    }
}

pub fn default_crypto() -> CryptoConfig {
    CryptoConfig {
        kdf_iterations: DEFAULT_KDF_ITERATIONS,
    }
}

pub fn default_logging() -> LoggingConfig {
    LoggingConfig {
        filter: DEFAULT_LOG_FILTER.into(),
    }
}
