// src/config/mod.rs
//! Configuration system for the credential vault
//!
//! Lazy-loaded global config with TOML + env overrides.

pub use app::{load, load_from, Config, ConnectionConfig, CryptoConfig, LoggingConfig};

mod app;
mod defaults;
