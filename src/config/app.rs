// src/config/app.rs
use std::env;
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

use serde::Deserialize;
use tracing::warn;

use super::defaults::*;
use crate::consts::{
    DEFAULT_CONFIG_FILE, ENV_CONFIG, ENV_DB_HOST, ENV_DB_NAME, ENV_DB_PASSWORD, ENV_DB_USER,
};
use crate::crypto::AesCryptCipher;
use crate::db::ConnectParams;
use crate::error::{Result, VaultError};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_connection")]
    pub connection: ConnectionConfig,
    #[serde(default = "default_crypto")]
    pub crypto: CryptoConfig,
    #[serde(default = "default_logging")]
    pub logging: LoggingConfig,
}

#[derive(Clone, Deserialize)]
pub struct ConnectionConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_user")]
    pub user: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub database: Option<String>,
}

// Keeps the database key out of logs
impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CryptoConfig {
    pub kdf_iterations: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            connection: default_connection(),
            crypto: default_crypto(),
            logging: default_logging(),
        }
    }
}

impl Config {
    /// Validated connection parameters; fails if host, user or password is empty
    pub fn connect_params(&self) -> Result<ConnectParams> {
        let c = &self.connection;
        ConnectParams::new(&c.host, &c.user, &c.password, c.database.as_deref())
    }

    pub fn cipher(&self) -> AesCryptCipher {
        AesCryptCipher::new(self.crypto.kdf_iterations)
    }

    fn apply_env(&mut self) {
        if let Ok(host) = env::var(ENV_DB_HOST) {
            self.connection.host = host;
        }
        if let Ok(user) = env::var(ENV_DB_USER) {
            self.connection.user = user;
        }
        if let Ok(password) = env::var(ENV_DB_PASSWORD) {
            self.connection.password = password;
        }
        if let Ok(name) = env::var(ENV_DB_NAME) {
            self.connection.database = Some(name);
        }
    }
}

static CONFIG: OnceLock<Config> = OnceLock::new();

/// Load config once per process from `$CREDVAULT_CONFIG` (default
/// `credvault.toml`); falls back to defaults if the file is missing
pub fn load() -> Result<&'static Config> {
    if let Some(conf) = CONFIG.get() {
        return Ok(conf);
    }
    let path = env::var(ENV_CONFIG).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
    let conf = load_from(&path)?;
    Ok(CONFIG.get_or_init(|| conf))
}

/// Uncached load from an explicit path, env overrides applied
pub fn load_from(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();

    let mut conf = if path.exists() {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| VaultError::Config(format!("{}: {e}", path.display())))?
    } else {
        warn!(path = %path.display(), "config file not found, using built-in defaults");
        Config::default()
    };

    conf.apply_env();
    Ok(conf)
}
