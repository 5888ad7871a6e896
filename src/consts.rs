// src/consts.rs
//! Shared constants: security parameters and defaults

/// Length in bytes of a freshly generated per-record salt
pub const SALT_LEN: usize = 16;

/// Default KDF iterations for master-password encryption (AES-Crypt v3)
// ~0.2–0.5s per record on typical CPU
pub const DEFAULT_KDF_ITERATIONS: u32 = 300_000;

/// Recommended KDF iterations for SQLCipher databases (2025+)
pub const DB_KDF_ITERATIONS: u32 = 256_000;

/// Header magic for AES-Crypt v3 ciphertext
pub const AESCRYPT_V3_HEADER: &[u8; 5] = b"AES\x03\x00";

/// `host` value that opens a transient in-memory store
pub const IN_MEMORY_HOST: &str = ":memory:";

/// Extension of on-disk vault databases
pub const DB_FILE_EXTENSION: &str = "db";

/// Default config file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "credvault.toml";

pub const ENV_CONFIG: &str = "CREDVAULT_CONFIG";
pub const ENV_DB_HOST: &str = "CREDVAULT_DB_HOST";
pub const ENV_DB_USER: &str = "CREDVAULT_DB_USER";
pub const ENV_DB_PASSWORD: &str = "CREDVAULT_DB_PASSWORD";
pub const ENV_DB_NAME: &str = "CREDVAULT_DB_NAME";
