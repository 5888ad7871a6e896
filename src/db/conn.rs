// src/db/conn.rs
//! Opening and keying the SQLCipher database that backs the credential store

use std::fs;
use std::path::PathBuf;

use rusqlite::Connection;
use tracing::debug;

use crate::aliases::DbPassword;
use crate::consts::{DB_FILE_EXTENSION, DB_KDF_ITERATIONS, IN_MEMORY_HOST};
use crate::error::{Result, VaultError};

/// Where the store lives and how to unlock it.
///
/// `host` is the directory holding vault databases (or `:memory:`), the file
/// is `<host>/<database or user>.db` and `password` keys SQLCipher.
pub struct ConnectParams {
    pub host: String,
    pub user: String,
    pub password: DbPassword,
    pub database: Option<String>,
}

impl ConnectParams {
    pub fn new(host: &str, user: &str, password: &str, database: Option<&str>) -> Result<Self> {
        if host.is_empty() {
            return Err(VaultError::invalid("invalid value provided for 'host'"));
        }
        if user.is_empty() {
            return Err(VaultError::invalid("invalid value provided for 'user'"));
        }
        if password.is_empty() {
            return Err(VaultError::invalid("invalid value provided for 'password'"));
        }

        Ok(Self {
            host: host.to_owned(),
            user: user.to_owned(),
            password: DbPassword::new(password.to_owned()),
            database: database.filter(|d| !d.is_empty()).map(str::to_owned),
        })
    }

    pub fn is_in_memory(&self) -> bool {
        self.host == IN_MEMORY_HOST
    }

    /// Database file this configuration resolves to
    pub fn db_path(&self) -> PathBuf {
        let stem = self.database.as_deref().unwrap_or(&self.user);
        PathBuf::from(&self.host).join(format!("{stem}.{DB_FILE_EXTENSION}"))
    }

    fn target(&self) -> String {
        if self.is_in_memory() {
            IN_MEMORY_HOST.to_owned()
        } else {
            self.db_path().display().to_string()
        }
    }
}

/// Open, key and migrate the backing database
pub(crate) fn open(params: &ConnectParams) -> Result<Connection> {
    let target = params.target();
    let connect_err = |source: rusqlite::Error| VaultError::Connect {
        target: target.clone(),
        source,
    };

    let conn = if params.is_in_memory() {
        Connection::open_in_memory().map_err(connect_err)?
    } else {
        let path = params.db_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(&path).map_err(connect_err)?;
        apply_key(&conn, &params.password).map_err(connect_err)?;
        conn
    };

    // Wrong key surfaces here as "file is not a database"
    conn.query_row("SELECT count(*) FROM sqlite_master", [], |row| {
        row.get::<_, i64>(0)
    })
    .map_err(connect_err)?;

    create_schema(&conn).map_err(connect_err)?;
    debug!(db = %target, "credential store opened");
    Ok(conn)
}

fn apply_key(conn: &Connection, password: &DbPassword) -> rusqlite::Result<()> {
    conn.pragma_update(None, "key", password.expose_secret().as_str())?;
    conn.pragma_update(None, "cipher_page_size", 4096)?;
    conn.pragma_update(None, "kdf_iter", DB_KDF_ITERATIONS)?;
    Ok(())
}

fn create_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS credentials (
            id       INTEGER PRIMARY KEY AUTOINCREMENT,
            title    TEXT NOT NULL,
            username TEXT,
            email    TEXT,
            password BLOB NOT NULL,
            salt     BLOB NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_credentials_title ON credentials(title);
        "#,
    )
}
