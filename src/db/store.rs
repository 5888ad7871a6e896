// src/db/store.rs
//! Credential store, the only gateway to persisted records
//!
//! All field validation happens here, before the statement is prepared, so
//! an invalid record never reaches the table. Every mutating call runs in
//! autocommit mode and is durable when it returns.

use rusqlite::types::Value;
use rusqlite::{params, Connection, Params};
use tracing::{debug, warn};

use crate::db::conn::{self, ConnectParams};
use crate::error::{Result, VaultError};
use crate::record::{non_empty, Credential, CredentialUpdate, SealedSecret};

const SELECT_COLUMNS: &str = "SELECT id, title, username, email, password, salt FROM credentials";

/// Handle to one vault database.
///
/// Owns a single connection and is not `Sync`: share it across threads only
/// behind a lock.
pub struct CredentialStore {
    conn: Connection,
}

impl CredentialStore {
    /// Open (or create) the store. Failures here are fatal for the caller.
    pub fn open(params: &ConnectParams) -> Result<Self> {
        Ok(Self {
            conn: conn::open(params)?,
        })
    }

    /// Insert a new credential and return its id
    pub fn add(
        &self,
        title: &str,
        username: Option<&str>,
        email: Option<&str>,
        encrypted_password: &[u8],
        salt: &[u8],
    ) -> Result<i64> {
        if title.is_empty() {
            return Err(VaultError::invalid("title cannot be empty"));
        }
        if encrypted_password.is_empty() {
            return Err(VaultError::invalid("encrypted password cannot be empty"));
        }
        if salt.is_empty() {
            return Err(VaultError::invalid("salt cannot be empty"));
        }

        self.conn.execute(
            "INSERT INTO credentials (title, username, email, password, salt)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                title,
                username.and_then(non_empty),
                email.and_then(non_empty),
                encrypted_password,
                salt
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!(id, "credential added");
        Ok(id)
    }

    /// Insert a credential whose pair came out of the cipher in one piece
    pub fn add_sealed(
        &self,
        title: &str,
        username: Option<&str>,
        email: Option<&str>,
        secret: &SealedSecret,
    ) -> Result<i64> {
        self.add(title, username, email, secret.ciphertext(), secret.salt())
    }

    /// Fetch one credential. A missing id is `Ok(None)`.
    pub fn get(&self, id: i64) -> Result<Option<Credential>> {
        check_id(id)?;
        let rows = self.query(&format!("{SELECT_COLUMNS} WHERE id = ?1"), [id])?;
        Ok(rows.into_iter().next())
    }

    pub fn get_all(&self) -> Result<Vec<Credential>> {
        self.filter("", "", "")
    }

    pub fn count(&self) -> Result<usize> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM credentials", [], |row| row.get(0))?;
        Ok(n as usize)
    }

    /// Delete one credential. Returns whether a row was removed.
    pub fn remove(&self, id: i64) -> Result<bool> {
        check_id(id)?;
        let removed = self
            .conn
            .execute("DELETE FROM credentials WHERE id = ?1", [id])?;
        debug!(id, removed, "credential remove");
        Ok(removed > 0)
    }

    /// Empty the table unconditionally. Ids are not reused afterwards.
    pub fn remove_all(&self) -> Result<usize> {
        let removed = self.conn.execute("DELETE FROM credentials", [])?;
        debug!(removed, "all credentials removed");
        Ok(removed)
    }

    /// Merge `update` into the stored record in one statement.
    ///
    /// Fields left as `None` keep their stored value; the ciphertext and salt
    /// are replaced together or not at all. Returns `false` when no record
    /// has this id.
    pub fn update(&self, id: i64, update: &CredentialUpdate) -> Result<bool> {
        check_id(id)?;
        update.validate()?;

        let (ciphertext, salt) = match &update.secret {
            Some(secret) => (Some(secret.ciphertext()), Some(secret.salt())),
            None => (None, None),
        };

        let changed = self.conn.execute(
            "UPDATE credentials SET
                 title    = COALESCE(?1, title),
                 username = COALESCE(?2, username),
                 email    = COALESCE(?3, email),
                 password = COALESCE(?4, password),
                 salt     = COALESCE(?5, salt)
             WHERE id = ?6",
            params![
                update.title.as_deref(),
                update.username.as_deref().and_then(non_empty),
                update.email.as_deref().and_then(non_empty),
                ciphertext,
                salt,
                id
            ],
        )?;
        debug!(id, changed, rekeyed = update.secret.is_some(), "credential update");
        Ok(changed > 0)
    }

    /// Case-sensitive substring search. An empty argument matches every row.
    pub fn filter(&self, title: &str, username: &str, email: &str) -> Result<Vec<Credential>> {
        self.query(
            &format!(
                "{SELECT_COLUMNS}
                 WHERE (?1 = '' OR instr(title, ?1) > 0)
                   AND (?2 = '' OR instr(username, ?2) > 0)
                   AND (?3 = '' OR instr(email, ?3) > 0)
                 ORDER BY id"
            ),
            params![title, username, email],
        )
    }

    /// Run an arbitrary single statement and return its rows.
    ///
    /// Any engine failure is `VaultError::Fatal`; the caller's top-level
    /// boundary is expected to abort on it.
    pub fn execute_raw(&self, query: &str) -> Result<Vec<Vec<Value>>> {
        if query.trim().is_empty() {
            return Err(VaultError::invalid("query cannot be empty"));
        }

        let fatal = |source: rusqlite::Error| {
            warn!(error = %source, "raw query failed");
            VaultError::Fatal {
                query: query.to_owned(),
                source,
            }
        };

        let mut stmt = self.conn.prepare(query).map_err(fatal)?;
        let columns = stmt.column_count();
        let mut rows = stmt.query([]).map_err(fatal)?;

        let mut out = Vec::new();
        while let Some(row) = rows.next().map_err(fatal)? {
            let values = (0..columns)
                .map(|i| row.get::<_, Value>(i))
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(fatal)?;
            out.push(values);
        }
        Ok(out)
    }

    /// Replace every record's sealed pair inside one transaction.
    ///
    /// `reseal` receives each record in id order; an error from it rolls the
    /// whole batch back. Returns the number of records rewritten.
    pub fn rekey_with<F>(&mut self, mut reseal: F) -> Result<usize>
    where
        F: FnMut(&Credential) -> Result<SealedSecret>,
    {
        let tx = self.conn.transaction()?;
        let records = {
            let mut stmt = tx.prepare(&format!("{SELECT_COLUMNS} ORDER BY id"))?;
            let mut rows = stmt.query([])?;
            let mut out = Vec::new();
            while let Some(row) = rows.next()? {
                out.push(Credential::from_row(row)?);
            }
            out
        };

        for record in &records {
            let secret = reseal(record)?;
            tx.execute(
                "UPDATE credentials SET password = ?1, salt = ?2 WHERE id = ?3",
                params![secret.ciphertext(), secret.salt(), record.id],
            )?;
        }

        tx.commit()?;
        debug!(count = records.len(), "credentials rekeyed");
        Ok(records.len())
    }

    fn query<P: Params>(&self, sql: &str, params: P) -> Result<Vec<Credential>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            out.push(Credential::from_row(row)?);
        }
        Ok(out)
    }
}

fn check_id(id: i64) -> Result<()> {
    if id <= 0 {
        return Err(VaultError::invalid(format!(
            "invalid value provided for 'id': {id}"
        )));
    }
    Ok(())
}
