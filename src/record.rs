// src/record.rs
//! Credential record value types
//!
//! `Credential` is built once at the storage boundary from named columns;
//! nothing downstream indexes rows positionally. The ciphertext and its salt
//! only ever move together as a [`SealedSecret`].

use rusqlite::types::Value;
use rusqlite::Row;

use crate::error::{Result, VaultError};

/// One stored entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub id: i64,
    pub title: String,
    pub username: Option<String>,
    pub email: Option<String>,
    pub encrypted_password: Vec<u8>,
    pub salt: Vec<u8>,
}

impl Credential {
    /// Number of columns a credential row carries
    pub const FIELD_COUNT: usize = 6;

    /// Decode a row selected as `id, title, username, email, password, salt`
    pub fn from_row(row: &Row<'_>) -> Result<Self> {
        let malformed = |e: rusqlite::Error| VaultError::MalformedRecord(e.to_string());
        Ok(Self {
            id: row.get("id").map_err(malformed)?,
            title: row.get("title").map_err(malformed)?,
            username: row.get("username").map_err(malformed)?,
            email: row.get("email").map_err(malformed)?,
            encrypted_password: row.get("password").map_err(malformed)?,
            salt: row.get("salt").map_err(malformed)?,
        })
    }

    /// The ciphertext together with the salt it was produced with
    pub fn sealed(&self) -> SealedSecret {
        SealedSecret {
            ciphertext: self.encrypted_password.clone(),
            salt: self.salt.clone(),
        }
    }
}

/// Positional decoding for rows coming back from `execute_raw`
impl TryFrom<Vec<Value>> for Credential {
    type Error = VaultError;

    fn try_from(values: Vec<Value>) -> Result<Self> {
        if values.len() != Self::FIELD_COUNT {
            return Err(VaultError::MalformedRecord(format!(
                "expected {} fields, got {}",
                Self::FIELD_COUNT,
                values.len()
            )));
        }

        let mut it = values.into_iter();
        let mut next = || it.next().unwrap_or(Value::Null);

        let id = match next() {
            Value::Integer(id) => id,
            other => return Err(unexpected("id", &other)),
        };
        let title = match next() {
            Value::Text(t) => t,
            other => return Err(unexpected("title", &other)),
        };
        let username = optional_text("username", next())?;
        let email = optional_text("email", next())?;
        let encrypted_password = match next() {
            Value::Blob(b) => b,
            other => return Err(unexpected("password", &other)),
        };
        let salt = match next() {
            Value::Blob(b) => b,
            other => return Err(unexpected("salt", &other)),
        };

        Ok(Self {
            id,
            title,
            username,
            email,
            encrypted_password,
            salt,
        })
    }
}

fn optional_text(field: &str, value: Value) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::Text(t) => Ok(Some(t)),
        other => Err(unexpected(field, &other)),
    }
}

fn unexpected(field: &str, value: &Value) -> VaultError {
    VaultError::MalformedRecord(format!(
        "column `{field}` has unexpected type {:?}",
        value.data_type()
    ))
}

/// Ciphertext plus the salt of the encryption event that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedSecret {
    ciphertext: Vec<u8>,
    salt: Vec<u8>,
}

impl SealedSecret {
    pub fn new(ciphertext: Vec<u8>, salt: Vec<u8>) -> Result<Self> {
        if ciphertext.is_empty() {
            return Err(VaultError::invalid("encrypted password cannot be empty"));
        }
        if salt.is_empty() {
            return Err(VaultError::invalid("salt cannot be empty"));
        }
        Ok(Self { ciphertext, salt })
    }

    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    pub fn into_parts(self) -> (Vec<u8>, Vec<u8>) {
        (self.ciphertext, self.salt)
    }
}

/// Partial update: `None` keeps the stored value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialUpdate {
    pub title: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub secret: Option<SealedSecret>,
}

impl CredentialUpdate {
    /// Build from the flat "empty means keep" call shape.
    ///
    /// Supplying exactly one of `encrypted_password`/`salt` is rejected: a
    /// ciphertext is only meaningful with the salt it was encrypted with.
    pub fn from_parts(
        title: &str,
        username: &str,
        email: &str,
        encrypted_password: &[u8],
        salt: &[u8],
    ) -> Result<Self> {
        let secret = match (encrypted_password.is_empty(), salt.is_empty()) {
            (true, true) => None,
            (false, false) => Some(SealedSecret::new(
                encrypted_password.to_vec(),
                salt.to_vec(),
            )?),
            _ => {
                return Err(VaultError::invalid(
                    "encrypted password and salt must be replaced together",
                ))
            }
        };

        Ok(Self {
            title: non_empty(title),
            username: non_empty(username),
            email: non_empty(email),
            secret,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.username.is_none()
            && self.email.is_none()
            && self.secret.is_none()
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if matches!(self.title.as_deref(), Some(t) if t.is_empty()) {
            return Err(VaultError::invalid("title cannot be empty"));
        }
        Ok(())
    }
}

pub(crate) fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_row() -> Vec<Value> {
        vec![
            Value::Integer(7),
            Value::Text("Bank".into()),
            Value::Text("alice".into()),
            Value::Null,
            Value::Blob(vec![1, 2, 3]),
            Value::Blob(vec![9, 9]),
        ]
    }

    #[test]
    fn raw_row_with_six_fields_decodes() {
        let cred = Credential::try_from(raw_row()).unwrap();
        assert_eq!(cred.id, 7);
        assert_eq!(cred.title, "Bank");
        assert_eq!(cred.username.as_deref(), Some("alice"));
        assert_eq!(cred.email, None);
        assert_eq!(cred.sealed().ciphertext(), &[1, 2, 3]);
        assert_eq!(cred.sealed().salt(), &[9, 9]);
    }

    #[test]
    fn short_row_is_malformed() {
        let mut row = raw_row();
        row.pop();
        assert!(matches!(
            Credential::try_from(row),
            Err(VaultError::MalformedRecord(_))
        ));
    }

    #[test]
    fn wrongly_typed_salt_is_malformed() {
        let mut row = raw_row();
        row[5] = Value::Text("not bytes".into());
        assert!(matches!(
            Credential::try_from(row),
            Err(VaultError::MalformedRecord(_))
        ));
    }

    #[test]
    fn half_pair_is_rejected() {
        let only_ct = CredentialUpdate::from_parts("", "", "", b"ct", b"");
        let only_salt = CredentialUpdate::from_parts("", "", "", b"", b"salt");
        assert!(matches!(only_ct, Err(VaultError::InvalidArgument(_))));
        assert!(matches!(only_salt, Err(VaultError::InvalidArgument(_))));
    }

    #[test]
    fn empty_parts_mean_keep() {
        let update = CredentialUpdate::from_parts("", "", "", b"", b"").unwrap();
        assert!(update.is_empty());

        let update = CredentialUpdate::from_parts("New", "", "", b"", b"").unwrap();
        assert_eq!(update.title.as_deref(), Some("New"));
        assert!(update.secret.is_none());
    }

    #[test]
    fn explicit_empty_title_fails_validation() {
        let update = CredentialUpdate {
            title: Some(String::new()),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }
}
