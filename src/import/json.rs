// src/import/json.rs
use std::path::Path;

use tracing::{info, trace, warn};

use crate::aliases::MasterPassword;
use crate::cancel::CancelToken;
use crate::crypto::{reseal, Cipher};
use crate::db::CredentialStore;
use crate::error::{Result, VaultError};
use crate::transport::{read_transport, TransportRecord};

/// One transport record that could not be migrated
#[derive(Debug)]
pub struct ImportFailure {
    /// Position in the transport file
    pub index: usize,
    pub title: String,
    pub error: VaultError,
}

/// Outcome of an import
#[derive(Debug, Default)]
pub struct ImportReport {
    pub total: usize,
    pub imported: usize,
    pub failures: Vec<ImportFailure>,
}

impl ImportReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && self.imported == self.total
    }
}

/// Import every record from `path`, re-encrypting from `old_master` to
/// `new_master`, and add each one to the store with a fresh id.
///
/// Records are independent: a bad record is reported in
/// [`ImportReport::failures`] and the rest continue. Storage faults abort.
/// Each added record is committed immediately, so re-running an interrupted
/// import duplicates the prefix that already went in.
pub fn import_from_json<C: Cipher + ?Sized>(
    store: &CredentialStore,
    cipher: &C,
    old_master: &MasterPassword,
    new_master: &MasterPassword,
    path: impl AsRef<Path>,
    cancel: &CancelToken,
) -> Result<ImportReport> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(VaultError::invalid("invalid value provided for 'filename'"));
    }
    if !path.is_file() {
        return Err(VaultError::SourceNotFound(path.to_path_buf()));
    }

    let records = read_transport(path)?;
    if records.is_empty() {
        info!(path = %path.display(), "No credentials to import");
        return Ok(ImportReport::default());
    }

    let mut report = ImportReport {
        total: records.len(),
        ..Default::default()
    };

    for (index, record) in records.iter().enumerate() {
        cancel.check(report.imported)?;

        if let Some(legacy_id) = record.id {
            trace!(index, legacy_id, "legacy id ignored, store assigns a new one");
        }

        match import_one(store, cipher, old_master, new_master, record) {
            Ok(id) => {
                trace!(index, id, "credential imported");
                report.imported += 1;
            }
            Err(error) if aborts_batch(&error) => return Err(error),
            Err(error) => {
                warn!(index, title = %record.title, %error, "Skipping credential");
                report.failures.push(ImportFailure {
                    index,
                    title: record.title.clone(),
                    error,
                });
            }
        }
    }

    info!(
        imported = report.imported,
        failed = report.failures.len(),
        "Import finished"
    );
    Ok(report)
}

fn import_one<C: Cipher + ?Sized>(
    store: &CredentialStore,
    cipher: &C,
    old_master: &MasterPassword,
    new_master: &MasterPassword,
    record: &TransportRecord,
) -> Result<i64> {
    let (ciphertext, salt) = record.decode_secret()?;
    let secret = reseal(cipher, old_master, new_master, &ciphertext, &salt)?;
    store.add_sealed(
        &record.title,
        Some(record.username.as_str()),
        Some(record.email.as_str()),
        &secret,
    )
}

fn aborts_batch(error: &VaultError) -> bool {
    matches!(
        error,
        VaultError::Storage(_)
            | VaultError::Connect { .. }
            | VaultError::Fatal { .. }
            | VaultError::Io(_)
    )
}
