// src/export/json.rs
use std::path::Path;

use tracing::info;

use crate::cancel::CancelToken;
use crate::db::CredentialStore;
use crate::error::{Result, VaultError};
use crate::transport::{write_transport, TransportRecord};

/// Outcome of an export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub count: usize,
    /// BLAKE3 digest of the written file; `None` when nothing was written
    pub blake3: Option<String>,
}

/// Export every credential to `path` as a flat JSON array.
///
/// An empty vault is not an error: nothing is written and `count` is 0.
pub fn export_to_json(
    store: &CredentialStore,
    path: impl AsRef<Path>,
    cancel: &CancelToken,
) -> Result<ExportSummary> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(VaultError::invalid("invalid value provided for 'filename'"));
    }

    let credentials = store.get_all()?;
    if credentials.is_empty() {
        info!("No credentials to export");
        return Ok(ExportSummary {
            count: 0,
            blake3: None,
        });
    }

    let mut records = Vec::with_capacity(credentials.len());
    for cred in &credentials {
        // Nothing reaches disk before the final write
        cancel.check(0)?;
        records.push(TransportRecord::from_credential(cred));
    }

    let digest = write_transport(path, &records)?;
    info!(
        count = records.len(),
        path = %path.display(),
        blake3 = %digest,
        "Exported credentials"
    );

    Ok(ExportSummary {
        count: records.len(),
        blake3: Some(digest),
    })
}
