// src/rotate_keys.rs
//! In-place master password change
//!
//! Counterpart of export + import for a vault that stays where it is: every
//! record is re-encrypted inside one transaction, so the store never holds
//! ciphertext under two different master passwords.

use tracing::info;

use crate::aliases::MasterPassword;
use crate::cancel::CancelToken;
use crate::crypto::{reseal, Cipher};
use crate::db::CredentialStore;
use crate::error::{Result, VaultError};

/// Re-encrypt every stored credential from `old_master` to `new_master`.
///
/// All-or-nothing: any decrypt failure or a cancellation rolls back the whole
/// batch. Returns the number of records rewritten.
pub fn rekey_store<C: Cipher + ?Sized>(
    store: &mut CredentialStore,
    cipher: &C,
    old_master: &MasterPassword,
    new_master: &MasterPassword,
    cancel: &CancelToken,
) -> Result<usize> {
    let count = store.rekey_with(|cred| {
        // Rolled back, so nothing took effect
        cancel.check(0)?;
        reseal(
            cipher,
            old_master,
            new_master,
            &cred.encrypted_password,
            &cred.salt,
        )
        .map_err(|e| match e {
            VaultError::Crypto(msg) => {
                VaultError::Crypto(format!("credential {} ({}): {msg}", cred.id, cred.title))
            }
            other => other,
        })
    })?;

    info!(count, "Master password changed");
    Ok(count)
}
