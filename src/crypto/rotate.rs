// src/crypto/rotate.rs
use crate::aliases::MasterPassword;
use crate::error::Result;
use crate::record::SealedSecret;

use super::Cipher;

/// Re-encrypt one sealed pair under a new master password.
///
/// The salt travels unchanged: decrypting needed it, and the new ciphertext
/// is bound to it too. Plaintext is dropped (and zeroized) before returning.
pub fn reseal<C: Cipher + ?Sized>(
    cipher: &C,
    old_master: &MasterPassword,
    new_master: &MasterPassword,
    ciphertext: &[u8],
    salt: &[u8],
) -> Result<SealedSecret> {
    let plaintext = cipher.decrypt(old_master, ciphertext, salt)?;
    let new_ciphertext = cipher.encrypt(new_master, &plaintext, salt)?;
    SealedSecret::new(new_ciphertext, salt.to_vec())
}
