// src/crypto/decrypt.rs
use std::io::Cursor;

use aescrypt_rs::aliases::Password;
use aescrypt_rs::decrypt;

use crate::aliases::PlainText;
use crate::error::VaultError;

/// Decrypt AES-Crypt ciphertext → plaintext (in-memory)
pub fn decrypt_to_vec(ciphertext: &[u8], password: &Password) -> Result<PlainText, VaultError> {
    let mut out = Vec::new();
    decrypt(Cursor::new(ciphertext), &mut out, password)?;
    Ok(PlainText::new(out))
}
