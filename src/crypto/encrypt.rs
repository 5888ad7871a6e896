// src/crypto/encrypt.rs
use std::io::Cursor;

use aescrypt_rs::aliases::Password;
use aescrypt_rs::encrypt;

use crate::aliases::PlainText;
use crate::error::VaultError;

/// Encrypt plaintext → AES-Crypt v3 ciphertext (in-memory)
pub fn encrypt_to_vec(
    plaintext: &PlainText,
    password: &Password,
    kdf_iterations: u32,
) -> Result<Vec<u8>, VaultError> {
    let mut out = Vec::new();
    encrypt(
        Cursor::new(plaintext.expose_secret().as_slice()),
        &mut out,
        password,
        kdf_iterations,
    )?;
    Ok(out)
}
