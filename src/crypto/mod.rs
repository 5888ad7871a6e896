// src/crypto/mod.rs
//! Encryption gateway
//!
//! The store never decrypts anything; it only persists what a [`Cipher`]
//! produced. Any implementation must bind the ciphertext to the salt it was
//! given, so that decrypting with a different salt fails.

use aescrypt_rs::aliases::Password;
use rand::RngCore;

use crate::aliases::{MasterPassword, PlainText};
use crate::consts::{DEFAULT_KDF_ITERATIONS, SALT_LEN};
use crate::error::Result;
use crate::record::SealedSecret;

pub mod decrypt;
pub mod encrypt;
pub mod rotate;

pub use decrypt::decrypt_to_vec;
pub use encrypt::encrypt_to_vec;
pub use rotate::reseal;

/// `encrypt`/`decrypt` under a master password and a per-record salt
pub trait Cipher {
    fn encrypt(&self, master: &MasterPassword, plaintext: &PlainText, salt: &[u8])
        -> Result<Vec<u8>>;

    fn decrypt(&self, master: &MasterPassword, ciphertext: &[u8], salt: &[u8])
        -> Result<PlainText>;
}

/// AES-Crypt v3 container keyed by `master ":" hex(salt)`
#[derive(Debug, Clone, Copy)]
pub struct AesCryptCipher {
    kdf_iterations: u32,
}

impl AesCryptCipher {
    pub fn new(kdf_iterations: u32) -> Self {
        Self { kdf_iterations }
    }

    fn passphrase(master: &MasterPassword, salt: &[u8]) -> Password {
        Password::new(format!("{}:{}", master.expose_secret(), hex::encode(salt)))
    }
}

impl Default for AesCryptCipher {
    fn default() -> Self {
        Self::new(DEFAULT_KDF_ITERATIONS)
    }
}

impl Cipher for AesCryptCipher {
    fn encrypt(
        &self,
        master: &MasterPassword,
        plaintext: &PlainText,
        salt: &[u8],
    ) -> Result<Vec<u8>> {
        encrypt_to_vec(
            plaintext,
            &Self::passphrase(master, salt),
            self.kdf_iterations,
        )
    }

    fn decrypt(
        &self,
        master: &MasterPassword,
        ciphertext: &[u8],
        salt: &[u8],
    ) -> Result<PlainText> {
        decrypt_to_vec(ciphertext, &Self::passphrase(master, salt))
    }
}

/// Fresh random salt for one encryption event
pub fn generate_salt() -> Vec<u8> {
    let mut salt = vec![0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    salt
}

/// Encrypt `plaintext` under a freshly generated salt
pub fn seal<C: Cipher + ?Sized>(
    cipher: &C,
    master: &MasterPassword,
    plaintext: &PlainText,
) -> Result<SealedSecret> {
    let salt = generate_salt();
    let ciphertext = cipher.encrypt(master, plaintext, &salt)?;
    SealedSecret::new(ciphertext, salt)
}
