// tests/support.rs
//! Test utilities: isolated on-disk vaults and a fast deterministic cipher

use std::path::Path;

use credential_vault::{
    Cipher, ConnectParams, CredentialStore, MasterPassword, PlainText, Result, SealedSecret,
    VaultError,
};
use tempfile::TempDir;

pub const DB_USER: &str = "tester";
pub const DB_PASSWORD: &str = "test-vault-secret-2025";

/// A store living in its own temporary directory
#[allow(dead_code)]
pub struct TestVault {
    pub store: CredentialStore,
    dir: TempDir,
}

#[allow(dead_code)]
impl TestVault {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let store = CredentialStore::open(&params_for(dir.path())).expect("open store");
        Self { store, dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Second, independent connection to the same database file
    pub fn reopen(&self) -> CredentialStore {
        CredentialStore::open(&params_for(self.dir.path())).expect("reopen store")
    }

    pub fn add(&self, title: &str, username: &str, email: &str, secret: &SealedSecret) -> i64 {
        self.store
            .add_sealed(title, Some(username), Some(email), secret)
            .expect("add credential")
    }
}

#[allow(dead_code)]
pub fn params_for(dir: &Path) -> ConnectParams {
    ConnectParams::new(dir.to_str().unwrap(), DB_USER, DB_PASSWORD, None).expect("params")
}

#[allow(dead_code)]
pub fn master(s: &str) -> MasterPassword {
    MasterPassword::new(s.to_owned())
}

#[allow(dead_code)]
pub fn plain(s: &str) -> PlainText {
    PlainText::new(s.as_bytes().to_vec())
}

/// Deterministic stand-in for the real cipher.
///
/// XORs with a BLAKE3 keystream of `master || salt` and appends an 8-byte tag
/// so that a wrong master or salt is detected, like a real AEAD would.
#[allow(dead_code)]
#[derive(Debug, Default, Clone, Copy)]
pub struct XorCipher;

#[allow(dead_code)]
const TAG_LEN: usize = 8;

#[allow(dead_code)]
impl XorCipher {
    fn keystream(master: &MasterPassword, salt: &[u8], len: usize) -> Vec<u8> {
        let mut hasher = blake3::Hasher::new();
        hasher.update(master.expose_secret().as_bytes());
        hasher.update(b"|");
        hasher.update(salt);
        let mut out = vec![0u8; len];
        hasher.finalize_xof().fill(&mut out);
        out
    }

    fn tag(master: &MasterPassword, salt: &[u8], plaintext: &[u8]) -> [u8; TAG_LEN] {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"tag|");
        hasher.update(master.expose_secret().as_bytes());
        hasher.update(b"|");
        hasher.update(salt);
        hasher.update(b"|");
        hasher.update(plaintext);
        let mut tag = [0u8; TAG_LEN];
        tag.copy_from_slice(&hasher.finalize().as_bytes()[..TAG_LEN]);
        tag
    }
}

impl Cipher for XorCipher {
    fn encrypt(
        &self,
        master: &MasterPassword,
        plaintext: &PlainText,
        salt: &[u8],
    ) -> Result<Vec<u8>> {
        let pt = plaintext.expose_secret();
        let ks = Self::keystream(master, salt, pt.len());
        let mut out: Vec<u8> = pt.iter().zip(&ks).map(|(p, k)| p ^ k).collect();
        out.extend_from_slice(&Self::tag(master, salt, pt));
        Ok(out)
    }

    fn decrypt(
        &self,
        master: &MasterPassword,
        ciphertext: &[u8],
        salt: &[u8],
    ) -> Result<PlainText> {
        if ciphertext.len() < TAG_LEN {
            return Err(VaultError::Crypto("ciphertext too short".into()));
        }
        let (body, tag) = ciphertext.split_at(ciphertext.len() - TAG_LEN);
        let ks = Self::keystream(master, salt, body.len());
        let pt: Vec<u8> = body.iter().zip(&ks).map(|(c, k)| c ^ k).collect();
        if Self::tag(master, salt, &pt).as_slice() != tag {
            return Err(VaultError::Crypto("authentication failed".into()));
        }
        Ok(PlainText::new(pt))
    }
}

/// Seal `password` under `master` with the test cipher
#[allow(dead_code)]
pub fn sealed(master_pw: &str, password: &str) -> SealedSecret {
    credential_vault::seal(&XorCipher, &master(master_pw), &plain(password)).expect("seal")
}

/// Decrypt a stored pair with the test cipher into a `String`
#[allow(dead_code)]
pub fn open_secret(master_pw: &str, ciphertext: &[u8], salt: &[u8]) -> Result<String> {
    let pt = XorCipher.decrypt(&master(master_pw), ciphertext, salt)?;
    Ok(String::from_utf8(pt.expose_secret().clone()).expect("utf8"))
}
