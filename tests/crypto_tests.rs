//! tests/crypto_tests.rs
//! AES-Crypt backed cipher and salt handling

mod support;
use support::{master, plain};

use credential_vault::consts::{AESCRYPT_V3_HEADER, SALT_LEN};
use credential_vault::crypto::reseal;
use credential_vault::{generate_salt, seal, AesCryptCipher, Cipher, VaultError};

// Keeps the suite fast; production default is far higher
const TEST_ITERATIONS: u32 = 10_000;

fn cipher() -> AesCryptCipher {
    AesCryptCipher::new(TEST_ITERATIONS)
}

#[test]
fn encrypt_decrypt_roundtrip_in_memory() {
    let salt = generate_salt();
    let ct = cipher()
        .encrypt(&master("m"), &plain("Attack at dawn!"), &salt)
        .unwrap();
    let pt = cipher().decrypt(&master("m"), &ct, &salt).unwrap();

    assert_eq!(pt.expose_secret().as_slice(), b"Attack at dawn!");
}

#[test]
fn ciphertext_is_aescrypt_v3() {
    let ct = cipher()
        .encrypt(&master("m"), &plain("small"), &generate_salt())
        .unwrap();
    assert_eq!(&ct[..5], AESCRYPT_V3_HEADER);
}

#[test]
fn decrypt_fails_with_wrong_master() {
    let salt = generate_salt();
    let ct = cipher().encrypt(&master("right"), &plain("secret"), &salt).unwrap();

    let wrong = cipher().decrypt(&master("wrong"), &ct, &salt);
    assert!(matches!(wrong, Err(VaultError::Crypto(_))));
}

#[test]
fn decrypt_fails_with_salt_from_another_record() {
    let ct = cipher()
        .encrypt(&master("m"), &plain("secret"), &generate_salt())
        .unwrap();

    let other_salt = generate_salt();
    assert!(cipher().decrypt(&master("m"), &ct, &other_salt).is_err());
}

#[test]
fn seal_generates_fresh_salt_each_time() {
    let a = seal(&cipher(), &master("m"), &plain("same")).unwrap();
    let b = seal(&cipher(), &master("m"), &plain("same")).unwrap();

    assert_eq!(a.salt().len(), SALT_LEN);
    assert_ne!(a.salt(), b.salt());
    assert_ne!(a.ciphertext(), b.ciphertext());
}

#[test]
fn reseal_moves_plaintext_to_new_master_and_keeps_salt() {
    let original = seal(&cipher(), &master("old"), &plain("hunter2")).unwrap();

    let moved = reseal(
        &cipher(),
        &master("old"),
        &master("new"),
        original.ciphertext(),
        original.salt(),
    )
    .unwrap();

    assert_eq!(moved.salt(), original.salt());
    let pt = cipher()
        .decrypt(&master("new"), moved.ciphertext(), moved.salt())
        .unwrap();
    assert_eq!(pt.expose_secret().as_slice(), b"hunter2");
    assert!(cipher()
        .decrypt(&master("old"), moved.ciphertext(), moved.salt())
        .is_err());
}
