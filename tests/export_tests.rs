//! tests/export_tests.rs
//! Export to the flat JSON transport format

mod common;
mod support;
use support::{sealed, TestVault};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use credential_vault::{export_to_json, CancelToken, VaultError};
use serde_json::Value;
use std::fs;

#[test]
fn empty_vault_exports_nothing_and_writes_no_file() {
    common::setup();
    let vault = TestVault::new();
    let out = vault.path().join("out.json");

    let summary = export_to_json(&vault.store, &out, &CancelToken::new()).expect("export");

    assert_eq!(summary.count, 0);
    assert!(summary.blake3.is_none());
    assert!(!out.exists());
}

#[test]
fn export_contains_base64_pair_and_no_ids() {
    common::setup();
    let vault = TestVault::new();
    let bank = sealed("master", "hunter2");
    vault.add("Bank", "alice", "a@x.com", &bank);
    vault
        .store
        .add("Wifi", None, None, &[0xde, 0xad], &[0xbe, 0xef])
        .unwrap();

    let out = vault.path().join("vault-export.json");
    let summary = export_to_json(&vault.store, &out, &CancelToken::new()).expect("export");
    assert_eq!(summary.count, 2);

    let bytes = fs::read(&out).unwrap();
    assert_eq!(
        summary.blake3.as_deref(),
        Some(blake3::hash(&bytes).to_hex().as_str())
    );

    let json: Value = serde_json::from_slice(&bytes).unwrap();
    let entries = json.as_array().expect("top level is an array");
    assert_eq!(entries.len(), 2);

    let first = &entries[0];
    assert!(first.get("id").is_none());
    assert_eq!(first["title"], "Bank");
    assert_eq!(first["username"], "alice");
    assert_eq!(first["email"], "a@x.com");
    assert_eq!(
        STANDARD.decode(first["password"].as_str().unwrap()).unwrap(),
        bank.ciphertext()
    );
    assert_eq!(
        STANDARD.decode(first["salt"].as_str().unwrap()).unwrap(),
        bank.salt()
    );

    let second = &entries[1];
    assert_eq!(second["username"], "");
    assert_eq!(second["email"], "");
    assert_eq!(second["password"], "3q0=");
    assert_eq!(second["salt"], "vu8=");
}

#[test]
fn export_overwrites_previous_file() {
    let vault = TestVault::new();
    let out = vault.path().join("out.json");
    fs::write(&out, "stale").unwrap();

    vault.add("Bank", "alice", "a@x.com", &sealed("m", "pw"));
    export_to_json(&vault.store, &out, &CancelToken::new()).unwrap();

    let json: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 1);
}

#[test]
fn cancelled_export_writes_nothing() {
    let vault = TestVault::new();
    vault.add("Bank", "alice", "a@x.com", &sealed("m", "pw"));
    let out = vault.path().join("out.json");

    let cancel = CancelToken::new();
    cancel.cancel();
    let result = export_to_json(&vault.store, &out, &cancel);

    assert!(matches!(result, Err(VaultError::Cancelled { completed: 0 })));
    assert!(!out.exists());
}

#[test]
fn export_rejects_empty_destination() {
    let vault = TestVault::new();
    assert!(matches!(
        export_to_json(&vault.store, "", &CancelToken::new()),
        Err(VaultError::InvalidArgument(_))
    ));
}
