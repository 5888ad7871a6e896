// src/import/mod.rs
//! Import from the transport format with re-encryption under a new master
//! password

pub use json::{import_from_json, ImportFailure, ImportReport};

pub mod json;
