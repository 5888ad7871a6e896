// src/logging.rs
//! tracing-subscriber setup for binaries

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install a fmt subscriber. `RUST_LOG` wins over `default_filter`.
///
/// Idempotent and safe to call more than once.
pub fn init(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init()
        .ok();
}
