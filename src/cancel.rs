// src/cancel.rs
//! Cooperative cancellation for long-running pipeline operations

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{Result, VaultError};

/// Cloneable flag checked between records. Cancelling one clone cancels all.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// `Err(Cancelled)` once cancelled; `completed` is what already took effect
    pub(crate) fn check(&self, completed: usize) -> Result<()> {
        if self.is_cancelled() {
            return Err(VaultError::Cancelled { completed });
        }
        Ok(())
    }
}
