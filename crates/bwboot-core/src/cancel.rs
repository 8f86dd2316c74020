use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::BootstrapError;

/// Cooperative cancellation signal shared between the caller and the
/// bootstrap flow. Cloning hands out another handle to the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Errors with `Cancelled` once the signal has fired. Checked between
    /// stages and per streamed chunk so a cancel lands promptly.
    pub fn ensure_active(&self) -> Result<(), BootstrapError> {
        if self.is_cancelled() {
            return Err(BootstrapError::Cancelled);
        }
        Ok(())
    }
}
