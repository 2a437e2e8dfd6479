//! Cooperative cancellation for long merge loops.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Shared flag polled between merge iterations.
///
/// Clones observe the same flag, so one handle can be moved to another thread
/// while the run holds the other.
///
/// # Examples
/// ```
/// use sylva_core::CancellationToken;
///
/// let token = CancellationToken::new();
/// let remote = token.clone();
/// assert!(!token.is_cancelled());
/// remote.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a token that has not been cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Returns whether cancellation was requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}
