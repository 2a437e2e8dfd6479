//! Benchmark setup error type.
//!
//! Lets setup functions propagate failures with `?` instead of `.expect()`.

use crate::source::SyntheticError;
use sylva_core::LinkageError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic data generation failed.
    #[error("synthetic data generation failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// Configuring or running the linkage failed.
    #[error("linkage failed: {0}")]
    Linkage(#[from] LinkageError),
}
