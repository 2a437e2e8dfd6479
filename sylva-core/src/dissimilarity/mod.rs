//! Dissimilarity oracles.
//!
//! The engine treats a dissimilarity as a pure function of two feature
//! vectors. Plain closures qualify through a blanket implementation; the
//! built-in measures validate their inputs and report detailed errors so the
//! orchestrator can name the offending instance pair.

mod cosine;
mod helpers;
mod minkowski;

pub use self::cosine::Cosine;
pub use self::minkowski::{Euclidean, Manhattan, SquaredEuclidean};

use crate::error::DissimilarityError;

/// A symmetric, non-negative dissimilarity between two feature vectors.
///
/// The engine does not enforce symmetry, but its output is only meaningful
/// when `d(a, b) == d(b, a)` holds. Values that are NaN, infinite, or negative
/// are rejected by the orchestrator.
///
/// # Examples
/// ```
/// use sylva_core::{Dissimilarity, Euclidean};
///
/// let absolute = |a: &f64, b: &f64| (a - b).abs();
/// assert_eq!(absolute.dissimilarity(&1.0, &4.0)?, 3.0);
///
/// let distance = Euclidean.dissimilarity(&[0.0_f32, 0.0][..], &[3.0, 4.0][..])?;
/// assert!((distance - 5.0).abs() < 1e-12);
/// # Ok::<(), sylva_core::DissimilarityError>(())
/// ```
pub trait Dissimilarity<F: ?Sized> {
    /// Computes the dissimilarity between `left` and `right`.
    ///
    /// # Errors
    /// Returns [`DissimilarityError`] when the inputs cannot be compared.
    fn dissimilarity(&self, left: &F, right: &F) -> Result<f64, DissimilarityError>;
}

impl<F, Func> Dissimilarity<F> for Func
where
    F: ?Sized,
    Func: Fn(&F, &F) -> f64,
{
    fn dissimilarity(&self, left: &F, right: &F) -> Result<f64, DissimilarityError> {
        Ok(self(left, right))
    }
}
