use super::{Dissimilarity, helpers::validate_pair};
use crate::error::{DissimilarityError, VectorKind};

/// Cosine dissimilarity, `1 - cos(θ)`, in `[0, 2]`.
///
/// # Examples
/// ```
/// use sylva_core::{Cosine, Dissimilarity};
///
/// let orthogonal = Cosine.dissimilarity(&[1.0_f32, 0.0][..], &[0.0, 1.0][..])?;
/// assert!((orthogonal - 1.0).abs() < 1e-12);
/// # Ok::<(), sylva_core::DissimilarityError>(())
/// ```
///
/// # Errors
/// Besides the shared validation errors, fails with
/// [`DissimilarityError::ZeroMagnitude`] when either vector has zero norm.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cosine;

impl<T: Copy + Into<f64>> Dissimilarity<[T]> for Cosine {
    fn dissimilarity(&self, left: &[T], right: &[T]) -> Result<f64, DissimilarityError> {
        let (left, right) = validate_pair(left, right)?;

        let mut dot = 0.0_f64;
        let mut left_squares = 0.0_f64;
        let mut right_squares = 0.0_f64;
        for (l, r) in left.components().zip(right.components()) {
            dot += l * r;
            left_squares += l * l;
            right_squares += r * r;
        }

        if left_squares == 0.0 {
            return Err(DissimilarityError::ZeroMagnitude {
                which: VectorKind::Left,
            });
        }
        if right_squares == 0.0 {
            return Err(DissimilarityError::ZeroMagnitude {
                which: VectorKind::Right,
            });
        }

        // Rounding can push the ratio marginally outside [-1, 1].
        let similarity = (dot / (left_squares.sqrt() * right_squares.sqrt())).clamp(-1.0, 1.0);
        Ok(1.0 - similarity)
    }
}
