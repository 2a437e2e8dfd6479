//! Shared validation for the built-in measures.

use crate::error::{DissimilarityError, VectorKind};

/// Validated, non-empty, finite feature slice.
#[derive(Clone, Copy, Debug)]
pub(super) struct Vector<'a, T>(&'a [T]);

impl<'a, T: Copy + Into<f64>> Vector<'a, T> {
    pub(super) fn new(values: &'a [T], which: VectorKind) -> Result<Self, DissimilarityError> {
        if values.is_empty() {
            return Err(DissimilarityError::ZeroLength);
        }
        for (index, value) in values.iter().copied().map(Into::into).enumerate() {
            if !value.is_finite() {
                return Err(DissimilarityError::NonFinite {
                    which,
                    index,
                    value,
                });
            }
        }
        Ok(Self(values))
    }

    pub(super) const fn dimension(self) -> usize {
        self.0.len()
    }

    pub(super) fn components(self) -> impl Iterator<Item = f64> + 'a {
        self.0.iter().copied().map(Into::into)
    }
}

/// Validates both arguments and ensures they share a dimension.
pub(super) fn validate_pair<'a, T: Copy + Into<f64>>(
    left: &'a [T],
    right: &'a [T],
) -> Result<(Vector<'a, T>, Vector<'a, T>), DissimilarityError> {
    let left = Vector::new(left, VectorKind::Left)?;
    let right = Vector::new(right, VectorKind::Right)?;
    if left.dimension() != right.dimension() {
        return Err(DissimilarityError::DimensionMismatch {
            left: left.dimension(),
            right: right.dimension(),
        });
    }
    Ok((left, right))
}

/// Iterates the component-wise differences of two validated vectors.
pub(super) fn differences<'a, T: Copy + Into<f64> + 'a>(
    left: Vector<'a, T>,
    right: Vector<'a, T>,
) -> impl Iterator<Item = f64> + 'a {
    left.components().zip(right.components()).map(|(l, r)| l - r)
}
