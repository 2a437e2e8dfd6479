//! Euclidean-family and Manhattan measures.

use super::{
    Dissimilarity,
    helpers::{differences, validate_pair},
};
use crate::error::DissimilarityError;

/// Straight-line (L2) distance.
///
/// # Examples
/// ```
/// use sylva_core::{Dissimilarity, Euclidean};
///
/// let d = Euclidean.dissimilarity(&[1.0_f64, 2.0, 3.0][..], &[4.0, 6.0, 8.0][..])?;
/// assert!((d - 7.071_067_811).abs() < 1e-6);
/// # Ok::<(), sylva_core::DissimilarityError>(())
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Euclidean;

/// Squared L2 distance. Preserves the single-link merge order of
/// [`Euclidean`] while skipping the square root; heights are squared.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SquaredEuclidean;

/// City-block (L1) distance.
///
/// # Examples
/// ```
/// use sylva_core::{Dissimilarity, Manhattan};
///
/// let d = Manhattan.dissimilarity(&[0_u8, 0][..], &[3, 4][..])?;
/// assert_eq!(d, 7.0);
/// # Ok::<(), sylva_core::DissimilarityError>(())
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Manhattan;

fn squared_sum<T: Copy + Into<f64>>(left: &[T], right: &[T]) -> Result<f64, DissimilarityError> {
    let (left, right) = validate_pair(left, right)?;
    Ok(differences(left, right).map(|diff| diff * diff).sum())
}

impl<T: Copy + Into<f64>> Dissimilarity<[T]> for Euclidean {
    fn dissimilarity(&self, left: &[T], right: &[T]) -> Result<f64, DissimilarityError> {
        squared_sum(left, right).map(f64::sqrt)
    }
}

impl<T: Copy + Into<f64>> Dissimilarity<[T]> for SquaredEuclidean {
    fn dissimilarity(&self, left: &[T], right: &[T]) -> Result<f64, DissimilarityError> {
        squared_sum(left, right)
    }
}

impl<T: Copy + Into<f64>> Dissimilarity<[T]> for Manhattan {
    fn dissimilarity(&self, left: &[T], right: &[T]) -> Result<f64, DissimilarityError> {
        let (left, right) = validate_pair(left, right)?;
        Ok(differences(left, right).map(f64::abs).sum())
    }
}
