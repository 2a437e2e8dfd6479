//! Fixtures shared by the `sylva-core` integration tests.

use sylva_core::{DataContext, DataSet, DataSetError, Dissimilarity, DissimilarityError, VecDataSet};

/// Builds a one-dimensional data set from scalar positions.
#[must_use]
pub fn line(name: &str, positions: &[f64]) -> VecDataSet<f64> {
    VecDataSet::new(name, positions.iter().map(|&p| vec![p]).collect())
}

/// Data set that advertises more instances than it stores, so feature lookups
/// past the stored rows fail with [`DataSetError::OutOfBounds`].
pub struct Overreporting {
    pub rows: Vec<Vec<f64>>,
    pub claimed: usize,
}

impl DataSet for Overreporting {
    type Feature = [f64];
    type Context = DataContext;

    fn len(&self) -> usize {
        self.claimed
    }

    fn name(&self) -> &str {
        "overreporting"
    }

    fn feature(&self, index: usize) -> Result<&[f64], DataSetError> {
        self.rows
            .get(index)
            .map(Vec::as_slice)
            .ok_or(DataSetError::OutOfBounds { index })
    }

    fn context(&self) -> DataContext {
        DataContext::new(self.name())
    }
}

/// Oracle that fails for one unordered pair and measures `|a - b|` otherwise.
pub struct FailsOn {
    pub pair: (f64, f64),
}

impl Dissimilarity<[f64]> for FailsOn {
    fn dissimilarity(&self, left: &[f64], right: &[f64]) -> Result<f64, DissimilarityError> {
        let (a, b) = (left[0], right[0]);
        if (a, b) == self.pair || (b, a) == self.pair {
            return Err(DissimilarityError::ZeroLength);
        }
        Ok((a - b).abs())
    }
}
