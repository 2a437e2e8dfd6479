//! Property 1: Equivalence with naive single linkage.
//!
//! The merge heights must equal the sorted minimum spanning tree weights
//! from the Prim oracle, and cutting at any merge height must reproduce the
//! connected components of the threshold graph at that height.

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::{DataContext, Euclidean, Hierarchy, Linkage, VecDataSet};

use super::oracle::{DistanceMatrix, prim_mst_weights, threshold_components};
use super::types::PointFixture;

/// Clusters the fixture with the default configuration.
pub(super) fn cluster_fixture(fixture: &PointFixture) -> Result<Hierarchy<DataContext>, TestCaseError> {
    let data = VecDataSet::new("property", fixture.points.clone());
    Linkage::default().cluster(&data, &Euclidean).map_err(|e| {
        TestCaseError::fail(format!("clustering failed: {e} ({})", fixture.describe()))
    })
}

/// Runs the oracle equivalence property for the given fixture.
pub(super) fn run_oracle_equivalence_property(fixture: &PointFixture) -> TestCaseResult {
    let hierarchy = cluster_fixture(fixture)?;
    let matrix = DistanceMatrix::euclidean(&fixture.points);

    let heights: Vec<f64> = hierarchy.merges().map(|merge| merge.height).collect();
    let expected = prim_mst_weights(&matrix);
    if heights != expected {
        return Err(TestCaseError::fail(format!(
            "merge heights diverge from MST weights: engine={heights:?}, oracle={expected:?} ({})",
            fixture.describe(),
        )));
    }

    let mut thresholds = heights.clone();
    thresholds.push(0.0);
    thresholds.dedup();
    for height in thresholds {
        let partition = hierarchy.cut_at_height(height).map_err(|e| {
            TestCaseError::fail(format!("cut at {height} failed: {e} ({})", fixture.describe()))
        })?;
        let oracle = threshold_components(&matrix, height);
        if partition.assignments() != oracle.as_slice() {
            return Err(TestCaseError::fail(format!(
                "cut at {height} diverges: engine={:?}, oracle={oracle:?} ({})",
                partition.assignments(),
                fixture.describe(),
            )));
        }
    }

    Ok(())
}
