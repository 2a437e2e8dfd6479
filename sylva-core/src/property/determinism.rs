//! Property 3: Determinism across runs and configurations.
//!
//! Re-clusters the same input repeatedly and under every seeding strategy
//! and tie-break policy, asserting that each run produces an arena identical
//! to the baseline: same node ids, children, heights and sizes.

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::{Euclidean, ExecutionStrategy, LinkageBuilder, TieBreak, VecDataSet};

use super::equivalence::cluster_fixture;
use super::types::{DeterminismConfig, PointFixture};

/// Runs the determinism property for the given fixture.
pub(super) fn run_determinism_property(fixture: &PointFixture) -> TestCaseResult {
    let config = DeterminismConfig::load();
    let baseline = cluster_fixture(fixture)?;
    let data = VecDataSet::new("property", fixture.points.clone());

    let variants = [
        LinkageBuilder::new().with_execution_strategy(ExecutionStrategy::Sequential),
        LinkageBuilder::new().with_tie_break(TieBreak::InstancePair),
        LinkageBuilder::new().with_threads(2),
        LinkageBuilder::new(),
    ];

    for run in 0..config.repetitions {
        for builder in &variants {
            let linkage = builder.clone().build().map_err(|e| {
                TestCaseError::fail(format!("builder {builder:?} rejected: {e}"))
            })?;
            let hierarchy = linkage.cluster(&data, &Euclidean).map_err(|e| {
                TestCaseError::fail(format!(
                    "run {run}: {builder:?} failed: {e} ({})",
                    fixture.describe()
                ))
            })?;
            if hierarchy.dendrogram() != baseline.dendrogram() {
                return Err(TestCaseError::fail(format!(
                    "run {run}: {builder:?} diverged from the baseline ({})",
                    fixture.describe()
                )));
            }
        }
    }

    Ok(())
}
