//! Benchmark parameter types.

use std::fmt;

use sylva_core::ExecutionStrategy;

/// Parameters for a full clustering benchmark run.
#[derive(Clone, Debug)]
pub struct ClusterBenchParams {
    /// Number of points in the data set.
    pub point_count: usize,
    /// Strategy used to seed the link queue.
    pub strategy: ExecutionStrategy,
}

impl fmt::Display for ClusterBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},{:?}", self.point_count, self.strategy)
    }
}

/// Parameters for a hierarchy query benchmark run.
#[derive(Clone, Debug)]
pub struct QueryBenchParams {
    /// Number of points in the data set.
    pub point_count: usize,
    /// Number of clusters requested from the cut.
    pub clusters: usize,
}

impl fmt::Display for QueryBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},k={}", self.point_count, self.clusters)
    }
}
