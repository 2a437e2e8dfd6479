//! Type definitions for clustering property-based tests.

/// Spatial layout of generated point clouds.
///
/// Each layout stresses a different part of the engine: unique distances
/// exercise plain ordering, duplicates and lattices produce large groups of
/// equal weights that exercise tie-breaking.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum PointLayout {
    /// Points drawn uniformly from a box; distances are almost surely unique.
    Scattered,
    /// A few well-separated blobs.
    Blobs,
    /// Points copied from a small pool, so many distances are zero.
    Duplicates,
    /// Integer grid coordinates, so many distances coincide.
    Lattice,
}

/// Fixture for clustering property tests.
#[derive(Clone, Debug)]
pub(super) struct PointFixture {
    /// Feature vectors, all of the same dimension.
    pub points: Vec<Vec<f64>>,
    /// Layout used during generation.
    pub layout: PointLayout,
}

impl PointFixture {
    /// Formats the fixture context for failure messages.
    pub(super) fn describe(&self) -> String {
        format!(
            "layout={:?}, instances={}, dimension={}",
            self.layout,
            self.points.len(),
            self.points.first().map_or(0, Vec::len),
        )
    }
}

/// Configuration for the determinism property.
pub(super) struct DeterminismConfig {
    /// Number of times each configuration is re-run per input.
    pub repetitions: usize,
}

impl DeterminismConfig {
    /// Loads the configuration from the environment.
    ///
    /// `SYLVA_PBT_DETERMINISM_REPS` controls the repetition count
    /// (default: 3).
    pub(super) fn load() -> Self {
        let repetitions = std::env::var("SYLVA_PBT_DETERMINISM_REPS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3);
        Self { repetitions }
    }
}
