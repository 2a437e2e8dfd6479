//! Strategy builders for clustering property-based tests.
//!
//! Each generator draws a point cloud from a seeded [`SmallRng`] so that
//! failing cases shrink over the seed and stay reproducible.

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::types::{PointFixture, PointLayout};

/// Minimum instance count for generated clouds.
const MIN_POINTS: usize = 1;
/// Maximum instance count; the seed is quadratic in this.
const MAX_POINTS: usize = 40;
/// Maximum feature dimension.
const MAX_DIMENSION: usize = 3;

/// Generates fixtures across all layouts, biased towards the tie-heavy ones.
pub(super) fn point_fixture_strategy() -> impl Strategy<Value = PointFixture> {
    let layout = prop_oneof![
        2 => Just(PointLayout::Scattered),
        2 => Just(PointLayout::Blobs),
        3 => Just(PointLayout::Duplicates),
        3 => Just(PointLayout::Lattice),
    ];
    (layout, any::<u64>()).prop_map(|(layout, seed)| {
        let mut rng = SmallRng::seed_from_u64(seed);
        generate_fixture(layout, &mut rng)
    })
}

/// Generates a fixture for a specific layout.
pub(super) fn generate_fixture(layout: PointLayout, rng: &mut SmallRng) -> PointFixture {
    let count = rng.gen_range(MIN_POINTS..=MAX_POINTS);
    let dimension = rng.gen_range(1..=MAX_DIMENSION);
    let points = match layout {
        PointLayout::Scattered => scattered(rng, count, dimension),
        PointLayout::Blobs => blobs(rng, count, dimension),
        PointLayout::Duplicates => duplicates(rng, count, dimension),
        PointLayout::Lattice => lattice(rng, count, dimension),
    };
    PointFixture { points, layout }
}

fn scattered(rng: &mut SmallRng, count: usize, dimension: usize) -> Vec<Vec<f64>> {
    (0..count)
        .map(|_| random_point(rng, dimension, -100.0..100.0))
        .collect()
}

fn blobs(rng: &mut SmallRng, count: usize, dimension: usize) -> Vec<Vec<f64>> {
    let centres: Vec<Vec<f64>> = (0..rng.gen_range(2..=4))
        .map(|_| random_point(rng, dimension, -1_000.0..1_000.0))
        .collect();
    (0..count)
        .map(|_| {
            let centre = &centres[rng.gen_range(0..centres.len())];
            centre
                .iter()
                .map(|&c| c + rng.gen_range(-1.0..1.0))
                .collect()
        })
        .collect()
}

fn duplicates(rng: &mut SmallRng, count: usize, dimension: usize) -> Vec<Vec<f64>> {
    let pool: Vec<Vec<f64>> = (0..rng.gen_range(1..=4))
        .map(|_| random_point(rng, dimension, -10.0..10.0))
        .collect();
    (0..count)
        .map(|_| pool[rng.gen_range(0..pool.len())].clone())
        .collect()
}

fn lattice(rng: &mut SmallRng, count: usize, dimension: usize) -> Vec<Vec<f64>> {
    (0..count)
        .map(|_| {
            (0..dimension)
                .map(|_| f64::from(rng.gen_range(0_u8..5)))
                .collect()
        })
        .collect()
}

fn random_point(
    rng: &mut SmallRng,
    dimension: usize,
    range: std::ops::Range<f64>,
) -> Vec<f64> {
    (0..dimension).map(|_| rng.gen_range(range.clone())).collect()
}
