//! End-to-end single-link clustering benchmarks.
//!
//! Measures seeding plus the merge loop for each execution strategy, so the
//! benefit of parallel seeding is visible against the sequential baseline.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
#![expect(
    clippy::shadow_reuse,
    reason = "Criterion bench_with_input closures rebind parameter names"
)]
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use sylva_benches::{
    error::BenchSetupError,
    params::ClusterBenchParams,
    source::{SyntheticConfig, SyntheticSource},
};
use sylva_core::{Euclidean, ExecutionStrategy, LinkageBuilder};

/// Seed used for all synthetic data generation in this benchmark.
const SEED: u64 = 42;

/// Vector dimensionality for all benchmark data sets.
const DIMENSIONS: usize = 16;

/// Data set sizes to benchmark.
const POINT_COUNTS: &[usize] = &[100, 500, 1_000];

const STRATEGIES: &[ExecutionStrategy] = &[ExecutionStrategy::Sequential, ExecutionStrategy::Auto];

fn cluster_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("single_link");
    group.sample_size(10);

    for &point_count in POINT_COUNTS {
        let source = SyntheticSource::generate(&SyntheticConfig {
            point_count,
            dimensions: DIMENSIONS,
            seed: SEED,
        })?;

        for &strategy in STRATEGIES {
            let linkage = LinkageBuilder::new()
                .with_execution_strategy(strategy)
                .build()?;
            let params = ClusterBenchParams {
                point_count,
                strategy,
            };
            group.bench_with_input(
                BenchmarkId::from_parameter(&params),
                &(&linkage, &source),
                |b, &(linkage, source)| {
                    b.iter(|| linkage.cluster(source, &Euclidean));
                },
            );
        }
    }

    group.finish();
    Ok(())
}

fn cluster(c: &mut Criterion) {
    if let Err(err) = cluster_impl(c) {
        panic!("single_link benchmark setup failed: {err}");
    }
}

criterion_group!(benches, cluster);
criterion_main!(benches);
