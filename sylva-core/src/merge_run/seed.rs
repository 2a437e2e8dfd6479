//! All-pairs seeding of the link queue.
//!
//! Every unordered pair is evaluated exactly once. Rows are computed either on
//! the calling thread or across Rayon workers; in both cases the links are
//! numbered in lexicographic pair order and the first failing pair in that
//! order is the one reported.

use std::sync::Arc;
#[cfg(feature = "parallel")]
use std::num::NonZeroUsize;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::{
    Result,
    builder::MaybeSync,
    dataset::DataSet,
    dissimilarity::Dissimilarity,
    error::{DataSetError, LinkageError},
    link_queue::{Link, LinkQueue, TieBreak, check_weight},
};

/// How the seed rows are evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SeedMode {
    Sequential,
    #[cfg(feature = "parallel")]
    Parallel {
        threads: Option<NonZeroUsize>,
    },
}

/// Number of unordered pairs over `instances` instances.
#[must_use]
pub(crate) const fn pair_count(instances: usize) -> usize {
    instances.saturating_mul(instances.saturating_sub(1)) / 2
}

/// Builds the seeded link queue for `data_set` with the requested mode.
pub(crate) fn seed_queue<D, O>(
    data_set: &D,
    oracle: &O,
    tie_break: TieBreak,
    mode: SeedMode,
) -> Result<LinkQueue>
where
    D: DataSet + MaybeSync + ?Sized,
    O: Dissimilarity<D::Feature> + MaybeSync + ?Sized,
{
    match mode {
        SeedMode::Sequential => seed_sequential(data_set, oracle, tie_break),
        #[cfg(feature = "parallel")]
        SeedMode::Parallel { threads } => seed_parallel(data_set, oracle, tie_break, threads),
    }
}

/// Builds the seeded link queue on the calling thread.
#[instrument(
    name = "linkage.seed",
    err,
    skip(data_set, oracle),
    fields(
        instances = data_set.len(),
        links = pair_count(data_set.len()),
        mode = "sequential",
    ),
)]
pub(crate) fn seed_sequential<D, O>(
    data_set: &D,
    oracle: &O,
    tie_break: TieBreak,
) -> Result<LinkQueue>
where
    D: DataSet + ?Sized,
    O: Dissimilarity<D::Feature> + ?Sized,
{
    let instances = data_set.len();
    let rows = (0..instances).map(|left| seed_row(data_set, oracle, left));
    let links = collect_links(rows, instances)?;
    debug!(links = links.len(), "seeded link queue");
    Ok(LinkQueue::from_links(links, tie_break))
}

/// Builds the seeded link queue across Rayon workers.
#[cfg(feature = "parallel")]
#[instrument(
    name = "linkage.seed",
    err,
    skip(data_set, oracle),
    fields(
        instances = data_set.len(),
        links = pair_count(data_set.len()),
        mode = "parallel",
    ),
)]
fn seed_parallel<D, O>(
    data_set: &D,
    oracle: &O,
    tie_break: TieBreak,
    threads: Option<NonZeroUsize>,
) -> Result<LinkQueue>
where
    D: DataSet + Sync + ?Sized,
    O: Dissimilarity<D::Feature> + Sync + ?Sized,
{
    let rows = evaluate_rows_parallel(data_set, oracle, threads)?;
    let links = collect_links(rows, data_set.len())?;
    debug!(links = links.len(), "seeded link queue");
    Ok(LinkQueue::from_links(links, tie_break))
}

/// Evaluates the weights of every pair `(left, right)` with `right > left`.
fn seed_row<D, O>(data_set: &D, oracle: &O, left: usize) -> Result<Vec<f64>>
where
    D: DataSet + ?Sized,
    O: Dissimilarity<D::Feature> + ?Sized,
{
    let instances = data_set.len();
    let anchor = data_set
        .feature(left)
        .map_err(|error| data_set_failure(data_set, error))?;
    let mut weights = Vec::with_capacity(instances.saturating_sub(left + 1));
    for right in (left + 1)..instances {
        let other = data_set
            .feature(right)
            .map_err(|error| data_set_failure(data_set, error))?;
        let value = oracle
            .dissimilarity(anchor, other)
            .map_err(|error| LinkageError::Dissimilarity { left, right, error })?;
        check_weight(left, right, value)?;
        weights.push(value);
    }
    Ok(weights)
}

#[cfg(feature = "parallel")]
fn evaluate_rows_parallel<D, O>(
    data_set: &D,
    oracle: &O,
    threads: Option<NonZeroUsize>,
) -> Result<Vec<Result<Vec<f64>>>>
where
    D: DataSet + Sync + ?Sized,
    O: Dissimilarity<D::Feature> + Sync + ?Sized,
{
    let instances = data_set.len();
    let evaluate = || {
        (0..instances)
            .into_par_iter()
            .map(|left| seed_row(data_set, oracle, left))
            .collect::<Vec<_>>()
    };
    match threads {
        Some(threads) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads.get())
                .build()
                .map_err(|error| LinkageError::ThreadPool {
                    message: Arc::from(error.to_string()),
                })?;
            Ok(pool.install(evaluate))
        }
        None => Ok(evaluate()),
    }
}

/// Flattens per-row weights into sequenced links, stopping at the first
/// failing row.
fn collect_links<I>(rows: I, instances: usize) -> Result<Vec<Link>>
where
    I: IntoIterator<Item = Result<Vec<f64>>>,
{
    let mut links = Vec::with_capacity(pair_count(instances));
    let mut sequence = 0_u64;
    for (left, row) in rows.into_iter().enumerate() {
        for (offset, weight) in row?.into_iter().enumerate() {
            links.push(Link::new(left, left + 1 + offset, weight, sequence)?);
            sequence += 1;
        }
    }
    Ok(links)
}

fn data_set_failure<D: DataSet + ?Sized>(data_set: &D, error: DataSetError) -> LinkageError {
    LinkageError::DataSet {
        data_set: Arc::from(data_set.name()),
        error,
    }
}
