//! Core clustering orchestration.
//!
//! Provides the [`Linkage`] entry point, which seeds the link queue with the
//! configured execution strategy, drives the merge loop to completion and
//! wraps the finished dendrogram into a [`Hierarchy`].

use std::num::NonZeroUsize;

use tracing::{info, instrument, warn};

#[cfg(not(feature = "parallel"))]
use crate::error::LinkageError;

use crate::{
    Result,
    builder::{ExecutionStrategy, MaybeSync},
    cancel::CancellationToken,
    dataset::DataSet,
    dissimilarity::Dissimilarity,
    hierarchy::Hierarchy,
    link_queue::TieBreak,
    merge_run::{MergeRun, seed::SeedMode},
};

/// Entry point for single-link clustering.
///
/// # Examples
/// ```
/// use sylva_core::{Euclidean, LinkageBuilder, VecDataSet};
///
/// let data = VecDataSet::new("line", vec![vec![0.0_f64], vec![1.0], vec![10.0]]);
/// let linkage = LinkageBuilder::new().build()?;
/// let hierarchy = linkage.cluster(&data, &Euclidean)?;
/// let heights: Vec<f64> = hierarchy.merges().map(|merge| merge.height).collect();
/// assert_eq!(heights, vec![1.0, 9.0]);
/// # Ok::<(), sylva_core::LinkageError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Linkage {
    execution_strategy: ExecutionStrategy,
    tie_break: TieBreak,
    threads: Option<NonZeroUsize>,
}

impl Default for Linkage {
    fn default() -> Self {
        Self::new(ExecutionStrategy::Auto, TieBreak::default(), None)
    }
}

impl Linkage {
    pub(crate) fn new(
        execution_strategy: ExecutionStrategy,
        tie_break: TieBreak,
        threads: Option<NonZeroUsize>,
    ) -> Self {
        Self {
            execution_strategy,
            tie_break,
            threads,
        }
    }

    /// Returns the execution strategy used for seeding.
    #[must_use]
    #[rustfmt::skip]
    pub fn execution_strategy(&self) -> ExecutionStrategy { self.execution_strategy }

    /// Returns the tie-break policy applied to equal weights.
    #[must_use]
    #[rustfmt::skip]
    pub fn tie_break(&self) -> TieBreak { self.tie_break }

    /// Returns the dedicated seeding pool size, if one was configured.
    #[must_use]
    #[rustfmt::skip]
    pub fn threads(&self) -> Option<NonZeroUsize> { self.threads }

    /// Builds the complete single-link hierarchy of `data_set`.
    ///
    /// The oracle is called exactly once per unordered instance pair. With
    /// the `parallel` feature enabled the data set and oracle must be
    /// [`Sync`] whatever the execution strategy; use [`MergeRun::seed`] to
    /// cluster with non-`Sync` oracles such as closures over a `Cell`.
    ///
    /// # Errors
    /// Returns [`LinkageError::EmptyDataSet`] for empty data sets,
    /// [`LinkageError::InvalidDissimilarity`], [`LinkageError::Dissimilarity`]
    /// or [`LinkageError::DataSet`] for the first failing pair in
    /// lexicographic order, and [`LinkageError::BackendUnavailable`] when
    /// [`ExecutionStrategy::Parallel`] is requested without the `parallel`
    /// feature.
    pub fn cluster<D, O>(&self, data_set: &D, oracle: &O) -> Result<Hierarchy<D::Context>>
    where
        D: DataSet + MaybeSync + ?Sized,
        O: Dissimilarity<D::Feature> + MaybeSync + ?Sized,
    {
        self.run(data_set, oracle, None)
    }

    /// Like [`cluster`](Self::cluster), polling `token` between merge
    /// iterations.
    ///
    /// # Errors
    /// Returns [`LinkageError::Cancelled`] when the token fires before the
    /// hierarchy is complete, plus every error of [`cluster`](Self::cluster).
    ///
    /// # Examples
    /// ```
    /// use sylva_core::{CancellationToken, Euclidean, Linkage, LinkageError, VecDataSet};
    ///
    /// let data = VecDataSet::new("line", vec![vec![0.0_f64], vec![1.0], vec![10.0]]);
    /// let token = CancellationToken::new();
    /// token.cancel();
    /// let err = Linkage::default()
    ///     .cluster_with_cancellation(&data, &Euclidean, &token)
    ///     .unwrap_err();
    /// assert_eq!(err, LinkageError::Cancelled { clusters_remaining: 3 });
    /// ```
    pub fn cluster_with_cancellation<D, O>(
        &self,
        data_set: &D,
        oracle: &O,
        token: &CancellationToken,
    ) -> Result<Hierarchy<D::Context>>
    where
        D: DataSet + MaybeSync + ?Sized,
        O: Dissimilarity<D::Feature> + MaybeSync + ?Sized,
    {
        self.run(data_set, oracle, Some(token))
    }

    /// Seeds a [`MergeRun`] with this configuration without merging.
    ///
    /// # Errors
    /// Returns the seeding errors of [`cluster`](Self::cluster).
    pub fn start<D, O>(&self, data_set: &D, oracle: &O) -> Result<MergeRun>
    where
        D: DataSet + MaybeSync + ?Sized,
        O: Dissimilarity<D::Feature> + MaybeSync + ?Sized,
    {
        MergeRun::seed_with(data_set, oracle, self.tie_break, self.seed_mode()?)
    }

    #[instrument(
        name = "linkage.cluster",
        err,
        skip(self, data_set, oracle, token),
        fields(
            data_set = %data_set.name(),
            instances = data_set.len(),
            strategy = ?self.execution_strategy,
            tie_break = ?self.tie_break,
        ),
    )]
    fn run<D, O>(
        &self,
        data_set: &D,
        oracle: &O,
        token: Option<&CancellationToken>,
    ) -> Result<Hierarchy<D::Context>>
    where
        D: DataSet + MaybeSync + ?Sized,
        O: Dissimilarity<D::Feature> + MaybeSync + ?Sized,
    {
        if data_set.is_empty() {
            warn!(
                data_set = data_set.name(),
                "data set is empty, returning error"
            );
        }

        let mut run = self.start(data_set, oracle)?;
        run.run_to_completion(token)?;
        let hierarchy = run.finish(data_set.context())?;
        info!(
            merges = hierarchy.merge_count(),
            root_height = ?hierarchy.root_height(),
            "clustering completed"
        );
        Ok(hierarchy)
    }

    fn seed_mode(&self) -> Result<SeedMode> {
        match self.execution_strategy {
            ExecutionStrategy::Sequential => Ok(SeedMode::Sequential),
            #[cfg(feature = "parallel")]
            ExecutionStrategy::Auto | ExecutionStrategy::Parallel => Ok(SeedMode::Parallel {
                threads: self.threads,
            }),
            #[cfg(not(feature = "parallel"))]
            ExecutionStrategy::Auto => Ok(SeedMode::Sequential),
            #[cfg(not(feature = "parallel"))]
            ExecutionStrategy::Parallel => Err(LinkageError::BackendUnavailable {
                requested: ExecutionStrategy::Parallel,
            }),
        }
    }
}
