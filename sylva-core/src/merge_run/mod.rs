//! Stepwise driver for the single-link merge loop.
//!
//! A [`MergeRun`] owns the seeded [`LinkQueue`] and the [`MergeForest`] and
//! advances one dequeued link per [`step`](MergeRun::step). Callers that need
//! a hierarchy in one call should use [`crate::Linkage`]; the run is exposed
//! for inspection and for driving the loop from an external scheduler.

pub(crate) mod seed;

use crate::{
    Result,
    builder::MaybeSync,
    cancel::CancellationToken,
    dataset::DataSet,
    dissimilarity::Dissimilarity,
    error::LinkageError,
    forest::{MergeForest, MergeOutcome},
    hierarchy::Hierarchy,
    link_queue::{Link, LinkQueue, TieBreak},
    node::NodeId,
};

use self::seed::{SeedMode, seed_queue, seed_sequential};

/// Outcome of a single [`MergeRun::step`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MergeStep {
    /// The dequeued link joined two clusters.
    Merged {
        /// Node recording the merge.
        node: NodeId,
        /// Clusters left after the merge.
        clusters_remaining: usize,
    },
    /// The dequeued link connected instances already in one cluster.
    Stale {
        /// The discarded link.
        link: Link,
    },
    /// A single cluster remains; nothing was dequeued.
    Done,
}

/// Merge loop state: a seeded queue plus the forest under construction.
///
/// # Examples
/// ```
/// use sylva_core::{Euclidean, MergeRun, MergeStep, TieBreak, VecDataSet};
///
/// let data = VecDataSet::new("line", vec![vec![0.0_f64], vec![1.0], vec![10.0]]);
/// let mut run = MergeRun::seed(&data, &Euclidean, TieBreak::default())?;
/// assert_eq!(run.cluster_count(), 3);
/// assert!(matches!(run.step()?, MergeStep::Merged { clusters_remaining: 2, .. }));
/// run.run_to_completion(None)?;
/// let hierarchy = run.finish(())?;
/// assert_eq!(hierarchy.merge_count(), 2);
/// # Ok::<(), sylva_core::LinkageError>(())
/// ```
#[derive(Debug, Clone)]
pub struct MergeRun {
    queue: LinkQueue,
    forest: MergeForest,
}

impl MergeRun {
    /// Seeds a run on the calling thread.
    ///
    /// Neither the data set nor the oracle needs to be [`Sync`].
    ///
    /// # Errors
    /// Returns [`LinkageError::EmptyDataSet`] when the data set has no
    /// instances, or the first seeding failure in lexicographic pair order.
    pub fn seed<D, O>(data_set: &D, oracle: &O, tie_break: TieBreak) -> Result<Self>
    where
        D: DataSet + ?Sized,
        O: Dissimilarity<D::Feature> + ?Sized,
    {
        let instances = non_empty(data_set)?;
        let queue = seed_sequential(data_set, oracle, tie_break)?;
        Ok(Self::from_queue(instances, queue))
    }

    pub(crate) fn seed_with<D, O>(
        data_set: &D,
        oracle: &O,
        tie_break: TieBreak,
        mode: SeedMode,
    ) -> Result<Self>
    where
        D: DataSet + MaybeSync + ?Sized,
        O: Dissimilarity<D::Feature> + MaybeSync + ?Sized,
    {
        let instances = non_empty(data_set)?;
        let queue = seed_queue(data_set, oracle, tie_break, mode)?;
        Ok(Self::from_queue(instances, queue))
    }

    /// Starts a run over `instances` leaves with a caller-built queue.
    ///
    /// Every queued link already carries a finite, non-negative weight, so
    /// the finished hierarchy only holds valid heights.
    #[must_use]
    pub fn from_queue(instances: usize, queue: LinkQueue) -> Self {
        Self {
            queue,
            forest: MergeForest::new(instances),
        }
    }

    /// Number of clusters remaining.
    #[must_use]
    pub const fn cluster_count(&self) -> usize {
        self.forest.cluster_count()
    }

    /// Links still queued.
    #[must_use]
    pub fn pending_links(&self) -> usize {
        self.queue.len()
    }

    /// Read-only view of the forest under construction.
    #[must_use]
    #[rustfmt::skip]
    pub const fn forest(&self) -> &MergeForest { &self.forest }

    /// Returns whether a single cluster remains.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.forest.cluster_count() <= 1
    }

    /// Dequeues the minimum link and applies it to the forest.
    ///
    /// # Errors
    /// Returns [`LinkageError::Disconnected`] when the queue runs dry while
    /// more than one cluster remains.
    pub fn step(&mut self) -> Result<MergeStep> {
        if self.is_done() {
            return Ok(MergeStep::Done);
        }
        if self.queue.is_empty() {
            return Err(LinkageError::Disconnected {
                clusters_remaining: self.forest.cluster_count(),
            });
        }
        let link = self.queue.dequeue_min()?;
        match self.forest.merge(link.weight(), link.left(), link.right())? {
            MergeOutcome::Merged { node, .. } => Ok(MergeStep::Merged {
                node,
                clusters_remaining: self.forest.cluster_count(),
            }),
            MergeOutcome::NoOp => Ok(MergeStep::Stale { link }),
        }
    }

    /// Steps until one cluster remains, polling `token` before every step.
    ///
    /// # Errors
    /// Returns [`LinkageError::Cancelled`] when the token fires; the run is
    /// left consistent and may be inspected or resumed. Propagates
    /// [`step`](Self::step) failures.
    pub fn run_to_completion(&mut self, token: Option<&CancellationToken>) -> Result<()> {
        while !self.is_done() {
            if token.is_some_and(CancellationToken::is_cancelled) {
                return Err(LinkageError::Cancelled {
                    clusters_remaining: self.forest.cluster_count(),
                });
            }
            self.step()?;
        }
        Ok(())
    }

    /// Seals the forest and attaches `context`.
    ///
    /// # Errors
    /// Returns [`LinkageError::Disconnected`] while more than one cluster
    /// remains.
    pub fn finish<C>(self, context: C) -> Result<Hierarchy<C>> {
        let dendrogram = self.forest.into_dendrogram()?;
        Ok(Hierarchy::new(dendrogram, context))
    }
}

fn non_empty<D: DataSet + ?Sized>(data_set: &D) -> Result<usize> {
    match data_set.len() {
        0 => Err(LinkageError::EmptyDataSet {
            data_set: data_set.name().into(),
        }),
        instances => Ok(instances),
    }
}
