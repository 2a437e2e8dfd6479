//! Builder utilities for configuring [`Linkage`] runs.
//!
//! Exposes the execution strategy and tie-break selection surface and the
//! validation performed before constructing a [`Linkage`].

use std::num::NonZeroUsize;

use crate::{Result, error::LinkageError, link_queue::TieBreak, linkage::Linkage};

/// Indicates how [`Linkage`] evaluates the all-pairs seed.
///
/// The merge loop itself is always single-threaded; only the seed phase is
/// parallelised. `Auto` uses Rayon when the `parallel` feature is compiled in
/// and falls back to the sequential path otherwise, so behaviour stays stable
/// across builds.
///
/// # Examples
/// ```
/// use sylva_core::ExecutionStrategy;
///
/// let strategy = ExecutionStrategy::Auto;
/// assert!(matches!(strategy, ExecutionStrategy::Auto));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ExecutionStrategy {
    /// Allow the library to select a seeding backend automatically.
    #[default]
    Auto,
    /// Seed on the calling thread only.
    Sequential,
    /// Seed across a Rayon thread pool.
    Parallel,
}

/// Thread-safety bound on the data set and oracle handed to [`Linkage`].
///
/// Equivalent to [`Sync`] when the `parallel` feature is enabled and satisfied
/// by every type otherwise. [`crate::MergeRun::seed`] never requires it.
#[cfg(feature = "parallel")]
pub trait MaybeSync: Sync {}

#[cfg(feature = "parallel")]
impl<T: Sync + ?Sized> MaybeSync for T {}

/// Thread-safety bound on the data set and oracle handed to [`Linkage`].
///
/// Equivalent to [`Sync`] when the `parallel` feature is enabled and satisfied
/// by every type otherwise. [`crate::MergeRun::seed`] never requires it.
#[cfg(not(feature = "parallel"))]
pub trait MaybeSync {}

#[cfg(not(feature = "parallel"))]
impl<T: ?Sized> MaybeSync for T {}

/// Configures and constructs [`Linkage`] instances.
///
/// # Examples
/// ```
/// use sylva_core::{ExecutionStrategy, LinkageBuilder, TieBreak};
///
/// let linkage = LinkageBuilder::new()
///     .with_execution_strategy(ExecutionStrategy::Sequential)
///     .with_tie_break(TieBreak::InstancePair)
///     .build()?;
/// assert_eq!(linkage.execution_strategy(), ExecutionStrategy::Sequential);
/// assert_eq!(linkage.tie_break(), TieBreak::InstancePair);
/// # Ok::<(), sylva_core::LinkageError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct LinkageBuilder {
    execution_strategy: ExecutionStrategy,
    tie_break: TieBreak,
    threads: Option<usize>,
}

impl LinkageBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use sylva_core::{ExecutionStrategy, LinkageBuilder, TieBreak};
    ///
    /// let builder = LinkageBuilder::new();
    /// assert_eq!(builder.execution_strategy(), ExecutionStrategy::Auto);
    /// assert_eq!(builder.tie_break(), TieBreak::InsertionOrder);
    /// assert_eq!(builder.threads(), None);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the execution strategy used for seeding.
    #[must_use]
    pub fn with_execution_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.execution_strategy = strategy;
        self
    }

    /// Returns the currently configured execution strategy.
    #[must_use]
    #[rustfmt::skip]
    pub fn execution_strategy(&self) -> ExecutionStrategy { self.execution_strategy }

    /// Sets the ordering applied to links of equal weight.
    #[must_use]
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Returns the configured tie-break policy.
    #[must_use]
    #[rustfmt::skip]
    pub fn tie_break(&self) -> TieBreak { self.tie_break }

    /// Runs parallel seeding inside a dedicated pool of `threads` workers
    /// instead of Rayon's global pool.
    ///
    /// # Examples
    /// ```
    /// use sylva_core::LinkageBuilder;
    ///
    /// let builder = LinkageBuilder::new().with_threads(2);
    /// assert_eq!(builder.threads(), Some(2));
    /// ```
    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Returns the explicitly requested worker count, if any.
    #[must_use]
    #[rustfmt::skip]
    pub fn threads(&self) -> Option<usize> { self.threads }

    /// Validates the configuration and constructs a [`Linkage`] instance.
    ///
    /// # Errors
    /// Returns [`LinkageError::InvalidThreadCount`] when a zero thread count
    /// was requested.
    ///
    /// # Examples
    /// ```
    /// use sylva_core::{LinkageBuilder, LinkageError};
    ///
    /// let err = LinkageBuilder::new().with_threads(0).build().unwrap_err();
    /// assert!(matches!(err, LinkageError::InvalidThreadCount { got: 0 }));
    /// ```
    pub fn build(self) -> Result<Linkage> {
        let threads = self
            .threads
            .map(|got| NonZeroUsize::new(got).ok_or(LinkageError::InvalidThreadCount { got }))
            .transpose()?;

        Ok(Linkage::new(self.execution_strategy, self.tie_break, threads))
    }
}
