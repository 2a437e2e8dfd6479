//! Shared test utilities for `sylva-core`.

use sylva_test_support::ci::property_test_profile::ProptestRunProfile;
use proptest::test_runner::Config as ProptestConfig;

use crate::{dissimilarity::Dissimilarity, error::DissimilarityError};
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

/// Builds a standard proptest configuration from the shared CI profile.
///
/// This keeps property suites aligned on the same `PROPTEST_CASES` and
/// `SYLVA_PBT_FORK` interpretation.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// [`Dissimilarity`] wrapper that records every invocation.
#[derive(Clone)]
pub(crate) struct CountingOracle<O> {
    inner: O,
    calls: Arc<AtomicUsize>,
}

impl<O> CountingOracle<O> {
    /// Wraps `inner`, incrementing `calls` on every evaluation.
    #[must_use]
    pub(crate) fn new(inner: O, calls: Arc<AtomicUsize>) -> Self {
        Self { inner, calls }
    }
}

impl<F: ?Sized, O: Dissimilarity<F>> Dissimilarity<F> for CountingOracle<O> {
    fn dissimilarity(&self, left: &F, right: &F) -> Result<f64, DissimilarityError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.inner.dissimilarity(left, right)
    }
}
