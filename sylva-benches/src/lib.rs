//! Benchmark support crate for sylva.
//!
//! Provides synthetic data sets and parameter types used by the Criterion
//! benchmarks for link seeding, the merge loop, and hierarchy queries.

pub mod error;
pub mod params;
pub mod source;
