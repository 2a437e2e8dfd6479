//! Property-based tests for the single-link clustering engine.
//!
//! Verifies the hierarchy against a trusted sequential Prim oracle,
//! validates structural invariants of the dendrogram and its partitions, and
//! checks that results do not depend on the seeding strategy or tie-break
//! policy, across point clouds with varied spacing and many duplicates.

mod determinism;
mod equivalence;
mod oracle;
mod strategies;
mod structural;
mod types;
