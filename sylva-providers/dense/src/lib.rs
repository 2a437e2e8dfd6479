//! Dense `f32` data sets backed by contiguous row-major storage.
//!
//! Rows can be supplied directly or ingested from Arrow `FixedSizeList`
//! arrays and Parquet files, optionally with a `Utf8` label column that is
//! carried into the finished hierarchy.

mod errors;
mod ingest;
mod matrix;

pub use errors::DenseDataSetError;
pub use matrix::{DenseDataSet, ParquetColumns};

#[cfg(test)]
mod tests;
