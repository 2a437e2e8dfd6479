use arrow_schema::{ArrowError, DataType};
use sylva_core::DataSetError;
use thiserror::Error;

/// Errors raised while building a [`crate::DenseDataSet`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DenseDataSetError {
    /// The requested column does not exist.
    #[error("column `{column}` not found in schema")]
    ColumnNotFound {
        /// Name of the missing column.
        column: String,
    },
    /// The feature column is not a `FixedSizeList<Float32, _>`.
    #[error("column `{column}` must be a FixedSizeList<Float32, _> but found {actual:?}")]
    InvalidColumnType {
        /// Name of the offending column.
        column: String,
        /// Type found in the schema.
        actual: DataType,
    },
    /// The list child type is not `Float32`.
    #[error("FixedSizeList child type must be Float32 but found {actual:?}")]
    InvalidListValueType {
        /// Child type found in the schema.
        actual: DataType,
    },
    /// The label column is not `Utf8`.
    #[error("label column `{column}` must be Utf8 but found {actual:?}")]
    InvalidLabelType {
        /// Name of the label column.
        column: String,
        /// Type found in the schema.
        actual: DataType,
    },
    /// The list width is negative or zero.
    #[error("invalid FixedSizeList dimension {actual}")]
    InvalidDimension {
        /// Width declared by the schema.
        actual: i32,
    },
    /// The feature column or its child admits nulls.
    #[error("column `{column}` must be non-nullable (child nullable: {nullable_child})")]
    NullableField {
        /// Name of the offending column.
        column: String,
        /// Whether the list child is the nullable part.
        nullable_child: bool,
    },
    /// A feature row is null.
    #[error("row {row} is null")]
    NullRow {
        /// Absolute row index.
        row: usize,
    },
    /// A feature row contains a null value.
    #[error("row {row} contains null value at position {value_index}")]
    NullValue {
        /// Absolute row index.
        row: usize,
        /// Position of the null within the row.
        value_index: usize,
    },
    /// A label is null.
    #[error("label of row {row} is null")]
    NullLabel {
        /// Absolute row index.
        row: usize,
    },
    /// A list row had an unexpected length.
    #[error("row {row} has length {actual} but expected {expected}")]
    InvalidRowLength {
        /// Absolute row index.
        row: usize,
        /// Width declared by the schema.
        expected: usize,
        /// Length found.
        actual: usize,
    },
    /// The matrix would not fit in memory addressing limits.
    #[error("matrix with {rows} rows and dimension {dimension} exceeds capacity limits")]
    CapacityOverflow {
        /// Number of rows requested.
        rows: usize,
        /// Row width requested.
        dimension: usize,
    },
    /// Record batches disagreed on the row width.
    #[error("inconsistent dimensions across batches: expected {expected}, got {actual}")]
    InconsistentBatchDimension {
        /// Width of the first batch.
        expected: usize,
        /// Width of the offending batch.
        actual: usize,
    },
    /// The rows violate a [`sylva_core::DataSet`] invariant.
    #[error(transparent)]
    DataSet(#[from] DataSetError),
    /// Arrow failed to decode a batch.
    #[error("arrow error: {0}")]
    Arrow(#[from] ArrowError),
    /// Parquet failed to read the file.
    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    /// The file could not be opened.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
