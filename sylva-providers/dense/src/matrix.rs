//! Dense data set implementation and ingestion entry points.
use std::{fs::File, path::Path, sync::Arc};

use arrow_array::{Array, FixedSizeListArray, RecordBatchReader};
use parquet::arrow::{ProjectionMask, arrow_reader::ParquetRecordBatchReaderBuilder};
use parquet::file::reader::ChunkReader;
use sylva_core::{DataContext, DataSet, DataSetError};
use tracing::{debug, instrument};

use crate::errors::DenseDataSetError;
use crate::ingest::{
    append_feature_rows, append_labels, as_feature_list, as_label_array, validate_feature_field,
    validate_label_field,
};

/// Column selection for Parquet ingestion.
///
/// # Examples
/// ```
/// use sylva_providers_dense::ParquetColumns;
///
/// let columns = ParquetColumns::new("embedding").with_labels("id");
/// assert_eq!(columns.features(), "embedding");
/// assert_eq!(columns.labels(), Some("id"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParquetColumns {
    features: String,
    labels: Option<String>,
}

impl ParquetColumns {
    /// Selects the `FixedSizeList<Float32, _>` feature column.
    #[must_use]
    pub fn new(features: impl Into<String>) -> Self {
        Self {
            features: features.into(),
            labels: None,
        }
    }

    /// Additionally selects a `Utf8` label column.
    #[must_use]
    pub fn with_labels(mut self, labels: impl Into<String>) -> Self {
        self.labels = Some(labels.into());
        self
    }

    #[rustfmt::skip]
    #[must_use]
    pub fn features(&self) -> &str { &self.features }

    #[rustfmt::skip]
    #[must_use]
    pub fn labels(&self) -> Option<&str> { self.labels.as_deref() }
}

/// Data set of `f32` feature rows stored contiguously in row-major order.
///
/// # Examples
/// ```
/// use sylva_core::{DataSet, Euclidean, Linkage};
/// use sylva_providers_dense::DenseDataSet;
///
/// let data = DenseDataSet::from_rows("demo", vec![vec![0.0, 0.0], vec![3.0, 4.0]])?;
/// assert_eq!(data.dimension(), 2);
/// assert_eq!(data.feature(1)?, &[3.0_f32, 4.0][..]);
///
/// let hierarchy = Linkage::default().cluster(&data, &Euclidean)?;
/// assert_eq!(hierarchy.root_height(), Some(5.0));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct DenseDataSet {
    rows: usize,
    dimension: usize,
    values: Vec<f32>,
    context: DataContext,
}

impl DenseDataSet {
    fn from_parts(context: DataContext, rows: usize, dimension: usize, values: Vec<f32>) -> Self {
        debug_assert_eq!(values.len(), rows.saturating_mul(dimension));
        Self {
            rows,
            dimension,
            values,
            context,
        }
    }

    /// Builds a data set from equally sized rows.
    ///
    /// # Errors
    /// Returns [`DataSetError::EmptyData`] for no rows,
    /// [`DataSetError::ZeroDimension`] for zero-width rows and
    /// [`DataSetError::DimensionMismatch`] when row lengths differ.
    pub fn from_rows(
        name: impl Into<Arc<str>>,
        rows: Vec<Vec<f32>>,
    ) -> Result<Self, DenseDataSetError> {
        let Some(dimension) = rows.first().map(Vec::len) else {
            return Err(DataSetError::EmptyData.into());
        };
        if dimension == 0 {
            return Err(DataSetError::ZeroDimension.into());
        }
        if let Some(row) = rows.iter().find(|row| row.len() != dimension) {
            return Err(DataSetError::DimensionMismatch {
                left: dimension,
                right: row.len(),
            }
            .into());
        }
        let count = rows.len();
        let values = rows.into_iter().flatten().collect();
        Ok(Self::from_parts(DataContext::new(name), count, dimension, values))
    }

    /// Loads rows from an Arrow [`FixedSizeListArray`] of `Float32` values.
    ///
    /// # Errors
    /// Returns [`DenseDataSetError`] when the array is not a non-null
    /// `Float32` list of positive width.
    pub fn try_from_fixed_size_list(
        name: impl Into<Arc<str>>,
        array: &FixedSizeListArray,
    ) -> Result<Self, DenseDataSetError> {
        let mut values = Vec::new();
        let dimension = append_feature_rows(array, None, 0, &mut values)?;
        Ok(Self::from_parts(
            DataContext::new(name),
            array.len(),
            dimension,
            values,
        ))
    }

    /// Loads rows (and optionally labels) from a Parquet file on disk.
    ///
    /// # Errors
    /// Returns [`DenseDataSetError::Io`] when the file cannot be opened, plus
    /// every error of [`try_from_parquet_reader`](Self::try_from_parquet_reader).
    pub fn try_from_parquet_path(
        name: impl Into<Arc<str>>,
        path: impl AsRef<Path>,
        columns: &ParquetColumns,
    ) -> Result<Self, DenseDataSetError> {
        let file = File::open(path)?;
        Self::try_from_parquet_reader(name, file, columns)
    }

    /// Loads rows (and optionally labels) from any Parquet chunk reader.
    ///
    /// # Errors
    /// Returns [`DenseDataSetError::ColumnNotFound`] for missing columns,
    /// type errors for columns of the wrong shape, null errors for null rows,
    /// values or labels, and wrapped Arrow/Parquet decoding failures.
    #[instrument(
        name = "dense.load_parquet",
        err,
        skip(name, reader, columns),
        fields(features = columns.features(), labels = columns.labels()),
    )]
    pub fn try_from_parquet_reader<R>(
        name: impl Into<Arc<str>>,
        reader: R,
        columns: &ParquetColumns,
    ) -> Result<Self, DenseDataSetError>
    where
        R: ChunkReader + Send + 'static,
    {
        let builder = ParquetRecordBatchReaderBuilder::try_new(reader)?;
        let projected = std::iter::once(columns.features()).chain(columns.labels());
        let mask = ProjectionMask::columns(builder.parquet_schema(), projected);
        let reader = builder.with_projection(mask).build()?;
        let schema = reader.schema();

        let feature_index = column_index(&schema, columns.features())?;
        let dimension = validate_feature_field(schema.field(feature_index), columns.features())?;
        let label_index = columns
            .labels()
            .map(|column| {
                let index = column_index(&schema, column)?;
                validate_label_field(schema.field(index), column)?;
                Ok::<_, DenseDataSetError>((index, column))
            })
            .transpose()?;

        let mut values = Vec::new();
        let mut labels = Vec::new();
        let mut rows = 0_usize;
        for batch in reader {
            let batch = batch?;
            let list = as_feature_list(batch.column(feature_index), columns.features())?;
            append_feature_rows(list, Some(dimension), rows, &mut values)?;
            if let Some((index, column)) = label_index {
                append_labels(as_label_array(batch.column(index), column)?, rows, &mut labels)?;
            }
            rows += list.len();
        }

        let mut context = DataContext::new(name);
        if label_index.is_some() {
            context = context.with_labels(labels, rows)?;
        }
        debug!(rows, dimension, labelled = context.has_labels(), "loaded parquet data set");
        Ok(Self::from_parts(context, rows, dimension, values))
    }

    /// Attaches one label per row.
    ///
    /// # Errors
    /// Returns [`DataSetError::LabelCountMismatch`] when the label count
    /// differs from the row count.
    pub fn with_labels<I, S>(mut self, labels: I) -> Result<Self, DenseDataSetError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        self.context = self.context.with_labels(labels, self.rows)?;
        Ok(self)
    }

    /// Returns the dimensionality of each row.
    #[must_use]
    #[rustfmt::skip]
    pub fn dimension(&self) -> usize { self.dimension }

    /// Returns the underlying row-major matrix.
    #[must_use]
    #[rustfmt::skip]
    pub fn data(&self) -> &[f32] { &self.values }

    fn row_slice(&self, index: usize) -> Option<&[f32]> {
        if index >= self.rows {
            return None;
        }
        let start = index.checked_mul(self.dimension)?;
        let end = start.checked_add(self.dimension)?;
        self.values.get(start..end)
    }
}

fn column_index(
    schema: &arrow_schema::Schema,
    column: &str,
) -> Result<usize, DenseDataSetError> {
    schema
        .index_of(column)
        .map_err(|_| DenseDataSetError::ColumnNotFound {
            column: column.to_owned(),
        })
}

impl DataSet for DenseDataSet {
    type Feature = [f32];
    type Context = DataContext;

    fn len(&self) -> usize {
        self.rows
    }

    fn name(&self) -> &str {
        self.context.name()
    }

    fn feature(&self, index: usize) -> Result<&[f32], DataSetError> {
        self.row_slice(index)
            .ok_or(DataSetError::OutOfBounds { index })
    }

    fn context(&self) -> DataContext {
        self.context.clone()
    }
}
