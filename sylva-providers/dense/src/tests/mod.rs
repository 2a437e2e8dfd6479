pub(crate) use super::{DenseDataSet, DenseDataSetError, ParquetColumns};

mod support;
