//! Data set abstractions consumed by the clustering engine.

use std::sync::Arc;

use crate::error::DataSetError;

/// An ordered collection of feature-bearing instances.
///
/// The engine reads features through [`feature`](Self::feature) and never
/// interprets the [`Context`](Self::Context); the context is handed verbatim
/// to the finished [`crate::Hierarchy`] for label attribution.
///
/// # Examples
/// ```
/// use sylva_core::{DataContext, DataSet, DataSetError};
///
/// struct Scalars(Vec<f64>);
///
/// impl DataSet for Scalars {
///     type Feature = f64;
///     type Context = DataContext;
///
///     fn len(&self) -> usize { self.0.len() }
///     fn name(&self) -> &str { "scalars" }
///     fn feature(&self, index: usize) -> Result<&f64, DataSetError> {
///         self.0.get(index).ok_or(DataSetError::OutOfBounds { index })
///     }
///     fn context(&self) -> DataContext { DataContext::new(self.name()) }
/// }
///
/// let data = Scalars(vec![1.0, 2.0, 4.0]);
/// assert_eq!(data.len(), 3);
/// assert_eq!(*data.feature(2)?, 4.0);
/// assert!(data.feature(3).is_err());
/// # Ok::<(), DataSetError>(())
/// ```
pub trait DataSet {
    /// Feature vector type of a single instance.
    type Feature: ?Sized;
    /// Opaque identity/label context carried into the hierarchy.
    type Context: Clone;

    /// Returns the number of instances.
    fn len(&self) -> usize;

    /// Returns whether the data set contains no instances.
    #[must_use]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a human-readable name.
    fn name(&self) -> &str;

    /// Returns the feature vector of instance `index`.
    ///
    /// # Errors
    /// Implementations must return [`DataSetError::OutOfBounds`] for indices
    /// at or beyond [`len`](Self::len).
    fn feature(&self, index: usize) -> Result<&Self::Feature, DataSetError>;

    /// Returns the context attached to the finished hierarchy.
    fn context(&self) -> Self::Context;
}

impl<D: DataSet + ?Sized> DataSet for &D {
    type Feature = D::Feature;
    type Context = D::Context;

    fn len(&self) -> usize {
        (**self).len()
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn feature(&self, index: usize) -> Result<&Self::Feature, DataSetError> {
        (**self).feature(index)
    }

    fn context(&self) -> Self::Context {
        (**self).context()
    }
}

/// Identity and label context shipped with most data sets.
///
/// Cloning is cheap: the name and labels are reference counted.
///
/// # Examples
/// ```
/// use sylva_core::DataContext;
///
/// let context = DataContext::new("fruit").with_labels(["apple", "pear"], 2)?;
/// assert_eq!(context.name(), "fruit");
/// assert_eq!(context.label(1), Some("pear"));
/// assert_eq!(context.label(2), None);
/// # Ok::<(), sylva_core::DataSetError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataContext {
    name: Arc<str>,
    labels: Option<Arc<[Arc<str>]>>,
}

impl DataContext {
    /// Creates an unlabelled context.
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            labels: None,
        }
    }

    /// Attaches one label per instance.
    ///
    /// # Errors
    /// Returns [`DataSetError::LabelCountMismatch`] when the number of labels
    /// differs from `instances`.
    pub fn with_labels<I, S>(mut self, labels: I, instances: usize) -> Result<Self, DataSetError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        let labels: Arc<[Arc<str>]> = labels.into_iter().map(Into::into).collect();
        if labels.len() != instances {
            return Err(DataSetError::LabelCountMismatch {
                instances,
                labels: labels.len(),
            });
        }
        self.labels = Some(labels);
        Ok(self)
    }

    /// Returns the data set name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the label of `index`, if labels were attached.
    #[must_use]
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels
            .as_deref()
            .and_then(|labels| labels.get(index))
            .map(AsRef::as_ref)
    }

    /// Returns whether labels were attached.
    #[must_use]
    pub fn has_labels(&self) -> bool {
        self.labels.is_some()
    }
}

/// In-memory data set over owned feature vectors.
///
/// # Examples
/// ```
/// use sylva_core::{DataSet, VecDataSet};
///
/// let data = VecDataSet::new("points", vec![vec![0.0_f64], vec![1.0]]);
/// assert_eq!(data.len(), 2);
/// assert_eq!(data.feature(1)?, &[1.0]);
/// # Ok::<(), sylva_core::DataSetError>(())
/// ```
#[derive(Clone, Debug)]
pub struct VecDataSet<T> {
    rows: Vec<Vec<T>>,
    context: DataContext,
}

impl<T> VecDataSet<T> {
    /// Creates an unlabelled data set.
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>, rows: Vec<Vec<T>>) -> Self {
        Self {
            rows,
            context: DataContext::new(name),
        }
    }

    /// Creates a data set with one label per row.
    ///
    /// # Errors
    /// Returns [`DataSetError::LabelCountMismatch`] when the label count
    /// differs from the row count.
    pub fn with_labels<I, S>(
        name: impl Into<Arc<str>>,
        rows: Vec<Vec<T>>,
        labels: I,
    ) -> Result<Self, DataSetError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        let context = DataContext::new(name).with_labels(labels, rows.len())?;
        Ok(Self { rows, context })
    }

    /// Returns the stored rows.
    #[must_use]
    pub fn rows(&self) -> &[Vec<T>] {
        &self.rows
    }
}

impl<T> DataSet for VecDataSet<T> {
    type Feature = [T];
    type Context = DataContext;

    fn len(&self) -> usize {
        self.rows.len()
    }

    fn name(&self) -> &str {
        self.context.name()
    }

    fn feature(&self, index: usize) -> Result<&[T], DataSetError> {
        self.rows
            .get(index)
            .map(Vec::as_slice)
            .ok_or(DataSetError::OutOfBounds { index })
    }

    fn context(&self) -> DataContext {
        self.context.clone()
    }
}
