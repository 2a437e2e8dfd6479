//! Mean feature vectors per dendrogram node.
//!
//! Leaves take their instance's features; a merge node takes the
//! size-weighted mean of its children, so the whole table is filled in one
//! bottom-up pass over the arena.

use std::sync::Arc;

use super::Hierarchy;
use crate::{
    Result,
    dataset::DataSet,
    error::{DataSetError, LinkageError},
    node::{ClusterNode, NodeId},
};

/// Centroid of every node of a hierarchy, indexed by [`NodeId`].
#[derive(Debug, Clone, PartialEq)]
pub struct Centroids {
    dimension: usize,
    values: Vec<f64>,
}

impl Centroids {
    /// Feature dimension shared by every centroid.
    #[must_use]
    #[rustfmt::skip]
    pub const fn dimension(&self) -> usize { self.dimension }

    /// Number of nodes covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len().checked_div(self.dimension).unwrap_or(0)
    }

    /// Returns whether no node is covered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Centroid of `node`.
    #[must_use]
    pub fn get(&self, node: NodeId) -> Option<&[f64]> {
        let start = node.get().checked_mul(self.dimension)?;
        self.values.get(start..start + self.dimension)
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "cluster sizes stay far below 2^52."
)]
fn count_as_f64(count: usize) -> f64 {
    count as f64
}

/// Reads instance features as `f64`, checking they share one dimension.
struct FeatureReader<'d, D: ?Sized> {
    data_set: &'d D,
    dimension: Option<usize>,
}

impl<'d, D, T> FeatureReader<'d, D>
where
    D: DataSet<Feature = [T]> + ?Sized,
    T: Copy + Into<f64>,
{
    const fn new(data_set: &'d D) -> Self {
        Self {
            data_set,
            dimension: None,
        }
    }

    fn read(&mut self, instance: usize) -> Result<&'d [T]> {
        let data_set = self.data_set;
        let features = data_set
            .feature(instance)
            .map_err(|error| self.failure(error))?;
        match self.dimension {
            None if features.is_empty() => Err(self.failure(DataSetError::ZeroDimension)),
            None => {
                self.dimension = Some(features.len());
                Ok(features)
            }
            Some(dimension) if dimension != features.len() => {
                Err(self.failure(DataSetError::DimensionMismatch {
                    left: dimension,
                    right: features.len(),
                }))
            }
            Some(_) => Ok(features),
        }
    }

    fn failure(&self, error: DataSetError) -> LinkageError {
        LinkageError::DataSet {
            data_set: Arc::from(self.data_set.name()),
            error,
        }
    }
}

impl<C> Hierarchy<C> {
    /// Mean feature vector of the instances below `node`.
    ///
    /// `data_set` must be the data set this hierarchy was built from.
    ///
    /// # Errors
    /// Returns [`LinkageError::UnknownNode`] for ids outside the hierarchy and
    /// [`LinkageError::DataSet`] when a feature cannot be read or the
    /// dimensions disagree.
    ///
    /// # Examples
    /// ```
    /// use sylva_core::{Euclidean, Linkage, VecDataSet};
    ///
    /// let data = VecDataSet::new("plane", vec![vec![0.0_f32, 0.0], vec![2.0, 0.0], vec![9.0, 9.0]]);
    /// let hierarchy = Linkage::default().cluster(&data, &Euclidean)?;
    /// let pair = hierarchy.cut_at(2)?.clusters()[0];
    /// assert_eq!(hierarchy.centroid_of(pair, &data)?, vec![1.0, 0.0]);
    /// # Ok::<(), sylva_core::LinkageError>(())
    /// ```
    pub fn centroid_of<D, T>(&self, node: NodeId, data_set: &D) -> Result<Vec<f64>>
    where
        D: DataSet<Feature = [T]> + ?Sized,
        T: Copy + Into<f64>,
    {
        let members = self.members_of(node)?;
        let count = members.len();
        let mut reader = FeatureReader::new(data_set);
        let mut sums: Vec<f64> = Vec::new();
        for instance in members {
            let features = reader.read(instance)?;
            if sums.is_empty() {
                sums.resize(features.len(), 0.0);
            }
            for (sum, &value) in sums.iter_mut().zip(features) {
                *sum += value.into();
            }
        }
        let count = count_as_f64(count);
        Ok(sums.into_iter().map(|sum| sum / count).collect())
    }

    /// Centroids of every node, computed bottom-up in one pass.
    ///
    /// # Errors
    /// Returns [`LinkageError::DataSet`] when a feature cannot be read or the
    /// dimensions disagree.
    pub fn centroids<D, T>(&self, data_set: &D) -> Result<Centroids>
    where
        D: DataSet<Feature = [T]> + ?Sized,
        T: Copy + Into<f64>,
    {
        let nodes = self.dendrogram.nodes();
        let mut reader = FeatureReader::new(data_set);
        let mut values: Vec<f64> = Vec::new();
        let mut dimension = 0;

        for node in nodes {
            match *node {
                ClusterNode::Leaf { instance } => {
                    let features = reader.read(instance)?;
                    dimension = features.len();
                    values.extend(features.iter().map(|&value| value.into()));
                }
                ClusterNode::Internal {
                    left, right, size, ..
                } => {
                    let weight_of = |id: NodeId| nodes.get(id.get()).map_or(0, ClusterNode::size);
                    let left_weight = count_as_f64(weight_of(left));
                    let right_weight = count_as_f64(weight_of(right));
                    let total = count_as_f64(size);
                    let left_start = left.get() * dimension;
                    let right_start = right.get() * dimension;
                    for offset in 0..dimension {
                        let mean = (values[left_start + offset] * left_weight
                            + values[right_start + offset] * right_weight)
                            / total;
                        values.push(mean);
                    }
                }
            }
        }

        Ok(Centroids { dimension, values })
    }
}
