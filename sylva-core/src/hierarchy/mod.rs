//! Read-only view over a finished single-link dendrogram.
//!
//! A [`Hierarchy`] pairs the immutable node arena with the data set's context.
//! It answers structural queries (members of a subtree, merge heights, the
//! merge sequence) and flattens the tree into a [`Partition`] either by
//! cluster count or by height threshold.

mod centroid;
mod cut;
mod members;

use std::borrow::Cow;

use crate::{
    Result,
    dataset::DataContext,
    error::LinkageError,
    forest::Dendrogram,
    node::{ClusterNode, NodeId},
};

pub use self::{centroid::Centroids, cut::Partition, members::Members};

/// One merge of the dendrogram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Merge {
    /// Node created by the merge.
    pub node: NodeId,
    /// Subtree containing the first endpoint of the joining link.
    pub left: NodeId,
    /// Subtree containing the second endpoint of the joining link.
    pub right: NodeId,
    /// Dissimilarity at which the subtrees were joined.
    pub height: f64,
    /// Number of instances below the new node.
    pub size: usize,
}

/// Complete single-link hierarchy over `n` instances.
///
/// Cloning shares the node arena.
///
/// # Examples
/// ```
/// use sylva_core::{Euclidean, Linkage, VecDataSet};
///
/// let data = VecDataSet::new("abc", vec![vec![0.0_f64], vec![1.0], vec![10.0]]);
/// let hierarchy = Linkage::default().cluster(&data, &Euclidean)?;
///
/// assert_eq!(hierarchy.instance_count(), 3);
/// assert_eq!(hierarchy.merge_count(), 2);
/// assert_eq!(hierarchy.merge_height(hierarchy.root())?, 9.0);
///
/// let partition = hierarchy.cut_at(2)?;
/// assert_eq!(partition.members(0), Some(&[0, 1][..]));
/// assert_eq!(partition.members(1), Some(&[2][..]));
/// # Ok::<(), sylva_core::LinkageError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Hierarchy<C> {
    dendrogram: Dendrogram,
    context: C,
}

impl<C> Hierarchy<C> {
    pub(crate) fn new(dendrogram: Dendrogram, context: C) -> Self {
        Self {
            dendrogram,
            context,
        }
    }

    /// Node spanning every instance.
    #[must_use]
    #[rustfmt::skip]
    pub const fn root(&self) -> NodeId { self.dendrogram.root() }

    /// Number of instances (leaves).
    #[must_use]
    #[rustfmt::skip]
    pub const fn instance_count(&self) -> usize { self.dendrogram.leaf_count() }

    /// Number of merges, always `instance_count() - 1`.
    #[must_use]
    pub fn merge_count(&self) -> usize {
        self.dendrogram.merge_count()
    }

    /// Context handed over by the data set.
    #[must_use]
    #[rustfmt::skip]
    pub const fn context(&self) -> &C { &self.context }

    /// Underlying node arena.
    #[must_use]
    #[rustfmt::skip]
    pub const fn dendrogram(&self) -> &Dendrogram { &self.dendrogram }

    /// Returns the node stored at `id`.
    ///
    /// # Errors
    /// Returns [`LinkageError::UnknownNode`] when `id` is not part of this
    /// hierarchy.
    pub fn node(&self, id: NodeId) -> Result<&ClusterNode> {
        self.dendrogram
            .node(id)
            .ok_or(LinkageError::UnknownNode { node: id })
    }

    /// Height at which `node`'s children were joined.
    ///
    /// # Errors
    /// Returns [`LinkageError::NotAMerge`] for leaves and
    /// [`LinkageError::UnknownNode`] for ids outside the hierarchy.
    pub fn merge_height(&self, node: NodeId) -> Result<f64> {
        self.node(node)?
            .height()
            .ok_or(LinkageError::NotAMerge { node })
    }

    /// Height of the final merge, or `None` for a single-instance hierarchy.
    #[must_use]
    pub fn root_height(&self) -> Option<f64> {
        self.dendrogram
            .node(self.root())
            .and_then(ClusterNode::height)
    }

    /// Instances below `node`, left subtree first.
    ///
    /// The iterator is lazy and cheap to clone; repeated calls yield the same
    /// sequence.
    ///
    /// # Errors
    /// Returns [`LinkageError::UnknownNode`] for ids outside the hierarchy.
    pub fn members_of(&self, node: NodeId) -> Result<Members<'_>> {
        let size = self.node(node)?.size();
        Ok(Members::new(self.dendrogram.nodes(), node, size))
    }

    /// Merges in creation order; heights are non-decreasing.
    pub fn merges(&self) -> impl DoubleEndedIterator<Item = Merge> + '_ {
        let leaves = self.instance_count();
        self.dendrogram.nodes()[leaves..]
            .iter()
            .enumerate()
            .filter_map(move |(offset, node)| match *node {
                ClusterNode::Internal {
                    left,
                    right,
                    height,
                    size,
                } => Some(Merge {
                    node: NodeId::new(leaves + offset),
                    left,
                    right,
                    height,
                    size,
                }),
                ClusterNode::Leaf { .. } => None,
            })
    }
}

impl Hierarchy<DataContext> {
    /// Labels of the instances below `node`, in [`members_of`](Self::members_of)
    /// order. Unlabelled instances are rendered as their index.
    ///
    /// # Errors
    /// Returns [`LinkageError::UnknownNode`] for ids outside the hierarchy.
    ///
    /// # Examples
    /// ```
    /// use sylva_core::{Euclidean, Linkage, VecDataSet};
    ///
    /// let data = VecDataSet::with_labels(
    ///     "fruit",
    ///     vec![vec![0.0_f64], vec![0.5], vec![9.0]],
    ///     ["apple", "pear", "melon"],
    /// )?;
    /// let hierarchy = Linkage::default().cluster(&data, &Euclidean)?;
    /// let partition = hierarchy.cut_at(2)?;
    /// let labels: Vec<_> = hierarchy.labels_of(partition.clusters()[0])?.collect();
    /// assert_eq!(labels, ["apple", "pear"]);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn labels_of(
        &self,
        node: NodeId,
    ) -> Result<impl Iterator<Item = Cow<'_, str>> + Clone + '_> {
        let context = &self.context;
        Ok(self
            .members_of(node)?
            .map(move |instance| match context.label(instance) {
                Some(label) => Cow::Borrowed(label),
                None => Cow::Owned(instance.to_string()),
            }))
    }
}
