//! Flat partitions obtained by cutting the dendrogram.

use std::collections::BinaryHeap;

use tracing::debug;

use super::Hierarchy;
use crate::{
    Result,
    error::LinkageError,
    node::{ClusterNode, NodeId},
};

/// A flat clustering of every instance.
///
/// Clusters are ordered by their smallest member, so cluster `0` always holds
/// instance `0`. Member lists are sorted ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    clusters: Vec<NodeId>,
    members: Vec<Vec<usize>>,
    assignments: Vec<usize>,
}

impl Partition {
    fn from_roots<C>(hierarchy: &Hierarchy<C>, roots: Vec<NodeId>) -> Result<Self> {
        let mut groups = roots
            .into_iter()
            .map(|root| {
                let mut members: Vec<usize> = hierarchy.members_of(root)?.collect();
                members.sort_unstable();
                Ok((root, members))
            })
            .collect::<Result<Vec<_>>>()?;
        groups.sort_unstable_by_key(|(_, members)| members.first().copied());

        let mut assignments = vec![0; hierarchy.instance_count()];
        for (cluster, (_, members)) in groups.iter().enumerate() {
            for &instance in members {
                if let Some(slot) = assignments.get_mut(instance) {
                    *slot = cluster;
                }
            }
        }
        let (clusters, members) = groups.into_iter().unzip();
        Ok(Self {
            clusters,
            members,
            assignments,
        })
    }

    /// Number of clusters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    /// Returns whether the partition has no clusters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Dendrogram node of each cluster.
    #[must_use]
    pub fn clusters(&self) -> &[NodeId] {
        &self.clusters
    }

    /// Cluster index of every instance, contiguous from zero.
    #[must_use]
    pub fn assignments(&self) -> &[usize] {
        &self.assignments
    }

    /// Sorted members of cluster `cluster`.
    #[must_use]
    pub fn members(&self, cluster: usize) -> Option<&[usize]> {
        self.members.get(cluster).map(Vec::as_slice)
    }

    /// Number of members per cluster.
    #[must_use]
    pub fn sizes(&self) -> Vec<usize> {
        self.members.iter().map(Vec::len).collect()
    }
}

impl<C> Hierarchy<C> {
    /// Splits the hierarchy into exactly `k` clusters by undoing the `k - 1`
    /// most recent merges.
    ///
    /// # Errors
    /// Returns [`LinkageError::InvalidCut`] unless `1 <= k <= instance_count()`.
    pub fn cut_at(&self, k: usize) -> Result<Partition> {
        let instances = self.instance_count();
        if k == 0 || k > instances {
            return Err(LinkageError::InvalidCut {
                requested: k,
                instances,
            });
        }

        // Merge ids grow with merge order, so the largest id is always the
        // most recent merge still standing.
        let mut roots = BinaryHeap::from([self.root()]);
        while roots.len() < k {
            let Some(latest) = roots.pop() else {
                break;
            };
            match self.node(latest)?.children() {
                Some((left, right)) => {
                    roots.push(left);
                    roots.push(right);
                }
                None => {
                    roots.push(latest);
                    break;
                }
            }
        }
        debug!(requested = k, clusters = roots.len(), "cut hierarchy by count");
        Partition::from_roots(self, roots.into_vec())
    }

    /// Splits the hierarchy by undoing every merge strictly above `height`.
    ///
    /// # Errors
    /// Returns [`LinkageError::InvalidHeight`] when `height` is NaN or
    /// negative.
    ///
    /// # Examples
    /// ```
    /// use sylva_core::{Euclidean, Linkage, VecDataSet};
    ///
    /// let data = VecDataSet::new("line", vec![vec![0.0_f64], vec![1.0], vec![2.0], vec![10.0]]);
    /// let hierarchy = Linkage::default().cluster(&data, &Euclidean)?;
    /// assert_eq!(hierarchy.cut_at_height(1.0)?.len(), 2);
    /// assert_eq!(hierarchy.cut_at_height(0.5)?.len(), 4);
    /// assert_eq!(hierarchy.cut_at_height(f64::INFINITY)?.len(), 1);
    /// # Ok::<(), sylva_core::LinkageError>(())
    /// ```
    pub fn cut_at_height(&self, height: f64) -> Result<Partition> {
        if height.is_nan() || height < 0.0 {
            return Err(LinkageError::InvalidHeight { height });
        }

        let mut roots = Vec::new();
        let mut pending = vec![self.root()];
        while let Some(id) = pending.pop() {
            match *self.node(id)? {
                ClusterNode::Internal {
                    left,
                    right,
                    height: merged_at,
                    ..
                } if merged_at > height => {
                    pending.push(right);
                    pending.push(left);
                }
                _ => roots.push(id),
            }
        }
        debug!(height, clusters = roots.len(), "cut hierarchy by height");
        Partition::from_roots(self, roots)
    }
}
