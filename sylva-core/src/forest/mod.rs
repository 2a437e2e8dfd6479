//! Merge forest: a disjoint-set forest that doubles as the dendrogram under
//! construction.
//!
//! Nodes live in an append-only arena indexed by [`NodeId`]; a separate
//! parent array tracks which instances currently share a cluster. A merge
//! either finds both endpoints already joined and changes nothing, or appends
//! exactly one internal node and retires one cluster.

mod union_find;

use std::sync::Arc;

use tracing::trace;

use crate::{
    error::{LinkageError, Result},
    link_queue::check_weight,
    node::{ClusterNode, NodeId},
};

use self::union_find::DisjointSet;

/// Identifier of a cluster that currently exists in a [`MergeForest`].
///
/// Ids are only meaningful for the forest that issued them and only until the
/// next merge touching that cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClusterId(usize);

/// Result of [`MergeForest::merge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Both endpoints were already in one cluster; nothing changed.
    NoOp,
    /// A new internal node was appended.
    Merged {
        /// Cluster that now contains both endpoints.
        cluster: ClusterId,
        /// The node recording the merge.
        node: NodeId,
    },
}

/// Disjoint-set forest over `n` instances with an embedded dendrogram arena.
///
/// # Examples
/// ```
/// use sylva_core::{MergeForest, MergeOutcome};
///
/// let mut forest = MergeForest::new(3);
/// assert_eq!(forest.cluster_count(), 3);
/// assert!(matches!(forest.merge(1.0, 0, 1)?, MergeOutcome::Merged { .. }));
/// assert_eq!(forest.merge(2.0, 1, 0)?, MergeOutcome::NoOp);
/// assert_eq!(forest.cluster_count(), 2);
/// forest.merge(9.0, 2, 0)?;
/// let dendrogram = forest.into_dendrogram()?;
/// assert_eq!(dendrogram.merge_count(), 2);
/// # Ok::<(), sylva_core::LinkageError>(())
/// ```
#[derive(Debug, Clone)]
pub struct MergeForest {
    nodes: Vec<ClusterNode>,
    sets: DisjointSet,
    clusters: usize,
}

impl MergeForest {
    /// Creates `n` singleton clusters, one leaf per instance.
    #[must_use]
    pub fn new(n: usize) -> Self {
        let mut nodes = Vec::with_capacity(n.saturating_mul(2).saturating_sub(1));
        nodes.extend((0..n).map(|instance| ClusterNode::Leaf { instance }));
        Self {
            nodes,
            sets: DisjointSet::new(n),
            clusters: n,
        }
    }

    /// Number of instances (leaves).
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.sets.len()
    }

    /// Number of disjoint clusters remaining.
    #[must_use]
    pub const fn cluster_count(&self) -> usize {
        self.clusters
    }

    /// Returns the cluster currently containing `instance`.
    ///
    /// # Errors
    /// Returns [`LinkageError::InstanceOutOfBounds`] for unknown instances.
    pub fn find(&mut self, instance: usize) -> Result<ClusterId> {
        self.check_instance(instance)?;
        Ok(ClusterId(self.sets.find(instance)))
    }

    /// Returns the dendrogram node representing `cluster`.
    #[must_use]
    pub fn cluster_root(&self, cluster: ClusterId) -> NodeId {
        self.sets.component_node(cluster.0)
    }

    /// Number of instances in `cluster`.
    #[must_use]
    pub fn cluster_size(&self, cluster: ClusterId) -> usize {
        self.sets.set_size(cluster.0)
    }

    /// Joins the clusters of `a` and `b` at `weight`.
    ///
    /// The new node's left child is the subtree containing `a`.
    ///
    /// # Errors
    /// Returns [`LinkageError::InstanceOutOfBounds`] for unknown instances and
    /// [`LinkageError::InvalidDissimilarity`] when `weight` is NaN, infinite
    /// or negative. Neither failure changes the forest.
    pub fn merge(&mut self, weight: f64, a: usize, b: usize) -> Result<MergeOutcome> {
        let left_root = self.find(a)?.0;
        let right_root = self.find(b)?.0;
        check_weight(a.min(b), a.max(b), weight)?;
        if left_root == right_root {
            return Ok(MergeOutcome::NoOp);
        }

        let left = self.sets.component_node(left_root);
        let right = self.sets.component_node(right_root);
        let size = self.sets.set_size(left_root) + self.sets.set_size(right_root);
        let node = NodeId::new(self.nodes.len());
        self.nodes.push(ClusterNode::Internal {
            left,
            right,
            height: weight,
            size,
        });

        let merged = self.sets.union_roots(left_root, right_root);
        self.sets.set_component_node(merged, node);
        self.clusters -= 1;
        trace!(%node, %left, %right, height = weight, size, "merged clusters");

        Ok(MergeOutcome::Merged {
            cluster: ClusterId(merged),
            node,
        })
    }

    /// Returns the node stored at `id`.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&ClusterNode> {
        self.nodes.get(id.get())
    }

    /// Returns the arena in creation order.
    #[must_use]
    pub fn nodes(&self) -> &[ClusterNode] {
        &self.nodes
    }

    /// Seals the forest once a single cluster remains.
    ///
    /// # Errors
    /// Returns [`LinkageError::Disconnected`] unless exactly one cluster
    /// remains.
    pub fn into_dendrogram(mut self) -> Result<Dendrogram> {
        if self.clusters != 1 {
            return Err(LinkageError::Disconnected {
                clusters_remaining: self.clusters,
            });
        }
        let root_cluster = self.sets.find(0);
        let root = self.sets.component_node(root_cluster);
        Ok(Dendrogram {
            leaves: self.sets.len(),
            root,
            nodes: Arc::from(self.nodes),
        })
    }

    fn check_instance(&self, instance: usize) -> Result<()> {
        if instance >= self.sets.len() {
            return Err(LinkageError::InstanceOutOfBounds {
                index: instance,
                instances: self.sets.len(),
            });
        }
        Ok(())
    }
}

/// A finished, immutable dendrogram.
///
/// Cloning shares the arena.
#[derive(Debug, Clone, PartialEq)]
pub struct Dendrogram {
    nodes: Arc<[ClusterNode]>,
    root: NodeId,
    leaves: usize,
}

impl Dendrogram {
    /// Root node spanning every instance.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Number of leaves.
    #[must_use]
    pub const fn leaf_count(&self) -> usize {
        self.leaves
    }

    /// Number of internal nodes, always `leaf_count() - 1`.
    #[must_use]
    pub fn merge_count(&self) -> usize {
        self.nodes.len() - self.leaves
    }

    /// Returns the node stored at `id`.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&ClusterNode> {
        self.nodes.get(id.get())
    }

    /// Returns the arena: leaves first, then merges in creation order.
    #[must_use]
    pub fn nodes(&self) -> &[ClusterNode] {
        &self.nodes
    }
}

#[cfg(test)]
mod tests;

#[cfg(kani)]
mod kani_proofs {
    //! Bounded proofs for the merge forest counting invariants.

    use super::{MergeForest, MergeOutcome};

    /// Every successful merge on four leaves appends exactly one node and
    /// retires exactly one cluster, whatever order the links arrive in.
    #[kani::proof]
    #[kani::unwind(8)]
    fn verify_merge_accounting_4_nodes() {
        let mut forest = MergeForest::new(4);
        for step in 0..6_u8 {
            let a: usize = kani::any();
            let b: usize = kani::any();
            kani::assume(a < 4 && b < 4);
            let before_nodes = forest.nodes().len();
            let before_clusters = forest.cluster_count();
            match forest.merge(f64::from(step), a, b) {
                Ok(MergeOutcome::Merged { .. }) => {
                    kani::assert(forest.nodes().len() == before_nodes + 1, "one node per merge");
                    kani::assert(
                        forest.cluster_count() + 1 == before_clusters,
                        "one cluster retired per merge",
                    );
                }
                Ok(MergeOutcome::NoOp) => {
                    kani::assert(forest.nodes().len() == before_nodes, "no-op leaves arena");
                    kani::assert(forest.cluster_count() == before_clusters, "no-op keeps count");
                }
                Err(_) => kani::assert(false, "in-range merges cannot fail"),
            }
        }
        kani::assert(
            forest.nodes().len() + forest.cluster_count() == 8,
            "leaves plus merges plus remaining clusters is invariant",
        );
    }
}
