//! Dendrogram node types shared by the merge forest and the hierarchy view.

use std::fmt;

/// Position of a node inside the dendrogram arena.
///
/// Leaves occupy `0..n` (leaf `i` wraps instance `i`); merge nodes occupy
/// `n..2n-1` in the order the merges happened.
///
/// # Examples
/// ```
/// use sylva_core::NodeId;
///
/// let id = NodeId::new(3);
/// assert_eq!(id.get(), 3);
/// assert_eq!(id.to_string(), "#3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Wraps a raw arena index.
    #[rustfmt::skip]
    #[must_use]
    pub const fn new(index: usize) -> Self { Self(index) }

    /// Returns the raw arena index.
    #[rustfmt::skip]
    #[must_use]
    pub const fn get(self) -> usize { self.0 }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node of the dendrogram. Nodes are never mutated once appended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClusterNode {
    /// A single instance.
    Leaf {
        /// Index of the wrapped instance.
        instance: usize,
    },
    /// The union of two clusters.
    Internal {
        /// Subtree containing the first endpoint of the joining link.
        left: NodeId,
        /// Subtree containing the second endpoint of the joining link.
        right: NodeId,
        /// Dissimilarity at which the children were joined.
        height: f64,
        /// Number of instances below this node.
        size: usize,
    },
}

impl ClusterNode {
    /// Number of instances below the node.
    #[must_use]
    pub const fn size(&self) -> usize {
        match self {
            Self::Leaf { .. } => 1,
            Self::Internal { size, .. } => *size,
        }
    }

    /// Merge height, or `None` for leaves.
    #[must_use]
    pub const fn height(&self) -> Option<f64> {
        match self {
            Self::Leaf { .. } => None,
            Self::Internal { height, .. } => Some(*height),
        }
    }

    /// Children of a merge node.
    #[must_use]
    pub const fn children(&self) -> Option<(NodeId, NodeId)> {
        match self {
            Self::Leaf { .. } => None,
            Self::Internal { left, right, .. } => Some((*left, *right)),
        }
    }

    /// Returns `true` for leaves.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }
}
