//! Disjoint-set bookkeeping for the merge forest.
//!
//! Each set remembers the dendrogram node that currently represents it, so
//! finding an instance's cluster also yields the subtree to merge.

use crate::node::NodeId;

#[derive(Clone, Debug)]
pub(super) struct DisjointSet {
    parent: Vec<usize>,
    size: Vec<usize>,
    component_node: Vec<NodeId>,
}

impl DisjointSet {
    pub(super) fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
            component_node: (0..n).map(NodeId::new).collect(),
        }
    }

    pub(super) fn len(&self) -> usize {
        self.parent.len()
    }

    /// Returns the representative of `element`, compressing the path walked.
    ///
    /// `element` must be below [`len`](Self::len).
    pub(super) fn find(&mut self, mut element: usize) -> usize {
        let mut root = element;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        while self.parent[element] != root {
            let parent = self.parent[element];
            self.parent[element] = root;
            element = parent;
        }

        root
    }

    /// Joins two distinct roots, attaching the smaller set beneath the larger.
    /// Equal sizes keep the lower representative. Returns the surviving root.
    pub(super) fn union_roots(&mut self, left: usize, right: usize) -> usize {
        debug_assert_ne!(left, right, "union_roots requires distinct roots");
        let (winner, loser) = match self.size[left].cmp(&self.size[right]) {
            std::cmp::Ordering::Greater => (left, right),
            std::cmp::Ordering::Less => (right, left),
            std::cmp::Ordering::Equal => (left.min(right), left.max(right)),
        };
        self.parent[loser] = winner;
        self.size[winner] += self.size[loser];
        winner
    }

    pub(super) fn component_node(&self, root: usize) -> NodeId {
        self.component_node[root]
    }

    pub(super) fn set_component_node(&mut self, root: usize, node: NodeId) {
        self.component_node[root] = node;
    }

    pub(super) fn set_size(&self, root: usize) -> usize {
        self.size[root]
    }
}
