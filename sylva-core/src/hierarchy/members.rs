//! Lazy in-order traversal of a subtree's leaves.

use std::iter::FusedIterator;

use crate::node::{ClusterNode, NodeId};

/// Instances below a node, left subtree before right.
///
/// Produced by [`crate::Hierarchy::members_of`]. Clone the iterator before
/// consuming it to walk the same subtree again.
#[derive(Debug, Clone)]
pub struct Members<'a> {
    nodes: &'a [ClusterNode],
    stack: Vec<NodeId>,
    remaining: usize,
}

impl<'a> Members<'a> {
    pub(super) fn new(nodes: &'a [ClusterNode], start: NodeId, size: usize) -> Self {
        Self {
            nodes,
            stack: vec![start],
            remaining: size,
        }
    }
}

impl Iterator for Members<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while let Some(id) = self.stack.pop() {
            match self.nodes.get(id.get()) {
                None => self.stack.clear(),
                Some(ClusterNode::Leaf { instance }) => {
                    self.remaining = self.remaining.saturating_sub(1);
                    return Some(*instance);
                }
                Some(ClusterNode::Internal { left, right, .. }) => {
                    self.stack.push(*right);
                    self.stack.push(*left);
                }
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Members<'_> {}

impl FusedIterator for Members<'_> {}
