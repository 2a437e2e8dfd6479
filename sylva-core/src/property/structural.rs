//! Property 2: Structural invariants of the dendrogram and its cuts.
//!
//! - **Counts**: `n` leaves and `n - 1` merges; the root spans everything.
//! - **Arena order**: children always precede their parent.
//! - **Monotonicity**: heights never decrease from child to parent.
//! - **Sizes**: every merge size is the sum of its children's sizes.
//! - **Cuts**: `cut_at(k)` yields `k` clusters covering every instance once.
//! - **Members**: traversal is idempotent and agrees with node sizes.

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::{ClusterNode, DataContext, Hierarchy, NodeId};

use super::equivalence::cluster_fixture;
use super::types::PointFixture;

/// Runs the structural invariant property for the given fixture.
pub(super) fn run_structural_invariants_property(fixture: &PointFixture) -> TestCaseResult {
    let hierarchy = cluster_fixture(fixture)?;
    let context = fixture.describe();

    validate_counts(&hierarchy, &context)?;
    validate_nodes(&hierarchy, &context)?;
    validate_cuts(&hierarchy, &context)?;
    validate_members(&hierarchy, &context)?;

    Ok(())
}

fn fail(message: String, context: &str) -> TestCaseError {
    TestCaseError::fail(format!("{message} ({context})"))
}

fn validate_counts(hierarchy: &Hierarchy<DataContext>, context: &str) -> TestCaseResult {
    let n = hierarchy.instance_count();
    if hierarchy.merge_count() + 1 != n {
        return Err(fail(
            format!("{} merges for {n} instances", hierarchy.merge_count()),
            context,
        ));
    }
    let root_size = hierarchy
        .node(hierarchy.root())
        .map_err(|e| fail(format!("root lookup failed: {e}"), context))?
        .size();
    if root_size != n {
        return Err(fail(format!("root spans {root_size} of {n} instances"), context));
    }
    Ok(())
}

fn validate_nodes(hierarchy: &Hierarchy<DataContext>, context: &str) -> TestCaseResult {
    let nodes = hierarchy.dendrogram().nodes();
    let n = hierarchy.instance_count();
    for (index, node) in nodes.iter().enumerate() {
        match *node {
            ClusterNode::Leaf { instance } => {
                if index >= n || instance != index {
                    return Err(fail(format!("leaf {instance} stored at {index}"), context));
                }
            }
            ClusterNode::Internal {
                left,
                right,
                height,
                size,
            } => {
                if left.get() >= index || right.get() >= index {
                    return Err(fail(
                        format!("merge #{index} refers forward to {left}/{right}"),
                        context,
                    ));
                }
                let (left_node, right_node) = (nodes[left.get()], nodes[right.get()]);
                if left_node.size() + right_node.size() != size {
                    return Err(fail(format!("merge #{index} has inconsistent size {size}"), context));
                }
                for child in [left_node, right_node] {
                    if child.height().is_some_and(|child_height| child_height > height) {
                        return Err(fail(
                            format!("merge #{index} at {height} sits below a higher child"),
                            context,
                        ));
                    }
                }
            }
        }
    }
    let heights: Vec<f64> = hierarchy.merges().map(|merge| merge.height).collect();
    if heights.windows(2).any(|pair| pair[0] > pair[1]) {
        return Err(fail(format!("merge heights decrease: {heights:?}"), context));
    }
    Ok(())
}

fn validate_cuts(hierarchy: &Hierarchy<DataContext>, context: &str) -> TestCaseResult {
    let n = hierarchy.instance_count();
    for k in 1..=n {
        let partition = hierarchy
            .cut_at(k)
            .map_err(|e| fail(format!("cut_at({k}) failed: {e}"), context))?;
        if partition.len() != k {
            return Err(fail(format!("cut_at({k}) produced {} clusters", partition.len()), context));
        }
        if partition.sizes().iter().sum::<usize>() != n {
            return Err(fail(format!("cut_at({k}) does not cover every instance"), context));
        }
        let mut highest = 0;
        for &cluster in partition.assignments() {
            if cluster > highest + 1 || cluster >= k {
                return Err(fail(format!("cut_at({k}) labels are not contiguous"), context));
            }
            highest = highest.max(cluster);
        }
    }
    Ok(())
}

fn validate_members(hierarchy: &Hierarchy<DataContext>, context: &str) -> TestCaseResult {
    for id in (0..hierarchy.dendrogram().nodes().len()).map(NodeId::new) {
        let members = hierarchy
            .members_of(id)
            .map_err(|e| fail(format!("members_of({id}) failed: {e}"), context))?;
        let first: Vec<usize> = members.clone().collect();
        let second: Vec<usize> = members.collect();
        if first != second {
            return Err(fail(format!("members_of({id}) is not idempotent"), context));
        }
        let size = hierarchy
            .node(id)
            .map_err(|e| fail(format!("node({id}) failed: {e}"), context))?
            .size();
        if first.len() != size {
            return Err(fail(format!("members_of({id}) yields {} of {size}", first.len()), context));
        }
    }
    let mut everything: Vec<usize> = hierarchy
        .members_of(hierarchy.root())
        .map_err(|e| fail(format!("members_of(root) failed: {e}"), context))?
        .collect();
    everything.sort_unstable();
    if !everything.iter().copied().eq(0..hierarchy.instance_count()) {
        return Err(fail("root members are not a permutation".to_owned(), context));
    }
    Ok(())
}
