//! Unit tests for the merge forest.

use super::*;
use rstest::{fixture, rstest};

#[fixture]
fn forest() -> MergeForest {
    MergeForest::new(4)
}

#[rstest]
fn starts_with_one_leaf_per_instance(forest: MergeForest) {
    assert_eq!(forest.leaf_count(), 4);
    assert_eq!(forest.cluster_count(), 4);
    assert_eq!(forest.nodes().len(), 4);
    assert!(forest.nodes().iter().all(ClusterNode::is_leaf));
}

#[rstest]
fn merge_appends_internal_node(mut forest: MergeForest) {
    let outcome = forest.merge(1.5, 2, 0).expect("in-range merge succeeds");
    let MergeOutcome::Merged { cluster, node } = outcome else {
        panic!("expected a merge, got {outcome:?}");
    };
    assert_eq!(node, NodeId::new(4));
    assert_eq!(forest.cluster_root(cluster), node);
    assert_eq!(forest.cluster_size(cluster), 2);
    assert_eq!(
        forest.node(node),
        Some(&ClusterNode::Internal {
            left: NodeId::new(2),
            right: NodeId::new(0),
            height: 1.5,
            size: 2,
        })
    );
    assert_eq!(forest.cluster_count(), 3);
}

#[rstest]
fn merging_joined_instances_is_a_no_op(mut forest: MergeForest) {
    forest.merge(1.0, 0, 1).expect("first merge succeeds");
    let before = forest.nodes().to_vec();
    assert_eq!(forest.merge(2.0, 1, 0), Ok(MergeOutcome::NoOp));
    assert_eq!(forest.nodes(), before.as_slice());
    assert_eq!(forest.cluster_count(), 3);
}

#[rstest]
fn find_agrees_after_merges(mut forest: MergeForest) {
    forest.merge(1.0, 0, 1).expect("merge 0-1");
    forest.merge(2.0, 2, 3).expect("merge 2-3");
    let a = forest.find(0).expect("0 is in range");
    let b = forest.find(1).expect("1 is in range");
    let c = forest.find(3).expect("3 is in range");
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[rstest]
#[case(4)]
#[case(usize::MAX)]
fn out_of_range_instances_are_rejected(mut forest: MergeForest, #[case] index: usize) {
    let expected = LinkageError::InstanceOutOfBounds {
        index,
        instances: 4,
    };
    assert_eq!(forest.find(index), Err(expected.clone()));
    assert_eq!(forest.merge(1.0, 0, index), Err(expected));
    assert_eq!(forest.cluster_count(), 4);
}

#[rstest]
fn sizes_accumulate_through_nested_merges(mut forest: MergeForest) {
    forest.merge(1.0, 0, 1).expect("merge 0-1");
    forest.merge(2.0, 2, 3).expect("merge 2-3");
    let outcome = forest.merge(3.0, 3, 0).expect("merge pairs");
    let MergeOutcome::Merged { node, .. } = outcome else {
        panic!("expected a merge, got {outcome:?}");
    };
    let root = forest.node(node).expect("node was appended");
    assert_eq!(root.size(), 4);
    assert_eq!(root.children(), Some((NodeId::new(5), NodeId::new(4))));
}

#[rstest]
fn dendrogram_requires_a_single_cluster(mut forest: MergeForest) {
    forest.merge(1.0, 0, 1).expect("merge 0-1");
    let err = forest
        .clone()
        .into_dendrogram()
        .expect_err("three clusters remain");
    assert_eq!(
        err,
        LinkageError::Disconnected {
            clusters_remaining: 3
        }
    );

    forest.merge(2.0, 1, 2).expect("merge 1-2");
    forest.merge(3.0, 3, 2).expect("merge 3-2");
    let dendrogram = forest.into_dendrogram().expect("one cluster remains");
    assert_eq!(dendrogram.root(), NodeId::new(6));
    assert_eq!(dendrogram.leaf_count(), 4);
    assert_eq!(dendrogram.merge_count(), 3);
}

#[rstest]
fn single_leaf_forest_is_already_complete() {
    let dendrogram = MergeForest::new(1)
        .into_dendrogram()
        .expect("a single leaf is one cluster");
    assert_eq!(dendrogram.root(), NodeId::new(0));
    assert_eq!(dendrogram.merge_count(), 0);
}

#[rstest]
fn identical_merge_sequences_build_identical_arenas() {
    let build = || {
        let mut forest = MergeForest::new(5);
        for (weight, a, b) in [(0.5, 3, 4), (1.0, 0, 1), (1.0, 1, 3), (2.0, 2, 0)] {
            forest.merge(weight, a, b).expect("in-range merge succeeds");
        }
        forest.into_dendrogram().expect("forest is connected")
    };
    assert_eq!(build(), build());
}

#[rstest]
#[case(f64::NAN)]
#[case(f64::INFINITY)]
#[case(-0.5)]
fn invalid_heights_leave_the_forest_untouched(mut forest: MergeForest, #[case] weight: f64) {
    let err = forest
        .merge(weight, 3, 1)
        .expect_err("invalid heights must be rejected");
    assert!(matches!(
        err,
        LinkageError::InvalidDissimilarity { left: 1, right: 3, .. }
    ));
    assert_eq!(forest.cluster_count(), 4);
    assert_eq!(forest.nodes().len(), 4);
}
