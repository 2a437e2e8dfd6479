//! Sylva core library: single-link hierarchical agglomerative clustering.
//!
//! Every instance pair is evaluated once through a [`Dissimilarity`] oracle,
//! queued in a [`LinkQueue`], and merged through a disjoint-set
//! [`MergeForest`] whose node arena becomes the finished [`Hierarchy`].
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod cancel;
mod dataset;
mod dissimilarity;
mod error;
mod forest;
mod hierarchy;
mod link_queue;
mod linkage;
mod merge_run;
mod node;

#[cfg(test)]
pub(crate) mod test_utils;

#[cfg(test)]
mod property;

pub use crate::{
    builder::{ExecutionStrategy, LinkageBuilder, MaybeSync},
    cancel::CancellationToken,
    dataset::{DataContext, DataSet, VecDataSet},
    dissimilarity::{Cosine, Dissimilarity, Euclidean, Manhattan, SquaredEuclidean},
    error::{
        DataSetError, DataSetErrorCode, DissimilarityError, DissimilarityErrorCode, LinkageError,
        LinkageErrorCode, Result, VectorKind,
    },
    forest::{ClusterId, Dendrogram, MergeForest, MergeOutcome},
    hierarchy::{Centroids, Hierarchy, Members, Merge, Partition},
    link_queue::{Link, LinkQueue, TieBreak},
    linkage::Linkage,
    merge_run::{MergeRun, MergeStep},
    node::{ClusterNode, NodeId},
};
