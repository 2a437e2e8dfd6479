//! Error types for the sylva clustering engine.
//!
//! Every public error enum carries a stable machine-readable code so callers
//! can branch on failures without matching display strings.

use std::{fmt, sync::Arc};

use thiserror::Error;

use crate::{builder::ExecutionStrategy, node::NodeId};

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced by [`crate::DataSet`] operations.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum DataSetError {
    /// Requested index was outside the data set's bounds.
    #[error("index {index} is out of bounds")]
    OutOfBounds {
        /// The requested instance index.
        index: usize,
    },
    /// Feature vectors in the data set had different dimensions.
    #[error("dimension mismatch: left={left}, right={right}")]
    DimensionMismatch {
        /// Dimensionality of the first vector.
        left: usize,
        /// Dimensionality of the offending vector.
        right: usize,
    },
    /// Data set contained no rows.
    #[error("data set contains no rows")]
    EmptyData,
    /// Data set rows must have positive dimension.
    #[error("data set vectors must have positive dimension")]
    ZeroDimension,
    /// The number of labels did not match the number of instances.
    #[error("data set has {instances} instances but {labels} labels were given")]
    LabelCountMismatch {
        /// Number of instances in the data set.
        instances: usize,
        /// Number of labels supplied.
        labels: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`DataSetError`] variants.
    enum DataSetErrorCode for DataSetError {
        /// Requested index was outside the data set's bounds.
        OutOfBounds => OutOfBounds { .. } => "DATA_SET_OUT_OF_BOUNDS",
        /// Feature vectors had different dimensions.
        DimensionMismatch => DimensionMismatch { .. } => "DATA_SET_DIMENSION_MISMATCH",
        /// Data set contained no rows.
        EmptyData => EmptyData => "DATA_SET_EMPTY",
        /// Data set rows must have positive dimension.
        ZeroDimension => ZeroDimension => "DATA_SET_ZERO_DIMENSION",
        /// The number of labels did not match the number of instances.
        LabelCountMismatch => LabelCountMismatch { .. } => "DATA_SET_LABEL_COUNT_MISMATCH",
    }
}

/// Identifies whether an error was produced while inspecting the left or right
/// argument of a dissimilarity computation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VectorKind {
    /// Value originating from the first argument.
    Left,
    /// Value originating from the second argument.
    Right,
}

impl fmt::Display for VectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}

/// Errors emitted by the built-in [`crate::Dissimilarity`] measures.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum DissimilarityError {
    /// Either input vector had zero length.
    #[error("vectors must have positive dimension")]
    ZeroLength,
    /// Input vectors had different lengths.
    #[error("dimension mismatch: left={left}, right={right}")]
    DimensionMismatch {
        /// Dimensionality of the left vector.
        left: usize,
        /// Dimensionality of the right vector.
        right: usize,
    },
    /// Encountered a non-finite component in one of the vectors.
    #[error("{which} vector contains a non-finite value at index {index}: {value}")]
    NonFinite {
        /// Which argument held the value.
        which: VectorKind,
        /// Component index of the value.
        index: usize,
        /// The offending value.
        value: f64,
    },
    /// Cosine dissimilarity is undefined for zero-magnitude vectors.
    #[error("{which} vector has zero magnitude")]
    ZeroMagnitude {
        /// Which argument had zero magnitude.
        which: VectorKind,
    },
}

define_error_codes! {
    /// Stable codes describing [`DissimilarityError`] variants.
    enum DissimilarityErrorCode for DissimilarityError {
        /// Either input vector had zero length.
        ZeroLength => ZeroLength => "DISSIMILARITY_ZERO_LENGTH",
        /// Input vectors had different lengths.
        DimensionMismatch => DimensionMismatch { .. } => "DISSIMILARITY_DIMENSION_MISMATCH",
        /// A vector contained a non-finite component.
        NonFinite => NonFinite { .. } => "DISSIMILARITY_NON_FINITE",
        /// A vector had zero magnitude.
        ZeroMagnitude => ZeroMagnitude { .. } => "DISSIMILARITY_ZERO_MAGNITUDE",
    }
}

/// Error type produced when configuring or running [`crate::Linkage`] and when
/// querying a finished [`crate::Hierarchy`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum LinkageError {
    /// The supplied [`crate::DataSet`] contained no instances.
    #[error("data set `{data_set}` contains no instances")]
    EmptyDataSet {
        /// Identifier for the empty data set.
        data_set: Arc<str>,
    },
    /// The oracle produced a NaN, infinite, or negative dissimilarity.
    #[error("dissimilarity between instances {left} and {right} is invalid: {value}")]
    InvalidDissimilarity {
        /// Smaller instance index of the offending pair.
        left: usize,
        /// Larger instance index of the offending pair.
        right: usize,
        /// The rejected value.
        value: f64,
    },
    /// The oracle itself failed for a pair of instances.
    #[error("dissimilarity between instances {left} and {right} failed: {error}")]
    Dissimilarity {
        /// Smaller instance index of the offending pair.
        left: usize,
        /// Larger instance index of the offending pair.
        right: usize,
        #[source]
        /// Underlying oracle failure.
        error: DissimilarityError,
    },
    /// A [`crate::DataSet`] operation failed while seeding links.
    #[error("data set `{data_set}` failed: {error}")]
    DataSet {
        /// Identifier for the data set that produced the error.
        data_set: Arc<str>,
        #[source]
        /// Underlying data set error.
        error: DataSetError,
    },
    /// The link queue ran dry while more than one cluster remained.
    #[error("link queue exhausted with {clusters_remaining} clusters remaining")]
    Disconnected {
        /// Number of clusters that could not be joined.
        clusters_remaining: usize,
    },
    /// A cut requested a cluster count outside `1..=instances`.
    #[error("cannot cut {instances} instances into {requested} clusters")]
    InvalidCut {
        /// Requested number of clusters.
        requested: usize,
        /// Number of instances in the hierarchy.
        instances: usize,
    },
    /// A cut requested a NaN or negative height threshold.
    #[error("cut height must be finite and non-negative (got {height})")]
    InvalidHeight {
        /// The rejected threshold.
        height: f64,
    },
    /// The link queue was drained past its end.
    #[error("link queue is empty")]
    EmptyQueue,
    /// An instance index exceeded the number of instances in the forest.
    #[error("instance {index} is out of bounds for {instances} instances")]
    InstanceOutOfBounds {
        /// The offending instance index.
        index: usize,
        /// Number of instances in the forest.
        instances: usize,
    },
    /// A node id did not refer to a node of the dendrogram.
    #[error("node {node} does not exist")]
    UnknownNode {
        /// The offending node id.
        node: NodeId,
    },
    /// A leaf was passed where a merge node was required.
    #[error("node {node} is a leaf and has no merge height")]
    NotAMerge {
        /// The leaf node id.
        node: NodeId,
    },
    /// The run was cancelled between merge iterations.
    #[error("clustering cancelled with {clusters_remaining} clusters remaining")]
    Cancelled {
        /// Number of clusters at the point of cancellation.
        clusters_remaining: usize,
    },
    /// A worker thread count of zero was configured.
    #[error("thread count must be at least 1 (got {got})")]
    InvalidThreadCount {
        /// The invalid thread count supplied by the caller.
        got: usize,
    },
    /// The requested execution strategy is unavailable in the current build.
    #[error("the requested execution strategy {requested:?} is not available in this build")]
    BackendUnavailable {
        /// Strategy that could not be satisfied by the current build.
        requested: ExecutionStrategy,
    },
    /// The dedicated seeding thread pool could not be created.
    #[error("failed to build seeding thread pool: {message}")]
    ThreadPool {
        /// Message reported by the thread pool builder.
        message: Arc<str>,
    },
}

define_error_codes! {
    /// Stable codes describing [`LinkageError`] variants.
    enum LinkageErrorCode for LinkageError {
        /// The supplied data set contained no instances.
        EmptyDataSet => EmptyDataSet { .. } => "LINKAGE_EMPTY_DATA_SET",
        /// The oracle produced an invalid dissimilarity.
        InvalidDissimilarity => InvalidDissimilarity { .. } => "LINKAGE_INVALID_DISSIMILARITY",
        /// The oracle failed for a pair of instances.
        DissimilarityFailure => Dissimilarity { .. } => "LINKAGE_DISSIMILARITY_FAILURE",
        /// A data set operation failed.
        DataSetFailure => DataSet { .. } => "LINKAGE_DATA_SET_FAILURE",
        /// The link queue ran dry before one cluster remained.
        Disconnected => Disconnected { .. } => "LINKAGE_DISCONNECTED_INPUT",
        /// A cut requested an invalid cluster count.
        InvalidCut => InvalidCut { .. } => "LINKAGE_INVALID_CUT",
        /// A cut requested an invalid height.
        InvalidHeight => InvalidHeight { .. } => "LINKAGE_INVALID_HEIGHT",
        /// The link queue was drained past its end.
        EmptyQueue => EmptyQueue => "LINKAGE_EMPTY_QUEUE",
        /// An instance index was out of bounds.
        InstanceOutOfBounds => InstanceOutOfBounds { .. } => "LINKAGE_INSTANCE_OUT_OF_BOUNDS",
        /// A node id did not exist.
        UnknownNode => UnknownNode { .. } => "LINKAGE_UNKNOWN_NODE",
        /// A leaf was used where a merge was required.
        NotAMerge => NotAMerge { .. } => "LINKAGE_NOT_A_MERGE",
        /// The run was cancelled.
        Cancelled => Cancelled { .. } => "LINKAGE_CANCELLED",
        /// A zero thread count was configured.
        InvalidThreadCount => InvalidThreadCount { .. } => "LINKAGE_INVALID_THREAD_COUNT",
        /// The requested execution strategy is unavailable.
        BackendUnavailable => BackendUnavailable { .. } => "LINKAGE_BACKEND_UNAVAILABLE",
        /// The seeding thread pool could not be created.
        ThreadPool => ThreadPool { .. } => "LINKAGE_THREAD_POOL",
    }
}

impl LinkageError {
    /// Retrieve the inner [`DataSetErrorCode`] when the error originated in a
    /// [`crate::DataSet`].
    #[must_use]
    pub const fn data_set_code(&self) -> Option<DataSetErrorCode> {
        match self {
            Self::DataSet { error, .. } => Some(error.code()),
            _ => None,
        }
    }

    /// Retrieve the inner [`DissimilarityErrorCode`] when the error originated
    /// in the dissimilarity oracle.
    #[must_use]
    pub const fn dissimilarity_code(&self) -> Option<DissimilarityErrorCode> {
        match self {
            Self::Dissimilarity { error, .. } => Some(error.code()),
            _ => None,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, LinkageError>;
