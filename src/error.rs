use thiserror::Error;

/// Errors returned by the clusterizer, the distance metrics and the point types of this crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A construction parameter is out of its valid range.
    #[error("invalid argument {name}: {message}")]
    InvalidArgument {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// Two points (or a point and the rest of the dataset) have differing dimensionality.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Expected dimensionality.
        expected: usize,
        /// Found dimensionality.
        found: usize,
    },

    /// A coordinate was requested beyond the point's dimension.
    #[error("coordinate {index} out of range for dimension {dimension}")]
    IndexOutOfRange {
        /// Requested coordinate.
        index: usize,
        /// Dimension of the accessed point.
        dimension: usize,
    },

    /// Lloyd's algorithm exhausted its iteration cap without reaching the convergence criterion.
    #[error("no convergence after {iterations} iterations")]
    NonConvergence {
        /// Amount of iterations performed.
        iterations: usize,
    },

    /// A centroid lost all of its members during an update step (only raised with
    /// [`EmptyClusterPolicy::Fail`](crate::EmptyClusterPolicy::Fail)).
    #[error("empty cluster {centroid} at iteration {iteration}")]
    EmptyCluster {
        /// Iteration in which the cluster ran empty.
        iteration: usize,
        /// Centroid slot without members.
        centroid: usize,
    },
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
