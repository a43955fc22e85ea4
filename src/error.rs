/// Errors reported by the kd-tree and the patterns built on it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KdTreeError {
    #[error("kd-tree requires at least 2 dimensions, got {dimension}")]
    InvalidDimension { dimension: usize },

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("query coordinate on axis {axis} is not finite")]
    NonFiniteQuery { axis: usize },

    #[error("nearest point query on an empty index")]
    EmptyIndex,

    #[error("index was modified since the last build")]
    NotBuilt,

    #[error("traversal stack exceeded its maximum depth of {max_depth}")]
    StackOverflow { max_depth: usize },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, KdTreeError>;
