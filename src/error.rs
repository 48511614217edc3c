use thiserror::Error;

/// Errors returned by clustering and graph construction in this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Input slice is empty.
    #[error("empty input")]
    EmptyInput,

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// Points in a dataset have inconsistent dimensionality.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Expected dimensionality.
        expected: usize,
        /// Found dimensionality.
        found: usize,
    },

    /// Item ids, vectors, and labels must all have the same length.
    #[error("length mismatch: {items} items, {vectors} vectors, {labels} labels")]
    LengthMismatch {
        /// Number of item ids.
        items: usize,
        /// Number of vectors.
        vectors: usize,
        /// Number of cluster labels.
        labels: usize,
    },
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
