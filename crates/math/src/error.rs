//! Error types for mathematical operations.

/// Errors that can occur during mathematical operations.
#[derive(Debug, thiserror::Error)]
pub enum MathError {
    /// Dimension mismatch.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Actual dimension.
        actual: usize,
    },

    /// Design matrix without full column rank.
    #[error("rank deficient matrix: rank {rank} < columns {columns}")]
    RankDeficient {
        /// Numerical rank found during factorization.
        rank: usize,
        /// Number of columns.
        columns: usize,
    },

    /// Square matrix that cannot be inverted.
    #[error("matrix is singular or nearly singular")]
    Singular,

    /// Linear algebra error.
    #[error("linear algebra error: {0}")]
    LinearAlgebra(String),

    /// Empty data.
    #[error("empty data provided")]
    EmptyData,
}
