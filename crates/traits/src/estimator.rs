//! Estimator trait definitions.

use hacboot_math::MathError;
use ndarray::Array2;

/// Errors that can occur during estimation.
#[derive(Debug, thiserror::Error)]
pub enum EstimatorError {
    /// Design matrix without full column rank, or fewer rows than columns.
    #[error("rank deficient design matrix: rank {rank} < columns {columns}")]
    RankDeficiency {
        /// Rank found by the solver.
        rank: usize,
        /// Number of columns.
        columns: usize,
    },

    /// Dimension mismatch in input data.
    #[error("dimension mismatch for {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Actual dimension.
        actual: usize,
        /// Context description.
        context: String,
    },

    /// `RVRᵀ` not invertible in a linear hypothesis test.
    #[error("singular contrast: {restrictions} restrictions are not linearly independent")]
    SingularContrast {
        /// Number of restrictions, the rows of `R`.
        restrictions: usize,
    },

    /// Negative lag bandwidth or non-positive block size.
    #[error("invalid {parameter}: {value}")]
    InvalidBandwidth {
        /// Parameter name.
        parameter: &'static str,
        /// Rejected value.
        value: i64,
    },

    /// Insufficient data for estimation.
    #[error("insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData {
        /// Required number of observations.
        required: usize,
        /// Actual number of observations.
        actual: usize,
    },

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Linear algebra error.
    #[error("linear algebra error: {0}")]
    LinearAlgebra(String),
}

impl EstimatorError {
    /// Returns whether the underlying estimate is still usable.
    ///
    /// Only a failed hypothesis test leaves the fit intact.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::SingularContrast { .. })
    }
}

impl From<MathError> for EstimatorError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::RankDeficient { rank, columns } => Self::RankDeficiency { rank, columns },
            MathError::DimensionMismatch { expected, actual } => {
                Self::DimensionMismatch { expected, actual, context: "rows".to_string() }
            }
            MathError::EmptyData => Self::InsufficientData { required: 1, actual: 0 },
            MathError::Singular | MathError::LinearAlgebra(_) => {
                Self::LinearAlgebra(err.to_string())
            }
        }
    }
}

/// Convert a signed lag bandwidth into a `usize`, rejecting negative values.
///
/// # Errors
/// Returns `EstimatorError::InvalidBandwidth` if `value < 0`.
pub fn checked_bandwidth(parameter: &'static str, value: i64) -> Result<usize, EstimatorError> {
    usize::try_from(value).map_err(|_| EstimatorError::InvalidBandwidth { parameter, value })
}

/// Trait for least-squares estimators sharing one design matrix.
pub trait LinearEstimator: Send + Sync {
    /// Configuration type for this estimator.
    type Config: Default + Clone + Send + Sync;

    /// Fit result.
    type Output;

    /// Create a new estimator with the given configuration.
    fn with_config(config: Self::Config) -> Self;

    /// Fit `Y = XB + U`.
    ///
    /// # Arguments
    /// * `y` - Responses (T x n), rows ordered in time
    /// * `x` - Regressors (T x K), same row order
    ///
    /// # Errors
    /// Returns `EstimatorError` if dimensions mismatch or `X` is rank deficient.
    fn fit(&self, y: &Array2<f64>, x: &Array2<f64>) -> Result<Self::Output, EstimatorError>;
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn estimator_error_is_recoverable() {
        let err = EstimatorError::SingularContrast { restrictions: 2 };
        assert!(err.is_recoverable());

        let err = EstimatorError::RankDeficiency { rank: 1, columns: 2 };
        assert!(!err.is_recoverable());
    }

    #[test]
    fn estimator_error_display() {
        let err = EstimatorError::DimensionMismatch {
            expected: 100,
            actual: 50,
            context: "responses".to_string(),
        };
        assert_eq!(err.to_string(), "dimension mismatch for responses: expected 100, got 50");

        let err = EstimatorError::InvalidBandwidth { parameter: "bandwidth", value: -3 };
        assert_eq!(err.to_string(), "invalid bandwidth: -3");
    }

    #[test]
    fn math_errors_map_to_estimator_kinds() {
        let err: EstimatorError = MathError::RankDeficient { rank: 2, columns: 3 }.into();
        assert!(matches!(err, EstimatorError::RankDeficiency { rank: 2, columns: 3 }));

        let err: EstimatorError = MathError::DimensionMismatch { expected: 5, actual: 4 }.into();
        assert!(matches!(err, EstimatorError::DimensionMismatch { expected: 5, actual: 4, .. }));

        let err: EstimatorError = MathError::Singular.into();
        assert!(matches!(err, EstimatorError::LinearAlgebra(_)));
    }

    #[rstest]
    #[case(0, Some(0))]
    #[case(12, Some(12))]
    #[case(-1, None)]
    fn bandwidth_conversion(#[case] value: i64, #[case] expected: Option<usize>) {
        let result = checked_bandwidth("bandwidth", value);
        assert_eq!(result.ok(), expected);
    }
}
