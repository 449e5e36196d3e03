//! Covariance estimator trait definitions.

use ndarray::Array2;

use crate::EstimatorError;

/// Maps a moment matrix to the covariance of its scaled sample mean.
pub trait CovarianceEstimator: Send + Sync {
    /// Estimate `Cov(√T · ḡ)` from a moment matrix.
    ///
    /// # Arguments
    /// * `moments` - Moment matrix (T x q), rows ordered in time
    ///
    /// # Returns
    /// Symmetric `q x q` matrix.
    ///
    /// # Errors
    /// Returns `EstimatorError` if the moment matrix is empty.
    fn estimate(&self, moments: &Array2<f64>) -> Result<Array2<f64>, EstimatorError>;

    /// Returns the name of this estimator.
    fn name(&self) -> &str;
}
