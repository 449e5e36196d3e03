//! Seemingly unrelated regressions with a common regressor set.
//!
//! With identical regressors in every equation, SURE collapses to
//! equation-by-equation OLS, so only the joint covariance needs care: it
//! is the Newey-West sandwich over the stacked moments `u_i ⊗ x_t`.

use hacboot_primitives::{CovarianceType, OlsFit};
use hacboot_traits::{EstimatorError, LinearEstimator};
use ndarray::Array2;
use tracing::instrument;

use crate::ols::{OlsConfig, OlsEstimator};

/// Configuration for the SURE estimator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SureConfig {
    /// Newey-West lag bandwidth. Zero gives the White estimator.
    pub bandwidth: usize,
}

/// System estimator returning a joint HAC covariance of `vec(B)`.
#[derive(Debug, Clone, Default)]
pub struct SureEstimator {
    config: SureConfig,
}

impl SureEstimator {
    /// Create an estimator with the given lag bandwidth.
    #[must_use]
    pub const fn new(bandwidth: usize) -> Self {
        Self { config: SureConfig { bandwidth } }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &SureConfig {
        &self.config
    }
}

impl LinearEstimator for SureEstimator {
    type Config = SureConfig;
    type Output = OlsFit;

    fn with_config(config: Self::Config) -> Self {
        Self { config }
    }

    #[instrument(skip_all, fields(n_equations = y.ncols(), bandwidth = self.config.bandwidth))]
    fn fit(&self, y: &Array2<f64>, x: &Array2<f64>) -> Result<OlsFit, EstimatorError> {
        OlsEstimator::with_config(OlsConfig {
            covariance: CovarianceType::NeweyWest { bandwidth: self.config.bandwidth },
            ..OlsConfig::default()
        })
        .fit(y, x)
    }
}

/// Fit every column of `y` on `x` and return the joint HAC covariance.
///
/// The covariance is `nK × nK`, ordered like
/// [`OlsFit::coefficient_vector`].
///
/// # Errors
/// Same failure modes as [`crate::fit_ols`].
pub fn fit_ols_system(
    y: &Array2<f64>,
    x: &Array2<f64>,
    bandwidth: usize,
) -> Result<OlsFit, EstimatorError> {
    SureEstimator::new(bandwidth).fit(y, x)
}
