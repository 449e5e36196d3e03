//! Ordinary least squares with pluggable coefficient covariance.

use hacboot_math::least_squares;
use hacboot_primitives::{CovarianceType, OlsFit, VarianceConvention};
use hacboot_traits::{EstimatorError, LinearEstimator};
use ndarray::{Array1, Array2, Axis};
use tracing::{debug, instrument};

use crate::covariance::{classical_covariance, hac_sandwich};

/// Configuration for the OLS estimator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OlsConfig {
    /// Which coefficient covariance to report.
    pub covariance: CovarianceType,
    /// Divisor convention for the residual variance and adjusted R².
    pub variance: VarianceConvention,
}

/// Least-squares estimator for responses sharing one design matrix.
///
/// Coefficients come from a QR solve of `XB = Y`; `(XᵀX)⁻¹` is only formed
/// for the covariance.
#[derive(Debug, Clone, Default)]
pub struct OlsEstimator {
    config: OlsConfig,
}

impl OlsEstimator {
    /// Create a new estimator with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(OlsConfig::default())
    }

    /// Create an estimator reporting the given covariance type.
    #[must_use]
    pub fn with_covariance(covariance: CovarianceType) -> Self {
        Self::with_config(OlsConfig { covariance, ..OlsConfig::default() })
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &OlsConfig {
        &self.config
    }
}

impl LinearEstimator for OlsEstimator {
    type Config = OlsConfig;
    type Output = OlsFit;

    fn with_config(config: Self::Config) -> Self {
        Self { config }
    }

    #[instrument(
        skip_all,
        fields(
            n_obs = x.nrows(),
            n_regressors = x.ncols(),
            n_equations = y.ncols(),
            covariance = %self.config.covariance,
        )
    )]
    fn fit(&self, y: &Array2<f64>, x: &Array2<f64>) -> Result<OlsFit, EstimatorError> {
        if y.nrows() != x.nrows() {
            return Err(EstimatorError::DimensionMismatch {
                expected: x.nrows(),
                actual: y.nrows(),
                context: "responses".to_string(),
            });
        }
        if y.ncols() == 0 {
            return Err(EstimatorError::InvalidConfig("no response columns".to_string()));
        }

        let solution = least_squares(y, x)?;

        let covariance = match self.config.covariance {
            CovarianceType::Classical => classical_covariance(&solution, self.config.variance),
            CovarianceType::White => hac_sandwich(x, &solution, 0)?,
            CovarianceType::NeweyWest { bandwidth } => hac_sandwich(x, &solution, bandwidth)?,
        };

        let adj_r_squared =
            adjusted_r_squared(y, &solution.residuals, x.ncols(), self.config.variance);
        debug!(adj_r_squared = ?adj_r_squared.to_vec(), "least squares fit complete");

        Ok(OlsFit {
            coefficients: solution.coefficients,
            residuals: solution.residuals,
            fitted: solution.fitted,
            covariance,
            adj_r_squared,
            covariance_type: self.config.covariance,
            variance: self.config.variance,
        })
    }
}

/// Fit `Y = XB + U` with the classical covariance and unbiased variances.
///
/// # Arguments
/// * `y` - Responses (T x n)
/// * `x` - Regressors (T x K)
///
/// When `T = K` the unbiased residual variance is undefined, so the
/// covariance is NaN while coefficients and residuals are still returned.
///
/// # Errors
/// Returns `EstimatorError::RankDeficiency` if `T < K` or `X` is rank
/// deficient, `EstimatorError::DimensionMismatch` if the row counts differ.
pub fn fit_ols(y: &Array2<f64>, x: &Array2<f64>) -> Result<OlsFit, EstimatorError> {
    OlsEstimator::new().fit(y, x)
}

/// `1 − σ̂²_u / σ̂²_y` per equation.
///
/// Zero when the response is constant or the divisors are not positive.
fn adjusted_r_squared(
    y: &Array2<f64>,
    residuals: &Array2<f64>,
    n_regressors: usize,
    variance: VarianceConvention,
) -> Array1<f64> {
    let n_obs = y.nrows();
    let (Some(du), Some(dy)) =
        (variance.residual_divisor(n_obs, n_regressors), variance.total_divisor(n_obs))
    else {
        return Array1::zeros(y.ncols());
    };

    y.axis_iter(Axis(1))
        .zip(residuals.axis_iter(Axis(1)))
        .map(|(yi, ui)| {
            let y_mean = yi.mean().unwrap_or(0.0);
            let ss_tot: f64 = yi.iter().map(|v| (v - y_mean).powi(2)).sum();
            let ss_res: f64 = ui.iter().map(|r| r.powi(2)).sum();
            if ss_tot > 0.0 { 1.0 - (ss_res / du as f64) / (ss_tot / dy as f64) } else { 0.0 }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ndarray::array;
    use rstest::rstest;

    use super::*;

    fn trend_design(n: usize) -> Array2<f64> {
        Array2::from_shape_fn((n, 2), |(i, j)| if j == 0 { 1.0 } else { (i + 1) as f64 })
    }

    #[test]
    fn fit_ols_trend_example() {
        let x = trend_design(5);
        let y = array![[2.1], [3.9], [6.2], [7.8], [10.1]];

        let fit = fit_ols(&y, &x).unwrap();

        assert_relative_eq!(fit.coefficients[[0, 0]], 0.05, epsilon = 1e-10);
        assert_relative_eq!(fit.coefficients[[1, 0]], 1.99, epsilon = 1e-10);
        assert_relative_eq!(fit.residuals.sum(), 0.0, epsilon = 1e-10);
        assert_eq!(fit.covariance.dim(), (2, 2));
        assert!(fit.adj_r_squared[0] > 0.99);
    }

    #[test]
    fn fit_satisfies_normal_equations() {
        let x = array![[1.0, 0.2, 3.0], [1.0, -1.1, 2.5], [1.0, 0.7, -0.4], [1.0, 2.2, 1.0], [
            1.0, -0.3, 0.8
        ], [1.0, 1.4, -2.0], [1.0, 0.0, 0.5]];
        let y = array![
            [1.0, -2.0],
            [0.3, 0.4],
            [2.2, 1.1],
            [-0.7, 3.0],
            [1.9, -0.5],
            [0.4, 0.9],
            [1.1, 1.2]
        ];

        let fit = fit_ols(&y, &x).unwrap();
        let normal = x.t().dot(&(&y - &x.dot(&fit.coefficients)));
        assert!(normal.iter().all(|v| v.abs() < 1e-10));
        assert_eq!(fit.covariance.dim(), (6, 6));
        assert_eq!(fit.adj_r_squared.len(), 2);
    }

    #[test]
    fn classical_covariance_uses_unbiased_divisor() {
        let x = trend_design(5);
        let y = array![[2.1], [3.9], [6.2], [7.8], [10.1]];

        let unbiased = fit_ols(&y, &x).unwrap();
        let population = OlsEstimator::with_config(OlsConfig {
            covariance: CovarianceType::Classical,
            variance: VarianceConvention::Population,
        })
        .fit(&y, &x)
        .unwrap();

        // (T − K) / T
        let ratio = population.covariance[[1, 1]] / unbiased.covariance[[1, 1]];
        assert_relative_eq!(ratio, 3.0 / 5.0, epsilon = 1e-12);
    }

    #[test]
    fn adjusted_r_squared_population_equals_plain_r_squared() {
        let x = trend_design(5);
        let y = array![[2.1], [3.9], [6.2], [7.8], [10.1]];
        let fit = OlsEstimator::with_config(OlsConfig {
            variance: VarianceConvention::Population,
            ..OlsConfig::default()
        })
        .fit(&y, &x)
        .unwrap();

        let y_mean = y.mean().unwrap();
        let ss_tot: f64 = y.iter().map(|v| (v - y_mean).powi(2)).sum();
        let ss_res: f64 = fit.residuals.iter().map(|r| r * r).sum();
        assert_relative_eq!(fit.adj_r_squared[0], 1.0 - ss_res / ss_tot, epsilon = 1e-12);
    }

    #[rstest]
    #[case(CovarianceType::White)]
    #[case(CovarianceType::NeweyWest { bandwidth: 2 })]
    fn robust_covariance_is_symmetric(#[case] covariance: CovarianceType) {
        let x = trend_design(12);
        let y = Array2::from_shape_fn((12, 1), |(i, _)| {
            1.0 + 0.5 * (i + 1) as f64 + if i % 3 == 0 { 0.8 } else { -0.4 }
        });

        let fit = OlsEstimator::with_covariance(covariance).fit(&y, &x).unwrap();
        assert_eq!(fit.covariance_type, covariance);
        assert_eq!(fit.covariance, fit.covariance.t());
        assert!(fit.std_errors().iter().all(|s| s.is_finite() && *s > 0.0));
    }

    #[test]
    fn white_equals_zero_lag_newey_west() {
        let x = trend_design(10);
        let y = Array2::from_shape_fn((10, 1), |(i, _)| ((i * 7) % 5) as f64);

        let white = OlsEstimator::with_covariance(CovarianceType::White).fit(&y, &x).unwrap();
        let nw0 = OlsEstimator::with_covariance(CovarianceType::NeweyWest { bandwidth: 0 })
            .fit(&y, &x)
            .unwrap();
        assert_eq!(white.covariance, nw0.covariance);
    }

    #[test]
    fn rank_deficient_design_fails() {
        let x = Array2::from_shape_fn((6, 3), |(i, j)| if j == 2 { 2.0 } else { [1.0, i as f64][j] });
        let y = Array2::ones((6, 1));
        assert!(matches!(fit_ols(&y, &x), Err(EstimatorError::RankDeficiency { .. })));
    }

    #[test]
    fn fewer_rows_than_regressors_fails() {
        let x = trend_design(1);
        let y = Array2::ones((1, 1));
        assert!(matches!(
            fit_ols(&y, &x),
            Err(EstimatorError::RankDeficiency { rank: 1, columns: 2 })
        ));
    }

    #[rstest]
    #[case(CovarianceType::Classical)]
    #[case(CovarianceType::White)]
    #[case(CovarianceType::NeweyWest { bandwidth: 3 })]
    fn near_collinear_design_still_fits(#[case] covariance: CovarianceType) {
        let x = Array2::from_shape_fn((10, 2), |(t, j)| {
            if j == 0 { 1.0 } else { 1.0 + 1e-7 * t as f64 }
        });
        let y = Array2::from_shape_fn((10, 1), |(t, _)| {
            2.0 + 0.5 * x[[t, 1]] + if t % 2 == 0 { 0.1 } else { -0.1 }
        });

        let fit = OlsEstimator::with_covariance(covariance).fit(&y, &x).unwrap();
        assert!(fit.covariance.iter().all(|v| v.is_finite()));
        assert_eq!(fit.covariance, fit.covariance.t());
    }

    #[test]
    fn exactly_identified_fit_keeps_coefficients() {
        let x = array![[1.0, 0.0], [1.0, 1.0]];
        let y = array![[1.0], [3.0]];

        let fit = fit_ols(&y, &x).unwrap();
        assert_relative_eq!(fit.coefficients[[0, 0]], 1.0, epsilon = 1e-12);
        assert_relative_eq!(fit.coefficients[[1, 0]], 2.0, epsilon = 1e-12);
        assert!(fit.residuals.iter().all(|u| u.abs() < 1e-12));
        assert!(fit.covariance.iter().all(|v| v.is_nan()));
        assert_eq!(fit.adj_r_squared[0], 0.0);

        let population = OlsEstimator::with_config(OlsConfig {
            variance: VarianceConvention::Population,
            ..OlsConfig::default()
        })
        .fit(&y, &x)
        .unwrap();
        assert!(population.covariance.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn row_mismatch_fails() {
        let x = trend_design(5);
        let y = Array2::ones((4, 1));
        assert!(matches!(
            fit_ols(&y, &x),
            Err(EstimatorError::DimensionMismatch { expected: 5, actual: 4, .. })
        ));
    }
}
