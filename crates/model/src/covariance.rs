//! Classical and HAC coefficient covariance.

use hacboot_math::{LeastSquares, kron, newey_west, symmetrize};
use hacboot_primitives::VarianceConvention;
use hacboot_traits::{CovarianceEstimator, EstimatorError};
use ndarray::{Array2, Axis, s};
use tracing::{instrument, warn};

/// Newey-West HAC covariance estimator with a Bartlett kernel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NeweyWest {
    bandwidth: usize,
}

impl NeweyWest {
    /// Create an estimator with lag bandwidth `m`.
    #[must_use]
    pub const fn new(bandwidth: usize) -> Self {
        Self { bandwidth }
    }

    /// Heteroskedasticity-robust (White) estimator, i.e. zero lags.
    #[must_use]
    pub const fn white() -> Self {
        Self::new(0)
    }

    /// Get the lag bandwidth.
    #[must_use]
    pub const fn bandwidth(&self) -> usize {
        self.bandwidth
    }
}

impl CovarianceEstimator for NeweyWest {
    fn estimate(&self, moments: &Array2<f64>) -> Result<Array2<f64>, EstimatorError> {
        hac_covariance(moments, self.bandwidth)
    }

    fn name(&self) -> &str {
        "newey-west"
    }
}

/// Newey-West covariance of `√T` times the sample mean of the rows of `g`.
///
/// Callers rescale: divide by `T` for `Cov(ḡ)`, multiply by `T` for
/// `Cov(Σ g_t)`. Bandwidths of `T` or more are clamped to `T − 1`.
///
/// # Arguments
/// * `g` - Moment matrix (T x q), rows ordered in time
/// * `bandwidth` - Maximum lag `m`
///
/// # Errors
/// Returns `EstimatorError::InsufficientData` if `g` has no rows.
#[instrument(skip_all, fields(n_obs = g.nrows(), n_moments = g.ncols(), bandwidth = bandwidth))]
pub fn hac_covariance(g: &Array2<f64>, bandwidth: usize) -> Result<Array2<f64>, EstimatorError> {
    let n_obs = g.nrows();
    if n_obs == 0 {
        return Err(EstimatorError::InsufficientData { required: 1, actual: 0 });
    }
    if bandwidth >= n_obs {
        warn!(bandwidth, effective = n_obs - 1, "bandwidth clamped to sample length");
    }

    Ok(newey_west(g, bandwidth)?)
}

/// Stack per-equation moment conditions `X ⊙ u_i` side by side.
///
/// # Arguments
/// * `x` - Regressors (T x K)
/// * `residuals` - Residuals (T x n)
///
/// # Returns
/// Moment matrix (T x nK), equation-major column blocks.
///
/// # Errors
/// Returns `EstimatorError::DimensionMismatch` if the row counts differ.
pub fn moment_matrix(
    x: &Array2<f64>,
    residuals: &Array2<f64>,
) -> Result<Array2<f64>, EstimatorError> {
    let (n_obs, k) = x.dim();
    if residuals.nrows() != n_obs {
        return Err(EstimatorError::DimensionMismatch {
            expected: n_obs,
            actual: residuals.nrows(),
            context: "residuals".to_string(),
        });
    }

    let n_eq = residuals.ncols();
    let mut g = Array2::zeros((n_obs, n_eq * k));
    for (eq, u) in residuals.axis_iter(Axis(1)).enumerate() {
        let block = x * &u.insert_axis(Axis(1));
        g.slice_mut(s![.., eq * k..(eq + 1) * k]).assign(&block);
    }
    Ok(g)
}

/// `Σ̂ ⊗ (XᵀX)⁻¹` with `Σ̂ = UᵀU / d`.
///
/// `d` is `T` or `T − K` depending on the variance convention. With no
/// residual degrees of freedom the covariance is undefined and every entry
/// is NaN; the coefficients themselves are unaffected.
pub(crate) fn classical_covariance(
    solution: &LeastSquares,
    variance: VarianceConvention,
) -> Array2<f64> {
    let n_obs = solution.residuals.nrows();
    let k = solution.r.nrows();

    let Some(divisor) = variance.residual_divisor(n_obs, k) else {
        let dim = solution.residuals.ncols() * k;
        warn!(n_obs, n_regressors = k, %variance, "no residual degrees of freedom");
        return Array2::from_elem((dim, dim), f64::NAN);
    };

    let residuals = &solution.residuals;
    let sigma = residuals.t().dot(residuals) / divisor as f64;

    symmetrize(&kron(&sigma, &solution.gram_inverse()))
}

/// HAC sandwich `(Iₙ⊗A) S (Iₙ⊗A)ᵀ / T` with `A = (XᵀX/T)⁻¹`.
///
/// `S` is the Newey-West covariance of the stacked moments `X ⊙ u_i`.
pub(crate) fn hac_sandwich(
    x: &Array2<f64>,
    solution: &LeastSquares,
    bandwidth: usize,
) -> Result<Array2<f64>, EstimatorError> {
    let t = x.nrows() as f64;

    let g = moment_matrix(x, &solution.residuals)?;
    let s0 = hac_covariance(&g, bandwidth)?;

    let sxx_inv = solution.gram_inverse() * t;
    let bread = kron(&Array2::eye(solution.residuals.ncols()), &sxx_inv);
    let v = bread.dot(&s0).dot(&bread.t()) / t;

    Ok(symmetrize(&v))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use hacboot_math::{inverse, least_squares};
    use ndarray::array;

    use super::*;

    fn design() -> Array2<f64> {
        array![[1.0, 0.5], [1.0, -1.0], [1.0, 2.0], [1.0, 0.0], [1.0, 1.5], [1.0, -0.5]]
    }

    #[test]
    fn moment_matrix_layout() {
        let x = design();
        let u = array![[1.0, 2.0], [2.0, 0.0], [0.0, 1.0], [1.0, 1.0], [-1.0, 3.0], [0.5, -1.0]];

        let g = moment_matrix(&x, &u).unwrap();
        assert_eq!(g.dim(), (6, 4));
        assert_eq!(g.row(0), array![1.0, 0.5, 2.0, 1.0]);
        assert_eq!(g.row(1), array![2.0, -2.0, 0.0, 0.0]);
    }

    #[test]
    fn moment_matrix_rejects_row_mismatch() {
        let u = Array2::zeros((5, 1));
        assert!(matches!(
            moment_matrix(&design(), &u),
            Err(EstimatorError::DimensionMismatch { expected: 6, actual: 5, .. })
        ));
    }

    #[test]
    fn newey_west_trait_matches_function() {
        let g = moment_matrix(&design(), &array![[1.0], [-2.0], [0.5], [1.0], [-0.5], [0.0]])
            .unwrap();
        let via_trait = NeweyWest::new(2).estimate(&g).unwrap();
        assert_eq!(via_trait, hac_covariance(&g, 2).unwrap());
        assert_eq!(NeweyWest::white().bandwidth(), 0);
        assert_eq!(NeweyWest::default().name(), "newey-west");
    }

    #[test]
    fn hac_covariance_rejects_empty() {
        let g: Array2<f64> = Array2::zeros((0, 1));
        assert!(matches!(
            hac_covariance(&g, 1),
            Err(EstimatorError::InsufficientData { .. })
        ));
    }

    #[test]
    fn classical_single_equation_is_sigma_times_inverse() {
        let x = design();
        let y = array![[0.1], [-0.2], [0.05], [0.3], [-0.1], [-0.15]];
        let solution = least_squares(&y, &x).unwrap();
        let v = classical_covariance(&solution, VarianceConvention::Population);

        let sigma2 = solution.residuals.iter().map(|e| e * e).sum::<f64>() / 6.0;
        let xtx_inv = inverse(&x.t().dot(&x)).unwrap();
        for (a, b) in v.iter().zip(xtx_inv.iter()) {
            assert_relative_eq!(*a, sigma2 * b, epsilon = 1e-14);
        }
    }

    #[test]
    fn classical_unbiased_without_degrees_of_freedom_is_nan() {
        let x = array![[1.0, 0.0], [1.0, 1.0]];
        let solution = least_squares(&array![[1.0], [3.0]], &x).unwrap();

        let v = classical_covariance(&solution, VarianceConvention::Unbiased);
        assert_eq!(v.dim(), (2, 2));
        assert!(v.iter().all(|c| c.is_nan()));
    }

    #[test]
    fn white_sandwich_is_symmetric() {
        let x = design();
        let y = array![[0.1, 1.0], [-0.2, -0.4], [0.05, 0.3], [0.3, 0.0], [-0.1, -0.6], [-0.15, 0.2]];
        let v = hac_sandwich(&x, &least_squares(&y, &x).unwrap(), 0).unwrap();
        assert_eq!(v.dim(), (4, 4));
        assert_eq!(v, v.t());
        assert!(v.diag().iter().all(|&d| d > 0.0));
    }
}
