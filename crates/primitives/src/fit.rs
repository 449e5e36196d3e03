//! Least-squares fit records.

use ndarray::{Array1, Array2, ArrayView1};

use crate::{CovarianceType, VarianceConvention};

/// Result of fitting `Y = XB + U` by least squares.
///
/// `Y` is `T × n` and `X` is `T × K`. Every field is always populated; callers
/// that only need some of them ignore the rest.
#[derive(Debug, Clone)]
pub struct OlsFit {
    /// Coefficients `B` (K × n), one column per equation.
    pub coefficients: Array2<f64>,
    /// Residuals `U = Y − XB` (T × n).
    pub residuals: Array2<f64>,
    /// Fitted values `XB` (T × n).
    pub fitted: Array2<f64>,
    /// Covariance of `vec(B)` (nK × nK), equation-major.
    pub covariance: Array2<f64>,
    /// Adjusted R² per equation.
    pub adj_r_squared: Array1<f64>,
    /// Estimator that produced `covariance`.
    pub covariance_type: CovarianceType,
    /// Divisor convention used for residual variances.
    pub variance: VarianceConvention,
}

impl OlsFit {
    /// Number of observations `T`.
    #[must_use]
    pub fn n_obs(&self) -> usize {
        self.residuals.nrows()
    }

    /// Number of regressors `K`.
    #[must_use]
    pub fn n_regressors(&self) -> usize {
        self.coefficients.nrows()
    }

    /// Number of equations `n`.
    #[must_use]
    pub fn n_equations(&self) -> usize {
        self.coefficients.ncols()
    }

    /// Coefficients of equation `i`, if it exists.
    #[must_use]
    pub fn equation(&self, i: usize) -> Option<ArrayView1<'_, f64>> {
        (i < self.n_equations()).then(|| self.coefficients.column(i))
    }

    /// Stacked coefficient vector `vec(B)`, equation-major.
    #[must_use]
    pub fn coefficient_vector(&self) -> Array1<f64> {
        self.coefficients.t().iter().copied().collect()
    }

    /// Standard errors, the square roots of the covariance diagonal.
    #[must_use]
    pub fn std_errors(&self) -> Array1<f64> {
        self.covariance.diag().mapv(f64::sqrt)
    }

    /// t-statistics `vec(B) / se`.
    #[must_use]
    pub fn t_stats(&self) -> Array1<f64> {
        self.coefficient_vector() / self.std_errors()
    }
}
