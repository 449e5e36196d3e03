//! Covariance estimator selection.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Which coefficient covariance matrix a fit reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize, Deserialize)]
pub enum CovarianceType {
    /// `Σ̂ ⊗ (XᵀX)⁻¹`, valid under i.i.d. errors.
    #[default]
    #[display("classical")]
    Classical,
    /// Heteroskedasticity-robust sandwich (Newey-West with zero lags).
    #[display("white")]
    White,
    /// Newey-West HAC sandwich with a Bartlett kernel.
    #[display("newey-west({bandwidth})")]
    NeweyWest {
        /// Maximum lag included in the autocovariance sum.
        bandwidth: usize,
    },
}

impl CovarianceType {
    /// Lag bandwidth of the HAC estimator, `None` for the classical estimator.
    #[must_use]
    pub const fn bandwidth(&self) -> Option<usize> {
        match self {
            Self::Classical => None,
            Self::White => Some(0),
            Self::NeweyWest { bandwidth } => Some(*bandwidth),
        }
    }

    /// Whether the covariance is a sandwich estimator.
    #[must_use]
    pub const fn is_robust(&self) -> bool {
        !matches!(self, Self::Classical)
    }
}

/// Divisor convention for residual variances.
///
/// `Population` divides sums of squares by `T`. `Unbiased` divides residual
/// sums of squares by `T − K` and the total sum of squares of the response
/// by `T − 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize, Deserialize)]
pub enum VarianceConvention {
    /// Divide by the number of observations.
    #[display("population")]
    Population,
    /// Degrees-of-freedom corrected divisors.
    #[default]
    #[display("unbiased")]
    Unbiased,
}

impl VarianceConvention {
    /// Divisor for a residual sum of squares.
    ///
    /// Returns `None` when the unbiased divisor would not be positive.
    #[must_use]
    pub const fn residual_divisor(&self, n_obs: usize, n_regressors: usize) -> Option<usize> {
        match self {
            Self::Population if n_obs > 0 => Some(n_obs),
            Self::Unbiased if n_obs > n_regressors => Some(n_obs - n_regressors),
            _ => None,
        }
    }

    /// Divisor for the total sum of squares of the response.
    #[must_use]
    pub const fn total_divisor(&self, n_obs: usize) -> Option<usize> {
        match self {
            Self::Population if n_obs > 0 => Some(n_obs),
            Self::Unbiased if n_obs > 1 => Some(n_obs - 1),
            _ => None,
        }
    }
}
