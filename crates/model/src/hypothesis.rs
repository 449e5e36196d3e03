//! Wald tests of joint linear restrictions on stacked coefficients.

use hacboot_math::solve;
use hacboot_primitives::{OlsFit, WaldTest};
use hacboot_traits::EstimatorError;
use ndarray::{Array1, Array2, Axis};
use statrs::distribution::{ChiSquared, ContinuousCDF};
use tracing::{debug, instrument};

/// Test `Rb = a` for a coefficient vector `b` with covariance `v`.
///
/// The statistic is `(Rb − a)ᵀ (RVRᵀ)⁻¹ (Rb − a)` and is compared against a
/// χ² with as many degrees of freedom as `R` has rows.
///
/// # Arguments
/// * `b` - Coefficient vector (p)
/// * `v` - Covariance of `b` (p x p)
/// * `r` - Restriction matrix (q x p)
/// * `a` - Restriction targets (q)
///
/// # Errors
/// Returns `EstimatorError::InvalidConfig` for an empty `R`,
/// `EstimatorError::DimensionMismatch` if the shapes disagree, and
/// `EstimatorError::SingularContrast` if `RVRᵀ` is not invertible.
#[instrument(skip_all, fields(restrictions = r.nrows(), coefficients = b.len()))]
pub fn linear_hypothesis(
    b: &Array1<f64>,
    v: &Array2<f64>,
    r: &Array2<f64>,
    a: &Array1<f64>,
) -> Result<WaldTest, EstimatorError> {
    let (n_restrictions, n_coefficients) = r.dim();

    if n_restrictions == 0 {
        return Err(EstimatorError::InvalidConfig("restriction matrix has no rows".to_string()));
    }
    if n_coefficients != b.len() {
        return Err(EstimatorError::DimensionMismatch {
            expected: b.len(),
            actual: n_coefficients,
            context: "restriction columns".to_string(),
        });
    }
    if v.dim() != (b.len(), b.len()) {
        return Err(EstimatorError::DimensionMismatch {
            expected: b.len(),
            actual: v.nrows(),
            context: "covariance".to_string(),
        });
    }
    if a.len() != n_restrictions {
        return Err(EstimatorError::DimensionMismatch {
            expected: n_restrictions,
            actual: a.len(),
            context: "restriction targets".to_string(),
        });
    }

    let diff = r.dot(b) - a;
    let contrast = r.dot(v).dot(&r.t());
    let weighted = solve(&contrast, &diff.view().insert_axis(Axis(1)).to_owned())
        .map_err(|_| EstimatorError::SingularContrast { restrictions: n_restrictions })?;

    let statistic = diff.dot(&weighted.column(0));
    let chi2 = ChiSquared::new(n_restrictions as f64)
        .map_err(|e| EstimatorError::InvalidConfig(e.to_string()))?;
    let p_value = chi2.sf(statistic.max(0.0));

    debug!(statistic, p_value, "wald test");
    Ok(WaldTest { statistic, degrees_of_freedom: n_restrictions, p_value })
}

/// Test `R vec(B) = a` against the covariance stored in `fit`.
///
/// # Errors
/// Same failure modes as [`linear_hypothesis`].
pub fn wald_test(
    fit: &OlsFit,
    r: &Array2<f64>,
    a: &Array1<f64>,
) -> Result<WaldTest, EstimatorError> {
    linear_hypothesis(&fit.coefficient_vector(), &fit.covariance, r, a)
}
