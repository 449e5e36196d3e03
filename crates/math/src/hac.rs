//! Newey-West accumulation of lagged autocovariances.
//!
//! ```text
//! S = Γ₀ + Σ_{s=1}^{m} (1 − s/(m+1)) (Γ_s + Γ_sᵀ)
//! Γ_s = (1/T) Σ_{t=s+1}^{T} g_t g_{t−s}ᵀ
//! ```
//!
//! where `g_t` are the demeaned rows of the moment matrix. `S` estimates
//! `Cov(√T · ḡ)`; divide by `T` for the covariance of the sample mean or
//! multiply by `T` for the covariance of the sum.

use ndarray::{Array2, s};

use crate::{MathError, bartlett_weight, demean_columns, symmetrize};

/// Newey-West covariance of `√T` times the sample mean of the rows of `g`.
///
/// The bandwidth is clamped to `T − 1`. Lag terms are added in increasing
/// lag order. A zero bandwidth gives the White estimator `gᵀg/T`.
///
/// # Arguments
/// * `g` - Moment matrix (T x q), rows ordered in time
/// * `bandwidth` - Maximum lag `m`
///
/// # Returns
/// Symmetric `q x q` matrix.
///
/// # Errors
/// Returns `MathError::EmptyData` if `g` has no rows.
pub fn newey_west(g: &Array2<f64>, bandwidth: usize) -> Result<Array2<f64>, MathError> {
    let n_obs = g.nrows();
    if n_obs == 0 {
        return Err(MathError::EmptyData);
    }

    let max_lag = bandwidth.min(n_obs - 1);
    let centered = demean_columns(g)?;
    let t = n_obs as f64;

    let mut cov = centered.t().dot(&centered) / t;
    for lag in 1..=max_lag {
        let lead = centered.slice(s![lag.., ..]);
        let lagged = centered.slice(s![..n_obs - lag, ..]);
        let gamma = lead.t().dot(&lagged) / t;
        let sym = &gamma + &gamma.t();
        cov.scaled_add(bartlett_weight(lag, max_lag), &sym);
    }

    Ok(symmetrize(&cov))
}

#[cfg(test)]
mod tests {
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use ndarray::{Array1, array};
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use rstest::rstest;

    use super::*;

    fn random_moments(n: usize, q: usize, seed: u64) -> Array2<f64> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Array2::from_shape_fn((n, q), |_| rng.r#gen::<f64>() - 0.5)
    }

    #[test]
    fn zero_bandwidth_is_white_estimator() {
        let g = random_moments(50, 3, 7);
        let d = demean_columns(&g).unwrap();
        let white = d.t().dot(&d) / 50.0;

        let s = newey_west(&g, 0).unwrap();
        for (a, b) in s.iter().zip(white.iter()) {
            assert_relative_eq!(a, b, epsilon = 1e-14);
        }
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(5)]
    #[case(200)]
    fn output_is_symmetric(#[case] bandwidth: usize) {
        let s = newey_west(&random_moments(40, 4, 11), bandwidth).unwrap();
        assert_eq!(s, s.t());
    }

    #[rstest]
    #[case(0)]
    #[case(3)]
    #[case(9)]
    fn constant_series_has_zero_variance(#[case] bandwidth: usize) {
        let g = Array2::from_elem((10, 1), 3.0);
        let s = newey_west(&g, bandwidth).unwrap();
        assert_abs_diff_eq!(s[[0, 0]], 0.0, epsilon = 1e-20);
    }

    #[test]
    fn scalar_lag_one_by_hand() {
        // Demeaned series: [-1.5, -0.5, 0.5, 1.5]
        let g = array![[1.0], [2.0], [3.0], [4.0]];
        let s = newey_west(&g, 1).unwrap();

        let gamma0 = (2.25 + 0.25 + 0.25 + 2.25) / 4.0;
        let gamma1 = (-0.5 * -1.5 + 0.5 * -0.5 + 1.5 * 0.5) / 4.0;
        assert_relative_eq!(s[[0, 0]], gamma0 + 0.5 * 2.0 * gamma1, epsilon = 1e-12);
    }

    #[test]
    fn bandwidth_is_clamped_to_sample_length() {
        let g = random_moments(6, 2, 3);
        assert_eq!(newey_west(&g, 5).unwrap(), newey_west(&g, 50).unwrap());
    }

    #[test]
    fn positive_autocorrelation_raises_long_run_variance() {
        // Slowly moving series: neighbours share sign
        let series: Array1<f64> = (0..100).map(|t| ((t / 10) % 2) as f64 * 2.0 - 1.0).collect();
        let g = series.insert_axis(ndarray::Axis(1));

        let white = newey_west(&g, 0).unwrap()[[0, 0]];
        let hac = newey_west(&g, 5).unwrap()[[0, 0]];
        assert!(hac > white);
    }

    #[test]
    fn empty_moments_error() {
        let g: Array2<f64> = Array2::zeros((0, 2));
        assert!(matches!(newey_west(&g, 2), Err(MathError::EmptyData)));
    }
}
