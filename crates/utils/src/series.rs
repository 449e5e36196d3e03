//! Regression design helpers for time series.

use ndarray::{Array1, Array2, s};

use crate::UtilsError;

/// Prepend a column of ones.
#[must_use]
pub fn add_constant(x: &Array2<f64>) -> Array2<f64> {
    Array2::from_shape_fn((x.nrows(), x.ncols() + 1), |(i, j)| {
        if j == 0 { 1.0 } else { x[[i, j - 1]] }
    })
}

/// Response and lag matrix of an AR(`p`) regression.
///
/// Returns `y[p..]` and a matrix whose column `j` holds lag `j + 1`, both
/// with `T − p` rows.
///
/// # Errors
/// Returns `UtilsError::InvalidParameter` unless `0 < p < T`.
pub fn lag(series: &Array1<f64>, p: usize) -> Result<(Array1<f64>, Array2<f64>), UtilsError> {
    let n = series.len();
    if p == 0 || p >= n {
        return Err(UtilsError::InvalidParameter(format!(
            "lag order {p} must be in 1..{n}"
        )));
    }

    let response = series.slice(s![p..]).to_owned();
    let lags = Array2::from_shape_fn((n - p, p), |(t, j)| series[p + t - 1 - j]);
    Ok((response, lags))
}

/// Sums over every window of `h` consecutive observations.
///
/// Element `t` is `x[t] + … + x[t+h−1]`; the result has `T − h + 1` entries.
///
/// # Errors
/// Returns `UtilsError::InvalidParameter` unless `0 < h ≤ T`.
pub fn overlapping_sum(series: &Array1<f64>, h: usize) -> Result<Array1<f64>, UtilsError> {
    if h == 0 || h > series.len() {
        return Err(UtilsError::InvalidParameter(format!(
            "horizon {h} must be in 1..={}",
            series.len()
        )));
    }
    Ok(series.windows(h).into_iter().map(|w| w.sum()).collect())
}
