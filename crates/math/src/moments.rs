//! Column moments of observation matrices.

use ndarray::{Array1, Array2, Axis};

use crate::MathError;

/// Mean of each column.
///
/// # Errors
/// Returns `MathError::EmptyData` if the matrix has no rows.
pub fn column_means(x: &Array2<f64>) -> Result<Array1<f64>, MathError> {
    x.mean_axis(Axis(0)).ok_or(MathError::EmptyData)
}

/// Subtract the column mean from every column.
///
/// # Errors
/// Returns `MathError::EmptyData` if the matrix has no rows.
pub fn demean_columns(x: &Array2<f64>) -> Result<Array2<f64>, MathError> {
    let means = column_means(x)?;
    Ok(x - &means)
}

/// `(A + Aᵀ) / 2`, exactly symmetric in floating point.
#[must_use]
pub fn symmetrize(a: &Array2<f64>) -> Array2<f64> {
    (a + &a.t()) * 0.5
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ndarray::array;

    use super::*;

    #[test]
    fn demeaned_columns_sum_to_zero() {
        let x = array![[1.0, 10.0], [2.0, 20.0], [6.0, 60.0]];
        let d = demean_columns(&x).unwrap();
        assert_relative_eq!(d.column(0).sum(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(d.column(1).sum(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(d[[2, 0]], 3.0);
    }

    #[test]
    fn empty_input_errors() {
        let x: Array2<f64> = Array2::zeros((0, 2));
        assert!(matches!(column_means(&x), Err(MathError::EmptyData)));
        assert!(demean_columns(&x).is_err());
    }

    #[test]
    fn symmetrize_is_exact() {
        let a = array![[1.0, 0.1 + 0.2], [0.3, 2.0]];
        let s = symmetrize(&a);
        assert_eq!(s[[0, 1]], s[[1, 0]]);
        assert_eq!(s[[0, 0]], 1.0);
    }
}
