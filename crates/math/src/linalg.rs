//! Dense linear algebra for regression and covariance estimation.

use ndarray::{Array1, Array2, Axis, s};

use crate::{MathError, symmetrize};

/// Relative tolerance below which a Householder column norm counts as zero.
const RANK_TOLERANCE: f64 = 1e-10;

/// Relative tolerance below which an elimination pivot counts as zero.
const PIVOT_TOLERANCE: f64 = 1e-12;

/// Result of a multi-response least-squares solve.
#[derive(Debug, Clone)]
pub struct LeastSquares {
    /// Coefficients (K × n).
    pub coefficients: Array2<f64>,
    /// Fitted values `XB` (T × n).
    pub fitted: Array2<f64>,
    /// Residuals `Y − XB` (T × n).
    pub residuals: Array2<f64>,
    /// Upper-triangular factor `R` of `X = QR` (K × K).
    pub r: Array2<f64>,
}

impl LeastSquares {
    /// `(XᵀX)⁻¹` as `R⁻¹R⁻ᵀ`, exactly symmetric.
    ///
    /// The diagonal of `R` passed the rank check in [`least_squares`], so no
    /// second singularity test is made here.
    #[must_use]
    pub fn gram_inverse(&self) -> Array2<f64> {
        let k = self.r.nrows();
        let mut r_inv = Array2::zeros((k, k));
        for col in 0..k {
            for i in (0..=col).rev() {
                let mut sum = if i == col { 1.0 } else { 0.0 };
                for j in (i + 1)..=col {
                    sum -= self.r[[i, j]] * r_inv[[j, col]];
                }
                r_inv[[i, col]] = sum / self.r[[i, i]];
            }
        }
        symmetrize(&r_inv.dot(&r_inv.t()))
    }
}

/// Solve `min ‖Y − XB‖²` column by column for a shared design matrix.
///
/// Factorizes `X = QR` with Householder reflections and back-substitutes
/// `RB = QᵀY`, so `XᵀX` is never formed.
///
/// # Arguments
/// * `y` - Responses (T x n)
/// * `x` - Design matrix (T x K)
///
/// # Returns
/// Coefficients, fitted values and residuals.
///
/// # Errors
/// Returns `MathError::RankDeficient` if `T < K` or `X` lacks full column
/// rank, and `MathError::DimensionMismatch` if the row counts differ.
pub fn least_squares(y: &Array2<f64>, x: &Array2<f64>) -> Result<LeastSquares, MathError> {
    let (n_obs, n_cols) = x.dim();

    if y.nrows() != n_obs {
        return Err(MathError::DimensionMismatch { expected: n_obs, actual: y.nrows() });
    }
    if n_obs == 0 || n_cols == 0 {
        return Err(MathError::EmptyData);
    }
    if n_obs < n_cols {
        return Err(MathError::RankDeficient { rank: n_obs, columns: n_cols });
    }

    let scale = x.axis_iter(Axis(1)).map(|c| c.dot(&c).sqrt()).fold(0.0, f64::max);
    let tol = RANK_TOLERANCE * scale;

    let mut r = x.to_owned();
    let mut qty = y.to_owned();
    let mut rank = 0;

    for j in 0..n_cols {
        let column = r.slice(s![j.., j]);
        let norm = column.dot(&column).sqrt();
        if norm <= tol {
            continue;
        }
        rank += 1;

        // Reflect onto -sign(r_jj) * e1 to avoid cancellation
        let alpha = if r[[j, j]] > 0.0 { -norm } else { norm };
        let mut v = column.to_owned();
        v[0] -= alpha;

        reflect(&mut r, &v, j, j);
        reflect(&mut qty, &v, j, 0);
    }

    if rank < n_cols {
        return Err(MathError::RankDeficient { rank, columns: n_cols });
    }

    let mut coefficients = Array2::zeros((n_cols, y.ncols()));
    for eq in 0..y.ncols() {
        for i in (0..n_cols).rev() {
            let mut sum = qty[[i, eq]];
            for j in (i + 1)..n_cols {
                sum -= r[[i, j]] * coefficients[[j, eq]];
            }
            coefficients[[i, eq]] = sum / r[[i, i]];
        }
    }

    let fitted = x.dot(&coefficients);
    let residuals = y - &fitted;
    let upper =
        Array2::from_shape_fn((n_cols, n_cols), |(i, j)| if i <= j { r[[i, j]] } else { 0.0 });

    Ok(LeastSquares { coefficients, fitted, residuals, r: upper })
}

/// Apply `H = I − 2vvᵀ/vᵀv` to the rows `row..` of columns `first_col..`.
fn reflect(a: &mut Array2<f64>, v: &Array1<f64>, row: usize, first_col: usize) {
    let v_norm2 = v.dot(v);
    for mut column in a.slice_mut(s![row.., first_col..]).axis_iter_mut(Axis(1)) {
        let proj = 2.0 * v.dot(&column) / v_norm2;
        column.scaled_add(-proj, v);
    }
}

/// Solve `AX = B` using Gaussian elimination with partial pivoting.
///
/// # Errors
/// Returns `MathError::Singular` if `A` is singular or nearly singular.
pub fn solve(a: &Array2<f64>, b: &Array2<f64>) -> Result<Array2<f64>, MathError> {
    let n = a.nrows();
    if n == 0 {
        return Err(MathError::EmptyData);
    }
    if a.ncols() != n {
        return Err(MathError::LinearAlgebra("matrix must be square".to_string()));
    }
    if b.nrows() != n {
        return Err(MathError::DimensionMismatch { expected: n, actual: b.nrows() });
    }

    let scale = a.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
    if scale == 0.0 || !scale.is_finite() {
        return Err(MathError::Singular);
    }

    let mut lhs = a.to_owned();
    let mut rhs = b.to_owned();
    let n_rhs = rhs.ncols();

    for col in 0..n {
        // Find pivot
        let mut max_row = col;
        let mut max_val = lhs[[col, col]].abs();
        for row in (col + 1)..n {
            if lhs[[row, col]].abs() > max_val {
                max_val = lhs[[row, col]].abs();
                max_row = row;
            }
        }

        if max_val <= PIVOT_TOLERANCE * scale {
            return Err(MathError::Singular);
        }

        if max_row != col {
            for j in 0..n {
                lhs.swap([col, j], [max_row, j]);
            }
            for j in 0..n_rhs {
                rhs.swap([col, j], [max_row, j]);
            }
        }

        for row in (col + 1)..n {
            let factor = lhs[[row, col]] / lhs[[col, col]];
            if factor == 0.0 {
                continue;
            }
            for j in col..n {
                lhs[[row, j]] -= factor * lhs[[col, j]];
            }
            for j in 0..n_rhs {
                rhs[[row, j]] -= factor * rhs[[col, j]];
            }
        }
    }

    // Back substitution
    let mut x = Array2::zeros((n, n_rhs));
    for k in 0..n_rhs {
        for i in (0..n).rev() {
            let mut sum = rhs[[i, k]];
            for j in (i + 1)..n {
                sum -= lhs[[i, j]] * x[[j, k]];
            }
            x[[i, k]] = sum / lhs[[i, i]];
        }
    }

    Ok(x)
}

/// Invert a square matrix.
///
/// # Errors
/// Returns `MathError::Singular` if the matrix cannot be inverted.
pub fn inverse(a: &Array2<f64>) -> Result<Array2<f64>, MathError> {
    solve(a, &Array2::eye(a.nrows()))
}

/// Kronecker product `A ⊗ B`.
#[must_use]
pub fn kron(a: &Array2<f64>, b: &Array2<f64>) -> Array2<f64> {
    let (br, bc) = b.dim();
    let mut out = Array2::zeros((a.nrows() * br, a.ncols() * bc));
    for ((i, j), &aij) in a.indexed_iter() {
        out.slice_mut(s![i * br..(i + 1) * br, j * bc..(j + 1) * bc]).assign(&(b * aij));
    }
    out
}
