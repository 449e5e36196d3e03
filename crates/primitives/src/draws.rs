//! Bootstrap draw matrices and their summaries.

use ndarray::{Array1, Array2, Axis};

use crate::ResamplingScheme;

/// Column-wise summary of a draw matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawSummary {
    /// Mean of each coefficient across draws.
    pub mean: Array1<f64>,
    /// Population standard deviation (divide by `NSim`) of each coefficient.
    pub std: Array1<f64>,
}

/// Empirical distribution of re-estimated coefficients.
///
/// One row per simulation draw, one column per entry of `vec(B)`.
#[derive(Debug, Clone)]
pub struct BootstrapDraws {
    /// Draw matrix (NSim × nK).
    pub draws: Array2<f64>,
    /// Scheme that generated the draws.
    pub scheme: ResamplingScheme,
}

impl BootstrapDraws {
    /// Create a draw collection.
    #[must_use]
    pub const fn new(draws: Array2<f64>, scheme: ResamplingScheme) -> Self {
        Self { draws, scheme }
    }

    /// Number of simulation draws.
    #[must_use]
    pub fn n_sim(&self) -> usize {
        self.draws.nrows()
    }

    /// Number of coefficients per draw.
    #[must_use]
    pub fn n_coefficients(&self) -> usize {
        self.draws.ncols()
    }

    /// Column-wise mean and population standard deviation.
    #[must_use]
    pub fn summary(&self) -> DrawSummary {
        let mean = self
            .draws
            .mean_axis(Axis(0))
            .unwrap_or_else(|| Array1::zeros(self.n_coefficients()));
        let std = if self.n_sim() == 0 {
            Array1::zeros(self.n_coefficients())
        } else {
            self.draws.std_axis(Axis(0), 0.0)
        };
        DrawSummary { mean, std }
    }

    /// Population covariance matrix of the draws.
    #[must_use]
    pub fn covariance(&self) -> Array2<f64> {
        let k = self.n_coefficients();
        let Some(mean) = self.draws.mean_axis(Axis(0)) else {
            return Array2::zeros((k, k));
        };
        let centered = &self.draws - &mean;
        centered.t().dot(&centered) / self.n_sim() as f64
    }

    /// Column-wise quantile at probability `p` with linear interpolation.
    ///
    /// Returns `None` for an empty draw matrix or `p` outside `[0, 1]`.
    #[must_use]
    pub fn quantiles(&self, p: f64) -> Option<Array1<f64>> {
        if self.n_sim() == 0 || !(0.0..=1.0).contains(&p) {
            return None;
        }

        let h = (self.n_sim() - 1) as f64 * p;
        let lo = h.floor() as usize;
        let hi = (lo + 1).min(self.n_sim() - 1);
        let frac = h - lo as f64;

        let values = self
            .draws
            .axis_iter(Axis(1))
            .map(|column| {
                let mut sorted = column.to_vec();
                sorted.sort_by(f64::total_cmp);
                sorted[lo] + frac * (sorted[hi] - sorted[lo])
            })
            .collect();
        Some(values)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ndarray::array;
    use rstest::rstest;

    use super::*;

    fn draws() -> BootstrapDraws {
        BootstrapDraws::new(
            array![[1.0, 10.0], [2.0, 20.0], [3.0, 30.0], [4.0, 40.0]],
            ResamplingScheme::Iid,
        )
    }

    #[test]
    fn summary_uses_population_std() {
        let summary = draws().summary();
        assert_relative_eq!(summary.mean[0], 2.5);
        assert_relative_eq!(summary.mean[1], 25.0);
        // sqrt(((1.5² + 0.5²) * 2) / 4)
        assert_relative_eq!(summary.std[0], 1.25_f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(summary.std[1], 10.0 * 1.25_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn covariance_matches_std() {
        let d = draws();
        let cov = d.covariance();
        let std = d.summary().std;
        assert_relative_eq!(cov[[0, 0]].sqrt(), std[0], epsilon = 1e-12);
        assert_relative_eq!(cov[[0, 1]], cov[[1, 0]]);
    }

    #[rstest]
    #[case(0.0, 1.0)]
    #[case(1.0, 4.0)]
    #[case(0.5, 2.5)]
    #[case(0.25, 1.75)]
    fn quantiles_interpolate(#[case] p: f64, #[case] expected: f64) {
        let q = draws().quantiles(p).unwrap();
        assert_relative_eq!(q[0], expected, epsilon = 1e-12);
        assert_relative_eq!(q[1], 10.0 * expected, epsilon = 1e-12);
    }

    #[test]
    fn quantiles_reject_invalid_probability() {
        assert!(draws().quantiles(1.5).is_none());
        assert!(draws().quantiles(-0.1).is_none());
    }

    #[test]
    fn empty_draws_summarize_to_zero() {
        let empty = BootstrapDraws::new(Array2::zeros((0, 3)), ResamplingScheme::Iid);
        let summary = empty.summary();
        assert_eq!(summary.mean.len(), 3);
        assert!(summary.std.iter().all(|&s| s == 0.0));
        assert!(empty.quantiles(0.5).is_none());
    }
}
