//! Hypothesis test results.

use serde::{Deserialize, Serialize};

/// Outcome of a joint linear hypothesis test `Rb = a`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaldTest {
    /// Quadratic form `(Rb − a)ᵀ (RVRᵀ)⁻¹ (Rb − a)`.
    pub statistic: f64,
    /// Number of restrictions, the rows of `R`.
    pub degrees_of_freedom: usize,
    /// Asymptotic χ² p-value.
    pub p_value: f64,
}

impl WaldTest {
    /// Whether the null is rejected at significance level `alpha`.
    #[must_use]
    pub fn rejects(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_below_alpha() {
        let test = WaldTest { statistic: 9.0, degrees_of_freedom: 1, p_value: 0.003 };
        assert!(test.rejects(0.05));
        assert!(!test.rejects(0.001));
    }
}
