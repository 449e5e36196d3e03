//! Bartlett (tent) kernel weights.

use ndarray::Array1;

/// Bartlett weight `1 − lag/(bandwidth + 1)` for `lag ≤ bandwidth`, zero beyond.
#[must_use]
pub fn bartlett_weight(lag: usize, bandwidth: usize) -> f64 {
    if lag > bandwidth {
        return 0.0;
    }
    1.0 - lag as f64 / (bandwidth as f64 + 1.0)
}

/// Weights for lags `0..=bandwidth`.
#[must_use]
pub fn bartlett_weights(bandwidth: usize) -> Array1<f64> {
    (0..=bandwidth).map(|lag| bartlett_weight(lag, bandwidth)).collect()
}
