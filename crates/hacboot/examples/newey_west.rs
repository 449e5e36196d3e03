//! Example: Newey-West standard errors in a long-horizon regression
//!
//! Regressing h-period overlapping returns on a persistent predictor induces
//! MA(h−1) errors by construction. Classical standard errors ignore this and
//! are too small; Newey-West with bandwidth h−1 corrects them. A joint Wald
//! test across two horizons shows the system covariance at work.

use hacboot::{
    model::prelude::*,
    utils::{add_constant, overlapping_sum},
};
use ndarray::{Array1, Array2, Axis, array, s};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

const N_OBS: usize = 600;
const HORIZON: usize = 12;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Newey-West Covariance ===\n");

    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let normal = Normal::new(0.0, 1.0)?;

    // Persistent predictor and one-period returns loading on it
    let mut state = 0.0;
    let predictor: Array1<f64> = (0..N_OBS)
        .map(|_| {
            state = 0.95 * state + normal.sample(&mut rng);
            state
        })
        .collect();
    let returns: Array1<f64> =
        predictor.iter().map(|p| 0.05 * p + normal.sample(&mut rng)).collect();

    // Long-horizon returns from t+1 to t+h
    let long = overlapping_sum(&returns.slice(s![1..]).to_owned(), HORIZON)?;
    let short = overlapping_sum(&returns.slice(s![1..]).to_owned(), 1)?;
    let n = long.len();

    let x = add_constant(&predictor.slice(s![..n]).to_owned().insert_axis(Axis(1)));
    let y = ndarray::stack![Axis(1), short.slice(s![..n]), long];

    let classical = fit_ols(&y, &x)?;
    let hac = fit_ols_system(&y, &x, HORIZON - 1)?;

    println!("{:<12} {:>10} {:>12} {:>12}", "", "slope", "classical", "newey-west");
    println!("{}", "-".repeat(48));
    for (i, label) in ["1-period", "12-period"].iter().enumerate() {
        let k = i * 2 + 1;
        println!(
            "{:<12} {:>10.4} {:>12.4} {:>12.4}",
            label,
            hac.coefficients[[1, i]],
            classical.std_errors()[k],
            hac.std_errors()[k],
        );
    }

    // H0: the 12-period slope equals 12 times the 1-period slope
    let r: Array2<f64> = array![[0.0, -(HORIZON as f64), 0.0, 1.0]];
    let test = wald_test(&hac, &r, &array![0.0])?;
    println!(
        "\nWald test of slope scaling: stat {:.3}, df {}, p-value {:.4}",
        test.statistic, test.degrees_of_freedom, test.p_value
    );

    Ok(())
}
