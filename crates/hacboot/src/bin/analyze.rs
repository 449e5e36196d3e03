//! Regression standard-error comparison CLI tool.
//!
//! Fits `y` on a constant plus the given regressors and prints classical,
//! Newey-West, i.i.d. bootstrap and block bootstrap standard errors side by
//! side.
//!
//! Usage: `cargo run --features cli --bin analyze -- FILE --y COL --x COL[,COL..]
//! [--bandwidth M] [--block-size L] [--n-sim N] [--seed S] [--parallel]`

use std::env;

use hacboot::{
    model::{
        BlockResampler, BootstrapConfig, IidResampler, OlsEstimator, ResamplingEngine, fit_ols,
    },
    primitives::{CovarianceType, OlsFit},
    traits::{LinearEstimator, checked_bandwidth},
    utils::{add_constant, frame_to_matrix, read_csv},
};
use tracing_subscriber::EnvFilter;

/// Default Newey-West lag bandwidth.
const DEFAULT_BANDWIDTH: i64 = 5;

/// Default bootstrap block size.
const DEFAULT_BLOCK_SIZE: i64 = 10;

/// Default number of bootstrap draws.
const DEFAULT_N_SIM: usize = 1000;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || flag_value(&args, "--y").is_none() || flag_value(&args, "--x").is_none() {
        eprintln!(
            "Usage: analyze FILE --y COL --x COL[,COL..] [--bandwidth M] [--block-size L] \
             [--n-sim N] [--seed S] [--parallel]"
        );
        eprintln!("Example: analyze returns.csv --y excess --x dividend_yield --bandwidth 12");
        std::process::exit(1);
    }

    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Value following `flag`, if present.
fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter().position(|a| a == flag).and_then(|i| args.get(i + 1)).map(String::as_str)
}

fn parse_flag<T: std::str::FromStr>(
    args: &[String],
    flag: &str,
    default: T,
) -> Result<T, Box<dyn std::error::Error>> {
    match flag_value(args, flag) {
        Some(raw) => raw
            .parse()
            .map_err(|_| Box::<dyn std::error::Error>::from(format!("invalid value for {flag}: {raw}"))),
        None => Ok(default),
    }
}

fn run(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let path = &args[1];
    let y_name = flag_value(args, "--y").ok_or("missing --y")?;
    let x_names: Vec<&str> =
        flag_value(args, "--x").ok_or("missing --x")?.split(',').map(str::trim).collect();

    let bandwidth =
        checked_bandwidth("bandwidth", parse_flag(args, "--bandwidth", DEFAULT_BANDWIDTH)?)?;
    let block_size =
        checked_bandwidth("block size", parse_flag(args, "--block-size", DEFAULT_BLOCK_SIZE)?)?;
    let config = BootstrapConfig {
        n_sim: parse_flag(args, "--n-sim", DEFAULT_N_SIM)?,
        seed: parse_flag(args, "--seed", 0_u64)?,
        parallel: args.iter().any(|a| a == "--parallel"),
    };

    let df = read_csv(path)?;
    let y = frame_to_matrix(&df, &[y_name])?;
    let x = add_constant(&frame_to_matrix(&df, &x_names)?);

    let classical = fit_ols(&y, &x)?;
    let newey_west =
        OlsEstimator::with_covariance(CovarianceType::NeweyWest { bandwidth }).fit(&y, &x)?;

    let engine = ResamplingEngine::with_config(config);
    let iid = engine.run_fit(&IidResampler, &classical, &x)?.summary();
    let block = engine.run_fit(&BlockResampler::new(block_size)?, &classical, &x)?.summary();

    let mut names = vec!["const"];
    names.extend(x_names.iter().copied());

    print_header(path, y_name, &classical, bandwidth, block_size, config.n_sim);
    let nw_se = newey_west.std_errors();
    let classical_se = classical.std_errors();
    for (k, name) in names.iter().enumerate() {
        println!(
            "{:<16} {:>10.4} {:>10.4} {:>10.4} {:>10.4} {:>10.4}",
            name,
            classical.coefficients[[k, 0]],
            classical_se[k],
            nw_se[k],
            iid.std[k],
            block.std[k],
        );
    }
    println!();

    Ok(())
}

fn print_header(
    path: &str,
    y_name: &str,
    fit: &OlsFit,
    bandwidth: usize,
    block_size: usize,
    n_sim: usize,
) {
    println!(
        "\n{y_name} on {} regressors, {} observations ({path})",
        fit.n_regressors(),
        fit.n_obs()
    );
    println!(
        "adj. R² {:.4} | Newey-West lags {bandwidth} | block size {block_size} | {n_sim} draws\n",
        fit.adj_r_squared[0]
    );
    println!(
        "{:<16} {:>10} {:>10} {:>10} {:>10} {:>10}",
        "", "coef", "classical", "newey-west", "iid boot", "block boot"
    );
    println!("{}", "-".repeat(71));
}
