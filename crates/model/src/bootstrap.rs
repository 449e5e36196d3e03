//! Residual bootstrap of least-squares coefficients.
//!
//! Each simulation draws a resample of the residual rows, rebuilds
//! `ỹ = Xb + ũ` and re-fits on the original design. The i.i.d. scheme draws
//! rows independently; the block scheme draws contiguous runs of rows that
//! wrap around the end of the sample, which keeps short-range serial
//! dependence intact.

use hacboot_math::least_squares;
use hacboot_primitives::{BootstrapDraws, OlsFit, ResamplingScheme};
use hacboot_traits::{EstimatorError, Resampler};
use ndarray::{Array1, Array2, Axis};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::{debug, instrument};

/// Draws every row independently and uniformly with replacement.
#[derive(Debug, Clone, Copy, Default)]
pub struct IidResampler;

impl Resampler for IidResampler {
    fn indices<R: Rng + ?Sized>(&self, n_obs: usize, rng: &mut R) -> Vec<usize> {
        (0..n_obs).map(|_| rng.gen_range(0..n_obs)).collect()
    }

    fn scheme(&self) -> ResamplingScheme {
        ResamplingScheme::Iid
    }
}

/// Draws `ceil(T/L)` blocks of `L` consecutive rows with wraparound.
#[derive(Debug, Clone, Copy)]
pub struct BlockResampler {
    block_size: usize,
}

impl BlockResampler {
    /// Create a block resampler.
    ///
    /// # Errors
    /// Returns `EstimatorError::InvalidBandwidth` if `block_size` is zero.
    pub fn new(block_size: usize) -> Result<Self, EstimatorError> {
        if block_size == 0 {
            return Err(EstimatorError::InvalidBandwidth { parameter: "block size", value: 0 });
        }
        Ok(Self { block_size })
    }

    /// Rows per block.
    #[must_use]
    pub const fn block_size(&self) -> usize {
        self.block_size
    }
}

impl Resampler for BlockResampler {
    fn indices<R: Rng + ?Sized>(&self, n_obs: usize, rng: &mut R) -> Vec<usize> {
        let starts: Vec<usize> = (0..self.scheme().n_blocks(n_obs))
            .map(|_| rng.gen_range(0..n_obs))
            .collect();
        block_indices(&starts, self.block_size, n_obs)
    }

    fn scheme(&self) -> ResamplingScheme {
        ResamplingScheme::Block { block_size: self.block_size }
    }
}

/// Expand block starts into the first `n_obs` row indices.
///
/// Each start `s` contributes `s, s+1, …, s+L−1`, reduced modulo `n_obs`.
/// Blocks are laid out in the order given and the sequence is cut to
/// `n_obs` entries.
#[must_use]
pub fn block_indices(starts: &[usize], block_size: usize, n_obs: usize) -> Vec<usize> {
    if n_obs == 0 {
        return Vec::new();
    }
    starts
        .iter()
        .flat_map(|&start| (start..start + block_size).map(move |i| i % n_obs))
        .take(n_obs)
        .collect()
}

/// Configuration for the resampling engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootstrapConfig {
    /// Number of simulated samples.
    pub n_sim: usize,
    /// Seed for the per-iteration generator streams used by `run`.
    pub seed: u64,
    /// Run iterations on the rayon pool.
    pub parallel: bool,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self { n_sim: 1000, seed: 0, parallel: false }
    }
}

/// Re-estimates coefficients on simulated samples.
#[derive(Debug, Clone, Default)]
pub struct ResamplingEngine {
    config: BootstrapConfig,
}

impl ResamplingEngine {
    /// Create a new engine with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with custom configuration.
    #[must_use]
    pub const fn with_config(config: BootstrapConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &BootstrapConfig {
        &self.config
    }

    /// Run `n_sim` simulations, iteration `i` drawing from stream `i` of a
    /// `ChaCha8Rng` seeded with the configured seed.
    ///
    /// Output is identical whether or not `parallel` is set.
    ///
    /// # Arguments
    /// * `resampler` - Row index generator
    /// * `coefficients` - Original estimate `b` (K x n)
    /// * `residuals` - Original residuals `u` (T x n)
    /// * `x` - Design matrix (T x K)
    ///
    /// # Errors
    /// Returns `EstimatorError::InvalidConfig` if `n_sim` is zero,
    /// `EstimatorError::DimensionMismatch` if the inputs disagree, and any
    /// error from re-fitting a simulated sample.
    #[instrument(
        skip_all,
        fields(
            n_sim = self.config.n_sim,
            scheme = %resampler.scheme(),
            parallel = self.config.parallel,
        )
    )]
    pub fn run<S: Resampler>(
        &self,
        resampler: &S,
        coefficients: &Array2<f64>,
        residuals: &Array2<f64>,
        x: &Array2<f64>,
    ) -> Result<BootstrapDraws, EstimatorError> {
        self.check_n_sim()?;
        let simulation = Simulation::new(coefficients, residuals, x)?;
        let seed = self.config.seed;

        let draw = |i: usize| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            rng.set_stream(i as u64);
            simulation.redraw(&resampler.indices(simulation.n_obs(), &mut rng))
        };

        let rows: Vec<Array1<f64>> = if self.config.parallel {
            (0..self.config.n_sim).into_par_iter().map(draw).collect::<Result<_, _>>()?
        } else {
            (0..self.config.n_sim).map(draw).collect::<Result<_, _>>()?
        };

        debug!(n_obs = simulation.n_obs(), width = simulation.width(), "bootstrap complete");
        Ok(simulation.assemble(&rows, resampler.scheme()))
    }

    /// Run `n_sim` simulations drawing sequentially from `rng`.
    ///
    /// The configured seed and `parallel` flag are ignored; the draws are a
    /// pure function of the generator state on entry.
    ///
    /// # Errors
    /// Same failure modes as [`Self::run`].
    #[instrument(skip_all, fields(n_sim = self.config.n_sim, scheme = %resampler.scheme()))]
    pub fn draw_with<S: Resampler, R: Rng + ?Sized>(
        &self,
        resampler: &S,
        coefficients: &Array2<f64>,
        residuals: &Array2<f64>,
        x: &Array2<f64>,
        rng: &mut R,
    ) -> Result<BootstrapDraws, EstimatorError> {
        self.check_n_sim()?;
        let simulation = Simulation::new(coefficients, residuals, x)?;

        let rows = (0..self.config.n_sim)
            .map(|_| simulation.redraw(&resampler.indices(simulation.n_obs(), &mut *rng)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(simulation.assemble(&rows, resampler.scheme()))
    }

    /// [`Self::run`] on the coefficients and residuals of an existing fit.
    ///
    /// # Errors
    /// Same failure modes as [`Self::run`].
    pub fn run_fit<S: Resampler>(
        &self,
        resampler: &S,
        fit: &OlsFit,
        x: &Array2<f64>,
    ) -> Result<BootstrapDraws, EstimatorError> {
        self.run(resampler, &fit.coefficients, &fit.residuals, x)
    }

    fn check_n_sim(&self) -> Result<(), EstimatorError> {
        if self.config.n_sim == 0 {
            return Err(EstimatorError::InvalidConfig("n_sim must be positive".to_string()));
        }
        Ok(())
    }
}

/// Shared read-only state of one bootstrap run.
struct Simulation<'a> {
    fitted: Array2<f64>,
    residuals: &'a Array2<f64>,
    x: &'a Array2<f64>,
}

impl<'a> Simulation<'a> {
    fn new(
        coefficients: &Array2<f64>,
        residuals: &'a Array2<f64>,
        x: &'a Array2<f64>,
    ) -> Result<Self, EstimatorError> {
        let (n_obs, n_regressors) = x.dim();

        if n_obs == 0 {
            return Err(EstimatorError::InsufficientData { required: 1, actual: 0 });
        }
        if coefficients.nrows() != n_regressors {
            return Err(EstimatorError::DimensionMismatch {
                expected: n_regressors,
                actual: coefficients.nrows(),
                context: "coefficients".to_string(),
            });
        }
        if residuals.nrows() != n_obs {
            return Err(EstimatorError::DimensionMismatch {
                expected: n_obs,
                actual: residuals.nrows(),
                context: "residuals".to_string(),
            });
        }
        if residuals.ncols() != coefficients.ncols() {
            return Err(EstimatorError::DimensionMismatch {
                expected: coefficients.ncols(),
                actual: residuals.ncols(),
                context: "equations".to_string(),
            });
        }

        Ok(Self { fitted: x.dot(coefficients), residuals, x })
    }

    fn n_obs(&self) -> usize {
        self.x.nrows()
    }

    fn width(&self) -> usize {
        self.fitted.ncols() * self.x.ncols()
    }

    /// Re-fit on `Xb + u[indices]` and return `vec(b̃)`.
    fn redraw(&self, indices: &[usize]) -> Result<Array1<f64>, EstimatorError> {
        let y = &self.fitted + &self.residuals.select(Axis(0), indices);
        let solution = least_squares(&y, self.x)?;
        Ok(solution.coefficients.t().iter().copied().collect())
    }

    fn assemble(&self, rows: &[Array1<f64>], scheme: ResamplingScheme) -> BootstrapDraws {
        let mut draws = Array2::zeros((rows.len(), self.width()));
        for (mut target, row) in draws.rows_mut().into_iter().zip(rows) {
            target.assign(row);
        }
        BootstrapDraws::new(draws, scheme)
    }
}

/// i.i.d. residual bootstrap with a seeded generator.
///
/// # Errors
/// Same failure modes as [`ResamplingEngine::run`].
pub fn bootstrap_iid(
    b: &Array2<f64>,
    u: &Array2<f64>,
    x: &Array2<f64>,
    n_sim: usize,
    seed: u64,
) -> Result<BootstrapDraws, EstimatorError> {
    ResamplingEngine::with_config(BootstrapConfig { n_sim, seed, parallel: false })
        .run(&IidResampler, b, u, x)
}

/// Block residual bootstrap with wraparound and a seeded generator.
///
/// # Errors
/// Returns `EstimatorError::InvalidBandwidth` for a zero block size, plus the
/// failure modes of [`ResamplingEngine::run`].
pub fn bootstrap_block(
    b: &Array2<f64>,
    u: &Array2<f64>,
    x: &Array2<f64>,
    block_size: usize,
    n_sim: usize,
    seed: u64,
) -> Result<BootstrapDraws, EstimatorError> {
    ResamplingEngine::with_config(BootstrapConfig { n_sim, seed, parallel: false })
        .run(&BlockResampler::new(block_size)?, b, u, x)
}
