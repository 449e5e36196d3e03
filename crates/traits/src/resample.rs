//! Resampling trait definitions.

use hacboot_primitives::ResamplingScheme;
use rand::Rng;

/// Generates the row indices of one simulated sample.
///
/// Implementations draw only from the generator they are handed, so a run is
/// a pure function of the generator state and the number of draws consumed.
pub trait Resampler: Send + Sync {
    /// Row indices in `[0, n_obs)`, exactly `n_obs` of them.
    fn indices<R: Rng + ?Sized>(&self, n_obs: usize, rng: &mut R) -> Vec<usize>;

    /// Returns the scheme this resampler implements.
    fn scheme(&self) -> ResamplingScheme;
}
