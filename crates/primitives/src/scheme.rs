//! Resampling scheme descriptors.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// How residuals are resampled when simulating new responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize, Deserialize)]
pub enum ResamplingScheme {
    /// Rows drawn independently and uniformly with replacement.
    #[default]
    #[display("iid")]
    Iid,
    /// Contiguous blocks of rows with wraparound at the end of the sample.
    #[display("block({block_size})")]
    Block {
        /// Number of consecutive rows per block.
        block_size: usize,
    },
}

impl ResamplingScheme {
    /// Number of blocks needed to cover `n_obs` rows.
    ///
    /// The i.i.d. scheme is treated as blocks of length one.
    #[must_use]
    pub const fn n_blocks(&self, n_obs: usize) -> usize {
        match self {
            Self::Iid => n_obs,
            Self::Block { block_size: 0 } => 0,
            Self::Block { block_size } => n_obs.div_ceil(*block_size),
        }
    }
}
