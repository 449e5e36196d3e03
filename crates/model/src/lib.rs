#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hacboot/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod covariance;
pub use covariance::{NeweyWest, hac_covariance, moment_matrix};

mod ols;
pub use ols::{OlsConfig, OlsEstimator, fit_ols};

mod sure;
pub use sure::{SureConfig, SureEstimator, fit_ols_system};

mod hypothesis;
pub use hypothesis::{linear_hypothesis, wald_test};

mod bootstrap;
pub use bootstrap::{
    BlockResampler, BootstrapConfig, IidResampler, ResamplingEngine, block_indices,
    bootstrap_block, bootstrap_iid,
};

/// Re-export commonly used types.
pub mod prelude {
    pub use hacboot_primitives::{
        BootstrapDraws, CovarianceType, DrawSummary, OlsFit, ResamplingScheme, VarianceConvention,
        WaldTest,
    };
    pub use hacboot_traits::{CovarianceEstimator, EstimatorError, LinearEstimator, Resampler};

    pub use super::{
        BlockResampler, BootstrapConfig, IidResampler, NeweyWest, OlsConfig, OlsEstimator,
        ResamplingEngine, SureConfig, SureEstimator, bootstrap_block, bootstrap_iid, fit_ols,
        fit_ols_system, hac_covariance, wald_test,
    };
}
