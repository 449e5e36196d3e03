#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hacboot/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod covariance;
pub use covariance::{CovarianceType, VarianceConvention};

mod fit;
pub use fit::OlsFit;

mod scheme;
pub use scheme::ResamplingScheme;

mod draws;
pub use draws::{BootstrapDraws, DrawSummary};

mod hypothesis;
pub use hypothesis::WaldTest;
