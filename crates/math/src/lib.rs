#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hacboot/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod moments;
pub use moments::{column_means, demean_columns, symmetrize};

mod kernel;
pub use kernel::{bartlett_weight, bartlett_weights};

mod linalg;
pub use linalg::{LeastSquares, inverse, kron, least_squares, solve};

mod hac;
pub use hac::newey_west;

mod error;
pub use error::MathError;
