#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hacboot/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod frame;
pub use frame::{frame_to_matrix, read_csv};

mod series;
pub use series::{add_constant, lag, overlapping_sum};

mod error;
pub use error::UtilsError;
