//! # hacboot
//!
//! Least-squares regression with heteroskedasticity and autocorrelation
//! consistent (Newey-West) covariance, seemingly unrelated regressions with a
//! joint Wald test, and i.i.d. or block residual bootstrap.
//!
//! This crate re-exports the workspace crates behind feature flags.
//!
//! ## Features
//!
//! - `full` (default): Enables all components
//! - `primitives`: Fit records, configuration enums and draw summaries
//! - `traits`: Estimator, covariance and resampler traits
//! - `math`: QR least squares, Bartlett kernel and Newey-West core
//! - `model`: OLS, SURE, Wald tests and the resampling engine
//! - `utils`: CSV loading and series helpers
//! - `cli`: The `analyze` binary
//!
//! ## Example
//!
//! ```rust,ignore
//! use hacboot::model::prelude::*;
//!
//! let fit = OlsEstimator::with_covariance(CovarianceType::NeweyWest { bandwidth: 4 })
//!     .fit(&y, &x)?;
//! let draws = bootstrap_block(&fit.coefficients, &fit.residuals, &x, 10, 1000, 42)?;
//! println!("{:?} vs {:?}", fit.std_errors(), draws.summary().std);
//! ```

#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hacboot/issues/")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[cfg(feature = "primitives")]
#[doc(inline)]
pub use hacboot_primitives as primitives;
#[cfg(feature = "traits")]
#[doc(inline)]
pub use hacboot_traits as traits;
#[cfg(feature = "math")]
#[doc(inline)]
pub use hacboot_math as math;
#[cfg(feature = "model")]
#[doc(inline)]
pub use hacboot_model as model;
#[cfg(feature = "utils")]
#[doc(inline)]
pub use hacboot_utils as utils;
