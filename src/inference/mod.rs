//! inference — post-estimation uncertainty for fitted models.
//!
//! Classical (observed-information) and robust sandwich covariance matrices,
//! computed from a finite-difference Hessian of the negative log-likelihood
//! and, for the robust variant, an outer-product-of-scores meat. See
//! [`hessian`] for conventions and the singular-information cutoff.

pub mod hessian;

pub use self::hessian::{calc_covariance, calc_standard_errors, opg_meat};
