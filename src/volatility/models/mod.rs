//! models — user-facing GARCH(1,1) estimation and fitted results.
//!
//! - [`GarchModel`] implements [`LogLikelihood`](crate::optimization::loglik_optimizer::LogLikelihood)
//!   in θ-space and provides `fit` / `fit_with_start`.
//! - [`GarchFit`] is the read-only result of a converged fit: parameters,
//!   standard errors, information criteria, variance path, and forecasts.

pub mod fitted;
pub mod garch;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::fitted::{FitDiagnostics, GarchFit};
pub use self::garch::GarchModel;
