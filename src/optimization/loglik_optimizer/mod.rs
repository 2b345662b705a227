//! loglik_optimizer — argmin-powered maximization of log-likelihoods.
//!
//! Purpose
//! -------
//! Let a model maximize its log-likelihood `ℓ(θ)` by implementing a single
//! trait, [`LogLikelihood`], and calling [`maximize`]. The solver is L-BFGS
//! with a More–Thuente (default) or Hager–Zhang line search.
//!
//! Key behaviors
//! -------------
//! - [`adapter::ArgMinAdapter`] turns `ℓ(θ)` into the argmin cost
//!   `c(θ) = -ℓ(θ)`, penalizes candidates outside the model domain with
//!   [`types::REJECTED_COST`], and falls back to finite differences when no
//!   analytic gradient exists.
//! - [`adapter::CandidateTracker`] remembers the best feasible candidate so
//!   [`run::run_lbfgs`] can return a non-converged [`OptimOutcome`] instead of
//!   an error when the backend aborts mid-run.
//! - [`finite_diff`] supplies FD gradients and Hessians; [`validation`]
//!   centralizes finiteness and shape checks.
//!
//! Invariants & assumptions
//! ------------------------
//! - User code implements `ℓ(θ)` and `∇ℓ(θ)`, never the cost.
//! - `value`/`grad` report invalid candidates as recoverable [`OptError`]
//!   values, never panics. Those for which
//!   [`OptError::is_rejected_candidate`] holds are penalized; anything else
//!   aborts the run.
//! - `OptimOutcome::converged` is true only for argmin's `SolverConverged` or
//!   `TargetCostReached`; hitting `max_iter` is reported as not converged.
//!
//! Conventions
//! -----------
//! - [`Theta`] is the unconstrained optimizer vector. Mapping to and from
//!   model parameters happens in the model layer.
//! - [`OptimOutcome::value`] is the log-likelihood, not the cost.
//!
//! Testing notes
//! -------------
//! - Submodule tests cover sign conventions, rejected candidates, the FD
//!   fallback, builder wiring, validators, and outcome classification.
//! - `api` tests run [`maximize`] end to end on a concave toy objective; the
//!   GARCH integration tests exercise the full path on simulated returns.
//!
//! [`OptError`]: crate::optimization::errors::OptError
//! [`OptError::is_rejected_candidate`]: crate::optimization::errors::OptError::is_rejected_candidate

pub mod adapter;
pub mod api;
pub mod builders;
pub mod finite_diff;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::maximize;
pub use self::traits::{LineSearcher, LogLikelihood, MLEOptions, OptimOutcome, Tolerances};
pub use self::types::{Cost, DEFAULT_LBFGS_MEM, FnEvalMap, Grad, REJECTED_COST, Theta};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use garch_volatility::optimization::loglik_optimizer::prelude::*;
//
// to import the main optimizer surface in a single line.

pub mod prelude {
    pub use super::api::maximize;
    pub use super::traits::{LineSearcher, LogLikelihood, MLEOptions, OptimOutcome, Tolerances};
    pub use super::types::{Cost, Grad, Theta};
}
