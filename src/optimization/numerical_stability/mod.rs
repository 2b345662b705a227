//! numerical_stability — numerically robust parameter transforms.
//!
//! Purpose
//! -------
//! Collect numerically stable scalar transforms used to map the optimizer's
//! unconstrained vector θ onto the GARCH(1,1) feasible region and to push
//! gradients back through that mapping. This module centralizes small
//! numerical tolerances so the optimization, inference, and volatility layers
//! share the same guards.
//!
//! Key behaviors
//! -------------
//! - Provide stable scalar transforms (`safe_softplus`, its inverse, and
//!   `safe_logistic`) for mapping unconstrained reals into strictly positive
//!   parameters without overflow/underflow.
//! - Implement a stationarity-aware softmax mapping from two logits to
//!   `(α, β)` plus an implicit slack (`safe_softmax`), its inverse
//!   (`safe_softmax_inv`), and a Jacobian–vector product helper
//!   (`safe_softmax_deriv`) for gradient propagation.
//! - Centralize tolerances (`STATIONARITY_MARGIN`, `LOGIT_EPS`, `EIGEN_EPS`).
//!
//! Invariants & assumptions
//! ------------------------
//! - All public transforms assume finite `f64` inputs; domain validation is
//!   enforced in the volatility and optimizer layers, not here.
//! - `STATIONARITY_MARGIN` is a fixed global slack enforcing
//!   `α + β + slack = 1 − STATIONARITY_MARGIN`.
//!
//! Conventions
//! -----------
//! - θ layout for GARCH(1,1) is `(μ, θ_ω, θ_α, θ_β)`; μ is unconstrained and
//!   passes through unchanged, `ω = softplus(θ_ω)`, and `(α, β)` come from the
//!   scaled softmax over `(θ_α, θ_β, 0)`.
//! - This module never logs, performs I/O, or touches global state.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`transformations`] cover agreement with naive formulas,
//!   tail behavior, softmax mass conservation, inverse round trips, and a
//!   finite-difference check of `safe_softmax_deriv`.

pub mod transformations;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::transformations::{
    EIGEN_EPS, LOGIT_EPS, STATIONARITY_MARGIN, safe_logistic, safe_softmax, safe_softmax_deriv,
    safe_softmax_inv, safe_softplus, safe_softplus_inv,
};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use garch_volatility::optimization::numerical_stability::prelude::*;
//
// to import the main numerical-stability surface in a single line.

pub mod prelude {
    pub use super::transformations::{
        EIGEN_EPS, LOGIT_EPS, STATIONARITY_MARGIN, safe_logistic, safe_softmax, safe_softmax_inv,
        safe_softplus, safe_softplus_inv,
    };
}
