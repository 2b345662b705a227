//! core — GARCH(1,1) data, parameters, and variance recursions.
//!
//! Purpose
//! -------
//! Collect the numerical building blocks for GARCH(1,1): validated price and
//! return containers, model-space parameters and their θ mapping, innovation
//! laws, variance seeding policies, the likelihood evaluator with analytic
//! scores, out-of-sample forecasting, and path simulation.
//!
//! Conventions
//! -----------
//! - Indexing is 0-based; `variance[t]` is the conditional variance of
//!   `returns[t]`.
//! - Model-space vectors are ordered `(μ, ω, α, β)`; optimizer-space θ is
//!   `(μ, θ_ω, θ_α, θ_β)`.
//! - No I/O or logging happens here. Errors are reported via `GarchResult` /
//!   `ParamResult`.

pub mod data;
pub mod forecasts;
pub mod init;
pub mod innovations;
pub mod options;
pub mod params;
pub mod simulate;
pub mod validation;
pub mod variance;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::data::{PriceSeries, ReturnKind, ReturnSeries};
pub use self::forecasts::{ForecastPath, forecast_recursion};
pub use self::init::VarianceInit;
pub use self::innovations::GarchInnovation;
pub use self::options::{CovarianceKind, GarchOptions, SimOpts};
pub use self::params::{GarchParams, StandardErrors};
pub use self::simulate::{SimulatedPath, simulate};
pub use self::variance::{LikelihoodEval, evaluate, loglik_value, score_matrix};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use garch_volatility::volatility::core::prelude::*;
//
// to import the main GARCH core surface in a single line.

pub mod prelude {
    pub use super::data::{PriceSeries, ReturnKind, ReturnSeries};
    pub use super::forecasts::ForecastPath;
    pub use super::init::VarianceInit;
    pub use super::innovations::GarchInnovation;
    pub use super::options::{CovarianceKind, GarchOptions, SimOpts};
    pub use super::params::{GarchParams, StandardErrors};
    pub use super::simulate::simulate;
}
