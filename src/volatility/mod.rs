//! volatility — GARCH(1,1) conditional-volatility stack.
//!
//! Purpose
//! -------
//! Estimate and forecast the conditional volatility of a return series. This
//! is the main entry point of the crate.
//!
//! Downstream usage
//! ----------------
//! 1. Build a [`PriceSeries`] from `(timestamp, price)` pairs and derive a
//!    [`ReturnSeries`] with [`ReturnSeries::from_prices`], or wrap existing
//!    returns with [`ReturnSeries::new`].
//! 2. Construct a [`GarchModel`] from a [`GarchInnovation`] and
//!    [`GarchOptions`] (variance seed, optimizer options, covariance kind).
//! 3. Call `fit(&returns)` to obtain a [`GarchFit`], or a
//!    [`GarchError::ConvergenceFailure`] carrying the best point found.
//! 4. Call `GarchFit::forecast(h)` for a [`ForecastPath`] of `h` variance /
//!    volatility forecasts.
//!
//! Errors are surfaced as [`GarchError`] / [`ParamError`]; the crate performs
//! no I/O.

pub mod core;
pub mod errors;
pub mod models;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::core::{
    CovarianceKind, ForecastPath, GarchInnovation, GarchOptions, GarchParams, PriceSeries,
    ReturnKind, ReturnSeries, SimOpts, StandardErrors, VarianceInit,
};
pub use self::errors::{GarchError, GarchResult, ParamError, ParamResult};
pub use self::models::{GarchFit, GarchModel};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use garch_volatility::volatility::prelude::*;
//
// to import the main volatility surface in a single line.

pub mod prelude {
    pub use super::core::simulate;
    pub use super::{
        CovarianceKind, ForecastPath, GarchError, GarchFit, GarchInnovation, GarchModel,
        GarchOptions, GarchParams, GarchResult, ParamError, PriceSeries, ReturnKind,
        ReturnSeries, SimOpts, StandardErrors, VarianceInit,
    };
}
