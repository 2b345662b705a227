//! garch_volatility — GARCH(1,1) conditional-volatility estimation and
//! forecasting.
//!
//! Purpose
//! -------
//! Estimate the conditional volatility of a financial return series with a
//! GARCH(1,1) model by maximum likelihood, report fitted parameters with
//! standard errors and information criteria, and produce multi-step
//! volatility forecasts.
//!
//! Key behaviors
//! -------------
//! - [`volatility`]: price/return containers, the variance recursion and
//!   likelihood evaluator, `GarchModel` fitting, `GarchFit` results,
//!   forecasting, and simulation.
//! - [`optimization`]: an argmin-backed L-BFGS maximizer behind the
//!   `LogLikelihood` / `maximize` abstraction, plus numerically stable
//!   parameter transforms.
//! - [`inference`]: classical and robust covariance matrices from a
//!   finite-difference Hessian.
//!
//! Conventions
//! -----------
//! - Returns are percentage returns; variances are in squared percent.
//! - The crate performs no I/O. With the `obs_slog` feature and
//!   `MLEOptions::verbose`, the optimizer logs iterations to the terminal.
//!
//! Example
//! -------
//! ```no_run
//! use garch_volatility::volatility::prelude::*;
//!
//! let params = GarchParams::new(0.0, 0.05, 0.08, 0.90)?;
//! let path = simulate(&params, &GarchInnovation::Normal, 2000, &SimOpts::seeded(1))?;
//! let returns = ReturnSeries::new(path.returns)?;
//! let fit = GarchModel::default().fit(&returns)?;
//! println!("{fit}");
//! for (step, vol) in fit.forecast(5)?.iter() {
//!     println!("h={step}: {vol:.4}");
//! }
//! # Ok::<(), GarchError>(())
//! ```

pub mod inference;
pub mod optimization;
pub mod volatility;
