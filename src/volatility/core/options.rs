//! Configuration for fitting and simulating GARCH(1,1) models.
//!
//! - [`GarchOptions`]: variance seeding policy, optimizer options, and the
//!   covariance estimator used for standard errors.
//! - [`CovarianceKind`]: classical observed-information or robust sandwich.
//! - [`SimOpts`]: seed and burn-in for the simulator.
//!
//! Every type has a `Default` matching the conventional setup: sample
//! variance seed, More–Thuente L-BFGS with tolerances `(1e-6, 1e-9, 200)`,
//! classical standard errors, and no fixed RNG seed.
use crate::{
    optimization::loglik_optimizer::MLEOptions, volatility::core::init::VarianceInit,
};

/// Default number of discarded simulation draws.
pub const DEFAULT_BURN_IN: usize = 500;

/// Estimator for the parameter covariance matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CovarianceKind {
    /// `H⁻¹`, the inverse observed information.
    #[default]
    Classical,
    /// `H⁻¹ S H⁻¹` with `S` the outer product of per-observation scores.
    Robust,
}

/// Options for [`GarchModel`](crate::volatility::models::garch::GarchModel).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GarchOptions {
    pub init: VarianceInit,
    pub mle_opts: MLEOptions,
    pub covariance: CovarianceKind,
}

impl GarchOptions {
    pub fn new(init: VarianceInit, mle_opts: MLEOptions, covariance: CovarianceKind) -> Self {
        GarchOptions { init, mle_opts, covariance }
    }
}

/// Simulation controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimOpts {
    /// Fixed RNG seed for reproducible paths; `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Number of leading draws discarded before recording.
    pub burn_in: usize,
}

impl SimOpts {
    pub fn new(seed: Option<u64>, burn_in: usize) -> Self {
        SimOpts { seed, burn_in }
    }

    /// Reproducible simulation with the default burn-in.
    pub fn seeded(seed: u64) -> Self {
        SimOpts { seed: Some(seed), burn_in: DEFAULT_BURN_IN }
    }
}

impl Default for SimOpts {
    fn default() -> Self {
        SimOpts { seed: None, burn_in: DEFAULT_BURN_IN }
    }
}
