//! Seeding policies for the first conditional variance `σ²_0`.
//!
//! Purpose
//! -------
//! The GARCH recursion needs a pre-sample variance. This module encodes the
//! choice as an explicit policy, [`VarianceInit`], carried in the model
//! options and applied by the likelihood evaluator.
//!
//! Key behaviors
//! -------------
//! - `SampleVariance` (default): population variance (divisor `n`) of the
//!   returns.
//! - `Backcast { decay }`: exponentially weighted mean of squared
//!   sample-demeaned returns over the first `min(n, 75)` observations,
//!   with weights `decay^k` normalized to sum to one.
//! - `Fixed(v)`: a caller-supplied positive variance.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every seed depends on the data only, never on `(μ, ω, α, β)`, so the
//!   seed contributes no derivative to the score recursion.
//! - A zero seed (constant series) is not rejected here; the evaluator reports
//!   it as a `DomainViolation` at index 0.
use crate::volatility::{
    core::{
        data::ReturnSeries,
        validation::{validate_decay, validate_init_variance},
    },
    errors::GarchResult,
};

/// Default decay for [`VarianceInit::Backcast`].
pub const BACKCAST_DECAY: f64 = 0.94;

/// Maximum number of leading observations used by the backcast.
pub const BACKCAST_WINDOW: usize = 75;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum VarianceInit {
    /// Population sample variance of the returns.
    #[default]
    SampleVariance,
    /// Exponentially weighted backcast with the given decay in (0, 1).
    Backcast { decay: f64 },
    /// Strictly positive fixed seed.
    Fixed(f64),
}

impl VarianceInit {
    pub const fn sample_variance() -> Self {
        VarianceInit::SampleVariance
    }

    /// Backcast with the conventional decay of 0.94.
    pub const fn backcast() -> Self {
        VarianceInit::Backcast { decay: BACKCAST_DECAY }
    }

    /// Backcast with a custom decay.
    ///
    /// # Errors
    /// `InvalidBackcastDecay` unless `0 < decay < 1`.
    pub fn backcast_with_decay(decay: f64) -> GarchResult<Self> {
        Ok(VarianceInit::Backcast { decay: validate_decay(decay)? })
    }

    /// # Errors
    /// `InvalidInitVariance` unless `value` is finite and > 0.
    pub fn fixed(value: f64) -> GarchResult<Self> {
        Ok(VarianceInit::Fixed(validate_init_variance(value)?))
    }

    /// Resolve the policy to a numeric `σ²_0` for `returns`.
    pub fn seed(&self, returns: &ReturnSeries) -> f64 {
        match self {
            VarianceInit::SampleVariance => returns.variance(),
            VarianceInit::Backcast { decay } => backcast(returns, *decay),
            VarianceInit::Fixed(v) => *v,
        }
    }
}

fn backcast(returns: &ReturnSeries, decay: f64) -> f64 {
    let mean = returns.mean();
    let window = returns.len().min(BACKCAST_WINDOW);
    let mut weight = 1.0;
    let mut weight_sum = 0.0;
    let mut acc = 0.0;
    for &r in returns.values().iter().take(window) {
        let e = r - mean;
        acc += weight * e * e;
        weight_sum += weight;
        weight *= decay;
    }
    acc / weight_sum
}
