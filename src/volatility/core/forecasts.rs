//! Multi-step variance forecasting for GARCH(1,1).
//!
//! Purpose
//! -------
//! Roll the fitted variance recursion beyond the sample end and expose the
//! forecast path as variances and volatilities.
//!
//! Key behaviors
//! -------------
//! - One step ahead: `σ̂²_{n+1} = ω + α e²_n + β σ²_n`, using the last
//!   in-sample residual `e_n = r_n − μ` and conditional variance `σ²_n`.
//! - Further steps use `E[e²] = σ²`, so `σ̂²_{n+k} = ω + (α + β) σ̂²_{n+k−1}`.
//! - Under stationarity the path converges monotonically to `ω / (1 − α − β)`.
//!
//! Conventions
//! -----------
//! - `variances[i]` is the `(i + 1)`-step-ahead forecast.
//! - Steps reported by [`ForecastPath::iter`] start at 1.
use crate::volatility::{
    core::params::GarchParams,
    errors::{GarchError, GarchResult},
};
use ndarray::Array1;

/// Forecast path of conditional variances for steps `1..=h`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastPath {
    variances: Array1<f64>,
}

impl ForecastPath {
    pub fn horizon(&self) -> usize {
        self.variances.len()
    }

    pub fn variances(&self) -> &Array1<f64> {
        &self.variances
    }

    /// Volatility forecasts `sqrt(σ̂²_{n+k})`.
    pub fn volatilities(&self) -> Array1<f64> {
        self.variances.mapv(f64::sqrt)
    }

    /// Final forecast `σ̂²_{n+h}`.
    pub fn last_variance(&self) -> Option<f64> {
        self.variances.last().copied()
    }

    /// `(step, volatility)` pairs with steps starting at 1.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.variances.iter().enumerate().map(|(i, v)| (i + 1, v.sqrt()))
    }
}

/// Roll the GARCH(1,1) variance recursion `horizon` steps ahead.
///
/// Parameters
/// ----------
/// - `params`: `&GarchParams`
///   Fitted model-space parameters.
/// - `last_return`: `f64`
///   Last in-sample return `r_n`; the residual uses `params.mu`.
/// - `last_variance`: `f64`
///   Last in-sample conditional variance `σ²_n`.
/// - `horizon`: `usize`
///   Number of steps to forecast.
///
/// Returns
/// -------
/// GarchResult<ForecastPath>
///   Path of `horizon` variance forecasts.
///
/// Errors
/// ------
/// - `GarchError::InvalidHorizon` when `horizon == 0`.
pub fn forecast_recursion(
    params: &GarchParams, last_return: f64, last_variance: f64, horizon: usize,
) -> GarchResult<ForecastPath> {
    if horizon == 0 {
        return Err(GarchError::InvalidHorizon { horizon });
    }
    let e = last_return - params.mu;
    let persistence = params.persistence();
    let mut variances = Array1::zeros(horizon);
    let mut current = params.omega + params.alpha * e * e + params.beta * last_variance;
    variances[0] = current;
    for k in 1..horizon {
        current = params.omega + persistence * current;
        variances[k] = current;
    }
    Ok(ForecastPath { variances })
}
