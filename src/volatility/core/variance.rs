//! Conditional-variance recursion, log-likelihood, and analytic scores for
//! GARCH(1,1).
//!
//! ## Model convention
//! `e_t = r_t − μ`,
//! `σ²_0 = seed`,
//! `σ²_t = ω + α e²_{t−1} + β σ²_{t−1}` for `t ≥ 1`,
//! `ℓ = Σ_t log f(e_t | σ²_t)` under the chosen [`GarchInnovation`].
//!
//! ## What this module does
//! - Walks the recursion once per call, checking every `σ²_t` for positivity
//!   and finiteness; the first failure is reported as
//!   `DomainViolation { index, variance }`.
//! - [`loglik_value`] keeps only a running state (no path allocation) and is
//!   the optimizer's hot path.
//! - [`evaluate`] additionally materializes the variance path.
//! - [`score_matrix`] / [`loglik_gradient`] propagate `∂σ²_t/∂(μ, ω, α, β)`
//!   alongside the recursion. The seed is data-only, so its derivative is 0.
//!
//! ## Derivative recursions (`d_t` = `∂σ²_t/∂·`, `d_0 = 0`)
//! - `∂/∂μ: −2α e_{t−1} + β d_{t−1}`
//! - `∂/∂ω: 1 + β d_{t−1}`
//! - `∂/∂α: e²_{t−1} + β d_{t−1}`
//! - `∂/∂β: σ²_{t−1} + β d_{t−1}`
//!
//! The per-observation score is then
//! `s_t = ∂ℓ_t/∂σ²_t · d_t`, plus `−∂ℓ_t/∂e_t` in the μ slot.
//!
//! Everything here is pure and deterministic: equal inputs give bit-identical
//! outputs.
use crate::volatility::{
    core::{data::ReturnSeries, innovations::GarchInnovation, params::GarchParams},
    errors::{GarchError, GarchResult},
};
use ndarray::{Array1, Array2};

/// Log-likelihood together with the conditional-variance path.
#[derive(Debug, Clone, PartialEq)]
pub struct LikelihoodEval {
    pub loglik: f64,
    pub variance: Array1<f64>,
}

/// One step of the recursion as seen by a consumer.
#[derive(Debug, Clone, Copy)]
struct ObsEntry {
    index: usize,
    residual: f64,
    variance: f64,
    /// `∂σ²_t/∂(μ, ω, α, β)`; all zeros unless derivatives were requested.
    d_var: [f64; 4],
}

/// Drive the recursion over `returns`, handing each observation to `step`.
fn walk_observations<F>(
    params: &GarchParams, returns: &ReturnSeries, seed: f64, with_derivs: bool, mut step: F,
) -> GarchResult<()>
where
    F: FnMut(&ObsEntry) -> GarchResult<()>,
{
    let GarchParams { mu, omega, alpha, beta } = *params;
    let mut variance = seed;
    let mut d_var = [0.0; 4];
    let mut prev: Option<(f64, f64)> = None;

    for (index, &r) in returns.values().iter().enumerate() {
        if let Some((prev_e, prev_var)) = prev {
            if with_derivs {
                d_var = [
                    -2.0 * alpha * prev_e + beta * d_var[0],
                    1.0 + beta * d_var[1],
                    prev_e * prev_e + beta * d_var[2],
                    prev_var + beta * d_var[3],
                ];
            }
            variance = omega + alpha * prev_e * prev_e + beta * prev_var;
        }
        if !(variance > 0.0 && variance.is_finite()) {
            return Err(GarchError::DomainViolation { index, variance });
        }
        let residual = r - mu;
        step(&ObsEntry { index, residual, variance, d_var })?;
        prev = Some((residual, variance));
    }
    Ok(())
}

/// Total log-likelihood without materializing the variance path.
///
/// # Errors
/// `DomainViolation` at the first non-positive or non-finite `σ²_t`.
pub fn loglik_value(
    params: &GarchParams, returns: &ReturnSeries, seed: f64, innovation: &GarchInnovation,
) -> GarchResult<f64> {
    let mut total = 0.0;
    walk_observations(params, returns, seed, false, |obs| {
        total += innovation.log_density(obs.residual, obs.variance)?;
        Ok(())
    })?;
    Ok(total)
}

/// Log-likelihood and the full conditional-variance path.
///
/// # Errors
/// `DomainViolation` at the first non-positive or non-finite `σ²_t`.
pub fn evaluate(
    params: &GarchParams, returns: &ReturnSeries, seed: f64, innovation: &GarchInnovation,
) -> GarchResult<LikelihoodEval> {
    let mut total = 0.0;
    let mut variance = Array1::zeros(returns.len());
    walk_observations(params, returns, seed, false, |obs| {
        total += innovation.log_density(obs.residual, obs.variance)?;
        variance[obs.index] = obs.variance;
        Ok(())
    })?;
    Ok(LikelihoodEval { loglik: total, variance })
}

/// Conditional-variance path alone.
pub fn variance_path(
    params: &GarchParams, returns: &ReturnSeries, seed: f64,
) -> GarchResult<Array1<f64>> {
    let mut variance = Array1::zeros(returns.len());
    walk_observations(params, returns, seed, false, |obs| {
        variance[obs.index] = obs.variance;
        Ok(())
    })?;
    Ok(variance)
}

/// Per-observation scores `∂ℓ_t/∂(μ, ω, α, β)`, shape `n × 4`.
pub fn score_matrix(
    params: &GarchParams, returns: &ReturnSeries, seed: f64, innovation: &GarchInnovation,
) -> GarchResult<Array2<f64>> {
    let mut scores = Array2::zeros((returns.len(), 4));
    walk_observations(params, returns, seed, true, |obs| {
        let row = observation_score(obs, innovation);
        for (k, v) in row.into_iter().enumerate() {
            scores[[obs.index, k]] = v;
        }
        Ok(())
    })?;
    Ok(scores)
}

/// Gradient of the total log-likelihood in model space `(μ, ω, α, β)`.
pub fn loglik_gradient(
    params: &GarchParams, returns: &ReturnSeries, seed: f64, innovation: &GarchInnovation,
) -> GarchResult<Array1<f64>> {
    let mut grad = Array1::zeros(4);
    walk_observations(params, returns, seed, true, |obs| {
        let row = observation_score(obs, innovation);
        for (k, v) in row.into_iter().enumerate() {
            grad[k] += v;
        }
        Ok(())
    })?;
    Ok(grad)
}

fn observation_score(obs: &ObsEntry, innovation: &GarchInnovation) -> [f64; 4] {
    let (d_e, d_var) = innovation.loglik_grads(obs.residual, obs.variance);
    [
        -d_e + d_var * obs.d_var[0],
        d_var * obs.d_var[1],
        d_var * obs.d_var[2],
        d_var * obs.d_var[3],
    ]
}
