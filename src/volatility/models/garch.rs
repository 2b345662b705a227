//! GARCH(1,1) model: maximum-likelihood estimation in θ-space.
//!
//! This module wires the GARCH(1,1) likelihood to the `LogLikelihood` trait
//! and drives the generic L-BFGS optimizer to a [`GarchFit`].
//!
//! Key ideas:
//! - Parameters live in unconstrained space: `ω = softplus(θ_ω)` and
//!   `(α, β, slack) = (1 − margin)·softmax(θ_α, θ_β, 0)`, so every candidate
//!   is stationary and strictly positive.
//! - The gradient uses the chain rule:
//!   1) accumulate `∂ℓ/∂(μ, ω, α, β)` via the variance sensitivities;
//!   2) map to θ-space using the softplus and scaled-softmax Jacobians.
//! - Candidates whose variance path leaves the domain are rejected by the
//!   optimizer adapter and never reach the caller.
//! - Standard errors use the finite-difference Hessian of `−ℓ` in model space.
use crate::{
    inference::hessian::{calc_covariance, opg_meat},
    optimization::{
        errors::OptResult,
        loglik_optimizer::{Grad, LogLikelihood, OptimOutcome, Theta, maximize},
        numerical_stability::transformations::{safe_logistic, safe_softmax_deriv},
    },
    volatility::{
        core::{
            data::ReturnSeries,
            innovations::GarchInnovation,
            options::{CovarianceKind, GarchOptions},
            params::GarchParams,
            validation::{N_PARAMS, validate_theta},
            variance::{evaluate, loglik_gradient, loglik_value, score_matrix},
        },
        errors::{GarchError, GarchResult},
        models::fitted::{FitDiagnostics, FitParts, GarchFit},
    },
};
use ndarray::{Array1, Array2, array};

/// Fraction of the sample variance used as the starting `ω`.
const START_OMEGA_SHARE: f64 = 1.0 - START_ALPHA - START_BETA;
const START_ALPHA: f64 = 0.05;
const START_BETA: f64 = 0.90;

/// GARCH(1,1) model with an analytic log-likelihood gradient.
///
/// Holds configuration only; fitting returns a fresh [`GarchFit`] and leaves
/// the model untouched, so one model can fit many series.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GarchModel {
    /// Standardized innovation law.
    pub innovation: GarchInnovation,
    /// Seeding, optimizer, and covariance options.
    pub options: GarchOptions,
}

impl GarchModel {
    pub fn new(innovation: GarchInnovation, options: GarchOptions) -> Self {
        GarchModel { innovation, options }
    }

    /// Conventional starting point for `returns`:
    /// `μ = mean`, `ω = var · (1 − 0.05 − 0.90)`, `α = 0.05`, `β = 0.90`.
    ///
    /// `ω` is floored at the smallest positive normal so a constant series
    /// still yields a valid (if degenerate) start.
    pub fn default_start(returns: &ReturnSeries) -> GarchResult<GarchParams> {
        let omega = (returns.variance() * START_OMEGA_SHARE).max(f64::MIN_POSITIVE);
        Ok(GarchParams::new(returns.mean(), omega, START_ALPHA, START_BETA)?)
    }

    /// Fit by maximum likelihood from [`GarchModel::default_start`].
    ///
    /// # Errors
    /// See [`GarchModel::fit_with_start`].
    pub fn fit(&self, returns: &ReturnSeries) -> GarchResult<GarchFit> {
        let start = Self::default_start(returns)?;
        self.fit_with_start(returns, start)
    }

    /// Fit by maximum likelihood from a caller-supplied start.
    ///
    /// ## Steps
    /// 1. Require more observations than parameters and a stationary start.
    /// 2. Evaluate the start; a domain violation there ends the fit as a
    ///    `ConvergenceFailure` with `loglik = −∞`.
    /// 3. Run L-BFGS in θ-space per `options.mle_opts`.
    /// 4. On convergence, recompute the variance path at `θ̂`, then the
    ///    covariance (classical or robust) in model space.
    ///
    /// # Errors
    /// - `InsufficientData` with `n <= 4`.
    /// - `Param(StationarityViolated)` for a non-stationary start.
    /// - `ConvergenceFailure` when the optimizer stops without convergence.
    /// - `Optimizer { text }` for optimizer configuration or backend errors.
    pub fn fit_with_start(
        &self, returns: &ReturnSeries, start: GarchParams,
    ) -> GarchResult<GarchFit> {
        if returns.len() <= N_PARAMS {
            return Err(GarchError::InsufficientData {
                needed: N_PARAMS + 1,
                found: returns.len(),
            });
        }
        let theta0 = start.to_theta()?;
        let seed = self.options.init.seed(returns);

        match loglik_value(&start, returns, seed, &self.innovation) {
            Ok(_) => {}
            Err(GarchError::DomainViolation { .. }) => {
                return Err(GarchError::ConvergenceFailure {
                    best: start,
                    loglik: f64::NEG_INFINITY,
                    iterations: 0,
                    status: "Start point violates the variance domain".to_string(),
                    grad_norm: None,
                });
            }
            Err(err) => return Err(err),
        }

        let outcome = maximize(self, theta0, returns, &self.options.mle_opts)
            .map_err(|err| GarchError::Optimizer { text: err.to_string() })?;
        let params = GarchParams::from_theta(outcome.theta_hat.view())?;
        if !outcome.converged {
            return Err(convergence_failure(params, &outcome));
        }
        self.build_fit(returns, seed, params, outcome)
    }

    fn build_fit(
        &self, returns: &ReturnSeries, seed: f64, params: GarchParams, outcome: OptimOutcome,
    ) -> GarchResult<GarchFit> {
        let eval = evaluate(&params, returns, seed, &self.innovation)?;
        let covariance = self.covariance(returns, seed, &params)?;
        Ok(GarchFit::new(FitParts {
            params,
            innovation: self.innovation,
            covariance,
            covariance_kind: self.options.covariance,
            loglik: eval.loglik,
            returns: returns.values().clone(),
            variance: eval.variance,
            diagnostics: FitDiagnostics {
                iterations: outcome.iterations,
                status: outcome.status,
                grad_norm: outcome.grad_norm,
            },
        }))
    }

    /// Model-space covariance at `params`, or `None` when the observed
    /// information is not positive definite or cannot be computed.
    fn covariance(
        &self, returns: &ReturnSeries, seed: f64, params: &GarchParams,
    ) -> GarchResult<Option<Array2<f64>>> {
        let neg_grad = |x: &Array1<f64>| -> Array1<f64> {
            GarchParams::from_array(x.view())
                .map_err(GarchError::from)
                .and_then(|p| loglik_gradient(&p, returns, seed, &self.innovation))
                .map(|g| -g)
                .unwrap_or_else(|_| Array1::from_elem(N_PARAMS, f64::NAN))
        };
        let meat = match self.options.covariance {
            CovarianceKind::Classical => None,
            CovarianceKind::Robust => {
                Some(opg_meat(&score_matrix(params, returns, seed, &self.innovation)?))
            }
        };
        Ok(calc_covariance(&neg_grad, &params.to_array(), meat.as_ref()).ok().flatten())
    }
}

fn convergence_failure(best: GarchParams, outcome: &OptimOutcome) -> GarchError {
    GarchError::ConvergenceFailure {
        best,
        loglik: outcome.value,
        iterations: outcome.iterations as u64,
        status: outcome.status.clone(),
        grad_norm: outcome.grad_norm,
    }
}

impl LogLikelihood for GarchModel {
    type Data = ReturnSeries;

    /// Log-likelihood at θ, with the variance seed resolved from `data`.
    ///
    /// # Errors
    /// - Parameter-mapping errors (rejected candidates for the optimizer).
    /// - `DomainViolation` when the variance path leaves `(0, ∞)`.
    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<f64> {
        let params = GarchParams::from_theta(theta.view())?;
        let seed = self.options.init.seed(data);
        Ok(loglik_value(&params, data, seed, &self.innovation)?)
    }

    /// Validate θ: four finite entries.
    fn check(&self, theta: &Theta, _data: &Self::Data) -> OptResult<()> {
        validate_theta(theta.view())?;
        Ok(())
    }

    /// Analytic gradient of ℓ with respect to θ.
    ///
    /// `∂ℓ/∂μ` passes through, `∂ℓ/∂θ_ω = ∂ℓ/∂ω · σ(θ_ω)`, and
    /// `(∂ℓ/∂θ_α, ∂ℓ/∂θ_β)` come from the scaled-softmax Jacobian.
    fn grad(&self, theta: &Theta, data: &Self::Data) -> OptResult<Grad> {
        let params = GarchParams::from_theta(theta.view())?;
        let seed = self.options.init.seed(data);
        let g = loglik_gradient(&params, data, seed, &self.innovation)?;
        let (d_alpha, d_beta) = safe_softmax_deriv(params.alpha, params.beta, g[2], g[3]);
        Ok(array![g[0], g[1] * safe_logistic(theta[1]), d_alpha, d_beta])
    }
}
