//! GARCH(1,1) parameterization.
//!
//! This module provides the **model-space** parameter container
//! [`GarchParams`] `(μ, ω, α, β)` and the numerically stable mapping to and
//! from the **optimizer-space** vector θ used by the MLE layer.
//!
//! ## Mapping conventions
//! - `θ = (μ, θ_ω, θ_α, θ_β)`.
//! - `μ` passes through unchanged.
//! - `ω = softplus(θ_ω)` ensures `ω > 0`.
//! - `(α, β, slack)` live on a **scaled simplex** of total mass
//!   `1 − STATIONARITY_MARGIN`; θ stores **log-odds relative to slack**, so
//!   every θ maps to a strictly stationary parameter set.
//!
//! ## Invariants validated by constructors
//! - `μ` finite, `ω > 0`, `α ≥ 0`, `β ≥ 0`, all finite.
//! - [`GarchParams::new`] does **not** require `α + β < 1`: fitted output may
//!   be non-stationary and is then flagged via [`GarchParams::is_stationary`].
//!   [`GarchParams::to_theta`] does require it.
use crate::{
    optimization::numerical_stability::transformations::{
        safe_softmax, safe_softmax_inv, safe_softplus, safe_softplus_inv,
    },
    volatility::{
        core::validation::{
            validate_alpha, validate_beta, validate_mu, validate_omega, validate_stationarity,
            validate_theta,
        },
        errors::ParamResult,
    },
};
use ndarray::{Array1, ArrayView1, array};

/// Constrained model-space parameters of a GARCH(1,1) model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GarchParams {
    /// Mean return μ.
    pub mu: f64,
    /// ω > 0
    pub omega: f64,
    /// α ≥ 0
    pub alpha: f64,
    /// β ≥ 0
    pub beta: f64,
}

impl GarchParams {
    /// Create validated model-space parameters.
    ///
    /// Validates finiteness of every coordinate, `omega > 0`, `alpha >= 0` and
    /// `beta >= 0`. Persistence `alpha + beta >= 1` is accepted.
    pub fn new(mu: f64, omega: f64, alpha: f64, beta: f64) -> ParamResult<Self> {
        validate_mu(mu)?;
        validate_omega(omega)?;
        validate_alpha(alpha)?;
        validate_beta(beta)?;
        Ok(GarchParams { mu, omega, alpha, beta })
    }

    /// Build parameters from an optimizer-space vector θ.
    ///
    /// ### Behavior
    /// 1. Validates `θ.len() == 4` and finiteness.
    /// 2. `ω = softplus(θ_ω)`; an underflow to zero is reported as
    ///    `InvalidOmega` (a rejected candidate for the optimizer).
    /// 3. `(α, β)` from the max-shift scaled softmax over `(θ_α, θ_β, 0)`.
    pub fn from_theta(theta: ArrayView1<f64>) -> ParamResult<Self> {
        validate_theta(theta)?;
        let omega = safe_softplus(theta[1]);
        let (alpha, beta, _slack) = safe_softmax(theta[2], theta[3]);
        let params = GarchParams::new(theta[0], omega, alpha, beta)?;
        validate_stationarity(alpha, beta)?;
        Ok(params)
    }

    /// Map to optimizer-space θ.
    ///
    /// `α` and `β` are clamped to a tiny floor before taking logs, so
    /// boundary values map to large-magnitude but finite logits.
    ///
    /// # Errors
    /// `StationarityViolated` when `α + β >= 1`.
    pub fn to_theta(&self) -> ParamResult<Array1<f64>> {
        validate_stationarity(self.alpha, self.beta)?;
        let (theta_alpha, theta_beta) = safe_softmax_inv(self.alpha, self.beta);
        Ok(array![self.mu, safe_softplus_inv(self.omega), theta_alpha, theta_beta])
    }

    /// Model-space vector `(μ, ω, α, β)`.
    pub fn to_array(&self) -> Array1<f64> {
        array![self.mu, self.omega, self.alpha, self.beta]
    }

    /// Inverse of [`GarchParams::to_array`], with the same validation as
    /// [`GarchParams::new`].
    pub fn from_array(x: ArrayView1<f64>) -> ParamResult<Self> {
        validate_theta(x)?;
        GarchParams::new(x[0], x[1], x[2], x[3])
    }

    /// `α + β`.
    pub fn persistence(&self) -> f64 {
        self.alpha + self.beta
    }

    pub fn is_stationary(&self) -> bool {
        self.persistence() < 1.0
    }

    /// Long-run variance `ω / (1 − α − β)`, or `None` when non-stationary.
    pub fn unconditional_variance(&self) -> Option<f64> {
        self.is_stationary().then(|| self.omega / (1.0 - self.persistence()))
    }

    /// Number of periods for a variance shock to decay by half,
    /// `ln 0.5 / ln(α + β)`.
    ///
    /// `None` when non-stationary or when `α + β = 0` (no persistence).
    pub fn half_life(&self) -> Option<f64> {
        let p = self.persistence();
        (p > 0.0 && p < 1.0).then(|| 0.5_f64.ln() / p.ln())
    }
}

impl std::fmt::Display for GarchParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "(mu={:.6}, omega={:.6}, alpha={:.6}, beta={:.6})",
            self.mu, self.omega, self.alpha, self.beta
        )
    }
}

/// Standard errors of `(μ, ω, α, β)` in model space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandardErrors {
    pub mu: f64,
    pub omega: f64,
    pub alpha: f64,
    pub beta: f64,
}

impl StandardErrors {
    /// From a model-space vector ordered `(μ, ω, α, β)`.
    pub fn from_array(se: ArrayView1<f64>) -> Option<Self> {
        (se.len() == 4 && se.iter().all(|v| v.is_finite())).then(|| StandardErrors {
            mu: se[0],
            omega: se[1],
            alpha: se[2],
            beta: se[3],
        })
    }

    pub fn to_array(&self) -> Array1<f64> {
        array![self.mu, self.omega, self.alpha, self.beta]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::numerical_stability::transformations::STATIONARITY_MARGIN;
    use crate::volatility::errors::ParamError;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Construction invariants, including acceptance of non-stationary output.
    // - θ round trips and the stationarity guarantee of `from_theta`.
    // - Derived quantities (unconditional variance, half-life).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that `new` validates domains but accepts persistence >= 1.
    //
    // Given
    // -----
    // - ω = 0 (invalid) and (α, β) = (0.2, 0.85) (non-stationary).
    //
    // Expect
    // ------
    // - `InvalidOmega` for the first; the second constructs and is flagged
    //   non-stationary with no unconditional variance.
    fn new_validates_domain_but_allows_non_stationary_output() {
        assert!(matches!(GarchParams::new(0.0, 0.0, 0.1, 0.8), Err(ParamError::InvalidOmega { .. })));
        let p = GarchParams::new(0.0, 0.1, 0.2, 0.85).expect("non-stationary is allowed");
        assert!(!p.is_stationary());
        assert!(p.unconditional_variance().is_none());
        assert!(p.half_life().is_none());
        assert!(matches!(p.to_theta(), Err(ParamError::StationarityViolated { .. })));
    }

    #[test]
    // Purpose
    // -------
    // Check that θ round-trips typical parameters.
    //
    // Given
    // -----
    // - (μ, ω, α, β) = (0.03, 0.05, 0.08, 0.90).
    //
    // Expect
    // ------
    // - `from_theta(to_theta(p)) ≈ p` to 1e-10.
    fn theta_round_trip_recovers_parameters() {
        // Arrange
        let p = GarchParams::new(0.03, 0.05, 0.08, 0.90).expect("valid");

        // Act
        let theta = p.to_theta().expect("stationary");
        let back = GarchParams::from_theta(theta.view()).expect("valid theta");

        // Assert
        assert_relative_eq!(back.mu, p.mu, epsilon = 1e-12);
        assert_relative_eq!(back.omega, p.omega, epsilon = 1e-10);
        assert_relative_eq!(back.alpha, p.alpha, epsilon = 1e-10);
        assert_relative_eq!(back.beta, p.beta, epsilon = 1e-10);
    }

    #[test]
    // Purpose
    // -------
    // Ensure arbitrary finite θ always maps to a strictly stationary set.
    //
    // Given
    // -----
    // - Extreme logits favoring α and β.
    //
    // Expect
    // ------
    // - α + β ≤ 1 − STATIONARITY_MARGIN and ω > 0.
    fn from_theta_is_always_stationary() {
        for theta in [array![0.0, 3.0, 50.0, 50.0], array![1.0, -5.0, -40.0, 30.0]] {
            let p = GarchParams::from_theta(theta.view()).expect("finite theta");
            assert!(p.persistence() <= 1.0 - STATIONARITY_MARGIN + 1e-15);
            assert!(p.omega > 0.0);
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify derived quantities on a known parameter set.
    //
    // Given
    // -----
    // - (ω, α, β) = (0.1, 0.1, 0.8).
    //
    // Expect
    // ------
    // - Unconditional variance 1.0; half-life ln 0.5 / ln 0.9 ≈ 6.579.
    fn derived_quantities_match_closed_forms() {
        let p = GarchParams::new(0.0, 0.1, 0.1, 0.8).expect("valid");
        assert_relative_eq!(p.unconditional_variance().expect("stationary"), 1.0, epsilon = 1e-12);
        assert_relative_eq!(p.half_life().expect("persistent"), 6.578_813_478_960_585, epsilon = 1e-9);
        assert_relative_eq!(p.persistence(), 0.9, epsilon = 1e-15);
    }
}
