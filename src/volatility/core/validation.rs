//! GARCH validation helpers — reusable checks for prices, returns, parameters,
//! options, and optimizer inputs.
//!
//! Purpose
//! -------
//! Centralize the small checks that constructors across the volatility stack
//! run before accepting data, so they fail fast with structured errors.
//!
//! Invariants & assumptions
//! ------------------------
//! - Prices must be finite and strictly positive.
//! - Returns must be finite; nothing non-finite reaches the evaluator.
//! - ω must be finite and > 0; α and β finite and >= 0; μ finite.
//! - Stationarity means `α + β < 1`. [`validate_stationarity`] is applied
//!   wherever a computation depends on it (θ mapping, simulation, optimizer
//!   start), never to fitted output.
//! - θ has layout `(μ, θ_ω, θ_α, θ_β)` with finite entries.
//!
//! Conventions
//! -----------
//! - Indices are 0-based.
//! - Helpers return [`GarchResult`] or [`ParamResult`] and never panic.
use crate::volatility::errors::{GarchError, GarchResult, ParamError, ParamResult};
use chrono::NaiveDateTime;
use ndarray::ArrayView1;

/// Number of free GARCH(1,1) parameters `(μ, ω, α, β)`.
pub const N_PARAMS: usize = 4;

/// Every price finite and > 0.
pub fn validate_prices(prices: &[f64]) -> GarchResult<()> {
    match prices.iter().enumerate().find(|(_, p)| !(p.is_finite() && **p > 0.0)) {
        Some((index, &value)) => Err(GarchError::InvalidPrice { index, value }),
        None => Ok(()),
    }
}

/// Timestamps strictly increasing; reports the first offending index.
pub fn validate_timestamps(timestamps: &[NaiveDateTime]) -> GarchResult<()> {
    match timestamps.windows(2).position(|w| w[1] <= w[0]) {
        Some(pos) => Err(GarchError::NonIncreasingTimestamp { index: pos + 1 }),
        None => Ok(()),
    }
}

/// Every return finite.
pub fn validate_returns(returns: ArrayView1<f64>) -> GarchResult<()> {
    match returns.iter().enumerate().find(|(_, r)| !r.is_finite()) {
        Some((index, &value)) => Err(GarchError::NonFiniteReturn { index, value }),
        None => Ok(()),
    }
}

pub fn validate_mu(mu: f64) -> ParamResult<()> {
    if !mu.is_finite() {
        return Err(ParamError::InvalidMu { value: mu });
    }
    Ok(())
}

pub fn validate_omega(omega: f64) -> ParamResult<()> {
    if omega <= 0.0 || !omega.is_finite() {
        return Err(ParamError::InvalidOmega { value: omega });
    }
    Ok(())
}

pub fn validate_alpha(alpha: f64) -> ParamResult<()> {
    if alpha < 0.0 || !alpha.is_finite() {
        return Err(ParamError::InvalidAlpha { value: alpha });
    }
    Ok(())
}

pub fn validate_beta(beta: f64) -> ParamResult<()> {
    if beta < 0.0 || !beta.is_finite() {
        return Err(ParamError::InvalidBeta { value: beta });
    }
    Ok(())
}

/// `α + β < 1`.
pub fn validate_stationarity(alpha: f64, beta: f64) -> ParamResult<()> {
    let persistence = alpha + beta;
    if persistence >= 1.0 {
        return Err(ParamError::StationarityViolated { persistence });
    }
    Ok(())
}

/// θ has four finite entries.
pub fn validate_theta(theta: ArrayView1<f64>) -> ParamResult<()> {
    if theta.len() != N_PARAMS {
        return Err(ParamError::ThetaLengthMismatch { expected: N_PARAMS, actual: theta.len() });
    }
    match theta.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        Some((index, &value)) => Err(ParamError::InvalidThetaInput { index, value }),
        None => Ok(()),
    }
}

/// Student-t degrees of freedom: finite and > 2 so the variance exists.
pub fn validate_nu(nu: f64) -> GarchResult<f64> {
    if !nu.is_finite() || nu <= 2.0 {
        return Err(GarchError::InvalidDegreesOfFreedom { nu });
    }
    Ok(nu)
}

/// Fixed variance seed: finite and > 0.
pub fn validate_init_variance(value: f64) -> GarchResult<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(GarchError::InvalidInitVariance { value });
    }
    Ok(value)
}

/// Backcast decay in the open interval (0, 1).
pub fn validate_decay(decay: f64) -> GarchResult<f64> {
    if !(decay > 0.0 && decay < 1.0) {
        return Err(GarchError::InvalidBackcastDecay { decay });
    }
    Ok(decay)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Price, timestamp, and return validation with first-offender reporting.
    // - Parameter-domain checks, including the stationarity boundary.
    // - θ length and finiteness checks.
    // - Option validators (ν, fixed seed, backcast decay).
    // -------------------------------------------------------------------------

    fn day(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, d).and_then(|x| x.and_hms_opt(0, 0, 0)).expect("date")
    }

    #[test]
    // Purpose
    // -------
    // Check that invalid prices are reported at the first offending index.
    //
    // Given
    // -----
    // - Prices with a zero at index 2 and a NaN at index 3.
    //
    // Expect
    // ------
    // - `InvalidPrice { index: 2, value: 0.0 }`.
    fn validate_prices_reports_first_non_positive_price() {
        let err = validate_prices(&[100.0, 101.0, 0.0, f64::NAN]).expect_err("invalid");
        assert_eq!(err, GarchError::InvalidPrice { index: 2, value: 0.0 });
        assert!(validate_prices(&[1.0, 2.0]).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Ensure repeated or decreasing timestamps are rejected.
    //
    // Given
    // -----
    // - Days (1, 2, 2) and (1, 3, 2).
    //
    // Expect
    // ------
    // - `NonIncreasingTimestamp { index: 2 }` in both cases.
    fn validate_timestamps_requires_strict_increase() {
        assert_eq!(
            validate_timestamps(&[day(1), day(2), day(2)]),
            Err(GarchError::NonIncreasingTimestamp { index: 2 })
        );
        assert_eq!(
            validate_timestamps(&[day(1), day(3), day(2)]),
            Err(GarchError::NonIncreasingTimestamp { index: 2 })
        );
        assert!(validate_timestamps(&[day(1), day(2)]).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Verify parameter-domain checks at their boundaries.
    //
    // Given
    // -----
    // - ω = 0, α = -1e-12, β = ∞, μ = NaN, and α + β = 1.
    //
    // Expect
    // ------
    // - The matching `ParamError` for each; α = β = 0 is accepted.
    fn parameter_checks_enforce_domains() {
        assert!(matches!(validate_omega(0.0), Err(ParamError::InvalidOmega { .. })));
        assert!(matches!(validate_alpha(-1e-12), Err(ParamError::InvalidAlpha { .. })));
        assert!(matches!(validate_beta(f64::INFINITY), Err(ParamError::InvalidBeta { .. })));
        assert!(matches!(validate_mu(f64::NAN), Err(ParamError::InvalidMu { .. })));
        assert!(validate_alpha(0.0).is_ok() && validate_beta(0.0).is_ok());
        assert_eq!(
            validate_stationarity(0.1, 0.9),
            Err(ParamError::StationarityViolated { persistence: 1.0 })
        );
        assert!(validate_stationarity(0.08, 0.9).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Check θ validation for length and finiteness.
    //
    // Given
    // -----
    // - θ of length 3, and θ of length 4 with NaN at index 1.
    //
    // Expect
    // ------
    // - `ThetaLengthMismatch { expected: 4, actual: 3 }` and
    //   `InvalidThetaInput { index: 1 }`.
    fn validate_theta_checks_length_and_entries() {
        assert_eq!(
            validate_theta(array![0.0, 0.0, 0.0].view()),
            Err(ParamError::ThetaLengthMismatch { expected: 4, actual: 3 })
        );
        assert!(matches!(
            validate_theta(array![0.0, f64::NAN, 0.0, 0.0].view()),
            Err(ParamError::InvalidThetaInput { index: 1, .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Verify option validators.
    //
    // Given
    // -----
    // - ν ∈ {2, 5}, seeds {0, 1.5}, decays {1, 0.94}.
    //
    // Expect
    // ------
    // - Boundary values rejected, interior values returned unchanged.
    fn option_validators_reject_boundaries() {
        assert!(matches!(validate_nu(2.0), Err(GarchError::InvalidDegreesOfFreedom { .. })));
        assert_eq!(validate_nu(5.0), Ok(5.0));
        assert!(matches!(validate_init_variance(0.0), Err(GarchError::InvalidInitVariance { .. })));
        assert_eq!(validate_init_variance(1.5), Ok(1.5));
        assert!(matches!(validate_decay(1.0), Err(GarchError::InvalidBackcastDecay { .. })));
        assert_eq!(validate_decay(0.94), Ok(0.94));
    }
}
