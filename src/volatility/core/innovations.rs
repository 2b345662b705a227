//! Innovation distributions for GARCH(1,1) models.
//!
//! This module defines [`GarchInnovation`], the law of the standardized
//! innovation `z_t = e_t / σ_t` with `e_t = r_t − μ`. Every variant has zero
//! mean and **unit variance**, so `σ²_t` is the conditional variance of the
//! return itself.
//!
//! ## Supported distributions
//! - [`GarchInnovation::Normal`]: standard normal (default).
//! - [`GarchInnovation::StudentT`]: Student-t with `ν > 2` degrees of freedom,
//!   rescaled by `sqrt((ν − 2) / ν)` to unit variance. `ν` is fixed by the
//!   caller and is not estimated.
//!
//! ## Numerics
//! - Log densities delegate to `statrs` (`Normal`, `StudentsT`) evaluated at
//!   the residual with the matching scale, so the Jacobian term `−½ ln σ²`
//!   is included by the distribution itself.
//! - [`GarchInnovation::loglik_grads`] returns closed-form partials used by
//!   the analytic score recursion.
use crate::volatility::{core::validation::validate_nu, errors::GarchResult};
use statrs::distribution::{Continuous, Normal, StudentsT};

/// Standardized innovation law for GARCH models.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GarchInnovation {
    /// N(0, 1) innovations.
    #[default]
    Normal,
    /// Unit-variance Student-t innovations with ν > 2 degrees of freedom.
    StudentT { nu: f64 },
}

impl GarchInnovation {
    pub const fn normal() -> Self {
        GarchInnovation::Normal
    }

    /// Student-t innovations with fixed degrees of freedom.
    ///
    /// # Errors
    /// [`GarchError::InvalidDegreesOfFreedom`](crate::volatility::errors::GarchError::InvalidDegreesOfFreedom)
    /// unless `nu` is finite and > 2.
    pub fn student_t(nu: f64) -> GarchResult<Self> {
        Ok(GarchInnovation::StudentT { nu: validate_nu(nu)? })
    }

    /// Log density of the residual `e` given conditional variance `variance`.
    ///
    /// - `Normal`: `−½ (ln 2π + ln σ² + e² / σ²)`.
    /// - `StudentT { nu }`: Student-t with location 0 and scale
    ///   `sqrt(σ² (ν − 2) / ν)`.
    ///
    /// # Errors
    /// Surfaces statrs constructor errors; callers guarantee `variance > 0`.
    pub fn log_density(&self, e: f64, variance: f64) -> GarchResult<f64> {
        match self {
            GarchInnovation::Normal => Ok(Normal::new(0.0, variance.sqrt())?.ln_pdf(e)),
            GarchInnovation::StudentT { nu } => {
                let scale = (variance * (nu - 2.0) / nu).sqrt();
                Ok(StudentsT::new(0.0, scale, *nu)?.ln_pdf(e))
            }
        }
    }

    /// Partials of the per-observation log density `ℓ_t(e, σ²)`.
    ///
    /// Returns `(∂ℓ_t/∂e, ∂ℓ_t/∂σ²)`:
    /// - Normal: `(−e/σ², ½ (e²/σ² − 1) / σ²)`.
    /// - Student-t: with `d = (ν − 2)σ² + e²`,
    ///   `(−(ν + 1) e / d, −½/σ² + ½ (ν + 1) e² / (σ² d))`.
    pub fn loglik_grads(&self, e: f64, variance: f64) -> (f64, f64) {
        match self {
            GarchInnovation::Normal => {
                let d_e = -e / variance;
                let d_var = 0.5 * (e * e / variance - 1.0) / variance;
                (d_e, d_var)
            }
            GarchInnovation::StudentT { nu } => {
                let denom = (nu - 2.0) * variance + e * e;
                let d_e = -(nu + 1.0) * e / denom;
                let d_var = -0.5 / variance + 0.5 * (nu + 1.0) * e * e / (variance * denom);
                (d_e, d_var)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::volatility::errors::GarchError;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Constructor validation for Student-t degrees of freedom.
    // - Agreement of the Normal log density with the closed form.
    // - Analytic partials against central finite differences for both laws.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Ensure Student-t requires ν > 2.
    //
    // Given
    // -----
    // - ν = 2 and ν = 6.
    //
    // Expect
    // ------
    // - `InvalidDegreesOfFreedom` for 2, a `StudentT { nu: 6 }` for 6.
    fn student_t_requires_finite_variance() {
        assert_eq!(
            GarchInnovation::student_t(2.0),
            Err(GarchError::InvalidDegreesOfFreedom { nu: 2.0 })
        );
        assert_eq!(GarchInnovation::student_t(6.0), Ok(GarchInnovation::StudentT { nu: 6.0 }));
    }

    #[test]
    // Purpose
    // -------
    // Verify the Normal log density matches `−½(ln 2π + ln σ² + e²/σ²)`.
    //
    // Given
    // -----
    // - e = 0.7, σ² = 1.9.
    //
    // Expect
    // ------
    // - Agreement to 1e-12.
    fn normal_log_density_matches_closed_form() {
        let (e, v) = (0.7_f64, 1.9_f64);
        let expected = -0.5 * ((2.0 * PI).ln() + v.ln() + e * e / v);
        let got = GarchInnovation::Normal.log_density(e, v).expect("density");
        assert_relative_eq!(got, expected, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Validate analytic partials against central finite differences.
    //
    // Given
    // -----
    // - Normal and Student-t(5) at (e, σ²) = (-1.3, 0.8).
    //
    // Expect
    // ------
    // - Both partials agree with FD to 1e-6.
    fn loglik_grads_match_finite_differences() {
        let (e, v, h) = (-1.3_f64, 0.8_f64, 1e-6_f64);
        for innovation in [GarchInnovation::Normal, GarchInnovation::StudentT { nu: 5.0 }] {
            // Arrange
            let ll = |e: f64, v: f64| innovation.log_density(e, v).expect("density");

            // Act
            let (d_e, d_var) = innovation.loglik_grads(e, v);
            let fd_e = (ll(e + h, v) - ll(e - h, v)) / (2.0 * h);
            let fd_var = (ll(e, v + h) - ll(e, v - h)) / (2.0 * h);

            // Assert
            assert_relative_eq!(d_e, fd_e, epsilon = 1e-6);
            assert_relative_eq!(d_var, fd_var, epsilon = 1e-6);
        }
    }
}
