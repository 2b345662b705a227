//! Fitted GARCH(1,1) model: read-only estimation results.
//!
//! Purpose
//! -------
//! Hold everything derived from a converged fit, computed once at
//! construction: parameters, optional standard errors, information criteria,
//! the in-sample variance path, standardized residuals, and optimizer
//! diagnostics. Forecasting starts from the last in-sample state.
//!
//! Key behaviors
//! -------------
//! - `AIC = −2ℓ + 2k`, `BIC = −2ℓ + k ln n` with `k = 4`.
//! - z-statistics `θ̂ / se` and two-sided p-values `2 (1 − Φ(|z|))` when
//!   standard errors exist.
//! - `Display` renders a parameter table plus fit statistics.
//!
//! Invariants & assumptions
//! ------------------------
//! - A `GarchFit` only exists for a converged optimization.
//! - `variance`, `volatility`, and `std_resid` all have length `nobs`.
use crate::volatility::{
    core::{
        forecasts::{ForecastPath, forecast_recursion},
        innovations::GarchInnovation,
        options::CovarianceKind,
        params::{GarchParams, StandardErrors},
        validation::N_PARAMS,
    },
    errors::GarchResult,
};
use ndarray::{Array1, Array2};
use statrs::distribution::{ContinuousCDF, Normal};

/// Optimizer diagnostics retained from a converged fit.
#[derive(Debug, Clone, PartialEq)]
pub struct FitDiagnostics {
    pub iterations: usize,
    pub status: String,
    pub grad_norm: Option<f64>,
}

/// Read-only result of a converged GARCH(1,1) fit.
#[derive(Debug, Clone, PartialEq)]
pub struct GarchFit {
    params: GarchParams,
    innovation: GarchInnovation,
    std_errors: Option<StandardErrors>,
    covariance: Option<Array2<f64>>,
    covariance_kind: CovarianceKind,
    loglik: f64,
    aic: f64,
    bic: f64,
    nobs: usize,
    last_return: f64,
    variance: Array1<f64>,
    volatility: Array1<f64>,
    std_resid: Array1<f64>,
    diagnostics: FitDiagnostics,
}

/// Intermediate bundle handed from the estimator to [`GarchFit::new`].
#[derive(Debug, Clone)]
pub(crate) struct FitParts {
    pub params: GarchParams,
    pub innovation: GarchInnovation,
    pub covariance: Option<Array2<f64>>,
    pub covariance_kind: CovarianceKind,
    pub loglik: f64,
    pub returns: Array1<f64>,
    pub variance: Array1<f64>,
    pub diagnostics: FitDiagnostics,
}

impl GarchFit {
    pub(crate) fn new(parts: FitParts) -> Self {
        let FitParts {
            params,
            innovation,
            covariance,
            covariance_kind,
            loglik,
            returns,
            variance,
            diagnostics,
        } = parts;
        let nobs = returns.len();
        let k = N_PARAMS as f64;
        let aic = -2.0 * loglik + 2.0 * k;
        let bic = -2.0 * loglik + k * (nobs as f64).ln();
        let volatility = variance.mapv(f64::sqrt);
        let std_resid = (&returns - params.mu) / &volatility;
        let std_errors = covariance.as_ref().and_then(|c| {
            let se = c.diag().mapv(|v| v.max(0.0).sqrt());
            StandardErrors::from_array(se.view())
        });
        let last_return = returns.last().copied().unwrap_or(params.mu);
        GarchFit {
            params,
            innovation,
            std_errors,
            covariance,
            covariance_kind,
            loglik,
            aic,
            bic,
            nobs,
            last_return,
            variance,
            volatility,
            std_resid,
            diagnostics,
        }
    }

    pub fn params(&self) -> &GarchParams {
        &self.params
    }

    pub fn innovation(&self) -> &GarchInnovation {
        &self.innovation
    }

    /// Standard errors in model space, `None` when the observed information
    /// was not positive definite.
    pub fn std_errors(&self) -> Option<&StandardErrors> {
        self.std_errors.as_ref()
    }

    /// Parameter covariance matrix ordered `(μ, ω, α, β)`.
    pub fn covariance(&self) -> Option<&Array2<f64>> {
        self.covariance.as_ref()
    }

    pub fn covariance_kind(&self) -> CovarianceKind {
        self.covariance_kind
    }

    pub fn loglik(&self) -> f64 {
        self.loglik
    }

    pub fn aic(&self) -> f64 {
        self.aic
    }

    pub fn bic(&self) -> f64 {
        self.bic
    }

    pub fn nobs(&self) -> usize {
        self.nobs
    }

    /// Conditional variance path `σ²_t`.
    pub fn variance(&self) -> &Array1<f64> {
        &self.variance
    }

    /// Conditional volatility path `σ_t`.
    pub fn volatility(&self) -> &Array1<f64> {
        &self.volatility
    }

    /// Standardized residuals `(r_t − μ) / σ_t`.
    pub fn std_resid(&self) -> &Array1<f64> {
        &self.std_resid
    }

    pub fn persistence(&self) -> f64 {
        self.params.persistence()
    }

    pub fn is_stationary(&self) -> bool {
        self.params.is_stationary()
    }

    pub fn diagnostics(&self) -> &FitDiagnostics {
        &self.diagnostics
    }

    /// z-statistics `θ̂_i / se_i` ordered `(μ, ω, α, β)`.
    pub fn z_values(&self) -> Option<Array1<f64>> {
        let se = self.std_errors?.to_array();
        Some(self.params.to_array() / se)
    }

    /// Two-sided p-values `2 (1 − Φ(|z|))` under the standard normal.
    pub fn p_values(&self) -> Option<Array1<f64>> {
        let z = self.z_values()?;
        let std_normal = Normal::new(0.0, 1.0).ok()?;
        Some(z.mapv(|v| 2.0 * (1.0 - std_normal.cdf(v.abs()))))
    }

    /// Variance forecasts for steps `1..=horizon` from the last in-sample
    /// return and conditional variance.
    ///
    /// # Errors
    /// `InvalidHorizon` when `horizon == 0`.
    pub fn forecast(&self, horizon: usize) -> GarchResult<ForecastPath> {
        let last_variance = self.variance.last().copied().unwrap_or(self.params.omega);
        forecast_recursion(&self.params, self.last_return, last_variance, horizon)
    }
}

impl std::fmt::Display for GarchFit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let innovation = match self.innovation {
            GarchInnovation::Normal => "Normal".to_string(),
            GarchInnovation::StudentT { nu } => format!("Student-t(nu={nu})"),
        };
        let rule = "-".repeat(62);
        writeln!(f, "GARCH(1,1) | {innovation} innovations | {} observations", self.nobs)?;
        writeln!(
            f,
            "Converged after {} iterations ({})",
            self.diagnostics.iterations, self.diagnostics.status
        )?;
        writeln!(f, "{rule}")?;
        writeln!(
            f,
            "{:<8}{:>14}{:>14}{:>12}{:>12}",
            "param", "coef", "std err", "z", "P>|z|"
        )?;
        let names = ["mu", "omega", "alpha", "beta"];
        let coefs = self.params.to_array();
        let se = self.std_errors.map(|s| s.to_array());
        let z = self.z_values();
        let p = self.p_values();
        for (i, name) in names.iter().enumerate() {
            write!(f, "{name:<8}{:>14.6}", coefs[i])?;
            match (&se, &z, &p) {
                (Some(se), Some(z), Some(p)) => {
                    writeln!(f, "{:>14.6}{:>12.3}{:>12.4}", se[i], z[i], p[i])?
                }
                _ => writeln!(f, "{:>14}{:>12}{:>12}", "n/a", "n/a", "n/a")?,
            }
        }
        writeln!(f, "{rule}")?;
        writeln!(
            f,
            "Log-likelihood: {:.4}   AIC: {:.4}   BIC: {:.4}",
            self.loglik, self.aic, self.bic
        )?;
        write!(f, "Persistence (alpha + beta): {:.6}", self.persistence())?;
        if !self.is_stationary() {
            write!(f, "  [non-stationary]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::volatility::errors::GarchError;
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Derived statistics (AIC, BIC, standardized residuals, z/p-values).
    // - The forecast entry point, including the horizon-1 closed form.
    // - The Display summary with and without standard errors.
    // -------------------------------------------------------------------------

    fn parts(covariance: Option<Array2<f64>>) -> FitParts {
        FitParts {
            params: GarchParams::new(0.0, 0.05, 0.08, 0.90).expect("valid"),
            innovation: GarchInnovation::Normal,
            covariance,
            covariance_kind: CovarianceKind::Classical,
            loglik: -100.0,
            returns: array![0.5, -1.0, 1.5],
            variance: array![1.0, 4.0, 1.0],
            diagnostics: FitDiagnostics {
                iterations: 12,
                status: "SolverConverged".to_string(),
                grad_norm: Some(1e-7),
            },
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify information criteria and standardized residuals.
    //
    // Given
    // -----
    // - ℓ = −100, n = 3, returns (0.5, −1, 1.5), variances (1, 4, 1), μ = 0.
    //
    // Expect
    // ------
    // - AIC = 208, BIC = 200 + 4 ln 3, residuals (0.5, −0.5, 1.5).
    fn derived_statistics_match_closed_forms() {
        let fit = GarchFit::new(parts(None));
        assert_relative_eq!(fit.aic(), 208.0, epsilon = 1e-12);
        assert_relative_eq!(fit.bic(), 200.0 + 4.0 * 3.0_f64.ln(), epsilon = 1e-12);
        assert_eq!(fit.std_resid(), &array![0.5, -0.5, 1.5]);
        assert_eq!(fit.volatility(), &array![1.0, 2.0, 1.0]);
        assert!(fit.std_errors().is_none());
        assert!(fit.z_values().is_none());
        assert!(fit.is_stationary());
    }

    #[test]
    // Purpose
    // -------
    // Check the horizon-1 forecast on the reference example.
    //
    // Given
    // -----
    // - (μ, ω, α, β) = (0, 0.05, 0.08, 0.90), last return 1.5, last variance 1.
    //
    // Expect
    // ------
    // - σ̂² = 0.05 + 0.08·2.25 + 0.90 = 1.13, volatility ≈ 1.063; h = 0 errors.
    fn forecast_starts_from_last_in_sample_state() {
        let fit = GarchFit::new(parts(None));
        let path = fit.forecast(1).expect("forecast");
        assert_relative_eq!(path.variances()[0], 1.13, epsilon = 1e-12);
        assert_relative_eq!(path.volatilities()[0], 1.063, epsilon = 1e-3);
        assert_eq!(fit.forecast(0), Err(GarchError::InvalidHorizon { horizon: 0 }));
    }

    #[test]
    // Purpose
    // -------
    // Verify z- and p-values computed from a diagonal covariance.
    //
    // Given
    // -----
    // - Covariance diag(1, 0.0025, 0.0016, 0.0081) so se = (1, 0.05, 0.04, 0.09).
    //
    // Expect
    // ------
    // - z = (0, 1, 2, 10); p(0) = 1, p(1) ≈ 0.3173, p(2) ≈ 0.0455.
    fn z_and_p_values_follow_standard_errors() {
        // Arrange
        let cov = Array2::from_diag(&array![1.0, 0.0025, 0.0016, 0.0081]);

        // Act
        let fit = GarchFit::new(parts(Some(cov)));
        let z = fit.z_values().expect("std errors");
        let p = fit.p_values().expect("std errors");

        // Assert
        assert_relative_eq!(z[1], 1.0, epsilon = 1e-12);
        assert_relative_eq!(z[2], 2.0, epsilon = 1e-12);
        assert_relative_eq!(z[3], 10.0, epsilon = 1e-12);
        assert_relative_eq!(p[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(p[1], 0.317_310_507_862_914, epsilon = 1e-9);
        assert_relative_eq!(p[2], 0.045_500_263_896_358, epsilon = 1e-9);
    }

    #[test]
    // Purpose
    // -------
    // Ensure the summary renders parameters and fit statistics.
    //
    // Given
    // -----
    // - Fits with and without standard errors.
    //
    // Expect
    // ------
    // - Both list every parameter and the log-likelihood; the one without
    //   standard errors prints "n/a".
    fn display_renders_summary_table() {
        let without = GarchFit::new(parts(None)).to_string();
        let with = GarchFit::new(parts(Some(Array2::eye(4)))).to_string();
        for text in [&without, &with] {
            for name in ["mu", "omega", "alpha", "beta", "Log-likelihood", "AIC", "BIC"] {
                assert!(text.contains(name), "missing {name} in:\n{text}");
            }
        }
        assert!(without.contains("n/a"));
        assert!(!with.contains("n/a"));
    }
}
