//! Errors for GARCH(1,1) volatility modeling (input validation, likelihood
//! domain checks, optimizer failures, and forecasting).
//!
//! This module defines the model error type, [`GarchError`], and a parameter
//! error type, [`ParamError`]. Both implement `Display`/`Error`.
//!
//! ## Conventions
//! - **Indices are 0-based.** Price indices refer to the price series, return
//!   and variance indices to the return series.
//! - `DomainViolation` is raised by the likelihood evaluator; during a fit it
//!   is absorbed by the optimizer as a rejected candidate and never returned
//!   from `fit`.
//! - A fit that does not converge returns [`GarchError::ConvergenceFailure`]
//!   with the best parameters found; no partial fitted model is exposed.
use statrs::distribution::{NormalError, StudentsTError};

use crate::volatility::core::params::GarchParams;

/// Result alias for volatility operations that may produce [`GarchError`].
pub type GarchResult<T> = Result<T, GarchError>;

/// Result alias for parameter construction / mapping that may produce
/// [`ParamError`].
pub type ParamResult<T> = Result<T, ParamError>;

/// Unified error type for GARCH modeling.
#[derive(Debug, Clone, PartialEq)]
pub enum GarchError {
    // ---- Input/data validation ----
    /// Not enough observations for the requested operation.
    InsufficientData { needed: usize, found: usize },

    /// A price is non-positive or non-finite.
    InvalidPrice { index: usize, value: f64 },

    /// Timestamps and prices have different lengths.
    LengthMismatch { timestamps: usize, prices: usize },

    /// Timestamp at `index` is not strictly after its predecessor.
    NonIncreasingTimestamp { index: usize },

    /// A return is NaN/±inf.
    NonFiniteReturn { index: usize, value: f64 },

    // ---- Likelihood ----
    /// Conditional variance at `index` is non-positive or non-finite.
    DomainViolation { index: usize, variance: f64 },

    // ---- Estimation ----
    /// The optimizer stopped without convergence.
    ConvergenceFailure {
        best: GarchParams,
        loglik: f64,
        iterations: u64,
        status: String,
        grad_norm: Option<f64>,
    },

    /// Optimizer setup or backend failure that is not a convergence issue.
    Optimizer { text: String },

    // ---- Forecasting / simulation ----
    /// Forecast horizon must be at least 1.
    InvalidHorizon { horizon: usize },

    /// Simulation length must be at least 1.
    InvalidSimulationLength { n: usize },

    // ---- Options ----
    /// Student-t degrees of freedom must be finite and > 2.
    InvalidDegreesOfFreedom { nu: f64 },

    /// A fixed variance seed must be finite and > 0.
    InvalidInitVariance { value: f64 },

    /// Backcast decay must lie in (0, 1).
    InvalidBackcastDecay { decay: f64 },

    // ---- Parameters ----
    Param(ParamError),

    // ---- statrs distribution errors ----
    /// Wrapper for statrs `NormalError` / `StudentsTError` location errors.
    InvalidLocation,

    /// Wrapper for statrs scale / standard deviation errors.
    InvalidScale,

    /// Wrapper for statrs `StudentsTError::FreedomInvalid`.
    InvalidFreedom,

    // ---- Fallback ----
    UnknownError,
}

impl std::error::Error for GarchError {}

impl std::fmt::Display for GarchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Input/data validation ----
            GarchError::InsufficientData { needed, found } => {
                write!(f, "Insufficient data: need at least {needed} observations, got {found}")
            }
            GarchError::InvalidPrice { index, value } => {
                write!(f, "Price at index {index} must be finite and > 0; got {value}")
            }
            GarchError::LengthMismatch { timestamps, prices } => {
                write!(f, "Length mismatch: {timestamps} timestamps for {prices} prices")
            }
            GarchError::NonIncreasingTimestamp { index } => {
                write!(f, "Timestamp at index {index} is not strictly increasing")
            }
            GarchError::NonFiniteReturn { index, value } => {
                write!(f, "Return at index {index} is non-finite: {value}")
            }
            // ---- Likelihood ----
            GarchError::DomainViolation { index, variance } => {
                write!(f, "Conditional variance at index {index} left the domain: {variance}")
            }
            // ---- Estimation ----
            GarchError::ConvergenceFailure { best, loglik, iterations, status, grad_norm } => {
                write!(
                    f,
                    "Optimizer did not converge after {iterations} iterations ({status}); \
                     best {best} with log-likelihood {loglik}"
                )?;
                if let Some(g) = grad_norm {
                    write!(f, ", gradient norm {g:.3e}")?;
                }
                Ok(())
            }
            GarchError::Optimizer { text } => {
                write!(f, "Optimizer error: {text}")
            }
            // ---- Forecasting / simulation ----
            GarchError::InvalidHorizon { horizon } => {
                write!(f, "Forecast horizon must be >= 1; got {horizon}")
            }
            GarchError::InvalidSimulationLength { n } => {
                write!(f, "Simulation length must be >= 1; got {n}")
            }
            // ---- Options ----
            GarchError::InvalidDegreesOfFreedom { nu } => {
                write!(f, "Student-t degrees of freedom must be finite and > 2; got {nu}")
            }
            GarchError::InvalidInitVariance { value } => {
                write!(f, "Fixed initial variance must be finite and > 0; got {value}")
            }
            GarchError::InvalidBackcastDecay { decay } => {
                write!(f, "Backcast decay must lie in (0, 1); got {decay}")
            }
            // ---- Parameters ----
            GarchError::Param(err) => write!(f, "{err}"),
            // ---- statrs distribution errors ----
            GarchError::InvalidLocation => {
                write!(f, "Distribution location must be finite.")
            }
            GarchError::InvalidScale => {
                write!(f, "Distribution scale must be finite and > 0.")
            }
            GarchError::InvalidFreedom => {
                write!(f, "Student-t degrees of freedom must be finite and > 0.")
            }
            GarchError::UnknownError => {
                write!(f, "An unknown error occurred in the distribution.")
            }
        }
    }
}

impl From<ParamError> for GarchError {
    fn from(err: ParamError) -> GarchError {
        GarchError::Param(err)
    }
}

impl From<NormalError> for GarchError {
    fn from(err: NormalError) -> GarchError {
        match err {
            NormalError::MeanInvalid => GarchError::InvalidLocation,
            NormalError::StandardDeviationInvalid => GarchError::InvalidScale,
            #[allow(unreachable_patterns)]
            _ => GarchError::UnknownError,
        }
    }
}

impl From<StudentsTError> for GarchError {
    fn from(err: StudentsTError) -> GarchError {
        match err {
            StudentsTError::LocationInvalid => GarchError::InvalidLocation,
            StudentsTError::ScaleInvalid => GarchError::InvalidScale,
            StudentsTError::FreedomInvalid => GarchError::InvalidFreedom,
            #[allow(unreachable_patterns)]
            _ => GarchError::UnknownError,
        }
    }
}

/// Errors specific to parameter construction and θ mapping.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamError {
    /// Model not stationary (alpha + beta >= 1).
    StationarityViolated { persistence: f64 },

    /// θ must have exactly four entries `(μ, θ_ω, θ_α, θ_β)`.
    ThetaLengthMismatch { expected: usize, actual: usize },

    /// Mu must be finite.
    InvalidMu { value: f64 },

    /// Omega must be finite and > 0.
    InvalidOmega { value: f64 },

    /// Alpha must be finite and >= 0.
    InvalidAlpha { value: f64 },

    /// Beta must be finite and >= 0.
    InvalidBeta { value: f64 },

    /// Unconstrained optimization input must have finite values.
    InvalidThetaInput { index: usize, value: f64 },
}

impl std::error::Error for ParamError {}

impl std::fmt::Display for ParamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamError::StationarityViolated { persistence } => {
                write!(
                    f,
                    "Model not stationary: alpha + beta is {persistence} (>= 1 is not allowed)"
                )
            }
            ParamError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Theta length mismatch: expected {expected}, got {actual}")
            }
            ParamError::InvalidMu { value } => {
                write!(f, "Mu must be finite, got {value}")
            }
            ParamError::InvalidOmega { value } => {
                write!(f, "Omega must be finite and > 0, got {value}")
            }
            ParamError::InvalidAlpha { value } => {
                write!(f, "Alpha must be non-negative and finite, got {value}")
            }
            ParamError::InvalidBeta { value } => {
                write!(f, "Beta must be non-negative and finite, got {value}")
            }
            ParamError::InvalidThetaInput { index, value } => {
                write!(f, "Theta input at index {index} must be finite, got {value}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Conversions from statrs and parameter errors into `GarchError`.
    // - Display output for the diagnostics-carrying variants.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify statrs construction errors map onto dedicated variants.
    //
    // Given
    // -----
    // - `NormalError::StandardDeviationInvalid` and
    //   `StudentsTError::FreedomInvalid`.
    //
    // Expect
    // ------
    // - `InvalidScale` and `InvalidFreedom` respectively.
    fn statrs_errors_map_to_dedicated_variants() {
        assert_eq!(
            GarchError::from(NormalError::StandardDeviationInvalid),
            GarchError::InvalidScale
        );
        assert_eq!(GarchError::from(StudentsTError::FreedomInvalid), GarchError::InvalidFreedom);
    }

    #[test]
    // Purpose
    // -------
    // Ensure `ConvergenceFailure` renders its diagnostics.
    //
    // Given
    // -----
    // - A failure after 200 iterations with gradient norm 0.01.
    //
    // Expect
    // ------
    // - The message names the iteration count, the status, and the gradient
    //   norm.
    fn convergence_failure_display_includes_diagnostics() {
        // Arrange
        let best = GarchParams::new(0.0, 0.05, 0.08, 0.9).expect("valid params");
        let err = GarchError::ConvergenceFailure {
            best,
            loglik: -1234.5,
            iterations: 200,
            status: "Maximum number of iterations reached".to_string(),
            grad_norm: Some(0.01),
        };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains("200 iterations"));
        assert!(msg.contains("Maximum number of iterations reached"));
        assert!(msg.contains("1.000e-2"));
    }

    #[test]
    // Purpose
    // -------
    // Check that parameter errors wrap transparently.
    //
    // Given
    // -----
    // - `ParamError::InvalidOmega { value: -1.0 }`.
    //
    // Expect
    // ------
    // - `GarchError::Param(..)` whose message equals the inner message.
    fn param_errors_wrap_transparently() {
        let inner = ParamError::InvalidOmega { value: -1.0 };
        let err: GarchError = inner.clone().into();
        assert_eq!(err, GarchError::Param(inner.clone()));
        assert_eq!(err.to_string(), inner.to_string());
    }
}
