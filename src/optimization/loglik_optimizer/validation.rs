//! Consistency checks shared by the optimizer layer.
//!
//! - Tolerances: [`verify_tol_grad`], [`verify_tol_cost`].
//! - Derivatives: [`validate_grad`], [`validate_hessian`].
//! - Outcomes: [`validate_theta_hat`], [`validate_value`].
//!
//! Each helper reports the first offending entry as a typed [`OptError`].
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{Grad, Theta, types::Hessian},
};

/// `None` disables the gradient-norm stopping rule; `Some` must be finite and
/// strictly positive.
pub fn verify_tol_grad(tol: Option<f64>) -> OptResult<()> {
    match tol {
        Some(tol) if !tol.is_finite() => {
            Err(OptError::InvalidTolGrad { tol, reason: "Tolerance must be finite." })
        }
        Some(tol) if tol <= 0.0 => {
            Err(OptError::InvalidTolGrad { tol, reason: "Tolerance must be positive." })
        }
        _ => Ok(()),
    }
}

/// `None` disables the cost-change stopping rule; `Some` must be finite and
/// strictly positive.
pub fn verify_tol_cost(tol: Option<f64>) -> OptResult<()> {
    match tol {
        Some(tol) if !tol.is_finite() => {
            Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be finite." })
        }
        Some(tol) if tol <= 0.0 => {
            Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be positive." })
        }
        _ => Ok(()),
    }
}

/// Gradient must have length `dim` and only finite entries.
pub fn validate_grad(grad: &Grad, dim: usize) -> OptResult<()> {
    if grad.len() != dim {
        return Err(OptError::GradientDimMismatch { expected: dim, found: grad.len() });
    }
    match grad.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        Some((index, &value)) => Err(OptError::InvalidGradient {
            index,
            value,
            reason: "Gradient elements must be finite.",
        }),
        None => Ok(()),
    }
}

/// Unwrap a solver's best parameter, rejecting missing or non-finite vectors.
pub fn validate_theta_hat(theta_hat: Option<Theta>) -> OptResult<Theta> {
    let theta = theta_hat.ok_or(OptError::MissingThetaHat)?;
    if let Some((index, &value)) = theta.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(OptError::InvalidThetaHat {
            index,
            value,
            reason: "Parameter estimates must be finite.",
        });
    }
    Ok(theta)
}

/// Log-likelihood values may be negative but never NaN or infinite.
pub fn validate_value(value: f64) -> OptResult<()> {
    if !value.is_finite() {
        return Err(OptError::NonFiniteCost { value });
    }
    Ok(())
}

/// Hessian must be `dim × dim` with only finite entries.
pub fn validate_hessian(hessian: &Hessian, dim: usize) -> OptResult<()> {
    if hessian.nrows() != dim || hessian.ncols() != dim {
        return Err(OptError::HessianDimMismatch {
            expected: dim,
            found: (hessian.nrows(), hessian.ncols()),
        });
    }
    match hessian.indexed_iter().find(|(_, v)| !v.is_finite()) {
        Some(((row, col), &value)) => Err(OptError::InvalidHessian { row, col, value }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Acceptance and rejection paths for each validator.
    // - Reporting of the first offending index.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Check tolerance validators accept `None` and positive values and reject
    // zero, negative and non-finite inputs.
    //
    // Given
    // -----
    // - A mix of valid and invalid tolerances.
    //
    // Expect
    // ------
    // - `Ok` for valid inputs, the matching error variant otherwise.
    fn tolerance_validators_enforce_positive_finite() {
        assert!(verify_tol_grad(None).is_ok());
        assert!(verify_tol_grad(Some(1e-6)).is_ok());
        assert!(matches!(verify_tol_grad(Some(0.0)), Err(OptError::InvalidTolGrad { .. })));
        assert!(matches!(verify_tol_grad(Some(f64::NAN)), Err(OptError::InvalidTolGrad { .. })));
        assert!(verify_tol_cost(None).is_ok());
        assert!(matches!(verify_tol_cost(Some(-1.0)), Err(OptError::InvalidTolCost { .. })));
        assert!(matches!(
            verify_tol_cost(Some(f64::INFINITY)),
            Err(OptError::InvalidTolCost { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Ensure gradient validation reports dimension mismatches and the first
    // non-finite entry.
    //
    // Given
    // -----
    // - A length-3 gradient with NaN at index 1, checked against dim 3 and 4.
    //
    // Expect
    // ------
    // - `GradientDimMismatch` for dim 4; `InvalidGradient { index: 1 }` for dim 3.
    fn validate_grad_reports_dimension_and_first_bad_entry() {
        let grad = array![0.0, f64::NAN, f64::INFINITY];
        assert!(matches!(
            validate_grad(&grad, 4),
            Err(OptError::GradientDimMismatch { expected: 4, found: 3 })
        ));
        assert!(matches!(validate_grad(&grad, 3), Err(OptError::InvalidGradient { index: 1, .. })));
        assert!(validate_grad(&array![1.0, 2.0], 2).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Verify `validate_theta_hat` rejects missing and non-finite estimates.
    //
    // Given
    // -----
    // - `None`, a vector containing infinity, and a finite vector.
    //
    // Expect
    // ------
    // - `MissingThetaHat`, `InvalidThetaHat { index: 2 }`, then the vector back.
    fn validate_theta_hat_unwraps_only_finite_vectors() {
        assert!(matches!(validate_theta_hat(None), Err(OptError::MissingThetaHat)));
        assert!(matches!(
            validate_theta_hat(Some(array![0.0, 1.0, f64::INFINITY])),
            Err(OptError::InvalidThetaHat { index: 2, .. })
        ));
        let theta = validate_theta_hat(Some(array![0.5, -0.5])).expect("finite theta");
        assert_eq!(theta, array![0.5, -0.5]);
    }

    #[test]
    // Purpose
    // -------
    // Check Hessian validation for shape and finiteness.
    //
    // Given
    // -----
    // - A 2×3 matrix, a 2×2 matrix with NaN at (1, 0), and a finite 2×2.
    //
    // Expect
    // ------
    // - `HessianDimMismatch`, `InvalidHessian { row: 1, col: 0 }`, then `Ok`.
    fn validate_hessian_checks_shape_and_entries() {
        assert!(matches!(
            validate_hessian(&Array2::zeros((2, 3)), 2),
            Err(OptError::HessianDimMismatch { expected: 2, found: (2, 3) })
        ));
        let bad = array![[1.0, 0.0], [f64::NAN, 1.0]];
        assert!(matches!(
            validate_hessian(&bad, 2),
            Err(OptError::InvalidHessian { row: 1, col: 0, .. })
        ));
        assert!(validate_hessian(&Array2::eye(2), 2).is_ok());
        assert!(validate_value(-1234.5).is_ok());
        assert!(validate_value(f64::NEG_INFINITY).is_err());
    }
}
