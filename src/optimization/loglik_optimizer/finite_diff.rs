//! Finite-difference gradients and Hessians on top of `finitediff`.
//!
//! - [`run_fd_diff`]: forward-difference gradient whose objective closure
//!   parks its first error in a shared cell and returns `NaN`.
//! - [`compute_hessian`]: central-difference Hessian of a gradient function,
//!   falling back to forward differences when the central one fails
//!   validation, then symmetrized.
//!
//! Derivatives are taken with respect to whatever vector the caller passes;
//! the GARCH standard errors differentiate in model space `(μ, ω, α, β)`, the
//! optimizer fallback differentiates in `θ`-space.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        Grad, Theta,
        types::Hessian,
        validation::{validate_grad, validate_hessian},
    },
};
use argmin::core::Error;
use finitediff::FiniteDiff;
use std::cell::RefCell;

/// Forward-difference gradient of `func` at `theta`.
///
/// `closure_err` is cleared on entry. If `func` stored an error while being
/// differenced, that error is returned instead of the gradient.
///
/// # Errors
/// - The captured closure error, converted into [`OptError`](crate::optimization::errors::OptError).
/// - `GradientDimMismatch` / `InvalidGradient` from [`validate_grad`].
pub fn run_fd_diff<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<Error>>,
) -> OptResult<Grad> {
    closure_err.replace(None);
    let fd_grad = theta.forward_diff(func);
    if let Some(err) = closure_err.take() {
        return Err(err.into());
    }
    validate_grad(&fd_grad, theta.len())?;
    Ok(fd_grad)
}

/// Finite-difference Hessian of the gradient function `f` at `theta`.
///
/// # Errors
/// `HessianDimMismatch` / `InvalidHessian` when the forward-difference
/// fallback also fails validation. The central-difference failure itself is
/// not reported.
pub fn compute_hessian<F: Fn(&Theta) -> Grad>(f: &F, theta: &Theta) -> OptResult<Hessian> {
    let dim = theta.len();
    let mut hessian = theta.central_hessian(f);
    if validate_hessian(&hessian, dim).is_err() {
        hessian = theta.forward_hessian(f);
        validate_hessian(&hessian, dim)?;
    }
    symmetrize_hess(&mut hessian);
    Ok(hessian)
}

// ---- Helper methods ----

/// Average each off-diagonal pair in place; the diagonal is untouched.
fn symmetrize_hess(hess: &mut Hessian) {
    for i in 0..hess.nrows() {
        for j in 0..i {
            let avg = 0.5 * (hess[[i, j]] + hess[[j, i]]);
            hess[[i, j]] = avg;
            hess[[j, i]] = avg;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::OptError;
    use approx::assert_relative_eq;
    use argmin::core::ArgminError;
    use ndarray::{Array1, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Forward-difference gradients with and without captured closure errors.
    // - Hessians of smooth gradients, including off-diagonal curvature.
    // - The error path when both Hessian schemes yield non-finite entries.
    // - In-place symmetrization.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify the forward-difference gradient of a quadratic.
    //
    // Given
    // -----
    // - f(θ) = θ·θ at θ = (0, 1).
    //
    // Expect
    // ------
    // - grad ≈ (0, 2) within 1e-6.
    fn run_fd_diff_matches_quadratic_gradient() {
        // Arrange
        let theta: Theta = array![0.0, 1.0];
        let closure_err: RefCell<Option<Error>> = RefCell::new(None);
        let f = |x: &Theta| x.dot(x);

        // Act
        let grad = run_fd_diff(&theta, &f, &closure_err).expect("gradient");

        // Assert
        assert_relative_eq!(grad[0], 0.0, epsilon = 1e-6);
        assert_relative_eq!(grad[1], 2.0, epsilon = 1e-6);
    }

    #[test]
    // Purpose
    // -------
    // Ensure an error parked by the closure wins over the NaN gradient.
    //
    // Given
    // -----
    // - A closure that stores `ArgminError::NotImplemented` and returns NaN.
    //
    // Expect
    // ------
    // - `run_fd_diff` returns the converted `OptError::NotImplemented`.
    fn run_fd_diff_propagates_captured_closure_error() {
        // Arrange
        let theta: Theta = array![1.0];
        let closure_err: RefCell<Option<Error>> = RefCell::new(None);
        let f = |_: &Theta| {
            closure_err.replace(Some(ArgminError::NotImplemented { text: "fd".into() }.into()));
            f64::NAN
        };

        // Act
        let err = run_fd_diff(&theta, &f, &closure_err).expect_err("closure error");

        // Assert
        assert!(matches!(err, OptError::NotImplemented { .. }), "got {err:?}");
    }

    #[test]
    // Purpose
    // -------
    // Check `compute_hessian` recovers a coupled quadratic's curvature.
    //
    // Given
    // -----
    // - f(x, y) = x² + 3xy + 2y², so ∇f = (2x + 3y, 3x + 4y).
    //
    // Expect
    // ------
    // - H ≈ [[2, 3], [3, 4]] and exactly symmetric.
    fn compute_hessian_recovers_coupled_quadratic() {
        // Arrange
        let grad_fn = |t: &Theta| array![2.0 * t[0] + 3.0 * t[1], 3.0 * t[0] + 4.0 * t[1]];
        let theta: Theta = array![0.4, -1.2];

        // Act
        let hess = compute_hessian(&grad_fn, &theta).expect("hessian");

        // Assert
        assert_relative_eq!(hess[[0, 0]], 2.0, epsilon = 1e-5);
        assert_relative_eq!(hess[[0, 1]], 3.0, epsilon = 1e-5);
        assert_relative_eq!(hess[[1, 1]], 4.0, epsilon = 1e-5);
        assert_eq!(hess[[0, 1]], hess[[1, 0]]);
    }

    #[test]
    // Purpose
    // -------
    // Ensure non-finite gradients surface as `InvalidHessian`.
    //
    // Given
    // -----
    // - A gradient function that always returns NaN.
    //
    // Expect
    // ------
    // - `Err(OptError::InvalidHessian { .. })`.
    fn compute_hessian_rejects_non_finite_gradients() {
        let grad_fn = |_: &Theta| Array1::from(vec![f64::NAN]);
        let err = compute_hessian(&grad_fn, &array![0.0]).expect_err("invalid hessian");
        assert!(matches!(err, OptError::InvalidHessian { .. }));
    }

    #[test]
    // Purpose
    // -------
    // Verify symmetrization averages off-diagonal pairs only.
    //
    // Given
    // -----
    // - [[1, 2], [0, 3]].
    //
    // Expect
    // ------
    // - [[1, 1], [1, 3]].
    fn symmetrize_hess_averages_off_diagonal_pairs() {
        let mut h: Hessian = array![[1.0, 2.0], [0.0, 3.0]];
        symmetrize_hess(&mut h);
        assert_eq!(h, array![[1.0, 1.0], [1.0, 3.0]]);
    }
}
