//! inference::hessian — information-matrix covariance and standard errors.
//!
//! Purpose
//! -------
//! Turn a finite-difference Hessian of the negative log-likelihood at the MLE
//! into a parameter covariance matrix and standard errors, either classical
//! (`H⁻¹`) or robust sandwich (`H⁻¹ S H⁻¹`) with an outer-product-of-scores
//! meat `S`.
//!
//! Key behaviors
//! -------------
//! - Call [`compute_hessian`] on the gradient of `-ℓ` to obtain the observed
//!   information `H(x̂)`.
//! - Copy `H` into a `nalgebra::DMatrix` ([`fill_dmatrix`]) and
//!   eigendecompose it with `symmetric_eigen`.
//! - Declare the information singular when any eigenvalue is at most
//!   `EIGEN_EPS · max(1, λ_max)`; the covariance is then `None` rather than a
//!   pseudoinverse.
//! - Build `S = Σ_t s_t s_tᵀ` from per-observation scores with [`opg_meat`].
//!
//! Conventions
//! -----------
//! - Everything is on the **sum** log-likelihood scale, so `H⁻¹` is directly
//!   the asymptotic covariance of the estimator.
//! - The caller chooses the coordinates. The GARCH layer differentiates in
//!   model space `(μ, ω, α, β)` so standard errors are reported for the
//!   quantities users read.
//! - No explicit inverse is formed; `H⁻¹ = Q Λ⁻¹ Qᵀ` from the eigenpairs.
//!
//! Testing notes
//! -------------
//! - Unit tests check the DMatrix copy, classical SEs on an analytic
//!   quadratic, sandwich inflation, the OPG meat, and the singular cutoff.
use crate::optimization::{
    errors::OptResult, loglik_optimizer::finite_diff::compute_hessian,
    numerical_stability::transformations::EIGEN_EPS,
};
use nalgebra::DMatrix;
use ndarray::{Array1, Array2};

/// Covariance of the estimator from the observed information at `x_hat`.
///
/// `f` must return the gradient of the **negative** log-likelihood, so the
/// finite-difference Hessian is positive definite at a maximum. When `meat`
/// is `Some(S)`, the robust sandwich `H⁻¹ S H⁻¹` is returned instead of `H⁻¹`.
///
/// Returns `Ok(None)` when `H` is not numerically positive definite.
///
/// # Errors
/// `HessianDimMismatch` / `InvalidHessian` when `f` yields non-finite values
/// on both finite-difference schemes.
pub fn calc_covariance<F: Fn(&Array1<f64>) -> Array1<f64>>(
    f: &F, x_hat: &Array1<f64>, meat: Option<&Array2<f64>>,
) -> OptResult<Option<Array2<f64>>> {
    let obs_info = compute_hessian(f, x_hat)?;
    let mut obs_info_nalg = DMatrix::<f64>::zeros(obs_info.nrows(), obs_info.ncols());
    fill_dmatrix(&obs_info, &mut obs_info_nalg);
    let Some(inv) = invert_pd(obs_info_nalg) else {
        return Ok(None);
    };
    match meat {
        Some(s) => Ok(Some(sandwich(&inv, s))),
        None => Ok(Some(inv)),
    }
}

/// Standard errors: square roots of the diagonal of [`calc_covariance`].
pub fn calc_standard_errors<F: Fn(&Array1<f64>) -> Array1<f64>>(
    f: &F, x_hat: &Array1<f64>, meat: Option<&Array2<f64>>,
) -> OptResult<Option<Array1<f64>>> {
    let cov = calc_covariance(f, x_hat, meat)?;
    Ok(cov.map(|c| c.diag().mapv(|v| v.max(0.0).sqrt())))
}

/// Outer product of per-observation scores, `S = Σ_t s_t s_tᵀ`.
///
/// `scores` is `n × k`, one row per observation.
pub fn opg_meat(scores: &Array2<f64>) -> Array2<f64> {
    scores.t().dot(scores)
}

// ---- Helper methods ----

fn fill_dmatrix(obs_info: &Array2<f64>, obs_info_nalg: &mut DMatrix<f64>) {
    for ((i, j), &value) in obs_info.indexed_iter() {
        obs_info_nalg[(i, j)] = value;
    }
}

/// `Q Λ⁻¹ Qᵀ`, or `None` if any eigenvalue falls below the relative floor.
fn invert_pd(obs_info_nalg: DMatrix<f64>) -> Option<Array2<f64>> {
    let n = obs_info_nalg.nrows();
    let eigen_decomp = obs_info_nalg.symmetric_eigen();
    let q = eigen_decomp.eigenvectors;
    let eigenvals = eigen_decomp.eigenvalues;
    let lambda_max = eigenvals.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let floor = EIGEN_EPS * lambda_max.max(1.0);
    if eigenvals.iter().any(|&lambda| !(lambda > floor)) {
        return None;
    }
    let mut inv = Array2::<f64>::zeros((n, n));
    for i in 0..n {
        for j in 0..=i {
            let v: f64 = eigenvals
                .iter()
                .enumerate()
                .map(|(k, &lambda)| q[(i, k)] * q[(j, k)] / lambda)
                .sum();
            inv[[i, j]] = v;
            inv[[j, i]] = v;
        }
    }
    Some(inv)
}

fn sandwich(bread: &Array2<f64>, meat: &Array2<f64>) -> Array2<f64> {
    bread.dot(meat).dot(bread)
}
