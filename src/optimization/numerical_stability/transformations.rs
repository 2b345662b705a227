//! Numerical stability utilities.
//!
//! Provides safe implementations of the nonlinear transforms that map the
//! optimizer's unconstrained vector onto the GARCH(1,1) feasible region.
//! The functions here follow guarded strategies similar to those
//! in major ML libraries (e.g. PyTorch, TensorFlow), using explicit
//! cutoffs (`x > 20.0`) to keep `f64` arithmetic in a well-conditioned regime.
//!
//! # Provided items
//! - [`STATIONARITY_MARGIN`]: a small ε buffer (default 1e-6).
//!   Used to enforce the strict inequality α + β < 1.
//! - [`safe_softplus(x)`]: stable version of `ln(1 + exp(x))`,
//!   mapping ℝ → (0, ∞) without overflow.
//! - [`safe_softplus_inv(x)`]: inverse of softplus, mapping
//!   (0, ∞) → ℝ without catastrophic cancellation.
//! - [`safe_logistic(x)`]: derivative of softplus, `1 / (1 + exp(-x))`.
//! - [`safe_softmax`] / [`safe_softmax_inv`]: the scaled three-way softmax
//!   `(θ_α, θ_β, 0) ↦ (α, β, slack)` and its inverse.
//! - [`safe_softmax_deriv`]: Jacobian–vector product that pushes a gradient
//!   in `(α, β)` back to `(θ_α, θ_β)`.
//!
//! # Rationale
//! These transforms are building blocks in optimization and
//! probabilistic modeling whenever parameters must be kept
//! strictly positive or constrained away from unstable boundaries.

/// Safety margin for strict stationarity of the variance recursion.
///
/// GARCH(1,1) requires `alpha + beta < 1`. The softmax reserves
/// `STATIONARITY_MARGIN` of probability mass so the mapped parameters satisfy
/// `alpha + beta + slack = 1 − STATIONARITY_MARGIN` and never touch the
/// boundary.
pub const STATIONARITY_MARGIN: f64 = 1e-6;

/// Floor applied to `(α, β)` before taking logs in [`safe_softmax_inv`].
pub const LOGIT_EPS: f64 = 1e-12;

/// Relative eigenvalue floor used when deciding whether an information
/// matrix is positive definite.
pub const EIGEN_EPS: f64 = 1e-10;

/// Numerically stable softplus: `softplus(x) = ln(1 + exp(x))`.
///
/// Computes softplus without overflow for large positive `x` and
/// with good precision for large negative `x`. This implementation
/// uses a simple piecewise guard:
///
/// - For sufficiently large `x`, `softplus(x) ≈ x + ln1p(exp(-x)) ≈ x`.
/// - Otherwise, it falls back to `ln1p(exp(x))`.
///
/// # Parameters
/// - `x`: real input
///
/// # Returns
/// - `softplus(x)` as `f64`.
pub fn safe_softplus(x: f64) -> f64 {
    if x > 20.0 { x } else { x.exp().ln_1p() }
}

/// Stable inverse of softplus on `(0, ∞)`: solves for `t` in
/// `softplus(t) = x`, returning `t = ln(exp(x) - 1)`.
///
/// - For sufficiently large `x`, `ln(exp(x) - 1) ≈ x`.
/// - Otherwise, it uses `ln(expm1(x))`.
///
/// # Parameters
/// - `x`: a positive real (the softplus output), must be finite and `> 0`.
///
/// # Returns
/// - `t` such that `softplus(t) = x`.
pub fn safe_softplus_inv(x: f64) -> f64 {
    if x > 20.0 { x } else { x.exp_m1().ln() }
}

/// Numerically stable logistic function `σ(x) = 1 / (1 + exp(-x))`.
///
/// This is the derivative of [`safe_softplus`] and is used to map
/// `∂ℓ/∂ω` into `∂ℓ/∂θ_ω`. Each branch only exponentiates a non-positive
/// argument, so neither tail overflows.
pub fn safe_logistic(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Scaled softmax over `(θ_α, θ_β, 0)`.
///
/// Returns `(alpha, beta, slack)` with
/// `alpha + beta + slack = 1 − STATIONARITY_MARGIN`, all strictly positive
/// for finite logits. The implicit zero logit plays the role of the slack so
/// that two free coordinates parameterize the open simplex. A max-shift keeps
/// every exponent non-positive.
pub fn safe_softmax(theta_alpha: f64, theta_beta: f64) -> (f64, f64, f64) {
    let max = theta_alpha.max(theta_beta).max(0.0);
    let e_alpha = (theta_alpha - max).exp();
    let e_beta = (theta_beta - max).exp();
    let e_slack = (-max).exp();
    let scale = (1.0 - STATIONARITY_MARGIN) / (e_alpha + e_beta + e_slack);
    (e_alpha * scale, e_beta * scale, e_slack * scale)
}

/// Inverse of [`safe_softmax`]: logits `(θ_α, θ_β)` for given `(alpha, beta)`.
///
/// `alpha` and `beta` are floored at [`LOGIT_EPS`] so boundary values such as
/// `alpha = 0` map to a large negative (but finite) logit. The slack is
/// `1 − STATIONARITY_MARGIN − alpha − beta` and must be positive; callers
/// check stationarity before inverting.
pub fn safe_softmax_inv(alpha: f64, beta: f64) -> (f64, f64) {
    let alpha = alpha.max(LOGIT_EPS);
    let beta = beta.max(LOGIT_EPS);
    let slack = (1.0 - STATIONARITY_MARGIN - alpha - beta).max(LOGIT_EPS);
    let ln_slack = slack.ln();
    (alpha.ln() - ln_slack, beta.ln() - ln_slack)
}

/// Jacobian–vector product for the scaled softmax.
///
/// Given `x = (alpha, beta)` produced by [`safe_softmax`] and a gradient
/// `g = (∂ℓ/∂α, ∂ℓ/∂β)`, returns `(∂ℓ/∂θ_α, ∂ℓ/∂θ_β)` using
///
/// `∂ℓ/∂θ_j = x_j g_j − s_j Σ_i g_i x_i`, with `s_j = x_j / (1 − margin)`.
///
/// The slack coordinate has no free logit, so it contributes only through the
/// normalization term.
pub fn safe_softmax_deriv(alpha: f64, beta: f64, grad_alpha: f64, grad_beta: f64) -> (f64, f64) {
    let denom = 1.0 - STATIONARITY_MARGIN;
    let weighted = grad_alpha * alpha + grad_beta * beta;
    let d_alpha = alpha * grad_alpha - (alpha / denom) * weighted;
    let d_beta = beta * grad_beta - (beta / denom) * weighted;
    (d_alpha, d_beta)
}
