//! Adapter that exposes a user `LogLikelihood` as an `argmin` problem.
//!
//! We convert a *maximization* of a log-likelihood `ℓ(θ)` into a *minimization*
//! problem by defining the cost as `c(θ) = -ℓ(θ)`. Analytic gradients (if
//! provided by the user) are negated accordingly. If a gradient is not
//! provided, we finite-difference the **cost** closure, so no sign flip is
//! needed in that branch.
//!
//! Candidates outside the model domain (see
//! [`OptError::is_rejected_candidate`]) are answered with [`REJECTED_COST`]
//! and a zero gradient so the line search backs off instead of aborting. Every
//! feasible evaluation is recorded in a [`CandidateTracker`], which lets the
//! runner report the best point seen even when the backend aborts mid-run.
use std::cell::{Cell, RefCell};

use crate::optimization::{
    errors::OptError,
    loglik_optimizer::{
        finite_diff::run_fd_diff,
        traits::LogLikelihood,
        types::{Cost, FnEvalMap, Grad, REJECTED_COST, Theta},
        validation::validate_grad,
    },
};
use argmin::core::{CostFunction, Error, Gradient};
use finitediff::FiniteDiff;

/// Best-feasible-point bookkeeping shared between the adapter and the runner.
///
/// The executor takes ownership of the problem, so the tracker lives outside
/// it and the adapter only holds a reference.
#[derive(Debug, Default)]
pub struct CandidateTracker {
    best: RefCell<Option<(Theta, Cost)>>,
    evaluations: Cell<u64>,
    rejections: Cell<u64>,
}

impl CandidateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a feasible evaluation, keeping it if it lowers the best cost.
    pub fn record(&self, theta: &Theta, cost: Cost) {
        self.evaluations.set(self.evaluations.get() + 1);
        let mut best = self.best.borrow_mut();
        let improves = match best.as_ref() {
            Some((_, best_cost)) => cost < *best_cost,
            None => true,
        };
        if improves {
            *best = Some((theta.clone(), cost));
        }
    }

    /// Record a candidate that was rejected as outside the model domain.
    pub fn record_rejection(&self) {
        self.evaluations.set(self.evaluations.get() + 1);
        self.rejections.set(self.rejections.get() + 1);
    }

    /// Best feasible `(θ, cost)` observed so far.
    pub fn best(&self) -> Option<(Theta, Cost)> {
        self.best.borrow().clone()
    }

    pub fn evaluations(&self) -> u64 {
        self.evaluations.get()
    }

    pub fn rejections(&self) -> u64 {
        self.rejections.get()
    }

    /// Evaluation counters in the same map shape argmin reports.
    pub fn counts(&self) -> FnEvalMap {
        let mut counts = FnEvalMap::new();
        counts.insert("cost_count".to_string(), self.evaluations());
        counts.insert("rejected_count".to_string(), self.rejections());
        counts
    }
}

/// Bridges a user `LogLikelihood` to `argmin`'s `CostFunction` and `Gradient`.
///
/// - `CostFunction::cost` returns `-ℓ(θ)` (negative log-likelihood), or
///   [`REJECTED_COST`] for a rejected candidate.
/// - `Gradient::gradient` returns:
///   - `-∇ℓ(θ)` if the user provides an analytic gradient,
///   - a zero vector for a rejected candidate, or
///   - a finite-difference gradient of the cost (no sign flip needed).
#[derive(Debug, Clone)]
pub struct ArgMinAdapter<'a, F: LogLikelihood> {
    pub f: &'a F,
    pub data: &'a F::Data,
    pub tracker: &'a CandidateTracker,
}

impl<'a, F: LogLikelihood> CostFunction for ArgMinAdapter<'a, F> {
    type Param = Theta;
    type Output = Cost;

    /// Evaluate the cost `c(θ) = -ℓ(θ)`.
    ///
    /// - Calls the user's `value(θ, data)` and checks the result is finite.
    /// - Rejected candidates yield `REJECTED_COST` and are counted.
    /// - Returns `Error(NonFiniteCost)` if the value is not finite.
    ///
    /// # Errors
    /// Propagates any non-rejectable `OptError` from the user’s `value`.
    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        match self.f.value(theta, self.data) {
            Ok(output) => {
                if !output.is_finite() {
                    return Err((OptError::NonFiniteCost { value: output }).into());
                }
                let cost = -output;
                self.tracker.record(theta, cost);
                Ok(cost)
            }
            Err(e) if e.is_rejected_candidate() => {
                self.tracker.record_rejection();
                Ok(REJECTED_COST)
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl<'a, F: LogLikelihood> Gradient for ArgMinAdapter<'a, F> {
    type Param = Theta;
    type Gradient = Grad;

    /// Evaluate the gradient of the cost at `θ`.
    ///
    /// Behavior:
    /// - If the user implements `grad(θ, data)`, we validate it and return `-grad`
    ///   (because the cost is `-ℓ`).
    /// - If `θ` is a rejected candidate, we return zeros.
    /// - Otherwise, we compute a finite-difference gradient of the **cost**:
    ///   central differences first, then forward differences if any cost
    ///   evaluation failed or the central gradient did not validate.
    ///
    /// The FD closure must return `f64`, so it cannot use `?`; the first error
    /// is parked in `closure_err` and the closure returns `NaN`.
    ///
    /// # Errors
    /// - Propagates user errors from `grad` (other than
    ///   `GradientNotImplemented` and rejected candidates).
    /// - Propagates any error raised by cost evaluations performed during FD.
    /// - Returns validation errors if the gradient has wrong dimension or
    ///   non-finite entries.
    fn gradient(&self, theta: &Self::Param) -> Result<Self::Gradient, Error> {
        let dim = theta.len();
        match self.f.grad(theta, self.data) {
            Ok(g) => {
                validate_grad(&g, dim)?;
                Ok(-g)
            }
            Err(e) if e.is_rejected_candidate() => Ok(Grad::zeros(dim)),
            Err(OptError::GradientNotImplemented) => {
                let closure_err: RefCell<Option<Error>> = RefCell::new(None);
                let cost_func = |theta: &Theta| -> f64 {
                    match self.cost(theta) {
                        Ok(val) => val,
                        Err(e) => {
                            let mut slot = closure_err.borrow_mut();
                            if slot.is_none() {
                                *slot = Some(e);
                            }
                            f64::NAN
                        }
                    }
                };
                let fd_grad = theta.central_diff(&cost_func);
                if closure_err.borrow().is_none() && validate_grad(&fd_grad, dim).is_ok() {
                    return Ok(fd_grad);
                }
                Ok(run_fd_diff(theta, &cost_func, &closure_err)?)
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl<'a, F: LogLikelihood> ArgMinAdapter<'a, F> {
    /// Construct a new adapter over a user `LogLikelihood`, its data, and a
    /// candidate tracker.
    pub fn new(f: &'a F, data: &'a F::Data, tracker: &'a CandidateTracker) -> Self {
        Self { f, data, tracker }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::OptResult;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Sign conventions for cost and analytic gradient.
    // - Rejected-candidate handling (penalty cost, zero gradient, counters).
    // - The finite-difference fallback when no analytic gradient exists.
    // - Best-candidate bookkeeping in `CandidateTracker`.
    // -------------------------------------------------------------------------

    /// Concave quadratic ℓ(θ) = -Σ (θ_i - 1)², rejected when θ₀ < -10.
    struct Quadratic {
        analytic: bool,
    }

    impl LogLikelihood for Quadratic {
        type Data = ();

        fn value(&self, theta: &Theta, _data: &()) -> OptResult<f64> {
            if theta[0] < -10.0 {
                return Err(OptError::DomainViolation { index: 0, variance: theta[0] });
            }
            Ok(-theta.mapv(|x| (x - 1.0) * (x - 1.0)).sum())
        }

        fn check(&self, _theta: &Theta, _data: &()) -> OptResult<()> {
            Ok(())
        }

        fn grad(&self, theta: &Theta, data: &()) -> OptResult<Grad> {
            if !self.analytic {
                return Err(OptError::GradientNotImplemented);
            }
            self.value(theta, data)?;
            Ok(theta.mapv(|x| -2.0 * (x - 1.0)))
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify the cost is the negated log-likelihood and the analytic gradient
    // is negated.
    //
    // Given
    // -----
    // - The quadratic model with an analytic gradient at θ = (0, 3).
    //
    // Expect
    // ------
    // - cost = 1 + 4 = 5; gradient of cost = (-2, 4).
    fn adapter_negates_value_and_analytic_gradient() {
        // Arrange
        let model = Quadratic { analytic: true };
        let tracker = CandidateTracker::new();
        let adapter = ArgMinAdapter::new(&model, &(), &tracker);
        let theta = array![0.0, 3.0];

        // Act
        let cost = adapter.cost(&theta).expect("cost");
        let grad = adapter.gradient(&theta).expect("gradient");

        // Assert
        assert_eq!(cost, 5.0);
        assert_eq!(grad, array![-2.0, 4.0]);
        assert_eq!(tracker.best().map(|(_, c)| c), Some(5.0));
    }

    #[test]
    // Purpose
    // -------
    // Ensure rejected candidates are penalized rather than aborting.
    //
    // Given
    // -----
    // - θ₀ = -20, which the model reports as a domain violation.
    //
    // Expect
    // ------
    // - cost = REJECTED_COST, gradient = 0, and one rejection counted with
    //   no best candidate recorded.
    fn adapter_penalizes_rejected_candidates() {
        // Arrange
        let model = Quadratic { analytic: true };
        let tracker = CandidateTracker::new();
        let adapter = ArgMinAdapter::new(&model, &(), &tracker);
        let theta = array![-20.0, 0.0];

        // Act
        let cost = adapter.cost(&theta).expect("rejected cost");
        let grad = adapter.gradient(&theta).expect("rejected gradient");

        // Assert
        assert_eq!(cost, REJECTED_COST);
        assert_eq!(grad, array![0.0, 0.0]);
        assert_eq!(tracker.rejections(), 1);
        assert!(tracker.best().is_none());
    }

    #[test]
    // Purpose
    // -------
    // Check that the finite-difference fallback approximates the analytic
    // cost gradient.
    //
    // Given
    // -----
    // - The quadratic model without an analytic gradient at θ = (0.5, 2.0).
    //
    // Expect
    // ------
    // - FD gradient ≈ (-1, 2) within 1e-5.
    fn adapter_falls_back_to_finite_differences() {
        // Arrange
        let model = Quadratic { analytic: false };
        let tracker = CandidateTracker::new();
        let adapter = ArgMinAdapter::new(&model, &(), &tracker);
        let theta = array![0.5, 2.0];

        // Act
        let grad = adapter.gradient(&theta).expect("fd gradient");

        // Assert
        assert!((grad[0] + 1.0).abs() < 1e-5);
        assert!((grad[1] - 2.0).abs() < 1e-5);
    }

    #[test]
    // Purpose
    // -------
    // Verify that the tracker keeps the lowest-cost candidate.
    //
    // Given
    // -----
    // - Three recorded candidates with costs 3, 1, 2.
    //
    // Expect
    // ------
    // - Best cost 1 with its θ; three evaluations counted.
    fn tracker_keeps_lowest_cost_candidate() {
        let tracker = CandidateTracker::new();
        tracker.record(&array![3.0], 3.0);
        tracker.record(&array![1.0], 1.0);
        tracker.record(&array![2.0], 2.0);

        let (theta, cost) = tracker.best().expect("best candidate");
        assert_eq!(cost, 1.0);
        assert_eq!(theta, array![1.0]);
        assert_eq!(tracker.evaluations(), 3);
        assert_eq!(tracker.counts().get("cost_count"), Some(&3));
    }
}
