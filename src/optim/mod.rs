//! Scalar unconstrained minimization.
//!
//! The maximum-likelihood estimator needs three things from its optimizer: the
//! minimizer, the objective value there, and an estimate of the inverse second
//! derivative (the "inverse Hessian" of a one-parameter problem). [`minimize`]
//! provides all three for objectives given as plain closures, with derivatives
//! taken by finite differences.
//!
//! # Methods
//!
//! - [`Method::Bfgs`]: quasi-Newton with Armijo backtracking. In one dimension
//!   the BFGS inverse-Hessian update collapses to the secant ratio `s / y`.
//! - [`Method::Newton`]: Newton steps on finite-difference first and second
//!   derivatives, falling back to steepest descent where the curvature is not
//!   positive.
//!
//! # Finite differences
//!
//! - [`central_difference`]: first derivative
//! - [`second_difference`]: second derivative
//!
//! Objectives may return `+∞` (or NaN) outside their domain; the line search
//! treats such points as non-decreasing and backtracks.

mod bfgs;
mod derivative;
pub(crate) mod line_search;
mod newton;


pub use bfgs::minimize_bfgs;
pub use derivative::{central_difference, second_difference};
pub use newton::minimize_newton;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::traits::FloatScalar;

/// Errors from optimization algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OptimError {
    /// Maximum number of iterations exceeded.
    #[error("maximum iterations exceeded")]
    MaxIterations,
    /// A computed value was NaN or infinity.
    #[error("computed value is NaN or infinity")]
    NotFinite,
    /// Line search failed to find a sufficient decrease.
    #[error("line search failed")]
    LineSearchFailed,
    /// Steps shrank below tolerance at a point that is not stationary, as
    /// happens when the minimum lies on the edge of the domain.
    #[error("steps stalled away from a stationary point")]
    Stalled,
}

/// Minimization algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// Quasi-Newton with secant curvature updates.
    #[default]
    Bfgs,
    /// Newton with finite-difference curvature.
    Newton,
}

/// Settings shared by both minimization methods.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinimizeSettings<T> {
    /// Convergence tolerance on |f'(x)|.
    pub grad_tol: T,
    /// Convergence tolerance on relative function change.
    pub f_tol: T,
    /// Convergence tolerance on relative step size.
    pub x_tol: T,
    /// Maximum number of iterations.
    pub max_iter: usize,
    /// Armijo condition parameter (sufficient decrease).
    pub armijo_c1: T,
    /// Backtracking contraction factor.
    pub armijo_rho: T,
    /// Maximum line search iterations.
    pub max_ls_iter: usize,
    /// Which algorithm [`minimize`] dispatches to.
    pub method: Method,
}

impl Default for MinimizeSettings<f64> {
    fn default() -> Self {
        Self {
            grad_tol: 1e-8,
            f_tol: 1e-12,
            x_tol: 1e-12,
            max_iter: 200,
            armijo_c1: 1e-4,
            armijo_rho: 0.5,
            max_ls_iter: 60,
            method: Method::Bfgs,
        }
    }
}

impl Default for MinimizeSettings<f32> {
    fn default() -> Self {
        Self {
            grad_tol: 1e-4,
            f_tol: 1e-6,
            x_tol: 1e-6,
            max_iter: 200,
            armijo_c1: 1e-4,
            armijo_rho: 0.5,
            max_ls_iter: 40,
            method: Method::Bfgs,
        }
    }
}

/// Result of a scalar minimization.
#[derive(Debug, Clone, Copy)]
pub struct MinimizeResult<T> {
    /// Approximate minimizer.
    pub x: T,
    /// Function value at the minimizer: `f(x)`.
    pub fx: T,
    /// Finite-difference derivative at the minimizer.
    pub grad: T,
    /// Estimate of 1 / f''(x) at the minimizer.
    ///
    /// Not guaranteed positive: a start exactly on a stationary point that is
    /// not a minimum reports the (negative or infinite) curvature it found.
    pub hess_inv: T,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Number of function evaluations.
    pub f_evals: usize,
}

/// Minimize `f` starting from `x0` with the method selected in `settings`.
///
/// # Errors
///
/// - [`OptimError::NotFinite`] if `f(x0)` or a derivative is not finite.
/// - [`OptimError::LineSearchFailed`] if no step gives sufficient decrease.
/// - [`OptimError::MaxIterations`] if convergence is not achieved.
/// - [`OptimError::Stalled`] if the step or function-change tolerance is met
///   where |f'(x)| is still large.
///
/// # Example
///
/// ```
/// use alshenawy::optim::{minimize, MinimizeSettings};
///
/// let r = minimize(|x: f64| 3.0 * (x - 2.0).powi(2) + 1.0, 0.0, &MinimizeSettings::default())
///     .unwrap();
/// assert!((r.x - 2.0).abs() < 1e-6);
/// assert!((r.hess_inv - 1.0 / 6.0).abs() < 1e-4);
/// ```
pub fn minimize<T: FloatScalar>(
    f: impl FnMut(T) -> T,
    x0: T,
    settings: &MinimizeSettings<T>,
) -> Result<MinimizeResult<T>, OptimError> {
    match settings.method {
        Method::Bfgs => minimize_bfgs(f, x0, settings),
        Method::Newton => minimize_newton(f, x0, settings),
    }
}

/// Whether an accepted step from `x` to `x + s` (objective `fx` → `f_new`)
/// meets the step-size or function-change tolerance.
fn step_converged<T: FloatScalar>(
    x: T,
    s: T,
    fx: T,
    f_new: T,
    settings: &MinimizeSettings<T>,
) -> bool {
    let one = T::one();
    s.abs() < settings.x_tol * (one + x.abs())
        || (fx - f_new).abs() < settings.f_tol * (one + fx.abs())
}

/// Whether `g` is small enough to accept a point reached by the step or
/// function-change tolerance: `|g| ≤ √grad_tol · (1 + |f|)`.
fn stationary<T: FloatScalar>(g: T, fx: T, settings: &MinimizeSettings<T>) -> bool {
    g.abs() <= settings.grad_tol.sqrt() * (T::one() + fx.abs())
}
