use crate::traits::FloatScalar;

use super::derivative::{central_difference, second_difference};
use super::line_search::backtracking_armijo;
use super::{stationary, step_converged, MinimizeResult, MinimizeSettings, OptimError};

/// Minimize a scalar function using the BFGS quasi-Newton method.
///
/// Maintains an inverse-curvature approximation `H`, initialized to 1. For a
/// single variable the BFGS update `H ← (I − ρsyᵀ)H(I − ρysᵀ) + ρssᵀ` reduces
/// exactly to the secant ratio `H = s / y`, applied whenever `y·s > 0`. Steps
/// shorter than the finite-difference resolution do not update `H`, since the
/// gradient difference there is dominated by rounding.
///
/// If no update ever happened (e.g. the start is already stationary), the
/// returned `hess_inv` comes from a second difference at the solution.
///
/// Uses Armijo backtracking line search for step length selection.
///
/// # Errors
///
/// Returns [`OptimError::NotFinite`] if `f(x0)` or a gradient is not finite.
/// Returns [`OptimError::LineSearchFailed`] if the line search fails.
/// Returns [`OptimError::MaxIterations`] if convergence is not achieved.
/// Returns [`OptimError::Stalled`] if steps become negligible while the
/// gradient is not.
///
/// # Example
///
/// ```
/// use alshenawy::optim::{minimize_bfgs, MinimizeSettings};
///
/// // f(x) = x - ln x has its minimum at 1 with f'' = 1
/// let f = |x: f64| if x > 0.0 { x - x.ln() } else { f64::INFINITY };
/// let r = minimize_bfgs(f, 4.0, &MinimizeSettings::default()).unwrap();
/// assert!((r.x - 1.0).abs() < 1e-6);
/// assert!((r.hess_inv - 1.0).abs() < 5e-2);
/// ```
pub fn minimize_bfgs<T: FloatScalar>(
    mut f: impl FnMut(T) -> T,
    x0: T,
    settings: &MinimizeSettings<T>,
) -> Result<MinimizeResult<T>, OptimError> {
    let mut x = x0;
    let mut fx = f(x);
    if !fx.is_finite() {
        return Err(OptimError::NotFinite);
    }
    let mut g = central_difference(&mut f, x);
    let mut f_evals = 3usize;
    if !g.is_finite() {
        return Err(OptimError::NotFinite);
    }

    let mut h = T::one();
    let mut updated = false;
    let resolution = T::epsilon().sqrt();

    for iter in 0..settings.max_iter {
        if g.abs() < settings.grad_tol {
            return Ok(finish(&mut f, x, fx, g, h, updated, iter, f_evals));
        }

        // Search direction; reset H if it is not a descent direction
        let mut p = -h * g;
        if p * g >= T::zero() {
            h = T::one();
            p = -g;
        }

        let (alpha, f_new, ls_evals) = backtracking_armijo(
            fx,
            g * p,
            x,
            p,
            &mut f,
            settings.armijo_c1,
            settings.armijo_rho,
            settings.max_ls_iter,
        )?;
        f_evals += ls_evals;

        let s = alpha * p;
        let x_new = x + s;
        let g_new = central_difference(&mut f, x_new);
        f_evals += 2;
        if !g_new.is_finite() {
            return Err(OptimError::NotFinite);
        }

        let y = g_new - g;
        if y * s > T::epsilon() && s.abs() > resolution * x.abs().max(T::one()) {
            h = s / y;
            updated = true;
        }

        let converged = step_converged(x, s, fx, f_new, settings);
        x = x_new;
        fx = f_new;
        g = g_new;

        if converged {
            if !stationary(g, fx, settings) {
                return Err(OptimError::Stalled);
            }
            return Ok(finish(&mut f, x, fx, g, h, updated, iter + 1, f_evals));
        }
    }

    Err(OptimError::MaxIterations)
}

#[allow(clippy::too_many_arguments)]
fn finish<T: FloatScalar>(
    f: &mut impl FnMut(T) -> T,
    x: T,
    fx: T,
    grad: T,
    h: T,
    updated: bool,
    iterations: usize,
    mut f_evals: usize,
) -> MinimizeResult<T> {
    let hess_inv = if updated {
        h
    } else {
        f_evals += 2;
        T::one() / second_difference(f, x, fx)
    };
    MinimizeResult {
        x,
        fx,
        grad,
        hess_inv,
        iterations,
        f_evals,
    }
}
