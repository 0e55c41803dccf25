use crate::traits::FloatScalar;

use super::derivative::{central_difference, second_difference};
use super::line_search::backtracking_armijo;
use super::{stationary, step_converged, MinimizeResult, MinimizeSettings, OptimError};

/// Minimize a scalar function with damped Newton steps.
///
/// Each iteration estimates f' and f'' by finite differences and tries the
/// step `p = −f'/f''` under Armijo backtracking. Where f'' is not positive the
/// Newton step would head uphill, so steepest descent `p = −f'` is used instead.
///
/// The returned `hess_inv` is `1 / f''` at the final point, whatever its sign.
///
/// # Errors
///
/// Returns [`OptimError::NotFinite`] if `f(x0)` or a derivative is not finite.
/// Returns [`OptimError::LineSearchFailed`] if the line search fails.
/// Returns [`OptimError::MaxIterations`] if convergence is not achieved.
/// Returns [`OptimError::Stalled`] if steps become negligible while the
/// gradient is not.
///
/// # Example
///
/// ```
/// use alshenawy::optim::{minimize_newton, MinimizeSettings};
///
/// let r = minimize_newton(|x: f64| (x - 0.5).cosh().ln(), 2.0, &MinimizeSettings::default())
///     .unwrap();
/// assert!((r.x - 0.5).abs() < 1e-6);
/// assert!((r.hess_inv - 1.0).abs() < 1e-4);
/// ```
pub fn minimize_newton<T: FloatScalar>(
    mut f: impl FnMut(T) -> T,
    x0: T,
    settings: &MinimizeSettings<T>,
) -> Result<MinimizeResult<T>, OptimError> {
    let mut x = x0;
    let mut fx = f(x);
    let mut f_evals = 1usize;
    if !fx.is_finite() {
        return Err(OptimError::NotFinite);
    }

    for iter in 0..settings.max_iter {
        let g = central_difference(&mut f, x);
        let d2 = second_difference(&mut f, x, fx);
        f_evals += 4;
        if !g.is_finite() || d2.is_nan() {
            return Err(OptimError::NotFinite);
        }

        if g.abs() < settings.grad_tol {
            return Ok(MinimizeResult {
                x,
                fx,
                grad: g,
                hess_inv: T::one() / d2,
                iterations: iter,
                f_evals,
            });
        }

        let p = if d2 > T::zero() && d2.is_finite() {
            -g / d2
        } else {
            -g
        };

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
        let converged = step_converged(x, s, fx, f_new, settings);
        x = x + s;
        fx = f_new;

        if converged {
            let grad = central_difference(&mut f, x);
            let d2 = second_difference(&mut f, x, fx);
            f_evals += 4;
            if !stationary(grad, fx, settings) {
                return Err(OptimError::Stalled);
            }
            return Ok(MinimizeResult {
                x,
                fx,
                grad,
                hess_inv: T::one() / d2,
                iterations: iter + 1,
                f_evals,
            });
        }
    }

    Err(OptimError::MaxIterations)
}
