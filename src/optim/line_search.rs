use crate::traits::FloatScalar;

use super::OptimError;

/// Backtracking line search satisfying the Armijo (sufficient decrease) condition.
///
/// Starts with `alpha = 1` and contracts by factor `rho` until:
/// `f(x + α·p) ≤ f(x) + c1·α·f'(x)·p`
///
/// A non-finite trial value never satisfies the condition, so steps out of
/// the objective's domain are shortened.
///
/// Returns `(alpha, f_new, evals)`.
#[allow(clippy::too_many_arguments)]
pub(crate) fn backtracking_armijo<T: FloatScalar>(
    f_at_x: T,
    grad_dot_p: T,
    x: T,
    p: T,
    f: &mut impl FnMut(T) -> T,
    c1: T,
    rho: T,
    max_iter: usize,
) -> Result<(T, T, usize), OptimError> {
    let mut alpha = T::one();
    let mut evals = 0;

    for _ in 0..max_iter {
        let f_new = f(x + alpha * p);
        evals += 1;

        if f_new.is_finite() && f_new <= f_at_x + c1 * alpha * grad_dot_p {
            return Ok((alpha, f_new, evals));
        }

        alpha = alpha * rho;
    }

    Err(OptimError::LineSearchFailed)
}
