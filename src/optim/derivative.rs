use crate::traits::FloatScalar;

/// Approximate f'(x) by central finite differences.
///
/// Uses step `h = ε^(1/3) · max(|x|, 1)`, which balances truncation and
/// rounding error for a second-order formula. When one side of the stencil
/// leaves the function's domain (non-finite value) the one-sided difference
/// on the other side is used instead. Requires two or three evaluations.
///
/// # Example
///
/// ```
/// use alshenawy::optim::central_difference;
///
/// let d = central_difference(&mut |x: f64| x.powi(3), 2.0);
/// assert!((d - 12.0).abs() < 1e-8);
/// ```
pub fn central_difference<T: FloatScalar>(f: &mut impl FnMut(T) -> T, x: T) -> T {
    let h = T::epsilon().cbrt() * x.abs().max(T::one());
    let fp = f(x + h);
    let fm = f(x - h);
    if fp.is_finite() && fm.is_finite() {
        return (fp - fm) / (h + h);
    }
    let f0 = f(x);
    if fp.is_finite() {
        (fp - f0) / h
    } else {
        (f0 - fm) / h
    }
}

/// Approximate f''(x) by the three-point second difference.
///
/// `fx` must be `f(x)`, which callers already hold. Step
/// `h = ε^(1/4) · max(|x|, 1)`; two evaluations.
///
/// # Example
///
/// ```
/// use alshenawy::optim::second_difference;
///
/// let mut f = |x: f64| x.exp();
/// let d2 = second_difference(&mut f, 1.0, 1.0_f64.exp());
/// assert!((d2 - 1.0_f64.exp()).abs() < 1e-6);
/// ```
pub fn second_difference<T: FloatScalar>(f: &mut impl FnMut(T) -> T, x: T, fx: T) -> T {
    let h = T::epsilon().sqrt().sqrt() * x.abs().max(T::one());
    let fp = f(x + h);
    let fm = f(x - h);
    (fp - (fx + fx) + fm) / (h * h)
}
