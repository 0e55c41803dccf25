//! Log-gamma via the Lanczos approximation.

use super::{lanczos_sum, LANCZOS_G};
use crate::FloatScalar;

/// Natural logarithm of the gamma function, ln Γ(x).
///
/// Uses the Lanczos approximation in log space to avoid overflow for large
/// arguments. For x < 0.5, uses the reflection formula in log space.
/// Returns infinity at non-positive integer poles and NaN for NaN input.
///
/// # Example
///
/// ```
/// use alshenawy::special::lgamma;
///
/// // ln Γ(1) = 0
/// assert!(lgamma(1.0_f64).abs() < 1e-14);
///
/// // ln Γ(100), no overflow
/// let val = lgamma(100.0_f64);
/// assert!((val - 359.1342053695754).abs() < 1e-8);
/// ```
pub fn lgamma<T: FloatScalar>(x: T) -> T {
    let zero = T::zero();
    let one = T::one();
    let half = T::lit(0.5);

    if x.is_nan() {
        return x;
    }

    // Non-positive integers: poles → +infinity
    if x <= zero && x == x.floor() {
        return T::infinity();
    }

    // Reflection formula in log space for x < 0.5
    if x < half {
        let pi = T::lit(core::f64::consts::PI);
        let sin_pi_x = (pi * x).sin().abs();
        if sin_pi_x == zero {
            return T::infinity();
        }
        return pi.ln() - sin_pi_x.ln() - lgamma(one - x);
    }

    let z = x - one;
    let t = z + T::lit(LANCZOS_G) + half;
    let ln_sqrt_2pi = T::lit(0.5 * core::f64::consts::TAU.ln());

    ln_sqrt_2pi + (z + half) * t.ln() - t + lanczos_sum(z).ln()
}
