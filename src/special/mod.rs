//! Special mathematical functions.
//!
//! The small set of special functions the distributions need: log-gamma for
//! the Gamma prior density, the regularized incomplete gamma for its CDF, and
//! the error function for the Normal and half-Normal CDFs. All functions are
//! generic over [`FloatScalar`] (f32/f64).
//!
//! | Function | Description |
//! |----------|-------------|
//! | [`lgamma`] | Log-gamma ln Γ(x) |
//! | [`gamma_inc`] | Regularized lower incomplete gamma P(a,x) |
//! | [`gamma_inc_upper`] | Regularized upper incomplete gamma Q(a,x) = 1−P(a,x) |
//! | [`erf`] | Error function |
//! | [`erfc`] | Complementary error function 1−erf(x) |
//!
//! # Example
//!
//! ```
//! use alshenawy::special::{lgamma, erf};
//!
//! // ln Γ(1) = 0
//! assert!(lgamma(1.0_f64).abs() < 1e-14);
//!
//! // erf(0) = 0
//! assert!(erf(0.0_f64).abs() < 1e-16);
//! ```

use thiserror::Error;

use crate::FloatScalar;

mod erf_fn;
mod gamma_fn;
mod incgamma;


pub use erf_fn::{erf, erfc};
pub use gamma_fn::lgamma;
pub use incgamma::{gamma_inc, gamma_inc_upper};

/// Errors from special function evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SpecialError {
    /// Series or continued fraction did not converge within the iteration limit.
    #[error("series/continued fraction did not converge")]
    ConvergenceFailure,
    /// Input outside the function's domain (e.g. a ≤ 0 or x < 0 for incomplete gamma).
    #[error("input outside function domain")]
    DomainError,
}

// ---------------------------------------------------------------------------
// Lanczos approximation constants (g = 7, n = 9)
// ---------------------------------------------------------------------------

/// Lanczos parameter g.
pub(crate) const LANCZOS_G: f64 = 7.0;

/// Lanczos series coefficients (n = 9).
pub(crate) const LANCZOS_COEFFS: [f64; 9] = [
    0.99999999999980993,
    676.5203681218851,
    -1259.1392167224028,
    771.32342877765313,
    -176.61502916214059,
    12.507343278686905,
    -0.13857109526572012,
    9.9843695780195716e-6,
    1.5056327351493116e-7,
];

/// Evaluate the Lanczos series Ag(z) = c0 + c1/(z+1) + c2/(z+2) + ...
#[inline]
pub(crate) fn lanczos_sum<T: FloatScalar>(z: T) -> T {
    LANCZOS_COEFFS[1..]
        .iter()
        .enumerate()
        .fold(T::lit(LANCZOS_COEFFS[0]), |sum, (i, &c)| {
            sum + T::lit(c) / (z + T::lit((i + 1) as f64))
        })
}
