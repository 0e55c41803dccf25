//! Probability distributions.
//!
//! The centrepiece is [`Alshenawy`], the one-parameter A law on (0, ∞) with
//! closed-form density, CDF and quantile. The remaining distributions serve
//! the estimators: [`Normal`] is the asymptotic sampling distribution of the
//! maximum-likelihood estimate, and [`Gamma`], [`Exponential`], [`Uniform`]
//! and [`HalfNormal`] are the available priors for the Bayesian estimator.
//!
//! | Distribution | Parameters | Support |
//! |---|---|---|
//! | [`Alshenawy`] | shape β | (0, ∞) |
//! | [`Normal`] | mean μ, std dev σ | (−∞, ∞) |
//! | [`Gamma`] | shape α, rate β | (0, ∞) |
//! | [`Exponential`] | rate λ | [0, ∞) |
//! | [`Uniform`] | lower a, upper b | [a, b] |
//! | [`HalfNormal`] | scale σ | [0, ∞) |
//!
//! # Example
//!
//! ```
//! use alshenawy::stats::{Alshenawy, ContinuousDistribution};
//!
//! let a = Alshenawy::new(1.5_f64).unwrap();
//! let x = a.quantile(0.3);
//! assert!((a.cdf(x) - 0.3).abs() < 1e-12);
//! ```

pub mod a_dist;
mod exponential;
mod gamma_dist;
mod half_normal;
mod ks;
mod normal;
mod uniform;


pub use a_dist::Alshenawy;
pub use exponential::Exponential;
pub use gamma_dist::Gamma;
pub use half_normal::HalfNormal;
pub use ks::{ks_test, KsResult};
pub use normal::Normal;
pub use uniform::Uniform;

use thiserror::Error;

use crate::special::erfc;
use crate::traits::FloatScalar;

/// Errors from distribution construction and evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum StatsError {
    /// A parameter is out of its valid range.
    #[error("invalid distribution parameter {name} = {value}")]
    InvalidParameter {
        /// Parameter name, e.g. `"beta"`.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
}

impl StatsError {
    pub(crate) fn invalid<T: FloatScalar>(name: &'static str, value: T) -> Self {
        StatsError::InvalidParameter {
            name,
            value: value.to_f64().unwrap_or(f64::NAN),
        }
    }
}

/// Reject anything that is not a finite, strictly positive number.
pub(crate) fn require_positive<T: FloatScalar>(name: &'static str, value: T) -> Result<T, StatsError> {
    if value > T::zero() && value.is_finite() {
        Ok(value)
    } else {
        Err(StatsError::invalid(name, value))
    }
}

/// Trait for continuous probability distributions.
pub trait ContinuousDistribution<T: FloatScalar> {
    /// Probability density function.
    fn pdf(&self, x: T) -> T;
    /// Natural log of the probability density function.
    fn ln_pdf(&self, x: T) -> T;
    /// Cumulative distribution function P(X ≤ x).
    fn cdf(&self, x: T) -> T;
    /// Natural log of the CDF.
    fn ln_cdf(&self, x: T) -> T {
        self.cdf(x).ln()
    }
    /// Quantile function (inverse CDF). Returns x such that P(X ≤ x) = p.
    fn quantile(&self, p: T) -> T;
}

/// Closed-form first and second moments.
///
/// Not every distribution here has them: the A law's mean has no closed form,
/// so this is kept apart from [`ContinuousDistribution`].
pub trait Moments<T> {
    /// Expected value E\[X\].
    fn mean(&self) -> T;
    /// Variance Var(X).
    fn variance(&self) -> T;
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Standard normal quantile.
///
/// Acklam's rational approximation (relative error < 1.15e-9) followed by one
/// Halley refinement step against `erfc`, which brings f64 results to full
/// precision. Input: p ∈ (0, 1); returns ∓∞ at 0 and 1.
pub(crate) fn normal_quantile_standard<T: FloatScalar>(p: T) -> T {
    let one = T::one();
    let half = T::lit(0.5);
    let two = T::lit(2.0);

    if p.is_nan() || p < T::zero() || p > one {
        return T::nan();
    }
    if p == T::zero() {
        return T::neg_infinity();
    }
    if p == one {
        return T::infinity();
    }

    let p_low = T::lit(0.02425);
    let p_high = one - p_low;

    let a = [
        -3.969683028665376e+01,
        2.209460984245205e+02,
        -2.759285104469687e+02,
        1.383577518672690e+02,
        -3.066479806614716e+01,
        2.506628277459239e+00,
    ]
    .map(T::lit);
    let b = [
        -5.447609879822406e+01,
        1.615858368580409e+02,
        -1.556989798598866e+02,
        6.680131188771972e+01,
        -1.328068155288572e+01,
    ]
    .map(T::lit);
    let c = [
        -7.784894002430293e-03,
        -3.223964580411365e-01,
        -2.400758277161838e+00,
        -2.549732539343734e+00,
        4.374664141464968e+00,
        2.938163982698783e+00,
    ]
    .map(T::lit);
    let d = [
        7.784695709041462e-03,
        3.224671290700398e-01,
        2.445134137142996e+00,
        3.754408661907416e+00,
    ]
    .map(T::lit);

    let tail = |q: T| {
        (((((c[0] * q + c[1]) * q + c[2]) * q + c[3]) * q + c[4]) * q + c[5])
            / ((((d[0] * q + d[1]) * q + d[2]) * q + d[3]) * q + one)
    };

    let x = if p < p_low {
        tail((-two * p.ln()).sqrt())
    } else if p <= p_high {
        let q = p - half;
        let r = q * q;
        (((((a[0] * r + a[1]) * r + a[2]) * r + a[3]) * r + a[4]) * r + a[5]) * q
            / (((((b[0] * r + b[1]) * r + b[2]) * r + b[3]) * r + b[4]) * r + one)
    } else {
        -tail((-two * (one - p).ln()).sqrt())
    };

    // Halley step on Φ(x) - p
    let sqrt2 = T::lit(core::f64::consts::SQRT_2);
    let sqrt_2pi = T::lit(core::f64::consts::TAU.sqrt());
    let e = half * erfc(-x / sqrt2) - p;
    let u = e * sqrt_2pi * (x * x / two).exp();
    let refined = x - u / (one + x * u / two);
    if refined.is_finite() {
        refined
    } else {
        x
    }
}
