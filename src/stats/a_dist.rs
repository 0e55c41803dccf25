//! Alshenawy's A distribution.
//!
//! A one-parameter law on (0, ∞) with shape β > 0:
//!
//! ```text
//! F(x) = exp( (1 − e^{β/x}) / β )
//! f(x) = exp( (1 − e^{β/x}) / β + β/x ) / x²
//! Q(q) = β / ln(1 − β·ln q)
//! ```
//!
//! Besides the [`Alshenawy`] value object this module exposes free functions
//! taking β as an argument. They validate β on entry and return
//! [`StatsError::InvalidParameter`] for β ≤ 0, while values outside the
//! support are not errors: density 0, log-density −∞.

use rand::distributions::{Distribution, Open01};
use rand::Rng;

use super::{require_positive, ContinuousDistribution, StatsError};
use crate::FloatScalar;

/// Alshenawy's A distribution with shape β.
///
/// # Example
///
/// ```
/// use alshenawy::stats::{Alshenawy, ContinuousDistribution};
///
/// let a = Alshenawy::new(2.0_f64).unwrap();
/// assert!((a.ln_pdf(1.3) - a.pdf(1.3).ln()).abs() < 1e-14);
/// assert_eq!(a.pdf(-1.0), 0.0);
/// assert!(Alshenawy::new(0.0_f64).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Alshenawy<T> {
    beta: T,
}

impl<T: FloatScalar> Alshenawy<T> {
    /// Create the distribution with shape `beta`. Requires a finite `beta > 0`.
    pub fn new(beta: T) -> Result<Self, StatsError> {
        Ok(Self {
            beta: require_positive("beta", beta)?,
        })
    }

    /// The shape parameter β.
    pub fn beta(&self) -> T {
        self.beta
    }

    /// e^{β/x} − 1, the quantity every closed form is built from.
    ///
    /// Computed with `exp_m1` so that the CDF keeps its precision as x → ∞.
    #[inline]
    fn growth(&self, x: T) -> T {
        (self.beta / x).exp_m1()
    }

    /// Sum of log-densities over a sample.
    pub fn log_likelihood(&self, sample: &[T]) -> T {
        sample
            .iter()
            .fold(T::zero(), |acc, &x| acc + self.ln_pdf(x))
    }
}

impl<T: FloatScalar> ContinuousDistribution<T> for Alshenawy<T> {
    /// Evaluated as the exponential of [`ln_pdf`](Self::ln_pdf); the direct
    /// form divides by x², which underflows before the numerator does.
    fn pdf(&self, x: T) -> T {
        self.ln_pdf(x).exp()
    }

    fn ln_pdf(&self, x: T) -> T {
        if x.is_nan() {
            return x;
        }
        if x <= T::zero() {
            return T::neg_infinity();
        }
        let growth = self.growth(x);
        if growth.is_infinite() {
            return T::neg_infinity();
        }
        let two = T::lit(2.0);
        self.beta / x - two * x.ln() - growth / self.beta
    }

    fn cdf(&self, x: T) -> T {
        if x.is_nan() {
            return x;
        }
        if x <= T::zero() {
            return T::zero();
        }
        (-self.growth(x) / self.beta).exp()
    }

    fn ln_cdf(&self, x: T) -> T {
        if x.is_nan() {
            return x;
        }
        if x <= T::zero() {
            return T::neg_infinity();
        }
        -self.growth(x) / self.beta
    }

    /// Q(0) = 0 and Q(1) = ∞; NaN outside [0, 1].
    fn quantile(&self, p: T) -> T {
        if p.is_nan() || p < T::zero() || p > T::one() {
            return T::nan();
        }
        if p == T::one() {
            return T::infinity();
        }
        self.beta / (-self.beta * p.ln()).ln_1p()
    }
}

/// Inverse-transform sampling: Q applied to a uniform draw on (0, 1).
impl<T: FloatScalar> Distribution<T> for Alshenawy<T>
where
    Open01: Distribution<T>,
{
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        let u: T = Open01.sample(rng);
        self.quantile(u)
    }
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Density f(x; β).
///
/// ```
/// use alshenawy::stats::a_dist;
///
/// assert_eq!(a_dist::pdf(0.0_f64, 1.0).unwrap(), 0.0);
/// assert!(a_dist::pdf(1.0_f64, -1.0).is_err());
/// ```
pub fn pdf<T: FloatScalar>(x: T, beta: T) -> Result<T, StatsError> {
    Ok(Alshenawy::new(beta)?.pdf(x))
}

/// Distribution function F(x; β).
pub fn cdf<T: FloatScalar>(x: T, beta: T) -> Result<T, StatsError> {
    Ok(Alshenawy::new(beta)?.cdf(x))
}

/// Log-density ln f(x; β).
pub fn log_pdf<T: FloatScalar>(x: T, beta: T) -> Result<T, StatsError> {
    Ok(Alshenawy::new(beta)?.ln_pdf(x))
}

/// Log-CDF ln F(x; β).
pub fn log_cdf<T: FloatScalar>(x: T, beta: T) -> Result<T, StatsError> {
    Ok(Alshenawy::new(beta)?.ln_cdf(x))
}

/// Quantile Q(q; β).
pub fn quantile<T: FloatScalar>(q: T, beta: T) -> Result<T, StatsError> {
    Ok(Alshenawy::new(beta)?.quantile(q))
}

/// Draw `size` i.i.d. values with the supplied random source.
///
/// ```
/// use alshenawy::stats::a_dist;
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let xs: Vec<f64> = a_dist::sample(1.0, 5, &mut rng).unwrap();
/// assert_eq!(xs.len(), 5);
/// assert!(xs.iter().all(|&x| x > 0.0));
/// ```
pub fn sample<T, R>(beta: T, size: usize, rng: &mut R) -> Result<Vec<T>, StatsError>
where
    T: FloatScalar,
    R: Rng + ?Sized,
    Open01: Distribution<T>,
{
    let dist = Alshenawy::new(beta)?;
    Ok((0..size).map(|_| dist.sample(rng)).collect())
}

/// Elementwise density over a slice.
pub fn pdf_slice<T: FloatScalar>(xs: &[T], beta: T) -> Result<Vec<T>, StatsError> {
    let dist = Alshenawy::new(beta)?;
    Ok(xs.iter().map(|&x| dist.pdf(x)).collect())
}

/// Elementwise CDF over a slice.
pub fn cdf_slice<T: FloatScalar>(xs: &[T], beta: T) -> Result<Vec<T>, StatsError> {
    let dist = Alshenawy::new(beta)?;
    Ok(xs.iter().map(|&x| dist.cdf(x)).collect())
}

/// Elementwise log-density over a slice.
pub fn log_pdf_slice<T: FloatScalar>(xs: &[T], beta: T) -> Result<Vec<T>, StatsError> {
    let dist = Alshenawy::new(beta)?;
    Ok(xs.iter().map(|&x| dist.ln_pdf(x)).collect())
}

/// Elementwise log-CDF over a slice.
pub fn log_cdf_slice<T: FloatScalar>(xs: &[T], beta: T) -> Result<Vec<T>, StatsError> {
    let dist = Alshenawy::new(beta)?;
    Ok(xs.iter().map(|&x| dist.ln_cdf(x)).collect())
}

/// Elementwise quantile over a slice of probabilities.
pub fn quantile_slice<T: FloatScalar>(qs: &[T], beta: T) -> Result<Vec<T>, StatsError> {
    let dist = Alshenawy::new(beta)?;
    Ok(qs.iter().map(|&q| dist.quantile(q)).collect())
}

/// Log-likelihood of `sample` at β.
pub fn log_likelihood<T: FloatScalar>(sample: &[T], beta: T) -> Result<T, StatsError> {
    Ok(Alshenawy::new(beta)?.log_likelihood(sample))
}

/// Objective for maximum-likelihood fitting: β ↦ −(1/n)·Σ ln f(xᵢ; β).
///
/// Averaged over the sample, so its curvature at the optimum is the
/// per-observation observed information. Returns +∞ for β outside (0, ∞)
/// rather than an error, which keeps a minimizer's line search inside the
/// parameter space. An empty sample yields NaN.
///
/// ```
/// use alshenawy::stats::a_dist::negative_log_likelihood;
///
/// let nll = negative_log_likelihood(&[0.8_f64, 1.1, 2.5]);
/// assert!(nll(1.0).is_finite());
/// assert_eq!(nll(-1.0), f64::INFINITY);
/// ```
pub fn negative_log_likelihood<T: FloatScalar>(sample: &[T]) -> impl Fn(T) -> T + Send + Sync + '_ {
    let n = T::lit(sample.len() as f64);
    move |beta: T| match Alshenawy::new(beta) {
        Ok(dist) => -dist.log_likelihood(sample) / n,
        Err(_) => T::infinity(),
    }
}
