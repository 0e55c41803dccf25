use rand::distributions::Distribution;
use rand::Rng;
use rand_distr::StandardNormal;

use super::{normal_quantile_standard, require_positive, ContinuousDistribution, Moments, StatsError};
use crate::special::{erf, erfc};
use crate::FloatScalar;

/// Normal (Gaussian) distribution N(μ, σ²).
///
/// The classical estimator builds one of these around the point estimate
/// and reads the confidence bounds off its quantiles.
///
/// # Example
///
/// ```
/// use alshenawy::stats::{Normal, ContinuousDistribution};
///
/// let n = Normal::new(0.0_f64, 1.0).unwrap();
/// assert!((n.cdf(0.0) - 0.5).abs() < 1e-14);
/// assert!((n.quantile(0.975) - 1.959963984540054).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normal<T> {
    mu: T,
    sigma: T,
}

impl<T: FloatScalar> Normal<T> {
    /// Create a normal distribution with mean `mu` and standard deviation `sigma`.
    ///
    /// Requires a finite `mu` and a finite `sigma > 0`.
    pub fn new(mu: T, sigma: T) -> Result<Self, StatsError> {
        if !mu.is_finite() {
            return Err(StatsError::invalid("mu", mu));
        }
        Ok(Self {
            mu,
            sigma: require_positive("sigma", sigma)?,
        })
    }

    /// Mean μ.
    pub fn mu(&self) -> T {
        self.mu
    }

    /// Standard deviation σ.
    pub fn sigma(&self) -> T {
        self.sigma
    }
}

impl<T: FloatScalar> ContinuousDistribution<T> for Normal<T> {
    fn pdf(&self, x: T) -> T {
        self.ln_pdf(x).exp()
    }

    fn ln_pdf(&self, x: T) -> T {
        let half = T::lit(0.5);
        let z = (x - self.mu) / self.sigma;
        -self.sigma.ln() - half * T::lit(core::f64::consts::TAU).ln() - half * z * z
    }

    fn cdf(&self, x: T) -> T {
        let half = T::lit(0.5);
        let z = (x - self.mu) / (self.sigma * T::lit(core::f64::consts::SQRT_2));
        if z >= T::zero() {
            half * (T::one() + erf(z))
        } else {
            half * erfc(-z)
        }
    }

    fn quantile(&self, p: T) -> T {
        self.mu + self.sigma * normal_quantile_standard(p)
    }
}

impl<T: FloatScalar> Moments<T> for Normal<T> {
    fn mean(&self) -> T {
        self.mu
    }

    fn variance(&self) -> T {
        self.sigma * self.sigma
    }
}

/// Draws via `rand_distr::Normal`.
impl<T: FloatScalar> Distribution<T> for Normal<T>
where
    StandardNormal: Distribution<T>,
{
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        match rand_distr::Normal::new(self.mu, self.sigma) {
            Ok(d) => d.sample(rng),
            Err(_) => T::nan(),
        }
    }
}
