use super::{normal_quantile_standard, require_positive, ContinuousDistribution, Moments, StatsError};
use crate::special::erf;
use crate::FloatScalar;

/// Half-normal distribution: |Z|·σ for standard normal Z.
///
/// f(x) = √2 / (σ√π) · exp(−x² / 2σ²) for x ≥ 0.
///
/// # Example
///
/// ```
/// use alshenawy::stats::{HalfNormal, ContinuousDistribution};
///
/// let h = HalfNormal::new(1.0_f64).unwrap();
/// assert_eq!(h.pdf(-0.1), 0.0);
/// assert!((h.cdf(h.quantile(0.5)) - 0.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HalfNormal<T> {
    sigma: T,
}

impl<T: FloatScalar> HalfNormal<T> {
    /// Create a half-normal distribution with scale `sigma > 0`.
    pub fn new(sigma: T) -> Result<Self, StatsError> {
        Ok(Self {
            sigma: require_positive("sigma", sigma)?,
        })
    }
}

impl<T: FloatScalar> ContinuousDistribution<T> for HalfNormal<T> {
    fn pdf(&self, x: T) -> T {
        if x < T::zero() {
            T::zero()
        } else {
            self.ln_pdf(x).exp()
        }
    }

    fn ln_pdf(&self, x: T) -> T {
        if x < T::zero() {
            return T::neg_infinity();
        }
        let half = T::lit(0.5);
        let z = x / self.sigma;
        // ln(√(2/π))
        let ln_norm = half * T::lit(core::f64::consts::FRAC_2_PI).ln();
        ln_norm - self.sigma.ln() - half * z * z
    }

    fn cdf(&self, x: T) -> T {
        if x <= T::zero() {
            T::zero()
        } else {
            erf(x / (self.sigma * T::lit(core::f64::consts::SQRT_2)))
        }
    }

    fn quantile(&self, p: T) -> T {
        let half = T::lit(0.5);
        self.sigma * normal_quantile_standard(half + half * p)
    }
}

impl<T: FloatScalar> Moments<T> for HalfNormal<T> {
    fn mean(&self) -> T {
        self.sigma * T::lit(core::f64::consts::FRAC_2_PI).sqrt()
    }

    fn variance(&self) -> T {
        self.sigma * self.sigma * (T::one() - T::lit(core::f64::consts::FRAC_2_PI))
    }
}
