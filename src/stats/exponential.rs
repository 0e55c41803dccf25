use super::{require_positive, ContinuousDistribution, Moments, StatsError};
use crate::FloatScalar;

/// Exponential distribution with rate λ.
///
/// f(x) = λ exp(−λx) for x ≥ 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Exponential<T> {
    lambda: T,
}

impl<T: FloatScalar> Exponential<T> {
    /// Create an exponential distribution with rate `lambda > 0`.
    pub fn new(lambda: T) -> Result<Self, StatsError> {
        Ok(Self {
            lambda: require_positive("rate", lambda)?,
        })
    }
}

impl<T: FloatScalar> ContinuousDistribution<T> for Exponential<T> {
    fn pdf(&self, x: T) -> T {
        if x < T::zero() {
            T::zero()
        } else {
            self.lambda * (-self.lambda * x).exp()
        }
    }

    fn ln_pdf(&self, x: T) -> T {
        if x < T::zero() {
            T::neg_infinity()
        } else {
            self.lambda.ln() - self.lambda * x
        }
    }

    fn cdf(&self, x: T) -> T {
        if x <= T::zero() {
            T::zero()
        } else {
            -(-self.lambda * x).exp_m1()
        }
    }

    fn quantile(&self, p: T) -> T {
        -(-p).ln_1p() / self.lambda
    }
}

impl<T: FloatScalar> Moments<T> for Exponential<T> {
    fn mean(&self) -> T {
        self.lambda.recip()
    }

    fn variance(&self) -> T {
        (self.lambda * self.lambda).recip()
    }
}
