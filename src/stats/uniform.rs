use super::{ContinuousDistribution, Moments, StatsError};
use crate::FloatScalar;

/// Continuous uniform distribution on [a, b].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Uniform<T> {
    a: T,
    b: T,
}

impl<T: FloatScalar> Uniform<T> {
    /// Create a uniform distribution on [a, b]. Requires finite `a < b`.
    pub fn new(a: T, b: T) -> Result<Self, StatsError> {
        if !a.is_finite() {
            return Err(StatsError::invalid("lower", a));
        }
        if !b.is_finite() || a >= b {
            return Err(StatsError::invalid("upper", b));
        }
        Ok(Self { a, b })
    }
}

impl<T: FloatScalar> ContinuousDistribution<T> for Uniform<T> {
    fn pdf(&self, x: T) -> T {
        if x >= self.a && x <= self.b {
            (self.b - self.a).recip()
        } else {
            T::zero()
        }
    }

    fn ln_pdf(&self, x: T) -> T {
        if x >= self.a && x <= self.b {
            -(self.b - self.a).ln()
        } else {
            T::neg_infinity()
        }
    }

    fn cdf(&self, x: T) -> T {
        if x <= self.a {
            T::zero()
        } else if x >= self.b {
            T::one()
        } else {
            (x - self.a) / (self.b - self.a)
        }
    }

    fn quantile(&self, p: T) -> T {
        self.a + p * (self.b - self.a)
    }
}

impl<T: FloatScalar> Moments<T> for Uniform<T> {
    fn mean(&self) -> T {
        (self.a + self.b) / T::lit(2.0)
    }

    fn variance(&self) -> T {
        let d = self.b - self.a;
        d * d / T::lit(12.0)
    }
}
