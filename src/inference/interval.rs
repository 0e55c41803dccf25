use serde::Serialize;

use super::{check_sample_size, InferenceError};

/// Closed interval `[lower, upper]` with `lower ≤ upper`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConfidenceInterval {
    lower: f64,
    upper: f64,
}

impl ConfidenceInterval {
    /// Fails with [`InferenceError::InvalidInterval`] if `lower > upper` or
    /// either bound is NaN. Infinite bounds are accepted.
    ///
    /// ```
    /// use alshenawy::inference::ConfidenceInterval;
    ///
    /// assert!(ConfidenceInterval::new(2.0, 1.0).is_err());
    /// let ci = ConfidenceInterval::new(1.0, 2.0).unwrap();
    /// assert!(ci.contains(1.5) && !ci.contains(0.5));
    /// ```
    pub fn new(lower: f64, upper: f64) -> Result<Self, InferenceError> {
        if lower <= upper {
            Ok(Self { lower, upper })
        } else {
            Err(InferenceError::InvalidInterval { lower, upper })
        }
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Inclusive on both ends.
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Outcome of one estimation trial.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Simulation {
    sample_size: usize,
    true_param: f64,
    estimated_param: f64,
    ci: ConfidenceInterval,
}

impl Simulation {
    /// Fails with [`InferenceError::InvalidSampleSize`] for `sample_size == 0`.
    ///
    /// ```
    /// use alshenawy::inference::{ConfidenceInterval, Simulation};
    ///
    /// let ci = ConfidenceInterval::new(2.0, 3.0).unwrap();
    /// let sim = Simulation::new(10, 2.0, 2.5, ci).unwrap();
    /// assert_eq!(sim.deviation(), 0.5);
    /// assert!(sim.ci_contains_true_param());
    /// ```
    pub fn new(
        sample_size: usize,
        true_param: f64,
        estimated_param: f64,
        ci: ConfidenceInterval,
    ) -> Result<Self, InferenceError> {
        Ok(Self {
            sample_size: check_sample_size(sample_size)?,
            true_param,
            estimated_param,
            ci,
        })
    }

    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    pub fn true_param(&self) -> f64 {
        self.true_param
    }

    pub fn estimated_param(&self) -> f64 {
        self.estimated_param
    }

    pub fn ci(&self) -> ConfidenceInterval {
        self.ci
    }

    /// `estimated_param − true_param`.
    pub fn deviation(&self) -> f64 {
        self.estimated_param - self.true_param
    }

    pub fn ci_contains_true_param(&self) -> bool {
        self.ci.contains(self.true_param)
    }
}
