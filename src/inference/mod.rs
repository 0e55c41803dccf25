//! Parameter estimation for the A distribution and evaluation of estimators.
//!
//! One estimation trial turns a sample into a [`Simulation`]: the true
//! parameter the sample was drawn at, the point estimate, and a
//! [`ConfidenceInterval`]. Two estimators produce these records:
//!
//! - [`classical`]: maximum likelihood with an asymptotic normal interval
//!   built from the observed Fisher information.
//! - [`bayesian`]: random-walk Metropolis on the posterior, reporting the
//!   posterior mean and the highest-density interval.
//!
//! [`summarize`] reduces a batch of records sharing the same true parameter
//! and sample size into bias, mean squared error and empirical coverage.
//!
//! # Example
//!
//! ```
//! use alshenawy::inference::{summarize, ConfidenceInterval, Simulation};
//!
//! let ci = ConfidenceInterval::new(0.8, 1.3).unwrap();
//! let sims = [
//!     Simulation::new(50, 1.0, 0.9, ci).unwrap(),
//!     Simulation::new(50, 1.0, 1.2, ci).unwrap(),
//! ];
//! let summary = summarize(&sims).unwrap();
//! assert!((summary.bias - 0.05).abs() < 1e-12);
//! assert_eq!(summary.coverage_probability, 1.0);
//! ```

pub mod bayesian;
pub mod classical;
mod interval;
pub mod mcmc;
mod summary;

#[cfg(test)]
mod tests;

pub use interval::{ConfidenceInterval, Simulation};
pub use summary::{summarize, Summary};

use thiserror::Error;

use crate::optim::OptimError;
use crate::stats::StatsError;

/// Errors from estimation and aggregation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InferenceError {
    /// Interval lower bound above its upper bound, or a NaN bound.
    #[error("invalid confidence interval [{lower}, {upper}]")]
    InvalidInterval { lower: f64, upper: f64 },
    /// The optimizer or sampler did not produce a usable estimate.
    #[error("numerical estimation failed: {0}")]
    NumericalEstimation(#[from] NumericalFailure),
    /// Records in a batch disagree on true parameter or sample size.
    #[error("simulation {index} does not match the batch's true_param and sample_size")]
    InconsistentBatch { index: usize },
    /// Aggregation over zero records.
    #[error("cannot summarize an empty batch")]
    EmptyBatch,
    /// Sample size must be at least 1.
    #[error("invalid sample size {0}")]
    InvalidSampleSize(usize),
    /// Significance level outside (0, 1).
    #[error("significance level must lie in (0, 1), got {0}")]
    InvalidSignificance(f64),
    /// A distribution or prior parameter is out of range.
    #[error(transparent)]
    InvalidParameter(#[from] StatsError),
    /// Sampler configuration that cannot produce draws.
    #[error("invalid sampler settings: {0}")]
    InvalidSamplerSettings(&'static str),
}

/// Why a numerical estimate could not be formed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NumericalFailure {
    #[error(transparent)]
    Optimizer(#[from] OptimError),
    #[error("observed information {0} is not positive and finite")]
    ObservedInformation(f64),
    #[error("estimate {0} is not finite")]
    NonFiniteEstimate(f64),
    #[error("log posterior is not finite at the initial point beta = {0}")]
    InitialPoint(f64),
}

impl From<OptimError> for InferenceError {
    fn from(e: OptimError) -> Self {
        InferenceError::NumericalEstimation(NumericalFailure::Optimizer(e))
    }
}

pub(crate) fn check_significance(alpha: f64) -> Result<f64, InferenceError> {
    if alpha > 0.0 && alpha < 1.0 {
        Ok(alpha)
    } else {
        Err(InferenceError::InvalidSignificance(alpha))
    }
}

pub(crate) fn check_sample_size(n: usize) -> Result<usize, InferenceError> {
    if n == 0 {
        Err(InferenceError::InvalidSampleSize(n))
    } else {
        Ok(n)
    }
}
