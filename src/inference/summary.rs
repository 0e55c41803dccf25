use serde::Serialize;

use super::{InferenceError, Simulation};

/// Aggregate quality of an estimator over a batch of trials.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub true_param: f64,
    pub sample_size: usize,
    /// Mean point estimate.
    pub mean: f64,
    /// Mean deviation from the true parameter.
    pub bias: f64,
    /// Mean squared deviation.
    pub mse: f64,
    /// Fraction of intervals containing the true parameter.
    pub coverage_probability: f64,
    pub n_simulations: usize,
    pub mean_ci_width: f64,
}

/// Reduce a batch of trials that share one true parameter and sample size.
///
/// True parameters are compared exactly: the records of one batch are
/// expected to carry the identical value they were generated with.
///
/// # Errors
///
/// - [`InferenceError::EmptyBatch`] for an empty slice.
/// - [`InferenceError::InconsistentBatch`] naming the first record whose
///   `true_param` or `sample_size` differs from the first record's.
pub fn summarize(simulations: &[Simulation]) -> Result<Summary, InferenceError> {
    let first = simulations.first().ok_or(InferenceError::EmptyBatch)?;
    let (true_param, sample_size) = (first.true_param(), first.sample_size());

    if let Some(index) = simulations
        .iter()
        .position(|s| s.true_param() != true_param || s.sample_size() != sample_size)
    {
        return Err(InferenceError::InconsistentBatch { index });
    }

    let n = simulations.len() as f64;
    let mean_of = |f: &dyn Fn(&Simulation) -> f64| simulations.iter().map(f).sum::<f64>() / n;

    Ok(Summary {
        true_param,
        sample_size,
        mean: mean_of(&|s| s.estimated_param()),
        bias: mean_of(&|s| s.deviation()),
        mse: mean_of(&|s| s.deviation().powi(2)),
        coverage_probability: mean_of(&|s| if s.ci_contains_true_param() { 1.0 } else { 0.0 }),
        n_simulations: simulations.len(),
        mean_ci_width: mean_of(&|s| s.ci().width()),
    })
}
