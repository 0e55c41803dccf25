//! Maximum-likelihood estimation with an asymptotic confidence interval.
//!
//! The negative log-likelihood is minimized numerically; the curvature at the
//! optimum (observed information, the reciprocal of the optimizer's inverse
//! Hessian) gives the standard error. The objective is expected to be the
//! *mean* negative log-likelihood per observation, so that
//! `1 / sqrt(n · I_obs)` is the standard error of the estimate, as produced
//! by [`negative_log_likelihood`](crate::stats::a_dist::negative_log_likelihood).

use tracing::debug;

use super::{
    check_sample_size, check_significance, ConfidenceInterval, InferenceError, NumericalFailure,
    Simulation,
};
use crate::optim::{minimize, MinimizeSettings};
use crate::stats::a_dist::negative_log_likelihood;
use crate::stats::{ContinuousDistribution, Normal};

/// Fit by minimizing `nll` from `initial_guess` and build the
/// `1 − alpha` interval `Normal(β̂, 1/√(n·I_obs))` quantiles at `alpha/2` and
/// `1 − alpha/2`.
///
/// `true_param` is only recorded in the returned [`Simulation`].
///
/// # Errors
///
/// - [`InferenceError::InvalidSignificance`] unless `0 < alpha < 1`.
/// - [`InferenceError::InvalidSampleSize`] for `sample_size == 0`.
/// - [`InferenceError::NumericalEstimation`] when the optimizer fails, the
///   estimate is not finite, or the observed information is not positive and
///   finite.
///
/// # Example
///
/// ```
/// use alshenawy::inference::classical;
/// use alshenawy::optim::MinimizeSettings;
///
/// // mean nll of a normal mean with unit variance, centred at 0.3
/// let nll = |m: f64| 0.5 * (m - 0.3).powi(2);
/// let sim = classical::estimate(0.0, nll, 1.0, 100, 0.05, &MinimizeSettings::default()).unwrap();
/// assert!((sim.estimated_param() - 0.3).abs() < 1e-6);
/// // ±1.96 / √100
/// assert!((sim.ci().width() - 2.0 * 0.196).abs() < 1e-3);
/// ```
pub fn estimate(
    true_param: f64,
    nll: impl Fn(f64) -> f64,
    initial_guess: f64,
    sample_size: usize,
    alpha: f64,
    settings: &MinimizeSettings<f64>,
) -> Result<Simulation, InferenceError> {
    let alpha = check_significance(alpha)?;
    let n = check_sample_size(sample_size)?;

    let result = minimize(nll, initial_guess, settings)?;
    let estimate = result.x;
    if !estimate.is_finite() {
        return Err(NumericalFailure::NonFiniteEstimate(estimate).into());
    }

    let observed_information = 1.0 / result.hess_inv;
    if !(observed_information > 0.0 && observed_information.is_finite()) {
        return Err(NumericalFailure::ObservedInformation(observed_information).into());
    }

    let std_error = 1.0 / (n as f64 * observed_information).sqrt();
    let sampling = Normal::new(estimate, std_error)?;
    let ci = ConfidenceInterval::new(
        sampling.quantile(alpha / 2.0),
        sampling.quantile(1.0 - alpha / 2.0),
    )?;

    debug!(
        true_param,
        estimate,
        std_error,
        iterations = result.iterations,
        f_evals = result.f_evals,
        "classical estimate"
    );

    Simulation::new(n, true_param, estimate, ci)
}

/// [`estimate`] on the A distribution's mean negative log-likelihood of
/// `sample`.
pub fn estimate_sample(
    true_param: f64,
    sample: &[f64],
    initial_guess: f64,
    alpha: f64,
    settings: &MinimizeSettings<f64>,
) -> Result<Simulation, InferenceError> {
    let n = check_sample_size(sample.len())?;
    estimate(
        true_param,
        negative_log_likelihood(sample),
        initial_guess,
        n,
        alpha,
        settings,
    )
}
