//! Posterior estimation of β by Markov chain Monte Carlo.
//!
//! The posterior `p(β | x) ∝ L(β; x) · π(β)` is sampled on the unconstrained
//! scale θ = ln β, where the target picks up the log-Jacobian θ. Several
//! independent Metropolis chains are run, each seeded from the configured
//! seed and its chain index; their draws are pooled and mapped back to β.
//! The estimate is the posterior mean and the interval is the
//! highest-density interval at level `1 − alpha`.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::mcmc::{gelman_rubin, hdi, metropolis, Chain, MetropolisSettings};
use super::{
    check_sample_size, check_significance, ConfidenceInterval, InferenceError, NumericalFailure,
    Simulation,
};
use crate::stats::{
    Alshenawy, ContinuousDistribution, Exponential, Gamma, HalfNormal, Moments, StatsError,
    Uniform,
};

/// R̂ above this is reported as poor mixing.
const RHAT_WARN: f64 = 1.05;

/// Prior over β.
///
/// In configuration files the family is given by the `family` key:
///
/// ```toml
/// [prior]
/// family = "gamma"
/// shape = 2.0
/// rate = 1.0
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum Prior {
    Gamma { shape: f64, rate: f64 },
    Exponential { rate: f64 },
    Uniform { lower: f64, upper: f64 },
    HalfNormal { sigma: f64 },
}

impl Default for Prior {
    fn default() -> Self {
        Prior::Gamma {
            shape: 2.0,
            rate: 1.0,
        }
    }
}

/// A prior with validated hyperparameters.
#[derive(Debug, Clone, Copy)]
enum PriorDensity {
    Gamma(Gamma<f64>),
    Exponential(Exponential<f64>),
    Uniform(Uniform<f64>),
    HalfNormal(HalfNormal<f64>),
}

impl Prior {
    fn density(&self) -> Result<PriorDensity, StatsError> {
        Ok(match *self {
            Prior::Gamma { shape, rate } => PriorDensity::Gamma(Gamma::new(shape, rate)?),
            Prior::Exponential { rate } => PriorDensity::Exponential(Exponential::new(rate)?),
            Prior::Uniform { lower, upper } => PriorDensity::Uniform(Uniform::new(lower, upper)?),
            Prior::HalfNormal { sigma } => PriorDensity::HalfNormal(HalfNormal::new(sigma)?),
        })
    }

    /// Log density at `beta`, or an error for invalid hyperparameters.
    pub fn ln_pdf(&self, beta: f64) -> Result<f64, StatsError> {
        Ok(self.density()?.ln_pdf(beta))
    }
}

impl PriorDensity {
    fn ln_pdf(&self, beta: f64) -> f64 {
        match self {
            PriorDensity::Gamma(d) => d.ln_pdf(beta),
            PriorDensity::Exponential(d) => d.ln_pdf(beta),
            PriorDensity::Uniform(d) => d.ln_pdf(beta),
            PriorDensity::HalfNormal(d) => d.ln_pdf(beta),
        }
    }

    /// Starting point for the chains: the prior mean if it lies in (0, ∞).
    fn initial_point(&self) -> f64 {
        let mean = match self {
            PriorDensity::Gamma(d) => d.mean(),
            PriorDensity::Exponential(d) => d.mean(),
            PriorDensity::Uniform(d) => d.mean(),
            PriorDensity::HalfNormal(d) => d.mean(),
        };
        if mean > 0.0 && mean.is_finite() {
            mean
        } else {
            1.0
        }
    }
}

/// Sampler configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerSettings {
    /// Retained draws per chain.
    pub draws: usize,
    pub chains: usize,
    /// Adaptation steps per chain, discarded.
    pub tune: usize,
    /// Acceptance probability the proposal scale is tuned toward.
    pub target_accept: f64,
    pub seed: u64,
}

impl Default for SamplerSettings {
    fn default() -> Self {
        Self {
            draws: 1000,
            chains: 4,
            tune: 1000,
            target_accept: 0.44,
            seed: 0,
        }
    }
}

impl SamplerSettings {
    fn validate(&self) -> Result<(), InferenceError> {
        if self.draws == 0 {
            return Err(InferenceError::InvalidSamplerSettings("draws must be positive"));
        }
        if self.chains == 0 {
            return Err(InferenceError::InvalidSamplerSettings("chains must be positive"));
        }
        if !(self.target_accept > 0.0 && self.target_accept < 1.0) {
            return Err(InferenceError::InvalidSamplerSettings(
                "target_accept must lie in (0, 1)",
            ));
        }
        Ok(())
    }

    fn chain_settings(&self) -> MetropolisSettings {
        MetropolisSettings {
            draws: self.draws,
            tune: self.tune,
            target_accept: self.target_accept,
            ..MetropolisSettings::default()
        }
    }
}

/// Estimate β from `sample` under `prior`.
///
/// `true_param` is only recorded in the returned [`Simulation`].
///
/// # Errors
///
/// - [`InferenceError::InvalidSampleSize`] for an empty sample.
/// - [`InferenceError::InvalidSignificance`] unless `0 < alpha < 1`.
/// - [`InferenceError::InvalidParameter`] for invalid prior hyperparameters.
/// - [`InferenceError::InvalidSamplerSettings`] for zero draws or chains.
/// - [`InferenceError::NumericalEstimation`] if the log posterior is not
///   finite at the initial point or the draws yield no interval.
///
/// # Example
///
/// ```
/// use alshenawy::inference::bayesian::{estimate, Prior, SamplerSettings};
/// use alshenawy::stats::a_dist;
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut rng = StdRng::seed_from_u64(3);
/// let sample = a_dist::sample(1.5, 200, &mut rng).unwrap();
/// let settings = SamplerSettings { draws: 500, tune: 500, chains: 2, ..Default::default() };
/// let sim = estimate(1.5, &sample, &Prior::default(), 0.05, &settings).unwrap();
/// assert!(sim.ci().lower() < sim.estimated_param());
/// assert!(sim.estimated_param() < sim.ci().upper());
/// ```
pub fn estimate(
    true_param: f64,
    sample: &[f64],
    prior: &Prior,
    alpha: f64,
    settings: &SamplerSettings,
) -> Result<Simulation, InferenceError> {
    let n = check_sample_size(sample.len())?;
    let alpha = check_significance(alpha)?;
    let prior = prior.density()?;
    settings.validate()?;

    let log_posterior = |theta: f64| -> f64 {
        let beta = theta.exp();
        match Alshenawy::new(beta) {
            Ok(dist) => dist.log_likelihood(sample) + prior.ln_pdf(beta) + theta,
            Err(_) => f64::NEG_INFINITY,
        }
    };

    let beta0 = prior.initial_point();
    let theta0 = beta0.ln();
    if !log_posterior(theta0).is_finite() {
        return Err(NumericalFailure::InitialPoint(beta0).into());
    }

    let chain_settings = settings.chain_settings();
    let run_chain = |chain: usize| -> Chain {
        let mut rng = StdRng::seed_from_u64(settings.seed.wrapping_add(chain as u64));
        metropolis(&log_posterior, theta0, &chain_settings, &mut rng)
    };

    #[cfg(feature = "parallel")]
    let chains: Vec<Chain> = (0..settings.chains).into_par_iter().map(run_chain).collect();
    #[cfg(not(feature = "parallel"))]
    let chains: Vec<Chain> = (0..settings.chains).map(run_chain).collect();

    let betas: Vec<Vec<f64>> = chains
        .iter()
        .map(|c| c.draws.iter().map(|t| t.exp()).collect())
        .collect();
    report_diagnostics(&chains, &betas);

    let pooled: Vec<f64> = betas.into_iter().flatten().collect();
    let estimate = pooled.iter().sum::<f64>() / pooled.len() as f64;
    if !estimate.is_finite() {
        return Err(NumericalFailure::NonFiniteEstimate(estimate).into());
    }
    let (lower, upper) =
        hdi(&pooled, 1.0 - alpha).ok_or(NumericalFailure::NonFiniteEstimate(estimate))?;
    let ci = ConfidenceInterval::new(lower, upper)?;

    debug!(true_param, estimate, lower, upper, "bayesian estimate");

    Simulation::new(n, true_param, estimate, ci)
}

fn report_diagnostics(chains: &[Chain], betas: &[Vec<f64>]) {
    for (i, chain) in chains.iter().enumerate() {
        debug!(
            chain = i,
            acceptance_rate = chain.acceptance_rate,
            scale = chain.scale,
            "chain finished"
        );
    }
    if let Some(rhat) = gelman_rubin(betas) {
        if rhat > RHAT_WARN {
            warn!(rhat, "chains have not mixed");
        } else {
            debug!(rhat, "chains mixed");
        }
    }
}
