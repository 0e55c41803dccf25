//! Monte-Carlo evaluation of the estimators.
//!
//! A [`Study`] is a grid of true parameters × sample sizes. Each cell runs a
//! number of independent trials: draw a sample at the cell's β, estimate β,
//! and record a [`Simulation`]. The trials of a cell are reduced with
//! [`summarize`] into a [`CellReport`].
//!
//! Every trial seeds its own [`StdRng`] from the study seed, the cell index
//! and the trial index, so a study's output depends only on its
//! configuration and never on thread scheduling.

#[cfg(test)]
mod tests;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::inference::bayesian::{self, Prior, SamplerSettings};
use crate::inference::{classical, summarize, InferenceError, Simulation, Summary};
use crate::optim::MinimizeSettings;
use crate::stats::a_dist;

/// What to do with a trial whose estimation fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop the study and return the error.
    #[default]
    Abort,
    /// Drop the trial and count it in [`CellReport::failures`].
    Skip,
}

/// The estimator run in every trial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Estimator {
    Classical {
        initial_guess: f64,
        settings: MinimizeSettings<f64>,
    },
    Bayesian {
        prior: Prior,
        settings: SamplerSettings,
    },
}

impl Estimator {
    fn run(
        &self,
        true_param: f64,
        sample: &[f64],
        alpha: f64,
        seed: u64,
    ) -> Result<Simulation, InferenceError> {
        match self {
            Estimator::Classical {
                initial_guess,
                settings,
            } => classical::estimate_sample(true_param, sample, *initial_guess, alpha, settings),
            Estimator::Bayesian { prior, settings } => {
                let settings = SamplerSettings { seed, ..*settings };
                bayesian::estimate(true_param, sample, prior, alpha, &settings)
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Estimator::Classical { .. } => "classical",
            Estimator::Bayesian { .. } => "bayesian",
        }
    }
}

/// A simulation study over a grid of (true parameter, sample size) cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Study {
    pub true_params: Vec<f64>,
    pub sample_sizes: Vec<usize>,
    /// Trials per cell.
    pub trials: usize,
    /// Significance level of every interval.
    pub alpha: f64,
    pub seed: u64,
    pub failure_policy: FailurePolicy,
}

/// Result for one grid cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellReport {
    pub summary: Summary,
    /// Trials dropped under [`FailurePolicy::Skip`].
    pub failures: usize,
}

/// Errors from running a study.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StudyError {
    #[error("study has no {0}")]
    EmptyGrid(&'static str),
    #[error("invalid true parameter {0}")]
    InvalidTrueParam(f64),
    #[error("significance level must be in (0, 1), got {0}")]
    InvalidSignificance(f64),
    #[error("trial {trial} of cell (beta = {true_param}, n = {sample_size}) failed: {source}")]
    Trial {
        true_param: f64,
        sample_size: usize,
        trial: usize,
        #[source]
        source: InferenceError,
    },
    /// Every trial of a cell failed under [`FailurePolicy::Skip`].
    #[error("all {trials} trials of cell (beta = {true_param}, n = {sample_size}) failed")]
    AllTrialsFailed {
        true_param: f64,
        sample_size: usize,
        trials: usize,
    },
}

impl Study {
    /// Cells in row-major order: true parameters outer, sample sizes inner.
    pub fn cells(&self) -> impl Iterator<Item = (f64, usize)> + '_ {
        self.true_params
            .iter()
            .flat_map(move |&b| self.sample_sizes.iter().map(move |&n| (b, n)))
    }

    fn validate(&self) -> Result<(), StudyError> {
        if self.true_params.is_empty() {
            return Err(StudyError::EmptyGrid("true parameters"));
        }
        if self.sample_sizes.is_empty() {
            return Err(StudyError::EmptyGrid("sample sizes"));
        }
        if self.trials == 0 {
            return Err(StudyError::EmptyGrid("trials"));
        }
        if let Some(&b) = self.true_params.iter().find(|b| !(**b > 0.0 && b.is_finite())) {
            return Err(StudyError::InvalidTrueParam(b));
        }
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(StudyError::InvalidSignificance(self.alpha));
        }
        Ok(())
    }

    /// Run every cell with `estimator` and return one report per cell, in
    /// [`cells`](Self::cells) order.
    ///
    /// # Example
    ///
    /// ```
    /// use alshenawy::montecarlo::{Estimator, FailurePolicy, Study};
    /// use alshenawy::optim::MinimizeSettings;
    ///
    /// let study = Study {
    ///     true_params: vec![1.0],
    ///     sample_sizes: vec![200],
    ///     trials: 20,
    ///     alpha: 0.05,
    ///     seed: 1,
    ///     failure_policy: FailurePolicy::Skip,
    /// };
    /// let estimator = Estimator::Classical {
    ///     initial_guess: 1.0,
    ///     settings: MinimizeSettings::default(),
    /// };
    /// let reports = study.run(&estimator).unwrap();
    /// assert_eq!(reports.len(), 1);
    /// assert!(reports[0].summary.bias.abs() < 0.2);
    /// ```
    pub fn run(&self, estimator: &Estimator) -> Result<Vec<CellReport>, StudyError> {
        self.validate()?;
        info!(
            estimator = estimator.name(),
            cells = self.true_params.len() * self.sample_sizes.len(),
            trials = self.trials,
            "starting study"
        );
        self.cells()
            .enumerate()
            .map(|(cell, (true_param, sample_size))| {
                self.run_cell(estimator, cell, true_param, sample_size)
            })
            .collect()
    }

    fn run_cell(
        &self,
        estimator: &Estimator,
        cell: usize,
        true_param: f64,
        sample_size: usize,
    ) -> Result<CellReport, StudyError> {
        let trial = |t: usize| -> Result<Simulation, InferenceError> {
            let seed = trial_seed(self.seed, cell, t);
            let mut rng = StdRng::seed_from_u64(seed);
            let sample = a_dist::sample(true_param, sample_size, &mut rng)?;
            let sim = estimator.run(true_param, &sample, self.alpha, seed)?;
            debug!(
                cell,
                trial = t,
                estimate = sim.estimated_param(),
                covered = sim.ci_contains_true_param(),
                "trial finished"
            );
            Ok(sim)
        };

        #[cfg(feature = "parallel")]
        let outcomes: Vec<Result<Simulation, InferenceError>> =
            (0..self.trials).into_par_iter().map(trial).collect();
        #[cfg(not(feature = "parallel"))]
        let outcomes: Vec<Result<Simulation, InferenceError>> =
            (0..self.trials).map(trial).collect();

        let mut simulations = Vec::with_capacity(outcomes.len());
        let mut failures = 0usize;
        for (t, outcome) in outcomes.into_iter().enumerate() {
            match outcome {
                Ok(sim) => simulations.push(sim),
                Err(source) => match self.failure_policy {
                    FailurePolicy::Abort => {
                        return Err(StudyError::Trial {
                            true_param,
                            sample_size,
                            trial: t,
                            source,
                        })
                    }
                    FailurePolicy::Skip => {
                        warn!(cell, trial = t, error = %source, "skipping failed trial");
                        failures += 1;
                    }
                },
            }
        }

        let summary = summarize(&simulations).map_err(|_| StudyError::AllTrialsFailed {
            true_param,
            sample_size,
            trials: self.trials,
        })?;

        info!(
            true_param,
            sample_size,
            bias = summary.bias,
            mse = summary.mse,
            coverage = summary.coverage_probability,
            failures,
            "cell finished"
        );

        Ok(CellReport { summary, failures })
    }
}

/// Deterministic per-trial seed: splitmix64 over the study seed, cell and
/// trial indices.
fn trial_seed(seed: u64, cell: usize, trial: usize) -> u64 {
    let mut z = seed
        ^ (cell as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ (trial as u64).wrapping_mul(0xC2B2_AE3D_27D4_EB4F);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
