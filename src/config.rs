//! Study configuration loaded from TOML.
//!
//! Every section and every field is optional; missing values take the
//! defaults shown by [`SimConfig::default_toml`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::inference::bayesian::{Prior, SamplerSettings};
use crate::montecarlo::{Estimator, FailurePolicy, Study};
use crate::optim::{Method, MinimizeSettings};

/// Errors reading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SimConfig {
    #[serde(default)]
    pub study: StudyConfig,
    #[serde(default)]
    pub optimizer: OptimizerConfig,
    #[serde(default)]
    pub sampler: SamplerSettings,
    #[serde(default)]
    pub prior: Prior,
}

/// The `[study]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyConfig {
    #[serde(default = "default_true_params")]
    pub true_params: Vec<f64>,
    #[serde(default = "default_sample_sizes")]
    pub sample_sizes: Vec<usize>,
    /// Trials per (true parameter, sample size) cell
    #[serde(default = "default_trials")]
    pub trials: usize,
    /// Significance level; intervals have level 1 - alpha
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub failure_policy: FailurePolicy,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            true_params: default_true_params(),
            sample_sizes: default_sample_sizes(),
            trials: default_trials(),
            alpha: default_alpha(),
            seed: 0,
            failure_policy: FailurePolicy::default(),
        }
    }
}

fn default_true_params() -> Vec<f64> {
    vec![0.5, 1.0, 2.0]
}
fn default_sample_sizes() -> Vec<usize> {
    vec![20, 50, 100, 500]
}
fn default_trials() -> usize {
    1000
}
fn default_alpha() -> f64 {
    0.05
}

/// The `[optimizer]` section for the classical estimator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizerConfig {
    #[serde(default)]
    pub method: Method,
    /// Starting point of the likelihood maximization
    #[serde(default = "default_initial_guess")]
    pub initial_guess: f64,
    #[serde(default = "default_grad_tol")]
    pub grad_tol: f64,
    #[serde(default = "default_f_tol")]
    pub f_tol: f64,
    #[serde(default = "default_x_tol")]
    pub x_tol: f64,
    #[serde(default = "default_max_iter")]
    pub max_iter: usize,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            method: Method::default(),
            initial_guess: default_initial_guess(),
            grad_tol: default_grad_tol(),
            f_tol: default_f_tol(),
            x_tol: default_x_tol(),
            max_iter: default_max_iter(),
        }
    }
}

fn default_initial_guess() -> f64 {
    1.0
}
fn default_grad_tol() -> f64 {
    1e-8
}
fn default_f_tol() -> f64 {
    1e-12
}
fn default_x_tol() -> f64 {
    1e-12
}
fn default_max_iter() -> usize {
    200
}

impl OptimizerConfig {
    pub fn settings(&self) -> MinimizeSettings<f64> {
        MinimizeSettings {
            grad_tol: self.grad_tol,
            f_tol: self.f_tol,
            x_tol: self.x_tol,
            max_iter: self.max_iter,
            method: self.method,
            ..MinimizeSettings::default()
        }
    }
}

/// Which estimator a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimatorKind {
    Classical,
    Bayesian,
}

impl SimConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }

    pub fn study(&self) -> Study {
        Study {
            true_params: self.study.true_params.clone(),
            sample_sizes: self.study.sample_sizes.clone(),
            trials: self.study.trials,
            alpha: self.study.alpha,
            seed: self.study.seed,
            failure_policy: self.study.failure_policy,
        }
    }

    pub fn estimator(&self, kind: EstimatorKind) -> Estimator {
        match kind {
            EstimatorKind::Classical => Estimator::Classical {
                initial_guess: self.optimizer.initial_guess,
                settings: self.optimizer.settings(),
            },
            EstimatorKind::Bayesian => Estimator::Bayesian {
                prior: self.prior,
                settings: self.sampler,
            },
        }
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# Alshenawy A-distribution simulation study

[study]
# True values of beta to simulate at
true_params = [0.5, 1.0, 2.0]
# Sample sizes per trial
sample_sizes = [20, 50, 100, 500]
# Trials per (true_params, sample_sizes) cell
trials = 1000
# Significance level; intervals have level 1 - alpha
alpha = 0.05
seed = 0
# What to do when a trial fails: "abort" or "skip"
failure_policy = "abort"

[optimizer]
# Classical estimator: "bfgs" or "newton"
method = "bfgs"
initial_guess = 1.0
grad_tol = 1e-8
f_tol = 1e-12
x_tol = 1e-12
max_iter = 200

[sampler]
# Bayesian estimator: retained draws per chain
draws = 1000
chains = 4
# Adaptation steps per chain, discarded
tune = 1000
target_accept = 0.44
seed = 0

[prior]
# "gamma" (shape, rate), "exponential" (rate),
# "uniform" (lower, upper) or "half_normal" (sigma)
family = "gamma"
shape = 2.0
rate = 1.0
"#
        .to_string()
    }
}
