//! # alshenawy
//!
//! Alshenawy's A distribution, estimators for its shape parameter, and a
//! Monte-Carlo harness that measures how well those estimators work.
//!
//! ## Quick start
//!
//! ```
//! use alshenawy::inference::classical;
//! use alshenawy::optim::MinimizeSettings;
//! use alshenawy::stats::a_dist;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let sample = a_dist::sample(2.0, 500, &mut rng).unwrap();
//! let sim = classical::estimate_sample(2.0, &sample, 1.0, 0.05, &MinimizeSettings::default())
//!     .unwrap();
//! assert!((sim.estimated_param() - 2.0).abs() < 0.5);
//! ```
//!
//! ## Modules
//!
//! - [`stats`]: the A distribution ([`stats::Alshenawy`] and free functions
//!   `pdf`, `cdf`, `log_pdf`, `log_cdf`, `quantile`, `sample` in
//!   [`stats::a_dist`]), the Normal law used for asymptotic intervals, the
//!   Gamma / Exponential / Uniform / HalfNormal priors, and a one-sample
//!   Kolmogorov–Smirnov test.
//!
//! - [`special`]: `lgamma`, regularized incomplete gamma, `erf` / `erfc`.
//!
//! - [`optim`]: scalar BFGS and Newton minimization with finite-difference
//!   derivatives, reporting the inverse curvature at the optimum.
//!
//! - [`inference`]: [`inference::ConfidenceInterval`] and
//!   [`inference::Simulation`] records, the classical (maximum-likelihood)
//!   and Bayesian (Metropolis) estimators, and [`inference::summarize`].
//!
//! - [`montecarlo`]: grids of (β, n) cells run trial by trial, in parallel
//!   with the `parallel` feature.
//!
//! - `config`: TOML study configuration (requires the `cli` feature).
//!
//! - [`traits`]: [`FloatScalar`], the `f32`/`f64` bound of the numeric code.
//!
//! ## Cargo features
//!
//! | Feature    | Default | Description |
//! |------------|---------|-------------|
//! | `parallel` | yes     | Run trials and MCMC chains on the rayon thread pool |
//! | `cli`      | yes     | TOML configuration and the `alshenawy-sim` binary |

#[cfg(feature = "cli")]
pub mod config;
pub mod inference;
pub mod montecarlo;
pub mod optim;
pub mod special;
pub mod stats;
pub mod traits;

pub use traits::{FloatScalar, Scalar};
