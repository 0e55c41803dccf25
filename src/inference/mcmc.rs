//! Random-walk Metropolis sampling and posterior summaries.
//!
//! [`metropolis`] draws one chain from an unnormalized log density on the
//! real line. The proposal is Gaussian; during the tuning phase its scale is
//! adapted by a Robbins–Monro recursion on `ln σ` so that the acceptance
//! probability approaches the requested target. Tuning draws are discarded.
//!
//! [`hdi`] and [`gelman_rubin`] summarize the draws.

use rand::distributions::{Distribution, Open01};
use rand::Rng;
use rand_distr::StandardNormal;

/// Settings for a single Metropolis chain.
#[derive(Debug, Clone, Copy)]
pub struct MetropolisSettings {
    /// Retained draws.
    pub draws: usize,
    /// Adaptation steps before the retained draws.
    pub tune: usize,
    /// Target mean acceptance probability during tuning.
    pub target_accept: f64,
    /// Starting proposal standard deviation.
    pub initial_scale: f64,
}

impl Default for MetropolisSettings {
    fn default() -> Self {
        Self {
            draws: 1000,
            tune: 1000,
            target_accept: 0.44,
            initial_scale: 0.5,
        }
    }
}

/// One chain of retained draws.
#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    pub draws: Vec<f64>,
    /// Fraction of accepted proposals among the retained draws.
    pub acceptance_rate: f64,
    /// Proposal scale after tuning.
    pub scale: f64,
}

/// Run a random-walk Metropolis chain on `log_target` from `x0`.
///
/// `log_target` may return `-∞` (or NaN) to reject a point outright. The
/// caller is responsible for a finite `log_target(x0)`.
///
/// # Example
///
/// ```
/// use alshenawy::inference::mcmc::{metropolis, MetropolisSettings};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut rng = StdRng::seed_from_u64(1);
/// let settings = MetropolisSettings { draws: 20_000, ..Default::default() };
/// // standard normal target
/// let chain = metropolis(|x| -0.5 * x * x, 3.0, &settings, &mut rng);
/// let mean = chain.draws.iter().sum::<f64>() / chain.draws.len() as f64;
/// assert!(mean.abs() < 0.1);
/// ```
pub fn metropolis<R: Rng + ?Sized>(
    log_target: impl Fn(f64) -> f64,
    x0: f64,
    settings: &MetropolisSettings,
    rng: &mut R,
) -> Chain {
    let mut x = x0;
    let mut lp = log_target(x);
    let mut ln_scale = settings.initial_scale.ln();
    let mut draws = Vec::with_capacity(settings.draws);
    let mut accepted = 0usize;

    for step in 0..settings.tune + settings.draws {
        let scale = ln_scale.exp();
        let z: f64 = rng.sample(StandardNormal);
        let proposal = x + scale * z;
        let lp_new = log_target(proposal);

        let log_ratio = lp_new - lp;
        let accept_prob = if log_ratio.is_nan() {
            0.0
        } else {
            log_ratio.min(0.0).exp()
        };
        let u: f64 = Open01.sample(rng);
        let accept = u < accept_prob;
        if accept {
            x = proposal;
            lp = lp_new;
        }

        if step < settings.tune {
            let gain = ((step + 1) as f64).powf(-0.6);
            ln_scale += gain * (accept_prob - settings.target_accept);
        } else {
            draws.push(x);
            if accept {
                accepted += 1;
            }
        }
    }

    let acceptance_rate = if settings.draws == 0 {
        0.0
    } else {
        accepted as f64 / settings.draws as f64
    };

    Chain {
        draws,
        acceptance_rate,
        scale: ln_scale.exp(),
    }
}

/// Highest-density interval: the narrowest window of the sorted draws that
/// spans `⌊prob·n⌋ + 1` of them.
///
/// Returns `None` for an empty slice, NaN draws, or `prob` outside (0, 1).
///
/// # Example
///
/// ```
/// use alshenawy::inference::mcmc::hdi;
///
/// let draws: Vec<f64> = (0..=100).map(f64::from).collect();
/// let (lo, hi) = hdi(&draws, 0.5).unwrap();
/// assert_eq!(hi - lo, 50.0);
/// ```
pub fn hdi(draws: &[f64], prob: f64) -> Option<(f64, f64)> {
    if draws.is_empty() || !(prob > 0.0 && prob < 1.0) || draws.iter().any(|d| d.is_nan()) {
        return None;
    }
    let mut sorted = draws.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    let inc = (prob * n as f64).floor() as usize;
    let windows = n - inc;

    let (start, _) = (0..windows)
        .map(|i| (i, sorted[i + inc] - sorted[i]))
        .fold((0, f64::INFINITY), |best, cur| if cur.1 < best.1 { cur } else { best });

    Some((sorted[start], sorted[start + inc]))
}

/// Gelman–Rubin potential scale reduction factor R̂.
///
/// Needs at least two chains of equal length ≥ 2 with non-zero within-chain
/// variance; `None` otherwise.
pub fn gelman_rubin(chains: &[Vec<f64>]) -> Option<f64> {
    let m = chains.len();
    let n = chains.first()?.len();
    if m < 2 || n < 2 || chains.iter().any(|c| c.len() != n) {
        return None;
    }
    let nf = n as f64;
    let mf = m as f64;

    let means: Vec<f64> = chains.iter().map(|c| c.iter().sum::<f64>() / nf).collect();
    let grand = means.iter().sum::<f64>() / mf;

    let within = chains
        .iter()
        .zip(&means)
        .map(|(c, mean)| c.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (nf - 1.0))
        .sum::<f64>()
        / mf;
    if within <= 0.0 {
        return None;
    }
    let between = nf * means.iter().map(|mu| (mu - grand).powi(2)).sum::<f64>() / (mf - 1.0);

    let pooled = (nf - 1.0) / nf * within + between / nf;
    Some((pooled / within).sqrt())
}
