use rand::rngs::StdRng;
use rand::SeedableRng;

use super::bayesian::{Prior, SamplerSettings};
use super::mcmc::{gelman_rubin, hdi, metropolis, MetropolisSettings};
use super::*;
use crate::optim::{Method, MinimizeSettings, OptimError};
use crate::stats::a_dist;

fn assert_near(a: f64, b: f64, tol: f64, msg: &str) {
    assert!(
        (a - b).abs() < tol,
        "{}: {} vs {} (diff {})",
        msg,
        a,
        b,
        (a - b).abs()
    );
}

fn ci(lower: f64, upper: f64) -> ConfidenceInterval {
    ConfidenceInterval::new(lower, upper).unwrap()
}

// ═══════════════════════════════════════════════════════════════════
// ConfidenceInterval / Simulation
// ═══════════════════════════════════════════════════════════════════

#[test]
fn interval_rejects_reversed_bounds() {
    assert_eq!(
        ConfidenceInterval::new(2.0, 1.0).unwrap_err(),
        InferenceError::InvalidInterval {
            lower: 2.0,
            upper: 1.0
        }
    );
    assert!(ConfidenceInterval::new(f64::NAN, 1.0).is_err());
    assert!(ConfidenceInterval::new(0.0, f64::NAN).is_err());
}

#[test]
fn interval_containment_is_inclusive() {
    let c = ci(1.0, 2.0);
    assert!(c.contains(1.5));
    assert!(!c.contains(0.5));
    assert!(c.contains(1.0));
    assert!(c.contains(2.0));
    assert!(!c.contains(f64::NAN));
    assert_eq!(c.width(), 1.0);

    let point = ci(3.0, 3.0);
    assert!(point.contains(3.0));
    assert_eq!(point.width(), 0.0);
}

#[test]
fn simulation_derived_values() {
    let sim = Simulation::new(10, 2.0, 2.5, ci(2.0, 3.0)).unwrap();
    assert_eq!(sim.deviation(), 0.5);
    assert!(sim.ci_contains_true_param());
    assert_eq!(sim.sample_size(), 10);

    let miss = Simulation::new(10, 2.0, 3.5, ci(3.0, 4.0)).unwrap();
    assert!(!miss.ci_contains_true_param());
}

#[test]
fn simulation_rejects_zero_sample_size() {
    assert_eq!(
        Simulation::new(0, 1.0, 1.0, ci(0.0, 2.0)).unwrap_err(),
        InferenceError::InvalidSampleSize(0)
    );
}

// ═══════════════════════════════════════════════════════════════════
// Summary
// ═══════════════════════════════════════════════════════════════════

#[test]
fn summarize_reference_batch() {
    let sims: Vec<Simulation> = [0.9, 1.0, 1.2]
        .iter()
        .map(|&est| Simulation::new(20, 1.0, est, ci(0.5, 1.5)).unwrap())
        .collect();
    let s = summarize(&sims).unwrap();
    assert_near(s.mean, 1.0333333333333334, 1e-12, "mean");
    assert_near(s.bias, 0.0333333333333333, 1e-12, "bias");
    assert_near(s.mse, 0.0166666666666667, 1e-12, "mse");
    assert_eq!(s.coverage_probability, 1.0);
    assert_eq!(s.n_simulations, 3);
    assert_eq!(s.sample_size, 20);
    assert_eq!(s.true_param, 1.0);
    assert_near(s.mean_ci_width, 1.0, 1e-15, "width");
}

#[test]
fn summarize_partial_coverage() {
    let sims = [
        Simulation::new(5, 2.0, 2.1, ci(1.8, 2.4)).unwrap(),
        Simulation::new(5, 2.0, 2.9, ci(2.5, 3.3)).unwrap(),
        Simulation::new(5, 2.0, 1.7, ci(1.5, 1.9)).unwrap(),
        Simulation::new(5, 2.0, 2.0, ci(2.0, 2.0)).unwrap(),
    ];
    let s = summarize(&sims).unwrap();
    assert_eq!(s.coverage_probability, 0.5);
}

#[test]
fn summarize_single_record() {
    let s = summarize(&[Simulation::new(3, 1.0, 1.5, ci(1.0, 2.0)).unwrap()]).unwrap();
    assert_eq!(s.bias, 0.5);
    assert_eq!(s.mse, 0.25);
}

#[test]
fn summarize_rejects_empty_and_mixed_batches() {
    assert_eq!(summarize(&[]).unwrap_err(), InferenceError::EmptyBatch);

    let mixed_param = [
        Simulation::new(10, 1.0, 1.1, ci(0.9, 1.2)).unwrap(),
        Simulation::new(10, 1.5, 1.4, ci(1.2, 1.6)).unwrap(),
    ];
    assert_eq!(
        summarize(&mixed_param).unwrap_err(),
        InferenceError::InconsistentBatch { index: 1 }
    );

    let mixed_size = [
        Simulation::new(10, 1.0, 1.1, ci(0.9, 1.2)).unwrap(),
        Simulation::new(10, 1.0, 1.0, ci(0.9, 1.2)).unwrap(),
        Simulation::new(20, 1.0, 0.9, ci(0.8, 1.0)).unwrap(),
    ];
    assert_eq!(
        summarize(&mixed_size).unwrap_err(),
        InferenceError::InconsistentBatch { index: 2 }
    );
}

// ═══════════════════════════════════════════════════════════════════
// Classical estimator
// ═══════════════════════════════════════════════════════════════════

#[test]
fn classical_recovers_beta() {
    for method in [Method::Bfgs, Method::Newton] {
        let settings = MinimizeSettings {
            method,
            ..MinimizeSettings::default()
        };
        let mut rng = StdRng::seed_from_u64(2024);
        let sample = a_dist::sample(2.0, 5000, &mut rng).unwrap();
        let sim = classical::estimate_sample(2.0, &sample, 1.0, 0.05, &settings).unwrap();
        assert_near(sim.estimated_param(), 2.0, 0.15, "estimate");
        assert!(sim.ci().width() > 0.0);
        assert!(sim.ci().width() < 0.5);
        assert_eq!(sim.sample_size(), 5000);
    }
}

#[test]
fn classical_interval_is_centred_normal() {
    // mean nll with unit curvature; the interval is est ± z·1/√n
    let nll = |m: f64| 0.5 * (m - 4.0).powi(2);
    let sim = classical::estimate(4.0, nll, 0.0, 25, 0.1, &MinimizeSettings::default()).unwrap();
    let half = 1.6448536269514722 / 5.0;
    assert_near(sim.estimated_param(), 4.0, 1e-6, "estimate");
    assert_near(sim.ci().lower(), 4.0 - half, 1e-4, "lower");
    assert_near(sim.ci().upper(), 4.0 + half, 1e-4, "upper");
    assert!(sim.ci_contains_true_param());
}

#[test]
fn classical_reports_non_positive_curvature() {
    // start on the maximum of a concave objective
    let nll = |b: f64| -(b - 1.0).powi(2);
    let err = classical::estimate(1.0, nll, 1.0, 10, 0.05, &MinimizeSettings::default()).unwrap_err();
    assert!(matches!(
        err,
        InferenceError::NumericalEstimation(NumericalFailure::ObservedInformation(_))
    ));
}

#[test]
fn classical_wraps_optimizer_failure() {
    let settings = MinimizeSettings {
        max_iter: 2,
        ..MinimizeSettings::default()
    };
    let err = classical::estimate(1.0, |b: f64| -b, 1.0, 10, 0.05, &settings).unwrap_err();
    assert_eq!(
        err,
        InferenceError::NumericalEstimation(NumericalFailure::Optimizer(OptimError::MaxIterations))
    );
}

#[test]
fn classical_fails_when_likelihood_peaks_at_zero() {
    // at beta = 0.01 and n = 100 the likelihood often increases toward beta = 0
    let mut rng = StdRng::seed_from_u64(1);
    let sample = a_dist::sample(0.01, 100, &mut rng).unwrap();
    for method in [Method::Bfgs, Method::Newton] {
        let settings = MinimizeSettings {
            method,
            ..MinimizeSettings::default()
        };
        let result = classical::estimate_sample(0.01, &sample, 1.0, 0.05, &settings);
        assert!(
            matches!(result, Err(InferenceError::NumericalEstimation(_))),
            "{method:?}: {result:?}"
        );
    }
}

#[test]
fn classical_validates_inputs() {
    let nll = |b: f64| (b - 1.0).powi(2);
    let s = MinimizeSettings::default();
    for alpha in [0.0, 1.0, -0.1, f64::NAN] {
        assert!(matches!(
            classical::estimate(1.0, nll, 1.0, 10, alpha, &s),
            Err(InferenceError::InvalidSignificance(_))
        ));
    }
    assert_eq!(
        classical::estimate(1.0, nll, 1.0, 0, 0.05, &s).unwrap_err(),
        InferenceError::InvalidSampleSize(0)
    );
    assert_eq!(
        classical::estimate_sample(1.0, &[], 1.0, 0.05, &s).unwrap_err(),
        InferenceError::InvalidSampleSize(0)
    );
}

// ═══════════════════════════════════════════════════════════════════
// MCMC helpers
// ═══════════════════════════════════════════════════════════════════

#[test]
fn hdi_of_known_sample() {
    // a cluster that thins out to the right, then a long tail
    let mut draws: Vec<f64> = (0..90).map(|i| 1.0 + (i * i) as f64 * 1e-4).collect();
    draws.extend((0..10).map(|i| 10.0 + i as f64));
    let (lo, hi) = hdi(&draws, 0.8).unwrap();
    // 81 points; the narrowest window starts at the densest end
    assert_eq!(lo, 1.0);
    assert_near(hi, 1.64, 1e-12, "upper");
}

#[test]
fn hdi_rejects_bad_input() {
    assert!(hdi(&[], 0.9).is_none());
    assert!(hdi(&[1.0, 2.0], 1.0).is_none());
    assert!(hdi(&[1.0, 2.0], 0.0).is_none());
    assert!(hdi(&[1.0, f64::NAN], 0.5).is_none());
}

#[test]
fn hdi_unsorted_input() {
    let draws = [5.0, 1.0, 3.0, 2.0, 4.0];
    // floor(0.5·5) = 2 → windows of three points, all of width 2
    assert_eq!(hdi(&draws, 0.5), Some((1.0, 3.0)));
}

#[test]
fn gelman_rubin_identical_chains() {
    let c: Vec<f64> = (0..100).map(|i| (i as f64).sin()).collect();
    let r = gelman_rubin(&[c.clone(), c]).unwrap();
    assert!(r < 1.0, "R̂ = {r}");
}

#[test]
fn gelman_rubin_separated_chains() {
    let a: Vec<f64> = (0..100).map(|i| (i as f64).sin()).collect();
    let b: Vec<f64> = a.iter().map(|x| x + 10.0).collect();
    assert!(gelman_rubin(&[a, b]).unwrap() > 2.0);
}

#[test]
fn gelman_rubin_needs_two_chains() {
    assert!(gelman_rubin(&[vec![1.0, 2.0]]).is_none());
    assert!(gelman_rubin(&[]).is_none());
    assert!(gelman_rubin(&[vec![1.0, 2.0], vec![1.0]]).is_none());
}

#[test]
fn metropolis_tunes_toward_target() {
    let mut rng = StdRng::seed_from_u64(99);
    let settings = MetropolisSettings {
        draws: 20_000,
        tune: 2000,
        target_accept: 0.44,
        initial_scale: 0.01,
    };
    let chain = metropolis(|x| -0.5 * x * x / 4.0, 0.0, &settings, &mut rng);
    assert_eq!(chain.draws.len(), 20_000);
    assert!(chain.scale > 1.0, "scale = {}", chain.scale);
    assert!(
        (chain.acceptance_rate - 0.44).abs() < 0.1,
        "acceptance = {}",
        chain.acceptance_rate
    );
    let mean = chain.draws.iter().sum::<f64>() / chain.draws.len() as f64;
    let var = chain.draws.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / chain.draws.len() as f64;
    assert!(mean.abs() < 0.2, "mean = {mean}");
    assert!((var - 4.0).abs() < 0.6, "var = {var}");
}

// ═══════════════════════════════════════════════════════════════════
// Bayesian estimator
// ═══════════════════════════════════════════════════════════════════

fn quick_sampler(seed: u64) -> SamplerSettings {
    SamplerSettings {
        draws: 1500,
        tune: 500,
        chains: 2,
        seed,
        ..SamplerSettings::default()
    }
}

#[test]
fn bayesian_recovers_beta_with_gamma_prior() {
    let mut rng = StdRng::seed_from_u64(7);
    let sample = a_dist::sample(1.5, 1000, &mut rng).unwrap();
    let prior = Prior::Gamma {
        shape: 2.0,
        rate: 1.0,
    };
    let sim = bayesian::estimate(1.5, &sample, &prior, 0.05, &quick_sampler(1)).unwrap();
    assert_near(sim.estimated_param(), 1.5, 0.2, "posterior mean");
    assert!(sim.ci().contains(sim.estimated_param()));
    assert!(sim.ci().width() < 0.6);
}

#[test]
fn bayesian_is_reproducible_for_a_seed() {
    let mut rng = StdRng::seed_from_u64(8);
    let sample = a_dist::sample(0.8, 100, &mut rng).unwrap();
    let prior = Prior::Exponential { rate: 1.0 };
    let a = bayesian::estimate(0.8, &sample, &prior, 0.1, &quick_sampler(5)).unwrap();
    let b = bayesian::estimate(0.8, &sample, &prior, 0.1, &quick_sampler(5)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn bayesian_respects_uniform_support() {
    let mut rng = StdRng::seed_from_u64(9);
    let sample = a_dist::sample(1.0, 300, &mut rng).unwrap();
    let prior = Prior::Uniform {
        lower: 0.5,
        upper: 3.0,
    };
    let sim = bayesian::estimate(1.0, &sample, &prior, 0.05, &quick_sampler(2)).unwrap();
    assert!(sim.ci().lower() >= 0.5);
    assert!(sim.ci().upper() <= 3.0);
}

#[test]
fn bayesian_half_normal_prior() {
    let mut rng = StdRng::seed_from_u64(10);
    let sample = a_dist::sample(2.0, 500, &mut rng).unwrap();
    let prior = Prior::HalfNormal { sigma: 5.0 };
    let sim = bayesian::estimate(2.0, &sample, &prior, 0.05, &quick_sampler(3)).unwrap();
    assert_near(sim.estimated_param(), 2.0, 0.4, "posterior mean");
}

#[test]
fn bayesian_validates_inputs() {
    let sample = [0.5, 1.0, 2.0];
    let s = quick_sampler(0);
    assert_eq!(
        bayesian::estimate(1.0, &[], &Prior::default(), 0.05, &s).unwrap_err(),
        InferenceError::InvalidSampleSize(0)
    );
    assert!(matches!(
        bayesian::estimate(1.0, &sample, &Prior::default(), 1.5, &s),
        Err(InferenceError::InvalidSignificance(_))
    ));
    assert!(matches!(
        bayesian::estimate(1.0, &sample, &Prior::Gamma { shape: -1.0, rate: 1.0 }, 0.05, &s),
        Err(InferenceError::InvalidParameter(_))
    ));
    let no_chains = SamplerSettings { chains: 0, ..s };
    assert!(matches!(
        bayesian::estimate(1.0, &sample, &Prior::default(), 0.05, &no_chains),
        Err(InferenceError::InvalidSamplerSettings(_))
    ));
    let no_draws = SamplerSettings { draws: 0, ..s };
    assert!(matches!(
        bayesian::estimate(1.0, &sample, &Prior::default(), 0.05, &no_draws),
        Err(InferenceError::InvalidSamplerSettings(_))
    ));
}

#[test]
fn bayesian_prior_without_positive_support() {
    let sample = [0.5, 1.0, 2.0];
    let prior = Prior::Uniform {
        lower: -3.0,
        upper: -1.0,
    };
    assert!(matches!(
        bayesian::estimate(1.0, &sample, &prior, 0.05, &quick_sampler(0)),
        Err(InferenceError::NumericalEstimation(NumericalFailure::InitialPoint(_)))
    ));
}

#[test]
fn prior_serde_shape() {
    let p: Prior = serde_json::from_str(r#"{"family":"half_normal","sigma":2.0}"#).unwrap();
    assert_eq!(p, Prior::HalfNormal { sigma: 2.0 });
    assert!((p.ln_pdf(1.0).unwrap() - (-0.125 + (2.0 / core::f64::consts::PI).sqrt().ln() - 2.0_f64.ln())).abs() < 1e-12);
}

// ═══════════════════════════════════════════════════════════════════
// Error type tests
// ═══════════════════════════════════════════════════════════════════

#[test]
fn error_display() {
    assert_eq!(
        InferenceError::EmptyBatch.to_string(),
        "cannot summarize an empty batch"
    );
    assert_eq!(
        InferenceError::from(OptimError::LineSearchFailed).to_string(),
        "numerical estimation failed: line search failed"
    );
}
