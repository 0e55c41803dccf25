use alshenawy::inference::bayesian::{self, Prior, SamplerSettings};
use alshenawy::inference::{classical, summarize, InferenceError, Simulation};
use alshenawy::montecarlo::{Estimator, FailurePolicy, Study};
use alshenawy::optim::{Method, MinimizeSettings};
use alshenawy::stats::{a_dist, ks_test, Alshenawy, ContinuousDistribution, StatsError};
use rand::rngs::StdRng;
use rand::SeedableRng;

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

// ── Distribution through the public API ──────────────────────────────

#[test]
fn sampler_passes_ks_at_several_betas() {
    for (i, &beta) in [0.2, 1.0, 4.0].iter().enumerate() {
        let mut rng = StdRng::seed_from_u64(100 + i as u64);
        let draws = a_dist::sample(beta, 20_000, &mut rng).unwrap();
        let ks = ks_test(&draws, |x| a_dist::cdf(x, beta).unwrap_or(f64::NAN));
        assert!(!ks.rejects(0.01), "beta = {beta}: p = {}", ks.p_value);
    }
}

#[test]
fn sample_median_matches_quantile() {
    let beta = 1.3;
    let mut rng = StdRng::seed_from_u64(5);
    let mut draws = a_dist::sample(beta, 40_001, &mut rng).unwrap();
    draws.sort_by(f64::total_cmp);
    let median = draws[20_000];
    let q = a_dist::quantile(0.5, beta).unwrap();
    assert!((median - q).abs() / q < 0.03, "median {median} vs Q(0.5) {q}");
}

#[test]
fn invalid_beta_everywhere() {
    for beta in [0.0, -1.0] {
        let err = StatsError::InvalidParameter { name: "beta", value: beta };
        assert_eq!(a_dist::pdf(1.0, beta), Err(err));
        assert_eq!(a_dist::cdf(1.0, beta), Err(err));
        assert_eq!(a_dist::log_pdf(1.0, beta), Err(err));
        assert_eq!(a_dist::log_cdf(1.0, beta), Err(err));
        assert_eq!(a_dist::quantile(0.5, beta), Err(err));
    }
}

#[test]
fn likelihood_peaks_near_truth() {
    let mut rng = StdRng::seed_from_u64(77);
    let sample = a_dist::sample(3.0, 4000, &mut rng).unwrap();
    let at = |b: f64| a_dist::log_likelihood(&sample, b).unwrap();
    assert!(at(3.0) > at(2.0));
    assert!(at(3.0) > at(4.5));
}

// ── Estimation pipeline ──────────────────────────────────────────────

#[test]
fn classical_and_bayesian_agree_on_large_sample() {
    let mut rng = StdRng::seed_from_u64(31);
    let sample = a_dist::sample(0.7, 3000, &mut rng).unwrap();

    let mle = classical::estimate_sample(0.7, &sample, 1.0, 0.05, &MinimizeSettings::default())
        .unwrap();
    let settings = SamplerSettings {
        draws: 2000,
        tune: 1000,
        chains: 2,
        seed: 9,
        ..SamplerSettings::default()
    };
    let post = bayesian::estimate(0.7, &sample, &Prior::Exponential { rate: 0.5 }, 0.05, &settings)
        .unwrap();

    assert_near(mle.estimated_param(), post.estimated_param(), 0.05, "mle vs posterior mean");
    let w = mle.ci().width();
    assert!((post.ci().width() - w).abs() < 0.5 * w, "interval widths {w} vs {}", post.ci().width());
}

#[test]
fn newton_and_bfgs_find_the_same_mle() {
    let mut rng = StdRng::seed_from_u64(12);
    let sample = a_dist::sample(1.8, 800, &mut rng).unwrap();
    let fit = |method| {
        let settings = MinimizeSettings {
            method,
            ..MinimizeSettings::default()
        };
        classical::estimate_sample(1.8, &sample, 1.0, 0.05, &settings).unwrap()
    };
    let bfgs = fit(Method::Bfgs);
    let newton = fit(Method::Newton);
    assert_near(bfgs.estimated_param(), newton.estimated_param(), 1e-5, "estimates");
    assert_near(bfgs.ci().width(), newton.ci().width(), 0.05 * newton.ci().width(), "widths");
}

#[test]
fn mle_score_is_zero() {
    // the likelihood equation holds at the estimate
    let mut rng = StdRng::seed_from_u64(13);
    let sample = a_dist::sample(2.5, 1000, &mut rng).unwrap();
    let sim = classical::estimate_sample(2.5, &sample, 1.0, 0.05, &MinimizeSettings::default())
        .unwrap();
    let b = sim.estimated_param();
    let h = 1e-5;
    let score = (a_dist::log_likelihood(&sample, b + h).unwrap()
        - a_dist::log_likelihood(&sample, b - h).unwrap())
        / (2.0 * h);
    assert!(score.abs() / (sample.len() as f64) < 1e-5, "score = {score}");
}

#[test]
fn summaries_from_hand_built_trials() {
    let dist = Alshenawy::new(1.0).unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    let sims: Vec<Simulation> = (0..50)
        .map(|_| {
            let sample = a_dist::sample(1.0, 100, &mut rng).unwrap();
            classical::estimate_sample(1.0, &sample, dist.quantile(0.5), 0.05, &MinimizeSettings::default())
                .unwrap()
        })
        .collect();
    let s = summarize(&sims).unwrap();
    assert_eq!(s.n_simulations, 50);
    assert!(s.mse >= s.bias * s.bias);
    assert!(s.coverage_probability > 0.8);

    let mut mixed = sims.clone();
    mixed.push(
        Simulation::new(100, 2.0, 2.0, sims[0].ci()).unwrap(),
    );
    assert_eq!(
        summarize(&mixed).unwrap_err(),
        InferenceError::InconsistentBatch { index: 50 }
    );
}

// ── Harness ──────────────────────────────────────────────────────────

#[test]
fn study_mse_shrinks_with_sample_size() {
    let study = Study {
        true_params: vec![1.5],
        sample_sizes: vec![30, 1000],
        trials: 60,
        alpha: 0.05,
        seed: 2,
        failure_policy: FailurePolicy::Skip,
    };
    let estimator = Estimator::Classical {
        initial_guess: 1.0,
        settings: MinimizeSettings::default(),
    };
    let reports = study.run(&estimator).unwrap();
    assert!(reports[1].summary.mse < reports[0].summary.mse);
    assert!(reports[1].summary.mean_ci_width < reports[0].summary.mean_ci_width);
}

#[test]
fn report_serializes_to_json() {
    let study = Study {
        true_params: vec![1.0],
        sample_sizes: vec![40],
        trials: 4,
        alpha: 0.1,
        seed: 0,
        failure_policy: FailurePolicy::Abort,
    };
    let estimator = Estimator::Classical {
        initial_guess: 1.0,
        settings: MinimizeSettings::default(),
    };
    let reports = study.run(&estimator).unwrap();
    let json = serde_json::to_value(&reports).unwrap();
    assert_eq!(json[0]["summary"]["sample_size"], 40);
    assert_eq!(json[0]["failures"], 0);
    assert!(json[0]["summary"]["coverage_probability"].is_number());
}
