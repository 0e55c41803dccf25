use super::*;
use crate::inference::bayesian::Prior;

fn classical() -> Estimator {
    Estimator::Classical {
        initial_guess: 1.0,
        settings: MinimizeSettings::default(),
    }
}

fn study(trials: usize) -> Study {
    Study {
        true_params: vec![0.5, 2.0],
        sample_sizes: vec![50, 200],
        trials,
        alpha: 0.05,
        seed: 17,
        failure_policy: FailurePolicy::Abort,
    }
}

#[test]
fn cells_are_row_major() {
    let cells: Vec<(f64, usize)> = study(1).cells().collect();
    assert_eq!(cells, vec![(0.5, 50), (0.5, 200), (2.0, 50), (2.0, 200)]);
}

#[test]
fn reports_follow_cell_order() {
    let reports = study(5).run(&classical()).unwrap();
    assert_eq!(reports.len(), 4);
    for (report, (b, n)) in reports.iter().zip(study(5).cells()) {
        assert_eq!(report.summary.true_param, b);
        assert_eq!(report.summary.sample_size, n);
        assert_eq!(report.summary.n_simulations, 5);
        assert_eq!(report.failures, 0);
    }
}

#[test]
fn study_is_reproducible() {
    let a = study(8).run(&classical()).unwrap();
    let b = study(8).run(&classical()).unwrap();
    assert_eq!(a, b);

    let other = Study {
        seed: 18,
        ..study(8)
    };
    assert_ne!(a, other.run(&classical()).unwrap());
}

#[test]
fn classical_coverage_near_nominal() {
    let s = Study {
        true_params: vec![1.0],
        sample_sizes: vec![300],
        trials: 200,
        alpha: 0.1,
        seed: 3,
        failure_policy: FailurePolicy::Abort,
    };
    let report = &s.run(&classical()).unwrap()[0];
    let cov = report.summary.coverage_probability;
    assert!((0.78..=0.98).contains(&cov), "coverage = {cov}");
    assert!(report.summary.bias.abs() < 0.05, "bias = {}", report.summary.bias);
}

#[test]
fn bayesian_cells_run() {
    let s = Study {
        true_params: vec![1.0],
        sample_sizes: vec![100],
        trials: 3,
        alpha: 0.1,
        seed: 4,
        failure_policy: FailurePolicy::Abort,
    };
    let estimator = Estimator::Bayesian {
        prior: Prior::default(),
        settings: SamplerSettings {
            draws: 400,
            tune: 300,
            chains: 2,
            ..SamplerSettings::default()
        },
    };
    let reports = s.run(&estimator).unwrap();
    assert_eq!(reports[0].summary.n_simulations, 3);
    assert_eq!(estimator.name(), "bayesian");
}

#[test]
fn failing_trials_abort_or_skip() {
    let broken = Estimator::Classical {
        initial_guess: 1.0,
        settings: MinimizeSettings {
            max_iter: 0,
            ..MinimizeSettings::default()
        },
    };

    let err = study(2).run(&broken).unwrap_err();
    assert!(matches!(err, StudyError::Trial { trial: 0, .. }), "{err}");

    let skip = Study {
        failure_policy: FailurePolicy::Skip,
        ..study(2)
    };
    assert_eq!(
        skip.run(&broken).unwrap_err(),
        StudyError::AllTrialsFailed {
            true_param: 0.5,
            sample_size: 50,
            trials: 2
        }
    );
}

#[test]
fn invalid_studies() {
    let empty = Study {
        true_params: vec![],
        ..study(1)
    };
    assert_eq!(
        empty.run(&classical()).unwrap_err(),
        StudyError::EmptyGrid("true parameters")
    );
    let zero_trials = study(0);
    assert_eq!(
        zero_trials.run(&classical()).unwrap_err(),
        StudyError::EmptyGrid("trials")
    );
    let negative = Study {
        true_params: vec![1.0, -2.0],
        ..study(1)
    };
    assert_eq!(
        negative.run(&classical()).unwrap_err(),
        StudyError::InvalidTrueParam(-2.0)
    );
}

#[test]
fn invalid_alpha_is_reported_before_any_trial() {
    for alpha in [0.0, 1.0, f64::NAN] {
        let s = Study {
            alpha,
            failure_policy: FailurePolicy::Skip,
            ..study(3)
        };
        assert!(
            matches!(s.run(&classical()), Err(StudyError::InvalidSignificance(a)) if a.is_nan() == alpha.is_nan()),
            "alpha = {alpha}"
        );
    }
}

#[test]
fn trial_seeds_are_distinct() {
    let mut seeds: Vec<u64> = (0..4)
        .flat_map(|c| (0..250).map(move |t| trial_seed(42, c, t)))
        .collect();
    seeds.sort_unstable();
    seeds.dedup();
    assert_eq!(seeds.len(), 1000);
    assert_ne!(trial_seed(1, 0, 0), trial_seed(2, 0, 0));
}

#[test]
fn failure_policy_serde() {
    let p: FailurePolicy = serde_json::from_str("\"skip\"").unwrap();
    assert_eq!(p, FailurePolicy::Skip);
}
