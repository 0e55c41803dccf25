//! One-sample Kolmogorov–Smirnov goodness-of-fit test.

use serde::Serialize;

/// Outcome of [`ks_test`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KsResult {
    /// Supremum distance D between the empirical and the reference CDF.
    pub statistic: f64,
    /// Asymptotic p-value of D under the null hypothesis.
    pub p_value: f64,
    /// Number of finite observations used.
    pub n: usize,
}

impl KsResult {
    /// Whether the null hypothesis is rejected at significance `alpha`.
    pub fn rejects(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

/// Test `sample` against the continuous distribution function `cdf`.
///
/// NaN observations are dropped. The p-value uses the Kolmogorov limiting
/// distribution with Stephens' small-sample correction
/// λ = (√n + 0.12 + 0.11/√n)·D.
///
/// # Example
///
/// ```
/// use alshenawy::stats::ks_test;
///
/// // evenly spread points against the uniform CDF
/// let xs: Vec<f64> = (0..100).map(|i| (i as f64 + 0.5) / 100.0).collect();
/// let r = ks_test(&xs, |x| x.clamp(0.0, 1.0));
/// assert!(r.statistic <= 0.005 + 1e-12);
/// assert!(!r.rejects(0.05));
/// ```
pub fn ks_test(sample: &[f64], cdf: impl Fn(f64) -> f64) -> KsResult {
    let mut sorted: Vec<f64> = sample.iter().copied().filter(|x| !x.is_nan()).collect();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    if n == 0 {
        return KsResult {
            statistic: 0.0,
            p_value: 1.0,
            n,
        };
    }

    let nf = n as f64;
    let statistic = sorted
        .iter()
        .enumerate()
        .map(|(i, &x)| {
            let f = cdf(x);
            let above = (i + 1) as f64 / nf - f;
            let below = f - i as f64 / nf;
            above.max(below)
        })
        .fold(0.0_f64, f64::max);

    let sqrt_n = nf.sqrt();
    let lambda = (sqrt_n + 0.12 + 0.11 / sqrt_n) * statistic;

    KsResult {
        statistic,
        p_value: kolmogorov_survival(lambda),
        n,
    }
}

/// Q_KS(λ) = 2 Σ_{j≥1} (−1)^{j−1} exp(−2 j² λ²).
fn kolmogorov_survival(lambda: f64) -> f64 {
    // the alternating series is useless below this; Q_KS is 1 to working precision
    if lambda < 0.2 {
        return 1.0;
    }

    let a2 = -2.0 * lambda * lambda;
    let mut sign = 2.0;
    let mut sum = 0.0;
    let mut previous = 0.0_f64;

    for j in 1..=100 {
        let jf = j as f64;
        let term = sign * (a2 * jf * jf).exp();
        sum += term;
        if term.abs() <= 1e-3 * previous || term.abs() <= 1e-8 * sum.abs() {
            return sum.clamp(0.0, 1.0);
        }
        sign = -sign;
        previous = term.abs();
    }
    1.0
}
