//! Command-line driver for Monte-Carlo studies of the A-distribution estimators.
//!
//! ```text
//! alshenawy-sim init > study.toml
//! alshenawy-sim run study.toml --estimator bayesian --format json
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use alshenawy::config::{EstimatorKind, SimConfig};
use alshenawy::montecarlo::CellReport;

#[derive(Parser, Debug)]
#[command(name = "alshenawy-sim")]
#[command(author, version, about = "Monte-Carlo evaluation of estimators for Alshenawy's A distribution")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a simulation study
    Run {
        /// Configuration file; defaults are used when omitted
        config: Option<PathBuf>,

        /// Estimator to evaluate
        #[arg(long, short, value_enum, default_value = "classical")]
        estimator: EstimatorArg,

        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormat,

        /// Override the study seed
        #[arg(long)]
        seed: Option<u64>,

        /// Override the number of trials per cell
        #[arg(long, short = 'n')]
        trials: Option<usize>,
    },
    /// Print the default configuration
    Init,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum EstimatorArg {
    Classical,
    Bayesian,
}

impl From<EstimatorArg> for EstimatorKind {
    fn from(arg: EstimatorArg) -> Self {
        match arg {
            EstimatorArg::Classical => EstimatorKind::Classical,
            EstimatorArg::Bayesian => EstimatorKind::Bayesian,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OutputFormat {
    Human,
    Json,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    estimator: &'a str,
    alpha: f64,
    trials: usize,
    cells: &'a [CellReport],
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "alshenawy=debug"
    } else {
        "alshenawy=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Init => {
            print!("{}", SimConfig::default_toml());
            Ok(())
        }
        Commands::Run {
            config,
            estimator,
            format,
            seed,
            trials,
        } => {
            let config = match config {
                Some(path) => SimConfig::load(&path)
                    .with_context(|| format!("loading {}", path.display()))?,
                None => SimConfig::default(),
            };
            let mut study = config.study();
            if let Some(seed) = seed {
                study.seed = seed;
            }
            if let Some(trials) = trials {
                study.trials = trials;
            }

            let estimator = config.estimator(estimator.into());
            let reports = study.run(&estimator).context("simulation study failed")?;

            match format {
                OutputFormat::Human => print_human(estimator.name(), study.alpha, &reports),
                OutputFormat::Json => {
                    let report = JsonReport {
                        estimator: estimator.name(),
                        alpha: study.alpha,
                        trials: study.trials,
                        cells: &reports,
                    };
                    println!("{}", serde_json::to_string_pretty(&report)?);
                }
            }
            Ok(())
        }
    }
}

fn print_human(estimator: &str, alpha: f64, reports: &[CellReport]) {
    println!(
        "{estimator} estimator, nominal coverage {:.1}%",
        100.0 * (1.0 - alpha)
    );
    println!(
        "{:>8} {:>6} {:>10} {:>10} {:>10} {:>9} {:>10} {:>6}",
        "beta", "n", "mean", "bias", "mse", "coverage", "ci width", "failed"
    );
    for report in reports {
        let s = &report.summary;
        println!(
            "{:>8.3} {:>6} {:>10.4} {:>10.4} {:>10.5} {:>9.3} {:>10.4} {:>6}",
            s.true_param,
            s.sample_size,
            s.mean,
            s.bias,
            s.mse,
            s.coverage_probability,
            s.mean_ci_width,
            report.failures
        );
    }
}
