use std::{fs, path::Path, process::ExitCode, sync::Mutex};

use anyhow::{Context, Result};
use clap::Parser;
use tfidf_features::{PipelinePaths, RunSummary};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

const DEFAULT_FILTER: &str = "info,tfidf_features=debug,feature_engineering=debug";

#[derive(Parser)]
#[command(name = "feature-engineering", version)]
#[command(about = "TF-IDF vectorize the preprocessed train/test splits")]
#[command(long_about = "TF-IDF vectorize the preprocessed train/test splits.

Reads params.yaml (feature_engineering.max_features) and
data/interim/{train,test}_preprocessed.csv from the current directory, then
writes data/processed/{train,test}_tfidf.csv. Diagnostics go to stderr and
logs/feature_engineering.log; RUST_LOG overrides the default log level.")]
struct Cli {}

/// Console and file logging, both at debug level for this stage unless `RUST_LOG` says otherwise.
fn init_logging(log_file: &Path) -> Result<()> {
    if let Some(dir) = log_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;
    }
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("Failed to open log file: {}", log_file.display()))?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .context("Failed to install the log subscriber")?;
    Ok(())
}

fn run_stage(paths: &PipelinePaths) -> Result<RunSummary> {
    info!(params = %paths.params.display(), "Starting feature engineering");
    tfidf_features::run(paths).context("Feature engineering failed")
}

fn main() -> ExitCode {
    let _cli = Cli::parse();
    let paths = PipelinePaths::default();

    if let Err(e) = init_logging(&paths.log_file) {
        eprintln!("Error: {e:#}");
        return ExitCode::FAILURE;
    }

    match run_stage(&paths) {
        Ok(summary) => {
            info!(
                train = %paths.train_output.display(),
                test = %paths.test_output.display(),
                vocab_size = summary.vocab_size,
                "Feature tables written"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Failed to complete the feature engineering process: {e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
