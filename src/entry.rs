//! Process entry: argument parsing, runtime setup, and run orchestration.
use std::sync::Arc;
use std::time::Instant;

use clap::Parser as _;
use tracing::{info, warn};

use crate::args::SmokeArgs;
use crate::config::{RunConfig, build_run_config, load_config};
use crate::error::{AppError, AppResult, ValidationError};
use crate::http::{build_client, preflight_lookup};
use crate::logger::init_logging;
use crate::metrics::Aggregator;
use crate::{scenario, summary, thresholds};

/// Parse arguments, build the runtime, and drive one smoke run to its exit
/// code. A failed threshold surfaces as an error so the process exits
/// non-zero.
///
/// # Errors
///
/// Returns an error on invalid configuration, an unresolvable target host,
/// or when any threshold fails.
pub fn run() -> AppResult<()> {
    let args = SmokeArgs::parse();
    let common = args.command.common();
    init_logging(common.verbose);

    let file = load_config(common.config.as_deref())?;
    let config = build_run_config(&args.command, file.as_ref())?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|err| AppError::validation(ValidationError::RuntimeBuildFailed { source: err }))?;

    runtime.block_on(run_async(config))
}

async fn run_async(config: RunConfig) -> AppResult<()> {
    preflight_lookup(&config.base_url).map_err(AppError::validation)?;
    let client = build_client(&config)?;

    info!(
        "Starting {} smoke run: {} VUs, {} rps cap, {}s against {}",
        config.scenario.as_str(),
        config.vus,
        config.rps,
        config.duration.as_secs(),
        config.base_url
    );

    let config = Arc::new(config);
    let aggregator = Arc::new(Aggregator::new());
    let start = Instant::now();
    scenario::run(&config, &client, &aggregator).await;
    let elapsed = start.elapsed();

    let snapshot = aggregator.snapshot(elapsed, config.vus);
    let results = thresholds::evaluate(&snapshot, &config.thresholds);

    summary::print_text(config.scenario, &snapshot, &results, config.no_color);
    match summary::write_json(&config.out_path, config.scenario, &snapshot, &results).await {
        Ok(()) => info!("Results written to {}", config.out_path.display()),
        // The console summary already went out; a bad results path must not
        // mask the run verdict.
        Err(err) => warn!("Failed to write results file: {}", err),
    }

    let failed = results.iter().filter(|result| !result.passed).count();
    if failed > 0 {
        return Err(AppError::validation(ValidationError::ThresholdsFailed {
            failed,
        }));
    }
    Ok(())
}
