//! # gabench CLI
//!
//! Command-line front end: parses flags, loads credentials, runs the
//! request driver and prints the timing report to stdout.
//!
//! ## Architecture
//! - Depends on `domain`, `core` and `infra`
//! - Wires the Reporting API client into the driver
//! - Owns process concerns: logging setup and exit status

pub mod args;
pub mod report;
pub mod telemetry;

use std::sync::Arc;

use gabench_core::{ProgressReporter, RequestDriver};
use gabench_domain::RunSummary;
use gabench_infra::{load_client_with, load_secret, ApiEndpoints};
use tracing::info;

pub use args::Args;
pub use report::ConsoleReporter;

/// Run a benchmark against the production endpoints, reporting to stdout.
///
/// # Errors
/// Fails on invalid flags, an unusable secret, or the first failed request
/// (first failed batch in concurrent mode).
pub async fn run(args: &Args) -> anyhow::Result<RunSummary> {
    run_with(args, &ApiEndpoints::default(), Arc::new(ConsoleReporter::stdout())).await
}

/// Run a benchmark against `endpoints`, sending progress to `reporter`.
///
/// # Errors
/// See [`run`].
pub async fn run_with(
    args: &Args,
    endpoints: &ApiEndpoints,
    reporter: Arc<dyn ProgressReporter>,
) -> anyhow::Result<RunSummary> {
    let config = args.run_config()?;
    let secret = load_secret(&args.secret)?;
    let client = load_client_with(&secret, endpoints)?;

    info!(
        view_id = %secret.view_id,
        mode = ?config.mode(),
        count = config.count,
        "credentials loaded"
    );

    let driver =
        RequestDriver::new(Arc::new(client), secret.view_id, config).with_reporter(reporter);
    let summary = driver.run().await?;

    Ok(summary)
}
