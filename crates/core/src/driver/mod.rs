//! Request driver
//!
//! Issues `count` report queries through a [`ReportFetcher`] and measures
//! their timing. Two modes, selected by the configured concurrency:
//!
//! - **Sequential** (`concurrency == 0`): one request at a time, each
//!   followed by a fixed pacing sleep. The first failure aborts the run.
//! - **Concurrent** (`concurrency > 0`): batches of up to `concurrency`
//!   parallel requests. Every batch is awaited in full, failures are
//!   aggregated, and a successful batch is padded to the batch window.

mod concurrent;
pub mod pacing;
pub mod schedule;
mod sequential;

use std::sync::Arc;

use gabench_domain::{DriverMode, Result, RunConfig, RunSummary};
use tokio::time::Instant;
use tracing::{info, warn};

use crate::ports::{NoopReporter, ProgressReporter, ReportFetcher};

/// Runs one benchmarking session against a shared fetcher.
pub struct RequestDriver<F: ReportFetcher + ?Sized + 'static> {
    fetcher: Arc<F>,
    view_id: Arc<str>,
    config: RunConfig,
    reporter: Arc<dyn ProgressReporter>,
}

impl<F: ReportFetcher + ?Sized + 'static> RequestDriver<F> {
    pub fn new(fetcher: Arc<F>, view_id: impl Into<String>, config: RunConfig) -> Self {
        Self {
            fetcher,
            view_id: Arc::from(view_id.into()),
            config,
            reporter: Arc::new(NoopReporter),
        }
    }

    /// Attach a progress reporter.
    #[must_use]
    pub fn with_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Execute the run.
    ///
    /// # Errors
    /// Returns the first request error in sequential mode, or
    /// `GaBenchError::Batch` listing every failure of the first failed batch
    /// in concurrent mode. A failed warm-up is returned as-is.
    pub async fn run(&self) -> Result<RunSummary> {
        self.fetcher.warm_up().await.map_err(|err| {
            warn!(error = %err, error_type = err.label(), "fetcher warm-up failed");
            err
        })?;

        let started = Instant::now();
        let mut summary = RunSummary::default();

        info!(
            count = self.config.count,
            concurrency = self.config.concurrency,
            interval_ms = self.config.interval.as_millis() as u64,
            start_date = %self.config.start_date,
            "starting run"
        );

        let result = match self.config.mode() {
            DriverMode::Sequential => self.run_sequential(&mut summary).await,
            DriverMode::Concurrent { width } => {
                if self.config.walk_back {
                    warn!("walk-back only applies to sequential runs; every batch uses the start date");
                }
                self.run_concurrent(width, &mut summary).await
            }
        };

        if let Err(err) = result {
            warn!(
                error = %err,
                error_type = err.label(),
                completed = summary.request_count(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "run aborted"
            );
            return Err(err);
        }

        summary.total_elapsed = started.elapsed();
        info!(
            requests = summary.request_count(),
            batches = summary.batches.len(),
            total_ms = summary.total_elapsed.as_millis() as u64,
            "run completed"
        );
        self.reporter.run_completed(&summary);

        Ok(summary)
    }
}
