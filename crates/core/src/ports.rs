//! Port interfaces for the request driver

use std::time::Duration;

use async_trait::async_trait;
use gabench_domain::{BatchReport, ReportRequest, ReportResponse, RequestOutcome, Result, RunSummary};

/// Trait for issuing a single report query against the remote service.
///
/// Implementations are shared by every in-flight request of a run and must
/// be safe to call concurrently.
#[async_trait]
pub trait ReportFetcher: Send + Sync {
    /// Called once before the first request of a run.
    ///
    /// An error here aborts the run before anything is dispatched.
    async fn warm_up(&self) -> Result<()> {
        Ok(())
    }

    /// Fetch one report
    async fn fetch_report(&self, request: &ReportRequest) -> Result<ReportResponse>;
}

/// Observer for driver progress, used to render the timing report.
///
/// Every method has an empty default so reporters only implement what they
/// display.
pub trait ProgressReporter: Send + Sync {
    /// A request finished successfully.
    fn request_completed(&self, _outcome: &RequestOutcome) {}

    /// The driver slept for the pacing interval after a sequential request.
    fn interval_slept(&self, _interval: Duration) {}

    /// A concurrent batch is about to be dispatched; `dispatched` counts the
    /// requests issued by earlier batches.
    fn batch_started(&self, _batch: usize, _dispatched: usize, _size: usize) {}

    /// A concurrent batch finished (after any padding sleep).
    fn batch_completed(&self, _report: &BatchReport) {}

    /// The whole run finished successfully.
    fn run_completed(&self, _summary: &RunSummary) {}
}

/// Reporter that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {}
