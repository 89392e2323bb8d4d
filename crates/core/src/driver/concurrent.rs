use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use gabench_domain::{
    BatchFailure, BatchReport, GaBenchError, ReportRequest, ReportResponse, RequestFailure,
    RequestOutcome, Result, RunSummary,
};
use tokio::task::JoinSet;
use tokio::time::{sleep, Instant};
use tracing::{debug, info, warn};

use super::pacing::batch_padding;
use super::schedule::batch_sizes;
use super::RequestDriver;
use crate::ports::ReportFetcher;

type SlotResult = (usize, Duration, Result<ReportResponse>);

impl<F: ReportFetcher + ?Sized + 'static> RequestDriver<F> {
    /// Fixed-width batches; batch N+1 starts only after every request of
    /// batch N has reported back.
    pub(super) async fn run_concurrent(&self, width: usize, summary: &mut RunSummary) -> Result<()> {
        let date = self.config.start_date;
        let mut dispatched = 0;

        for (offset, size) in batch_sizes(self.config.count, width).enumerate() {
            let number = offset + 1;
            self.reporter.batch_started(number, dispatched, size);
            info!(batch = number, size, dispatched, "dispatching batch");

            let started = Instant::now();
            let (mut outcomes, failure) = self.dispatch_batch(number, dispatched, size, date).await;
            let elapsed = started.elapsed();
            dispatched += size;

            outcomes.sort_by_key(|outcome| outcome.index);
            for outcome in &outcomes {
                self.reporter.request_completed(outcome);
            }
            summary.requests.extend(outcomes);

            if !failure.is_empty() {
                warn!(
                    batch = number,
                    failed = failure.len(),
                    size,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "batch failed"
                );
                return Err(failure.into());
            }

            let padding = batch_padding(elapsed, self.config.batch_window);
            if let Some(padding) = padding {
                sleep(padding).await;
            }

            info!(
                batch = number,
                elapsed_ms = elapsed.as_millis() as u64,
                padding_ms = padding.map_or(0, |p| p.as_millis() as u64),
                "batch completed"
            );

            let report = BatchReport { number, size, elapsed, padding };
            self.reporter.batch_completed(&report);
            summary.batches.push(report);
        }

        Ok(())
    }

    /// Spawn exactly `size` requests and collect exactly `size` results.
    async fn dispatch_batch(
        &self,
        number: usize,
        dispatched: usize,
        size: usize,
        date: NaiveDate,
    ) -> (Vec<RequestOutcome>, BatchFailure) {
        let mut tasks: JoinSet<SlotResult> = JoinSet::new();
        let mut pending = BTreeSet::new();

        for slot in 0..size {
            let index = dispatched + slot + 1;
            let fetcher = Arc::clone(&self.fetcher);
            let request = ReportRequest::single_day(&*self.view_id, date);

            pending.insert(index);
            tasks.spawn(async move {
                let started = Instant::now();
                let result = fetcher.fetch_report(&request).await;
                (index, started.elapsed(), result)
            });
        }

        let mut outcomes = Vec::with_capacity(size);
        let mut failure = BatchFailure::new(number, size);

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, elapsed, Ok(response))) => {
                    pending.remove(&index);
                    debug!(
                        index,
                        batch = number,
                        elapsed_ms = elapsed.as_millis() as u64,
                        rows = response.row_count,
                        "request completed"
                    );
                    outcomes.push(RequestOutcome { index, date, elapsed });
                }
                Ok((index, elapsed, Err(error))) => {
                    pending.remove(&index);
                    warn!(
                        index,
                        batch = number,
                        elapsed_ms = elapsed.as_millis() as u64,
                        error = %error,
                        "request failed"
                    );
                    failure.push(RequestFailure { index, date, error });
                }
                Err(join_error) => {
                    // The slot is identified once every other task has reported.
                    warn!(batch = number, error = %join_error, "request task did not complete");
                }
            }
        }

        for index in pending {
            failure.push(RequestFailure {
                index,
                date,
                error: GaBenchError::Internal("request task panicked".into()),
            });
        }

        debug_assert_eq!(outcomes.len() + failure.len(), size);
        (outcomes, failure)
    }
}
