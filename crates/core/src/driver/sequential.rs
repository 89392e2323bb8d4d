use gabench_domain::{ReportRequest, RequestOutcome, Result, RunSummary};
use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

use super::schedule::date_for_request;
use super::RequestDriver;
use crate::ports::ReportFetcher;

impl<F: ReportFetcher + ?Sized + 'static> RequestDriver<F> {
    /// One request at a time; the pacing interval is added after every
    /// request regardless of its latency.
    pub(super) async fn run_sequential(&self, summary: &mut RunSummary) -> Result<()> {
        let interval = self.config.interval;

        for index in 1..=self.config.count {
            let date = date_for_request(self.config.start_date, index, self.config.walk_back)?;
            let request = ReportRequest::single_day(&*self.view_id, date);

            let started = Instant::now();
            let response = self.fetcher.fetch_report(&request).await.map_err(|err| {
                warn!(index, %date, error = %err, "request failed");
                err
            })?;
            let elapsed = started.elapsed();

            debug!(
                index,
                %date,
                elapsed_ms = elapsed.as_millis() as u64,
                rows = response.row_count,
                "request completed"
            );

            let outcome = RequestOutcome { index, date, elapsed };
            self.reporter.request_completed(&outcome);
            summary.requests.push(outcome);

            if !interval.is_zero() {
                sleep(interval).await;
            }
            self.reporter.interval_slept(interval);
        }

        Ok(())
    }
}
