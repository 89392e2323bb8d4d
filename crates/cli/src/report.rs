//! Human-readable timing report
//!
//! ```text
//! request 001: took 0.412s
//! sleep 1s
//! batch 1 (5 requests)
//! took: 0.300s
//! sleep: 0.700s
//!
//! all: took 7.104s
//! ```

use std::io::{self, Stdout, Write};
use std::sync::Mutex;
use std::time::Duration;

use gabench_core::ProgressReporter;
use gabench_domain::{BatchReport, RequestOutcome, RunSummary};

/// Writes one line per progress event.
///
/// Write errors (e.g. a closed pipe) are dropped; the run itself carries on.
pub struct ConsoleReporter<W: Write + Send> {
    out: Mutex<W>,
}

impl ConsoleReporter<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out: Mutex::new(out) }
    }

    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn line(&self, text: std::fmt::Arguments<'_>) {
        let mut out = match self.out.lock() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        };
        let _ = writeln!(out, "{text}").and_then(|()| out.flush());
    }
}

impl<W: Write + Send> ProgressReporter for ConsoleReporter<W> {
    fn request_completed(&self, outcome: &RequestOutcome) {
        self.line(format_args!("request {:03}: took {}", outcome.index, secs(outcome.elapsed)));
    }

    fn interval_slept(&self, interval: Duration) {
        self.line(format_args!("sleep {}s", interval.as_secs_f64()));
    }

    fn batch_started(&self, batch: usize, _dispatched: usize, size: usize) {
        let noun = if size == 1 { "request" } else { "requests" };
        self.line(format_args!("batch {batch} ({size} {noun})"));
    }

    fn batch_completed(&self, report: &BatchReport) {
        self.line(format_args!("took: {}", secs(report.elapsed)));
        if let Some(padding) = report.padding {
            self.line(format_args!("sleep: {}", secs(padding)));
        }
    }

    fn run_completed(&self, summary: &RunSummary) {
        self.line(format_args!(""));
        self.line(format_args!("all: took {}", secs(summary.total_elapsed)));
    }
}

/// Millisecond-resolution seconds, e.g. `0.412s`.
fn secs(duration: Duration) -> String {
    format!("{:.3}s", duration.as_secs_f64())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn output(reporter: ConsoleReporter<Vec<u8>>) -> String {
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    fn outcome(index: usize, millis: u64) -> RequestOutcome {
        RequestOutcome {
            index,
            date: NaiveDate::from_ymd_opt(2019, 9, 25).unwrap(),
            elapsed: Duration::from_millis(millis),
        }
    }

    #[test]
    fn sequential_lines() {
        let reporter = ConsoleReporter::new(Vec::new());

        reporter.request_completed(&outcome(1, 412));
        reporter.interval_slept(Duration::from_secs(1));
        reporter.request_completed(&outcome(12, 95));
        reporter.interval_slept(Duration::from_millis(500));

        assert_eq!(
            output(reporter),
            "request 001: took 0.412s\nsleep 1s\nrequest 012: took 0.095s\nsleep 0.5s\n"
        );
    }

    #[test]
    fn batch_lines_include_padding_only_when_slept() {
        let reporter = ConsoleReporter::new(Vec::new());

        reporter.batch_started(1, 0, 5);
        reporter.batch_completed(&BatchReport {
            number: 1,
            size: 5,
            elapsed: Duration::from_millis(300),
            padding: Some(Duration::from_millis(700)),
        });
        reporter.batch_started(2, 5, 2);
        reporter.batch_completed(&BatchReport {
            number: 2,
            size: 2,
            elapsed: Duration::from_millis(1250),
            padding: None,
        });

        assert_eq!(
            output(reporter),
            "batch 1 (5 requests)\ntook: 0.300s\nsleep: 0.700s\nbatch 2 (2 requests)\ntook: 1.250s\n"
        );
    }

    #[test]
    fn single_request_batch_uses_singular() {
        let reporter = ConsoleReporter::new(Vec::new());

        reporter.batch_started(3, 10, 1);

        assert_eq!(output(reporter), "batch 3 (1 request)\n");
    }

    #[test]
    fn run_total_follows_blank_line() {
        let reporter = ConsoleReporter::new(Vec::new());
        let summary = RunSummary { total_elapsed: Duration::from_millis(7104), ..Default::default() };

        reporter.run_completed(&summary);

        assert_eq!(output(reporter), "\nall: took 7.104s\n");
    }
}
