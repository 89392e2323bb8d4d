//! Scripted fetcher and recording reporter shared by driver tests.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use gabench_core::{ProgressReporter, ReportFetcher};
use gabench_domain::{
    BatchReport, GaBenchError, ReportRequest, ReportResponse, RequestOutcome, Result, RunSummary,
};
use tokio::time::Instant;

/// Fetcher with fixed latency whose N-th call (1-based) can be scripted to
/// fail or panic.
pub struct MockFetcher {
    latency: Duration,
    fail_calls: HashSet<usize>,
    panic_calls: HashSet<usize>,
    warm_up_error: Option<GaBenchError>,
    warm_ups: AtomicUsize,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    requests: Mutex<Vec<(Instant, ReportRequest)>>,
}

impl MockFetcher {
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            fail_calls: HashSet::new(),
            panic_calls: HashSet::new(),
            warm_up_error: None,
            warm_ups: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_on(mut self, calls: &[usize]) -> Self {
        self.fail_calls.extend(calls.iter().copied());
        self
    }

    pub fn panicking_on(mut self, calls: &[usize]) -> Self {
        self.panic_calls.extend(calls.iter().copied());
        self
    }

    pub fn failing_warm_up(mut self, error: GaBenchError) -> Self {
        self.warm_up_error = Some(error);
        self
    }

    pub fn warm_ups(&self) -> usize {
        self.warm_ups.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<ReportRequest> {
        self.requests.lock().unwrap().iter().map(|(_, request)| request.clone()).collect()
    }

    pub fn start_times(&self) -> Vec<Instant> {
        self.requests.lock().unwrap().iter().map(|(at, _)| *at).collect()
    }
}

#[async_trait]
impl ReportFetcher for MockFetcher {
    async fn warm_up(&self) -> Result<()> {
        self.warm_ups.fetch_add(1, Ordering::SeqCst);
        match &self.warm_up_error {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    async fn fetch_report(&self, request: &ReportRequest) -> Result<ReportResponse> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.requests.lock().unwrap().push((Instant::now(), request.clone()));

        let now_in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now_in_flight, Ordering::SeqCst);

        tokio::time::sleep(self.latency).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.panic_calls.contains(&call) {
            panic!("scripted panic on call {call}");
        }
        if self.fail_calls.contains(&call) {
            return Err(GaBenchError::Api { status: 429, message: format!("quota exceeded ({call})") });
        }

        Ok(ReportResponse { report_count: 1, row_count: 1, first_total: Some("42".into()) })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Request(usize),
    Slept(Duration),
    BatchStarted { batch: usize, dispatched: usize, size: usize },
    BatchCompleted(BatchReport),
    RunCompleted(usize),
}

#[derive(Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<Event>>,
}

impl RecordingReporter {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn request_indexes(&self) -> Vec<usize> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Request(index) => Some(index),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

impl ProgressReporter for RecordingReporter {
    fn request_completed(&self, outcome: &RequestOutcome) {
        self.push(Event::Request(outcome.index));
    }

    fn interval_slept(&self, interval: Duration) {
        self.push(Event::Slept(interval));
    }

    fn batch_started(&self, batch: usize, dispatched: usize, size: usize) {
        self.push(Event::BatchStarted { batch, dispatched, size });
    }

    fn batch_completed(&self, report: &BatchReport) {
        self.push(Event::BatchCompleted(report.clone()));
    }

    fn run_completed(&self, summary: &RunSummary) {
        self.push(Event::RunCompleted(summary.request_count()));
    }
}
