//! Per-request, per-batch and per-run results

use std::fmt;
use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::GaBenchError;

/// A request that completed successfully.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestOutcome {
    /// 1-based position in the run.
    pub index: usize,
    pub date: NaiveDate,
    pub elapsed: Duration,
}

/// A request that failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestFailure {
    pub index: usize,
    pub date: NaiveDate,
    pub error: GaBenchError,
}

/// Every failure collected from one concurrent batch, in completion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchFailure {
    /// 1-based batch number.
    pub batch: usize,
    /// Number of requests dispatched in the batch.
    pub size: usize,
    pub failures: Vec<RequestFailure>,
}

impl BatchFailure {
    pub fn new(batch: usize, size: usize) -> Self {
        Self { batch, size, failures: Vec::new() }
    }

    pub fn push(&mut self, failure: RequestFailure) {
        self.failures.push(failure);
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }
}

impl fmt::Display for BatchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {} requests in batch {} failed:", self.len(), self.size, self.batch)?;
        for failure in &self.failures {
            write!(f, "\n\t* request {:03} ({}): {}", failure.index, failure.date, failure.error)?;
        }
        Ok(())
    }
}

/// Timing of one concurrent batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub number: usize,
    pub size: usize,
    pub elapsed: Duration,
    /// Sleep inserted to fill the batch window, if any.
    pub padding: Option<Duration>,
}

/// Aggregate result of a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub requests: Vec<RequestOutcome>,
    pub batches: Vec<BatchReport>,
    pub total_elapsed: Duration,
}

impl RunSummary {
    pub fn request_count(&self) -> usize {
        self.requests.len()
    }
}
