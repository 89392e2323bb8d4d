//! Domain types and models

pub mod outcome;
pub mod report;

pub use outcome::{BatchFailure, BatchReport, RequestFailure, RequestOutcome, RunSummary};
pub use report::{DateRange, ReportRequest, ReportResponse};
