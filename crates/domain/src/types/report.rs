//! Report request and response value objects

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::{DATE_FORMAT, SESSIONS_METRIC};

/// Inclusive date range of a report query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn single_day(date: NaiveDate) -> Self {
        Self { start: date, end: date }
    }

    pub fn start_str(&self) -> String {
        self.start.format(DATE_FORMAT).to_string()
    }

    pub fn end_str(&self) -> String {
        self.end.format(DATE_FORMAT).to_string()
    }
}

/// One report query, built fresh for every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRequest {
    pub view_id: String,
    pub date_range: DateRange,
    pub metric_expression: String,
}

impl ReportRequest {
    /// Session count for `view_id` on a single day.
    pub fn single_day(view_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            view_id: view_id.into(),
            date_range: DateRange::single_day(date),
            metric_expression: SESSIONS_METRIC.to_string(),
        }
    }
}

/// The parts of a report response worth logging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportResponse {
    pub report_count: usize,
    pub row_count: u64,
    pub first_total: Option<String>,
}
