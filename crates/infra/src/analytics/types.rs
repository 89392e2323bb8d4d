//! Reporting API v4 wire types
//!
//! Only the fields the benchmark reads are modelled; everything else in the
//! response is ignored.

use gabench_domain::{ReportRequest, ReportResponse};
use serde::{Deserialize, Serialize};

/// Body of `POST /v4/reports:batchGet`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchGetRequest {
    pub report_requests: Vec<WireReportRequest>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireReportRequest {
    pub view_id: String,
    pub date_ranges: Vec<WireDateRange>,
    pub metrics: Vec<WireMetric>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireDateRange {
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Serialize)]
pub struct WireMetric {
    pub expression: String,
}

impl From<&ReportRequest> for BatchGetRequest {
    fn from(request: &ReportRequest) -> Self {
        Self {
            report_requests: vec![WireReportRequest {
                view_id: request.view_id.clone(),
                date_ranges: vec![WireDateRange {
                    start_date: request.date_range.start_str(),
                    end_date: request.date_range.end_str(),
                }],
                metrics: vec![WireMetric { expression: request.metric_expression.clone() }],
            }],
        }
    }
}

/// Successful `batchGet` response.
#[derive(Debug, Default, Deserialize)]
pub struct BatchGetResponse {
    #[serde(default)]
    pub reports: Vec<WireReport>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WireReport {
    #[serde(default)]
    pub data: WireReportData,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireReportData {
    #[serde(default)]
    pub rows: Vec<serde_json::Value>,
    #[serde(default)]
    pub totals: Vec<WireDateRangeValues>,
    pub row_count: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WireDateRangeValues {
    #[serde(default)]
    pub values: Vec<String>,
}

impl BatchGetResponse {
    /// Reduce the response to what the driver logs.
    pub fn summarize(&self) -> ReportResponse {
        let row_count = self
            .reports
            .iter()
            .map(|report| report.data.row_count.unwrap_or(report.data.rows.len() as u64))
            .sum();

        let first_total = self
            .reports
            .first()
            .and_then(|report| report.data.totals.first())
            .and_then(|totals| totals.values.first())
            .cloned();

        ReportResponse { report_count: self.reports.len(), row_count, first_total }
    }
}

/// Google API error envelope: `{"error": {"code", "message", "status"}}`.
#[derive(Debug, Deserialize)]
pub struct ApiErrorEnvelope {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
    pub status: Option<String>,
}

impl ApiErrorBody {
    /// `PERMISSION_DENIED: User does not have access`, or just the message.
    pub fn describe(&self) -> String {
        match &self.status {
            Some(status) if !status.is_empty() => format!("{}: {}", status, self.message),
            _ => self.message.clone(),
        }
    }
}
