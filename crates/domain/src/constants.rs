//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

use std::time::Duration;

// Date handling
pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DEFAULT_START_DATE: &str = "2019-09-25";

// Report shape
pub const SESSIONS_METRIC: &str = "ga:sessions";

/// Every call is billed against this quota user, regardless of which
/// credential or process issued it.
pub const QUOTA_USER: &str = "fixed";

// Driver defaults
pub const DEFAULT_REQUEST_COUNT: usize = 5;
pub const DEFAULT_CONCURRENCY: usize = 0;
pub const DEFAULT_INTERVAL_SECS: f64 = 1.0;
pub const DEFAULT_BATCH_WINDOW: Duration = Duration::from_secs(1);

// Remote endpoints
pub const GOOGLE_TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
pub const REPORTING_API_BASE: &str = "https://analyticsreporting.googleapis.com";
pub const ANALYTICS_SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/analytics",
    "https://www.googleapis.com/auth/analytics.readonly",
];

// Token lifecycle
pub const TOKEN_REFRESH_THRESHOLD_SECS: i64 = 60;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
