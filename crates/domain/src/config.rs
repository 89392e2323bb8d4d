//! Configuration records
//!
//! [`Secret`] is read once from the credential file; [`RunConfig`] is built
//! once from command-line flags. Both are immutable for the lifetime of the
//! process and are passed explicitly into the driver.

use std::fmt;
use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DATE_FORMAT, DEFAULT_BATCH_WINDOW, DEFAULT_CONCURRENCY, DEFAULT_INTERVAL_SECS,
    DEFAULT_REQUEST_COUNT, DEFAULT_START_DATE,
};
use crate::errors::{GaBenchError, Result};

/// OAuth credentials and target view, as stored in the secret file.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Secret {
    pub view_id: String,
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

impl Secret {
    /// Ensure every field carries a value.
    ///
    /// # Errors
    /// Returns `GaBenchError::Config` naming the first empty field.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("viewId", &self.view_id),
            ("clientId", &self.client_id),
            ("clientSecret", &self.client_secret),
            ("refreshToken", &self.refresh_token),
        ];

        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(GaBenchError::Config(format!("secret field '{name}' is empty")));
            }
        }

        Ok(())
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secret")
            .field("view_id", &self.view_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .finish()
    }
}

/// How the driver dispatches requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverMode {
    /// One request at a time, paced by the configured interval.
    Sequential,
    /// Fixed-width batches of parallel requests.
    Concurrent { width: usize },
}

/// Immutable configuration for a single benchmarking run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub count: usize,
    pub concurrency: usize,
    pub interval: Duration,
    pub start_date: NaiveDate,
    pub walk_back: bool,
    pub batch_window: Duration,
}

impl RunConfig {
    pub fn builder() -> RunConfigBuilder {
        RunConfigBuilder::default()
    }

    pub fn mode(&self) -> DriverMode {
        if self.concurrency == 0 {
            DriverMode::Sequential
        } else {
            DriverMode::Concurrent { width: self.concurrency }
        }
    }
}

/// Builder for [`RunConfig`].
#[derive(Debug, Clone)]
pub struct RunConfigBuilder {
    count: usize,
    concurrency: usize,
    interval_secs: f64,
    start_date: Option<NaiveDate>,
    walk_back: bool,
    batch_window: Duration,
}

impl Default for RunConfigBuilder {
    fn default() -> Self {
        Self {
            count: DEFAULT_REQUEST_COUNT,
            concurrency: DEFAULT_CONCURRENCY,
            interval_secs: DEFAULT_INTERVAL_SECS,
            start_date: None,
            walk_back: false,
            batch_window: DEFAULT_BATCH_WINDOW,
        }
    }
}

impl RunConfigBuilder {
    /// Total number of requests to issue.
    pub fn count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Batch width; `0` runs sequentially.
    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Delay after each sequential request, in (fractional) seconds.
    pub fn interval_secs(mut self, seconds: f64) -> Self {
        self.interval_secs = seconds;
        self
    }

    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval_secs = interval.as_secs_f64();
        self
    }

    pub fn start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Step the query date back one day per sequential request.
    pub fn walk_back(mut self, enabled: bool) -> Self {
        self.walk_back = enabled;
        self
    }

    /// Minimum wall-clock window a concurrent batch occupies.
    pub fn batch_window(mut self, window: Duration) -> Self {
        self.batch_window = window;
        self
    }

    /// # Errors
    /// Returns `GaBenchError::InvalidInput` when the count is zero, the
    /// interval is negative or not finite, or the batch window is zero.
    pub fn build(self) -> Result<RunConfig> {
        if self.count == 0 {
            return Err(GaBenchError::InvalidInput("request count must be positive".into()));
        }

        let interval = Duration::try_from_secs_f64(self.interval_secs).map_err(|_| {
            GaBenchError::InvalidInput(format!(
                "interval must be a non-negative number of seconds, got {}",
                self.interval_secs
            ))
        })?;

        if self.batch_window.is_zero() {
            return Err(GaBenchError::InvalidInput("batch window must be non-zero".into()));
        }

        let start_date = match self.start_date {
            Some(date) => date,
            None => parse_date(DEFAULT_START_DATE)?,
        };

        Ok(RunConfig {
            count: self.count,
            concurrency: self.concurrency,
            interval,
            start_date,
            walk_back: self.walk_back,
            batch_window: self.batch_window,
        })
    }
}

/// Parse a `YYYY-MM-DD` date.
///
/// # Errors
/// Returns `GaBenchError::Config` when the value is not a valid date.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|e| GaBenchError::Config(format!("invalid date '{value}': {e}")))
}
