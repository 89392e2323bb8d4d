use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;
use gabench_domain::constants::{
    DEFAULT_CONCURRENCY, DEFAULT_INTERVAL_SECS, DEFAULT_REQUEST_COUNT, DEFAULT_START_DATE,
};
use gabench_domain::{parse_date, Result, RunConfig};

/// CLI arguments for a single benchmark run.
#[derive(Debug, Clone, Parser)]
#[command(name = "gabench")]
#[command(bin_name = "gabench")]
#[command(version, about = "Measure Reporting API latency under sequential or batched load", long_about = None)]
pub struct Args {
    /// secret file (JSON, or TOML by `.toml` extension) with viewId, clientId,
    /// clientSecret and refreshToken
    #[arg(long, env = "GABENCH_SECRET", value_name = "PATH", value_parser = existing_file)]
    pub secret: PathBuf,

    /// requests per concurrent batch; 0 issues them one at a time
    #[arg(long, value_name = "N", default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrent: usize,

    /// total number of requests
    #[arg(long, value_name = "N", default_value_t = DEFAULT_REQUEST_COUNT)]
    pub count: usize,

    /// pause after every sequential request
    #[arg(
        long,
        value_name = "SECONDS",
        default_value_t = DEFAULT_INTERVAL_SECS,
        allow_negative_numbers = true
    )]
    pub interval: f64,

    /// day every request reports on (first day when walking back)
    #[arg(long, value_name = "YYYY-MM-DD", default_value = DEFAULT_START_DATE, value_parser = start_date)]
    pub start_date: NaiveDate,

    /// step the report date one day back per sequential request
    #[arg(long, default_value_t = false)]
    pub walk_back: bool,

    /// debug logging as default instead of warnings only; use RUST_LOG env for more options
    #[arg(long, short = 'v', default_value_t = false)]
    pub verbose: bool,

    /// emit logs as JSON lines
    #[arg(long, default_value_t = false)]
    pub log_json: bool,

    /// write the tracing output to the provided (log) file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_output: Option<PathBuf>,
}

impl Args {
    /// Validated driver configuration for these flags.
    ///
    /// # Errors
    /// Returns `GaBenchError::InvalidInput` for a zero count or a negative or
    /// non-finite interval.
    pub fn run_config(&self) -> Result<RunConfig> {
        RunConfig::builder()
            .count(self.count)
            .concurrency(self.concurrent)
            .interval_secs(self.interval)
            .start_date(self.start_date)
            .walk_back(self.walk_back)
            .build()
    }
}

fn existing_file(value: &str) -> std::result::Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if path.is_file() {
        Ok(path)
    } else {
        Err(format!("secret file not found: {value}"))
    }
}

fn start_date(value: &str) -> std::result::Result<NaiveDate, String> {
    parse_date(value).map_err(|err| err.to_string())
}
