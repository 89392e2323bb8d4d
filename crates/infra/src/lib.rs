//! # gabench Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - Secret file loading (JSON/TOML)
//! - The shared HTTP client
//! - The Reporting API client implementing `ReportFetcher`
//!
//! ## Architecture
//! - Implements traits defined in `gabench-core`
//! - Depends on `gabench-domain`, `gabench-common` and `gabench-core`
//! - Contains all "impure" code (file and network I/O)

pub mod analytics;
pub mod config;
pub mod errors;
pub mod http;

// Re-export commonly used items
pub use analytics::{load_client, load_client_with, ApiEndpoints, ReportingApiClient};
pub use config::{load_secret, parse_secret};
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
