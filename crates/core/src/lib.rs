//! # gabench Core
//!
//! Pure benchmarking logic - no HTTP or credential handling.
//!
//! This crate contains:
//! - The request driver (sequential and fixed-concurrency modes)
//! - Pacing and date-walk policies
//! - Port interfaces (traits) implemented by infrastructure
//!
//! ## Architecture Principles
//! - Only depends on `gabench-domain`
//! - All network access via the [`ReportFetcher`] port
//! - All user-facing output via the [`ProgressReporter`] port

pub mod driver;
pub mod ports;

// Re-export specific items to avoid ambiguity
pub use driver::pacing::batch_padding;
pub use driver::schedule::{batch_sizes, date_for_request};
pub use driver::RequestDriver;
pub use ports::{NoopReporter, ProgressReporter, ReportFetcher};
