//! # gabench Domain
//!
//! Business domain types and models for gabench.
//!
//! This crate contains:
//! - Configuration records (credential file, run configuration)
//! - Report request/response value objects
//! - Per-request, per-batch and per-run outcomes
//! - Domain error types and Result definitions
//! - Domain constants
//!
//! ## Architecture
//! - No dependencies on other gabench crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
