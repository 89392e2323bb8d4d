//! Modular common utilities shared across gabench crates.
//!
//! Currently hosts the OAuth 2.0 refresh-token machinery used to
//! authenticate against the Reporting API.

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod auth;

pub use auth::{
    OAuthClient, OAuthClientError, OAuthClientTrait, OAuthConfig, TokenManager,
    TokenManagerError, TokenSet,
};
