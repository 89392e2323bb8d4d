//! OAuth 2.0 refresh-token infrastructure
//!
//! The benchmark never runs an interactive authorization flow: the secret
//! file already carries a long-lived refresh token. This module exchanges
//! that refresh token for short-lived access tokens and caches them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  TokenManager   │  Caches the access token, refreshes near expiry
//! └────────┬────────┘
//!          │
//!          └──► OAuthClient        (HTTP refresh-token grant)
//! ```
//!
//! # Usage Example
//!
//! ```no_run
//! use gabench_common::auth::{OAuthClient, OAuthConfig, TokenManager};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = OAuthConfig::google("client_id", "client_secret");
//!     let manager = TokenManager::new(OAuthClient::new(config), "1//refresh", 60);
//!
//!     let access_token = manager.get_access_token().await?;
//!     println!("Access token: {access_token}");
//!     Ok(())
//! }
//! ```
//!
//! # Module Organization
//!
//! - **[`types`]**: Core OAuth types (`TokenSet`, `OAuthConfig`, `OAuthError`)
//! - **[`client`]**: OAuth HTTP client for the refresh-token grant
//! - **[`token_manager`]**: Access-token caching with refresh-before-expiry
//! - **[`traits`]**: Seams for substituting the HTTP client in tests

pub mod client;
pub mod token_manager;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use client::{OAuthClient, OAuthClientError};
pub use token_manager::{TokenManager, TokenManagerError};
pub use traits::OAuthClientTrait;
pub use types::{OAuthConfig, OAuthError, TokenResponse, TokenSet};
