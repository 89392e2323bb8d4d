//! Traits for OAuth operations
//!
//! These traits enable dependency injection and testing by abstracting the
//! OAuth token endpoint.

use async_trait::async_trait;

use super::client::OAuthClientError;
use super::types::TokenSet;

/// Trait for OAuth client operations
#[async_trait]
pub trait OAuthClientTrait: Send + Sync {
    /// Refresh access token using refresh token
    ///
    /// # Returns
    /// New `TokenSet` with updated access token and possibly a rotated
    /// refresh token
    ///
    /// # Errors
    /// Returns error if refresh fails or token is invalid/revoked
    async fn refresh_access_token(&self, refresh_token: &str)
        -> Result<TokenSet, OAuthClientError>;
}
