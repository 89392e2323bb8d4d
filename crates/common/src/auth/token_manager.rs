//! Token manager with refresh-before-expiry
//!
//! Manages the access token lifecycle for a single long-lived refresh token:
//! - Lazy first exchange on demand
//! - Cached access token shared by concurrent callers
//! - Refresh once the token is within the threshold of expiry
//! - Adoption of rotated refresh tokens

use tokio::sync::RwLock;
use tracing::{debug, info};

use super::client::OAuthClientError;
use super::traits::OAuthClientTrait;
use super::types::TokenSet;

/// Error type for token manager operations
#[derive(Debug)]
pub enum TokenManagerError {
    /// OAuth operation failed
    OAuthError(OAuthClientError),

    /// No refresh token available
    NoRefreshToken,
}

impl std::fmt::Display for TokenManagerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OAuthError(e) => write!(f, "OAuth error: {e}"),
            Self::NoRefreshToken => write!(f, "No refresh token available"),
        }
    }
}

impl std::error::Error for TokenManagerError {}

impl From<OAuthClientError> for TokenManagerError {
    fn from(err: OAuthClientError) -> Self {
        match err {
            OAuthClientError::NoRefreshToken => Self::NoRefreshToken,
            other => Self::OAuthError(other),
        }
    }
}

struct TokenState {
    refresh_token: String,
    current: Option<TokenSet>,
}

/// Caches the current access token and refreshes it when needed.
///
/// Safe to share behind an `Arc` across concurrent request tasks; at most one
/// caller performs a refresh while the others wait for its result.
pub struct TokenManager<C: OAuthClientTrait + 'static> {
    oauth_client: C,
    state: RwLock<TokenState>,
    refresh_threshold_seconds: i64,
}

impl<C: OAuthClientTrait + 'static> TokenManager<C> {
    /// Create a new token manager
    ///
    /// # Arguments
    /// * `oauth_client` - OAuth client for token refresh
    /// * `refresh_token` - Long-lived refresh token
    /// * `refresh_threshold_seconds` - Refresh tokens this many seconds before
    ///   expiry
    #[must_use]
    pub fn new(
        oauth_client: C,
        refresh_token: impl Into<String>,
        refresh_threshold_seconds: i64,
    ) -> Self {
        Self {
            oauth_client,
            state: RwLock::new(TokenState { refresh_token: refresh_token.into(), current: None }),
            refresh_threshold_seconds,
        }
    }

    /// Get current access token, refreshing first if it is missing or near
    /// expiry.
    ///
    /// # Errors
    /// Returns error if the refresh token is empty or the exchange fails.
    pub async fn get_access_token(&self) -> Result<String, TokenManagerError> {
        {
            let state = self.state.read().await;
            if let Some(tokens) = self.usable(&state) {
                return Ok(tokens.access_token.clone());
            }
        }

        let mut state = self.state.write().await;
        // Another caller may have refreshed while we waited for the lock.
        if let Some(tokens) = self.usable(&state) {
            debug!("access token refreshed by a concurrent caller");
            return Ok(tokens.access_token.clone());
        }

        self.refresh_locked(&mut state).await
    }

    /// Force a refresh regardless of the cached token's expiry.
    ///
    /// # Errors
    /// Returns error if the refresh token is empty or the exchange fails.
    pub async fn refresh_tokens(&self) -> Result<String, TokenManagerError> {
        let mut state = self.state.write().await;
        self.refresh_locked(&mut state).await
    }

    /// Whether an access token has been obtained.
    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.current.is_some()
    }

    /// Seconds until the cached access token expires
    pub async fn seconds_until_expiry(&self) -> Option<i64> {
        self.state.read().await.current.as_ref().and_then(TokenSet::seconds_until_expiry)
    }

    fn usable<'a>(&self, state: &'a TokenState) -> Option<&'a TokenSet> {
        state.current.as_ref().filter(|tokens| !tokens.is_expired(self.refresh_threshold_seconds))
    }

    async fn refresh_locked(&self, state: &mut TokenState) -> Result<String, TokenManagerError> {
        if state.refresh_token.is_empty() {
            return Err(TokenManagerError::NoRefreshToken);
        }

        let tokens = self.oauth_client.refresh_access_token(&state.refresh_token).await?;

        if let Some(rotated) = tokens.refresh_token.as_ref().filter(|t| !t.is_empty()) {
            debug!("refresh token rotated by authorization server");
            state.refresh_token = rotated.clone();
        }

        info!(expires_in = tokens.expires_in, "obtained access token");
        let access_token = tokens.access_token.clone();
        state.current = Some(tokens);
        Ok(access_token)
    }
}
