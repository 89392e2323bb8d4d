//! OAuth 2.0 client for the refresh-token grant
//!
//! Exchanges a long-lived refresh token for a short-lived access token
//! (RFC 6749 §6).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;

use super::traits::OAuthClientTrait;
use super::types::{OAuthConfig, OAuthError, TokenResponse, TokenSet};

/// Error type for OAuth client operations
#[derive(Debug)]
pub enum OAuthClientError {
    /// HTTP request failed
    RequestFailed(reqwest::Error),

    /// OAuth server returned a standard error body
    OAuthError(OAuthError),

    /// Token endpoint answered with a non-success status and no OAuth body
    Http { status: StatusCode, body: String },

    /// Failed to parse response
    ParseError(String),

    /// No refresh token available
    NoRefreshToken,
}

impl std::fmt::Display for OAuthClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RequestFailed(e) => write!(f, "HTTP request failed: {e}"),
            Self::OAuthError(e) => write!(f, "OAuth error: {e}"),
            Self::Http { status, body } => write!(f, "token endpoint returned {status}: {body}"),
            Self::ParseError(msg) => write!(f, "Parse error: {msg}"),
            Self::NoRefreshToken => write!(f, "No refresh token available"),
        }
    }
}

impl std::error::Error for OAuthClientError {}

impl From<reqwest::Error> for OAuthClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::RequestFailed(err)
    }
}

/// OAuth 2.0 client
#[derive(Debug, Clone)]
pub struct OAuthClient {
    config: OAuthConfig,
    client: Client,
}

impl OAuthClient {
    /// Create a new OAuth client with the given configuration
    ///
    /// # Examples
    /// ```
    /// use gabench_common::auth::{OAuthClient, OAuthConfig};
    ///
    /// let config = OAuthConfig::google("client_id", "client_secret");
    /// let client = OAuthClient::new(config);
    /// assert_eq!(client.config().client_id, "client_id");
    /// ```
    #[must_use]
    pub fn new(config: OAuthConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { config, client }
    }

    /// Create a client that reuses an existing HTTP connection pool.
    #[must_use]
    pub fn with_http_client(config: OAuthConfig, client: Client) -> Self {
        Self { config, client }
    }

    /// Refresh access token using refresh token
    ///
    /// # Returns
    /// New `TokenSet` with the fresh access token; `refresh_token` is set only
    /// when the server rotated it
    ///
    /// # Errors
    /// Returns error if:
    /// - No refresh token provided
    /// - The token endpoint is unreachable
    /// - The token is invalid/revoked
    pub async fn refresh_access_token(
        &self,
        refresh_token: &str,
    ) -> Result<TokenSet, OAuthClientError> {
        if refresh_token.is_empty() {
            return Err(OAuthClientError::NoRefreshToken);
        }

        let scope = self.config.scopes.join(" ");
        let mut params = vec![
            ("grant_type", "refresh_token"),
            ("client_id", self.config.client_id.as_str()),
            ("refresh_token", refresh_token),
        ];

        if let Some(secret) = self.config.client_secret() {
            params.push(("client_secret", secret));
        }

        if !scope.is_empty() {
            params.push(("scope", scope.as_str()));
        }

        debug!(token_url = self.config.token_url(), "refreshing access token");
        let response = self.client.post(self.config.token_url()).form(&params).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match serde_json::from_str::<OAuthError>(&body) {
                Ok(error) => OAuthClientError::OAuthError(error),
                Err(_) => OAuthClientError::Http { status, body },
            });
        }

        let token_response: TokenResponse =
            response.json().await.map_err(|e| OAuthClientError::ParseError(e.to_string()))?;

        Ok(token_response.into())
    }

    /// Get a reference to the OAuth configuration
    #[must_use]
    pub fn config(&self) -> &OAuthConfig {
        &self.config
    }
}

#[async_trait]
impl OAuthClientTrait for OAuthClient {
    async fn refresh_access_token(
        &self,
        refresh_token: &str,
    ) -> Result<TokenSet, OAuthClientError> {
        self.refresh_access_token(refresh_token).await
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for auth::client.
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client_for(server: &MockServer) -> OAuthClient {
        let mut config = OAuthConfig::google("test_client_id", "test_secret");
        config.set_token_endpoint(format!("{}/token", server.uri()));
        OAuthClient::new(config)
    }

    #[tokio::test]
    async fn test_refresh_posts_refresh_token_grant() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .and(body_string_contains("grant_type=refresh_token"))
            .and(body_string_contains("refresh_token=rt-1"))
            .and(body_string_contains("client_id=test_client_id"))
            .and(body_string_contains("client_secret=test_secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "ya29.fresh",
                "expires_in": 3599,
                "token_type": "Bearer"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let tokens = client_for(&server).refresh_access_token("rt-1").await.unwrap();

        assert_eq!(tokens.access_token, "ya29.fresh");
        assert_eq!(tokens.expires_in, 3599);
        assert!(tokens.refresh_token.is_none());
    }

    #[tokio::test]
    async fn test_refresh_sends_configured_scopes() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string_contains("scope=a.read+b.write"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "scoped",
                "expires_in": 3600,
                "scope": "a.read b.write"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut config = OAuthConfig::google("id", "secret").with_scopes(["a.read", "b.write"]);
        config.set_token_endpoint(format!("{}/token", server.uri()));

        let tokens = OAuthClient::new(config).refresh_access_token("rt").await.unwrap();
        assert_eq!(tokens.scope.as_deref(), Some("a.read b.write"));
    }

    #[tokio::test]
    async fn test_refresh_surfaces_oauth_error_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": "invalid_grant",
                "error_description": "Bad Request"
            })))
            .mount(&server)
            .await;

        let result = client_for(&server).refresh_access_token("revoked").await;

        match result {
            Err(OAuthClientError::OAuthError(error)) => assert_eq!(error.error, "invalid_grant"),
            other => panic!("expected OAuth error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_refresh_keeps_non_oauth_error_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
            .mount(&server)
            .await;

        let result = client_for(&server).refresh_access_token("rt").await;

        match result {
            Err(OAuthClientError::Http { status, body }) => {
                assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
                assert_eq!(body, "upstream unavailable");
            }
            other => panic!("expected HTTP error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_refresh_with_empty_token() {
        let client = OAuthClient::new(OAuthConfig::google("id", "secret"));

        let result = client.refresh_access_token("").await;
        assert!(matches!(result, Err(OAuthClientError::NoRefreshToken)));
    }
}
