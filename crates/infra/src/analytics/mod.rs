//! Analytics Reporting API integration
//!
//! Wires the secret file, the OAuth refresh-token flow and the `batchGet`
//! endpoint into a [`ReportingApiClient`] the driver can fetch through.
//!
//! ```no_run
//! # async fn demo() -> gabench_domain::Result<()> {
//! let (secret, client) = gabench_infra::analytics::load_client("secret.json")?;
//! println!("benchmarking view {}", secret.view_id);
//! # let _ = client;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod types;

use std::path::Path;

use gabench_common::{OAuthClient, OAuthConfig, TokenManager};
use gabench_domain::constants::{
    ANALYTICS_SCOPES, GOOGLE_TOKEN_ENDPOINT, REPORTING_API_BASE, TOKEN_REFRESH_THRESHOLD_SECS,
};
use gabench_domain::{Result, Secret};

pub use client::ReportingApiClient;

use crate::config::load_secret;
use crate::http::HttpClient;

/// Remote endpoints the client talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoints {
    pub reporting_base: String,
    pub token_endpoint: String,
}

impl Default for ApiEndpoints {
    fn default() -> Self {
        Self {
            reporting_base: REPORTING_API_BASE.to_string(),
            token_endpoint: GOOGLE_TOKEN_ENDPOINT.to_string(),
        }
    }
}

/// Read the secret at `secret_path` and build an authenticated client for
/// the production endpoints.
///
/// No network traffic happens here; the first access token is fetched by
/// the first report call.
///
/// # Errors
/// Returns `GaBenchError::Config` if the secret is missing or malformed.
pub fn load_client(secret_path: impl AsRef<Path>) -> Result<(Secret, ReportingApiClient)> {
    let secret = load_secret(secret_path)?;
    let client = load_client_with(&secret, &ApiEndpoints::default())?;
    Ok((secret, client))
}

/// Build a client from an already-loaded secret against `endpoints`.
///
/// # Errors
/// Returns `GaBenchError::Config` if an endpoint is not a valid URL.
pub fn load_client_with(secret: &Secret, endpoints: &ApiEndpoints) -> Result<ReportingApiClient> {
    let http_client = HttpClient::new()?;

    let mut oauth_config = OAuthConfig::new(&secret.client_id, &endpoints.token_endpoint)
        .with_scopes(ANALYTICS_SCOPES.iter().copied());
    oauth_config.set_client_secret(Some(secret.client_secret.clone()));

    let oauth_client = OAuthClient::with_http_client(oauth_config, http_client.inner().clone());
    let tokens =
        TokenManager::new(oauth_client, secret.refresh_token.clone(), TOKEN_REFRESH_THRESHOLD_SECS);

    tracing::debug!(
        reporting_base = %endpoints.reporting_base,
        token_endpoint = %endpoints.token_endpoint,
        "reporting client configured"
    );

    ReportingApiClient::new(http_client, tokens, &endpoints.reporting_base)
}
