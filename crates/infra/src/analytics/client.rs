/// Reporting API v4 client used as the driver's report fetcher
use async_trait::async_trait;
use gabench_common::{OAuthClient, OAuthClientTrait, TokenManager};
use gabench_core::ReportFetcher;
use gabench_domain::constants::QUOTA_USER;
use gabench_domain::{GaBenchError, ReportRequest, ReportResponse, Result};
use reqwest::{Method, StatusCode};
use tracing::debug;
use url::Url;

use super::types::{ApiErrorEnvelope, BatchGetRequest, BatchGetResponse};
use crate::errors::InfraError;
use crate::http::HttpClient;

const BATCH_GET_PATH: &str = "v4/reports:batchGet";

/// Authenticated client for `reports:batchGet`.
///
/// Cheap to share behind an `Arc`: concurrent callers reuse one HTTP
/// connection pool and one cached access token.
pub struct ReportingApiClient<C: OAuthClientTrait + 'static = OAuthClient> {
    http_client: HttpClient,
    tokens: TokenManager<C>,
    batch_get_url: Url,
}

impl<C: OAuthClientTrait + 'static> ReportingApiClient<C> {
    /// Create a client against `api_base` (e.g.
    /// `https://analyticsreporting.googleapis.com`).
    ///
    /// # Errors
    /// Returns `GaBenchError::Config` if `api_base` is not an absolute URL.
    pub fn new(http_client: HttpClient, tokens: TokenManager<C>, api_base: &str) -> Result<Self> {
        Ok(Self { http_client, tokens, batch_get_url: batch_get_url(api_base)? })
    }

    /// Fully-qualified `batchGet` URL including the quota user.
    pub fn batch_get_url(&self) -> &Url {
        &self.batch_get_url
    }

    pub fn token_manager(&self) -> &TokenManager<C> {
        &self.tokens
    }

    async fn access_token(&self) -> Result<String> {
        self.tokens.get_access_token().await.map_err(|err| InfraError::from(err).into())
    }

    async fn call_api(&self, request: &ReportRequest) -> Result<ReportResponse> {
        let token = self.access_token().await?;
        let body = BatchGetRequest::from(request);

        let builder = self
            .http_client
            .request(Method::POST, self.batch_get_url.clone())
            .bearer_auth(token)
            .json(&body);

        let response = self.http_client.send(builder).await?;
        let status = response.status();
        let text = response.text().await.map_err(|err| GaBenchError::from(InfraError::from(err)))?;

        debug!(status = status.as_u16(), bytes = text.len(), "received report response");

        if !status.is_success() {
            return Err(api_error(status, &text));
        }

        let decoded: BatchGetResponse = serde_json::from_str(&text).map_err(|err| {
            GaBenchError::Api {
                status: status.as_u16(),
                message: format!("failed to decode report response: {err}"),
            }
        })?;

        Ok(decoded.summarize())
    }
}

#[async_trait]
impl<C: OAuthClientTrait + 'static> ReportFetcher for ReportingApiClient<C> {
    /// Exchanges the refresh token before any report is requested.
    async fn warm_up(&self) -> Result<()> {
        self.access_token().await?;
        debug!("access token obtained");
        Ok(())
    }

    async fn fetch_report(&self, request: &ReportRequest) -> Result<ReportResponse> {
        debug!(
            view_id = %request.view_id,
            date = %request.date_range.start,
            metric = %request.metric_expression,
            "fetching report"
        );
        self.call_api(request).await
    }
}

fn batch_get_url(api_base: &str) -> Result<Url> {
    let base = api_base.trim_end_matches('/');
    let mut url = Url::parse(&format!("{base}/{BATCH_GET_PATH}"))
        .map_err(|err| GaBenchError::Config(format!("invalid API base URL '{api_base}': {err}")))?;

    if url.cannot_be_a_base() {
        return Err(GaBenchError::Config(format!("API base URL is not hierarchical: {api_base}")));
    }

    url.query_pairs_mut().append_pair("quotaUser", QUOTA_USER);
    Ok(url)
}

/// Map a non-2xx response to `Api`, preferring the Google error envelope.
fn api_error(status: StatusCode, body: &str) -> GaBenchError {
    let message = match serde_json::from_str::<ApiErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.describe(),
        Err(_) if body.trim().is_empty() => {
            status.canonical_reason().unwrap_or("unknown status").to_string()
        }
        Err(_) => body.trim().to_string(),
    };

    GaBenchError::Api { status: status.as_u16(), message }
}
