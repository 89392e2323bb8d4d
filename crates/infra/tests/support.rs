//! Shared fixtures for infra integration tests: a mocked token endpoint and
//! Reporting API on one wiremock server.

use gabench_domain::Secret;
use gabench_infra::ApiEndpoints;
use serde_json::{json, Value};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const ACCESS_TOKEN: &str = "ya29.test-access";
pub const BATCH_GET_PATH: &str = "/v4/reports:batchGet";
pub const TOKEN_PATH: &str = "/token";

pub fn test_secret() -> Secret {
    Secret {
        view_id: "123456".into(),
        client_id: "bench.apps.googleusercontent.com".into(),
        client_secret: "client-secret".into(),
        refresh_token: "1//refresh-token".into(),
    }
}

pub fn secret_json() -> String {
    serde_json::to_string_pretty(&test_secret()).expect("secret serializes")
}

/// A `batchGet` response with one report and a single total.
pub fn report_body(total: &str) -> Value {
    json!({
        "reports": [{
            "columnHeader": {
                "metricHeader": { "metricHeaderEntries": [{ "name": "ga:sessions", "type": "INTEGER" }] }
            },
            "data": {
                "rows": [{ "metrics": [{ "values": [total] }] }],
                "totals": [{ "values": [total] }],
                "rowCount": 1
            }
        }]
    })
}

pub struct MockApi {
    pub server: MockServer,
}

impl MockApi {
    pub async fn start() -> Self {
        Self { server: MockServer::start().await }
    }

    pub fn endpoints(&self) -> ApiEndpoints {
        ApiEndpoints {
            reporting_base: self.server.uri(),
            token_endpoint: format!("{}{}", self.server.uri(), TOKEN_PATH),
        }
    }

    /// Token endpoint granting [`ACCESS_TOKEN`]; exactly `expected` exchanges.
    pub async fn mount_token(&self, expected: u64) {
        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .and(body_string_contains("grant_type=refresh_token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": ACCESS_TOKEN,
                "expires_in": 3600,
                "token_type": "Bearer"
            })))
            .expect(expected)
            .mount(&self.server)
            .await;
    }

    /// Report endpoint answering every call with `total`.
    pub async fn mount_report(&self, total: &str) {
        Mock::given(method("POST"))
            .and(path(BATCH_GET_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(report_body(total)))
            .mount(&self.server)
            .await;
    }

    pub async fn report_calls(&self) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|request| request.url.path() == BATCH_GET_PATH)
            .count()
    }
}
