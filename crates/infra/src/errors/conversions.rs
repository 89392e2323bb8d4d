//! Conversions from external infrastructure errors into domain errors.

use gabench_common::{OAuthClientError, TokenManagerError};
use gabench_domain::GaBenchError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub GaBenchError);

impl From<InfraError> for GaBenchError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<GaBenchError> for InfraError {
    fn from(value: GaBenchError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoGaBenchError {
    fn into_gabench(self) -> GaBenchError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → GaBenchError */
/* -------------------------------------------------------------------------- */

impl IntoGaBenchError for HttpError {
    fn into_gabench(self) -> GaBenchError {
        if self.is_timeout() {
            return GaBenchError::Network("HTTP request timed out".into());
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return GaBenchError::Network(format!("HTTP connection failure: {self}"));
        }

        if self.is_builder() {
            return GaBenchError::InvalidInput(format!("malformed HTTP request: {self}"));
        }

        GaBenchError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_gabench())
    }
}

/* -------------------------------------------------------------------------- */
/* serde → GaBenchError */
/* -------------------------------------------------------------------------- */

impl From<serde_json::Error> for InfraError {
    fn from(value: serde_json::Error) -> Self {
        InfraError(GaBenchError::Config(format!("invalid JSON: {value}")))
    }
}

impl From<toml::de::Error> for InfraError {
    fn from(value: toml::de::Error) -> Self {
        InfraError(GaBenchError::Config(format!("invalid TOML: {value}")))
    }
}

/* -------------------------------------------------------------------------- */
/* auth errors → GaBenchError */
/* -------------------------------------------------------------------------- */

impl IntoGaBenchError for OAuthClientError {
    fn into_gabench(self) -> GaBenchError {
        match self {
            // Still an auth failure: the run cannot proceed without a token.
            OAuthClientError::RequestFailed(err) => {
                GaBenchError::Auth(format!("token endpoint unreachable: {err}"))
            }
            other => GaBenchError::Auth(other.to_string()),
        }
    }
}

impl From<OAuthClientError> for InfraError {
    fn from(value: OAuthClientError) -> Self {
        InfraError(value.into_gabench())
    }
}

impl From<TokenManagerError> for InfraError {
    fn from(value: TokenManagerError) -> Self {
        match value {
            TokenManagerError::OAuthError(err) => err.into(),
            TokenManagerError::NoRefreshToken => {
                InfraError(GaBenchError::Auth("no refresh token available".into()))
            }
        }
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
