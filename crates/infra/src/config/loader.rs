//! Secret file loader
//!
//! Reads the OAuth credential record the benchmark authenticates with.
//!
//! ## Formats
//! Detected by file extension: `.toml` is parsed as TOML, anything else
//! (including `.json` and extension-less files) as JSON. Field names are
//! camelCase in both formats:
//!
//! ```json
//! {
//!   "viewId": "123456",
//!   "clientId": "xxx.apps.googleusercontent.com",
//!   "clientSecret": "...",
//!   "refreshToken": "1//..."
//! }
//! ```
//!
//! ## Environment Variables
//! - `GABENCH_VIEW_ID`: replaces the file's view id when set and non-empty

use std::path::Path;

use gabench_domain::{GaBenchError, Result, Secret};

use crate::errors::InfraError;

/// Environment variable overriding the secret's view id.
pub const VIEW_ID_ENV: &str = "GABENCH_VIEW_ID";

/// Load and validate the secret at `path`.
///
/// # Errors
/// Returns `GaBenchError::Config` if:
/// - The file does not exist or cannot be read
/// - The contents are not valid JSON/TOML
/// - A required field is missing or empty
pub fn load_secret(path: impl AsRef<Path>) -> Result<Secret> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(GaBenchError::Config(format!("secret file not found: {}", path.display())));
    }

    tracing::info!(path = %path.display(), "loading secret file");

    let contents = std::fs::read_to_string(path).map_err(|e| {
        GaBenchError::Config(format!("failed to read secret file {}: {}", path.display(), e))
    })?;

    let mut secret = parse_secret(&contents, path)?;
    apply_env_overrides(&mut secret);
    secret.validate()?;

    tracing::debug!(view_id = %secret.view_id, client_id = %secret.client_id, "secret loaded");
    Ok(secret)
}

/// Parse a secret from string content.
///
/// `path` only selects the format and labels error messages; nothing is
/// read from disk. The result is not validated.
///
/// # Errors
/// Returns `GaBenchError::Config` if the content does not match the format.
pub fn parse_secret(contents: &str, path: &Path) -> Result<Secret> {
    let is_toml = path.extension().and_then(|e| e.to_str()) == Some("toml");

    let parsed: std::result::Result<Secret, InfraError> = if is_toml {
        toml::from_str(contents).map_err(InfraError::from)
    } else {
        serde_json::from_str(contents).map_err(InfraError::from)
    };

    parsed.map_err(|InfraError(err)| match err {
        GaBenchError::Config(msg) => {
            GaBenchError::Config(format!("{}: {}", path.display(), msg))
        }
        other => other,
    })
}

fn apply_env_overrides(secret: &mut Secret) {
    if let Some(view_id) = std::env::var(VIEW_ID_ENV).ok().filter(|v| !v.trim().is_empty()) {
        tracing::info!(view_id = %view_id, "view id overridden from {}", VIEW_ID_ENV);
        secret.view_id = view_id;
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::PathBuf;
    use std::sync::Mutex;

    use once_cell::sync::Lazy;
    use tempfile::{Builder, NamedTempFile};

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    const JSON_SECRET: &str = r#"{
        "viewId": "123456",
        "clientId": "client.apps.googleusercontent.com",
        "clientSecret": "shh",
        "refreshToken": "1//refresh"
    }"#;

    fn secret_file(suffix: &str, contents: &str) -> NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_parse_secret_json() {
        let secret = parse_secret(JSON_SECRET, &PathBuf::from("secret.json")).unwrap();

        assert_eq!(secret.view_id, "123456");
        assert_eq!(secret.client_id, "client.apps.googleusercontent.com");
        assert_eq!(secret.client_secret, "shh");
        assert_eq!(secret.refresh_token, "1//refresh");
    }

    #[test]
    fn test_parse_secret_toml() {
        let toml_content = r#"
viewId = "987"
clientId = "id"
clientSecret = "secret"
refreshToken = "token"
"#;

        let secret = parse_secret(toml_content, &PathBuf::from("secret.toml")).unwrap();
        assert_eq!(secret.view_id, "987");
        assert_eq!(secret.refresh_token, "token");
    }

    #[test]
    fn test_parse_secret_without_extension_is_json() {
        let secret = parse_secret(JSON_SECRET, &PathBuf::from("secret")).unwrap();
        assert_eq!(secret.view_id, "123456");
    }

    #[test]
    fn test_parse_secret_invalid_json_names_file() {
        let err = parse_secret("{ \"viewId\": ", &PathBuf::from("broken.json")).unwrap_err();

        match err {
            GaBenchError::Config(msg) => {
                assert!(msg.contains("broken.json"));
                assert!(msg.contains("JSON"));
            }
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_secret_missing_field() {
        let err = parse_secret(r#"{"viewId": "1"}"#, &PathBuf::from("s.json")).unwrap_err();
        assert!(matches!(err, GaBenchError::Config(_)));
    }

    #[test]
    fn test_load_secret_not_found() {
        let err = load_secret("/nonexistent/secret.json").unwrap_err();

        match err {
            GaBenchError::Config(msg) => assert!(msg.contains("secret file not found")),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_secret_rejects_empty_field() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        std::env::remove_var(VIEW_ID_ENV);

        let file = secret_file(
            ".json",
            r#"{"viewId": "1", "clientId": "id", "clientSecret": " ", "refreshToken": "rt"}"#,
        );

        let err = load_secret(file.path()).unwrap_err();
        match err {
            GaBenchError::Config(msg) => assert!(msg.contains("clientSecret")),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn test_view_id_env_override() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        let file = secret_file(".json", JSON_SECRET);

        std::env::set_var(VIEW_ID_ENV, "override-42");
        let overridden = load_secret(file.path());
        std::env::set_var(VIEW_ID_ENV, "  ");
        let blank = load_secret(file.path());
        std::env::remove_var(VIEW_ID_ENV);

        assert_eq!(overridden.unwrap().view_id, "override-42");
        assert_eq!(blank.unwrap().view_id, "123456");
    }
}
