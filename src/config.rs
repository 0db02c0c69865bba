//! API configuration
//!
//! Endpoint URLs and client credentials, read once at startup from an INI
//! file with an `[api]` section:
//!
//! ```ini
//! [api]
//! base_url = https://api.example.com
//! auth_url = https://auth.example.com/oauth/token
//! client_id = my-client
//! client_secret = my-secret
//! ```
//!
//! Any value can be overridden through the environment, e.g.
//! `API_LOAD_API__CLIENT_SECRET`.

use crate::error::{Error, Result};
use config::{ConfigError, Environment, File, FileFormat, Map};
use std::fmt;
use std::path::Path;
use url::Url;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "config.ini";

/// Prefix for environment overrides
const ENV_PREFIX: &str = "API_LOAD";

/// Immutable API settings consumed by the Authenticator and the runner
#[derive(Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL of the REST API that data is loaded into
    pub base_url: String,
    /// Token endpoint for the client-credentials exchange
    pub auth_url: String,
    /// OAuth2 client ID
    pub client_id: String,
    /// OAuth2 client secret
    pub client_secret: String,
}

impl ApiConfig {
    /// Create a config from explicit values
    pub fn new(
        base_url: impl Into<String>,
        auth_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            auth_url: auth_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Load the `[api]` section from an INI file, applying environment overrides
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Load with an explicit environment; `None` reads the process environment
    fn load_with_env(path: impl AsRef<Path>, env: Option<Map<String, String>>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::file_not_found(path.display().to_string()));
        }

        let settings = config::Config::builder()
            .add_source(File::new(&path.to_string_lossy(), FileFormat::Ini).required(true))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .source(env),
            )
            .build()
            .map_err(|e| Error::config(format!("Failed to read {}: {e}", path.display())))?;

        let field = |name: &str| -> Result<String> {
            let key = format!("api.{name}");
            settings.get_string(&key).map_err(|e| match e {
                ConfigError::NotFound(_) => Error::missing_field(key),
                other => Error::config(other.to_string()),
            })
        };

        let config = Self {
            base_url: field("base_url")?,
            auth_url: field("auth_url")?,
            client_id: field("client_id")?,
            client_secret: field("client_secret")?,
        };

        tracing::debug!(path = %path.display(), "Loaded API configuration");
        Ok(config)
    }

    /// Check that every field is present and both URLs are well-formed
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("api.base_url", &self.base_url),
            ("api.auth_url", &self.auth_url),
            ("api.client_id", &self.client_id),
            ("api.client_secret", &self.client_secret),
        ] {
            if value.trim().is_empty() {
                return Err(Error::missing_field(field));
            }
        }

        for (field, value) in [("api.base_url", &self.base_url), ("api.auth_url", &self.auth_url)] {
            Url::parse(value).map_err(|source| Error::InvalidUrl {
                field: field.to_string(),
                source,
            })?;
        }

        Ok(())
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("auth_url", &self.auth_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_ini(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".ini")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_config() {
        let file = write_ini(
            "[api]\n\
             base_url = https://api.example.com\n\
             auth_url = https://auth.example.com/oauth/token\n\
             client_id = my-client\n\
             client_secret = my-secret\n",
        );

        let config = ApiConfig::load_with_env(file.path(), Some(Map::new())).unwrap();
        assert_eq!(
            config,
            ApiConfig::new(
                "https://api.example.com",
                "https://auth.example.com/oauth/token",
                "my-client",
                "my-secret",
            )
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides_file_value() {
        let file = write_ini(
            "[api]\n\
             base_url = https://api.example.com\n\
             auth_url = https://auth.example.com/oauth/token\n\
             client_id = my-client\n\
             client_secret = file-secret\n",
        );

        let mut env = Map::new();
        env.insert(
            "API_LOAD_API__CLIENT_SECRET".to_string(),
            "env-secret".to_string(),
        );
        env.insert("CLIENT_ID".to_string(), "ignored".to_string());

        let config = ApiConfig::load_with_env(file.path(), Some(env)).unwrap();
        assert_eq!(config.client_secret, "env-secret");
        assert_eq!(config.client_id, "my-client");
    }

    #[test]
    fn test_env_supplies_missing_field() {
        let file = write_ini(
            "[api]\n\
             base_url = https://api.example.com\n\
             auth_url = https://auth.example.com/oauth/token\n\
             client_id = my-client\n",
        );

        let mut env = Map::new();
        env.insert(
            "API_LOAD_API__CLIENT_SECRET".to_string(),
            "env-secret".to_string(),
        );

        let config = ApiConfig::load_with_env(file.path(), Some(env)).unwrap();
        assert_eq!(config.client_secret, "env-secret");
    }

    #[test]
    fn test_load_missing_file() {
        let err = ApiConfig::load("/definitely/not/here/config.ini").unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_load_missing_field() {
        let file = write_ini(
            "[api]\n\
             base_url = https://api.example.com\n\
             auth_url = https://auth.example.com/oauth/token\n\
             client_id = my-client\n",
        );

        let err = ApiConfig::load_with_env(file.path(), Some(Map::new())).unwrap_err();
        match err {
            Error::MissingConfigField { field } => assert_eq!(field, "api.client_secret"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_validate_empty_field() {
        let config = ApiConfig::new("https://api.example.com", "https://auth", "", "secret");
        let err = config.validate().unwrap_err();
        assert!(matches!(err, Error::MissingConfigField { field } if field == "api.client_id"));
    }

    #[test]
    fn test_validate_invalid_url() {
        let config = ApiConfig::new("https://api.example.com", "not a url", "id", "secret");
        let err = config.validate().unwrap_err();
        assert!(matches!(err, Error::InvalidUrl { field, .. } if field == "api.auth_url"));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = ApiConfig::new("https://a", "https://b", "id", "super-secret");
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
