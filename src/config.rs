//! Client configuration
//!
//! Loaded from a YAML file or from `TEMPODB_*` environment variables.
//!
//! ```yaml
//! database_id: my-db
//! api_key: my-key
//! api_secret: my-secret
//! base_url: https://api.tempo-db.com/v1/
//! timeout_secs: 30
//! requests_per_second: 10
//! ```

use crate::error::{Error, Result, ResultExt};
use crate::http::{default_user_agent, HttpTransportConfig, RateLimiterConfig, DEFAULT_BASE_URL};
use crate::types::OptionStringExt;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable holding the database id
pub const ENV_DATABASE_ID: &str = "TEMPODB_DATABASE_ID";
/// Environment variable holding the API key
pub const ENV_API_KEY: &str = "TEMPODB_API_KEY";
/// Environment variable holding the API secret
pub const ENV_API_SECRET: &str = "TEMPODB_API_SECRET";
/// Environment variable overriding the base URL
pub const ENV_BASE_URL: &str = "TEMPODB_BASE_URL";

/// Settings needed to talk to the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Database the credentials belong to
    #[serde(default)]
    pub database_id: Option<String>,

    /// API key
    #[serde(default)]
    pub api_key: String,

    /// API secret
    #[serde(default)]
    pub api_secret: String,

    /// Base URL of the versioned API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Client-side request pacing
    #[serde(default)]
    pub requests_per_second: Option<u32>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl ClientConfig {
    /// Create a config for the given credentials with default settings
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            database_id: None,
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: None,
            requests_per_second: None,
        }
    }

    /// Set the base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the database id
    #[must_use]
    pub fn with_database_id(mut self, database_id: impl Into<String>) -> Self {
        self.database_id = Some(database_id.into());
        self
    }

    /// Load from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&content)
    }

    /// Parse from a YAML string
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read from `TEMPODB_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup(ENV_API_KEY)
            .none_if_empty()
            .ok_or_else(|| Error::missing_config_field(ENV_API_KEY))?;
        let api_secret = lookup(ENV_API_SECRET)
            .none_if_empty()
            .ok_or_else(|| Error::missing_config_field(ENV_API_SECRET))?;

        let mut config = Self::new(api_key, api_secret);
        config.database_id = lookup(ENV_DATABASE_ID).none_if_empty();
        if let Some(base_url) = lookup(ENV_BASE_URL).none_if_empty() {
            config.base_url = base_url;
        }
        Ok(config)
    }

    /// Check required fields
    pub fn validate(&self) -> Result<()> {
        if self.api_key.is_empty() {
            return Err(Error::missing_config_field("api_key"));
        }
        if self.api_secret.is_empty() {
            return Err(Error::missing_config_field("api_secret"));
        }
        if self.timeout_secs == 0 {
            return Err(Error::config("timeout_secs must be greater than zero"));
        }
        Ok(())
    }

    /// Build the HTTP transport configuration
    pub fn transport_config(&self) -> HttpTransportConfig {
        let mut builder = HttpTransportConfig::builder(&self.api_key, &self.api_secret)
            .base_url(&self.base_url)
            .timeout(Duration::from_secs(self.timeout_secs))
            .user_agent(
                self.user_agent
                    .clone()
                    .unwrap_or_else(default_user_agent),
            );
        if let Some(rps) = self.requests_per_second {
            builder = builder.rate_limit(RateLimiterConfig::per_second(rps));
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_from_yaml_str_defaults() {
        let config = ClientConfig::from_yaml_str("api_key: k\napi_secret: s\n").unwrap();

        assert_eq!(config, ClientConfig::new("k", "s"));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_from_yaml_str_full() {
        let yaml = r"
database_id: db
api_key: k
api_secret: s
base_url: http://localhost:4242/v1/
timeout_secs: 5
user_agent: custom/1.0
requests_per_second: 3
";
        let config = ClientConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.database_id.as_deref(), Some("db"));
        assert_eq!(config.requests_per_second, Some(3));

        let transport = config.transport_config();
        assert_eq!(transport.base_url, "http://localhost:4242/v1/");
        assert_eq!(transport.timeout, Duration::from_secs(5));
        assert_eq!(transport.user_agent, "custom/1.0");
        assert_eq!(transport.rate_limit, Some(RateLimiterConfig::per_second(3)));
        assert_eq!(transport.credentials.key(), "k");
    }

    #[test]
    fn test_missing_secret_is_rejected() {
        let err = ClientConfig::from_yaml_str("api_key: k\n").unwrap_err();
        assert!(matches!(err, Error::MissingConfigField { ref field } if field == "api_secret"));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let err = ClientConfig::from_yaml_str("api_key: k\napi_secret: s\ntimeout_secs: 0\n")
            .unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_invalid_yaml() {
        let err = ClientConfig::from_yaml_str("api_key: [").unwrap_err();
        assert!(matches!(err, Error::YamlParse(_)));
    }

    #[test]
    fn test_from_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_key: k\napi_secret: s\ndatabase_id: db").unwrap();

        let config = ClientConfig::from_yaml_file(file.path()).unwrap();
        assert_eq!(config.database_id.as_deref(), Some("db"));
    }

    #[test]
    fn test_from_yaml_file_missing() {
        let err = ClientConfig::from_yaml_file("/nonexistent/tempodb.yaml").unwrap_err();
        assert!(err.to_string().starts_with("Failed to read config file"));
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = [
            (ENV_API_KEY, "k"),
            (ENV_API_SECRET, "s"),
            (ENV_DATABASE_ID, ""),
            (ENV_BASE_URL, "http://localhost/v1/"),
        ]
        .into_iter()
        .collect();

        let config = ClientConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string())).unwrap();
        assert_eq!(config.api_key, "k");
        assert_eq!(config.database_id, None);
        assert_eq!(config.base_url, "http://localhost/v1/");
    }

    #[test]
    fn test_from_lookup_requires_key() {
        let err = ClientConfig::from_lookup(|_| None).unwrap_err();
        assert!(matches!(err, Error::MissingConfigField { .. }));
    }

    #[test]
    fn test_default_user_agent_is_used() {
        let transport = ClientConfig::new("k", "s").transport_config();
        assert_eq!(transport.user_agent, default_user_agent());
        assert!(transport.rate_limit.is_none());
    }
}
