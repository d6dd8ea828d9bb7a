//! Client configuration

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::errors::{Result, SerproError};
use crate::types::Credentials;

/// Gateway client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerproConfig {
    /// Gateway base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Optional `User-Agent` header value
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Consumer key and secret
    pub credentials: CredentialsConfig,
}

/// Consumer key/secret as read from the environment or a config file
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// Consumer key (client id)
    pub consumer_key: String,
    /// Consumer secret, never serialized back out
    #[serde(skip_serializing)]
    pub consumer_secret: String,
}

impl fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"***")
            .finish()
    }
}

impl SerproConfig {
    /// Configuration for the production gateway with the given credentials.
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        Self {
            credentials: CredentialsConfig {
                consumer_key: consumer_key.into(),
                consumer_secret: consumer_secret.into(),
            },
            ..Self::default()
        }
    }

    /// Timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Credentials for the token authority.
    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.credentials.consumer_key, &self.credentials.consumer_secret)
    }

    /// Reject configurations that cannot produce a working client.
    ///
    /// # Errors
    /// Returns `SerproError::Config` for empty credentials, a zero timeout or
    /// a base URL that is not http(s).
    pub fn validate(&self) -> Result<()> {
        if self.credentials.consumer_key.trim().is_empty() {
            return Err(SerproError::Config("consumer key is empty".into()));
        }
        if self.credentials.consumer_secret.is_empty() {
            return Err(SerproError::Config("consumer secret is empty".into()));
        }
        if self.timeout_secs == 0 {
            return Err(SerproError::Config("timeout must be greater than zero".into()));
        }
        if !(self.base_url.starts_with("https://") || self.base_url.starts_with("http://")) {
            return Err(SerproError::Config(format!(
                "base URL must use http or https: {}",
                self.base_url
            )));
        }
        Ok(())
    }
}

impl Default for SerproConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: None,
            credentials: CredentialsConfig::default(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_production_defaults() {
        let config = SerproConfig::new("key", "secret");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_missing_credentials() {
        let err = SerproConfig::default().validate().unwrap_err();
        assert!(matches!(err, SerproError::Config(msg) if msg.contains("consumer key")));

        let config = SerproConfig::new("key", "");
        assert!(matches!(config.validate(), Err(SerproError::Config(_))));
    }

    #[test]
    fn validate_rejects_bad_base_url_and_timeout() {
        let mut config = SerproConfig::new("key", "secret");
        config.base_url = "ftp://example.com".into();
        assert!(config.validate().is_err());

        let mut config = SerproConfig::new("key", "secret");
        config.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn secret_is_not_serialized_or_debug_printed() {
        let config = SerproConfig::new("key", "hunter2");
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("hunter2"));
        assert!(!format!("{config:?}").contains("hunter2"));
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: SerproConfig =
            serde_json::from_str(r#"{"credentials":{"consumer_key":"k","consumer_secret":"s"}}"#)
                .unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.credentials().client_id(), "k");
    }
}
