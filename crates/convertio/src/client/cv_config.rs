//! Configuration for the Convertio client.

use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{Error, Result};

/// Default base URL of the Convertio API.
pub const DEFAULT_BASE_URL: &str = "http://api.convertio.co";

/// Default timeout for API requests: 30 seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the Convertio client.
///
/// The API key is never printed: `Debug` redacts it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct ConvertioConfig {
    /// Convertio API key
    #[cfg_attr(
        feature = "config",
        arg(long = "convertio-api-key", env = "CONVERTIO_API_KEY")
    )]
    pub api_key: String,

    /// Base URL of the Convertio API
    #[cfg_attr(
        feature = "config",
        arg(
            long = "convertio-base-url",
            env = "CONVERTIO_BASE_URL",
            default_value = DEFAULT_BASE_URL
        )
    )]
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (0 uses the default)
    #[cfg_attr(
        feature = "config",
        arg(
            long = "convertio-timeout",
            env = "CONVERTIO_TIMEOUT",
            default_value_t = DEFAULT_TIMEOUT_SECS
        )
    )]
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent sent with every request
    #[cfg_attr(
        feature = "config",
        arg(long = "convertio-user-agent", env = "CONVERTIO_USER_AGENT")
    )]
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_user_agent() -> String {
    format!("convertio/{}", env!("CARGO_PKG_VERSION"))
}

impl std::fmt::Debug for ConvertioConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConvertioConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl ConvertioConfig {
    /// Creates a configuration with the given API key and default settings.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_base_url(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
        }
    }

    /// Set the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout, rounded up to whole seconds.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        let partial = u64::from(timeout.subsec_nanos() > 0);
        self.timeout_secs = timeout.as_secs().saturating_add(partial);
        self
    }

    /// Set the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Returns the effective timeout, using default if zero.
    pub fn effective_timeout(&self) -> Duration {
        match self.timeout_secs {
            0 => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            secs => Duration::from_secs(secs),
        }
    }

    /// Returns the effective user agent, using default if unset or empty.
    pub fn effective_user_agent(&self) -> String {
        match self.user_agent.as_deref() {
            Some(agent) if !agent.trim().is_empty() => agent.to_string(),
            _ => default_user_agent(),
        }
    }

    /// Checks the configuration and returns the parsed base URL.
    pub fn validate(&self) -> Result<Url> {
        if self.api_key.trim().is_empty() {
            return Err(Error::config("API key must not be empty"));
        }

        let base_url = Url::parse(&self.base_url).map_err(|e| {
            Error::config(format!("Invalid base URL '{}': {}", self.base_url, e))
        })?;

        if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
            return Err(Error::config(format!(
                "Base URL '{}' must be an http or https URL",
                self.base_url
            )));
        }

        Ok(base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ConvertioConfig::new("key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.effective_timeout(), Duration::from_secs(30));
        assert!(config.effective_user_agent().starts_with("convertio/"));
    }

    #[test]
    fn test_effective_timeout_uses_default_when_zero() {
        let config = ConvertioConfig::new("key").with_timeout(Duration::ZERO);
        assert_eq!(
            config.effective_timeout(),
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        );

        let config = ConvertioConfig::new("key").with_timeout(Duration::from_secs(5));
        assert_eq!(config.effective_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_sub_second_timeout_rounds_up() {
        let config = ConvertioConfig::new("key").with_timeout(Duration::from_millis(500));
        assert_eq!(config.timeout_secs, 1);
        assert_eq!(config.effective_timeout(), Duration::from_secs(1));

        let config = ConvertioConfig::new("key").with_timeout(Duration::from_millis(2500));
        assert_eq!(config.effective_timeout(), Duration::from_secs(3));
    }

    #[test]
    fn test_effective_user_agent_uses_default_when_empty() {
        let config = ConvertioConfig::new("key").with_user_agent("");
        assert!(config.effective_user_agent().starts_with("convertio/"));

        let config = ConvertioConfig::new("key").with_user_agent("my-app/1.0");
        assert_eq!(config.effective_user_agent(), "my-app/1.0");
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = ConvertioConfig::new("super-secret");
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_validate() {
        let url = ConvertioConfig::new("key").validate().unwrap();
        assert_eq!(url.as_str(), "http://api.convertio.co/");

        assert!(ConvertioConfig::new("  ").validate().is_err());
        assert!(
            ConvertioConfig::new("key")
                .with_base_url("not a url")
                .validate()
                .is_err()
        );
        assert!(
            ConvertioConfig::new("key")
                .with_base_url("ftp://api.convertio.co")
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_deserialize_applies_defaults() {
        let config: ConvertioConfig =
            serde_json::from_value(serde_json::json!({"api_key": "key"})).unwrap();
        assert_eq!(config, ConvertioConfig::new("key"));
    }
}
