//! Configuration for Linode clients.
//!
//! [`LinodeConfig`] names the API endpoint, the personal access token and the user agent. It
//! can be built programmatically or read from the process environment with
//! [`LinodeConfig::from_env`].

use std::time::Duration;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;
use validator::Validate;

use crate::client::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
use crate::error::{Error, Result};

/// Environment variable holding the personal access token.
pub const TOKEN_ENV: &str = "LINODE_TOKEN";

/// Environment variable enabling request logging when set to a positive integer.
pub const DEBUG_ENV: &str = "LINODE_DEBUG";

/// Default API protocol.
pub const DEFAULT_API_PROTO: &str = "https";

/// Default API host.
pub const DEFAULT_API_HOST: &str = "api.linode.com";

/// Default API version.
pub const DEFAULT_API_VERSION: &str = "v4";

/// Configuration for a Linode client instance.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LinodeConfig {
    /// URL scheme, `http` or `https`
    #[serde(default = "default_api_proto")]
    pub api_proto: String,

    /// API host name, optionally with a port
    #[validate(length(min = 1))]
    #[serde(default = "default_api_host")]
    pub api_host: String,

    /// API version path segment
    #[validate(length(min = 1))]
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Personal access token; never serialized
    #[serde(skip)]
    pub token: Option<SecretString>,

    /// User agent sent with every request
    #[validate(length(min = 1))]
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[validate(range(min = 1, max = 300))]
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Log every request and response at debug level
    #[serde(default)]
    pub debug: bool,
}

fn default_api_proto() -> String {
    DEFAULT_API_PROTO.to_string()
}

fn default_api_host() -> String {
    DEFAULT_API_HOST.to_string()
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

const fn default_request_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT
}

impl LinodeConfig {
    /// Create a configuration pointing at the public API with no token.
    #[must_use]
    pub fn new() -> Self {
        Self {
            api_proto: default_api_proto(),
            api_host: default_api_host(),
            api_version: default_api_version(),
            token: None,
            user_agent: default_user_agent(),
            request_timeout_secs: default_request_timeout_secs(),
            debug: false,
        }
    }

    /// Read `LINODE_TOKEN` and `LINODE_DEBUG` from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    ///
    /// A missing token is logged and leaves the client unauthenticated. A `LINODE_DEBUG`
    /// value that is not an integer is logged and ignored.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();

        match lookup(TOKEN_ENV).filter(|token| !token.trim().is_empty()) {
            Some(token) => config.token = Some(SecretString::from(token)),
            None => warn!(variable = TOKEN_ENV, "no Linode token found in environment"),
        }

        if let Some(raw) = lookup(DEBUG_ENV) {
            match raw.trim().parse::<i64>() {
                Ok(level) => config.debug = level > 0,
                Err(err) => warn!(
                    variable = DEBUG_ENV,
                    value = %raw,
                    error = %err,
                    "ignoring non-integer debug setting"
                ),
            }
        }

        debug!(
            authenticated = config.token.is_some(),
            debug = config.debug,
            "loaded Linode configuration from environment"
        );
        config
    }

    /// Set the personal access token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(SecretString::from(token.into()));
        self
    }

    /// Set the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the URL scheme.
    #[must_use]
    pub fn with_api_proto(mut self, proto: impl Into<String>) -> Self {
        self.api_proto = proto.into();
        self
    }

    /// Set the API host.
    #[must_use]
    pub fn with_api_host(mut self, host: impl Into<String>) -> Self {
        self.api_host = host.into();
        self
    }

    /// Set the API version.
    #[must_use]
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Set request timeout in seconds.
    #[must_use]
    pub const fn with_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_secs = seconds;
        self
    }

    /// Enable or disable request logging.
    #[must_use]
    pub const fn with_debug(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        self
    }

    /// Get the request timeout as a Duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate field ranges and the URL scheme.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] describing the first problem found.
    pub fn validate_config(&self) -> Result<()> {
        self.validate()
            .map_err(|e| Error::ConfigError(format!("Invalid configuration: {e}")))?;

        match self.api_proto.as_str() {
            "http" | "https" => Ok(()),
            other => Err(Error::ConfigError(format!(
                "Invalid configuration: unsupported protocol `{other}`"
            ))),
        }
    }

    /// Base URL all resource paths are resolved against, e.g. `https://api.linode.com/v4/`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEndpoint`] if the parts do not form a valid URL.
    pub fn base_url(&self) -> Result<Url> {
        let raw = format!(
            "{}://{}/{}/",
            self.api_proto,
            self.api_host.trim_end_matches('/'),
            self.api_version.trim_matches('/')
        );
        Url::parse(&raw).map_err(|e| Error::InvalidEndpoint(format!("`{raw}`: {e}")))
    }
}

impl Default for LinodeConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_linode_config_default() {
        let config = LinodeConfig::default();
        assert_eq!(config.api_proto, "https");
        assert_eq!(config.api_host, "api.linode.com");
        assert_eq!(config.api_version, "v4");
        assert!(config.token.is_none());
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(!config.debug);
        assert!(config.validate_config().is_ok());
    }

    #[test]
    fn test_linode_config_base_url() {
        let config = LinodeConfig::new();
        assert_eq!(
            config.base_url().unwrap().as_str(),
            "https://api.linode.com/v4/"
        );

        let config = LinodeConfig::new()
            .with_api_proto("http")
            .with_api_host("localhost:8080/")
            .with_api_version("/v4beta/");
        assert_eq!(
            config.base_url().unwrap().as_str(),
            "http://localhost:8080/v4beta/"
        );
    }

    #[test]
    fn test_linode_config_builder() {
        let config = LinodeConfig::new()
            .with_token("abc123")
            .with_user_agent("my-tool/2.0")
            .with_timeout(60)
            .with_debug(true);

        assert_eq!(
            config.token.as_ref().map(|token| token.expose_secret()),
            Some("abc123")
        );
        assert_eq!(config.user_agent, "my-tool/2.0");
        assert_eq!(config.request_timeout_secs, 60);
        assert!(config.debug);
    }

    #[test]
    fn test_config_validation_timeout_range() {
        assert!(LinodeConfig::new().with_timeout(0).validate_config().is_err());
        assert!(LinodeConfig::new().with_timeout(301).validate_config().is_err());
        assert!(LinodeConfig::new().with_timeout(300).validate_config().is_ok());
    }

    #[test]
    fn test_config_validation_rejects_bad_values() {
        let err = LinodeConfig::new()
            .with_api_proto("ftp")
            .validate_config()
            .unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));

        assert!(LinodeConfig::new().with_api_host("").validate_config().is_err());
        assert!(LinodeConfig::new().with_user_agent("").validate_config().is_err());
    }

    #[test]
    fn test_from_lookup_reads_token_and_debug() {
        let config = LinodeConfig::from_lookup(lookup_from(&[
            (TOKEN_ENV, "env-token"),
            (DEBUG_ENV, "1"),
        ]));

        assert_eq!(
            config.token.as_ref().map(|token| token.expose_secret()),
            Some("env-token")
        );
        assert!(config.debug);
    }

    #[test]
    fn test_from_lookup_missing_values() {
        let config = LinodeConfig::from_lookup(lookup_from(&[]));
        assert!(config.token.is_none());
        assert!(!config.debug);

        let config = LinodeConfig::from_lookup(lookup_from(&[(TOKEN_ENV, "   ")]));
        assert!(config.token.is_none());
    }

    #[test]
    fn test_from_lookup_debug_levels() {
        let config = LinodeConfig::from_lookup(lookup_from(&[(DEBUG_ENV, "0")]));
        assert!(!config.debug);

        let config = LinodeConfig::from_lookup(lookup_from(&[(DEBUG_ENV, "yes")]));
        assert!(!config.debug);

        let config = LinodeConfig::from_lookup(lookup_from(&[(DEBUG_ENV, " 3 ")]));
        assert!(config.debug);
    }

    #[test]
    fn test_config_serialization_skips_token() {
        let config = LinodeConfig::new().with_token("do-not-leak");
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("do-not-leak"));
        assert!(!json.contains("token"));

        let decoded: LinodeConfig = serde_json::from_str(&json).unwrap();
        assert!(decoded.token.is_none());
        assert_eq!(decoded.api_host, config.api_host);
    }

    #[test]
    fn test_config_deserialize_defaults() {
        let config: LinodeConfig = serde_json::from_str(r#"{"debug": true}"#).unwrap();
        assert_eq!(config.api_host, DEFAULT_API_HOST);
        assert_eq!(config.request_timeout_secs, DEFAULT_TIMEOUT);
        assert!(config.debug);
    }

    #[test]
    fn test_debug_output_redacts_token() {
        let config = LinodeConfig::new().with_token("hidden-value");
        assert!(!format!("{config:?}").contains("hidden-value"));
    }
}
