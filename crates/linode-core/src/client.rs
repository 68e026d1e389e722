//! HTTP client settings and the transport abstraction.
//!
//! Every request made on behalf of a Linode client goes through [`Transport::execute`]. The
//! production implementation is [`HttpTransport`], a thin layer over `reqwest` that adds the
//! bearer token, user agent and JSON headers. Tests substitute scripted transports.
//!
//! The transport never retries: a failed request is reported to the caller as-is.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::LinodeConfig;
use crate::error::{Error, Result};

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT: u64 = 30;

// Connection pool settings

/// Default idle timeout for connection pools
pub const DEFAULT_POOL_IDLE_TIMEOUT: u64 = 90;

/// Default maximum idle connections per host
pub const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 10;

/// User agent sent when the configuration does not name one.
pub const DEFAULT_USER_AGENT: &str = concat!("linode-rust/", env!("CARGO_PKG_VERSION"));

/// HTTP client configuration.
///
/// Configures HTTP client behavior including timeouts, connection pooling and request logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Request timeout
    pub timeout: Duration,

    /// Connection pool idle timeout
    pub pool_idle_timeout: Duration,

    /// Maximum idle connections per host
    pub pool_max_idle_per_host: usize,

    /// Enable request/response logging
    pub enable_logging: bool,

    /// Enable response compression
    pub enable_compression: bool,
}

impl ClientConfig {
    /// Create a new client configuration with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT),
            pool_idle_timeout: Duration::from_secs(DEFAULT_POOL_IDLE_TIMEOUT),
            pool_max_idle_per_host: DEFAULT_POOL_MAX_IDLE_PER_HOST,
            enable_logging: false,
            enable_compression: true,
        }
    }

    /// Set request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set connection pool idle timeout.
    #[must_use]
    pub const fn with_pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = timeout;
        self
    }

    /// Set maximum idle connections per host.
    #[must_use]
    pub const fn with_pool_max_idle(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = max;
        self
    }

    /// Enable or disable logging.
    #[must_use]
    pub const fn with_logging(mut self, enabled: bool) -> Self {
        self.enable_logging = enabled;
        self
    }

    /// Enable or disable compression.
    #[must_use]
    pub const fn with_compression(mut self, enabled: bool) -> Self {
        self.enable_compression = enabled;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// A request handed to a [`Transport`].
///
/// `path` is relative to the API base URL (for example `linode/instances/123/disks`).
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    /// HTTP method
    pub method: Method,
    /// Path relative to the API base URL
    pub path: String,
    /// Query parameters, in order
    pub query: Vec<(&'static str, String)>,
    /// Extra request headers
    pub headers: Vec<(&'static str, String)>,
    /// Optional JSON body
    pub body: Option<Value>,
}

impl TransportRequest {
    /// Create a request with no query, headers or body.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Create a `GET` request.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Create a `POST` request.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Append query parameters.
    #[must_use]
    pub fn with_query(mut self, pairs: impl IntoIterator<Item = (&'static str, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    /// Add a request header.
    #[must_use]
    pub fn with_header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    /// Attach a JSON body.
    #[must_use]
    pub fn with_json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Look up the first value of a header by case-insensitive name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Look up the first value of a query parameter.
    #[must_use]
    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Raw response returned by a [`Transport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub body: String,
}

impl TransportResponse {
    /// Create a response.
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns true for 2xx statuses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Capability to issue one HTTP request against the Linode API.
///
/// Implementations report transport failures as errors; non-2xx responses are returned as
/// ordinary [`TransportResponse`] values and interpreted by the caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute a single request.
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse>;
}

/// Builder for [`HttpTransport`].
#[derive(Debug, Clone)]
pub struct HttpTransportBuilder {
    base_url: Url,
    token: Option<SecretString>,
    user_agent: String,
    http: ClientConfig,
}

impl HttpTransportBuilder {
    /// Create a builder for the specified base URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEndpoint`] if the URL cannot be parsed.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        let mut base_url = Url::parse(base_url.as_ref())?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            base_url,
            token: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            http: ClientConfig::default(),
        })
    }

    /// Create a builder from a validated [`LinodeConfig`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or yields an unusable base URL.
    pub fn from_config(config: &LinodeConfig) -> Result<Self> {
        config.validate_config()?;

        let http = ClientConfig::new()
            .with_timeout(config.timeout())
            .with_logging(config.debug);
        let mut builder = Self::new(config.base_url()?.as_str())?
            .with_user_agent(config.user_agent.clone())
            .with_http_config(http);
        builder.token.clone_from(&config.token);
        Ok(builder)
    }

    /// Set the bearer token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(SecretString::from(token.into()));
        self
    }

    /// Override the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Override the HTTP client configuration.
    #[must_use]
    pub fn with_http_config(mut self, config: ClientConfig) -> Self {
        self.http = config;
        self
    }

    /// Build the transport.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HttpError`] if the underlying HTTP client cannot be constructed.
    pub fn build(self) -> Result<HttpTransport> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.http.timeout)
            .pool_idle_timeout(self.http.pool_idle_timeout)
            .pool_max_idle_per_host(self.http.pool_max_idle_per_host)
            .user_agent(self.user_agent);
        if !self.http.enable_compression {
            builder = builder.no_gzip();
        }

        let client = builder.build()?;

        Ok(HttpTransport {
            client,
            base_url: self.base_url,
            token: self.token,
            log_requests: self.http.enable_logging,
        })
    }
}

/// `reqwest`-backed [`Transport`].
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
    token: Option<SecretString>,
    log_requests: bool,
}

impl HttpTransport {
    /// Construct a transport directly from a configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn from_config(config: &LinodeConfig) -> Result<Self> {
        HttpTransportBuilder::from_config(config)?.build()
    }

    /// Return the base URL requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn resolve(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|err| Error::InvalidEndpoint(format!("`{path}`: {err}")))
    }
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url.as_str())
            .field("authenticated", &self.token.is_some())
            .field("log_requests", &self.log_requests)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse> {
        let url = self.resolve(&request.path)?;

        if self.log_requests {
            debug!(
                method = %request.method,
                url = %url,
                query = ?request.query,
                headers = ?request.headers,
                "sending Linode API request"
            );
        }

        let mut builder = self
            .client
            .request(request.method.clone(), url)
            .header(ACCEPT, "application/json");
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(*name, value.as_str());
        }
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token.expose_secret());
        }
        if let Some(body) = &request.body {
            builder = builder.header(CONTENT_TYPE, "application/json").json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        if self.log_requests {
            debug!(
                method = %request.method,
                path = %request.path,
                status,
                bytes = body.len(),
                "received Linode API response"
            );
        }

        Ok(TransportResponse { status, body })
    }
}
