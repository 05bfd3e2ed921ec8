//! reqwest-backed transport
//!
//! Provides the HTTP transport used by [`crate::client::Client`]:
//! - Basic auth with the fixed API credentials on every request
//! - Relative paths resolved against the base URL (urljoin semantics)
//! - Optional client-side rate limiting
//! - `Link` header extraction for pagination
//!
//! It never retries and never turns a status code into an error.

use super::rate_limit::{RateLimiter, RateLimiterConfig};
use super::transport::{parse_link_header, RawResult, Transport};
use crate::auth::Credentials;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::{Client, Method};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Default API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.tempo-db.com/v1/";

/// Configuration for the HTTP transport
#[derive(Debug, Clone)]
pub struct HttpTransportConfig {
    /// Base URL all relative request paths are joined onto
    pub base_url: String,
    /// API credentials
    pub credentials: Credentials,
    /// Request timeout
    pub timeout: Duration,
    /// Rate limiter configuration
    pub rate_limit: Option<RateLimiterConfig>,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl HttpTransportConfig {
    /// Create a config for the given credentials with default settings
    pub fn new(credentials: Credentials) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            credentials,
            timeout: Duration::from_secs(30),
            rate_limit: None,
            default_headers: HashMap::new(),
            user_agent: default_user_agent(),
        }
    }

    /// Create a new config builder
    pub fn builder(key: impl Into<String>, secret: impl Into<String>) -> HttpTransportConfigBuilder {
        HttpTransportConfigBuilder {
            config: Self::new(Credentials::new(key, secret)),
        }
    }
}

/// User agent advertised when none is configured
pub fn default_user_agent() -> String {
    format!("tempodb-rs/{}", crate::VERSION)
}

/// Builder for HTTP transport config
pub struct HttpTransportConfigBuilder {
    config: HttpTransportConfig,
}

impl HttpTransportConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set rate limiter
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.config.rate_limit = Some(config);
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpTransportConfig {
        self.config
    }
}

/// HTTP transport over a pooled reqwest client
pub struct HttpTransport {
    client: Client,
    base_url: Url,
    config: HttpTransportConfig,
    rate_limiter: Option<RateLimiter>,
}

impl HttpTransport {
    /// Create a new transport
    ///
    /// The base URL is forced to end with `/` so that relative paths are
    /// appended to it rather than replacing its last segment.
    pub fn new(config: HttpTransportConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        let mut base = config.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)?;

        let rate_limiter = config.rate_limit.as_ref().map(RateLimiter::new);

        Ok(Self {
            client,
            base_url,
            config,
            rate_limiter,
        })
    }

    /// Base URL requests are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Check if rate limiting is enabled
    pub fn has_rate_limiter(&self) -> bool {
        self.rate_limiter.is_some()
    }

    /// Resolve a request path against the base URL
    ///
    /// Absolute URLs are returned unchanged.
    pub fn build_url(&self, path: &str) -> Result<Url> {
        if path.starts_with("http://") || path.starts_with("https://") {
            return Ok(Url::parse(path)?);
        }
        Ok(self.base_url.join(path)?)
    }

    async fn send(&self, method: Method, path: &str, body: Option<String>) -> Result<RawResult> {
        let url = self.build_url(path)?;

        if let Some(ref limiter) = self.rate_limiter {
            limiter.wait().await;
        }

        let mut req = self.client.request(method.clone(), url.clone());

        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }

        if let Some(body) = body {
            req = req
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body);
        }

        req = self.config.credentials.apply(req);

        debug!("Sending {} {}", method, url);
        let response = req.send().await?;

        let status = response.status();
        let headers = response.headers().clone();
        let next_link = headers
            .get(reqwest::header::LINK)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| parse_link_header(v, "next"));
        let body = response.text().await?;

        debug!(
            "{} {} -> {} ({} bytes, next page: {})",
            method,
            url,
            status.as_u16(),
            body.len(),
            next_link.is_some()
        );

        Ok(RawResult {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            body,
            headers,
            next_link,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<RawResult> {
        self.send(Method::GET, url, None).await
    }

    async fn post(&self, url: &str, body: String) -> Result<RawResult> {
        self.send(Method::POST, url, Some(body)).await
    }

    async fn put(&self, url: &str, body: String) -> Result<RawResult> {
        self.send(Method::PUT, url, Some(body)).await
    }

    async fn delete(&self, url: &str) -> Result<RawResult> {
        self.send(Method::DELETE, url, None).await
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url.as_str())
            .field("config", &self.config)
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}

impl TryFrom<HttpTransportConfig> for HttpTransport {
    type Error = Error;

    fn try_from(config: HttpTransportConfig) -> Result<Self> {
        Self::new(config)
    }
}
