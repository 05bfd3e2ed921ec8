//! Transport abstraction
//!
//! The rest of the crate talks to the API only through [`Transport`], so the
//! cursor and client can be driven by an in-memory fake in tests.

use crate::error::Result;
use async_trait::async_trait;
use regex::Regex;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::StatusCode;
use std::sync::LazyLock;

/// Raw result of one HTTP exchange, before classification
#[derive(Debug, Clone)]
pub struct RawResult {
    /// HTTP status code
    pub status: u16,
    /// Reason phrase for the status
    pub reason: String,
    /// Response body as text
    pub body: String,
    /// Response headers
    pub headers: HeaderMap,
    /// Absolute URL of the next page, from the `Link` header (`rel="next"`)
    pub next_link: Option<String>,
}

impl RawResult {
    /// Create a raw result with the canonical reason phrase for `status`
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        let reason = StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or_default()
            .to_string();

        Self {
            status,
            reason,
            body: body.into(),
            headers: HeaderMap::new(),
            next_link: None,
        }
    }

    /// Override the reason phrase
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    /// Add a header. Invalid names or values are ignored.
    #[must_use]
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            if name == reqwest::header::LINK {
                self.next_link = parse_link_header(value.to_str().unwrap_or_default(), "next");
            }
            self.headers.insert(name, value);
        }
        self
    }

    /// Set the next page link
    #[must_use]
    pub fn with_next_link(mut self, url: impl Into<String>) -> Self {
        self.next_link = Some(url.into());
        self
    }
}

/// Authenticated access to the API
///
/// Implementations must be bound to fixed credentials at construction and
/// must not interpret the status code: a 4xx/5xx answer is a successful
/// exchange and comes back as a [`RawResult`]. Only failures that produce no
/// status at all are returned as errors.
///
/// Relative URLs are resolved against the implementation's base URL;
/// absolute URLs (such as pagination links) are used as given.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform a GET request
    async fn get(&self, url: &str) -> Result<RawResult>;

    /// Perform a POST request with a JSON body
    async fn post(&self, url: &str, body: String) -> Result<RawResult>;

    /// Perform a PUT request with a JSON body
    async fn put(&self, url: &str, body: String) -> Result<RawResult>;

    /// Perform a DELETE request
    async fn delete(&self, url: &str) -> Result<RawResult>;
}

/// One link-value of a Link header: the bracketed URL and the parameters up to the next `<`
static LINK_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<([^>]*)>([^<]*)").expect("Link pattern is valid"));

/// Parse a Link header and extract the URL for the given rel
///
/// Format: `<https://api.example.com/...?page=2>; rel="next", <...>; rel="prev"`
///
/// Link-values are separated at a `,` followed by `<`, so URLs may contain commas.
pub fn parse_link_header(header: &str, target_rel: &str) -> Option<String> {
    for caps in LINK_VALUE.captures_iter(header) {
        let url = &caps[1];
        let rel = caps[2]
            .split(';')
            .map(|segment| segment.trim().trim_end_matches(',').trim())
            .find_map(|segment| segment.strip_prefix("rel="))
            .map(|rel| rel.trim_matches('"').trim_matches('\''));

        // rel may hold several space separated relation types
        if rel.is_some_and(|r| r.split_whitespace().any(|r| r == target_rel)) {
            return Some(url.to_string());
        }
    }

    None
}
