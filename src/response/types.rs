//! Response types

use crate::error::{Error, Result};
use crate::http::RawResult;
use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};

/// Overall outcome of an API call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// HTTP 200
    Success,
    /// HTTP 207, some items of a multi-write failed
    Partial,
    /// Any other status
    Failure,
}

impl Outcome {
    /// Classify an HTTP status code
    pub fn from_status(status: u16) -> Self {
        match status {
            200 => Outcome::Success,
            207 => Outcome::Partial,
            _ => Outcome::Failure,
        }
    }
}

/// A classified API response
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Reason phrase
    pub reason: String,
    /// Raw body text
    pub body: String,
    /// Classified outcome
    pub outcome: Outcome,
    /// Raw body when the outcome is not a success
    ///
    /// For a partial multi-write this is the API's per-item error document.
    /// It is kept undecoded because its schema is not fixed.
    pub error: Option<String>,
    /// Response headers
    pub headers: HeaderMap,
    next_link: Option<String>,
}

impl Response {
    /// Classify a raw transport result
    pub fn classify(raw: RawResult) -> Self {
        let outcome = Outcome::from_status(raw.status);
        let error = match outcome {
            Outcome::Success => None,
            Outcome::Partial | Outcome::Failure => Some(raw.body.clone()),
        };

        Self {
            status: raw.status,
            reason: raw.reason,
            body: raw.body,
            outcome,
            error,
            headers: raw.headers,
            next_link: raw.next_link,
        }
    }

    /// Whether the outcome is a success
    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Success
    }

    /// Whether the outcome is a partial success
    pub fn is_partial(&self) -> bool {
        self.outcome == Outcome::Partial
    }

    /// Absolute URL of the next page, if the server supplied one
    pub fn next_link(&self) -> Option<&str> {
        self.next_link.as_deref()
    }

    /// Look up a header value
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Turn a non-success outcome into an error
    ///
    /// - `Success` → `Ok(())`
    /// - `Partial` → [`Error::PartialWrite`] carrying the raw body
    /// - `Failure` → [`Error::HttpStatus`] carrying the status and raw body
    pub fn ensure_success(&self) -> Result<()> {
        match self.outcome {
            Outcome::Success => Ok(()),
            Outcome::Partial => Err(Error::partial_write(self.status, self.body.clone())),
            Outcome::Failure => Err(Error::http_status(self.status, self.body.clone())),
        }
    }
}

impl From<RawResult> for Response {
    fn from(raw: RawResult) -> Self {
        Self::classify(raw)
    }
}
