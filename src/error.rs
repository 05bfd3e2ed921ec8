//! Error types for the TempoDB client
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! Nothing in this crate retries. A transport failure, a non-success
//! status or a malformed payload is surfaced to the caller as-is.

use thiserror::Error;

/// The main error type for the TempoDB client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Transport Errors
    // ============================================================================
    /// Network or connection failure before any status code was obtained
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Response Errors
    // ============================================================================
    /// The API answered with a status classified as a failure
    #[error("TempoDB API returned status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// A multi-write was only partially applied (HTTP 207).
    ///
    /// `body` is the raw per-item error document, left undecoded.
    #[error("Partial write (status {status}): {body}")]
    PartialWrite { status: u16, body: String },

    // ============================================================================
    // Deserialization Errors
    // ============================================================================
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    #[error("Invalid timestamp '{value}': expected ISO8601")]
    InvalidTimestamp { value: String },

    #[error("Unknown timezone: {name}")]
    InvalidTimezone { name: String },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a partial write error
    pub fn partial_write(status: u16, body: impl Into<String>) -> Self {
        Self::PartialWrite {
            status,
            body: body.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a missing field decode error
    pub fn missing_field(type_name: &str, field: &str) -> Self {
        Self::Decode {
            message: format!("Expected key '{field}' in JSON object for {type_name}"),
        }
    }

    /// Create an invalid timestamp error
    pub fn invalid_timestamp(value: impl Into<String>) -> Self {
        Self::InvalidTimestamp {
            value: value.into(),
        }
    }

    /// Create an invalid timezone error
    pub fn invalid_timezone(name: impl Into<String>) -> Self {
        Self::InvalidTimezone { name: name.into() }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing config field error
    pub fn missing_config_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// HTTP status carried by this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } | Error::PartialWrite { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether this error came from a malformed or incomplete payload
    pub fn is_deserialization(&self) -> bool {
        matches!(
            self,
            Error::Json(_)
                | Error::Decode { .. }
                | Error::InvalidTimestamp { .. }
                | Error::InvalidTimezone { .. }
        )
    }

    /// Whether this error is a network failure from the transport
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Http(_))
    }
}

/// Result type alias for the TempoDB client
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::http_status(403, "Forbidden");
        assert_eq!(err.to_string(), "TempoDB API returned status 403: Forbidden");

        let err = Error::missing_config_field("api_key");
        assert_eq!(err.to_string(), "Missing required config field: api_key");

        let err = Error::missing_field("Series", "key");
        assert_eq!(
            err.to_string(),
            "Failed to decode response: Expected key 'key' in JSON object for Series"
        );
    }

    #[test]
    fn test_status() {
        assert_eq!(Error::http_status(404, "").status(), Some(404));
        assert_eq!(Error::partial_write(207, "[]").status(), Some(207));
        assert_eq!(Error::decode("bad").status(), None);
        assert_eq!(Error::config("bad").status(), None);
    }

    #[test]
    fn test_is_deserialization() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(Error::from(json_err).is_deserialization());
        assert!(Error::decode("missing").is_deserialization());
        assert!(Error::invalid_timestamp("nope").is_deserialization());

        assert!(!Error::http_status(500, "").is_deserialization());
        assert!(!Error::partial_write(207, "").is_deserialization());
    }

    #[test]
    fn test_partial_write_keeps_body_verbatim() {
        let body = r#"{"multistatus":[{"status":"422","messages":["bad key"]}]}"#;
        match Error::partial_write(207, body) {
            Error::PartialWrite { status, body: kept } => {
                assert_eq!(status, 207);
                assert_eq!(kept, body);
            }
            other => panic!("Expected PartialWrite, got {other:?}"),
        }
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::config("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Configuration error: inner"));
    }
}
