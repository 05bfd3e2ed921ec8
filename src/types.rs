//! Common types used throughout the TempoDB client
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Series attributes (ordered so encoded query strings are stable)
pub type Attributes = BTreeMap<String, String>;

/// Series tags
pub type Tags = Vec<String>;

// ============================================================================
// Single Value Direction
// ============================================================================

/// Which point to pick when looking up a single value around a timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Only a point at exactly the timestamp
    #[default]
    Exact,
    /// The closest point at or before the timestamp
    Before,
    /// The closest point at or after the timestamp
    After,
    /// The closest point on either side
    Nearest,
}

impl Direction {
    /// Wire name of the direction
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Exact => "exact",
            Direction::Before => "before",
            Direction::After => "after",
            Direction::Nearest => "nearest",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Direction {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "exact" => Ok(Direction::Exact),
            "before" => Ok(Direction::Before),
            "after" => Ok(Direction::After),
            "nearest" => Ok(Direction::Nearest),
            other => Err(crate::Error::Other(format!("Unknown direction: {other}"))),
        }
    }
}

// ============================================================================
// Utilities
// ============================================================================

/// Extension trait for Option<String> to handle empty strings
pub trait OptionStringExt {
    /// Returns None if the string is empty
    fn none_if_empty(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_empty(self) -> Option<String> {
        self.filter(|s| !s.is_empty())
    }
}

impl OptionStringExt for String {
    fn none_if_empty(self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}
