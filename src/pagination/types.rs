//! Pagination types

use crate::decode::{DecodeContext, FromJson};
use crate::error::{Error, Result};
use crate::protocol::Rollup;
use crate::temporal::parse_tz;
use chrono_tz::Tz;
use serde_json::Value;

/// Where a cursor is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    /// Elements are buffered and will be yielded without I/O
    HasBuffered,
    /// The buffer is empty and no refill has been attempted yet
    NeedsRefill,
    /// A refill request is in flight
    ///
    /// Observed between pulls only if the pulling future was dropped before
    /// the request completed; the next pull issues the same request again.
    Refilling,
    /// No further elements; terminal
    Exhausted,
    /// A refill failed and its error was returned; terminal
    Failed,
}

impl CursorState {
    /// Whether the cursor will never yield another element
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Exhausted | Self::Failed)
    }
}

/// How the elements of a page are laid out in the body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageLayout {
    /// The body is a bare JSON array
    #[default]
    Array,
    /// The body is `{"data": [...], "tz": "...", "rollup": {...}}`; `tz` and `rollup` are optional
    Envelope,
}

/// The elements of one page, plus the timezone and rollup the page carried
#[derive(Debug, Clone, Default)]
pub struct Page {
    /// Raw elements in as-received order
    pub elements: Vec<Value>,
    /// Timezone named by the page
    pub tz: Option<Tz>,
    /// Rollup the page's points were computed with
    pub rollup: Option<Rollup>,
}

impl PageLayout {
    /// Split a page body into its elements and side-channel fields
    pub fn split(self, body: &str) -> Result<Page> {
        let value: Value = serde_json::from_str(body)?;

        match self {
            PageLayout::Array => match value {
                Value::Array(elements) => Ok(Page {
                    elements,
                    ..Page::default()
                }),
                _ => Err(Error::decode("Expected a JSON array page")),
            },
            PageLayout::Envelope => {
                let Value::Object(mut obj) = value else {
                    return Err(Error::decode("Expected a JSON object page"));
                };
                let elements = match obj.remove("data") {
                    Some(Value::Array(elements)) => elements,
                    Some(_) => return Err(Error::decode("Expected 'data' to be a JSON array")),
                    None => return Err(Error::missing_field("page", "data")),
                };
                let tz = match obj.get("tz") {
                    Some(Value::String(name)) => Some(parse_tz(name)?),
                    _ => None,
                };
                let rollup = match obj.get("rollup") {
                    None | Some(Value::Null) => None,
                    Some(value) => Some(Rollup::from_json(value, &DecodeContext::detached())?),
                };
                Ok(Page {
                    elements,
                    tz,
                    rollup,
                })
            }
        }
    }
}
