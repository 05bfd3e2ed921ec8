//! Decoder types and traits

use crate::error::Result;
use crate::response::Response;
use chrono_tz::Tz;
use serde_json::Value;
use std::sync::Arc;

/// Context shared by every object decoded from one page
#[derive(Debug, Clone, Default)]
pub struct DecodeContext {
    /// Response the payload was read from
    pub response: Option<Arc<Response>>,
    /// Timezone applied to timestamps without one of their own
    pub tz: Option<Tz>,
}

impl DecodeContext {
    /// Create a context tagged with a response
    pub fn new(response: Arc<Response>) -> Self {
        Self {
            response: Some(response),
            tz: None,
        }
    }

    /// Create a context with no response (for locally built objects)
    pub fn detached() -> Self {
        Self::default()
    }

    /// Set the timezone
    #[must_use]
    pub fn with_tz(mut self, tz: Option<Tz>) -> Self {
        self.tz = tz;
        self
    }
}

/// A domain object with an explicit JSON schema
pub trait FromJson: Sized {
    /// Name used in decode error messages
    const TYPE_NAME: &'static str;

    /// Build the object from a parsed JSON value
    ///
    /// Fails if the value is not of the expected shape or a required
    /// field is missing.
    fn from_json(value: &Value, ctx: &DecodeContext) -> Result<Self>;
}
