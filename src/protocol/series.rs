//! Series metadata

use crate::decode::{as_object, optional, required, DecodeContext, FromJson};
use crate::error::Result;
use crate::response::Response;
use crate::types::{Attributes, Tags};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// A named, tagged, attributed time series (its identity, not its data)
#[derive(Debug, Clone, Default, Serialize)]
pub struct Series {
    /// Unique key chosen by the user
    pub key: String,
    /// Server assigned id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name
    pub name: String,
    /// Tags
    pub tags: Tags,
    /// Attributes
    pub attributes: Attributes,
    #[serde(skip)]
    response: Option<Arc<Response>>,
}

impl Series {
    /// Create a series with the given key
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    /// Set the display name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Add a tag
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Set an attribute
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Response this series was decoded from
    pub fn response(&self) -> Option<&Response> {
        self.response.as_deref()
    }

    /// JSON representation sent on create/update
    pub fn to_json_value(&self) -> Value {
        let mut value = json!({
            "key": self.key,
            "name": self.name,
            "tags": self.tags,
            "attributes": self.attributes,
        });
        if let (Some(id), Value::Object(obj)) = (&self.id, &mut value) {
            obj.insert("id".to_string(), json!(id));
        }
        value
    }
}

impl PartialEq for Series {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
            && self.id == other.id
            && self.name == other.name
            && self.tags == other.tags
            && self.attributes == other.attributes
    }
}

impl FromJson for Series {
    const TYPE_NAME: &'static str = "Series";

    fn from_json(value: &Value, ctx: &DecodeContext) -> Result<Self> {
        // the by-key endpoint wraps the object as {"series": {...}}
        let value = match value.get("series") {
            Some(inner) if inner.is_object() => inner,
            _ => value,
        };
        let obj = as_object(value, Self::TYPE_NAME)?;

        Ok(Self {
            key: required(obj, "key", Self::TYPE_NAME)?,
            id: optional(obj, "id", Self::TYPE_NAME)?,
            name: optional(obj, "name", Self::TYPE_NAME)?.unwrap_or_default(),
            tags: required(obj, "tags", Self::TYPE_NAME)?,
            attributes: required(obj, "attributes", Self::TYPE_NAME)?,
            response: ctx.response.clone(),
        })
    }
}
