//! Rollup metadata echoed by read endpoints

use crate::decode::{as_object, optional, DecodeContext, FromJson};
use crate::error::{Error, Result};
use crate::temporal::parse_tz;
use chrono_tz::Tz;
use serde_json::{json, Map, Value};

/// The downsampling applied to a read: one `function` result per `interval`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rollup {
    /// ISO8601 period of each bucket, e.g. `PT1H`
    pub interval: String,
    /// Fold applied within a bucket, e.g. `mean`
    pub function: String,
    /// Timezone the buckets are aligned in
    pub tz: Option<Tz>,
}

impl Rollup {
    /// Create a rollup with no timezone
    pub fn new(function: impl Into<String>, interval: impl Into<String>) -> Self {
        Self {
            interval: interval.into(),
            function: function.into(),
            tz: None,
        }
    }

    /// JSON representation
    pub fn to_json_value(&self) -> Value {
        let mut value = json!({
            "interval": self.interval,
            "function": self.function,
        });
        if let (Some(tz), Value::Object(obj)) = (self.tz, &mut value) {
            obj.insert("tz".to_string(), json!(tz.name()));
        }
        value
    }
}

/// Read `field`, falling back to the request-side name `alias`
fn field_or_alias(obj: &Map<String, Value>, field: &str, alias: &str) -> Result<String> {
    match optional(obj, field, Rollup::TYPE_NAME)? {
        Some(value) => Ok(value),
        None => optional(obj, alias, Rollup::TYPE_NAME)?
            .ok_or_else(|| Error::missing_field(Rollup::TYPE_NAME, field)),
    }
}

impl FromJson for Rollup {
    const TYPE_NAME: &'static str = "Rollup";

    fn from_json(value: &Value, _ctx: &DecodeContext) -> Result<Self> {
        let obj = as_object(value, Self::TYPE_NAME)?;
        let tz: Option<String> = optional(obj, "tz", Self::TYPE_NAME)?;

        Ok(Self {
            interval: field_or_alias(obj, "interval", "period")?,
            function: field_or_alias(obj, "function", "fold")?,
            tz: tz.as_deref().map(parse_tz).transpose()?,
        })
    }
}
