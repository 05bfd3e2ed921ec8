//! Data points
//!
//! Timestamps are parsed with the timezone carried by the page they came
//! from (see [`crate::temporal::convert_iso_stamp`]) and rendered as
//! RFC 3339 in that offset.

use crate::decode::{as_object, optional, required, DecodeContext, FromJson};
use crate::error::Result;
use crate::response::Response;
use crate::temporal::{convert_iso_stamp, parse_tz, to_timestamp, TimeParam};
use chrono::{DateTime, FixedOffset};
use chrono_tz::Tz;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

fn timestamp_field(
    obj: &Map<String, Value>,
    field: &str,
    type_name: &str,
    tz: Option<Tz>,
) -> Result<DateTime<FixedOffset>> {
    let text: String = required(obj, field, type_name)?;
    convert_iso_stamp(&text, tz)
}

// ============================================================================
// DataPoint
// ============================================================================

/// A single `(timestamp, value)` reading
#[derive(Debug, Clone)]
pub struct DataPoint {
    /// Timestamp
    pub t: DateTime<FixedOffset>,
    /// Value
    pub v: f64,
    /// Series key (multi-writes only)
    pub key: Option<String>,
    /// Series id (multi-writes only)
    pub id: Option<String>,
    /// Timezone the timestamp was parsed in
    pub tz: Option<Tz>,
    response: Option<Arc<Response>>,
}

impl DataPoint {
    /// Build a point from a time and a value
    ///
    /// String times must be ISO8601; times without an offset are taken as UTC.
    pub fn from_data(time: impl TimeParam, value: f64) -> Result<Self> {
        Ok(Self {
            t: to_timestamp(time, None)?,
            v: value,
            key: None,
            id: None,
            tz: None,
            response: None,
        })
    }

    /// Build a point whose naive time is local to the named timezone
    pub fn from_data_with_tz(time: impl TimeParam, value: f64, tz: &str) -> Result<Self> {
        let tz = parse_tz(tz)?;
        Ok(Self {
            t: to_timestamp(time, Some(tz))?,
            v: value,
            key: None,
            id: None,
            tz: Some(tz),
            response: None,
        })
    }

    /// Target a series by key (for multi-writes)
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Target a series by id (for multi-writes)
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Timestamp rendered as RFC 3339 in the point's offset
    pub fn timestamp(&self) -> String {
        self.t.to_rfc3339()
    }

    /// Response this point was decoded from
    pub fn response(&self) -> Option<&Response> {
        self.response.as_deref()
    }

    /// JSON representation sent on writes
    pub fn to_json_value(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("t".to_string(), json!(self.timestamp()));
        obj.insert("v".to_string(), json!(self.v));
        if let Some(key) = &self.key {
            obj.insert("key".to_string(), json!(key));
        }
        if let Some(id) = &self.id {
            obj.insert("id".to_string(), json!(id));
        }
        Value::Object(obj)
    }
}

impl PartialEq for DataPoint {
    fn eq(&self, other: &Self) -> bool {
        self.t == other.t && self.v == other.v && self.key == other.key && self.id == other.id
    }
}

impl FromJson for DataPoint {
    const TYPE_NAME: &'static str = "DataPoint";

    fn from_json(value: &Value, ctx: &DecodeContext) -> Result<Self> {
        let obj = as_object(value, Self::TYPE_NAME)?;

        Ok(Self {
            t: timestamp_field(obj, "t", Self::TYPE_NAME, ctx.tz)?,
            v: required(obj, "v", Self::TYPE_NAME)?,
            key: optional(obj, "key", Self::TYPE_NAME)?,
            id: optional(obj, "id", Self::TYPE_NAME)?,
            tz: ctx.tz,
            response: ctx.response.clone(),
        })
    }
}

// ============================================================================
// MultiPoint
// ============================================================================

/// Values of several series at one timestamp
#[derive(Debug, Clone)]
pub struct MultiPoint {
    /// Timestamp
    pub t: DateTime<FixedOffset>,
    /// Value per series key
    pub v: BTreeMap<String, f64>,
    /// Timezone the timestamp was parsed in
    pub tz: Option<Tz>,
    response: Option<Arc<Response>>,
}

impl MultiPoint {
    /// Value for one series key
    pub fn get(&self, key: &str) -> Option<f64> {
        self.v.get(key).copied()
    }

    /// Response this point was decoded from
    pub fn response(&self) -> Option<&Response> {
        self.response.as_deref()
    }
}

impl FromJson for MultiPoint {
    const TYPE_NAME: &'static str = "MultiPoint";

    fn from_json(value: &Value, ctx: &DecodeContext) -> Result<Self> {
        let obj = as_object(value, Self::TYPE_NAME)?;

        Ok(Self {
            t: timestamp_field(obj, "t", Self::TYPE_NAME, ctx.tz)?,
            v: required(obj, "v", Self::TYPE_NAME)?,
            tz: ctx.tz,
            response: ctx.response.clone(),
        })
    }
}

// ============================================================================
// DataPointFound
// ============================================================================

/// A point located by a find query, with the interval it was found in
#[derive(Debug, Clone)]
pub struct DataPointFound {
    /// Start of the searched interval
    pub start: DateTime<FixedOffset>,
    /// End of the searched interval
    pub end: DateTime<FixedOffset>,
    /// Time of the found point
    pub t: DateTime<FixedOffset>,
    /// Value of the found point
    pub v: f64,
    /// Timezone the timestamps were parsed in
    pub tz: Option<Tz>,
    response: Option<Arc<Response>>,
}

impl DataPointFound {
    /// Response this point was decoded from
    pub fn response(&self) -> Option<&Response> {
        self.response.as_deref()
    }

    /// JSON representation
    pub fn to_json_value(&self) -> Value {
        json!({
            "interval": {
                "start": self.start.to_rfc3339(),
                "end": self.end.to_rfc3339(),
            },
            "found": {
                "t": self.t.to_rfc3339(),
                "v": self.v,
            },
        })
    }
}

impl FromJson for DataPointFound {
    const TYPE_NAME: &'static str = "DataPointFound";

    fn from_json(value: &Value, ctx: &DecodeContext) -> Result<Self> {
        let obj = as_object(value, Self::TYPE_NAME)?;
        let interval: Map<String, Value> = required(obj, "interval", Self::TYPE_NAME)?;
        let found: Map<String, Value> = required(obj, "found", Self::TYPE_NAME)?;

        Ok(Self {
            start: timestamp_field(&interval, "start", Self::TYPE_NAME, ctx.tz)?,
            end: timestamp_field(&interval, "end", Self::TYPE_NAME, ctx.tz)?,
            t: timestamp_field(&found, "t", Self::TYPE_NAME, ctx.tz)?,
            v: required(&found, "v", Self::TYPE_NAME)?,
            tz: ctx.tz,
            response: ctx.response.clone(),
        })
    }
}
