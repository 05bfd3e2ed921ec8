//! Generic casting entry points and field helpers

use super::types::{DecodeContext, FromJson};
use crate::error::{Error, Result};
use crate::response::Response;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Cast a response body into a single object
///
/// The response must be a success; see [`Response::ensure_success`].
pub fn cast_single<T: FromJson>(response: &Arc<Response>) -> Result<T> {
    response.ensure_success()?;
    let value: Value = serde_json::from_str(&response.body)?;
    T::from_json(&value, &DecodeContext::new(Arc::clone(response)))
}

/// Cast a response body holding a JSON array into a list of objects
///
/// The response must be a success; see [`Response::ensure_success`].
pub fn cast_list<T: FromJson>(response: &Arc<Response>) -> Result<Vec<T>> {
    response.ensure_success()?;
    let value: Value = serde_json::from_str(&response.body)?;
    let elements = value.as_array().ok_or_else(|| {
        Error::decode(format!(
            "Expected a JSON array of {}, found {}",
            T::TYPE_NAME,
            json_kind(&value)
        ))
    })?;
    decode_elements(elements, &DecodeContext::new(Arc::clone(response)))
}

/// Decode every element of a page, preserving order
pub fn decode_elements<T: FromJson>(elements: &[Value], ctx: &DecodeContext) -> Result<Vec<T>> {
    elements.iter().map(|v| T::from_json(v, ctx)).collect()
}

/// View a value as a JSON object
pub fn as_object<'a>(value: &'a Value, type_name: &str) -> Result<&'a Map<String, Value>> {
    value.as_object().ok_or_else(|| {
        Error::decode(format!(
            "Expected a JSON object for {type_name}, found {}",
            json_kind(value)
        ))
    })
}

/// Read a required field, failing if it is absent or mistyped
pub fn required<T: DeserializeOwned>(
    obj: &Map<String, Value>,
    field: &str,
    type_name: &str,
) -> Result<T> {
    let value = obj
        .get(field)
        .ok_or_else(|| Error::missing_field(type_name, field))?;
    serde_json::from_value(value.clone()).map_err(|e| {
        Error::decode(format!("Invalid '{field}' for {type_name}: {e}"))
    })
}

/// Read an optional field; absent and `null` both yield `None`
pub fn optional<T: DeserializeOwned>(
    obj: &Map<String, Value>,
    field: &str,
    type_name: &str,
) -> Result<Option<T>> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value.clone())
            .map(Some)
            .map_err(|e| Error::decode(format!("Invalid '{field}' for {type_name}: {e}"))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
