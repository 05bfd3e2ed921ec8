//! Single value lookups

use super::{DataPoint, Series};
use crate::decode::{as_object, optional, DecodeContext, FromJson};
use crate::error::{Error, Result};
use crate::response::Response;
use crate::temporal::parse_tz;
use serde_json::Value;
use std::sync::Arc;

/// The value of one series nearest to a requested timestamp
#[derive(Debug, Clone)]
pub struct SingleValue {
    /// Series the value belongs to
    pub series: Series,
    /// The point, if the series has one in the requested direction
    pub data: Option<DataPoint>,
    response: Option<Arc<Response>>,
}

impl SingleValue {
    /// Response this value was decoded from
    pub fn response(&self) -> Option<&Response> {
        self.response.as_deref()
    }
}

impl FromJson for SingleValue {
    const TYPE_NAME: &'static str = "SingleValue";

    fn from_json(value: &Value, ctx: &DecodeContext) -> Result<Self> {
        let obj = as_object(value, Self::TYPE_NAME)?;

        let series_value = obj
            .get("series")
            .ok_or_else(|| Error::missing_field(Self::TYPE_NAME, "series"))?;
        let series = Series::from_json(series_value, ctx)?;

        let data = match obj.get("data") {
            None | Some(Value::Null) => None,
            Some(point) => {
                // the point may name its own timezone
                let point_tz = match point.as_object() {
                    Some(p) => optional::<String>(p, "tz", Self::TYPE_NAME)?,
                    None => None,
                };
                let tz_name = match point_tz {
                    Some(name) => Some(name),
                    None => optional::<String>(obj, "tz", Self::TYPE_NAME)?,
                };
                let tz = match tz_name {
                    Some(name) => Some(parse_tz(&name)?),
                    None => ctx.tz,
                };
                Some(DataPoint::from_json(point, &ctx.clone().with_tz(tz))?)
            }
        };

        Ok(Self {
            series,
            data,
            response: ctx.response.clone(),
        })
    }
}
