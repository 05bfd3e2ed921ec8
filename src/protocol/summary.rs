//! Summaries

use super::Series;
use crate::decode::{as_object, optional, required, DecodeContext, FromJson};
use crate::error::{Error, Result};
use crate::response::Response;
use crate::temporal::{convert_iso_stamp, parse_tz};
use chrono::{DateTime, FixedOffset};
use chrono_tz::Tz;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Summary statistics over a range of a series
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    /// Every numeric statistic returned, by name
    pub stats: BTreeMap<String, f64>,
}

impl Summary {
    /// Look up a statistic by name
    pub fn get(&self, name: &str) -> Option<f64> {
        self.stats.get(name).copied()
    }

    /// Mean value
    pub fn mean(&self) -> Option<f64> {
        self.get("mean")
    }

    /// Sum of values
    pub fn sum(&self) -> Option<f64> {
        self.get("sum")
    }

    /// Minimum value
    pub fn min(&self) -> Option<f64> {
        self.get("min")
    }

    /// Maximum value
    pub fn max(&self) -> Option<f64> {
        self.get("max")
    }

    /// Standard deviation
    pub fn stddev(&self) -> Option<f64> {
        self.get("stddev")
    }

    /// Number of points
    pub fn count(&self) -> Option<u64> {
        self.get("count").map(|c| c as u64)
    }

    fn from_value(value: &Value) -> Result<Self> {
        let obj = as_object(value, "Summary")?;
        // non-numeric entries (e.g. null mean on an empty range) are skipped
        let stats = obj
            .iter()
            .filter_map(|(k, v)| v.as_f64().map(|n| (k.clone(), n)))
            .collect();
        Ok(Self { stats })
    }
}

/// A series together with summary statistics for a time range
#[derive(Debug, Clone)]
pub struct SeriesSummary {
    /// The summarized series
    pub series: Series,
    /// Statistics
    pub summary: Summary,
    /// Timezone of the range
    pub tz: Option<Tz>,
    /// Start of the range
    pub start: Option<DateTime<FixedOffset>>,
    /// End of the range
    pub end: Option<DateTime<FixedOffset>>,
    response: Option<Arc<Response>>,
}

impl SeriesSummary {
    /// Response this summary was decoded from
    pub fn response(&self) -> Option<&Response> {
        self.response.as_deref()
    }
}

impl FromJson for SeriesSummary {
    const TYPE_NAME: &'static str = "SeriesSummary";

    fn from_json(value: &Value, ctx: &DecodeContext) -> Result<Self> {
        let obj = as_object(value, Self::TYPE_NAME)?;

        let tz = match optional::<String>(obj, "tz", Self::TYPE_NAME)? {
            Some(name) => Some(parse_tz(&name)?),
            None => ctx.tz,
        };
        let stamp = |field: &str| -> Result<Option<DateTime<FixedOffset>>> {
            optional::<String>(obj, field, Self::TYPE_NAME)?
                .map(|text| convert_iso_stamp(&text, tz))
                .transpose()
        };

        let series = obj
            .get("series")
            .ok_or_else(|| Error::missing_field(Self::TYPE_NAME, "series"))?;
        let summary = obj
            .get("summary")
            .ok_or_else(|| Error::missing_field(Self::TYPE_NAME, "summary"))?;

        Ok(Self {
            series: Series::from_json(series, ctx)?,
            summary: Summary::from_value(summary)?,
            tz,
            start: stamp("start")?,
            end: stamp("end")?,
            response: ctx.response.clone(),
        })
    }
}

/// Result of a series deletion
#[derive(Debug, Clone)]
pub struct DeleteSummary {
    /// Number of series deleted
    pub deleted: u64,
    response: Option<Arc<Response>>,
}

impl DeleteSummary {
    /// Response this summary was decoded from
    pub fn response(&self) -> Option<&Response> {
        self.response.as_deref()
    }
}

impl FromJson for DeleteSummary {
    const TYPE_NAME: &'static str = "DeleteSummary";

    fn from_json(value: &Value, ctx: &DecodeContext) -> Result<Self> {
        let obj = as_object(value, Self::TYPE_NAME)?;
        Ok(Self {
            deleted: required(obj, "deleted", Self::TYPE_NAME)?,
            response: ctx.response.clone(),
        })
    }
}
