//! Request options

use super::params::QueryParams;
use crate::types::{Attributes, Tags};

/// Selects series by id, key, tag and attribute
///
/// Empty criteria are omitted from the request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeriesFilter {
    /// Series ids
    pub ids: Vec<String>,
    /// Series keys
    pub keys: Vec<String>,
    /// Tags every series must carry
    pub tags: Tags,
    /// Attributes every series must carry
    pub attributes: Attributes,
}

impl SeriesFilter {
    /// Create an empty filter (matches every series)
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an id
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.ids.push(id.into());
        self
    }

    /// Add a key
    #[must_use]
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.keys.push(key.into());
        self
    }

    /// Add a tag
    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Add an attribute
    #[must_use]
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Whether the filter has no criteria
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty() && self.keys.is_empty() && self.tags.is_empty() && self.attributes.is_empty()
    }

    pub(crate) fn apply(&self, params: &mut QueryParams) {
        params
            .push_all("id", &self.ids)
            .push_all("key", &self.keys)
            .push_all("tag", &self.tags)
            .push_map("attr", &self.attributes);
    }
}

/// Options for reading data points
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadOptions {
    /// Rollup function and period, e.g. `("mean", "1hour")`
    pub rollup: Option<(String, String)>,
    /// Interpolation function and period, e.g. `("linear", "1min")`
    pub interpolation: Option<(String, String)>,
    /// IANA timezone for returned timestamps
    pub tz: Option<String>,
    /// Page size requested from the server
    pub limit: Option<u32>,
}

impl ReadOptions {
    /// Create default options (raw data, server timezone)
    pub fn new() -> Self {
        Self::default()
    }

    /// Roll up data with `fold` over each `period`
    #[must_use]
    pub fn rollup(mut self, fold: impl Into<String>, period: impl Into<String>) -> Self {
        self.rollup = Some((fold.into(), period.into()));
        self
    }

    /// Interpolate data with `function` over each `period`
    #[must_use]
    pub fn interpolation(mut self, function: impl Into<String>, period: impl Into<String>) -> Self {
        self.interpolation = Some((function.into(), period.into()));
        self
    }

    /// Render timestamps in the named timezone
    #[must_use]
    pub fn tz(mut self, tz: impl Into<String>) -> Self {
        self.tz = Some(tz.into());
        self
    }

    /// Request pages of at most `limit` points
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub(crate) fn apply(&self, params: &mut QueryParams) {
        if let Some((fold, period)) = &self.rollup {
            params.push("rollup.fold", fold).push("rollup.period", period);
        }
        if let Some((function, period)) = &self.interpolation {
            params
                .push("interpolation.function", function)
                .push("interpolation.period", period);
        }
        params
            .push_opt("tz", self.tz.as_deref())
            .push_opt("limit", self.limit);
    }
}
