//! TempoDB API client

use super::options::{ReadOptions, SeriesFilter};
use super::params::{make_series_url, QueryParams};
use crate::config::ClientConfig;
use crate::decode::{cast_list, cast_single};
use crate::error::{Error, Result};
use crate::http::{HttpTransport, Transport};
use crate::pagination::{Cursor, PageLayout};
use crate::protocol::{
    DataPoint, DataPointFound, DeleteSummary, MultiPoint, Series, SeriesSummary, SingleValue,
};
use crate::response::Response;
use crate::temporal::TimeParam;
use crate::types::Direction;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Client for one TempoDB database
///
/// Every operation is a single request. Listing and reading operations
/// return a [`Cursor`] that fetches further pages as it is consumed.
/// Any response that is not a full success is returned as an error
/// (see [`Response::ensure_success`]).
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
    database_id: Option<String>,
}

impl Client {
    /// Create a client talking HTTP to the configured endpoint
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let transport = HttpTransport::new(config.transport_config())?;
        Ok(Self {
            transport: Arc::new(transport),
            database_id: config.database_id,
        })
    }

    /// Create a client over an existing transport
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            database_id: None,
        }
    }

    /// Set the database id
    #[must_use]
    pub fn database(mut self, database_id: impl Into<String>) -> Self {
        self.database_id = Some(database_id.into());
        self
    }

    /// Database id, if configured
    pub fn database_id(&self) -> Option<&str> {
        self.database_id.as_deref()
    }

    /// Transport shared with the cursors this client creates
    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    // ========================================================================
    // Request helpers
    // ========================================================================

    async fn get(&self, url: &str) -> Result<Arc<Response>> {
        Ok(Arc::new(Response::classify(self.transport.get(url).await?)))
    }

    async fn post(&self, url: &str, body: &Value) -> Result<Arc<Response>> {
        let raw = self.transport.post(url, serde_json::to_string(body)?).await?;
        Ok(Arc::new(Response::classify(raw)))
    }

    async fn put(&self, url: &str, body: &Value) -> Result<Arc<Response>> {
        let raw = self.transport.put(url, serde_json::to_string(body)?).await?;
        Ok(Arc::new(Response::classify(raw)))
    }

    async fn delete_url(&self, url: &str) -> Result<Arc<Response>> {
        Ok(Arc::new(Response::classify(self.transport.delete(url).await?)))
    }

    async fn cursor<T: crate::decode::FromJson>(
        &self,
        url: &str,
        layout: PageLayout,
    ) -> Result<Cursor<T>> {
        let response = self.get(url).await?;
        Cursor::from_response(response, Arc::clone(&self.transport), layout)
    }

    // ========================================================================
    // Series
    // ========================================================================

    /// Create a series
    pub async fn create_series(&self, series: &Series) -> Result<Series> {
        let response = self.post("series/", &series.to_json_value()).await?;
        cast_single(&response)
    }

    /// Get a series by key
    pub async fn get_series(&self, key: &str) -> Result<Series> {
        let response = self.get(&make_series_url(key)).await?;
        cast_single(&response)
    }

    /// List the series matching a filter
    pub async fn list_series(&self, filter: &SeriesFilter) -> Result<Cursor<Series>> {
        let mut params = QueryParams::new();
        filter.apply(&mut params);
        self.cursor(&params.append_to("series/"), PageLayout::Array)
            .await
    }

    /// Replace a series' name, tags and attributes
    pub async fn update_series(&self, series: &Series) -> Result<Series> {
        let response = self
            .put(&make_series_url(&series.key), &series.to_json_value())
            .await?;
        cast_single(&response)
    }

    /// Delete every series matching a filter
    ///
    /// An empty filter matches every series and is refused by the API
    /// unless `allow_truncation` is set.
    pub async fn delete_series(
        &self,
        filter: &SeriesFilter,
        allow_truncation: bool,
    ) -> Result<DeleteSummary> {
        let mut params = QueryParams::new();
        filter.apply(&mut params);
        if allow_truncation {
            params.push("allow_truncation", true);
        }
        let response = self.delete_url(&params.append_to("series/")).await?;
        cast_single(&response)
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Read the points of one series in `[start, end)`
    pub async fn read_data(
        &self,
        key: &str,
        start: impl TimeParam,
        end: impl TimeParam,
        options: &ReadOptions,
    ) -> Result<Cursor<DataPoint>> {
        let mut params = range(start, end)?;
        options.apply(&mut params);
        let url = params.append_to(&format!("{}/segment", make_series_url(key)));
        self.cursor(&url, PageLayout::Envelope).await
    }

    /// Read several series at once, one [`MultiPoint`] per timestamp
    pub async fn read_multi(
        &self,
        start: impl TimeParam,
        end: impl TimeParam,
        filter: &SeriesFilter,
        options: &ReadOptions,
    ) -> Result<Cursor<MultiPoint>> {
        let mut params = range(start, end)?;
        filter.apply(&mut params);
        options.apply(&mut params);
        self.cursor(&params.append_to("multi/"), PageLayout::Envelope)
            .await
    }

    /// Combine the series matching a filter into one with `aggregation`
    pub async fn aggregate_data(
        &self,
        aggregation: &str,
        start: impl TimeParam,
        end: impl TimeParam,
        filter: &SeriesFilter,
        options: &ReadOptions,
    ) -> Result<Cursor<DataPoint>> {
        let mut params = range(start, end)?;
        params.push("aggregation.fold", aggregation);
        filter.apply(&mut params);
        options.apply(&mut params);
        self.cursor(&params.append_to("segment/"), PageLayout::Envelope)
            .await
    }

    /// Find one point per `period` matching `predicate` (e.g. `max`)
    pub async fn find_data(
        &self,
        key: &str,
        predicate: &str,
        period: &str,
        start: impl TimeParam,
        end: impl TimeParam,
        options: &ReadOptions,
    ) -> Result<Cursor<DataPointFound>> {
        let mut params = range(start, end)?;
        params
            .push("predicate.function", predicate)
            .push("predicate.period", period)
            .push_opt("tz", options.tz.as_deref())
            .push_opt("limit", options.limit);
        let url = params.append_to(&format!("{}/find", make_series_url(key)));
        self.cursor(&url, PageLayout::Envelope).await
    }

    /// Summary statistics of one series in `[start, end)`
    pub async fn get_summary(
        &self,
        key: &str,
        start: impl TimeParam,
        end: impl TimeParam,
        tz: Option<&str>,
    ) -> Result<SeriesSummary> {
        let mut params = range(start, end)?;
        params.push_opt("tz", tz);
        let url = params.append_to(&format!("{}/summary", make_series_url(key)));
        let response = self.get(&url).await?;
        cast_single(&response)
    }

    /// The point of one series nearest `ts` in `direction`
    pub async fn single_value(
        &self,
        key: &str,
        ts: impl TimeParam,
        direction: Direction,
    ) -> Result<SingleValue> {
        let mut params = QueryParams::new();
        params
            .push("ts", ts.to_time_param()?)
            .push("direction", direction);
        let url = params.append_to(&format!("{}/single", make_series_url(key)));
        let response = self.get(&url).await?;
        cast_single(&response)
    }

    /// The point nearest `ts` for every series matching a filter
    pub async fn multi_series_single_value(
        &self,
        filter: &SeriesFilter,
        ts: impl TimeParam,
        direction: Direction,
    ) -> Result<Vec<SingleValue>> {
        let mut params = QueryParams::new();
        params
            .push("ts", ts.to_time_param()?)
            .push("direction", direction);
        filter.apply(&mut params);
        let response = self.get(&params.append_to("single/")).await?;
        cast_list(&response)
    }

    // ========================================================================
    // Writes
    // ========================================================================

    /// Write points to one series
    pub async fn write_data(&self, key: &str, points: &[DataPoint]) -> Result<Arc<Response>> {
        let body = Value::Array(points.iter().map(DataPoint::to_json_value).collect());
        let response = self
            .post(&format!("{}/data", make_series_url(key)), &body)
            .await?;
        response.ensure_success()?;
        Ok(response)
    }

    /// Write points to several series in one request
    ///
    /// Each point must name its series with a key or an id. If only some
    /// points are written the API answers 207 and this returns
    /// [`Error::PartialWrite`] with the per-point error document.
    pub async fn write_multi(&self, points: &[DataPoint]) -> Result<Arc<Response>> {
        if let Some(pos) = points.iter().position(|p| p.key.is_none() && p.id.is_none()) {
            return Err(Error::Other(format!(
                "Multi-write point {pos} has neither a series key nor an id"
            )));
        }

        let body = Value::Array(points.iter().map(DataPoint::to_json_value).collect());
        debug!("Writing {} points to multiple series", points.len());
        let response = self.post("multi/", &body).await?;
        response.ensure_success()?;
        Ok(response)
    }

    /// Delete the points of one series in `[start, end)`
    pub async fn delete(
        &self,
        key: &str,
        start: impl TimeParam,
        end: impl TimeParam,
    ) -> Result<Arc<Response>> {
        let params = range(start, end)?;
        let url = params.append_to(&format!("{}/data", make_series_url(key)));
        let response = self.delete_url(&url).await?;
        response.ensure_success()?;
        Ok(response)
    }
}

fn range(start: impl TimeParam, end: impl TimeParam) -> Result<QueryParams> {
    let mut params = QueryParams::new();
    params
        .push("start", start.to_time_param()?)
        .push("end", end.to_time_param()?);
    Ok(params)
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("database_id", &self.database_id)
            .finish_non_exhaustive()
    }
}
