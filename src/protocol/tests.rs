//! Tests for protocol objects

use super::*;
use crate::decode::{cast_list, cast_single, DecodeContext, FromJson};
use crate::http::RawResult;
use crate::response::Response;
use crate::temporal::parse_tz;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

fn response(status: u16, body: &str) -> Arc<Response> {
    Arc::new(Response::classify(RawResult::new(status, body)))
}

fn eastern() -> DecodeContext {
    DecodeContext::detached().with_tz(parse_tz("US/Eastern").ok())
}

// ============================================================================
// Series Tests
// ============================================================================

#[test]
fn test_series_cast_single() {
    let resp = response(
        200,
        r#"{"key": "k", "id": "i", "name": "", "tags": [], "attributes": {}}"#,
    );
    let series: Series = cast_single(&resp).unwrap();

    assert_eq!(series.key, "k");
    assert_eq!(series.id.as_deref(), Some("i"));
    assert_eq!(series.name, "");
    assert!(series.tags.is_empty());
    assert!(series.attributes.is_empty());
    assert_eq!(series.response().map(|r| r.status), Some(200));
}

#[test]
fn test_series_cast_list() {
    let resp = response(
        200,
        r#"[
            {"key": "a", "id": "1", "name": "", "tags": ["x"], "attributes": {}},
            {"key": "b", "id": "2", "name": "B", "tags": [], "attributes": {"env": "prod"}}
        ]"#,
    );
    let series: Vec<Series> = cast_list(&resp).unwrap();

    assert_eq!(series.len(), 2);
    assert_eq!(series[0].key, "a");
    assert_eq!(series[0].tags, vec!["x".to_string()]);
    assert_eq!(series[1].name, "B");
    assert_eq!(series[1].attributes.get("env").map(String::as_str), Some("prod"));
}

#[test]
fn test_series_unwraps_by_key_envelope() {
    let value = json!({"series": {"key": "k", "tags": [], "attributes": {}}});
    let series = Series::from_json(&value, &DecodeContext::detached()).unwrap();
    assert_eq!(series, Series::new("k"));
}

#[test]
fn test_series_missing_tags() {
    let value = json!({"key": "k", "attributes": {}});
    let err = Series::from_json(&value, &DecodeContext::detached()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Failed to decode response: Expected key 'tags' in JSON object for Series"
    );
}

#[test]
fn test_series_to_json_value() {
    let series = Series::new("foo")
        .with_name("Foo")
        .with_tag("bar")
        .with_attribute("baz", "qux");

    assert_eq!(
        series.to_json_value(),
        json!({"key": "foo", "name": "Foo", "tags": ["bar"], "attributes": {"baz": "qux"}})
    );
}

#[test]
fn test_series_to_json_value_keeps_id() {
    let value = json!({"id": "abc123", "key": "foo", "tags": [], "attributes": {}});
    let series = Series::from_json(&value, &DecodeContext::detached()).unwrap();

    assert_eq!(
        series.to_json_value(),
        json!({"id": "abc123", "key": "foo", "name": "", "tags": [], "attributes": {}})
    );
}

// ============================================================================
// Rollup Tests
// ============================================================================

#[test]
fn test_rollup_from_json() {
    let value = json!({"interval": "PT1H", "function": "mean", "tz": "US/Eastern"});
    let rollup = Rollup::from_json(&value, &DecodeContext::detached()).unwrap();

    assert_eq!(rollup.interval, "PT1H");
    assert_eq!(rollup.function, "mean");
    assert_eq!(rollup.tz, parse_tz("US/Eastern").ok());
    assert_eq!(rollup.to_json_value(), value);
}

#[test]
fn test_rollup_rejects_bad_input() {
    let ctx = DecodeContext::detached();
    assert!(Rollup::from_json(&json!({"function": "mean"}), &ctx).is_err());
    let bad_tz = json!({"interval": "PT1H", "function": "mean", "tz": "Nowhere"});
    assert!(Rollup::from_json(&bad_tz, &ctx).is_err());
    assert!(Rollup::from_json(&json!("PT1H"), &ctx).is_err());
}

// ============================================================================
// DataPoint Tests
// ============================================================================

#[test]
fn test_data_point_renders_in_context_timezone() {
    let value = json!({"t": "2013-12-18T05:00:00.000Z", "v": 5.0});
    let point = DataPoint::from_json(&value, &eastern()).unwrap();

    assert_eq!(point.timestamp(), "2013-12-18T00:00:00-05:00");
    assert_eq!(point.v, 5.0);
    assert!(point.response().is_none());
}

#[test]
fn test_data_point_naive_timestamp_is_localized() {
    let value = json!({"t": "2013-12-18T00:00:00", "v": 1});
    let point = DataPoint::from_json(&value, &eastern()).unwrap();
    assert_eq!(point.timestamp(), "2013-12-18T00:00:00-05:00");
}

#[test]
fn test_data_point_requires_value() {
    let value = json!({"t": "2013-12-18T00:00:00Z"});
    let err = DataPoint::from_json(&value, &DecodeContext::detached()).unwrap_err();
    assert!(err.to_string().contains("Expected key 'v'"));
}

#[test]
fn test_data_point_bad_timestamp() {
    let value = json!({"t": "yesterday", "v": 1.0});
    let err = DataPoint::from_json(&value, &DecodeContext::detached()).unwrap_err();
    assert!(err.is_deserialization());
}

#[test]
fn test_data_point_from_data() {
    let point = DataPoint::from_data("2013-01-01T10:00:00", 12.5)
        .unwrap()
        .with_key("foo");

    assert_eq!(
        point.to_json_value(),
        json!({"t": "2013-01-01T10:00:00+00:00", "v": 12.5, "key": "foo"})
    );
}

#[test]
fn test_data_point_from_data_with_tz() {
    let point = DataPoint::from_data_with_tz("2013-12-18T00:00:00", 1.0, "US/Eastern").unwrap();
    assert_eq!(point.timestamp(), "2013-12-18T00:00:00-05:00");
    assert!(point.tz.is_some());
}

#[test]
fn test_data_point_from_data_rejects_bad_input() {
    assert!(DataPoint::from_data("01/01/2013", 1.0).is_err());
    assert!(DataPoint::from_data_with_tz("2013-01-01T00:00:00", 1.0, "Nowhere/Else").is_err());
}

// ============================================================================
// MultiPoint / DataPointFound Tests
// ============================================================================

#[test]
fn test_multi_point() {
    let value = json!({"t": "2013-01-01T00:00:00Z", "v": {"a": 1.0, "b": 2.5}});
    let point = MultiPoint::from_json(&value, &DecodeContext::detached()).unwrap();

    assert_eq!(point.get("a"), Some(1.0));
    assert_eq!(point.get("b"), Some(2.5));
    assert_eq!(point.get("c"), None);
}

#[test]
fn test_data_point_found() {
    let value = json!({
        "interval": {"start": "2013-01-01T00:00:00Z", "end": "2013-01-02T00:00:00Z"},
        "found": {"t": "2013-01-01T12:00:00Z", "v": 9.0}
    });
    let found = DataPointFound::from_json(&value, &DecodeContext::detached()).unwrap();

    assert_eq!(found.start.to_rfc3339(), "2013-01-01T00:00:00+00:00");
    assert_eq!(found.end.to_rfc3339(), "2013-01-02T00:00:00+00:00");
    assert_eq!(found.t.to_rfc3339(), "2013-01-01T12:00:00+00:00");
    assert_eq!(found.v, 9.0);
}

#[test]
fn test_data_point_found_missing_interval() {
    let value = json!({"found": {"t": "2013-01-01T12:00:00Z", "v": 9.0}});
    assert!(DataPointFound::from_json(&value, &DecodeContext::detached()).is_err());
}

// ============================================================================
// SingleValue Tests
// ============================================================================

#[test]
fn test_single_value_uses_point_timezone() {
    let resp = response(
        200,
        r#"{
            "series": {"key": "k", "tags": [], "attributes": {}},
            "data": {"t": "2013-12-18T05:00:00Z", "v": 3.0, "tz": "US/Eastern"}
        }"#,
    );
    let single: SingleValue = cast_single(&resp).unwrap();

    assert_eq!(single.series.key, "k");
    let data = single.data.clone().unwrap();
    assert_eq!(data.timestamp(), "2013-12-18T00:00:00-05:00");
    assert_eq!(single.response().map(|r| r.status), Some(200));
}

#[test]
fn test_single_value_without_data() {
    let resp = response(
        200,
        r#"{"series": {"key": "k", "tags": [], "attributes": {}}, "data": null}"#,
    );
    let single: SingleValue = cast_single(&resp).unwrap();
    assert!(single.data.is_none());
}

// ============================================================================
// Summary Tests
// ============================================================================

#[test]
fn test_series_summary() {
    let resp = response(
        200,
        r#"{
            "series": {"key": "k", "tags": [], "attributes": {}},
            "summary": {"mean": 2.0, "sum": 6.0, "min": 1.0, "max": 3.0, "stddev": 1.0, "count": 3},
            "tz": "UTC",
            "start": "2013-01-01T00:00:00Z",
            "end": "2013-01-02T00:00:00Z"
        }"#,
    );
    let summary: SeriesSummary = cast_single(&resp).unwrap();

    assert_eq!(summary.summary.mean(), Some(2.0));
    assert_eq!(summary.summary.count(), Some(3));
    assert_eq!(summary.summary.get("missing"), None);
    assert_eq!(
        summary.start.map(|s| s.to_rfc3339()).as_deref(),
        Some("2013-01-01T00:00:00+00:00")
    );
}

#[test]
fn test_summary_skips_null_stats() {
    let value = json!({
        "series": {"key": "k", "tags": [], "attributes": {}},
        "summary": {"mean": null, "count": 0}
    });
    let summary = SeriesSummary::from_json(&value, &DecodeContext::detached()).unwrap();
    assert_eq!(summary.summary.mean(), None);
    assert_eq!(summary.summary.count(), Some(0));
}

#[test]
fn test_delete_summary() {
    let resp = response(200, r#"{"deleted": 4}"#);
    let summary: DeleteSummary = cast_single(&resp).unwrap();
    assert_eq!(summary.deleted, 4);
}
