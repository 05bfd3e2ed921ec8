//! Timestamp handling
//!
//! Converts caller supplied times into query parameters and parses the
//! ISO8601 timestamps the API returns, applying an optional IANA timezone.

use crate::error::{Error, Result};
use chrono::{DateTime, Duration, FixedOffset, LocalResult, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use regex::Regex;
use std::fmt::Display;
use std::sync::LazyLock;

/// ISO8601 prefix accepted for string time parameters
static ISO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}((\.\d{3,6})?([+-](\d{4}|\d{2}:\d{2}))?)?")
        .expect("ISO8601 pattern is valid")
});

/// Something that can be sent to the API as a time parameter
pub trait TimeParam {
    /// Render as an ISO8601 string, validating caller supplied text
    fn to_time_param(&self) -> Result<String>;
}

impl TimeParam for str {
    fn to_time_param(&self) -> Result<String> {
        if ISO.is_match(self) {
            Ok(self.to_string())
        } else {
            Err(Error::invalid_timestamp(self))
        }
    }
}

impl TimeParam for String {
    fn to_time_param(&self) -> Result<String> {
        self.as_str().to_time_param()
    }
}

impl TimeParam for NaiveDateTime {
    fn to_time_param(&self) -> Result<String> {
        Ok(self.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
    }
}

impl<Z: TimeZone> TimeParam for DateTime<Z>
where
    Z::Offset: Display,
{
    fn to_time_param(&self) -> Result<String> {
        Ok(self.to_rfc3339())
    }
}

impl<T: TimeParam + ?Sized> TimeParam for &T {
    fn to_time_param(&self) -> Result<String> {
        (**self).to_time_param()
    }
}

/// Look up an IANA timezone by name (e.g. `US/Eastern`)
pub fn parse_tz(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| Error::invalid_timezone(name))
}

/// Parse an ISO8601 timestamp from the API
///
/// Timestamps without an offset are localized in `tz`, or taken as UTC when
/// no timezone is given. Timestamps with an offset keep their instant and are
/// shifted into `tz` when one is given.
pub fn convert_iso_stamp(text: &str, tz: Option<Tz>) -> Result<DateTime<FixedOffset>> {
    let text = text.trim();

    let zoned = DateTime::parse_from_rfc3339(text)
        .or_else(|_| DateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f%z"));
    if let Ok(dt) = zoned {
        return Ok(match tz {
            Some(tz) => dt.with_timezone(&tz).fixed_offset(),
            None => dt,
        });
    }

    let naive = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .map_err(|_| Error::invalid_timestamp(text))?;
    match tz {
        Some(tz) => localize(tz, &naive).ok_or_else(|| Error::invalid_timestamp(text)),
        None => Ok(Utc.from_utc_datetime(&naive).fixed_offset()),
    }
}

/// Place a wall time in `tz`
///
/// An ambiguous wall time takes its first reading. A wall time skipped by
/// a forward transition is read with the offset in force before the gap,
/// which lands on the same distance past the transition.
fn localize(tz: Tz, naive: &NaiveDateTime) -> Option<DateTime<FixedOffset>> {
    match tz.from_local_datetime(naive) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Some(dt.fixed_offset()),
        LocalResult::None => {
            // transitions are at most a few hours wide
            let before = tz
                .offset_from_local_datetime(&(*naive - Duration::hours(6)))
                .earliest()?
                .fix();
            let utc = *naive - Duration::seconds(i64::from(before.local_minus_utc()));
            Some(tz.from_utc_datetime(&utc).fixed_offset())
        }
    }
}

/// Parse a caller supplied time parameter into a timestamp
pub fn to_timestamp(time: impl TimeParam, tz: Option<Tz>) -> Result<DateTime<FixedOffset>> {
    convert_iso_stamp(&time.to_time_param()?, tz)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate, Timelike};

    #[test]
    fn test_check_time_param_valid_strings() {
        for s in [
            "2008-01-03T10:12:32.231+0000",
            "2008-01-03T10:12:32.231321+0000",
            "2008-01-03T10:12:32.231321+05:00",
            "2013-01-01T10:12:15",
        ] {
            assert_eq!(s.to_time_param().unwrap(), s);
        }
    }

    #[test]
    fn test_check_time_param_invalid_strings() {
        for s in ["20-01-03T10:12:32.231321+0000", "2012-01/03T10:1:32.231321+0000"] {
            let err = s.to_time_param().unwrap_err();
            assert!(matches!(err, Error::InvalidTimestamp { .. }));
        }
    }

    #[test]
    fn test_check_time_param_naive_datetime() {
        let dt = NaiveDate::from_ymd_opt(2013, 1, 1)
            .unwrap()
            .and_hms_opt(10, 12, 15)
            .unwrap();
        assert_eq!(dt.to_time_param().unwrap(), "2013-01-01T10:12:15");
    }

    #[test]
    fn test_check_time_param_aware_datetime() {
        let dt = Utc.with_ymd_and_hms(2013, 1, 1, 10, 12, 15).unwrap();
        assert_eq!(dt.to_time_param().unwrap(), "2013-01-01T10:12:15+00:00");
    }

    #[test]
    fn test_convert_iso_stamp_naive() {
        let ret = convert_iso_stamp("2013-01-01T10:12:15", None).unwrap();
        assert_eq!(
            (ret.year(), ret.month(), ret.day()),
            (2013, 1, 1)
        );
        assert_eq!((ret.hour(), ret.minute(), ret.second()), (10, 12, 15));
        assert_eq!(ret.offset().local_minus_utc(), 0);
    }

    #[test]
    fn test_convert_iso_stamp_with_compact_offset() {
        let ret = convert_iso_stamp("2013-01-01T10:12:15.032+0000", None).unwrap();
        assert_eq!(ret.second(), 15);
        assert_eq!(ret.nanosecond(), 32_000_000);
    }

    #[test]
    fn test_convert_iso_stamp_localizes_naive_in_tz() {
        let tz = parse_tz("US/Eastern").unwrap();
        let ret = convert_iso_stamp("2013-01-01T10:12:15.032", Some(tz)).unwrap();

        assert_eq!((ret.hour(), ret.minute(), ret.second()), (10, 12, 15));
        assert_eq!(ret.nanosecond(), 32_000_000);
        assert_eq!(ret.offset().local_minus_utc(), -5 * 3600);
    }

    #[test]
    fn test_convert_iso_stamp_naive_in_dst_gap() {
        let tz = parse_tz("US/Eastern").unwrap();
        let ret = convert_iso_stamp("2013-03-10T02:30:00", Some(tz)).unwrap();
        assert_eq!(ret.to_rfc3339(), "2013-03-10T03:30:00-04:00");
    }

    #[test]
    fn test_convert_iso_stamp_naive_ambiguous_takes_first() {
        let tz = parse_tz("US/Eastern").unwrap();
        let ret = convert_iso_stamp("2013-11-03T01:30:00", Some(tz)).unwrap();
        assert_eq!(ret.to_rfc3339(), "2013-11-03T01:30:00-04:00");
    }

    #[test]
    fn test_convert_iso_stamp_shifts_zoned_into_tz() {
        let tz = parse_tz("US/Eastern").unwrap();
        let ret = convert_iso_stamp("2013-12-18T05:00:00Z", Some(tz)).unwrap();
        assert_eq!(ret.to_rfc3339(), "2013-12-18T00:00:00-05:00");
    }

    #[test]
    fn test_convert_iso_stamp_rejects_garbage() {
        assert!(convert_iso_stamp("yesterday", None).is_err());
    }

    #[test]
    fn test_parse_tz() {
        assert!(parse_tz("UTC").is_ok());
        assert!(matches!(
            parse_tz("Mars/Olympus"),
            Err(Error::InvalidTimezone { .. })
        ));
    }

    #[test]
    fn test_to_timestamp_validates_first() {
        assert!(to_timestamp("2013/01/01", None).is_err());
        let ts = to_timestamp("2013-12-18T00:00:00", parse_tz("US/Eastern").ok()).unwrap();
        assert_eq!(ts.to_rfc3339(), "2013-12-18T00:00:00-05:00");
    }
}
