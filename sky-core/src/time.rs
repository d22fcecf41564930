//! Timestamp resolution for Open-Meteo time strings.
//!
//! Open-Meteo reports local wall-clock times without an offset when the request
//! asks for `timezone=auto`, so each string is interpreted against the IANA zone
//! the response names. Self-describing RFC 3339 strings are accepted as well, and
//! daily views send bare dates.

use chrono::{
    DateTime, FixedOffset, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeDelta,
    TimeZone,
};
use chrono_tz::Tz;

use crate::error::TimeParseError;

const LOCAL_MINUTE_FORMAT: &str = "%Y-%m-%dT%H:%M";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// One accepted layout for a time string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeShape {
    /// `2023-01-01T12:00`, wall-clock time in the response's zone.
    LocalMinute,
    /// `2023-01-01T12:00:00Z` or with a numeric offset; the zone is ignored.
    Rfc3339,
    /// `2023-01-01`, midnight in the response's zone.
    Date,
}

/// Shapes are tried in this order and the first match wins.
pub const PARSE_ORDER: [TimeShape; 3] = [TimeShape::LocalMinute, TimeShape::Rfc3339, TimeShape::Date];

impl TimeShape {
    pub fn parse(self, value: &str, zone: Tz) -> Option<DateTime<FixedOffset>> {
        match self {
            TimeShape::LocalMinute => NaiveDateTime::parse_from_str(value, LOCAL_MINUTE_FORMAT)
                .ok()
                .and_then(|naive| localize(naive, zone)),
            TimeShape::Rfc3339 => DateTime::parse_from_rfc3339(value).ok(),
            TimeShape::Date => NaiveDate::parse_from_str(value, DATE_FORMAT)
                .ok()
                .and_then(|date| localize(date.and_time(NaiveTime::MIN), zone)),
        }
    }
}

/// Looks up an IANA zone name. Empty or unknown names resolve to UTC.
pub fn resolve_zone(name: &str) -> Tz {
    name.parse::<Tz>().unwrap_or(Tz::UTC)
}

/// Resolves `value` against the zone named by `timezone`.
pub fn resolve(value: &str, timezone: &str) -> Result<DateTime<FixedOffset>, TimeParseError> {
    resolve_in(value, resolve_zone(timezone))
}

/// Resolves `value` against an already looked-up zone.
pub fn resolve_in(value: &str, zone: Tz) -> Result<DateTime<FixedOffset>, TimeParseError> {
    PARSE_ORDER
        .iter()
        .find_map(|shape| shape.parse(value, zone))
        .ok_or_else(|| TimeParseError {
            value: value.to_string(),
        })
}

/// Pins a wall-clock time to `zone`.
///
/// Repeated wall-clock times (end of DST) take the earlier instant. Times that
/// fall into a DST gap keep their literal components and take the offset in
/// effect before the gap.
fn localize(naive: NaiveDateTime, zone: Tz) -> Option<DateTime<FixedOffset>> {
    match zone.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt.fixed_offset()),
        LocalResult::Ambiguous(earliest, _) => Some(earliest.fixed_offset()),
        LocalResult::None => {
            let before_gap = zone
                .offset_from_utc_datetime(&(naive - TimeDelta::days(1)))
                .fix();
            before_gap.from_local_datetime(&naive).single()
        }
    }
}
