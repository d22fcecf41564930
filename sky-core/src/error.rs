use reqwest::StatusCode;
use thiserror::Error;

use crate::series::Granularity;

/// A time string matched none of the accepted shapes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized time format: '{value}'")]
pub struct TimeParseError {
    pub value: String,
}

/// Failures reported by the HTTP collaborator.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Failed to build HTTP client: {0}")]
    ConnectionFailed(String),

    #[error("Request to {url} failed: {reason}")]
    RequestFailed { url: String, reason: String },

    /// Open-Meteo answered with `{"error": true, "reason": ...}`.
    #[error("API error ({status}): {reason}")]
    Api { status: StatusCode, reason: String },

    #[error("API returned non-OK status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Failed to parse {what} response: {reason}")]
    Parse { what: &'static str, reason: String },

    #[error("No location found for '{0}'")]
    LocationNotFound(String),

    #[error("Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
    InvalidCoordinates,
}

/// Errors produced while turning a raw response into simplified records.
///
/// Every variant is terminal for the call that produced it.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("failed to parse {field} time")]
    TimeParse {
        field: String,
        #[source]
        source: TimeParseError,
    },

    #[error("{granularity} data is incomplete, missing: {}", missing.join(", "))]
    IncompleteData {
        granularity: Granularity,
        missing: Vec<String>,
    },

    #[error(
        "{granularity} field '{field}' has {actual} entries, expected {expected} to match 'time'"
    )]
    InconsistentLength {
        granularity: Granularity,
        field: String,
        expected: usize,
        actual: usize,
    },

    #[error("no {granularity} data returned for the requested location and range")]
    NoData { granularity: Granularity },

    #[error("forecast day count {0} is outside 1..=16")]
    InvalidDayCount(i64),

    #[error(transparent)]
    Upstream(#[from] ClientError),
}

impl WeatherError {
    pub(crate) fn time_parse(field: &str, source: TimeParseError) -> Self {
        Self::TimeParse {
            field: field.to_string(),
            source,
        }
    }
}
