//! Shape checks for parallel time-series arrays.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::WeatherError;

/// Time resolution of a data view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Current,
    Hourly,
    Daily,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Current => "current",
            Granularity::Hourly => "hourly",
            Granularity::Daily => "daily",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Length of an optional series, `None` when the upstream omitted it.
pub fn series_len<T>(series: &Option<Vec<T>>) -> Option<usize> {
    series.as_ref().map(Vec::len)
}

/// Confirms that `time` and every `required` field are present and share one
/// length, returning that length.
///
/// `field_len` maps a field name to the length of its array, or `None` when the
/// array is absent. Presence is checked for all fields before any length is
/// compared, so a response missing several arrays reports all of them at once.
pub fn common_length<F>(
    granularity: Granularity,
    time: Option<usize>,
    required: &[&str],
    field_len: F,
) -> Result<usize, WeatherError>
where
    F: Fn(&str) -> Option<usize>,
{
    let mut missing = Vec::new();
    if time.is_none() {
        missing.push("time".to_string());
    }
    missing.extend(
        required
            .iter()
            .filter(|&&name| field_len(name).is_none())
            .map(|name| name.to_string()),
    );

    let Some(expected) = time else {
        return Err(WeatherError::IncompleteData {
            granularity,
            missing,
        });
    };
    if !missing.is_empty() {
        return Err(WeatherError::IncompleteData {
            granularity,
            missing,
        });
    }

    for &name in required {
        let actual = field_len(name).unwrap_or_default();
        if actual != expected {
            return Err(WeatherError::InconsistentLength {
                granularity,
                field: name.to_string(),
                expected,
                actual,
            });
        }
    }

    if expected == 0 {
        return Err(WeatherError::NoData { granularity });
    }

    Ok(expected)
}

/// Borrows a series the caller has already passed through [`common_length`].
pub(crate) fn required<'a, T>(
    granularity: Granularity,
    name: &str,
    series: &'a Option<Vec<T>>,
) -> Result<&'a [T], WeatherError> {
    series
        .as_deref()
        .ok_or_else(|| WeatherError::IncompleteData {
            granularity,
            missing: vec![name.to_string()],
        })
}
