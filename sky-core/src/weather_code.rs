//! WMO weather interpretation codes as used by Open-Meteo.
//!
//! See <https://open-meteo.com/en/docs> for the code reference.

use std::borrow::Cow;

/// Code groups and their canonical descriptions.
pub const WEATHER_CODES: &[(&[i32], &str)] = &[
    (&[0], "Clear sky"),
    (&[1, 2, 3], "Mainly clear, partly cloudy, and overcast"),
    (&[45, 48], "Fog and depositing rime fog"),
    (&[51, 53, 55], "Drizzle: Light, moderate, and dense intensity"),
    (&[56, 57], "Freezing Drizzle: Light and dense intensity"),
    (&[61, 63, 65], "Rain: Slight, moderate and heavy intensity"),
    (&[66, 67], "Freezing Rain: Light and heavy intensity"),
    (&[71, 73, 75], "Snow fall: Slight, moderate, and heavy intensity"),
    (&[77], "Snow grains"),
    (&[80, 81, 82], "Rain showers: Slight, moderate, and violent"),
    (&[85, 86], "Snow showers: Slight and heavy"),
    (&[95], "Thunderstorm: Slight or moderate"),
    (&[96, 99], "Thunderstorm with slight and heavy hail"),
];

/// Describes a weather code. Codes outside the table get a fallback that
/// includes the code itself.
pub fn describe(code: i32) -> Cow<'static, str> {
    WEATHER_CODES
        .iter()
        .find(|(codes, _)| codes.contains(&code))
        .map(|(_, description)| Cow::Borrowed(*description))
        .unwrap_or_else(|| Cow::Owned(format!("Unknown weather code: {code}")))
}
