//! Response bodies as Open-Meteo sends them.
//!
//! Only the requested sections are present in a response, and inside a section
//! only the requested fields, so nearly everything here is optional. Open-Meteo
//! also writes `null` for single entries it has no value for (e.g. probabilities
//! past the model horizon); those decode to the element's default.

use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    model::{AirQualityUnits, Units},
    series::series_len,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    #[serde(default, rename = "generationtime_ms")]
    pub generation_time_ms: f64,
    /// IANA zone name; empty when the upstream omitted it or sent `null`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub timezone: String,
    #[serde(default)]
    pub elevation: f64,
    pub current: Option<RawCurrent>,
    pub current_units: Option<RawCurrentUnits>,
    pub hourly: Option<RawHourly>,
    pub hourly_units: Option<RawHourlyUnits>,
    pub daily: Option<RawDaily>,
    pub daily_units: Option<RawDailyUnits>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawCurrent {
    pub time: Option<String>,
    pub temperature_2m: Option<f64>,
    pub relative_humidity_2m: Option<f64>,
    pub apparent_temperature: Option<f64>,
    pub precipitation: Option<f64>,
    pub weather_code: Option<i32>,
    pub wind_speed_10m: Option<f64>,
    pub is_day: Option<i32>,
}

impl RawCurrent {
    /// Whether the value named `field` was reported.
    pub fn has(&self, field: &str) -> bool {
        match field {
            "time" => self.time.is_some(),
            "temperature_2m" => self.temperature_2m.is_some(),
            "relative_humidity_2m" => self.relative_humidity_2m.is_some(),
            "apparent_temperature" => self.apparent_temperature.is_some(),
            "precipitation" => self.precipitation.is_some(),
            "weather_code" => self.weather_code.is_some(),
            "wind_speed_10m" => self.wind_speed_10m.is_some(),
            "is_day" => self.is_day.is_some(),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawCurrentUnits {
    pub temperature_2m: Option<String>,
    pub precipitation: Option<String>,
    pub wind_speed_10m: Option<String>,
}

impl From<&RawCurrentUnits> for Units {
    fn from(units: &RawCurrentUnits) -> Self {
        Units {
            temperature: units.temperature_2m.clone().unwrap_or_default(),
            wind_speed: units.wind_speed_10m.clone().unwrap_or_default(),
            precipitation: units.precipitation.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawHourly {
    #[serde(default, deserialize_with = "nullable_series")]
    pub time: Option<Vec<String>>,
    #[serde(default, deserialize_with = "nullable_series")]
    pub temperature_2m: Option<Vec<f64>>,
    #[serde(default, deserialize_with = "nullable_series")]
    pub relative_humidity_2m: Option<Vec<f64>>,
    #[serde(default, deserialize_with = "nullable_series")]
    pub apparent_temperature: Option<Vec<f64>>,
    #[serde(default, deserialize_with = "nullable_series")]
    pub precipitation_probability: Option<Vec<f64>>,
    #[serde(default, deserialize_with = "nullable_series")]
    pub precipitation: Option<Vec<f64>>,
    #[serde(default, deserialize_with = "nullable_series")]
    pub weather_code: Option<Vec<i32>>,
    #[serde(default, deserialize_with = "nullable_series")]
    pub wind_speed_10m: Option<Vec<f64>>,
}

impl RawHourly {
    pub fn field_len(&self, field: &str) -> Option<usize> {
        match field {
            "time" => series_len(&self.time),
            "temperature_2m" => series_len(&self.temperature_2m),
            "relative_humidity_2m" => series_len(&self.relative_humidity_2m),
            "apparent_temperature" => series_len(&self.apparent_temperature),
            "precipitation_probability" => series_len(&self.precipitation_probability),
            "precipitation" => series_len(&self.precipitation),
            "weather_code" => series_len(&self.weather_code),
            "wind_speed_10m" => series_len(&self.wind_speed_10m),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawHourlyUnits {
    pub temperature_2m: Option<String>,
    pub precipitation: Option<String>,
    pub wind_speed_10m: Option<String>,
}

impl From<&RawHourlyUnits> for Units {
    fn from(units: &RawHourlyUnits) -> Self {
        Units {
            temperature: units.temperature_2m.clone().unwrap_or_default(),
            wind_speed: units.wind_speed_10m.clone().unwrap_or_default(),
            precipitation: units.precipitation.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDaily {
    #[serde(default, deserialize_with = "nullable_series")]
    pub time: Option<Vec<String>>,
    #[serde(default, deserialize_with = "nullable_series")]
    pub temperature_2m_max: Option<Vec<f64>>,
    #[serde(default, deserialize_with = "nullable_series")]
    pub temperature_2m_min: Option<Vec<f64>>,
    #[serde(default, deserialize_with = "nullable_series")]
    pub weather_code: Option<Vec<i32>>,
    #[serde(default, deserialize_with = "nullable_series")]
    pub sunrise: Option<Vec<String>>,
    #[serde(default, deserialize_with = "nullable_series")]
    pub sunset: Option<Vec<String>>,
    #[serde(default, deserialize_with = "nullable_series")]
    pub precipitation_sum: Option<Vec<f64>>,
    #[serde(default, deserialize_with = "nullable_series")]
    pub precipitation_probability_mean: Option<Vec<f64>>,
    #[serde(default, deserialize_with = "nullable_series")]
    pub wind_speed_10m_max: Option<Vec<f64>>,
}

impl RawDaily {
    pub fn field_len(&self, field: &str) -> Option<usize> {
        match field {
            "time" => series_len(&self.time),
            "temperature_2m_max" => series_len(&self.temperature_2m_max),
            "temperature_2m_min" => series_len(&self.temperature_2m_min),
            "weather_code" => series_len(&self.weather_code),
            "sunrise" => series_len(&self.sunrise),
            "sunset" => series_len(&self.sunset),
            "precipitation_sum" => series_len(&self.precipitation_sum),
            "precipitation_probability_mean" => series_len(&self.precipitation_probability_mean),
            "wind_speed_10m_max" => series_len(&self.wind_speed_10m_max),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDailyUnits {
    pub temperature_2m_max: Option<String>,
    pub precipitation_sum: Option<String>,
    pub wind_speed_10m_max: Option<String>,
}

impl From<&RawDailyUnits> for Units {
    fn from(units: &RawDailyUnits) -> Self {
        Units {
            temperature: units.temperature_2m_max.clone().unwrap_or_default(),
            wind_speed: units.wind_speed_10m_max.clone().unwrap_or_default(),
            precipitation: units.precipitation_sum.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AirQualityResponse {
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    #[serde(default, rename = "generationtime_ms")]
    pub generation_time_ms: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub timezone: String,
    pub hourly: Option<RawAirQualityHourly>,
    pub hourly_units: Option<RawAirQualityUnits>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawAirQualityHourly {
    #[serde(default, deserialize_with = "nullable_series")]
    pub time: Option<Vec<String>>,
    #[serde(default, deserialize_with = "nullable_series")]
    pub pm10: Option<Vec<f64>>,
    #[serde(default, deserialize_with = "nullable_series")]
    pub pm2_5: Option<Vec<f64>>,
    #[serde(default, deserialize_with = "nullable_series")]
    pub carbon_monoxide: Option<Vec<f64>>,
    #[serde(default, deserialize_with = "nullable_series")]
    pub nitrogen_dioxide: Option<Vec<f64>>,
    #[serde(default, deserialize_with = "nullable_series")]
    pub ozone: Option<Vec<f64>>,
    #[serde(default, deserialize_with = "nullable_series")]
    pub uv_index: Option<Vec<f64>>,
}

impl RawAirQualityHourly {
    pub fn field_len(&self, field: &str) -> Option<usize> {
        match field {
            "time" => series_len(&self.time),
            "pm10" => series_len(&self.pm10),
            "pm2_5" => series_len(&self.pm2_5),
            "carbon_monoxide" => series_len(&self.carbon_monoxide),
            "nitrogen_dioxide" => series_len(&self.nitrogen_dioxide),
            "ozone" => series_len(&self.ozone),
            "uv_index" => series_len(&self.uv_index),
            _ => None,
        }
    }
}

/// Particulates and gases share one unit each, so one field of each stands in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawAirQualityUnits {
    pub pm10: Option<String>,
    pub ozone: Option<String>,
}

impl From<&RawAirQualityUnits> for AirQualityUnits {
    fn from(units: &RawAirQualityUnits) -> Self {
        AirQualityUnits {
            particulate: units.pm10.clone().unwrap_or_default(),
            gas: units.ozone.clone().unwrap_or_default(),
        }
    }
}

/// Body of the geocoding `search` endpoint. `results` is absent when nothing matched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<RawLocation>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawLocation {
    pub id: i64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub elevation: Option<f64>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub population: Option<u64>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

/// Error body Open-Meteo sends with non-OK statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub reason: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// An absent or `null` series stays `None`; `null` entries inside it become
/// the element default, keeping the series aligned with `time`.
fn nullable_series<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    let series = Option::<Vec<Option<T>>>::deserialize(deserializer)?;
    Ok(series.map(|values| values.into_iter().map(Option::unwrap_or_default).collect()))
}
