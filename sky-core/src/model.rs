use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A point on the globe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// A geocoded place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: i64,
    pub name: String,
    pub coordinates: Coordinates,
    pub elevation: Option<f64>,
    pub timezone: Option<String>,
    pub population: Option<u64>,
    pub country_code: Option<String>,
    pub country: Option<String>,
}

impl Location {
    /// "Berlin, Germany", or just the name when the country is unknown.
    pub fn display_name(&self) -> String {
        match &self.country {
            Some(country) => format!("{}, {}", self.name, country),
            None => self.name.clone(),
        }
    }
}

/// Unit names requested from the upstream, e.g. `celsius`, `kmh`, `mm`.
///
/// Empty strings leave the choice to the upstream default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitPreferences {
    #[serde(default)]
    pub temperature: String,
    #[serde(default)]
    pub wind_speed: String,
    #[serde(default)]
    pub precipitation: String,
}

/// Unit labels the upstream reported for a record, e.g. `°C`, `km/h`, `mm`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Units {
    pub temperature: String,
    pub wind_speed: String,
    pub precipitation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub observation_time: DateTime<FixedOffset>,
    pub temperature: f64,
    pub humidity: f64,
    pub apparent_temperature: f64,
    pub precipitation: f64,
    pub wind_speed: f64,
    pub weather_code: i32,
    pub weather_description: String,
    pub is_day: bool,
    pub units: Units,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyForecast {
    pub time: DateTime<FixedOffset>,
    pub temperature: f64,
    pub humidity: f64,
    pub apparent_temperature: f64,
    /// Percent chance of precipitation in this hour.
    pub precipitation_probability: f64,
    pub precipitation: f64,
    pub wind_speed: f64,
    pub weather_code: i32,
    pub weather_description: String,
    pub units: Units,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    /// Local midnight of the forecast day.
    pub date: DateTime<FixedOffset>,
    pub max_temperature: f64,
    pub min_temperature: f64,
    pub weather_code: i32,
    pub weather_description: String,
    pub sunrise: DateTime<FixedOffset>,
    pub sunset: DateTime<FixedOffset>,
    pub precipitation_sum: f64,
    /// Mean daily precipitation probability.
    pub precipitation_probability: f64,
    /// Maximum 10 m wind speed of the day.
    pub max_wind_speed: f64,
    pub units: Units,
}

/// Unit labels for air-quality readings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirQualityUnits {
    pub particulate: String,
    pub gas: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirQuality {
    pub time: DateTime<FixedOffset>,
    pub pm10: f64,
    pub pm2_5: f64,
    pub carbon_monoxide: f64,
    pub nitrogen_dioxide: f64,
    pub ozone: f64,
    pub uv_index: f64,
    pub units: AirQualityUnits,
}
