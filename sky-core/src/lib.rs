//! Core library for the `sky` CLI.
//!
//! This crate defines:
//! - Normalization of Open-Meteo responses into flat, typed records
//! - An Open-Meteo HTTP client behind small capability traits
//! - A service that ties the two together with unit preferences and day-count policy
//! - Configuration handling
//!
//! The normalization functions in [`normalize`] are pure and can be used on
//! any response, however it was obtained.

pub mod config;
pub mod error;
pub mod model;
pub mod normalize;
pub mod provider;
pub mod raw;
pub mod series;
pub mod service;
pub mod time;
pub mod weather_code;

pub use config::Config;
pub use error::{ClientError, TimeParseError, WeatherError};
pub use model::{
    AirQuality, AirQualityUnits, Coordinates, CurrentWeather, DailyForecast, HourlyForecast,
    Location, UnitPreferences, Units,
};
pub use provider::{
    AirQualitySource, ForecastRequest, ForecastSource, LocationSearch, RangeWindow,
    RequestedFields, openmeteo::OpenMeteoClient,
};
pub use series::Granularity;
pub use service::WeatherService;
