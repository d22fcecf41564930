use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use std::fmt::Debug;

use crate::{
    error::ClientError,
    model::{Coordinates, Location, UnitPreferences},
    raw::{AirQualityResponse, ForecastResponse},
};

pub mod openmeteo;

/// Field names to request per section. Empty sections are not requested.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestedFields {
    pub current: Vec<String>,
    pub hourly: Vec<String>,
    pub daily: Vec<String>,
}

impl RequestedFields {
    pub fn current(fields: &[&str]) -> Self {
        Self {
            current: to_owned(fields),
            ..Default::default()
        }
    }

    pub fn hourly(fields: &[&str]) -> Self {
        Self {
            hourly: to_owned(fields),
            ..Default::default()
        }
    }

    pub fn daily(fields: &[&str]) -> Self {
        Self {
            daily: to_owned(fields),
            ..Default::default()
        }
    }
}

fn to_owned(fields: &[&str]) -> Vec<String> {
    fields.iter().map(|f| f.to_string()).collect()
}

/// How far back and forward the upstream should report. `None` leaves the
/// upstream default in place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RangeWindow {
    pub past_days: Option<u32>,
    pub forecast_days: Option<u32>,
    pub past_hours: Option<u32>,
    pub forecast_hours: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastRequest {
    pub coordinates: Coordinates,
    pub fields: RequestedFields,
    pub units: UnitPreferences,
    pub range: RangeWindow,
}

/// Something that can fetch a raw forecast, usually over HTTP.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ForecastSource: Send + Sync + Debug {
    async fn fetch_forecast(
        &self,
        request: &ForecastRequest,
    ) -> Result<ForecastResponse, ClientError>;
}

/// Resolves a free-form place name to its best match.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait LocationSearch: Send + Sync + Debug {
    async fn search(&self, name: &str) -> Result<Location, ClientError>;
}

/// Fetches hourly air-quality series. An empty field list requests PM10 and PM2.5.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AirQualitySource: Send + Sync + Debug {
    async fn fetch_air_quality(
        &self,
        coordinates: Coordinates,
        fields: &[String],
    ) -> Result<AirQualityResponse, ClientError>;
}
