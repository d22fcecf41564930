//! Open-Meteo HTTP client.
//!
//! Talks to the forecast, geocoding and air-quality APIs. Responses are
//! returned raw; turning them into records is the job of [`crate::normalize`].

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::{
    config::Config,
    error::ClientError,
    model::{Coordinates, Location},
    raw::{AirQualityResponse, ApiErrorBody, ForecastResponse, SearchResponse},
};

use super::{AirQualitySource, ForecastRequest, ForecastSource, LocationSearch};

/// Air-quality series requested when the caller names none.
pub const DEFAULT_AIR_QUALITY_FIELDS: &[&str] = &["pm10", "pm2_5"];

type Query = Vec<(&'static str, String)>;

#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    http: Client,
    forecast_base_url: String,
    geocoding_base_url: String,
    air_quality_base_url: String,
}

impl OpenMeteoClient {
    /// Build a client using the timeout and base URLs from `config`.
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClientError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            http,
            forecast_base_url: trim_base(&config.forecast_base_url),
            geocoding_base_url: trim_base(&config.geocoding_base_url),
            air_quality_base_url: trim_base(&config.air_quality_base_url),
        })
    }

    fn validate_coordinates(coordinates: Coordinates) -> Result<(), ClientError> {
        if coordinates.is_valid() {
            Ok(())
        } else {
            Err(ClientError::InvalidCoordinates)
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &Query,
        what: &'static str,
    ) -> Result<T, ClientError> {
        debug!(url = %url, ?query, "Sending Open-Meteo request");

        let res = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| ClientError::RequestFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| ClientError::RequestFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        debug!(%status, bytes = body.len(), "Received Open-Meteo response");

        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| ClientError::Parse {
            what,
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl ForecastSource for OpenMeteoClient {
    #[instrument(
        skip(self, request),
        fields(lat = %request.coordinates.latitude, lon = %request.coordinates.longitude)
    )]
    async fn fetch_forecast(
        &self,
        request: &ForecastRequest,
    ) -> Result<ForecastResponse, ClientError> {
        Self::validate_coordinates(request.coordinates)?;

        let url = format!("{}/forecast", self.forecast_base_url);
        self.get_json(&url, &forecast_query(request), "forecast")
            .await
    }
}

#[async_trait]
impl LocationSearch for OpenMeteoClient {
    #[instrument(skip(self))]
    async fn search(&self, name: &str) -> Result<Location, ClientError> {
        let url = format!("{}/search", self.geocoding_base_url);
        let query: Query = vec![("name", name.to_string()), ("count", "1".to_string())];

        let parsed: SearchResponse = self.get_json(&url, &query, "geocoding").await?;

        let found = parsed
            .results
            .into_iter()
            .next()
            .ok_or_else(|| ClientError::LocationNotFound(name.to_string()))?;

        Ok(Location {
            id: found.id,
            name: found.name,
            coordinates: Coordinates::new(found.latitude, found.longitude),
            elevation: found.elevation,
            timezone: found.timezone,
            population: found.population,
            country_code: found.country_code,
            country: found.country,
        })
    }
}

#[async_trait]
impl AirQualitySource for OpenMeteoClient {
    #[instrument(skip(self, series), fields(lat = %coordinates.latitude, lon = %coordinates.longitude))]
    async fn fetch_air_quality(
        &self,
        coordinates: Coordinates,
        series: &[String],
    ) -> Result<AirQualityResponse, ClientError> {
        Self::validate_coordinates(coordinates)?;

        let url = format!("{}/air-quality", self.air_quality_base_url);
        self.get_json(&url, &air_quality_query(coordinates, series), "air quality")
            .await
    }
}

/// Query parameters for `/forecast`. Empty lists, empty unit names and unset
/// ranges are left out so the upstream defaults apply.
pub(crate) fn forecast_query(request: &ForecastRequest) -> Query {
    let mut query = coordinate_query(request.coordinates);

    let lists = [
        ("current", &request.fields.current),
        ("hourly", &request.fields.hourly),
        ("daily", &request.fields.daily),
    ];
    for (key, fields) in lists {
        if !fields.is_empty() {
            query.push((key, fields.join(",")));
        }
    }

    let units = [
        ("temperature_unit", &request.units.temperature),
        ("wind_speed_unit", &request.units.wind_speed),
        ("precipitation_unit", &request.units.precipitation),
    ];
    for (key, unit) in units {
        if !unit.is_empty() {
            query.push((key, unit.clone()));
        }
    }

    let range = request.range;
    let windows = [
        ("past_days", range.past_days),
        ("forecast_days", range.forecast_days),
        ("past_hours", range.past_hours),
        ("forecast_hours", range.forecast_hours),
    ];
    for (key, value) in windows {
        if let Some(value) = value {
            query.push((key, value.to_string()));
        }
    }

    query
}

pub(crate) fn air_quality_query(coordinates: Coordinates, fields: &[String]) -> Query {
    let mut query = coordinate_query(coordinates);
    let hourly = if fields.is_empty() {
        DEFAULT_AIR_QUALITY_FIELDS.join(",")
    } else {
        fields.join(",")
    };
    query.push(("hourly", hourly));
    query
}

fn coordinate_query(coordinates: Coordinates) -> Query {
    vec![
        ("latitude", coordinates.latitude.to_string()),
        ("longitude", coordinates.longitude.to_string()),
        ("timezone", "auto".to_string()),
    ]
}

/// Prefer the upstream's own `reason`; fall back to the (truncated) body.
fn status_error(status: StatusCode, body: &str) -> ClientError {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) if !parsed.reason.is_empty() => ClientError::Api {
            status,
            reason: parsed.reason,
        },
        _ => ClientError::Status {
            status,
            body: truncate_body(body),
        },
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        let head: String = body.chars().take(MAX).collect();
        format!("{head}...")
    } else {
        body.to_string()
    }
}

fn trim_base(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
