use crate::{
    error::WeatherError,
    model::{Coordinates, CurrentWeather, DailyForecast, HourlyForecast, UnitPreferences},
    normalize::{self, CURRENT_FIELDS, DAILY_FIELDS, HOURLY_FIELDS},
    provider::{ForecastRequest, ForecastSource, RangeWindow, RequestedFields},
};

/// Longest daily forecast Open-Meteo serves.
pub const MAX_FORECAST_DAYS: i64 = 16;

/// Maps a requested day count onto what is sent upstream: anything outside
/// `1..=16` becomes a single day.
pub fn clamp_forecast_days(requested: i64) -> u32 {
    match u32::try_from(requested) {
        Ok(days) if (1..=MAX_FORECAST_DAYS).contains(&requested) => days,
        _ => 1,
    }
}

/// Application-facing weather operations over an injected [`ForecastSource`].
#[derive(Debug)]
pub struct WeatherService {
    source: Box<dyn ForecastSource>,
    units: UnitPreferences,
    strict_day_count: bool,
}

impl WeatherService {
    pub fn new(source: Box<dyn ForecastSource>, units: UnitPreferences) -> Self {
        Self {
            source,
            units,
            strict_day_count: false,
        }
    }

    /// Reject day counts outside `1..=16` instead of falling back to one day.
    pub fn with_strict_day_count(mut self, strict: bool) -> Self {
        self.strict_day_count = strict;
        self
    }

    pub fn units(&self) -> &UnitPreferences {
        &self.units
    }

    pub async fn current(&self, coordinates: Coordinates) -> Result<CurrentWeather, WeatherError> {
        let request = self.request(
            coordinates,
            RequestedFields::current(CURRENT_FIELDS),
            RangeWindow {
                past_days: Some(0),
                forecast_days: Some(0),
                ..Default::default()
            },
        );

        let raw = self.source.fetch_forecast(&request).await?;
        normalize::current(&raw)
    }

    /// Hourly forecast starting at the current hour. `hours == 0` keeps the
    /// upstream default range.
    pub async fn hourly(
        &self,
        coordinates: Coordinates,
        hours: u32,
    ) -> Result<Vec<HourlyForecast>, WeatherError> {
        let request = self.request(
            coordinates,
            RequestedFields::hourly(HOURLY_FIELDS),
            RangeWindow {
                forecast_hours: (hours > 0).then_some(hours),
                ..Default::default()
            },
        );

        let raw = self.source.fetch_forecast(&request).await?;
        normalize::hourly(&raw)
    }

    pub async fn daily(
        &self,
        coordinates: Coordinates,
        days: i64,
    ) -> Result<Vec<DailyForecast>, WeatherError> {
        let days = self.forecast_days(days)?;
        let request = self.request(
            coordinates,
            RequestedFields::daily(DAILY_FIELDS),
            RangeWindow {
                past_days: Some(0),
                forecast_days: Some(days),
                ..Default::default()
            },
        );

        let raw = self.source.fetch_forecast(&request).await?;
        normalize::daily(&raw)
    }

    fn forecast_days(&self, requested: i64) -> Result<u32, WeatherError> {
        if self.strict_day_count && !(1..=MAX_FORECAST_DAYS).contains(&requested) {
            return Err(WeatherError::InvalidDayCount(requested));
        }
        Ok(clamp_forecast_days(requested))
    }

    fn request(
        &self,
        coordinates: Coordinates,
        fields: RequestedFields,
        range: RangeWindow,
    ) -> ForecastRequest {
        ForecastRequest {
            coordinates,
            fields,
            units: self.units.clone(),
            range,
        }
    }
}
