//! Turns raw Open-Meteo responses into simplified records.
//!
//! Each view checks the shape of its section with [`series::common_length`]
//! before indexing, resolves every time string against the response's zone and
//! copies numeric values through untouched. Any failure aborts the whole view.

use chrono_tz::Tz;

use crate::{
    error::WeatherError,
    model::{AirQuality, AirQualityUnits, CurrentWeather, DailyForecast, HourlyForecast, Units},
    raw::{AirQualityResponse, ForecastResponse, RawCurrent},
    series::{self, Granularity, required},
    time,
    weather_code,
};

pub const CURRENT_FIELDS: &[&str] = &[
    "temperature_2m",
    "relative_humidity_2m",
    "weather_code",
    "is_day",
    "apparent_temperature",
    "precipitation",
    "wind_speed_10m",
];

pub const HOURLY_FIELDS: &[&str] = &[
    "temperature_2m",
    "relative_humidity_2m",
    "apparent_temperature",
    "precipitation_probability",
    "precipitation",
    "weather_code",
    "wind_speed_10m",
];

pub const DAILY_FIELDS: &[&str] = &[
    "temperature_2m_max",
    "temperature_2m_min",
    "weather_code",
    "sunrise",
    "sunset",
    "precipitation_sum",
    "precipitation_probability_mean",
    "wind_speed_10m_max",
];

pub const AIR_QUALITY_FIELDS: &[&str] = &[
    "pm10",
    "pm2_5",
    "carbon_monoxide",
    "nitrogen_dioxide",
    "ozone",
    "uv_index",
];

pub fn current(raw: &ForecastResponse) -> Result<CurrentWeather, WeatherError> {
    let current = raw
        .current
        .as_ref()
        .ok_or_else(|| WeatherError::IncompleteData {
            granularity: Granularity::Current,
            missing: vec!["current".to_string()],
        })?;
    check_current(current)?;

    let zone = time::resolve_zone(&raw.timezone);
    let observed = current.time.as_deref().unwrap_or_default();
    let observation_time = resolve(observed, zone, "observation")?;

    let value = |v: Option<f64>| v.unwrap_or_default();
    let code = current.weather_code.unwrap_or_default();

    let units = raw
        .current_units
        .as_ref()
        .map(Units::from)
        .unwrap_or_default();

    Ok(CurrentWeather {
        observation_time,
        temperature: value(current.temperature_2m),
        humidity: value(current.relative_humidity_2m),
        apparent_temperature: value(current.apparent_temperature),
        precipitation: value(current.precipitation),
        wind_speed: value(current.wind_speed_10m),
        weather_code: code,
        weather_description: weather_code::describe(code).into_owned(),
        is_day: current.is_day == Some(1),
        units,
    })
}

/// The current block is a flat object, so only presence is checked.
fn check_current(current: &RawCurrent) -> Result<(), WeatherError> {
    let missing: Vec<String> = std::iter::once("time")
        .chain(CURRENT_FIELDS.iter().copied())
        .filter(|field| !current.has(field))
        .map(str::to_string)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(WeatherError::IncompleteData {
            granularity: Granularity::Current,
            missing,
        })
    }
}

pub fn hourly(raw: &ForecastResponse) -> Result<Vec<HourlyForecast>, WeatherError> {
    const G: Granularity = Granularity::Hourly;

    let hourly = raw.hourly.as_ref().ok_or_else(|| WeatherError::IncompleteData {
        granularity: G,
        missing: vec!["hourly".to_string()],
    })?;
    let len = series::common_length(G, hourly.field_len("time"), HOURLY_FIELDS, |f| {
        hourly.field_len(f)
    })?;

    let times = required(G, "time", &hourly.time)?;
    let temperature = required(G, "temperature_2m", &hourly.temperature_2m)?;
    let humidity = required(G, "relative_humidity_2m", &hourly.relative_humidity_2m)?;
    let apparent = required(G, "apparent_temperature", &hourly.apparent_temperature)?;
    let probability = required(
        G,
        "precipitation_probability",
        &hourly.precipitation_probability,
    )?;
    let precipitation = required(G, "precipitation", &hourly.precipitation)?;
    let codes = required(G, "weather_code", &hourly.weather_code)?;
    let wind = required(G, "wind_speed_10m", &hourly.wind_speed_10m)?;

    let zone = time::resolve_zone(&raw.timezone);
    let units = raw
        .hourly_units
        .as_ref()
        .map(Units::from)
        .unwrap_or_default();

    let mut forecasts = Vec::with_capacity(len);
    for (i, time) in times.iter().enumerate() {
        forecasts.push(HourlyForecast {
            time: resolve(time, zone, "hourly")?,
            temperature: temperature[i],
            humidity: humidity[i],
            apparent_temperature: apparent[i],
            precipitation_probability: probability[i],
            precipitation: precipitation[i],
            wind_speed: wind[i],
            weather_code: codes[i],
            weather_description: weather_code::describe(codes[i]).into_owned(),
            units: units.clone(),
        });
    }

    Ok(forecasts)
}

pub fn daily(raw: &ForecastResponse) -> Result<Vec<DailyForecast>, WeatherError> {
    const G: Granularity = Granularity::Daily;

    let daily = raw.daily.as_ref().ok_or_else(|| WeatherError::IncompleteData {
        granularity: G,
        missing: vec!["daily".to_string()],
    })?;
    let len =
        series::common_length(G, daily.field_len("time"), DAILY_FIELDS, |f| daily.field_len(f))?;

    let dates = required(G, "time", &daily.time)?;
    let max_temperature = required(G, "temperature_2m_max", &daily.temperature_2m_max)?;
    let min_temperature = required(G, "temperature_2m_min", &daily.temperature_2m_min)?;
    let codes = required(G, "weather_code", &daily.weather_code)?;
    let sunrises = required(G, "sunrise", &daily.sunrise)?;
    let sunsets = required(G, "sunset", &daily.sunset)?;
    let precipitation_sum = required(G, "precipitation_sum", &daily.precipitation_sum)?;
    let probability = required(
        G,
        "precipitation_probability_mean",
        &daily.precipitation_probability_mean,
    )?;
    let wind = required(G, "wind_speed_10m_max", &daily.wind_speed_10m_max)?;

    let zone = time::resolve_zone(&raw.timezone);
    let units = raw
        .daily_units
        .as_ref()
        .map(Units::from)
        .unwrap_or_default();

    let mut forecasts = Vec::with_capacity(len);
    for (i, date) in dates.iter().enumerate() {
        let date = resolve(date, zone, "forecast date")?;
        let sunrise = resolve(&sunrises[i], zone, "sunrise")?;
        let sunset = resolve(&sunsets[i], zone, "sunset")?;

        forecasts.push(DailyForecast {
            date,
            max_temperature: max_temperature[i],
            min_temperature: min_temperature[i],
            weather_code: codes[i],
            weather_description: weather_code::describe(codes[i]).into_owned(),
            sunrise,
            sunset,
            precipitation_sum: precipitation_sum[i],
            precipitation_probability: probability[i],
            max_wind_speed: wind[i],
            units: units.clone(),
        });
    }

    Ok(forecasts)
}

pub fn air_quality(raw: &AirQualityResponse) -> Result<Vec<AirQuality>, WeatherError> {
    const G: Granularity = Granularity::Hourly;

    let hourly = raw.hourly.as_ref().ok_or_else(|| WeatherError::IncompleteData {
        granularity: G,
        missing: vec!["hourly".to_string()],
    })?;
    let len = series::common_length(G, hourly.field_len("time"), AIR_QUALITY_FIELDS, |f| {
        hourly.field_len(f)
    })?;

    let times = required(G, "time", &hourly.time)?;
    let pm10 = required(G, "pm10", &hourly.pm10)?;
    let pm2_5 = required(G, "pm2_5", &hourly.pm2_5)?;
    let carbon_monoxide = required(G, "carbon_monoxide", &hourly.carbon_monoxide)?;
    let nitrogen_dioxide = required(G, "nitrogen_dioxide", &hourly.nitrogen_dioxide)?;
    let ozone = required(G, "ozone", &hourly.ozone)?;
    let uv_index = required(G, "uv_index", &hourly.uv_index)?;

    let zone = time::resolve_zone(&raw.timezone);
    let units = raw
        .hourly_units
        .as_ref()
        .map(AirQualityUnits::from)
        .unwrap_or_default();

    let mut readings = Vec::with_capacity(len);
    for (i, time) in times.iter().enumerate() {
        readings.push(AirQuality {
            time: resolve(time, zone, "air quality")?,
            pm10: pm10[i],
            pm2_5: pm2_5[i],
            carbon_monoxide: carbon_monoxide[i],
            nitrogen_dioxide: nitrogen_dioxide[i],
            ozone: ozone[i],
            uv_index: uv_index[i],
            units: units.clone(),
        });
    }

    Ok(readings)
}

fn resolve(
    value: &str,
    zone: Tz,
    field: &str,
) -> Result<chrono::DateTime<chrono::FixedOffset>, WeatherError> {
    time::resolve_in(value, zone).map_err(|e| WeatherError::time_parse(field, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::{RawAirQualityHourly, RawCurrentUnits, RawDaily, RawDailyUnits, RawHourly};
    use chrono::{TimeZone, Timelike, Utc};

    fn sample_current() -> RawCurrent {
        RawCurrent {
            time: Some("2023-01-01T12:00:00Z".into()),
            temperature_2m: Some(10.0),
            relative_humidity_2m: Some(80.0),
            apparent_temperature: Some(8.0),
            precipitation: Some(0.5),
            wind_speed_10m: Some(5.0),
            weather_code: Some(3),
            is_day: Some(1),
        }
    }

    fn first(values: &[f64], days: usize) -> Option<Vec<f64>> {
        Some(values[..days].to_vec())
    }

    fn sample_daily(days: usize) -> RawDaily {
        let dates = ["2023-01-01", "2023-01-02", "2023-01-03"];
        RawDaily {
            time: Some(dates[..days].iter().map(|d| d.to_string()).collect()),
            temperature_2m_max: first(&[12.0, 13.0, 14.0], days),
            temperature_2m_min: first(&[2.0, 3.0, 4.0], days),
            weather_code: Some([3, 1, 61][..days].to_vec()),
            sunrise: Some(
                ["2023-01-01T07:00:00Z", "2023-01-02T07:01:00Z", "2023-01-03T07:02"][..days]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            ),
            sunset: Some(
                ["2023-01-01T17:00:00Z", "2023-01-02T17:01:00Z", "2023-01-03T17:02"][..days]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            ),
            precipitation_sum: first(&[0.1, 0.2, 0.3], days),
            precipitation_probability_mean: first(&[10.0, 20.0, 30.0], days),
            wind_speed_10m_max: first(&[15.0, 16.0, 17.0], days),
        }
    }

    fn sample_hourly() -> RawHourly {
        RawHourly {
            time: Some(vec!["2023-07-01T00:00".into(), "2023-07-01T01:00".into()]),
            temperature_2m: Some(vec![18.5, 17.9]),
            relative_humidity_2m: Some(vec![70.0, 72.0]),
            apparent_temperature: Some(vec![18.0, 17.1]),
            precipitation_probability: Some(vec![5.0, 0.0]),
            precipitation: Some(vec![0.0, 0.0]),
            weather_code: Some(vec![0, 45]),
            wind_speed_10m: Some(vec![7.2, 6.8]),
        }
    }

    #[test]
    fn current_copies_values_and_describes_code() {
        let raw = ForecastResponse {
            timezone: "UTC".into(),
            current: Some(sample_current()),
            current_units: Some(RawCurrentUnits {
                temperature_2m: Some("°C".into()),
                wind_speed_10m: Some("km/h".into()),
                precipitation: Some("mm".into()),
            }),
            ..Default::default()
        };

        let weather = current(&raw).expect("complete current block");
        assert_eq!(
            weather.observation_time,
            Utc.with_ymd_and_hms(2023, 1, 1, 12, 0, 0).unwrap()
        );
        assert_eq!(
            weather.weather_description,
            "Mainly clear, partly cloudy, and overcast"
        );
        assert_eq!(weather.temperature, 10.0);
        assert_eq!(weather.humidity, 80.0);
        assert_eq!(weather.apparent_temperature, 8.0);
        assert_eq!(weather.precipitation, 0.5);
        assert_eq!(weather.wind_speed, 5.0);
        assert!(weather.is_day);
        assert_eq!(weather.units.temperature, "°C");
        assert_eq!(weather.units.wind_speed, "km/h");
        assert_eq!(weather.units.precipitation, "mm");
    }

    #[test]
    fn current_local_time_without_zone_is_utc() {
        let mut block = sample_current();
        block.time = Some("2023-01-01T00:00".into());
        let raw = ForecastResponse {
            current: Some(block),
            ..Default::default()
        };

        let weather = current(&raw).expect("valid");
        assert_eq!(
            weather.observation_time,
            Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(weather.units, Units::default());
    }

    #[test]
    fn current_missing_block() {
        let raw = ForecastResponse::default();
        let err = current(&raw).unwrap_err();
        assert!(matches!(
            err,
            WeatherError::IncompleteData {
                granularity: Granularity::Current,
                ..
            }
        ));
    }

    #[test]
    fn current_missing_values_are_listed() {
        let raw = ForecastResponse {
            current: Some(RawCurrent {
                time: Some("2023-01-01T00:00".into()),
                temperature_2m: Some(1.0),
                ..Default::default()
            }),
            ..Default::default()
        };

        match current(&raw).unwrap_err() {
            WeatherError::IncompleteData { missing, .. } => {
                assert!(missing.contains(&"weather_code".to_string()));
                assert!(!missing.contains(&"temperature_2m".to_string()));
                assert!(!missing.contains(&"time".to_string()));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn current_bad_time_is_fatal() {
        let mut block = sample_current();
        block.time = Some("invalid-time".into());
        let raw = ForecastResponse {
            current: Some(block),
            ..Default::default()
        };

        match current(&raw).unwrap_err() {
            WeatherError::TimeParse { source, .. } => assert_eq!(source.value, "invalid-time"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn daily_two_days_share_units() {
        let raw = ForecastResponse {
            timezone: "UTC".into(),
            daily: Some(sample_daily(2)),
            daily_units: Some(RawDailyUnits {
                temperature_2m_max: Some("°C".into()),
                precipitation_sum: Some("mm".into()),
                wind_speed_10m_max: Some("km/h".into()),
            }),
            ..Default::default()
        };

        let days = daily(&raw).expect("consistent daily block");
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].max_temperature, 12.0);
        assert_eq!(days[1].max_temperature, 13.0);
        assert_eq!(days[0].date, Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(days[1].date, Utc.with_ymd_and_hms(2023, 1, 2, 0, 0, 0).unwrap());
        assert_eq!(days[1].sunrise, Utc.with_ymd_and_hms(2023, 1, 2, 7, 1, 0).unwrap());
        assert_eq!(days[0].weather_description, "Mainly clear, partly cloudy, and overcast");
        assert_eq!(days[0].units, days[1].units);
        assert_eq!(days[0].units.temperature, "°C");
    }

    #[test]
    fn daily_null_probability_becomes_zero() {
        let body = r#"{
            "timezone": null,
            "daily": {
                "time": ["2023-01-01", "2023-01-02"],
                "temperature_2m_max": [12.0, 13.0],
                "temperature_2m_min": [2.0, 3.0],
                "weather_code": [3, 61],
                "sunrise": ["2023-01-01T07:00", "2023-01-02T07:01"],
                "sunset": ["2023-01-01T17:00", "2023-01-02T17:01"],
                "precipitation_sum": [0.0, 1.5],
                "precipitation_probability_mean": [10, null],
                "wind_speed_10m_max": [15.0, null]
            }
        }"#;
        let raw: ForecastResponse = serde_json::from_str(body).expect("nulls are tolerated");

        let days = daily(&raw).expect("null entries keep the series aligned");
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].precipitation_probability, 10.0);
        assert_eq!(days[1].precipitation_probability, 0.0);
        assert_eq!(days[1].max_wind_speed, 0.0);
        assert_eq!(days[1].date, Utc.with_ymd_and_hms(2023, 1, 2, 0, 0, 0).unwrap());
    }

    #[test]
    fn daily_local_times_follow_zone() {
        let raw = ForecastResponse {
            timezone: "America/New_York".into(),
            daily: Some(sample_daily(3)),
            ..Default::default()
        };

        let days = daily(&raw).expect("valid");
        let third = &days[2];
        assert_eq!(third.date.offset().local_minus_utc(), -5 * 3600);
        assert_eq!(third.sunrise.hour(), 7);
        assert_eq!(third.sunrise, Utc.with_ymd_and_hms(2023, 1, 3, 12, 2, 0).unwrap());
        assert_eq!(third.weather_description, "Rain: Slight, moderate and heavy intensity");
    }

    #[test]
    fn daily_absent_field_is_incomplete() {
        let mut block = sample_daily(1);
        block.temperature_2m_max = None;
        let raw = ForecastResponse {
            daily: Some(block),
            ..Default::default()
        };

        match daily(&raw).unwrap_err() {
            WeatherError::IncompleteData {
                granularity,
                missing,
            } => {
                assert_eq!(granularity, Granularity::Daily);
                assert_eq!(missing, vec!["temperature_2m_max".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn daily_length_mismatch_is_inconsistent() {
        let mut block = sample_daily(1);
        block.temperature_2m_max = Some(vec![12.0, 13.0]);
        let raw = ForecastResponse {
            daily: Some(block),
            ..Default::default()
        };

        assert!(matches!(
            daily(&raw).unwrap_err(),
            WeatherError::InconsistentLength { .. }
        ));
    }

    #[test]
    fn daily_empty_is_no_data() {
        let raw = ForecastResponse {
            daily: Some(sample_daily(0)),
            ..Default::default()
        };

        assert!(matches!(
            daily(&raw).unwrap_err(),
            WeatherError::NoData {
                granularity: Granularity::Daily
            }
        ));
    }

    #[test]
    fn daily_bad_sunset_names_field() {
        let mut block = sample_daily(1);
        block.sunset = Some(vec!["dusk".into()]);
        let raw = ForecastResponse {
            daily: Some(block),
            ..Default::default()
        };

        match daily(&raw).unwrap_err() {
            WeatherError::TimeParse { field, source } => {
                assert_eq!(field, "sunset");
                assert_eq!(source.value, "dusk");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn hourly_preserves_order() {
        let raw = ForecastResponse {
            timezone: "Europe/Berlin".into(),
            hourly: Some(sample_hourly()),
            ..Default::default()
        };

        let hours = hourly(&raw).expect("valid");
        assert_eq!(hours.len(), 2);
        assert!(hours[0].time < hours[1].time);
        assert_eq!(hours[0].time, Utc.with_ymd_and_hms(2023, 6, 30, 22, 0, 0).unwrap());
        assert_eq!(hours[1].temperature, 17.9);
        assert_eq!(hours[1].weather_description, "Fog and depositing rime fog");
    }

    #[test]
    fn hourly_missing_section() {
        let raw = ForecastResponse::default();
        assert!(matches!(
            hourly(&raw).unwrap_err(),
            WeatherError::IncompleteData {
                granularity: Granularity::Hourly,
                ..
            }
        ));
    }

    #[test]
    fn hourly_unknown_code_passes_through() {
        let mut block = sample_hourly();
        block.weather_code = Some(vec![0, 42]);
        let raw = ForecastResponse {
            hourly: Some(block),
            ..Default::default()
        };

        let hours = hourly(&raw).expect("unknown codes are not errors");
        assert_eq!(hours[1].weather_code, 42);
        assert_eq!(hours[1].weather_description, "Unknown weather code: 42");
    }

    #[test]
    fn air_quality_entries() {
        let raw = AirQualityResponse {
            timezone: "UTC".into(),
            hourly: Some(RawAirQualityHourly {
                time: Some(vec!["2023-01-01T00:00".into()]),
                pm10: Some(vec![12.4]),
                pm2_5: Some(vec![8.1]),
                carbon_monoxide: Some(vec![180.0]),
                nitrogen_dioxide: Some(vec![14.2]),
                ozone: Some(vec![52.0]),
                uv_index: Some(vec![0.0]),
            }),
            ..Default::default()
        };

        let readings = air_quality(&raw).expect("valid");
        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].pm2_5, 8.1);
        assert_eq!(readings[0].units, AirQualityUnits::default());
    }

    #[test]
    fn air_quality_short_series() {
        let raw = AirQualityResponse {
            hourly: Some(RawAirQualityHourly {
                time: Some(vec!["2023-01-01T00:00".into(), "2023-01-01T01:00".into()]),
                pm10: Some(vec![12.4, 11.0]),
                pm2_5: Some(vec![8.1]),
                carbon_monoxide: Some(vec![180.0, 181.0]),
                nitrogen_dioxide: Some(vec![14.2, 14.0]),
                ozone: Some(vec![52.0, 50.0]),
                uv_index: Some(vec![0.0, 0.0]),
            }),
            ..Default::default()
        };

        match air_quality(&raw).unwrap_err() {
            WeatherError::InconsistentLength { field, .. } => assert_eq!(field, "pm2_5"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
