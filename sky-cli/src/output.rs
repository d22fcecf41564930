//! Human-readable rendering of records.

use chrono::{DateTime, FixedOffset};
use sky_core::{AirQuality, CurrentWeather, DailyForecast, HourlyForecast, Location};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn location(location: &Location) -> String {
    let mut line = format!(
        "{} ({:.2}, {:.2})",
        location.display_name(),
        location.coordinates.latitude,
        location.coordinates.longitude
    );
    if let Some(tz) = &location.timezone {
        line.push_str(&format!(" [{tz}]"));
    }
    line
}

pub fn current(weather: &CurrentWeather) -> String {
    let units = &weather.units;
    [
        format!("Observed:      {}", stamp(&weather.observation_time)),
        format!("Conditions:    {}", weather.weather_description),
        format!(
            "Temperature:   {:.1} {} (feels like {:.1} {})",
            weather.temperature, units.temperature, weather.apparent_temperature, units.temperature
        ),
        format!("Humidity:      {:.0}%", weather.humidity),
        format!(
            "Precipitation: {:.1} {}",
            weather.precipitation, units.precipitation
        ),
        format!("Wind:          {:.1} {}", weather.wind_speed, units.wind_speed),
        format!("Daylight:      {}", if weather.is_day { "yes" } else { "no" }),
    ]
    .join("\n")
}

pub fn hourly(hours: &[HourlyForecast]) -> String {
    let Some(first) = hours.first() else {
        return String::new();
    };
    let units = &first.units;

    let mut lines = vec![format!(
        "{:<22} {:>8} {:>5} {:>6} {:>8} {:>8}  {}",
        "Time",
        units.temperature,
        "Hum",
        "Rain%",
        units.precipitation,
        units.wind_speed,
        "Conditions"
    )];
    lines.extend(hours.iter().map(|h| {
        format!(
            "{:<22} {:>8.1} {:>4.0}% {:>5.0}% {:>8.1} {:>8.1}  {}",
            stamp(&h.time),
            h.temperature,
            h.humidity,
            h.precipitation_probability,
            h.precipitation,
            h.wind_speed,
            h.weather_description
        )
    }));
    lines.join("\n")
}

pub fn daily(days: &[DailyForecast]) -> String {
    let Some(first) = days.first() else {
        return String::new();
    };
    let units = &first.units;

    let mut lines = vec![format!(
        "{:<10} {:>8} {:>8} {:>8} {:>6} {:>8}  {:<5} {:<5}  {}",
        "Date",
        format!("max {}", units.temperature),
        format!("min {}", units.temperature),
        units.precipitation,
        "Rain%",
        units.wind_speed,
        "Rise",
        "Set",
        "Conditions"
    )];
    lines.extend(days.iter().map(|d| {
        format!(
            "{:<10} {:>8.1} {:>8.1} {:>8.1} {:>5.0}% {:>8.1}  {:<5} {:<5}  {}",
            d.date.format("%Y-%m-%d"),
            d.max_temperature,
            d.min_temperature,
            d.precipitation_sum,
            d.precipitation_probability,
            d.max_wind_speed,
            d.sunrise.format("%H:%M"),
            d.sunset.format("%H:%M"),
            d.weather_description
        )
    }));
    lines.join("\n")
}

pub fn air_quality(readings: &[AirQuality]) -> String {
    let Some(first) = readings.first() else {
        return String::new();
    };
    let units = &first.units;

    let mut lines = vec![format!(
        "{:<22} {:>7} {:>7} {:>8} {:>7} {:>7} {:>4}   (particulates/gases in {}/{})",
        "Time", "PM10", "PM2.5", "CO", "NO2", "O3", "UV", units.particulate, units.gas
    )];
    lines.extend(readings.iter().map(|r| {
        format!(
            "{:<22} {:>7.1} {:>7.1} {:>8.1} {:>7.1} {:>7.1} {:>4.1}",
            stamp(&r.time),
            r.pm10,
            r.pm2_5,
            r.carbon_monoxide,
            r.nitrogen_dioxide,
            r.ozone,
            r.uv_index
        )
    }));
    lines.join("\n")
}

fn stamp(time: &DateTime<FixedOffset>) -> String {
    format!("{} {}", time.format(TIME_FORMAT), time.offset())
}
