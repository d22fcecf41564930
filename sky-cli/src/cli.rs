use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, builder::PossibleValuesParser};
use inquire::{Confirm, Select, Text};
use serde::Serialize;
use sky_core::{
    AirQualitySource, Config, Location, LocationSearch, OpenMeteoClient, UnitPreferences,
    WeatherService, normalize,
};
use tracing::info;

use crate::output;

const TEMPERATURE_UNITS: [&str; 2] = ["celsius", "fahrenheit"];
const WIND_SPEED_UNITS: [&str; 4] = ["kmh", "ms", "mph", "kn"];
const PRECIPITATION_UNITS: [&str; 2] = ["mm", "inch"];

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "sky", version, about = "Weather and forecasts from Open-Meteo")]
pub struct Cli {
    /// Verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print records as JSON instead of a table.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(flatten)]
    pub units: UnitArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// One-off overrides for the configured units.
#[derive(Debug, Default, Args)]
pub struct UnitArgs {
    #[arg(long = "units-temperature", global = true, value_parser = PossibleValuesParser::new(TEMPERATURE_UNITS))]
    pub temperature: Option<String>,

    #[arg(long = "units-wind", global = true, value_parser = PossibleValuesParser::new(WIND_SPEED_UNITS))]
    pub wind_speed: Option<String>,

    #[arg(long = "units-precipitation", global = true, value_parser = PossibleValuesParser::new(PRECIPITATION_UNITS))]
    pub precipitation: Option<String>,
}

impl UnitArgs {
    pub fn apply(&self, mut units: UnitPreferences) -> UnitPreferences {
        if let Some(t) = &self.temperature {
            units.temperature = t.clone();
        }
        if let Some(w) = &self.wind_speed {
            units.wind_speed = w.clone();
        }
        if let Some(p) = &self.precipitation {
            units.precipitation = p.clone();
        }
        units
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show current conditions.
    Current {
        /// Place name; defaults to the configured location.
        location: Option<String>,
    },

    /// Show an hourly forecast.
    Hourly {
        /// Place name; defaults to the configured location.
        location: Option<String>,

        /// Number of hours to show, starting now.
        #[arg(long, default_value_t = 24)]
        hours: u32,
    },

    /// Show a daily forecast.
    Daily {
        /// Place name; defaults to the configured location.
        location: Option<String>,

        /// Number of days (1-16). Out-of-range values fall back to one day
        /// unless `strict_day_count` is set in the config.
        #[arg(short, long, default_value_t = 7, allow_negative_numbers = true)]
        days: i64,
    },

    /// Show hourly air quality.
    Air {
        /// Place name; defaults to the configured location.
        location: Option<String>,
    },

    /// Look up a place and print its coordinates.
    Search {
        /// Place name, e.g. "Berlin".
        name: String,
    },

    /// Interactively set units and default location.
    Configure,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let Cli {
            json,
            units,
            command,
            ..
        } = self;

        let mut config = Config::load()?;
        let client = OpenMeteoClient::new(&config).context("Failed to create Open-Meteo client")?;
        let service = WeatherService::new(Box::new(client.clone()), units.apply(config.units.clone()))
            .with_strict_day_count(config.strict_day_count);

        match command {
            Command::Current { location } => {
                let place = locate(&client, &config, location.as_deref()).await?;
                let weather = service.current(place.coordinates).await?;
                if json {
                    print_json(&weather)?;
                } else {
                    println!("{}\n{}", output::location(&place), output::current(&weather));
                }
            }
            Command::Hourly { location, hours } => {
                let place = locate(&client, &config, location.as_deref()).await?;
                let forecast = service.hourly(place.coordinates, hours).await?;
                if json {
                    print_json(&forecast)?;
                } else {
                    println!("{}\n{}", output::location(&place), output::hourly(&forecast));
                }
            }
            Command::Daily { location, days } => {
                let place = locate(&client, &config, location.as_deref()).await?;
                let forecast = service.daily(place.coordinates, days).await?;
                if json {
                    print_json(&forecast)?;
                } else {
                    println!("{}\n{}", output::location(&place), output::daily(&forecast));
                }
            }
            Command::Air { location } => {
                let place = locate(&client, &config, location.as_deref()).await?;
                let fields: Vec<String> = normalize::AIR_QUALITY_FIELDS
                    .iter()
                    .map(|f| f.to_string())
                    .collect();
                let raw = client
                    .fetch_air_quality(place.coordinates, &fields)
                    .await
                    .context("Failed to fetch air quality")?;
                let readings = normalize::air_quality(&raw)?;
                if json {
                    print_json(&readings)?;
                } else {
                    println!("{}\n{}", output::location(&place), output::air_quality(&readings));
                }
            }
            Command::Search { name } => {
                let place = client.search(&name).await?;
                if json {
                    print_json(&place)?;
                } else {
                    println!("{}", output::location(&place));
                }
            }
            Command::Configure => configure(&mut config)?,
        }

        Ok(())
    }
}

async fn locate(
    client: &OpenMeteoClient,
    config: &Config,
    explicit: Option<&str>,
) -> Result<Location> {
    let name = config.location_or_default(explicit)?;
    let place = client
        .search(&name)
        .await
        .with_context(|| format!("Failed to look up location '{name}'"))?;
    info!(
        name = %place.name,
        lat = place.coordinates.latitude,
        lon = place.coordinates.longitude,
        "Resolved location"
    );
    Ok(place)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{text}");
    Ok(())
}

fn configure(config: &mut Config) -> Result<()> {
    let temperature = Select::new("Temperature unit:", TEMPERATURE_UNITS.to_vec())
        .with_starting_cursor(cursor(&TEMPERATURE_UNITS, &config.units.temperature))
        .prompt()?;
    let wind_speed = Select::new("Wind speed unit:", WIND_SPEED_UNITS.to_vec())
        .with_starting_cursor(cursor(&WIND_SPEED_UNITS, &config.units.wind_speed))
        .prompt()?;
    let precipitation = Select::new("Precipitation unit:", PRECIPITATION_UNITS.to_vec())
        .with_starting_cursor(cursor(&PRECIPITATION_UNITS, &config.units.precipitation))
        .prompt()?;

    let current_location = config.default_location.clone().unwrap_or_default();
    let location = Text::new("Default location (leave empty for none):")
        .with_default(&current_location)
        .prompt()?;

    let strict = Confirm::new("Reject day counts outside 1-16 instead of showing one day?")
        .with_default(config.strict_day_count)
        .prompt()?;

    config.units = UnitPreferences {
        temperature: temperature.to_string(),
        wind_speed: wind_speed.to_string(),
        precipitation: precipitation.to_string(),
    };
    config.set_default_location(&location);
    config.strict_day_count = strict;
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

fn cursor(options: &[&str], current: &str) -> usize {
    options.iter().position(|o| *o == current).unwrap_or(0)
}
