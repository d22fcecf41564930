use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::model::UnitPreferences;

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// default_location = "Berlin"
/// timeout_secs = 3
///
/// [units]
/// temperature = "fahrenheit"
/// wind_speed = "mph"
/// precipitation = "inch"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_units")]
    pub units: UnitPreferences,

    /// Place name used when a command is given no location.
    #[serde(default)]
    pub default_location: Option<String>,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_forecast_base_url")]
    pub forecast_base_url: String,

    #[serde(default = "default_geocoding_base_url")]
    pub geocoding_base_url: String,

    #[serde(default = "default_air_quality_base_url")]
    pub air_quality_base_url: String,

    /// Reject out-of-range day counts instead of requesting a single day.
    #[serde(default)]
    pub strict_day_count: bool,
}

fn default_units() -> UnitPreferences {
    UnitPreferences {
        temperature: "celsius".to_string(),
        wind_speed: "kmh".to_string(),
        precipitation: "mm".to_string(),
    }
}

const fn default_timeout() -> u64 {
    3
}

fn default_forecast_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_geocoding_base_url() -> String {
    "https://geocoding-api.open-meteo.com/v1".to_string()
}

fn default_air_quality_base_url() -> String {
    "https://air-quality-api.open-meteo.com/v1".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            units: default_units(),
            default_location: None,
            timeout_secs: default_timeout(),
            forecast_base_url: default_forecast_base_url(),
            geocoding_base_url: default_geocoding_base_url(),
            air_quality_base_url: default_air_quality_base_url(),
            strict_day_count: false,
        }
    }
}

impl Config {
    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Invalid configuration TOML")
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "sky", "sky")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// The explicit location if given, otherwise the configured default.
    pub fn location_or_default(&self, explicit: Option<&str>) -> Result<String> {
        if let Some(name) = explicit.map(str::trim).filter(|n| !n.is_empty()) {
            return Ok(name.to_string());
        }

        self.default_location.clone().ok_or_else(|| {
            anyhow!(
                "No location given and no default location configured.\n\
                 Hint: pass a place name (e.g. `sky current Berlin`) or run `sky configure`."
            )
        })
    }

    pub fn set_default_location(&mut self, name: &str) {
        let name = name.trim();
        self.default_location = if name.is_empty() {
            None
        } else {
            Some(name.to_string())
        };
    }
}
