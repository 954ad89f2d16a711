use std::path::Path;

use config::{Config, ConfigBuilder, FileFormat, builder::DefaultState};
use serde::Deserialize;

use crate::constants::{DEFAULT_HORIZON_WEEKS, ENV_PREFIX};
use crate::error::CoreResult;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub rotation: RotationConfig,
    #[serde(default)]
    pub calendar: CalendarConfig,
    #[serde(default)]
    pub timezones: TimezoneConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RotationConfig {
    /// How many weeks past the rotation start to expand.
    pub horizon_weeks: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CalendarConfig {
    /// Timezone used to lay out the calendar. Falls back to the schedule
    /// timezone, then to the first layer's timezone.
    pub display_timezone: Option<String>,
    /// Fixed seed for user colors. Unset means a fresh palette per render.
    pub color_seed: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimezoneConfig {
    /// Restricts accepted timezones to this list when present.
    pub allowed: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    fn defaults() -> CoreResult<ConfigBuilder<DefaultState>> {
        Ok(Config::builder()
            .set_default("rotation.horizon_weeks", i64::from(DEFAULT_HORIZON_WEEKS))?
            .set_default("logging.level", "info")?)
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .ignore_empty(true)
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("timezones.allowed")
    }

    /// ## Summary
    /// Loads configuration from defaults, environment variables and an
    /// optional `config.toml` in the working directory.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> CoreResult<Self> {
        Self::load_with_file(None)
    }

    /// ## Summary
    /// Same as [`Settings::load`], but reads the TOML file at `path` instead
    /// of `config.toml`. An explicit path must exist.
    ///
    /// ## Errors
    /// Returns an error if the file is missing or the merged configuration
    /// does not deserialize.
    pub fn load_with_file(path: Option<&Path>) -> CoreResult<Self> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("config.toml").required(false),
        };

        Ok(Self::defaults()?
            .add_source(Self::environment())
            .add_source(file)
            .build()?
            .try_deserialize::<Settings>()?)
    }

    /// ## Summary
    /// Builds settings from defaults plus an in-memory TOML document.
    ///
    /// ## Errors
    /// Returns an error if the document is not valid TOML or does not
    /// deserialize into `Settings`.
    pub fn from_toml_str(toml: &str) -> CoreResult<Self> {
        Ok(Self::defaults()?
            .add_source(config::File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize::<Settings>()?)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config(path: Option<&Path>) -> CoreResult<Settings> {
    dotenvy::dotenv().ok();

    Settings::load_with_file(path)
}

#[cfg(test)]
mod tests;
