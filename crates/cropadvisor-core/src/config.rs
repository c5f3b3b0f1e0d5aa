use crate::error::{AdvisorError, Result};
use crate::models::ManualInput;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "cropadvisor.toml";

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for the advisor
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub default_rainfall_mm: ConfigValue<f64>,
    pub default_temperature_c: ConfigValue<f64>,
    pub default_soil_ph: ConfigValue<f64>,
    pub currency_symbol: ConfigValue<String>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        let manual = ManualInput::default();
        Self {
            default_rainfall_mm: ConfigValue::new(manual.rainfall_mm, ConfigSource::Default),
            default_temperature_c: ConfigValue::new(manual.temperature_c, ConfigSource::Default),
            default_soil_ph: ConfigValue::new(manual.soil_ph, ConfigSource::Default),
            currency_symbol: ConfigValue::new("₹".to_string(), ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| AdvisorError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(rainfall) = file_config.default_rainfall_mm {
            self.default_rainfall_mm.update(rainfall, ConfigSource::File);
        }

        if let Some(temperature) = file_config.default_temperature_c {
            self.default_temperature_c.update(temperature, ConfigSource::File);
        }

        if let Some(soil_ph) = file_config.default_soil_ph {
            self.default_soil_ph.update(soil_ph, ConfigSource::File);
        }

        if let Some(symbol) = file_config.currency_symbol {
            self.currency_symbol.update(symbol, ConfigSource::File);
        }

        tracing::debug!("Loaded configuration from {}", path.as_ref().display());
        Ok(self)
    }

    /// Load configuration from a TOML file if it exists
    pub fn load_from_optional_file<P: AsRef<Path>>(self, path: P) -> Result<Self> {
        if path.as_ref().exists() {
            self.load_from_file(path)
        } else {
            Ok(self)
        }
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // CROPADVISOR_DEFAULT_RAINFALL
        if let Some(rainfall) = env_f64("CROPADVISOR_DEFAULT_RAINFALL") {
            self.default_rainfall_mm.update(rainfall, ConfigSource::Environment);
        }

        // CROPADVISOR_DEFAULT_TEMPERATURE
        if let Some(temperature) = env_f64("CROPADVISOR_DEFAULT_TEMPERATURE") {
            self.default_temperature_c.update(temperature, ConfigSource::Environment);
        }

        // CROPADVISOR_DEFAULT_SOIL_PH
        if let Some(soil_ph) = env_f64("CROPADVISOR_DEFAULT_SOIL_PH") {
            self.default_soil_ph.update(soil_ph, ConfigSource::Environment);
        }

        // CROPADVISOR_CURRENCY
        if let Ok(symbol) = env::var("CROPADVISOR_CURRENCY") {
            self.currency_symbol.update(symbol, ConfigSource::Environment);
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(rainfall) = overrides.default_rainfall_mm {
            self.default_rainfall_mm.update(rainfall, ConfigSource::Cli);
        }

        if let Some(temperature) = overrides.default_temperature_c {
            self.default_temperature_c.update(temperature, ConfigSource::Cli);
        }

        if let Some(soil_ph) = overrides.default_soil_ph {
            self.default_soil_ph.update(soil_ph, ConfigSource::Cli);
        }

        if let Some(symbol) = overrides.currency_symbol {
            self.currency_symbol.update(symbol, ConfigSource::Cli);
        }
    }

    /// Manual-entry prefill values, clamped to the field bounds
    pub fn manual_defaults(&self) -> ManualInput {
        let point = ManualInput::new(
            self.default_rainfall_mm.value,
            self.default_temperature_c.value,
            self.default_soil_ph.value,
        )
        .to_query_point();

        ManualInput::new(point.rainfall_mm, point.temperature_c, point.soil_ph)
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "default_rainfall_mm".to_string(),
            (self.default_rainfall_mm.value.to_string(), self.default_rainfall_mm.source),
        );

        map.insert(
            "default_temperature_c".to_string(),
            (self.default_temperature_c.value.to_string(), self.default_temperature_c.source),
        );

        map.insert(
            "default_soil_ph".to_string(),
            (self.default_soil_ph.value.to_string(), self.default_soil_ph.source),
        );

        map.insert(
            "currency_symbol".to_string(),
            (self.currency_symbol.value.clone(), self.currency_symbol.source),
        );

        map
    }
}

impl Default for LayeredConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn env_f64(key: &str) -> Option<f64> {
    let raw = env::var(key).ok()?;
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            tracing::warn!("Invalid {} value '{}': expected a number", key, raw);
            None
        }
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    default_rainfall_mm: Option<f64>,
    default_temperature_c: Option<f64>,
    default_soil_ph: Option<f64>,
    currency_symbol: Option<String>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub default_rainfall_mm: Option<f64>,
    pub default_temperature_c: Option<f64>,
    pub default_soil_ph: Option<f64>,
    pub currency_symbol: Option<String>,
}
