//! Configuration loading utilities for CLI commands

use anyhow::Result;
use cropadvisor_core::config::{CliConfigOverrides, LayeredConfig, CONFIG_FILE_NAME};
use cropadvisor_core::AdvisorError;
use std::path::{Path, PathBuf};

/// Load layered configuration: defaults, config file, environment
pub fn load_config(explicit: Option<&Path>) -> Result<LayeredConfig> {
    let config = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(AdvisorError::ConfigNotFound { path: path.to_path_buf() }.into());
            }
            LayeredConfig::with_defaults().load_from_file(path)?
        }
        None => LayeredConfig::with_defaults().load_from_optional_file(default_config_path())?,
    };

    Ok(config.load_from_env())
}

/// Load layered configuration with CLI overrides
pub fn load_config_with_overrides(
    explicit: Option<&Path>,
    overrides: CliConfigOverrides,
) -> Result<LayeredConfig> {
    let mut config = load_config(explicit)?;
    config.update_from_cli(overrides);
    Ok(config)
}

/// `cropadvisor.toml` in the working directory
pub fn default_config_path() -> PathBuf {
    PathBuf::from(CONFIG_FILE_NAME)
}
