//! Integration tests for layered configuration
//!
//! Precedence: CLI arguments > Environment variables > Config file > Defaults

use cropadvisor_core::config::{CliConfigOverrides, ConfigSource, LayeredConfig};
use serial_test::serial;
use std::env;
use std::fs;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

const ENV_KEYS: [&str; 4] = [
    "CROPADVISOR_DEFAULT_RAINFALL",
    "CROPADVISOR_DEFAULT_TEMPERATURE",
    "CROPADVISOR_DEFAULT_SOIL_PH",
    "CROPADVISOR_CURRENCY",
];

fn clear_env() {
    for key in ENV_KEYS {
        env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_environment_overrides_file() {
    clear_env();
    env::set_var("CROPADVISOR_DEFAULT_RAINFALL", "1800");
    env::set_var("CROPADVISOR_CURRENCY", "INR ");

    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
default_rainfall_mm = 1200.0
default_temperature_c = 22.5
"#
    )
    .unwrap();

    let config = LayeredConfig::with_defaults()
        .load_from_file(file.path())
        .unwrap()
        .load_from_env();

    assert_eq!(config.default_rainfall_mm.value, 1800.0);
    assert_eq!(config.default_rainfall_mm.source, ConfigSource::Environment);
    assert_eq!(config.default_temperature_c.value, 22.5);
    assert_eq!(config.default_temperature_c.source, ConfigSource::File);
    assert_eq!(config.currency_symbol.value, "INR ");

    clear_env();
}

#[test]
#[serial]
fn test_invalid_environment_value_is_ignored() {
    clear_env();
    env::set_var("CROPADVISOR_DEFAULT_SOIL_PH", "acidic");

    let config = LayeredConfig::with_defaults().load_from_env();

    assert_eq!(config.default_soil_ph.value, 6.5);
    assert_eq!(config.default_soil_ph.source, ConfigSource::Default);

    clear_env();
}

#[test]
#[serial]
fn test_configuration_precedence_order() {
    clear_env();
    env::set_var("CROPADVISOR_DEFAULT_TEMPERATURE", "30");

    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "default_temperature_c = 20.0").unwrap();

    let mut config = LayeredConfig::with_defaults()
        .load_from_file(file.path())
        .unwrap()
        .load_from_env();
    assert_eq!(config.default_temperature_c.value, 30.0);

    config.update_from_cli(CliConfigOverrides {
        default_temperature_c: Some(35.0),
        ..Default::default()
    });
    assert_eq!(config.default_temperature_c.value, 35.0);
    assert_eq!(config.default_temperature_c.source, ConfigSource::Cli);

    clear_env();
}

#[test]
fn test_optional_file_in_directory() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("cropadvisor.toml");

    let config = LayeredConfig::with_defaults().load_from_optional_file(&path).unwrap();
    assert_eq!(config.currency_symbol.source, ConfigSource::Default);

    fs::write(&path, "currency_symbol = \"$\"\n").unwrap();
    let config = LayeredConfig::with_defaults().load_from_optional_file(&path).unwrap();
    assert_eq!(config.currency_symbol.value, "$");
    assert_eq!(config.currency_symbol.source, ConfigSource::File);
}

#[test]
fn test_malformed_file_is_an_error() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "default_rainfall_mm = \"lots\"").unwrap();

    let result = LayeredConfig::with_defaults().load_from_file(file.path());
    assert!(result.is_err());
}
