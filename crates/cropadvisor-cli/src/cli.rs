use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Crop Advisor - find the best crop for your farm
#[derive(Parser, Debug)]
#[command(name = "cropadvisor")]
#[command(
    about = "Find the best crop for your farm from soil and weather conditions",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to ./cropadvisor.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Runs the recommendation form when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Get a crop recommendation (interactive form)
    Advise(AdviseArgs),

    /// List the districts in the catalog
    Districts,

    /// Show effective configuration and where each value comes from
    Config,
}

#[derive(Parser, Debug, Default)]
pub struct AdviseArgs {
    /// Submit once for this district instead of prompting
    #[arg(long, short = 'd', conflicts_with_all = ["rainfall", "temperature", "soil_ph"])]
    pub district: Option<String>,

    /// Average rainfall in mm (0-10000); submits once with manual input
    #[arg(long, allow_negative_numbers = true)]
    pub rainfall: Option<f64>,

    /// Average temperature in °C (-10-60); submits once with manual input
    #[arg(long, allow_negative_numbers = true)]
    pub temperature: Option<f64>,

    /// Soil pH (0-14); submits once with manual input
    #[arg(long, allow_negative_numbers = true)]
    pub soil_ph: Option<f64>,

    /// Currency symbol used for profit figures
    #[arg(long)]
    pub currency: Option<String>,

    /// Stop after the first recommendation instead of offering another
    #[arg(long)]
    pub once: bool,
}

impl AdviseArgs {
    /// Whether any manual field was given on the command line
    pub fn has_manual_values(&self) -> bool {
        self.rainfall.is_some() || self.temperature.is_some() || self.soil_ph.is_some()
    }
}
