use console::style;
use cropadvisor_core::AdvisorError;
use cropadvisor_model::PredictionFailure;
use std::fmt;
use std::io;
use std::path::Path;

/// Enhanced error type with suggestions
pub struct CliError {
    pub message: String,
    pub context: Option<String>,
    pub suggestions: Vec<String>,
    pub help_command: Option<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
            help_command: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_help(mut self, command: impl Into<String>) -> Self {
        self.help_command = Some(command.into());
        self
    }

    pub fn display(&self) {
        eprintln!("{} {}\n", style("✗").red().bold(), style(&self.message).red().bold());

        if let Some(ref context) = self.context {
            eprintln!("{}", context);
            eprintln!();
        }

        if !self.suggestions.is_empty() {
            eprintln!("{}", style("To fix this:").yellow().bold());
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, suggestion);
            }
            eprintln!();
        }

        if let Some(ref help_cmd) = self.help_command {
            eprintln!("{} {}", style("Need help?").cyan(), style(help_cmd).cyan().bold());
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Create error for a district name that is not in the catalog
pub fn unknown_district<'a>(name: &str, known: impl Iterator<Item = &'a str>) -> CliError {
    let known: Vec<&str> = known.collect();
    CliError::new(format!("Unknown district: {}", name))
        .with_context(format!("Available districts: {}", known.join(", ")))
        .with_suggestion("Pick one of the districts listed above (case does not matter)")
        .with_suggestion(
            "Or enter conditions manually: \
             cropadvisor advise --rainfall 900 --temperature 25 --soil-ph 6.5",
        )
        .with_help("Run: cropadvisor districts")
}

/// Create error for an explicit config file that does not exist
pub fn config_not_found(path: &Path) -> CliError {
    CliError::new("Config file not found")
        .with_context(format!(
            "The file passed with --config does not exist.\n\nPath: {}",
            path.display()
        ))
        .with_suggestion("Check the path and try again")
        .with_suggestion("Or omit --config to use ./cropadvisor.toml and built-in defaults")
        .with_help("Run: cropadvisor config")
}

/// Create error for invalid configuration
pub fn invalid_config(key: &str, reason: &str) -> CliError {
    CliError::new(format!("Invalid configuration: {}", key))
        .with_context(format!("Configuration value is invalid.\n\nReason: {}", reason))
        .with_suggestion("Check cropadvisor.toml for syntax errors or unknown keys")
        .with_suggestion(
            "Supported keys: default_rainfall_mm, default_temperature_c, \
             default_soil_ph, currency_symbol",
        )
        .with_help("Run: cropadvisor config")
}

/// Create error for a recommendation that could not be computed
pub fn prediction_failed(failure: &PredictionFailure) -> CliError {
    let error = CliError::new("Could not compute recommendation")
        .with_context(format!("Error: {}", failure));

    match failure {
        PredictionFailure::NonFiniteFeature { .. } => error
            .with_suggestion("Enter plain numbers for rainfall, temperature and soil pH")
            .with_help("Run: cropadvisor advise --help"),
        PredictionFailure::UnknownDistrict { .. } => error.with_help("Run: cropadvisor districts"),
        _ => error,
    }
}

/// Convert a core error to CliError
pub fn from_advisor_error(error: &AdvisorError) -> CliError {
    match error {
        AdvisorError::ConfigNotFound { path } => config_not_found(path),
        AdvisorError::ConfigInvalid { key, reason } => invalid_config(key, reason),
        AdvisorError::Io(e) => CliError::new("Could not read configuration file")
            .with_context(format!("Error: {}", e))
            .with_suggestion("Check that --config points to a readable TOML file")
            .with_help("Run: cropadvisor config"),
    }
}

/// Convert anyhow::Error to CliError with context
pub fn from_anyhow(error: anyhow::Error) -> CliError {
    if let Some(advisor) = error.downcast_ref::<AdvisorError>() {
        return from_advisor_error(advisor);
    }

    if let Some(failure) = error.downcast_ref::<PredictionFailure>() {
        return prediction_failed(failure);
    }

    let message = format!("{:#}", error);
    if is_missing_terminal(&error) {
        CliError::new("Interactive form needs a terminal")
            .with_context(format!("Error: {}", message))
            .with_suggestion("Run in an interactive terminal")
            .with_suggestion(
                "Or pass the form fields as flags: cropadvisor advise --district Ludhiana",
            )
            .with_help("Run: cropadvisor advise --help")
    } else {
        CliError::new(message)
    }
}

/// Prompts fail with `NotConnected` when stdin/stdout is not a terminal
fn is_missing_terminal(error: &anyhow::Error) -> bool {
    error
        .chain()
        .filter_map(|cause| cause.downcast_ref::<io::Error>())
        .any(|io_error| io_error.kind() == io::ErrorKind::NotConnected)
}
