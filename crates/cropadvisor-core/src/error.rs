//! Error types for Crop Advisor

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdvisorError {
    // Configuration errors
    #[error("Config file not found at {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AdvisorError>;
