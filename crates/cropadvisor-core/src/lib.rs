//! Crop Advisor Core - Domain models, district catalog, and configuration
//!
//! This crate contains the core domain types shared by the classifier and the CLI.

pub mod config;
pub mod error;
pub mod models;

pub use error::{AdvisorError, Result};
