//! Scroll engine error types

use thiserror::Error;

use crate::runtime::InstanceId;

/// Settings loading and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read a settings file
    #[error("Failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file is not valid TOML or has wrongly typed keys
    #[error("Invalid settings file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Track limits outside `[0, 100]` or inverted
    #[error("Invalid track size range: min {min}%, max {max}%")]
    InvalidTrackRange { min: f64, max: f64 },
}

/// Errors returned by runtime operations
#[derive(Error, Debug)]
pub enum ScrollError {
    /// The instance was destroyed or never existed
    #[error("Unknown scroll instance: {0:?}")]
    UnknownInstance(InstanceId),

    /// `scroll_into_view` target could not be resolved by the host
    #[error("Scroll target not found: {0}")]
    TargetNotFound(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for scroll operations
pub type Result<T> = std::result::Result<T, ScrollError>;
