//! Configuration error types

use thiserror::Error;

/// Errors raised while loading or validating options
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A distance is negative or not a number
    #[error("Invalid {field}: {value} (expected a non-negative number)")]
    InvalidDistance { field: &'static str, value: f64 },

    /// Options could not be parsed
    #[error("Failed to parse options: {0}")]
    Parse(#[from] toml::de::Error),

    /// Options could not be serialized
    #[error("Failed to serialize options: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
