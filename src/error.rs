use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the library
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Environment error: {0}")]
    #[diagnostic(code(schedule_snap::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(schedule_snap::config))]
    Config(String),

    #[error("Image error: {0}")]
    #[diagnostic(
        code(schedule_snap::image),
        help("Upload a PNG or JPEG screenshot of the schedule")
    )]
    Image(String),

    #[error("Text detection error: {0}")]
    #[diagnostic(code(schedule_snap::detection))]
    Detection(String),

    #[error("Text detection did not finish within {0} seconds")]
    #[diagnostic(code(schedule_snap::timeout))]
    Timeout(u64),

    #[error("Storage error: {0}")]
    #[diagnostic(code(schedule_snap::storage))]
    Storage(String),

    #[error("Calendar error: {0}")]
    #[diagnostic(code(schedule_snap::calendar))]
    Calendar(String),

    #[error("Could not read shift entry '{0}'")]
    #[diagnostic(
        code(schedule_snap::parse),
        help("Entries look like \"9am - 5pm\" or \"Not Scheduled\"")
    )]
    Parse(String),

    #[error(transparent)]
    #[diagnostic(code(schedule_snap::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(schedule_snap::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(schedule_snap::other))]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Detection(err.to_string())
    }
}

impl From<redis::RedisError> for Error {
    fn from(err: redis::RedisError) -> Self {
        Error::Storage(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type ScheduleResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Invalid value for environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create image errors
pub fn image_error(message: &str) -> Error {
    Error::Image(message.to_string())
}

/// Helper to create text detection errors
pub fn detection_error(message: &str) -> Error {
    Error::Detection(message.to_string())
}

/// Helper to create storage errors
pub fn storage_error(message: &str) -> Error {
    Error::Storage(message.to_string())
}

/// Helper to create calendar errors
pub fn calendar_error(message: &str) -> Error {
    Error::Calendar(message.to_string())
}

/// Helper to create other errors
pub fn other_error(message: &str) -> Error {
    Error::Other(message.to_string())
}
