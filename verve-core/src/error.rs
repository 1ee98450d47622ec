//! Error handling for the Verve core layer.
//!
//! The main error type for this crate is [`CoreError`], which encapsulates
//! the more specific [`ConfigError`] and [`LoggingError`].

use std::ffi::OsString;
use thiserror::Error;

/// Core error type for the Verve launchers.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Errors raised while reading launcher configuration from the environment.
    #[error("Configuration Error: {0}")]
    Config(#[from] ConfigError),

    /// Errors raised while installing the global log subscriber.
    #[error("Logging Error: {0}")]
    Logging(#[from] LoggingError),
}

/// Error type for the environment-backed configuration read step.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable is present but its value is not valid UTF-8.
    ///
    /// D-Bus strings must be UTF-8, so such a value cannot be forwarded verbatim.
    #[error("Environment variable {key} is not valid UTF-8: {value:?}")]
    NotUnicode { key: &'static str, value: OsString },
}

/// Error type for logging initialization.
#[derive(Error, Debug)]
pub enum LoggingError {
    /// A filter directive could not be parsed.
    #[error("Failed to set log filter: {0}")]
    FilterError(String),

    /// A global subscriber is already installed.
    #[error("Failed to initialize logging: {0}")]
    InitializationFailure(String),
}
