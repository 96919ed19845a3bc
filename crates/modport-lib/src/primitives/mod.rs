//! modport primitives - core types, errors, and coordination
//!
//! Shared types that the rest of the crate builds on: log settings chosen
//! by the user, the color intent, and the configuration/logger error enums.

use clap::ValueEnum;
use std::path::PathBuf;
use thiserror::Error;

mod shared;
use shared::value_enum_from_str;

/// Color intent and terminal styling decisions
pub mod terminal;
pub use terminal::*;

/// Available log output streams
#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    /// STDERR
    Stderr,
    /// STDOUT
    Stdout,
}

/// Log levels for structured logging, least verbose first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum LogLevel {
    #[value(alias = "err", alias = "fatal", alias = "critical")]
    Error = 0,
    #[value(name = "warn", alias = "warning")]
    Warning = 1,
    #[value(alias = "information")]
    Info = 2,
    #[value(alias = "debugging")]
    Debug = 3,
    #[value(alias = "tracing", alias = "verbose")]
    Trace = 4,
}

/// Output formats for structured logging
#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Compact single-line records
    #[value(alias = "txt", alias = "plain")]
    Text,

    /// One JSON object per record
    Json,

    /// Multi-line, human oriented records
    #[value(alias = "yml")]
    Yaml,
}

// ============================================================================
// LOGGER CONFIGURATION TYPES
// ============================================================================

/// Logger configuration derived from the application config
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub level: LogLevel,
    pub format: LogFormat,
    pub output: LogOutput,
    pub color: bool,
}

// ============================================================================
// STRUCTURED ERROR TYPES
// ============================================================================

/// Application configuration loading and validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load environment file '{file}': {source}")]
    EnvFileError {
        file: String,
        source: dotenvy::Error,
    },

    #[error("Invalid mod source directory: {path}")]
    InvalidSourceDir { path: String },

    #[error("Failed to parse environment variables: {source}")]
    EnvironmentParsingFailed {
        #[from]
        source: envy::Error,
    },

    #[error("Configuration validation failed: {reason}")]
    ValidationFailed { reason: String },

    #[error("Failed to get current directory: {source}")]
    CurrentDirError {
        #[from]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration value '{value}': {reason}")]
    ParseError { value: String, reason: String },

    #[error("Failed to read config file '{}': {source}", path.display())]
    ConfigFileUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file '{}': {reason}", path.display())]
    ConfigFileInvalid { path: PathBuf, reason: String },
}

/// Logger initialization and operation errors
#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("Failed to initialize tracing subscriber: {reason}")]
    InitializationFailed { reason: String },

    #[error("Logger already initialized")]
    AlreadyInitialized,
}

impl LogLevel {
    /// Convert verbosity level from AppConfig to LogLevel
    pub fn from_verbosity(verbosity: u8) -> Self {
        match verbosity {
            0 => LogLevel::Error,
            1 => LogLevel::Warning,
            2 => LogLevel::Info,
            3 => LogLevel::Debug,
            4.. => LogLevel::Trace,
        }
    }

    /// Directive string understood by `EnvFilter`
    pub fn as_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warning => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

value_enum_from_str! {
    LogLevel => "log level",
    LogFormat => "log format",
    LogOutput => "log output stream",
    ColorIntent => "color intent",
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
