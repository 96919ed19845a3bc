//! Application configuration management
//!
//! Handles config loading, validation, and environment variable processing
//! following the precedence: defaults -> .env -> env vars -> CLI args.

use crate::primitives::*;
use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;

/// Default configuration values
pub mod defaults {
    pub const LOG_LEVEL: &str = "0"; // Error-only logging by default
    pub const LOG_FORMAT: &str = "text";
    pub const LOG_OUTPUT: &str = "stderr";
    pub const COLOR_INTENT: &str = "auto";
}

/// Default value functions for configuration fields
mod default_fns {
    use crate::primitives::{ColorIntent, LogFormat, LogOutput};

    pub fn log_level() -> u8 {
        0
    }

    pub fn log_format() -> LogFormat {
        LogFormat::Text
    }

    pub fn log_output() -> LogOutput {
        LogOutput::Stderr
    }

    pub fn color_intent() -> ColorIntent {
        ColorIntent::Auto
    }
}

/// Application configuration structure
#[derive(Debug, Clone, Parser, Deserialize)]
pub struct AppConfig {
    /// Mod source directory (defaults to the current directory)
    #[arg(short, long, env = "MODPORT_SOURCE")]
    #[serde(default)]
    pub source: Option<PathBuf>,

    /// Export config file (YAML)
    #[arg(long, env = "MODPORT_CONFIG")]
    #[serde(default)]
    pub config: Option<PathBuf>,

    /// Mod name used for the exported folder and archive
    #[arg(long, env = "MODPORT_MOD_NAME")]
    #[serde(default)]
    pub mod_name: Option<String>,

    /// Skip archive creation and manifest version bump
    #[arg(long, env = "MODPORT_NO_ARCHIVE")]
    #[serde(default)]
    pub no_archive: bool,

    /// Never use rsync, always copy file by file
    #[arg(long, env = "MODPORT_NO_BULK_COPY")]
    #[serde(default)]
    pub no_bulk_copy: bool,

    /// Verbosity level (0=error, 1=warn, 2=info, 3=debug, 4=trace)
    #[arg(long, env = "MODPORT_LOG_LEVEL", default_value = defaults::LOG_LEVEL)]
    #[serde(default = "default_fns::log_level")]
    pub log_level: u8,

    /// Output format (text, json, yaml)
    #[arg(long, env = "MODPORT_LOG_FORMAT", default_value = defaults::LOG_FORMAT)]
    #[serde(default = "default_fns::log_format")]
    pub log_format: LogFormat,

    /// Log output stream (stderr, stdout)
    #[arg(long, env = "MODPORT_LOG_OUTPUT", default_value = defaults::LOG_OUTPUT)]
    #[serde(default = "default_fns::log_output")]
    pub log_output: LogOutput,

    /// Color output control (auto, always, never)
    #[arg(short, long, env = "MODPORT_COLOR", default_value = defaults::COLOR_INTENT)]
    #[serde(default = "default_fns::color_intent")]
    pub color: ColorIntent,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source: None,
            config: None,
            mod_name: None,
            no_archive: false,
            no_bulk_copy: false,
            log_level: default_fns::log_level(),
            log_format: default_fns::log_format(),
            log_output: default_fns::log_output(),
            color: default_fns::color_intent(),
        }
    }
}

impl AppConfig {
    /// Create LoggerConfig once the color decision for the log stream is made
    pub fn to_logger_config(&self, color: bool) -> LoggerConfig {
        LoggerConfig {
            level: LogLevel::from_verbosity(self.log_level),
            format: self.log_format,
            output: self.log_output,
            color,
        }
    }

    /// Merge this config with another, taking non-default values from other
    pub fn merge_with(mut self, other: Self) -> Self {
        // For Option fields, take other if it's Some
        if other.source.is_some() {
            self.source = other.source;
        }
        if other.config.is_some() {
            self.config = other.config;
        }
        if other.mod_name.is_some() {
            self.mod_name = other.mod_name;
        }

        // Flags only ever switch behavior off
        self.no_archive |= other.no_archive;
        self.no_bulk_copy |= other.no_bulk_copy;

        // For primitive fields, take other if it's not the default
        if other.log_level != default_fns::log_level() {
            self.log_level = other.log_level;
        }

        // For enums, detect if it's non-default
        if !matches!(other.log_format, LogFormat::Text) {
            self.log_format = other.log_format;
        }
        if !matches!(other.log_output, LogOutput::Stderr) {
            self.log_output = other.log_output;
        }
        if !matches!(other.color, ColorIntent::Auto) {
            self.color = other.color;
        }

        self
    }

    /// Validate the final configuration
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        if matches!(&self.mod_name, Some(name) if name.trim().is_empty()) {
            self.mod_name = None;
        }

        // Resolve the source directory against the working directory
        let source = match self.source.take() {
            Some(source) => source,
            None => std::env::current_dir()?,
        };
        self.source = Some(std::path::absolute(&source)?);

        Ok(())
    }
}
