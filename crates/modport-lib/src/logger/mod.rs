//! Structured logging
//!
//! One process-wide tracing subscriber, installed by the first command
//! session. Log lines go through the indicatif writers so they never tear
//! through the archive progress bar.

use crate::primitives::*;
use std::sync::OnceLock;
use tracing::Subscriber;
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

static GLOBAL_LOGGER: OnceLock<Logger> = OnceLock::new();

/// Handle on the installed subscriber
#[derive(Debug)]
pub struct Logger {
    config: LoggerConfig,
}

type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

impl Logger {
    /// Install the global subscriber; only the first call succeeds
    pub fn init(config: LoggerConfig) -> Result<&'static Self, LoggerError> {
        if GLOBAL_LOGGER.get().is_some() {
            return Err(LoggerError::AlreadyInitialized);
        }

        let indicatif_layer = IndicatifLayer::new();

        // RUST_LOG wins over the verbosity flag
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(Self::default_directives(config.level)));

        let fmt_layer = match config.output {
            LogOutput::Stderr => {
                Self::format_layer(config.format, config.color, indicatif_layer.get_stderr_writer())
            }
            LogOutput::Stdout => {
                Self::format_layer(config.format, config.color, indicatif_layer.get_stdout_writer())
            }
        };

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(indicatif_layer)
            .try_init()
            .map_err(|e| LoggerError::InitializationFailed {
                reason: e.to_string(),
            })?;

        GLOBAL_LOGGER
            .set(Logger {
                config: config.clone(),
            })
            .map_err(|_| LoggerError::AlreadyInitialized)?;

        tracing::debug!(
            level = ?config.level,
            format = ?config.format,
            output = ?config.output,
            "logger initialized"
        );

        GLOBAL_LOGGER.get().ok_or(LoggerError::InitializationFailed {
            reason: "logger vanished after initialization".to_string(),
        })
    }

    /// Filter used when `RUST_LOG` is unset: our crates at `level`, the rest at warn
    pub fn default_directives(level: LogLevel) -> String {
        let level = level.as_filter_directive();
        format!("modport_lib={level},modport={level},warn")
    }

    fn format_layer<S, W>(format: LogFormat, color: bool, writer: W) -> BoxedLayer<S>
    where
        S: Subscriber + for<'a> LookupSpan<'a>,
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let layer = fmt::layer().with_writer(writer);
        match format {
            LogFormat::Text => layer.with_ansi(color).compact().boxed(),
            LogFormat::Json => layer.with_ansi(false).json().boxed(),
            LogFormat::Yaml => layer.with_ansi(color).pretty().boxed(),
        }
    }

    /// Get reference to the global logger instance
    pub fn global() -> Option<&'static Self> {
        GLOBAL_LOGGER.get()
    }

    pub fn is_initialized() -> bool {
        GLOBAL_LOGGER.get().is_some()
    }

    /// Settings the subscriber was installed with
    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }
}

/// Create a span for operations that should show progress bars
#[macro_export]
macro_rules! progress_span {
    ($operation:expr) => {
        tracing::info_span!("progress", operation = $operation)
    };
    ($operation:expr, total = $total:expr) => {
        tracing::info_span!("progress", operation = $operation, total = $total)
    };
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
