//! Configuration loading
//!
//! Coordinates loading configuration from `.env` files, the process
//! environment and the command line into one validated [`CliConfig`].

use crate::primitives::ConfigError;
use clap::Parser;

use super::cli::{Cli, CliConfig};
use super::config::AppConfig;
use super::env::EnvironmentConfig;

/// Load `.env.local` then `.env` from the working directory when present
///
/// Variables already set in the environment are left alone.
pub fn load_env_files() -> Result<(), ConfigError> {
    use dotenvy::from_filename;

    for env_file in [".env.local", ".env"] {
        match from_filename(env_file) {
            Ok(_) => tracing::debug!(file = env_file, "loaded environment file"),
            Err(e) if e.not_found() => {}
            Err(e) => {
                return Err(ConfigError::EnvFileError {
                    file: env_file.to_string(),
                    source: e,
                });
            }
        }
    }

    Ok(())
}

impl CliConfig {
    /// Load config: defaults -> .env -> env vars -> CLI
    pub fn load() -> Result<Self, ConfigError> {
        // .env first so clap's `env` attributes see its values
        load_env_files()?;

        let env_config = EnvironmentConfig::load()?;
        Self::from_parts(Cli::parse(), env_config)
    }

    /// Merge a parsed command line with the environment and validate
    pub fn from_parts(cli: Cli, env_config: EnvironmentConfig) -> Result<Self, ConfigError> {
        let action = cli.action();

        // 1. Start with defaults
        let mut config = AppConfig::default();

        // 2. Standard environment variables
        config.color = env_config.apply_color_config(config.color);

        // 3. Override with CLI arguments (highest precedence)
        config = config.merge_with(cli.config);

        // 4. Post-process and validate
        config.validate()?;

        // Copies may run from another working directory
        let destination = cli.destination.map(std::path::absolute).transpose()?;

        Ok(Self {
            app_config: config,
            env_config,
            destination,
            action,
        })
    }
}

#[cfg(test)]
mod tests {
    include!("loader.test.rs");
}
