use clap::Parser;
use std::path::PathBuf;

use super::config::AppConfig;
use super::env::EnvironmentConfig;

/// modport CLI - Factorio mod export
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "modport")]
#[command(about = "Export a Factorio mod into the game's mods directory and archive it")]
#[command(version)]
pub struct Cli {
    /// Mods directory to export into (resolved automatically when omitted)
    #[arg(value_name = "DESTINATION")]
    pub destination: Option<PathBuf>,

    /// Check tool dependencies and exit
    #[arg(long)]
    pub requirements: bool,

    /// Global configuration options
    #[command(flatten)]
    pub config: AppConfig,
}

/// Fully loaded invocation: merged configuration plus what to do
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub app_config: AppConfig,
    pub env_config: EnvironmentConfig,
    pub destination: Option<PathBuf>,
    pub action: Action,
}

impl Cli {
    /// The action requested by this invocation
    pub fn action(&self) -> Action {
        if self.requirements {
            Action::Requirements
        } else {
            Action::Export
        }
    }
}

/// What a run of the binary does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Report tool availability
    Requirements,
    /// Export, version and archive the mod
    Export,
}

#[cfg(test)]
mod tests {
    include!("cli.test.rs");
}
