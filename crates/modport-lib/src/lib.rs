//! # modport Library
//!
//! Factorio mod export tooling: copies a mod's source tree into the game's
//! mods directory, assigns the next patch version and builds the zip archive.
//!
//! ## Core Modules
//!
//! - [`primitives`] - Foundation types, errors, and shared coordination
//! - [`logger`] - Structured logging with progress tracking
//! - [`platform`] - Host detection and program capability probes
//! - [`display`] - User-facing status output
//! - [`export`] - Filtering, copying, versioning and archiving
//! - [`application`] - CLI interface and configuration management
//!
//! ## Quick Start
//!
//! ```no_run
//! // Parse the command line and export the mod in the current directory
//! modport_lib::main().unwrap();
//! ```

pub mod application;
pub mod display;
pub mod export;
pub mod logger;
pub mod platform;
pub mod primitives;
#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-export commonly used types for convenience
pub use application::{AppConfig, Cli, CliConfig, execute_command};
pub use export::{ExportConfig, ExportError, ExportOrchestrator};
pub use logger::Logger;
pub use primitives::{ColorIntent, ConfigError, LogFormat, LogLevel, LogOutput, LoggerError};

// Private imports for the main function
use anyhow::Result;

pub fn main() -> Result<()> {
    // Load CLI configuration
    let config = CliConfig::load()?;

    // Execute the command
    execute_command(config)
}
