//! Command session architecture
//!
//! Implements the Session-Scoped Dependency Injection Pattern.
//! Each command execution creates a session that owns all ephemeral state.

use crate::Result;
use crate::application::config::AppConfig;
use crate::display::StatusDisplay;
use crate::platform::ProgramFinder;
use anyhow::Context;
use std::env;
use std::ffi::OsString;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

/// Process execution output
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    /// Exit code, `None` when the process was killed by a signal
    pub code: Option<i32>,
}

/// Provider trait for process execution
pub trait ProcessProvider {
    /// Execute a command with given arguments in working directory
    fn execute(&self, command: &str, args: &[&str], working_dir: &Path) -> Result<ProcessOutput>;

    /// Locate an executable on this provider's search path
    fn find_program(&self, program: &str) -> Option<PathBuf>;
}

/// Session trait that both CommandSession and test sessions implement
pub trait Session {
    /// Get the display for this session
    fn display(&self) -> &StatusDisplay;

    /// Get the process provider for this session
    fn process(&self) -> &dyn ProcessProvider;

    /// Get the application configuration
    fn app_config(&self) -> &AppConfig;
}

/// Live implementation of ProcessProvider
#[derive(Debug, Clone, Default)]
pub struct LiveProcessProvider {
    /// Custom PATH override for hermetic testing
    custom_path: Option<OsString>,
}

impl LiveProcessProvider {
    /// Create a new LiveProcessProvider with system PATH
    pub fn new() -> Self {
        Self { custom_path: None }
    }

    /// Create a LiveProcessProvider with custom PATH for hermetic testing
    pub fn with_custom_path(path: impl Into<OsString>) -> Self {
        Self {
            custom_path: Some(path.into()),
        }
    }

    /// Get the PATH to search for programs
    fn search_path(&self) -> Option<OsString> {
        self.custom_path.clone().or_else(|| env::var_os("PATH"))
    }
}

impl ProcessProvider for LiveProcessProvider {
    fn execute(&self, command: &str, args: &[&str], working_dir: &Path) -> Result<ProcessOutput> {
        use std::process::Command;

        // Resolve against the custom PATH so the override also governs spawning
        let program = self
            .find_program(command)
            .unwrap_or_else(|| PathBuf::from(command));

        let mut cmd = Command::new(&program);
        cmd.args(args).current_dir(working_dir);

        if let Some(custom_path) = &self.custom_path {
            cmd.env("PATH", custom_path);
        }

        let output = cmd
            .output()
            .with_context(|| format!("Failed to execute command: {}", command))?;

        Ok(ProcessOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        })
    }

    fn find_program(&self, program: &str) -> Option<PathBuf> {
        ProgramFinder::find_in(program, self.search_path().as_deref()).path
    }
}

/// Production session: owns the display, process provider and configuration
pub struct CommandSession<P: ProcessProvider> {
    display: StatusDisplay,
    process_provider: P,
    app_config: AppConfig,
}

impl CommandSession<LiveProcessProvider> {
    /// Create a new command session with owned state (production composition)
    pub fn new(app_config: AppConfig) -> Self {
        let stdout_color = app_config.color.resolve(std::io::stdout().is_terminal());
        let log_color = app_config.color.resolve(std::io::stderr().is_terminal());

        // Tests and embedders may have installed a subscriber already
        if let Err(e) = crate::logger::Logger::init(app_config.to_logger_config(log_color)) {
            tracing::debug!(error = %e, "logger not installed");
        }

        Self {
            display: StatusDisplay::new(stdout_color),
            process_provider: LiveProcessProvider::new(),
            app_config,
        }
    }
}

impl<P: ProcessProvider> CommandSession<P> {
    /// Create a session around custom providers (for testing)
    pub fn new_with_providers(
        app_config: AppConfig,
        display: StatusDisplay,
        process_provider: P,
    ) -> Self {
        Self {
            display,
            process_provider,
            app_config,
        }
    }
}

impl<P: ProcessProvider> Session for CommandSession<P> {
    fn display(&self) -> &StatusDisplay {
        &self.display
    }

    fn process(&self) -> &dyn ProcessProvider {
        &self.process_provider
    }

    fn app_config(&self) -> &AppConfig {
        &self.app_config
    }
}
