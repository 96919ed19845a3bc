//! Hermetic test environment for E2E testing
//!
//! This module provides a TestEnvironment helper that creates isolated test environments
//! with mock executables, enabling true hermetic E2E testing without external dependencies.

use anyhow::{Result, anyhow};
use modport_lib::application::cli::{Action, CliConfig};
use modport_lib::application::config::AppConfig;
use modport_lib::application::env::EnvironmentConfig;
use modport_lib::application::session::{CommandSession, LiveProcessProvider};
use modport_lib::display::{CapturedOutput, StatusDisplay};
use modport_lib::testing::TempDirFixture;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Hermetic test environment with mock executables
pub struct TestEnvironment {
    /// Temporary directory for the test environment
    pub fixture: TempDirFixture,
    /// Path to the bin directory containing mock executables
    pub bin_path: PathBuf,
    /// Path to the work directory holding the mod source and game layout
    pub work_path: PathBuf,
    /// Mock executable configurations
    mock_executables: HashMap<String, MockExecutable>,
}

/// Configuration for a mock executable
#[derive(Debug, Clone)]
pub struct MockExecutable {
    /// Name of the executable
    pub name: String,
    /// Mock implementation behavior
    pub behavior: MockBehavior,
    /// Log file path for recording calls
    pub log_path: PathBuf,
}

/// Mock executable behavior configuration
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Always succeed with empty output
    AlwaysSucceed,
    /// Always fail with the given exit code and message
    AlwaysFail { code: i32, error: String },
    /// Succeed with specific output
    SucceedWithOutput { stdout: String },
}

impl TestEnvironment {
    /// Create a new hermetic test environment
    pub fn new() -> Result<Self> {
        let fixture = TempDirFixture::new().map_err(|e| anyhow!("{e}"))?;
        let bin_path = fixture.create_dir("bin").map_err(|e| anyhow!("{e}"))?;
        let work_path = fixture.create_dir("work").map_err(|e| anyhow!("{e}"))?;

        Ok(Self {
            fixture,
            bin_path,
            work_path,
            mock_executables: HashMap::new(),
        })
    }

    /// Add a mock executable to the environment
    ///
    /// Scripts only use shell builtins so they run with `bin_path` as the
    /// whole PATH.
    pub fn add_mock_executable(&mut self, name: &str, behavior: MockBehavior) -> Result<()> {
        let log_path = self.fixture.path().join(format!("{}.log", name));
        let executable_path = self.bin_path.join(name);

        let script = format!(
            "#!/bin/sh\n# Mock executable: {name}\necho \"{name} $*\" >> \"{log}\"\n{body}\n",
            log = log_path.display(),
            body = behavior_code(&behavior),
        );
        fs::write(&executable_path, script)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&executable_path)?.permissions();
            perms.set_mode(0o755);
            fs::set_permissions(&executable_path, perms)?;
        }

        self.mock_executables.insert(
            name.to_string(),
            MockExecutable {
                name: name.to_string(),
                behavior,
                log_path,
            },
        );
        Ok(())
    }

    /// Get all calls made to a mock executable, one line per call
    pub fn get_mock_calls(&self, executable_name: &str) -> Result<Vec<String>> {
        let Some(mock) = self.mock_executables.get(executable_name) else {
            return Err(anyhow!("no mock executable named '{}'", executable_name));
        };
        if !mock.log_path.exists() {
            return Ok(Vec::new());
        }

        Ok(fs::read_to_string(&mock.log_path)?
            .lines()
            .map(str::to_string)
            .collect())
    }

    /// Lay out a mod source under the work directory
    pub fn init_mod_source(&self, mod_name: &str, version: &str) -> Result<PathBuf> {
        self.fixture
            .mod_source("work/src", mod_name, version)
            .map_err(|e| anyhow!("{e}"))
    }

    /// Create the game's mods directory under the work directory
    pub fn init_mods_dir(&self) -> Result<PathBuf> {
        self.fixture
            .mods_dir("work/game")
            .map_err(|e| anyhow!("{e}"))
    }

    /// Path relative to the environment root
    pub fn path(&self, relative: &str) -> PathBuf {
        self.fixture.path().join(relative)
    }
}

fn behavior_code(behavior: &MockBehavior) -> String {
    match behavior {
        MockBehavior::AlwaysSucceed => "exit 0".to_string(),
        MockBehavior::AlwaysFail { code, error } => format!("echo '{}' >&2\nexit {}", error, code),
        MockBehavior::SucceedWithOutput { stdout } => format!("echo '{}'\nexit 0", stdout),
    }
}

/// Builder for creating hermetic sessions over a [`TestEnvironment`]
pub struct HermeticSessionBuilder {
    test_env: TestEnvironment,
    app_config: AppConfig,
    destination: Option<PathBuf>,
    action: Action,
}

impl HermeticSessionBuilder {
    /// Create a new hermetic session builder
    pub fn new() -> Result<Self> {
        Ok(Self {
            test_env: TestEnvironment::new()?,
            app_config: AppConfig::default(),
            destination: None,
            action: Action::Export,
        })
    }

    /// Add a mock executable to the test environment
    pub fn with_mock_executable(mut self, name: &str, behavior: MockBehavior) -> Result<Self> {
        self.test_env.add_mock_executable(name, behavior)?;
        Ok(self)
    }

    /// Lay out a mod source and export from it
    pub fn with_mod_source(mut self, mod_name: &str, version: &str) -> Result<Self> {
        let source = self.test_env.init_mod_source(mod_name, version)?;
        self.app_config.source = Some(source);
        Ok(self)
    }

    /// Create a mods directory and pass it as the explicit destination
    pub fn with_mods_dir(mut self) -> Result<Self> {
        self.destination = Some(self.test_env.init_mods_dir()?);
        Ok(self)
    }

    /// Pass an explicit destination, which need not exist
    pub fn with_destination(mut self, destination: &Path) -> Self {
        self.destination = Some(destination.to_path_buf());
        self
    }

    pub fn without_archive(mut self) -> Self {
        self.app_config.no_archive = true;
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.action = action;
        self
    }

    /// Get a reference to the test environment
    pub fn test_env(&self) -> &TestEnvironment {
        &self.test_env
    }

    /// Build the session, its captured output and the CLI configuration
    ///
    /// The process provider sees only the mock bin directory on its PATH.
    pub fn build(self) -> HermeticSession {
        let (display, output) = StatusDisplay::capturing();
        let session = CommandSession::new_with_providers(
            self.app_config.clone(),
            display,
            LiveProcessProvider::with_custom_path(self.test_env.bin_path.as_os_str()),
        );

        HermeticSession {
            config: CliConfig {
                app_config: self.app_config,
                env_config: EnvironmentConfig::default(),
                destination: self.destination,
                action: self.action,
            },
            session,
            output,
            test_env: self.test_env,
        }
    }
}

/// A built hermetic session with everything needed to run and inspect it
pub struct HermeticSession {
    pub config: CliConfig,
    pub session: CommandSession<LiveProcessProvider>,
    pub output: CapturedOutput,
    pub test_env: TestEnvironment,
}
