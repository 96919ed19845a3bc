//! Mock implementations of session providers for testing
//!
//! These mocks enable testing of the copy strategies and command handlers
//! without spawning real processes.

use crate::Result;
use crate::application::session::{ProcessOutput, ProcessProvider};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Record of a single process invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessCall {
    pub command: String,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
}

/// Mock process provider for testing with spy pattern
#[derive(Debug, Default)]
pub struct MockProcessProvider {
    /// Programs reported by `find_program`
    pub programs: HashMap<String, PathBuf>,
    pub calls: RefCell<Vec<ProcessCall>>,
    /// Results keyed by command name; unmatched commands succeed with empty output
    pub results: HashMap<String, std::result::Result<ProcessOutput, String>>,
}

impl MockProcessProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `program` as installed at `/usr/bin/<program>`
    pub fn with_program(mut self, program: &str) -> Self {
        self.programs.insert(
            program.to_string(),
            PathBuf::from("/usr/bin").join(program),
        );
        self
    }

    pub fn with_result(
        mut self,
        command: &str,
        result: std::result::Result<ProcessOutput, String>,
    ) -> Self {
        self.results.insert(command.to_string(), result);
        self
    }

    /// Make `command` exit with a non-zero status
    pub fn with_exit_code(self, command: &str, code: i32) -> Self {
        self.with_result(
            command,
            Ok(ProcessOutput {
                stdout: String::new(),
                stderr: format!("{} failed", command),
                success: false,
                code: Some(code),
            }),
        )
    }

    /// Get all recorded process calls for verification
    pub fn get_calls(&self) -> Vec<ProcessCall> {
        self.calls.borrow().clone()
    }

    /// Get calls for a specific command
    pub fn get_calls_for_command(&self, command: &str) -> Vec<ProcessCall> {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.command == command)
            .cloned()
            .collect()
    }
}

impl ProcessProvider for MockProcessProvider {
    fn execute(&self, command: &str, args: &[&str], working_dir: &Path) -> Result<ProcessOutput> {
        // Record the call for spy pattern verification
        self.calls.borrow_mut().push(ProcessCall {
            command: command.to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
            working_dir: working_dir.to_path_buf(),
        });

        match self.results.get(command) {
            Some(Ok(output)) => Ok(output.clone()),
            Some(Err(e)) => Err(anyhow::anyhow!("{}", e)),
            None => Ok(ProcessOutput {
                stdout: String::new(),
                stderr: String::new(),
                success: true,
                code: Some(0),
            }),
        }
    }

    fn find_program(&self, program: &str) -> Option<PathBuf> {
        self.programs.get(program).cloned()
    }
}
