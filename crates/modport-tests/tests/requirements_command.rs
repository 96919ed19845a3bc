//! E2E tests for the requirements command
//!
//! These tests put mock tools on a hermetic PATH to verify that modport
//! reports what the export can rely on.
#![cfg(unix)]

use anyhow::Result;
use modport_lib::application::cli::Action;
use modport_lib::application::commands::execute_command_with_session;
use modport_tests::{HermeticSessionBuilder, MockBehavior};

#[test]
fn e2e_requirements_reports_rsync_version() -> Result<()> {
    let env = HermeticSessionBuilder::new()?
        .with_mock_executable(
            "rsync",
            MockBehavior::SucceedWithOutput {
                stdout: "rsync  version 3.2.7  protocol version 31".to_string(),
            },
        )?
        .with_mod_source("SampleMod", "1.1.0001")?
        .with_action(Action::Requirements)
        .build();

    execute_command_with_session(&env.config, &env.session)?;

    assert_eq!(env.test_env.get_mock_calls("rsync")?, ["rsync --version"]);
    assert!(
        env.output
            .lines()
            .contains(&"✓ rsync: rsync  version 3.2.7  protocol version 31".to_string())
    );
    Ok(())
}

#[test]
fn e2e_requirements_without_tools_still_succeeds() -> Result<()> {
    let env = HermeticSessionBuilder::new()?
        .with_mod_source("SampleMod", "1.1.0001")?
        .with_action(Action::Requirements)
        .build();

    execute_command_with_session(&env.config, &env.session)?;

    let lines = env.output.lines();
    assert!(lines.contains(&"✗ rsync: not found".to_string()));
    assert!(lines.iter().any(|line| line.contains("mods directory")));
    Ok(())
}
