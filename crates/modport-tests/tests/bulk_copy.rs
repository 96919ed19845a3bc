//! E2E tests for the bulk copy path
//!
//! A mock `rsync` on the hermetic PATH records its arguments, so these tests
//! check what the export asks of the copy tool and how it recovers when the
//! tool misbehaves.
#![cfg(unix)]

use anyhow::Result;
use modport_lib::application::commands::execute_command_with_session;
use modport_lib::testing::relative_files;
use modport_tests::{HermeticSessionBuilder, MockBehavior};

#[test]
fn e2e_failing_rsync_falls_back_to_manual_copy() -> Result<()> {
    let env = HermeticSessionBuilder::new()?
        .with_mock_executable(
            "rsync",
            MockBehavior::AlwaysFail {
                code: 23,
                error: "rsync error: some files could not be transferred".to_string(),
            },
        )?
        .with_mod_source("SampleMod", "1.1.0001")?
        .with_mods_dir()?
        .build();

    execute_command_with_session(&env.config, &env.session)?;

    let calls = env.test_env.get_mock_calls("rsync")?;
    assert_eq!(calls.len(), 1);
    assert!(calls[0].starts_with("rsync -a "));
    assert!(calls[0].contains("--exclude=.git"));
    assert!(calls[0].contains("--exclude=*.zip"));

    let exported = env.test_env.path("work/game/mods/SampleMod");
    assert_eq!(
        relative_files(&exported),
        [
            "control.lua",
            "data.lua",
            "graphics/icon.png",
            "info.json",
            "locale/en/locale.cfg",
        ]
    );
    assert!(
        env.output
            .lines()
            .iter()
            .any(|line| line.starts_with("✓ Exported") && line.contains("via manual"))
    );
    Ok(())
}

#[test]
fn e2e_rsync_that_copies_nothing_fails_verification() -> Result<()> {
    let env = HermeticSessionBuilder::new()?
        .with_mock_executable("rsync", MockBehavior::AlwaysSucceed)?
        .with_mod_source("SampleMod", "1.1.0001")?
        .with_mods_dir()?
        .build();

    let result = execute_command_with_session(&env.config, &env.session);

    assert!(result.is_err());
    assert!(
        !env.test_env
            .path("work/game/mods/SampleMod_1.1.0001.zip")
            .exists()
    );
    assert!(
        env.output
            .lines()
            .iter()
            .any(|line| line.starts_with("✗ Export failed:"))
    );
    Ok(())
}

#[test]
fn e2e_no_rsync_on_path_uses_manual_copy() -> Result<()> {
    let env = HermeticSessionBuilder::new()?
        .with_mod_source("SampleMod", "1.1.0001")?
        .with_mods_dir()?
        .build();

    execute_command_with_session(&env.config, &env.session)?;

    assert!(
        env.test_env
            .path("work/game/mods/SampleMod/info.json")
            .is_file()
    );
    assert!(
        env.output
            .lines()
            .iter()
            .any(|line| line.contains("via manual"))
    );
    Ok(())
}
