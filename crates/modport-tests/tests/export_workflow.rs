//! E2E tests for the export workflow
//!
//! Each test runs the full command against a hermetic environment: a real
//! mod source on disk, a real mods directory and a PATH holding only mocks.

use anyhow::Result;
use modport_lib::application::commands::execute_command_with_session;
use modport_lib::testing::relative_files;
use modport_tests::{HermeticSessionBuilder, archive_entries, archive_manifest, manifest_version};

const SHIPPED: &[&str] = &[
    "control.lua",
    "data.lua",
    "graphics/icon.png",
    "info.json",
    "locale/en/locale.cfg",
];

#[test]
fn e2e_export_copies_filtered_tree_and_archives() -> Result<()> {
    let env = HermeticSessionBuilder::new()?
        .with_mod_source("SampleMod", "1.1.0007")?
        .with_mods_dir()?
        .build();

    execute_command_with_session(&env.config, &env.session)?;

    let mods = env.test_env.path("work/game/mods");
    assert_eq!(relative_files(&mods.join("SampleMod")), SHIPPED);

    let archive = mods.join("SampleMod_1.1.0001.zip");
    let mut entries = archive_entries(&archive)?;
    entries.sort();
    let expected: Vec<String> = SHIPPED.iter().map(|f| format!("SampleMod/{}", f)).collect();
    assert_eq!(entries, expected);

    assert_eq!(archive_manifest(&archive, "SampleMod")?["version"], "1.1.0001");
    assert_eq!(
        manifest_version(&env.test_env.path("work/src/info.json"))?,
        "1.1.0001"
    );
    assert_eq!(
        manifest_version(&mods.join("SampleMod").join("info.json"))?,
        "1.1.0001"
    );

    let lines = env.output.lines();
    assert!(lines.contains(&"✓ Version: 1.1.0001".to_string()));
    Ok(())
}

#[test]
fn e2e_repeated_exports_allocate_consecutive_versions() -> Result<()> {
    let env = HermeticSessionBuilder::new()?
        .with_mod_source("SampleMod", "1.1.0001")?
        .with_mods_dir()?
        .build();
    let mods = env.test_env.path("work/game/mods");

    execute_command_with_session(&env.config, &env.session)?;
    std::fs::write(mods.join("SampleMod").join("leftover.lua"), "-- stale\n")?;
    execute_command_with_session(&env.config, &env.session)?;

    assert!(mods.join("SampleMod_1.1.0001.zip").is_file());
    assert!(mods.join("SampleMod_1.1.0002.zip").is_file());
    assert_eq!(relative_files(&mods.join("SampleMod")), SHIPPED);
    assert_eq!(
        manifest_version(&env.test_env.path("work/src/info.json"))?,
        "1.1.0002"
    );
    Ok(())
}

#[test]
fn e2e_legacy_archives_do_not_affect_allocation() -> Result<()> {
    let env = HermeticSessionBuilder::new()?
        .with_mod_source("SampleMod", "1.1.0001")?
        .with_mods_dir()?
        .build();
    let mods = env.test_env.path("work/game/mods");
    for legacy in [
        "SampleMod_1.1.55.zip",
        "SampleMod_2.0.0009.zip",
        "SampleMod_1.1.abcd.zip",
        "OtherMod_1.1.0042.zip",
    ] {
        std::fs::write(mods.join(legacy), "")?;
    }
    std::fs::write(mods.join("SampleMod_1.1.0003.zip"), "")?;

    execute_command_with_session(&env.config, &env.session)?;

    assert!(mods.join("SampleMod_1.1.0004.zip").is_file());
    Ok(())
}

#[test]
fn e2e_archive_root_follows_mod_name() -> Result<()> {
    let env = HermeticSessionBuilder::new()?
        .with_mod_source("PollutionSolutionsLite", "1.1.0001")?
        .with_mods_dir()?
        .build();

    execute_command_with_session(&env.config, &env.session)?;

    let archive = env
        .test_env
        .path("work/game/mods/PollutionSolutionsLite_1.1.0001.zip");
    let entries = archive_entries(&archive)?;
    assert!(!entries.is_empty());
    assert!(
        entries
            .iter()
            .all(|entry| entry.starts_with("PollutionSolutionsLite/"))
    );
    Ok(())
}

#[test]
fn e2e_no_archive_leaves_source_untouched() -> Result<()> {
    let env = HermeticSessionBuilder::new()?
        .with_mod_source("SampleMod", "1.1.0005")?
        .with_mods_dir()?
        .without_archive()
        .build();

    execute_command_with_session(&env.config, &env.session)?;

    let mods = env.test_env.path("work/game/mods");
    assert!(mods.join("SampleMod").join("info.json").is_file());
    assert!(!mods.join("SampleMod_1.1.0001.zip").exists());
    assert_eq!(
        manifest_version(&env.test_env.path("work/src/info.json"))?,
        "1.1.0005"
    );
    assert!(env.output.lines().contains(&"· Archiving skipped".to_string()));
    Ok(())
}

#[test]
fn e2e_missing_destination_writes_nothing() -> Result<()> {
    let builder = HermeticSessionBuilder::new()?.with_mod_source("SampleMod", "1.1.0001")?;
    let missing = builder.test_env().path("work/nowhere");
    let env = builder.with_destination(&missing).build();
    let before = relative_files(&env.test_env.path("work/src"));

    let result = execute_command_with_session(&env.config, &env.session);

    assert!(result.is_err());
    assert!(!missing.exists());
    assert_eq!(relative_files(&env.test_env.path("work/src")), before);
    assert_eq!(
        manifest_version(&env.test_env.path("work/src/info.json"))?,
        "1.1.0001"
    );
    Ok(())
}
