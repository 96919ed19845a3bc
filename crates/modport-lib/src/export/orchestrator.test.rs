use super::*;
use crate::application::session_mocks::MockProcessProvider;
use crate::export::CopyStrategyKind;
use crate::platform::HostOs;
use crate::testing::{TempDirFixture, relative_files};

fn setup(fixture: &TempDirFixture) -> (ExportConfig, PathBuf) {
    let source = fixture.mod_source("src", "SampleMod", "1.1.0003").unwrap();
    let mods = fixture.mods_dir("game").unwrap();
    let config = ExportConfig {
        home: None,
        host_os: HostOs::Other,
        ..ExportConfig::new(source, "SampleMod")
    };
    (config, mods)
}

#[test]
fn test_transitions_follow_pipeline_order() {
    use ExportState::*;

    assert!(ResolvingDestination.can_transition(Validating));
    assert!(Validating.can_transition(Cleaning));
    assert!(Cleaning.can_transition(Copying));
    assert!(Copying.can_transition(Verifying));
    assert!(Verifying.can_transition(Archiving));
    assert!(Verifying.can_transition(Done));
    assert!(Archiving.can_transition(Done));
    assert!(Copying.can_transition(Failed));
}

#[test]
fn test_transitions_reject_skips_and_terminal_moves() {
    use ExportState::*;

    assert!(!ResolvingDestination.can_transition(Copying));
    assert!(!Validating.can_transition(Verifying));
    assert!(!Cleaning.can_transition(Archiving));
    assert!(!Archiving.can_transition(Copying));
    assert!(!Done.can_transition(Failed));
    assert!(!Failed.can_transition(ResolvingDestination));
    assert!(Done.is_terminal());
    assert!(!Archiving.is_terminal());
}

#[test]
fn test_full_export() {
    let fixture = TempDirFixture::new().unwrap();
    let (config, mods) = setup(&fixture);
    let process = MockProcessProvider::new();

    let mut orchestrator = ExportOrchestrator::new(&config, &process);
    let report = orchestrator.run(Some(&mods)).unwrap();

    assert_eq!(orchestrator.state(), ExportState::Done);
    assert_eq!(
        orchestrator.history(),
        &[
            ExportState::ResolvingDestination,
            ExportState::Validating,
            ExportState::Cleaning,
            ExportState::Copying,
            ExportState::Verifying,
            ExportState::Archiving,
            ExportState::Done,
        ]
    );

    assert_eq!(report.destination, mods);
    assert_eq!(report.destination_source, DestinationSource::Explicit);
    assert_eq!(report.mod_dir, mods.join("SampleMod"));
    assert_eq!(report.copy.strategy, CopyStrategyKind::Manual);
    assert_eq!(
        report.listing,
        vec!["control.lua", "data.lua", "graphics", "info.json", "locale"]
    );
    assert!(!report.listing_truncated);

    let archive = report.archive.unwrap();
    assert_eq!(archive.version, "1.1.0001");
    assert!(archive.is_success());
    assert!(fixture.file_exists("game/mods/SampleMod_1.1.0001.zip"));

    let store = ManifestStore::default();
    assert_eq!(store.read_version(&config.source_dir.join(MANIFEST_FILE)), "1.1.0001");
    assert_eq!(store.read_version(&mods.join("SampleMod").join(MANIFEST_FILE)), "1.1.0001");
}

#[test]
fn test_second_export_replaces_tree_and_bumps_patch() {
    let fixture = TempDirFixture::new().unwrap();
    let (config, mods) = setup(&fixture);
    let process = MockProcessProvider::new();

    ExportOrchestrator::new(&config, &process).run(Some(&mods)).unwrap();
    fixture.write_file("game/mods/SampleMod/stale.lua", "-- left over\n").unwrap();
    let report = ExportOrchestrator::new(&config, &process).run(Some(&mods)).unwrap();

    assert_eq!(report.archive.unwrap().version, "1.1.0002");
    assert!(!fixture.file_exists("game/mods/SampleMod/stale.lua"));
    assert!(fixture.file_exists("game/mods/SampleMod_1.1.0001.zip"));
    assert!(fixture.file_exists("game/mods/SampleMod_1.1.0002.zip"));
}

#[test]
fn test_no_archive_leaves_manifests_alone() {
    let fixture = TempDirFixture::new().unwrap();
    let (mut config, mods) = setup(&fixture);
    config.archive = false;
    let process = MockProcessProvider::new();

    let mut orchestrator = ExportOrchestrator::new(&config, &process);
    let report = orchestrator.run(Some(&mods)).unwrap();

    assert!(report.archive.is_none());
    assert!(!orchestrator.history().contains(&ExportState::Archiving));
    assert_eq!(
        ManifestStore::default().read_version(&config.source_dir.join(MANIFEST_FILE)),
        "1.1.0003"
    );
    assert!(!fixture.file_exists("game/mods/SampleMod_1.1.0001.zip"));
}

#[test]
fn test_missing_destination_fails_without_writing() {
    let fixture = TempDirFixture::new().unwrap();
    let (config, _) = setup(&fixture);
    let process = MockProcessProvider::new();
    let missing = fixture.path().join("nowhere");
    let before = relative_files(&config.source_dir);

    let mut orchestrator = ExportOrchestrator::new(&config, &process);
    let err = orchestrator.run(Some(&missing)).unwrap_err();

    assert!(matches!(err, ExportError::ValidationFailure { .. }));
    assert_eq!(orchestrator.state(), ExportState::Failed);
    assert!(!missing.exists());
    assert_eq!(relative_files(&config.source_dir), before);
    assert_eq!(
        ManifestStore::default().read_version(&config.source_dir.join(MANIFEST_FILE)),
        "1.1.0003"
    );
}

#[test]
fn test_unresolvable_destination() {
    let fixture = TempDirFixture::new().unwrap();
    let (config, _) = setup(&fixture);
    let process = MockProcessProvider::new();

    let mut orchestrator = ExportOrchestrator::new(&config, &process);
    let err = orchestrator.run(None).unwrap_err();

    assert!(matches!(err, ExportError::DestinationUnresolved));
    assert_eq!(
        orchestrator.history(),
        &[ExportState::ResolvingDestination, ExportState::Failed]
    );
}

#[test]
fn test_missing_source_fails_validation() {
    let fixture = TempDirFixture::new().unwrap();
    let mods = fixture.mods_dir("game").unwrap();
    let config = ExportConfig::new(fixture.path().join("absent"), "SampleMod");
    let process = MockProcessProvider::new();

    let err = ExportOrchestrator::new(&config, &process)
        .run(Some(&mods))
        .unwrap_err();

    assert!(matches!(err, ExportError::ValidationFailure { .. }));
}

#[test]
fn test_source_without_manifest_fails_verification() {
    let fixture = TempDirFixture::new().unwrap();
    let mods = fixture.mods_dir("game").unwrap();
    fixture.write_file("bare/control.lua", "-- no manifest\n").unwrap();
    let config = ExportConfig::new(fixture.path().join("bare"), "Bare");
    let process = MockProcessProvider::new();

    let mut orchestrator = ExportOrchestrator::new(&config, &process);
    let err = orchestrator.run(Some(&mods)).unwrap_err();

    assert!(matches!(err, ExportError::ExportVerification { .. }));
    assert_eq!(orchestrator.state(), ExportState::Failed);
    assert!(!fixture.file_exists("game/mods/Bare_1.1.0001.zip"));
}

#[test]
fn test_listing_is_truncated() {
    let fixture = TempDirFixture::new().unwrap();
    let (mut config, mods) = setup(&fixture);
    config.archive = false;
    for i in 0..8 {
        fixture.write_file(&format!("src/extra_{}.lua", i), "").unwrap();
    }
    let process = MockProcessProvider::new();

    let report = ExportOrchestrator::new(&config, &process)
        .run(Some(&mods))
        .unwrap();

    assert_eq!(report.listing.len(), 10);
    assert!(report.listing_truncated);
}

#[test]
fn test_orchestrator_runs_once() {
    let fixture = TempDirFixture::new().unwrap();
    let (config, mods) = setup(&fixture);
    let process = MockProcessProvider::new();

    let mut orchestrator = ExportOrchestrator::new(&config, &process);
    orchestrator.run(Some(&mods)).unwrap();

    assert!(matches!(
        orchestrator.run(Some(&mods)),
        Err(ExportError::InvalidArgument { .. })
    ));
}

#[test]
fn test_bulk_copy_failure_still_exports() {
    let fixture = TempDirFixture::new().unwrap();
    let (config, mods) = setup(&fixture);
    let process = MockProcessProvider::new()
        .with_program("rsync")
        .with_exit_code("rsync", 12);

    let report = ExportOrchestrator::new(&config, &process)
        .run(Some(&mods))
        .unwrap();

    assert_eq!(report.copy.strategy, CopyStrategyKind::Manual);
    assert!(fixture.file_exists("game/mods/SampleMod/info.json"));
}

#[test]
fn test_destination_that_would_replace_source_is_rejected() {
    let fixture = TempDirFixture::new().unwrap();
    let source = fixture.mod_source("SampleMod", "SampleMod", "1.1.0003").unwrap();
    let config = ExportConfig::new(source.clone(), "SampleMod");
    let process = MockProcessProvider::new();
    let before = relative_files(&source);

    let mut orchestrator = ExportOrchestrator::new(&config, &process);
    let err = orchestrator.run(Some(fixture.path())).unwrap_err();

    assert!(matches!(err, ExportError::ValidationFailure { .. }));
    assert_eq!(
        orchestrator.history(),
        &[
            ExportState::ResolvingDestination,
            ExportState::Validating,
            ExportState::Failed
        ]
    );
    assert_eq!(relative_files(&source), before);
}

#[test]
fn test_destination_inside_source_must_be_excluded() {
    let fixture = TempDirFixture::new().unwrap();
    let (config, _) = setup(&fixture);
    let process = MockProcessProvider::new();
    let inside = fixture.create_dir("src/build/mods").unwrap();

    let err = ExportOrchestrator::new(&config, &process)
        .run(Some(&inside))
        .unwrap_err();

    assert!(matches!(err, ExportError::ValidationFailure { .. }));
    assert!(!fixture.file_exists("src/build/mods/SampleMod"));
}

#[test]
fn test_excluded_factorio_directory_inside_source_is_allowed() {
    let fixture = TempDirFixture::new().unwrap();
    let (config, _) = setup(&fixture);
    let process = MockProcessProvider::new();
    let mods = fixture.create_dir("src/factorio/mods").unwrap();

    let report = ExportOrchestrator::new(&config, &process)
        .run(Some(&mods))
        .unwrap();

    assert_eq!(report.mod_dir, mods.join("SampleMod"));
    assert!(!relative_files(&report.mod_dir)
        .iter()
        .any(|file| file.starts_with("factorio")));
}
