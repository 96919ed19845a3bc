use super::*;
use crate::application::session::LiveProcessProvider;
use crate::application::session_mocks::MockProcessProvider;
use crate::testing::{TempDirFixture, relative_files};

const SHIPPED: &[&str] = &[
    "control.lua",
    "data.lua",
    "graphics/icon.png",
    "info.json",
    "locale/en/locale.cfg",
];

#[test]
fn test_manual_copy_applies_filter() {
    let fixture = TempDirFixture::new().unwrap();
    let src = fixture.mod_source("src", "SampleMod", "1.1.0001").unwrap();
    let dst = fixture.path().join("out").join("SampleMod");
    let process = MockProcessProvider::new();

    let report = TreeCopier::new(ExcludeFilter::default(), &process)
        .copy_tree(&src, &dst)
        .unwrap();

    assert_eq!(report.strategy, CopyStrategyKind::Manual);
    assert_eq!(report.files_copied, Some(SHIPPED.len() as u64));
    assert_eq!(relative_files(&dst), SHIPPED);
    assert!(process.get_calls().is_empty());
}

#[test]
fn test_source_is_not_modified() {
    let fixture = TempDirFixture::new().unwrap();
    let src = fixture.mod_source("src", "SampleMod", "1.1.0001").unwrap();
    let before = relative_files(&src);
    let process = MockProcessProvider::new();

    TreeCopier::new(ExcludeFilter::default(), &process)
        .copy_tree(&src, &fixture.path().join("out"))
        .unwrap();

    assert_eq!(relative_files(&src), before);
}

#[test]
fn test_bulk_copy_invokes_rsync_with_excludes() {
    let fixture = TempDirFixture::new().unwrap();
    let src = fixture.mod_source("src", "SampleMod", "1.1.0001").unwrap();
    let dst = fixture.path().join("out");
    let process = MockProcessProvider::new().with_program("rsync");
    let filter = ExcludeFilter::new(vec!["tests".to_string(), "*.zip".to_string()]);

    let report = TreeCopier::new(filter, &process).copy_tree(&src, &dst).unwrap();

    assert_eq!(report.strategy, CopyStrategyKind::Bulk);
    assert_eq!(report.files_copied, None);

    let calls = process.get_calls_for_command("rsync");
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].args,
        vec![
            "-a".to_string(),
            "--exclude=tests".to_string(),
            "--exclude=/tests*".to_string(),
            "--exclude=*.zip".to_string(),
            format!("{}/", src.display()),
            format!("{}/", dst.display()),
        ]
    );
    assert_eq!(calls[0].working_dir, src);
}

#[test]
fn test_rsync_operands_are_absolute() {
    let fixture = TempDirFixture::new().unwrap();
    let src = fixture.mod_source("src", "SampleMod", "1.1.0001").unwrap();
    let process = MockProcessProvider::new().with_program("rsync");
    let filter = ExcludeFilter::new(Vec::new());

    // rsync runs inside the source, so a relative destination would land there
    let args = BulkCopy::new(&filter, &process)
        .args(&src, Path::new("mods/SampleMod"))
        .unwrap()
        .unwrap();

    let cwd = std::env::current_dir().unwrap();
    assert_eq!(
        args,
        vec![
            "-a".to_string(),
            format!("{}/", src.display()),
            format!("{}/", cwd.join("mods/SampleMod").display()),
        ]
    );
}

#[test]
fn test_failing_rsync_falls_back_to_manual_copy() {
    let fixture = TempDirFixture::new().unwrap();
    let src = fixture.mod_source("src", "SampleMod", "1.1.0001").unwrap();
    let dst = fixture.path().join("out");
    let process = MockProcessProvider::new()
        .with_program("rsync")
        .with_exit_code("rsync", 23);

    let report = TreeCopier::new(ExcludeFilter::default(), &process)
        .copy_tree(&src, &dst)
        .unwrap();

    assert_eq!(report.strategy, CopyStrategyKind::Manual);
    assert_eq!(process.get_calls_for_command("rsync").len(), 1);
    assert_eq!(relative_files(&dst), SHIPPED);
}

#[test]
fn test_rsync_spawn_error_falls_back_to_manual_copy() {
    let fixture = TempDirFixture::new().unwrap();
    let src = fixture.mod_source("src", "SampleMod", "1.1.0001").unwrap();
    let dst = fixture.path().join("out");
    let process = MockProcessProvider::new()
        .with_program("rsync")
        .with_result("rsync", Err("permission denied".to_string()));

    let report = TreeCopier::new(ExcludeFilter::default(), &process)
        .copy_tree(&src, &dst)
        .unwrap();

    assert_eq!(report.strategy, CopyStrategyKind::Manual);
    assert_eq!(relative_files(&dst), SHIPPED);
}

#[test]
fn test_bulk_copy_disabled_skips_probe() {
    let fixture = TempDirFixture::new().unwrap();
    let src = fixture.mod_source("src", "SampleMod", "1.1.0001").unwrap();
    let process = MockProcessProvider::new().with_program("rsync");

    let report = TreeCopier::new(ExcludeFilter::default(), &process)
        .with_bulk_copy(false)
        .copy_tree(&src, &fixture.path().join("out"))
        .unwrap();

    assert_eq!(report.strategy, CopyStrategyKind::Manual);
    assert!(process.get_calls().is_empty());
}

#[test]
fn test_missing_source_is_io_error() {
    let fixture = TempDirFixture::new().unwrap();
    let process = MockProcessProvider::new();
    let missing = fixture.path().join("absent");

    let err = TreeCopier::new(ExcludeFilter::default(), &process)
        .copy_tree(&missing, &fixture.path().join("out"))
        .unwrap_err();

    match err {
        ExportError::Io { path, .. } => assert_eq!(path, missing),
        other => panic!("Expected Io error, got {:?}", other),
    }
}

#[cfg(unix)]
#[test]
fn test_manual_copy_keeps_permissions_and_links() {
    use std::os::unix::fs::{PermissionsExt, symlink};

    let fixture = TempDirFixture::new().unwrap();
    let src = fixture.mod_source("src", "SampleMod", "1.1.0001").unwrap();
    fixture.write_file("src/tool.sh", "#!/bin/sh\n").unwrap();
    fs::set_permissions(src.join("tool.sh"), fs::Permissions::from_mode(0o755)).unwrap();
    fixture.write_file("elsewhere/big.bin", "x").unwrap();
    let elsewhere = fixture.path().join("elsewhere");
    symlink(&elsewhere, src.join("linked")).unwrap();
    symlink("control.lua", src.join("alias.lua")).unwrap();

    let dst = fixture.path().join("out");
    let process = MockProcessProvider::new();
    TreeCopier::new(ExcludeFilter::default(), &process)
        .copy_tree(&src, &dst)
        .unwrap();

    let mode = fs::metadata(dst.join("tool.sh")).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o755);

    // Links stay links with their targets untouched
    assert_eq!(fs::read_link(dst.join("linked")).unwrap(), elsewhere);
    assert_eq!(fs::read_link(dst.join("alias.lua")).unwrap(), Path::new("control.lua"));
    assert_eq!(
        fs::read_to_string(dst.join("alias.lua")).unwrap(),
        "script.on_init(function() end)\n"
    );
}

#[cfg(unix)]
#[test]
fn test_real_rsync_and_manual_copy_agree_on_links() {
    use std::os::unix::fs::symlink;

    let process = LiveProcessProvider::new();
    if process.find_program("rsync").is_none() {
        return;
    }

    let fixture = TempDirFixture::new().unwrap();
    let src = fixture.mod_source("src", "SampleMod", "1.1.0001").unwrap();
    fixture.write_file("shared/sprites/a.png", "PNG").unwrap();
    symlink(fixture.path().join("shared"), src.join("sprites")).unwrap();
    let filter = ExcludeFilter::default();

    TreeCopier::new(filter.clone(), &process)
        .copy_tree(&src, &fixture.path().join("bulk"))
        .unwrap();
    TreeCopier::new(filter, &process)
        .with_bulk_copy(false)
        .copy_tree(&src, &fixture.path().join("manual"))
        .unwrap();

    for dir in ["bulk", "manual"] {
        let link = fixture.path().join(dir).join("sprites");
        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_link(&link).unwrap(), fixture.path().join("shared"));
    }
}

#[test]
fn test_real_rsync_matches_manual_copy() {
    let process = LiveProcessProvider::new();
    if process.find_program("rsync").is_none() {
        return;
    }

    let fixture = TempDirFixture::new().unwrap();
    let src = fixture.mod_source("src", "SampleMod", "1.1.0001").unwrap();
    fixture.write_file("src/docsite.lua", "-- prefix match\n").unwrap();
    fixture.write_file("src/prototypes/docs.lua", "-- kept\n").unwrap();
    fixture.write_file("src/prototypes/__pycache__/x.pyc", "").unwrap();
    let filter = ExcludeFilter::default();

    let bulk = TreeCopier::new(filter.clone(), &process)
        .copy_tree(&src, &fixture.path().join("bulk"))
        .unwrap();
    let manual = TreeCopier::new(filter, &process)
        .with_bulk_copy(false)
        .copy_tree(&src, &fixture.path().join("manual"))
        .unwrap();

    assert_eq!(bulk.strategy, CopyStrategyKind::Bulk);
    assert_eq!(manual.strategy, CopyStrategyKind::Manual);
    assert_eq!(
        relative_files(&fixture.path().join("bulk")),
        relative_files(&fixture.path().join("manual"))
    );
}
