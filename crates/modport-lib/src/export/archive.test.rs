use super::*;
use crate::export::VersionScheme;
use crate::testing::TempDirFixture;
use std::io::Read;

fn archiver(mod_name: &str, source_dir: &Path) -> Archiver {
    let scheme = VersionScheme::default();
    Archiver::new(
        mod_name,
        source_dir,
        VersionAllocator::new(mod_name, scheme),
        ManifestStore::new(scheme),
    )
}

fn entry_names(path: &Path) -> Vec<String> {
    let archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
    let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
    names.sort();
    names
}

fn manifest_version(path: &Path) -> String {
    ManifestStore::default().read_version(path)
}

/// Source tree plus an exported copy at `<fixture>/mods/<exported_name>`
fn exported(fixture: &TempDirFixture, exported_name: &str) -> (PathBuf, PathBuf) {
    let source = fixture.mod_source("src", "SampleMod", "1.1.0001").unwrap();
    let mods = fixture.mods_dir("game").unwrap();
    let dir = mods.join(exported_name);
    fixture
        .write_file(
            &format!("game/mods/{}/info.json", exported_name),
            &crate::testing::sample_manifest("SampleMod", "1.1.0001"),
        )
        .unwrap();
    fixture
        .write_file(&format!("game/mods/{}/control.lua", exported_name), "-- control\n")
        .unwrap();
    fixture
        .write_file(
            &format!("game/mods/{}/locale/en/locale.cfg", exported_name),
            "[mod-name]\n",
        )
        .unwrap();
    (source, dir)
}

#[test]
fn test_first_archive_uses_seed_version() {
    let fixture = TempDirFixture::new().unwrap();
    let (source, dir) = exported(&fixture, "SampleMod");

    let outcome = archiver("SampleMod", &source).create_archive(&dir);

    assert_eq!(outcome.version, "1.1.0001");
    let artifact = outcome.result.as_ref().unwrap();
    assert_eq!(artifact.name, "SampleMod_1.1.0001.zip");
    assert_eq!(artifact.path, fixture.path().join("game/mods/SampleMod_1.1.0001.zip"));
    assert!(artifact.size > 0);
    assert!(outcome.source_manifest.is_updated());
    assert!(outcome.exported_manifest.is_updated());
}

#[test]
fn test_archive_entries_live_under_mod_name() {
    let fixture = TempDirFixture::new().unwrap();
    let (source, dir) = exported(&fixture, "SampleMod");

    let outcome = archiver("SampleMod", &source).create_archive(&dir);

    assert_eq!(
        entry_names(&outcome.archive_path),
        vec![
            "SampleMod/control.lua",
            "SampleMod/info.json",
            "SampleMod/locale/en/locale.cfg",
        ]
    );
}

#[test]
fn test_archive_root_ignores_exported_directory_name() {
    let fixture = TempDirFixture::new().unwrap();
    let (source, dir) = exported(&fixture, "staging-copy");

    let outcome = archiver("SampleMod", &source).create_archive(&dir);

    assert!(
        entry_names(&outcome.archive_path)
            .iter()
            .all(|name| name.starts_with("SampleMod/"))
    );
}

#[test]
fn test_manifests_carry_allocated_version() {
    let fixture = TempDirFixture::new().unwrap();
    let (source, dir) = exported(&fixture, "SampleMod");
    fixture.write_file("game/mods/SampleMod_1.1.0004.zip", "").unwrap();

    let outcome = archiver("SampleMod", &source).create_archive(&dir);

    assert_eq!(outcome.version, "1.1.0005");
    assert_eq!(manifest_version(&source.join(MANIFEST_FILE)), "1.1.0005");
    assert_eq!(manifest_version(&dir.join(MANIFEST_FILE)), "1.1.0005");

    // The manifest inside the archive was stamped before zipping
    let mut archive = zip::ZipArchive::new(File::open(&outcome.archive_path).unwrap()).unwrap();
    let mut content = String::new();
    archive
        .by_name("SampleMod/info.json")
        .unwrap()
        .read_to_string(&mut content)
        .unwrap();
    assert!(content.contains("\"version\": \"1.1.0005\""));
}

#[test]
fn test_consecutive_archives_increment_patch() {
    let fixture = TempDirFixture::new().unwrap();
    let (source, dir) = exported(&fixture, "SampleMod");
    let archiver = archiver("SampleMod", &source);

    let first = archiver.create_archive(&dir);
    let second = archiver.create_archive(&dir);

    assert_eq!(first.version, "1.1.0001");
    assert_eq!(second.version, "1.1.0002");
    assert!(fixture.file_exists("game/mods/SampleMod_1.1.0001.zip"));
    assert!(fixture.file_exists("game/mods/SampleMod_1.1.0002.zip"));
}

#[test]
fn test_missing_source_manifest_does_not_block_archive() {
    let fixture = TempDirFixture::new().unwrap();
    let (_, dir) = exported(&fixture, "SampleMod");
    let elsewhere = fixture.create_dir("no-manifest").unwrap();

    let outcome = archiver("SampleMod", &elsewhere).create_archive(&dir);

    assert!(matches!(outcome.source_manifest, ManifestUpdate::Failed { .. }));
    assert!(outcome.exported_manifest.is_updated());
    assert!(outcome.is_success());
}

#[test]
fn test_unwritable_target_reports_failure_and_leaves_no_file() {
    let fixture = TempDirFixture::new().unwrap();
    let (source, _) = exported(&fixture, "SampleMod");
    let missing = fixture.path().join("absent").join("SampleMod");

    let outcome = archiver("SampleMod", &source).create_archive(&missing);

    assert!(!outcome.is_success());
    assert!(!outcome.archive_path.exists());
    // Source manifest was still stamped
    assert!(outcome.source_manifest.is_updated());
}

#[cfg(unix)]
#[test]
fn test_unix_permissions_are_recorded() {
    use std::os::unix::fs::PermissionsExt;

    let fixture = TempDirFixture::new().unwrap();
    let (source, dir) = exported(&fixture, "SampleMod");
    fixture.write_file("game/mods/SampleMod/tool.sh", "#!/bin/sh\n").unwrap();
    fs::set_permissions(dir.join("tool.sh"), fs::Permissions::from_mode(0o755)).unwrap();

    let outcome = archiver("SampleMod", &source).create_archive(&dir);

    let mut archive = zip::ZipArchive::new(File::open(&outcome.archive_path).unwrap()).unwrap();
    let entry = archive.by_name("SampleMod/tool.sh").unwrap();
    assert_eq!(entry.unix_mode().map(|mode| mode & 0o777), Some(0o755));
}
