use super::*;
use std::fs;
use tempfile::TempDir;

fn fake_program(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    path
}

#[test]
fn test_find_in_locates_program_on_search_path() {
    let temp = TempDir::new().unwrap();
    let expected = fake_program(temp.path(), "rsync");

    let info = ProgramFinder::find_in("rsync", Some(temp.path().as_os_str()));

    assert!(info.available);
    assert_eq!(info.name, "rsync");
    assert_eq!(info.path, Some(expected));
}

#[test]
fn test_find_in_reports_missing_program() {
    let temp = TempDir::new().unwrap();

    let info = ProgramFinder::find_in("definitely-not-here", Some(temp.path().as_os_str()));

    assert!(!info.available);
    assert_eq!(info.path, None);
}

#[test]
fn test_find_in_without_search_path() {
    let info = ProgramFinder::find_in("rsync", None);
    assert!(!info.available);
}

#[cfg(unix)]
#[test]
fn test_non_executable_file_is_not_a_program() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("rsync"), "not a program").unwrap();

    let info = ProgramFinder::find_in("rsync", Some(temp.path().as_os_str()));
    assert!(!info.available);
}

#[test]
fn test_factorio_detect_prefers_configured_binary() {
    let temp = TempDir::new().unwrap();
    let configured = fake_program(temp.path(), "factorio");
    let other = TempDir::new().unwrap();
    let listed = fake_program(other.path(), "factorio");

    let info = FactorioCapabilities::detect(
        Some(&configured),
        &[listed.display().to_string()],
    );

    assert!(info.available);
    assert_eq!(info.path, Some(configured));
}

#[test]
fn test_factorio_detect_falls_back_to_common_paths() {
    let temp = TempDir::new().unwrap();
    let listed = fake_program(temp.path(), "factorio");
    let missing = temp.path().join("nope").join("factorio");

    let info = FactorioCapabilities::detect(
        Some(&missing),
        &[
            temp.path().join("absent").display().to_string(),
            listed.display().to_string(),
        ],
    );

    assert!(info.available);
    assert_eq!(info.path, Some(listed));
}
