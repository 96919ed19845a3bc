use super::*;
use tempfile::TempDir;

const MANIFEST: &str = r#"{
  "name": "PollutionSolutionsLite",
  "version": "1.1.0004",
  "title": "Pollution Solutions Lite",
  "author": "someone",
  "factorio_version": "2.0",
  "dependencies": ["base >= 2.0", "? space-age"]
}"#;

fn write_manifest(dir: &Path, content: &str) -> std::path::PathBuf {
    let path = dir.join(MANIFEST_FILE);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_read_version() {
    let temp = TempDir::new().unwrap();
    let path = write_manifest(temp.path(), MANIFEST);

    assert_eq!(ManifestStore::default().read_version(&path), "1.1.0004");
}

#[test]
fn test_read_version_falls_back_to_seed() {
    let temp = TempDir::new().unwrap();
    let store = ManifestStore::default();

    assert_eq!(store.read_version(&temp.path().join("missing.json")), "1.1.0001");

    let invalid = write_manifest(temp.path(), "{ not json");
    assert_eq!(store.read_version(&invalid), "1.1.0001");

    let numeric = write_manifest(temp.path(), r#"{"version": 3}"#);
    assert_eq!(store.read_version(&numeric), "1.1.0001");
}

#[test]
fn test_read_name() {
    let temp = TempDir::new().unwrap();
    let store = ManifestStore::default();

    let path = write_manifest(temp.path(), MANIFEST);
    assert_eq!(store.read_name(&path).as_deref(), Some("PollutionSolutionsLite"));

    let unnamed = write_manifest(temp.path(), r#"{"name": ""}"#);
    assert_eq!(store.read_name(&unnamed), None);
}

#[test]
fn test_write_version_preserves_other_keys_and_order() {
    let temp = TempDir::new().unwrap();
    let path = write_manifest(temp.path(), MANIFEST);

    let update = ManifestStore::default().write_version(&path, "1.1.0005");

    assert_eq!(
        update,
        ManifestUpdate::Updated {
            previous: Some("1.1.0004".to_string())
        }
    );

    let written = fs::read_to_string(&path).unwrap();
    let value: Value = serde_json::from_str(&written).unwrap();
    let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec![
            "name",
            "version",
            "title",
            "author",
            "factorio_version",
            "dependencies"
        ]
    );
    assert_eq!(value["version"], "1.1.0005");
    assert_eq!(value["title"], "Pollution Solutions Lite");
    assert_eq!(value["dependencies"][1], "? space-age");
}

#[test]
fn test_write_version_uses_tab_indentation() {
    let temp = TempDir::new().unwrap();
    let path = write_manifest(temp.path(), r#"{"name":"M","version":"1.1.0001"}"#);

    ManifestStore::default().write_version(&path, "1.1.0002");

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "{\n\t\"name\": \"M\",\n\t\"version\": \"1.1.0002\"\n}"
    );
}

#[test]
fn test_write_version_adds_missing_field() {
    let temp = TempDir::new().unwrap();
    let path = write_manifest(temp.path(), r#"{"name":"M"}"#);

    let update = ManifestStore::default().write_version(&path, "1.1.0001");

    assert_eq!(update, ManifestUpdate::Updated { previous: None });
    assert_eq!(ManifestStore::default().read_version(&path), "1.1.0001");
}

#[test]
fn test_write_version_failures_are_values() {
    let temp = TempDir::new().unwrap();
    let store = ManifestStore::default();

    let missing = store.write_version(&temp.path().join("absent.json"), "1.1.0002");
    assert!(matches!(missing, ManifestUpdate::Failed { .. }));

    let invalid = write_manifest(temp.path(), "[1, 2, 3]");
    let update = store.write_version(&invalid, "1.1.0002");
    assert!(!update.is_updated());
    // Untouched on failure
    assert_eq!(fs::read_to_string(&invalid).unwrap(), "[1, 2, 3]");
}
