use super::*;
use crate::testing::TempDirFixture;

const FULL_CONFIG: &str = r#"
# Export settings
export:
  mods_directory: "~/games/factorio/mods"
  mod_name: ConfiguredName
  exclude:
    - ".git"
    - "*.psd"
  extra_exclude:
    - "notes.txt"
  bulk_copy: false
  patch_width: 3
factorio_bin: /opt/factorio/bin/x64/factorio
common_paths:
  - /usr/local/bin/factorio
validation:
  sprite_checks: true
"#;

fn app_for(source: &Path) -> AppConfig {
    AppConfig {
        source: Some(source.to_path_buf()),
        ..AppConfig::default()
    }
}

#[test]
fn test_parse_full_config() {
    let file = ConfigFile::parse(FULL_CONFIG).unwrap();

    assert_eq!(file.export.mods_directory.as_deref(), Some("~/games/factorio/mods"));
    assert_eq!(file.export.mod_name.as_deref(), Some("ConfiguredName"));
    assert_eq!(
        file.export.exclude,
        Some(vec![".git".to_string(), "*.psd".to_string()])
    );
    assert_eq!(file.export.extra_exclude, vec!["notes.txt".to_string()]);
    assert_eq!(file.export.bulk_copy, Some(false));
    assert_eq!(file.export.patch_width, Some(3));
    assert_eq!(file.factorio_bin.as_deref(), Some("/opt/factorio/bin/x64/factorio"));
    assert_eq!(file.common_paths, vec!["/usr/local/bin/factorio".to_string()]);
}

#[test]
fn test_parse_blank_and_partial_configs() {
    assert_eq!(ConfigFile::parse("").unwrap(), ConfigFile::default());
    assert_eq!(ConfigFile::parse("# only a comment\n").unwrap(), ConfigFile::default());

    let partial = ConfigFile::parse("export:\nfactorio_bin: /bin/factorio\n").unwrap();
    assert_eq!(partial.export, ExportSection::default());
    assert_eq!(partial.factorio_bin.as_deref(), Some("/bin/factorio"));
}

#[test]
fn test_parse_rejects_wrong_types() {
    assert!(ConfigFile::parse("export:\n  bulk_copy: [1, 2]\n").is_err());
}

#[test]
fn test_discover_prefers_scripts_export_config() {
    let fixture = TempDirFixture::new().unwrap();
    fixture
        .write_file("scripts/export_config.yaml", "export:\n  mod_name: First\n")
        .unwrap();
    fixture
        .write_file("scripts/validate_config.yaml", "export:\n  mod_name: Second\n")
        .unwrap();
    fixture
        .write_file("export_config.yaml", "export:\n  mod_name: Third\n")
        .unwrap();

    let file = ConfigFile::discover(None, fixture.path()).unwrap();

    assert_eq!(file.export.mod_name.as_deref(), Some("First"));
    assert_eq!(
        file.path,
        Some(fixture.path().join("scripts/export_config.yaml"))
    );
}

#[test]
fn test_discover_falls_back_to_validate_config() {
    let fixture = TempDirFixture::new().unwrap();
    fixture
        .write_file("scripts/validate_config.yaml", "factorio_bin: /x/factorio\n")
        .unwrap();

    let file = ConfigFile::discover(None, fixture.path()).unwrap();

    assert_eq!(file.factorio_bin.as_deref(), Some("/x/factorio"));
}

#[test]
fn test_discover_without_any_file_is_default() {
    let fixture = TempDirFixture::new().unwrap();

    let file = ConfigFile::discover(None, fixture.path()).unwrap();

    assert_eq!(file, ConfigFile::default());
}

#[test]
fn test_discover_ignores_invalid_file_with_warning() {
    let fixture = TempDirFixture::new().unwrap();
    fixture
        .write_file("scripts/export_config.yaml", "export: [unclosed\n")
        .unwrap();

    let file = ConfigFile::discover(None, fixture.path()).unwrap();

    assert_eq!(file.export, ExportSection::default());
    assert!(file.ignored.is_some());
}

#[test]
fn test_discover_explicit_missing_file_is_error() {
    let fixture = TempDirFixture::new().unwrap();
    let missing = fixture.path().join("nope.yaml");

    let err = ConfigFile::discover(Some(&missing), fixture.path()).unwrap_err();

    assert!(matches!(err, ConfigError::ConfigFileUnreadable { .. }));
}

#[test]
fn test_discover_explicit_file_wins() {
    let fixture = TempDirFixture::new().unwrap();
    fixture
        .write_file("scripts/export_config.yaml", "export:\n  mod_name: Discovered\n")
        .unwrap();
    fixture
        .write_file("custom.yaml", "export:\n  mod_name: Explicit\n")
        .unwrap();

    let file =
        ConfigFile::discover(Some(&fixture.path().join("custom.yaml")), fixture.path()).unwrap();

    assert_eq!(file.export.mod_name.as_deref(), Some("Explicit"));
}

#[test]
fn test_from_sources_merges_file_and_flags() {
    let fixture = TempDirFixture::new().unwrap();
    let source = fixture.mod_source("src", "ManifestName", "1.1.0001").unwrap();
    let file = ConfigFile::parse(FULL_CONFIG).unwrap();

    let config = ExportConfig::from_sources(&app_for(&source), &file, None).unwrap();

    assert_eq!(config.source_dir, source);
    assert_eq!(config.mod_name, "ConfiguredName");
    assert_eq!(config.scheme.patch_width, 3);
    assert!(!config.bulk_copy);
    assert!(config.archive);
    assert_eq!(
        config.filter.patterns(),
        &[".git".to_string(), "*.psd".to_string(), "notes.txt".to_string()]
    );
    assert_eq!(config.mods_directory.as_deref(), Some("~/games/factorio/mods"));
}

#[test]
fn test_from_sources_cli_overrides() {
    let fixture = TempDirFixture::new().unwrap();
    let source = fixture.mod_source("src", "ManifestName", "1.1.0001").unwrap();
    let file = ConfigFile::parse(FULL_CONFIG).unwrap();
    let app = AppConfig {
        mod_name: Some("FromCli".to_string()),
        no_archive: true,
        ..app_for(&source)
    };

    let config = ExportConfig::from_sources(&app, &file, None).unwrap();

    assert_eq!(config.mod_name, "FromCli");
    assert!(!config.archive);
}

#[test]
fn test_mod_name_from_manifest_then_directory() {
    let fixture = TempDirFixture::new().unwrap();
    let source = fixture.mod_source("src", "ManifestName", "1.1.0001").unwrap();

    let config =
        ExportConfig::from_sources(&app_for(&source), &ConfigFile::default(), None).unwrap();
    assert_eq!(config.mod_name, "ManifestName");
    assert_eq!(config.filter, ExcludeFilter::default());
    assert!(config.bulk_copy);

    let bare = fixture.create_dir("BareDirectoryMod").unwrap();
    let config = ExportConfig::from_sources(&app_for(&bare), &ConfigFile::default(), None).unwrap();
    assert_eq!(config.mod_name, "BareDirectoryMod");
}

#[test]
fn test_invalid_patch_width_is_rejected() {
    let fixture = TempDirFixture::new().unwrap();
    let file = ConfigFile::parse("export:\n  patch_width: 12\n").unwrap();

    let err = ExportConfig::from_sources(&app_for(fixture.path()), &file, None).unwrap_err();

    assert!(matches!(err, ConfigError::ValidationFailed { .. }));
}

#[test]
fn test_mod_name_with_separator_is_rejected() {
    let fixture = TempDirFixture::new().unwrap();
    let app = AppConfig {
        mod_name: Some("../escape".to_string()),
        ..app_for(fixture.path())
    };

    let err = ExportConfig::from_sources(&app, &ConfigFile::default(), None).unwrap_err();

    assert!(matches!(err, ConfigError::ValidationFailed { .. }));
}
