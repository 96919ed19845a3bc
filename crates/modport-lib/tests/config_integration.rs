use modport_lib::application::config::AppConfig;
use modport_lib::export::{ConfigFile, DestinationResolver, DestinationSource, ExportConfig};
use modport_lib::primitives::{ColorIntent, ConfigError};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn test_config_default_creation() {
    let config = AppConfig::default();

    assert!(config.log_level <= 4);
    assert!(!config.no_archive);
    assert_eq!(config.color, ColorIntent::Auto);
}

#[test]
fn test_config_merging_integration() {
    let base_config = AppConfig {
        mod_name: Some("FromBase".to_string()),
        ..AppConfig::default()
    };
    let override_config = AppConfig {
        log_level: 3,
        no_bulk_copy: true,
        color: ColorIntent::Never,
        ..AppConfig::default()
    };

    let merged = base_config.merge_with(override_config);

    // Override values should be preserved
    assert_eq!(merged.log_level, 3);
    assert!(merged.no_bulk_copy);
    assert_eq!(merged.color, ColorIntent::Never);

    // Values the override left unset survive
    assert_eq!(merged.mod_name.as_deref(), Some("FromBase"));
    assert!(!merged.no_archive);
}

#[test]
fn test_discovered_file_feeds_export_config() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("source");
    let mods = temp.path().join("game/mods");
    fs::create_dir_all(&mods).unwrap();
    write(
        &source,
        "scripts/export_config.yaml",
        &format!(
            "export:\n  mods_directory: \"{}\"\n  mod_name: FileName\n  extra_exclude:\n    - \"*.psd\"\n  bulk_copy: false\n",
            mods.display()
        ),
    );

    let file = ConfigFile::discover(None, &source).unwrap();
    let app = AppConfig {
        source: Some(source.clone()),
        ..AppConfig::default()
    };
    let config = ExportConfig::from_sources(&app, &file, None).unwrap();

    assert_eq!(config.mod_name, "FileName");
    assert!(!config.bulk_copy);
    assert!(config.archive);
    assert!(config.filter.matches_relative(Path::new("art/icon.psd")));
    assert!(config.filter.matches_relative(Path::new(".git")));

    let resolved = DestinationResolver::new(&config).resolve(None).unwrap();
    assert_eq!(resolved.path, mods);
    assert_eq!(resolved.source, DestinationSource::ConfigFile);
}

#[test]
fn test_command_line_overrides_file() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("source");
    write(&source, "export_config.yaml", "export:\n  mod_name: FileName\n");

    let file = ConfigFile::discover(None, &source).unwrap();
    let app = AppConfig {
        source: Some(source),
        mod_name: Some("CliName".to_string()),
        no_archive: true,
        ..AppConfig::default()
    };
    let config = ExportConfig::from_sources(&app, &file, None).unwrap();

    assert_eq!(config.mod_name, "CliName");
    assert!(!config.archive);
}

#[test]
fn test_explicit_missing_config_is_an_error() {
    let temp = TempDir::new().unwrap();

    let result = ConfigFile::discover(Some(&temp.path().join("absent.yaml")), temp.path());

    assert!(matches!(
        result,
        Err(ConfigError::ConfigFileUnreadable { .. })
    ));
}
