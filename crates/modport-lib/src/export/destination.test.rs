use super::*;
use crate::testing::TempDirFixture;

fn config_in(fixture: &TempDirFixture) -> ExportConfig {
    let source = fixture.mod_source("src", "SampleMod", "1.1.0001").unwrap();
    ExportConfig {
        home: Some(fixture.path().join("home")),
        appdata: None,
        host_os: HostOs::Linux,
        ..ExportConfig::new(source, "SampleMod")
    }
}

#[test]
fn test_explicit_destination_wins() {
    let fixture = TempDirFixture::new().unwrap();
    let mut config = config_in(&fixture);
    config.mods_directory = Some(fixture.mods_dir("configured").unwrap().display().to_string());
    let explicit = fixture.path().join("anywhere");

    let resolved = DestinationResolver::new(&config)
        .resolve(Some(&explicit))
        .unwrap();

    assert_eq!(resolved.path, explicit);
    assert_eq!(resolved.source, DestinationSource::Explicit);
}

#[test]
fn test_configured_mods_directory() {
    let fixture = TempDirFixture::new().unwrap();
    let mut config = config_in(&fixture);
    let mods = fixture.mods_dir("configured").unwrap();
    config.mods_directory = Some(mods.display().to_string());

    let resolved = DestinationResolver::new(&config).resolve(None).unwrap();

    assert_eq!(resolved.path, mods);
    assert_eq!(resolved.source, DestinationSource::ConfigFile);
}

#[test]
fn test_configured_mods_directory_expands_home() {
    let fixture = TempDirFixture::new().unwrap();
    let mut config = config_in(&fixture);
    let mods = fixture.create_dir("home/games/mods").unwrap();
    config.mods_directory = Some("~/games/mods".to_string());

    let resolved = DestinationResolver::new(&config).resolve(None).unwrap();

    assert_eq!(resolved.path, mods);
}

#[test]
fn test_missing_configured_directory_skips_factorio_bin() {
    let fixture = TempDirFixture::new().unwrap();
    let mut config = config_in(&fixture);
    fixture.write_file("install/bin/x64/factorio", "").unwrap();
    fixture.mods_dir("install").unwrap();
    config.mods_directory = Some(fixture.path().join("absent").display().to_string());
    config.factorio_bin = Some(
        fixture
            .path()
            .join("install/bin/x64/factorio")
            .display()
            .to_string(),
    );

    let resolved = DestinationResolver::new(&config).resolve(None).unwrap();

    assert_eq!(resolved.source, DestinationSource::OsDefault);
}

#[test]
fn test_mods_dir_derived_from_factorio_bin() {
    let fixture = TempDirFixture::new().unwrap();
    let mut config = config_in(&fixture);
    fixture.write_file("install/bin/x64/factorio", "").unwrap();
    let mods = fixture.mods_dir("install").unwrap();
    config.factorio_bin = Some(
        fixture
            .path()
            .join("install/bin/x64/factorio")
            .display()
            .to_string(),
    );

    let resolved = DestinationResolver::new(&config).resolve(None).unwrap();

    assert_eq!(resolved.path, mods);
    assert_eq!(resolved.source, DestinationSource::FactorioBinary);
}

#[test]
fn test_factorio_bin_without_mods_dir_is_skipped() {
    let fixture = TempDirFixture::new().unwrap();
    let mut config = config_in(&fixture);
    fixture.write_file("install/bin/x64/factorio", "").unwrap();
    config.factorio_bin = Some(
        fixture
            .path()
            .join("install/bin/x64/factorio")
            .display()
            .to_string(),
    );

    let resolved = DestinationResolver::new(&config).resolve(None).unwrap();

    assert_eq!(resolved.source, DestinationSource::OsDefault);
}

#[test]
fn test_factorio_directory_in_source() {
    let fixture = TempDirFixture::new().unwrap();
    let config = config_in(&fixture);
    fixture.create_dir("src/factorio").unwrap();

    let resolved = DestinationResolver::new(&config).resolve(None).unwrap();

    assert_eq!(resolved.path, config.source_dir.join("factorio").join("mods"));
    assert_eq!(resolved.source, DestinationSource::Symlink);
}

#[cfg(unix)]
#[test]
fn test_factorio_symlink_in_source() {
    let fixture = TempDirFixture::new().unwrap();
    let config = config_in(&fixture);
    let install = fixture.create_dir("install").unwrap();
    std::os::unix::fs::symlink(&install, config.source_dir.join("factorio")).unwrap();

    let resolved = DestinationResolver::new(&config).resolve(None).unwrap();

    assert_eq!(resolved.source, DestinationSource::Symlink);
    assert_eq!(resolved.path, config.source_dir.join("factorio/mods"));
}

#[test]
fn test_os_default_per_platform() {
    let home = Path::new("/home/player");
    let appdata = Path::new("C:/Users/player/AppData/Roaming");

    assert_eq!(
        default_mods_dir(HostOs::Linux, Some(home), None),
        Some(PathBuf::from("/home/player/.factorio/mods"))
    );
    assert_eq!(
        default_mods_dir(HostOs::MacOs, Some(home), None),
        Some(PathBuf::from(
            "/home/player/Library/Application Support/factorio/mods"
        ))
    );
    assert_eq!(
        default_mods_dir(HostOs::Windows, Some(home), Some(appdata)),
        Some(appdata.join("Factorio").join("mods"))
    );
    assert_eq!(default_mods_dir(HostOs::Windows, Some(home), None), None);
    assert_eq!(default_mods_dir(HostOs::Other, Some(home), None), None);
}

#[test]
fn test_nothing_resolvable_is_an_error() {
    let fixture = TempDirFixture::new().unwrap();
    let mut config = config_in(&fixture);
    config.host_os = HostOs::Windows;
    config.appdata = None;

    let err = DestinationResolver::new(&config).resolve(None).unwrap_err();

    assert!(matches!(err, ExportError::DestinationUnresolved));
}
