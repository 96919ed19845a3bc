use super::*;
use crate::primitives::ColorIntent;

#[test]
fn test_config_loading_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.log_level, 0);
    assert_eq!(config.color, ColorIntent::Auto);
    assert!(!config.no_archive);
    assert!(!config.no_bulk_copy);
}

#[test]
fn test_config_merging() {
    let base = AppConfig::default();
    let override_config = AppConfig {
        log_level: 4,
        color: ColorIntent::Always,
        mod_name: Some("SampleMod".to_string()),
        no_archive: true,
        ..AppConfig::default()
    };

    let merged = base.merge_with(override_config);
    assert_eq!(merged.log_level, 4);
    assert_eq!(merged.color, ColorIntent::Always);
    assert_eq!(merged.mod_name.as_deref(), Some("SampleMod"));
    assert!(merged.no_archive);
    assert!(!merged.no_bulk_copy);
}

#[test]
fn test_from_parts_applies_env_color_below_cli() {
    let env = EnvironmentConfig {
        no_color: Some("1".to_string()),
        ..EnvironmentConfig::default()
    };

    let quiet = CliConfig::from_parts(Cli::try_parse_from(["modport"]).unwrap(), env.clone())
        .unwrap();
    assert_eq!(quiet.app_config.color, ColorIntent::Never);

    let forced = CliConfig::from_parts(
        Cli::try_parse_from(["modport", "--color", "always"]).unwrap(),
        env,
    )
    .unwrap();
    assert_eq!(forced.app_config.color, ColorIntent::Always);
}

#[test]
fn test_from_parts_resolves_paths_against_working_directory() {
    let cli = Cli::try_parse_from(["modport", "dest", "--source", "relative/mod"]).unwrap();

    let config = CliConfig::from_parts(cli, EnvironmentConfig::default()).unwrap();

    let source = config.app_config.source.unwrap();
    assert!(source.is_absolute());
    assert!(source.ends_with("relative/mod"));
    let destination = config.destination.unwrap();
    assert!(destination.is_absolute());
    assert_eq!(destination, std::env::current_dir().unwrap().join("dest"));
}

#[test]
fn test_blank_mod_name_is_dropped() {
    let cli = Cli::try_parse_from(["modport", "--mod-name", "  "]).unwrap();

    let config = CliConfig::from_parts(cli, EnvironmentConfig::default()).unwrap();

    assert_eq!(config.app_config.mod_name, None);
}
