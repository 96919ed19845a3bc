use super::*;
use crate::primitives::{ColorIntent, LogFormat};

#[test]
fn test_parse_destination_and_flags() {
    let cli = Cli::try_parse_from([
        "modport",
        "/games/factorio/mods",
        "--source",
        "/work/mod",
        "--mod-name",
        "SampleMod",
        "--no-archive",
        "--no-bulk-copy",
        "--log-level",
        "3",
        "--log-format",
        "json",
        "--color",
        "never",
    ])
    .unwrap();

    assert_eq!(cli.destination, Some(PathBuf::from("/games/factorio/mods")));
    assert_eq!(cli.config.source, Some(PathBuf::from("/work/mod")));
    assert_eq!(cli.config.mod_name.as_deref(), Some("SampleMod"));
    assert!(cli.config.no_archive);
    assert!(cli.config.no_bulk_copy);
    assert_eq!(cli.config.log_level, 3);
    assert_eq!(cli.config.log_format, LogFormat::Json);
    assert_eq!(cli.config.color, ColorIntent::Never);
    assert_eq!(cli.action(), Action::Export);
}

#[test]
fn test_requirements_action() {
    let cli = Cli::try_parse_from(["modport", "--requirements"]).unwrap();

    assert_eq!(cli.action(), Action::Requirements);
    assert_eq!(cli.destination, None);
}

#[test]
fn test_color_aliases() {
    let cli = Cli::try_parse_from(["modport", "--color", "off"]).unwrap();
    assert_eq!(cli.config.color, ColorIntent::Never);

    let cli = Cli::try_parse_from(["modport", "--color", "force"]).unwrap();
    assert_eq!(cli.config.color, ColorIntent::Always);
}

#[test]
fn test_rejects_unknown_log_format() {
    assert!(Cli::try_parse_from(["modport", "--log-format", "xml"]).is_err());
}
