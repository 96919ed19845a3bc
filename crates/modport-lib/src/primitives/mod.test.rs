use super::*;
use std::fmt::Debug;
use std::str::FromStr;

/// Every variant parses back from its primary command line name
fn assert_names_round_trip<T>()
where
    T: ValueEnum + FromStr + PartialEq + Debug,
    <T as FromStr>::Err: Debug,
{
    for variant in T::value_variants() {
        let name = variant
            .to_possible_value()
            .map(|value| value.get_name().to_string())
            .unwrap_or_default();
        assert_eq!(name.parse::<T>().unwrap(), *variant, "round trip of '{}'", name);
    }
}

fn assert_parses<T>(cases: &[(&str, T)])
where
    T: FromStr + PartialEq + Debug,
    <T as FromStr>::Err: Debug,
{
    for (input, expected) in cases {
        assert_eq!(&input.parse::<T>().unwrap(), expected, "input '{}'", input);
    }
}

#[test]
fn test_primary_names_round_trip() {
    assert_names_round_trip::<LogLevel>();
    assert_names_round_trip::<LogFormat>();
    assert_names_round_trip::<LogOutput>();
    assert_names_round_trip::<ColorIntent>();
}

#[test]
fn test_log_level_aliases() {
    assert_parses(&[
        ("err", LogLevel::Error),
        ("critical", LogLevel::Error),
        ("warning", LogLevel::Warning),
        ("information", LogLevel::Info),
        ("debugging", LogLevel::Debug),
        ("verbose", LogLevel::Trace),
    ]);
}

#[test]
fn test_format_output_and_color_aliases() {
    assert_parses(&[("txt", LogFormat::Text), ("plain", LogFormat::Text), ("yml", LogFormat::Yaml)]);
    assert_parses(&[("stdout", LogOutput::Stdout), ("stderr", LogOutput::Stderr)]);
    assert_parses(&[
        ("detect", ColorIntent::Auto),
        ("force", ColorIntent::Always),
        ("on", ColorIntent::Always),
        ("off", ColorIntent::Never),
    ]);
}

#[test]
fn test_parsing_ignores_case_and_padding() {
    assert_parses(&[("DEBUG", LogLevel::Debug), (" Trace ", LogLevel::Trace)]);
    assert_parses(&[(" Json ", LogFormat::Json)]);
    assert_parses(&[("Never", ColorIntent::Never)]);
}

#[test]
fn test_log_level_from_verbosity_boundary_conditions() {
    assert_eq!(LogLevel::from_verbosity(0), LogLevel::Error);
    assert_eq!(LogLevel::from_verbosity(1), LogLevel::Warning);
    assert_eq!(LogLevel::from_verbosity(2), LogLevel::Info);
    assert_eq!(LogLevel::from_verbosity(3), LogLevel::Debug);
    assert_eq!(LogLevel::from_verbosity(4), LogLevel::Trace);

    // Anything past 4 is trace
    assert_eq!(LogLevel::from_verbosity(5), LogLevel::Trace);
    assert_eq!(LogLevel::from_verbosity(100), LogLevel::Trace);
    assert_eq!(LogLevel::from_verbosity(u8::MAX), LogLevel::Trace);
}

#[test]
fn test_log_level_ordering() {
    assert!(LogLevel::Error < LogLevel::Warning);
    assert!(LogLevel::Warning < LogLevel::Info);
    assert!(LogLevel::Info < LogLevel::Debug);
    assert!(LogLevel::Debug < LogLevel::Trace);
}

#[test]
fn test_color_intent_resolution() {
    assert!(ColorIntent::Auto.resolve(true));
    assert!(!ColorIntent::Auto.resolve(false));
    assert!(ColorIntent::Always.resolve(false));
    assert!(!ColorIntent::Never.resolve(true));
}

#[test]
fn test_filter_directives() {
    assert_eq!(LogLevel::Error.as_filter_directive(), "error");
    assert_eq!(LogLevel::Warning.as_filter_directive(), "warn");
    assert_eq!(LogLevel::Trace.as_filter_directive(), "trace");
}

#[test]
fn test_unknown_value_reports_parse_error() {
    let err = "loud".parse::<LogLevel>().unwrap_err();
    match err {
        ConfigError::ParseError { value, reason } => {
            assert_eq!(value, "loud");
            assert_eq!(reason, "invalid log level");
        }
        other => panic!("Expected ParseError, got {:?}", other),
    }
}

#[test]
fn test_config_error_display() {
    let error = ConfigError::InvalidSourceDir {
        path: "/invalid/path".to_string(),
    };
    assert_eq!(
        error.to_string(),
        "Invalid mod source directory: /invalid/path"
    );

    let error = ConfigError::ConfigFileInvalid {
        path: std::path::PathBuf::from("export_config.yaml"),
        reason: "bad indent".to_string(),
    };
    assert_eq!(
        error.to_string(),
        "Invalid config file 'export_config.yaml': bad indent"
    );
}
