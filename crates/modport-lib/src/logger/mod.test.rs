use super::*;

#[test]
fn test_default_directives_scope_our_crates() {
    assert_eq!(
        Logger::default_directives(LogLevel::Debug),
        "modport_lib=debug,modport=debug,warn"
    );
    assert_eq!(
        Logger::default_directives(LogLevel::Error),
        "modport_lib=error,modport=error,warn"
    );
}

#[test]
fn test_default_directives_parse() {
    for level in [LogLevel::Warning, LogLevel::Info, LogLevel::Trace] {
        assert!(EnvFilter::try_new(Logger::default_directives(level)).is_ok());
    }
}

#[test]
fn test_second_init_is_rejected() {
    let config = LoggerConfig {
        level: LogLevel::Debug,
        format: LogFormat::Text,
        output: LogOutput::Stderr,
        color: false,
    };

    // Another test may have installed a subscriber first
    let _ = Logger::init(config.clone());
    assert!(Logger::init(config).is_err());
}

#[test]
fn test_global_keeps_installed_config() {
    if let Some(logger) = Logger::global() {
        assert!(Logger::is_initialized());
        assert!(matches!(logger.config().output, LogOutput::Stderr | LogOutput::Stdout));
    }
}
