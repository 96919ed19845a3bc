use super::*;
use crate::application::config::AppConfig;
use crate::application::session::ProcessOutput;
use crate::application::session_mocks::MockProcessProvider;
use crate::display::StatusDisplay;
use crate::display::status::CapturedOutput;
use crate::testing::TempDirFixture;
use std::path::PathBuf;

fn cli_config(source: &Path, destination: Option<PathBuf>, action: Action) -> CliConfig {
    CliConfig {
        app_config: AppConfig {
            source: Some(source.to_path_buf()),
            ..AppConfig::default()
        },
        env_config: EnvironmentConfig::default(),
        destination,
        action,
    }
}

fn session_for(
    config: &CliConfig,
    process: MockProcessProvider,
) -> (CommandSession<MockProcessProvider>, CapturedOutput) {
    let (display, output) = StatusDisplay::capturing();
    (
        CommandSession::new_with_providers(config.app_config.clone(), display, process),
        output,
    )
}

// ===== HANDLE_EXPORT TESTS =====

mod handle_export_tests {
    use super::*;

    #[test]
    fn it_exports_and_reports_archive() {
        let fixture = TempDirFixture::new().unwrap();
        let source = fixture.mod_source("src", "SampleMod", "1.1.0001").unwrap();
        let mods = fixture.mods_dir("game").unwrap();
        let config = cli_config(&source, Some(mods.clone()), Action::Export);
        let (session, output) = session_for(&config, MockProcessProvider::new());

        execute_command_with_session(&config, &session).unwrap();

        let lines = output.lines();
        assert_eq!(lines[0], "→ Exporting SampleMod...");
        assert!(lines.contains(&"✓ Version: 1.1.0001".to_string()));
        assert!(
            lines
                .iter()
                .any(|line| line.starts_with("✓ Archive created:")
                    && line.contains("SampleMod_1.1.0001.zip"))
        );
        assert!(lines.contains(&"  • info.json".to_string()));
        assert!(fixture.file_exists("game/mods/SampleMod/control.lua"));
    }

    #[test]
    fn it_fails_on_missing_destination() {
        let fixture = TempDirFixture::new().unwrap();
        let source = fixture.mod_source("src", "SampleMod", "1.1.0001").unwrap();
        let missing = fixture.path().join("missing");
        let config = cli_config(&source, Some(missing.clone()), Action::Export);
        let (session, output) = session_for(&config, MockProcessProvider::new());

        let result = execute_command_with_session(&config, &session);

        assert!(result.is_err());
        assert!(
            output
                .lines()
                .iter()
                .any(|line| line.starts_with("✗ Export failed:"))
        );
        assert!(!missing.exists());
    }

    #[test]
    fn it_skips_archive_when_disabled() {
        let fixture = TempDirFixture::new().unwrap();
        let source = fixture.mod_source("src", "SampleMod", "1.1.0001").unwrap();
        let mods = fixture.mods_dir("game").unwrap();
        let mut config = cli_config(&source, Some(mods), Action::Export);
        config.app_config.no_archive = true;
        let (session, output) = session_for(&config, MockProcessProvider::new());

        execute_command_with_session(&config, &session).unwrap();

        assert!(output.lines().contains(&"· Archiving skipped".to_string()));
        assert!(!fixture.file_exists("game/mods/SampleMod_1.1.0001.zip"));
    }

    #[test]
    fn it_warns_about_unparsable_config() {
        let fixture = TempDirFixture::new().unwrap();
        let source = fixture.mod_source("src", "SampleMod", "1.1.0001").unwrap();
        fixture
            .write_file("src/scripts/export_config.yaml", "export: [broken\n")
            .unwrap();
        let mods = fixture.mods_dir("game").unwrap();
        let config = cli_config(&source, Some(mods), Action::Export);
        let (session, output) = session_for(&config, MockProcessProvider::new());

        execute_command_with_session(&config, &session).unwrap();

        assert!(
            output
                .lines()
                .iter()
                .any(|line| line.starts_with("! Ignoring config file:"))
        );
    }
}

// ===== HANDLE_REQUIREMENTS TESTS =====

mod handle_requirements_tests {
    use super::*;

    #[test]
    fn it_reports_rsync_version() {
        let fixture = TempDirFixture::new().unwrap();
        let config = cli_config(fixture.path(), None, Action::Requirements);
        let process = MockProcessProvider::new().with_program("rsync").with_result(
            "rsync",
            Ok(ProcessOutput {
                stdout: "rsync  version 3.2.7  protocol version 31\nmore".to_string(),
                stderr: String::new(),
                success: true,
                code: Some(0),
            }),
        );
        let (session, output) = session_for(&config, process);

        execute_command_with_session(&config, &session).unwrap();

        assert!(
            output
                .lines()
                .contains(&"✓ rsync: rsync  version 3.2.7  protocol version 31".to_string())
        );
    }

    #[test]
    fn it_reports_missing_rsync() {
        let fixture = TempDirFixture::new().unwrap();
        let config = cli_config(fixture.path(), None, Action::Requirements);
        let (session, output) = session_for(&config, MockProcessProvider::new());

        execute_command_with_session(&config, &session).unwrap();

        assert!(output.lines().contains(&"✗ rsync: not found".to_string()));
    }

    #[test]
    fn it_reports_configured_mods_directory() {
        let fixture = TempDirFixture::new().unwrap();
        let mods = fixture.mods_dir("game").unwrap();
        fixture
            .write_file(
                "export_config.yaml",
                &format!("export:\n  mods_directory: \"{}\"\n", mods.display()),
            )
            .unwrap();
        let config = cli_config(fixture.path(), None, Action::Requirements);
        let (session, output) = session_for(&config, MockProcessProvider::new());

        execute_command_with_session(&config, &session).unwrap();

        assert!(
            output
                .lines()
                .contains(&format!("✓ mods directory: {} (config file)", mods.display()))
        );
    }
}
