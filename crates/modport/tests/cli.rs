//! Binary-level tests: argument parsing, exit codes and on-disk results

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn modport() -> Command {
    Command::new(env!("CARGO_BIN_EXE_modport"))
}

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("src");
        for (file, content) in [
            (
                "info.json",
                "{\n\t\"name\": \"CliMod\",\n\t\"version\": \"1.1.0001\"\n}",
            ),
            ("control.lua", "script.on_init(function() end)\n"),
            ("locale/en/locale.cfg", "[mod-name]\n"),
            ("tests/test_control.lua", "-- test\n"),
            (".git/HEAD", "ref: refs/heads/main\n"),
        ] {
            let path = source.join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        fs::create_dir_all(dir.path().join("game/mods")).unwrap();
        Self { dir }
    }

    fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    fn command(&self) -> Command {
        let mut cmd = modport();
        cmd.current_dir(self.dir.path())
            .env_remove("MODPORT_SOURCE")
            .env_remove("MODPORT_CONFIG")
            .env_remove("MODPORT_MOD_NAME")
            .env_remove("MODPORT_NO_ARCHIVE")
            .env_remove("MODPORT_NO_BULK_COPY")
            .env("NO_COLOR", "1");
        cmd
    }
}

fn manifest_version(path: &Path) -> String {
    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    value["version"].as_str().unwrap().to_string()
}

#[test]
fn help_describes_the_tool() {
    modport()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("DESTINATION"))
        .stdout(predicate::str::contains("--no-archive"));
}

#[test]
fn export_into_explicit_destination() {
    let ws = Workspace::new();

    ws.command()
        .arg(ws.path("game/mods"))
        .arg("--source")
        .arg(ws.path("src"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Exporting CliMod"))
        .stdout(predicate::str::contains("Version: 1.1.0001"));

    assert!(ws.path("game/mods/CliMod/control.lua").is_file());
    assert!(ws.path("game/mods/CliMod/locale/en/locale.cfg").is_file());
    assert!(!ws.path("game/mods/CliMod/tests").exists());
    assert!(!ws.path("game/mods/CliMod/.git").exists());
    assert!(ws.path("game/mods/CliMod_1.1.0001.zip").is_file());
    assert_eq!(manifest_version(&ws.path("src/info.json")), "1.1.0001");
}

#[test]
fn relative_paths_resolve_against_working_directory() {
    let ws = Workspace::new();

    ws.command()
        .args(["game/mods", "--source", "src"])
        .assert()
        .success();

    assert!(ws.path("game/mods/CliMod/control.lua").is_file());
    assert!(ws.path("game/mods/CliMod_1.1.0001.zip").is_file());
    assert!(!ws.path("src/game").exists());
}

#[test]
fn second_run_bumps_the_patch() {
    let ws = Workspace::new();

    for _ in 0..2 {
        ws.command()
            .arg(ws.path("game/mods"))
            .arg("--source")
            .arg(ws.path("src"))
            .assert()
            .success();
    }

    assert!(ws.path("game/mods/CliMod_1.1.0002.zip").is_file());
    assert_eq!(
        manifest_version(&ws.path("game/mods/CliMod/info.json")),
        "1.1.0002"
    );
}

#[test]
fn no_archive_flag_skips_versioning() {
    let ws = Workspace::new();

    ws.command()
        .arg(ws.path("game/mods"))
        .arg("--source")
        .arg(ws.path("src"))
        .arg("--no-archive")
        .assert()
        .success()
        .stdout(predicate::str::contains("Archiving skipped"));

    assert!(ws.path("game/mods/CliMod/info.json").is_file());
    assert!(!ws.path("game/mods/CliMod_1.1.0001.zip").exists());
}

#[test]
fn mod_name_from_environment() {
    let ws = Workspace::new();

    ws.command()
        .arg(ws.path("game/mods"))
        .env("MODPORT_SOURCE", ws.path("src"))
        .env("MODPORT_MOD_NAME", "Renamed")
        .assert()
        .success();

    assert!(ws.path("game/mods/Renamed/info.json").is_file());
    assert!(ws.path("game/mods/Renamed_1.1.0001.zip").is_file());
}

#[test]
fn missing_destination_exits_with_failure() {
    let ws = Workspace::new();

    ws.command()
        .arg(ws.path("nowhere"))
        .arg("--source")
        .arg(ws.path("src"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"));

    assert!(!ws.path("nowhere").exists());
    assert_eq!(manifest_version(&ws.path("src/info.json")), "1.1.0001");
}

#[test]
fn requirements_reports_tools() {
    let ws = Workspace::new();

    ws.command()
        .arg("--requirements")
        .arg("--source")
        .arg(ws.path("src"))
        .assert()
        .success()
        .stdout(predicate::str::contains("rsync"))
        .stdout(predicate::str::contains("mods directory"));
}
