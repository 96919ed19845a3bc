//! Command execution handlers
//!
//! Session-based architecture for command execution.
//! Implements the Session-Scoped Dependency Injection Pattern.

use crate::application::cli::{Action, CliConfig};
use crate::application::env::EnvironmentConfig;
use crate::application::session::{CommandSession, Session};
use crate::export::{
    ConfigFile, DestinationResolver, ExportConfig, ExportOrchestrator, ExportReport,
    ManifestUpdate,
};
use crate::platform::{FactorioCapabilities, expand_home};
use anyhow::{Context, Result};
use std::path::Path;

/// Execute CLI commands using the session-based architecture
pub fn execute_command(config: CliConfig) -> Result<()> {
    // Create command session (owns all ephemeral state)
    let session = CommandSession::new(config.app_config.clone());

    execute_command_with_session(&config, &session)
}

/// Execute the requested action with a provided session (for testing)
pub fn execute_command_with_session(config: &CliConfig, session: &dyn Session) -> Result<()> {
    match config.action {
        Action::Requirements => handle_requirements(session, &config.env_config),
        Action::Export => handle_export(
            session,
            config.destination.as_deref(),
            &config.env_config,
        ),
    }
}

fn load_export_config(session: &dyn Session, env: &EnvironmentConfig) -> Result<ExportConfig> {
    let app = session.app_config();
    let source = match &app.source {
        Some(source) => source.clone(),
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    let file = ConfigFile::discover(app.config.as_deref(), &source)
        .context("Failed to load export config")?;
    if let Some(reason) = &file.ignored {
        session
            .display()
            .warning(&format!("Ignoring config file: {}", reason));
    }

    let config = ExportConfig::from_sources(app, &file, env.appdata_dir())
        .context("Invalid export configuration")?;
    tracing::debug!(?config, "export configuration");
    Ok(config)
}

fn handle_requirements(session: &dyn Session, env: &EnvironmentConfig) -> Result<()> {
    let display = session.display();
    display.section("Checking tool dependencies");

    // Bulk copy
    match session.process().find_program("rsync") {
        Some(path) => {
            let version = session
                .process()
                .execute("rsync", &["--version"], Path::new("."))
                .ok()
                .filter(|output| output.success)
                .and_then(|output| output.stdout.lines().next().map(str::to_string))
                .unwrap_or_else(|| path.display().to_string());
            display.success("rsync", &version);
        }
        None => {
            display.error("rsync", "not found");
            display.subtle("   Exports still work; files are copied one by one");
        }
    }

    let config = load_export_config(session, env)?;

    // Game binary, only needed for headless validation
    let configured = config.factorio_bin.as_deref().map(expand_home);
    let factorio = FactorioCapabilities::detect(configured.as_deref(), &config.common_paths);
    let location = factorio
        .path
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_default();
    display.tool_check("factorio", factorio.available, &location);
    if !factorio.available {
        display.subtle("   Set factorio_bin in scripts/export_config.yaml to point at the game");
    }

    // Mods directory
    match DestinationResolver::new(&config).resolve(None) {
        Ok(resolved) if resolved.path.is_dir() => {
            display.success(
                "mods directory",
                &format!("{} ({})", resolved.path.display(), resolved.source),
            );
        }
        Ok(resolved) => {
            display.error(
                "mods directory",
                &format!("{} does not exist", resolved.path.display()),
            );
        }
        Err(e) => display.error("mods directory", &e.to_string()),
    }

    Ok(())
}

fn handle_export(
    session: &dyn Session,
    destination: Option<&Path>,
    env: &EnvironmentConfig,
) -> Result<()> {
    let config = load_export_config(session, env)?;
    let display = session.display();

    display.working(&format!("Exporting {}", config.mod_name));

    let mut orchestrator = ExportOrchestrator::new(&config, session.process());
    match orchestrator.run(destination) {
        Ok(report) => {
            show_report(session, &report);
            Ok(())
        }
        Err(e) => {
            display.error("Export failed", &e.to_string());
            Err(e).with_context(|| format!("Export of '{}' failed", config.mod_name))
        }
    }
}

fn show_report(session: &dyn Session, report: &ExportReport) {
    let display = session.display();

    display.info(&format!(
        "Destination: {} ({})",
        report.destination.display(),
        report.destination_source
    ));
    let copied = match report.copy.files_copied {
        Some(count) => format!("{} files via {}", count, report.copy.strategy),
        None => format!("via {}", report.copy.strategy),
    };
    display.success("Exported", &format!("{} ({})", report.mod_dir.display(), copied));

    match &report.archive {
        Some(outcome) => {
            for (label, update) in [
                ("source manifest", &outcome.source_manifest),
                ("exported manifest", &outcome.exported_manifest),
            ] {
                if let ManifestUpdate::Failed { reason } = update {
                    display.warning(&format!("Could not update {}: {}", label, reason));
                }
            }

            match &outcome.result {
                Ok(artifact) => {
                    display.success("Version", &outcome.version);
                    display.success(
                        "Archive created",
                        &format!("{} ({} bytes)", artifact.path.display(), artifact.size),
                    );
                }
                Err(e) => display.warning(&format!("Archive not created: {}", e)),
            }
        }
        None => display.info("Archiving skipped"),
    }

    display.section("Exported files");
    display.list(&report.listing);
    if report.listing_truncated {
        display.subtle("  ...");
    }
}

#[cfg(test)]
mod tests {
    include!("commands.test.rs");
}
