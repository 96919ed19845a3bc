//! Export pipeline
//!
//! Resolve destination, validate, clean, copy, verify, archive. Every step
//! up to verification is fatal; archiving only reports.

use super::{
    ArchiveOutcome, Archiver, CopyReport, DestinationResolver, DestinationSource, ExportConfig,
    ExportError, MANIFEST_FILE, ManifestStore, TreeCopier, VersionAllocator,
};
use crate::application::session::ProcessProvider;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// How many top-level entries the report lists
const LISTING_LIMIT: usize = 10;

/// Export lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportState {
    ResolvingDestination,
    Validating,
    Cleaning,
    Copying,
    Verifying,
    Archiving,
    Done,
    Failed,
}

impl ExportState {
    /// Whether `self -> next` is a legal step
    ///
    /// States advance one at a time; `Verifying` may jump to `Done` when
    /// archiving is disabled, and any non-terminal state may fail.
    pub fn can_transition(self, next: ExportState) -> bool {
        use ExportState::*;

        match (self, next) {
            (Done | Failed, _) => false,
            (_, Failed) => true,
            (ResolvingDestination, Validating)
            | (Validating, Cleaning)
            | (Cleaning, Copying)
            | (Copying, Verifying)
            | (Verifying, Archiving)
            | (Verifying, Done)
            | (Archiving, Done) => true,
            _ => false,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, ExportState::Done | ExportState::Failed)
    }
}

impl fmt::Display for ExportState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ExportState::ResolvingDestination => "resolving destination",
            ExportState::Validating => "validating",
            ExportState::Cleaning => "cleaning",
            ExportState::Copying => "copying",
            ExportState::Verifying => "verifying",
            ExportState::Archiving => "archiving",
            ExportState::Done => "done",
            ExportState::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// Result of a completed export
#[derive(Debug)]
pub struct ExportReport {
    pub destination: PathBuf,
    pub destination_source: DestinationSource,
    pub mod_dir: PathBuf,
    pub copy: CopyReport,
    /// `None` when archiving was disabled
    pub archive: Option<ArchiveOutcome>,
    /// First top-level entries of the exported directory, sorted
    pub listing: Vec<String>,
    pub listing_truncated: bool,
}

pub struct ExportOrchestrator<'a> {
    config: &'a ExportConfig,
    process: &'a dyn ProcessProvider,
    state: ExportState,
    history: Vec<ExportState>,
}

impl<'a> ExportOrchestrator<'a> {
    pub fn new(config: &'a ExportConfig, process: &'a dyn ProcessProvider) -> Self {
        Self {
            config,
            process,
            state: ExportState::ResolvingDestination,
            history: vec![ExportState::ResolvingDestination],
        }
    }

    pub fn state(&self) -> ExportState {
        self.state
    }

    /// Every state entered so far, in order
    pub fn history(&self) -> &[ExportState] {
        &self.history
    }

    /// Run the pipeline once; a failed or finished orchestrator cannot rerun
    #[instrument(skip_all, fields(mod_name = %self.config.mod_name))]
    pub fn run(&mut self, explicit: Option<&Path>) -> Result<ExportReport, ExportError> {
        if self.state != ExportState::ResolvingDestination {
            return Err(ExportError::InvalidArgument {
                reason: format!("export already {}", self.state),
            });
        }

        match self.pipeline(explicit) {
            Ok(report) => Ok(report),
            Err(e) => {
                debug!(state = %self.state, error = %e, "export failed");
                self.advance(ExportState::Failed)?;
                Err(e)
            }
        }
    }

    fn pipeline(&mut self, explicit: Option<&Path>) -> Result<ExportReport, ExportError> {
        let resolved = DestinationResolver::new(self.config).resolve(explicit)?;
        let destination = resolved.path;

        self.advance(ExportState::Validating)?;
        let mod_dir = destination.join(&self.config.mod_name);
        self.validate(&destination, &mod_dir)?;

        self.advance(ExportState::Cleaning)?;
        if mod_dir.exists() || mod_dir.is_symlink() {
            info!(path = %mod_dir.display(), "removing previous export");
            remove_path(&mod_dir)?;
        }

        self.advance(ExportState::Copying)?;
        let copy = TreeCopier::new(self.config.filter.clone(), self.process)
            .with_bulk_copy(self.config.bulk_copy)
            .copy_tree(&self.config.source_dir, &mod_dir)?;
        info!(strategy = %copy.strategy, files = ?copy.files_copied, "mod files copied");

        self.advance(ExportState::Verifying)?;
        let manifest = mod_dir.join(MANIFEST_FILE);
        if !manifest.is_file() {
            return Err(ExportError::ExportVerification { path: manifest });
        }

        let archive = if self.config.archive {
            self.advance(ExportState::Archiving)?;
            let archiver = Archiver::new(
                self.config.mod_name.clone(),
                self.config.source_dir.clone(),
                VersionAllocator::new(self.config.mod_name.clone(), self.config.scheme),
                ManifestStore::new(self.config.scheme),
            );
            Some(archiver.create_archive(&mod_dir))
        } else {
            debug!("archiving disabled");
            None
        };

        let (listing, listing_truncated) = top_level_listing(&mod_dir)?;

        self.advance(ExportState::Done)?;
        Ok(ExportReport {
            destination,
            destination_source: resolved.source,
            mod_dir,
            copy,
            archive,
            listing,
            listing_truncated,
        })
    }

    fn validate(&self, destination: &Path, mod_dir: &Path) -> Result<(), ExportError> {
        if !destination.is_dir() {
            return Err(ExportError::ValidationFailure {
                reason: format!(
                    "destination '{}' does not exist or is not a directory",
                    destination.display()
                ),
            });
        }

        if !self.config.source_dir.is_dir() {
            return Err(ExportError::ValidationFailure {
                reason: format!(
                    "source '{}' does not exist or is not a directory",
                    self.config.source_dir.display()
                ),
            });
        }

        self.check_overlap(destination, mod_dir)
    }

    /// Cleaning must never reach the source, and copying must never feed on its own output
    ///
    /// Compares canonical paths, so a `factorio` link inside the source that
    /// points at the game install is not an overlap.
    fn check_overlap(&self, destination: &Path, mod_dir: &Path) -> Result<(), ExportError> {
        let source = fs::canonicalize(&self.config.source_dir)
            .map_err(|e| ExportError::io(&self.config.source_dir, e))?;
        let target = fs::canonicalize(destination)
            .map_err(|e| ExportError::io(destination, e))?
            .join(&self.config.mod_name);

        if source.starts_with(&target) {
            return Err(ExportError::ValidationFailure {
                reason: format!(
                    "export directory '{}' would replace the source '{}'",
                    mod_dir.display(),
                    self.config.source_dir.display()
                ),
            });
        }

        if let Ok(relative) = target.strip_prefix(&source) {
            // The copy walk stops at the first excluded ancestor
            let excluded = relative
                .ancestors()
                .filter(|ancestor| !ancestor.as_os_str().is_empty())
                .any(|ancestor| self.config.filter.matches_relative(ancestor));
            if !excluded {
                return Err(ExportError::ValidationFailure {
                    reason: format!(
                        "export directory '{}' is inside the source and not excluded",
                        mod_dir.display()
                    ),
                });
            }
        }

        Ok(())
    }

    fn advance(&mut self, next: ExportState) -> Result<(), ExportError> {
        if !self.state.can_transition(next) {
            return Err(ExportError::InvalidArgument {
                reason: format!("illegal export transition {} -> {}", self.state, next),
            });
        }

        debug!(from = %self.state, to = %next, "export state");
        self.state = next;
        self.history.push(next);
        Ok(())
    }
}

/// Remove a previous export, which may be a directory, file or link
fn remove_path(path: &Path) -> Result<(), ExportError> {
    let meta = fs::symlink_metadata(path).map_err(|e| ExportError::io(path, e))?;
    let result = if meta.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    result.map_err(|e| ExportError::io(path, e))
}

fn top_level_listing(dir: &Path) -> Result<(Vec<String>, bool), ExportError> {
    let mut names = fs::read_dir(dir)
        .map_err(|e| ExportError::io(dir, e))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect::<Vec<_>>();
    names.sort();

    let truncated = names.len() > LISTING_LIMIT;
    names.truncate(LISTING_LIMIT);
    Ok((names, truncated))
}

#[cfg(test)]
mod tests {
    include!("orchestrator.test.rs");
}
