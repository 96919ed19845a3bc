//! Versioned export of a Factorio mod
//!
//! Copies a filtered mod tree into a game mods directory, allocates the next
//! patch version from the archives already sitting next to it, stamps that
//! version into both manifests, and zips the result.

pub mod archive;
pub mod config;
pub mod copier;
pub mod destination;
pub mod filter;
pub mod manifest;
pub mod orchestrator;
pub mod versions;

use std::path::{Path, PathBuf};
use thiserror::Error;

pub use archive::{ArchiveArtifact, ArchiveOutcome, Archiver};
pub use config::{ConfigFile, ExportConfig};
pub use copier::{CopyReport, CopyStrategyKind, TreeCopier};
pub use destination::{DestinationResolver, DestinationSource, ResolvedDestination};
pub use filter::ExcludeFilter;
pub use manifest::{MANIFEST_FILE, ManifestStore, ManifestUpdate};
pub use orchestrator::{ExportOrchestrator, ExportReport, ExportState};
pub use versions::{VersionAllocator, VersionScheme};

/// Export errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Could not determine destination directory; pass a destination path")]
    DestinationUnresolved,

    #[error("Validation failed: {reason}")]
    ValidationFailure { reason: String },

    #[error("IO error at '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Export failed: no manifest at '{}'", path.display())]
    ExportVerification { path: PathBuf },

    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("Failed to write archive '{}': {source}", path.display())]
    Archive {
        path: PathBuf,
        source: zip::result::ZipError,
    },
}

impl ExportError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        ExportError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
