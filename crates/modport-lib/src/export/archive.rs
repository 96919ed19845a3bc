//! Versioned zip archive of an exported mod
//!
//! The archive lands next to the exported directory as
//! `<mod_name>_<version>.zip`, with every entry under a `<mod_name>/` root
//! so the game unpacks it to the right folder whatever the on-disk name.

use super::{ExportError, MANIFEST_FILE, ManifestStore, ManifestUpdate, VersionAllocator};
use indicatif::ProgressStyle;
use std::fs::{self, File};
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};
use tracing_indicatif::span_ext::IndicatifSpanExt;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// A written archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveArtifact {
    pub name: String,
    pub path: PathBuf,
    pub size: u64,
}

/// Everything that happened while archiving
///
/// Manifest updates are kept even when writing the archive fails.
#[derive(Debug)]
pub struct ArchiveOutcome {
    pub version: String,
    pub archive_path: PathBuf,
    pub source_manifest: ManifestUpdate,
    pub exported_manifest: ManifestUpdate,
    pub result: Result<ArchiveArtifact, ExportError>,
}

impl ArchiveOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

pub struct Archiver {
    mod_name: String,
    source_dir: PathBuf,
    allocator: VersionAllocator,
    manifests: ManifestStore,
}

impl Archiver {
    pub fn new(
        mod_name: impl Into<String>,
        source_dir: impl Into<PathBuf>,
        allocator: VersionAllocator,
        manifests: ManifestStore,
    ) -> Self {
        Self {
            mod_name: mod_name.into(),
            source_dir: source_dir.into(),
            allocator,
            manifests,
        }
    }

    /// Allocate a version, stamp both manifests and zip `exported_dir`
    pub fn create_archive(&self, exported_dir: &Path) -> ArchiveOutcome {
        let parent = exported_dir.parent().unwrap_or_else(|| Path::new("."));
        let version = self.allocator.next_version(parent);
        info!(mod_name = %self.mod_name, version = %version, "archiving");

        let source_manifest = self
            .manifests
            .write_version(&self.source_dir.join(MANIFEST_FILE), &version);
        let exported_manifest = self
            .manifests
            .write_version(&exported_dir.join(MANIFEST_FILE), &version);

        let name = format!("{}_{}.zip", self.mod_name, version);
        let archive_path = parent.join(&name);

        let result = self.write_zip(exported_dir, &archive_path, name);
        if let Err(e) = &result {
            warn!(path = %archive_path.display(), error = %e, "archive failed");
            if archive_path.exists() {
                if let Err(e) = fs::remove_file(&archive_path) {
                    debug!(error = %e, "could not remove partial archive");
                }
            }
        }

        ArchiveOutcome {
            version,
            archive_path,
            source_manifest,
            exported_manifest,
            result,
        }
    }

    fn write_zip(
        &self,
        exported_dir: &Path,
        archive_path: &Path,
        name: String,
    ) -> Result<ArchiveArtifact, ExportError> {
        let files = collect_files(exported_dir)?;

        let span = crate::progress_span!("archive", total = files.len() as u64);
        if let Ok(style) = ProgressStyle::with_template("{spinner} archiving [{bar:30}] {pos}/{len}") {
            span.pb_set_style(&style);
        }
        span.pb_set_length(files.len() as u64);
        let _enter = span.enter();

        let archive_err = |source| ExportError::Archive {
            path: archive_path.to_path_buf(),
            source,
        };

        let file = File::create(archive_path).map_err(|e| ExportError::io(archive_path, e))?;
        let mut writer = ZipWriter::new(file);

        for (path, relative) in &files {
            let entry = format!("{}/{}", self.mod_name, relative);
            writer
                .start_file(entry, entry_options(path))
                .map_err(archive_err)?;

            let mut input = File::open(path).map_err(|e| ExportError::io(path, e))?;
            io::copy(&mut input, &mut writer).map_err(|e| ExportError::io(archive_path, e))?;
            span.pb_inc(1);
        }

        writer.finish().map_err(archive_err)?;

        let size = fs::metadata(archive_path)
            .map_err(|e| ExportError::io(archive_path, e))?
            .len();

        debug!(entries = files.len(), size, "archive written");
        Ok(ArchiveArtifact {
            name,
            path: archive_path.to_path_buf(),
            size,
        })
    }
}

fn entry_options(path: &Path) -> SimpleFileOptions {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Ok(meta) = fs::metadata(path) {
            return options.unix_permissions(meta.permissions().mode() & 0o7777);
        }
    }

    #[cfg(not(unix))]
    let _ = path;

    options
}

/// Regular files under `root` with their `/`-joined relative paths, sorted
fn collect_files(root: &Path) -> Result<Vec<(PathBuf, String)>, ExportError> {
    let mut files = Vec::new();
    walk(root, root, &mut files)?;
    files.sort_by(|a, b| a.1.cmp(&b.1));
    Ok(files)
}

fn walk(root: &Path, dir: &Path, files: &mut Vec<(PathBuf, String)>) -> Result<(), ExportError> {
    for entry in fs::read_dir(dir).map_err(|e| ExportError::io(dir, e))? {
        let path = entry.map_err(|e| ExportError::io(dir, e))?.path();
        let file_type = fs::symlink_metadata(&path)
            .map_err(|e| ExportError::io(&path, e))?
            .file_type();

        if file_type.is_dir() {
            walk(root, &path, files)?;
        } else if path.is_file() {
            let relative = path
                .strip_prefix(root)
                .map_err(|_| ExportError::InvalidArgument {
                    reason: format!("'{}' escaped '{}'", path.display(), root.display()),
                })?
                .components()
                .filter_map(|c| match c {
                    Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join("/");
            files.push((path, relative));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    include!("archive.test.rs");
}
