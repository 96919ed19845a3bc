//! Filtered tree copy
//!
//! `rsync` is used when the host has it and the caller allows it; otherwise,
//! or when rsync fails, a recursive std::fs walk produces the same tree.

use super::{ExcludeFilter, ExportError};
use crate::application::session::ProcessProvider;
use std::fmt;
use std::fs;
use std::io;
use std::path::{self, Path};
use tracing::{debug, info, warn};

const RSYNC: &str = "rsync";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyStrategyKind {
    Bulk,
    Manual,
}

impl fmt::Display for CopyStrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CopyStrategyKind::Bulk => write!(f, "rsync"),
            CopyStrategyKind::Manual => write!(f, "manual"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyReport {
    pub strategy: CopyStrategyKind,
    /// Files written; rsync does not report a count
    pub files_copied: Option<u64>,
}

/// One way of materializing a filtered tree
pub trait CopyStrategy {
    fn kind(&self) -> CopyStrategyKind;

    /// Copy `src` into `dst`
    ///
    /// `Ok(None)` means the strategy could not run and the caller should try
    /// the next one.
    fn copy(&self, src: &Path, dst: &Path) -> Result<Option<CopyReport>, ExportError>;
}

/// rsync through the session's process provider
pub struct BulkCopy<'a> {
    filter: &'a ExcludeFilter,
    process: &'a dyn ProcessProvider,
}

impl<'a> BulkCopy<'a> {
    pub fn new(filter: &'a ExcludeFilter, process: &'a dyn ProcessProvider) -> Self {
        Self { filter, process }
    }

    /// rsync arguments with both trees as absolute paths
    ///
    /// `None` when either path is not valid UTF-8.
    fn args(&self, src: &Path, dst: &Path) -> Result<Option<Vec<String>>, ExportError> {
        let src = path::absolute(src).map_err(|e| ExportError::io(src, e))?;
        let dst = path::absolute(dst).map_err(|e| ExportError::io(dst, e))?;
        let (Some(src), Some(dst)) = (src.to_str(), dst.to_str()) else {
            return Ok(None);
        };

        let mut args = vec!["-a".to_string()];
        args.extend(self.filter.rsync_exclude_args());
        args.push(format!("{}/", src.trim_end_matches('/')));
        args.push(format!("{}/", dst.trim_end_matches('/')));
        Ok(Some(args))
    }
}

impl CopyStrategy for BulkCopy<'_> {
    fn kind(&self) -> CopyStrategyKind {
        CopyStrategyKind::Bulk
    }

    fn copy(&self, src: &Path, dst: &Path) -> Result<Option<CopyReport>, ExportError> {
        let Some(args) = self.args(src, dst)? else {
            debug!("non UTF-8 path; skipping rsync");
            return Ok(None);
        };

        fs::create_dir_all(dst).map_err(|e| ExportError::io(dst, e))?;

        let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();

        match self.process.execute(RSYNC, &arg_refs, src) {
            Ok(output) if output.success => {
                debug!(src = %src.display(), dst = %dst.display(), "rsync completed");
                Ok(Some(CopyReport {
                    strategy: CopyStrategyKind::Bulk,
                    files_copied: None,
                }))
            }
            Ok(output) => {
                warn!(
                    code = ?output.code,
                    stderr = %output.stderr.trim(),
                    "rsync failed"
                );
                Ok(None)
            }
            Err(e) => {
                warn!(error = %e, "could not run rsync");
                Ok(None)
            }
        }
    }
}

/// Recursive copy with std::fs
pub struct ManualCopy<'a> {
    filter: &'a ExcludeFilter,
}

impl<'a> ManualCopy<'a> {
    pub fn new(filter: &'a ExcludeFilter) -> Self {
        Self { filter }
    }

    /// Copy everything the filter keeps; this strategy always runs to completion
    pub fn copy_all(&self, src: &Path, dst: &Path) -> Result<CopyReport, ExportError> {
        fs::create_dir_all(dst).map_err(|e| ExportError::io(dst, e))?;

        let mut files_copied = 0;
        self.copy_dir(src, src, dst, &mut files_copied)?;

        debug!(files_copied, "manual copy completed");
        Ok(CopyReport {
            strategy: CopyStrategyKind::Manual,
            files_copied: Some(files_copied),
        })
    }

    fn copy_dir(
        &self,
        base: &Path,
        dir: &Path,
        target: &Path,
        files_copied: &mut u64,
    ) -> Result<(), ExportError> {
        let entries = fs::read_dir(dir).map_err(|e| ExportError::io(dir, e))?;

        for entry in entries {
            let entry = entry.map_err(|e| ExportError::io(dir, e))?;
            let path = entry.path();

            if self.filter.should_exclude(&path, base)? {
                continue;
            }

            let destination = target.join(entry.file_name());
            let file_type = entry.file_type().map_err(|e| ExportError::io(&path, e))?;

            if file_type.is_dir() {
                fs::create_dir_all(&destination).map_err(|e| ExportError::io(&destination, e))?;
                self.copy_dir(base, &path, &destination, files_copied)?;
            } else if file_type.is_symlink() {
                if copy_link(&path, &destination)? {
                    *files_copied += 1;
                }
            } else {
                fs::copy(&path, &destination).map_err(|e| ExportError::io(&path, e))?;
                *files_copied += 1;
            }
        }

        Ok(())
    }
}

/// Recreate a link with its target unchanged, as `rsync -a` does
#[cfg(unix)]
fn copy_link(path: &Path, destination: &Path) -> Result<bool, ExportError> {
    let target = fs::read_link(path).map_err(|e| ExportError::io(path, e))?;

    if let Ok(existing) = fs::symlink_metadata(destination) {
        if !existing.is_dir() {
            fs::remove_file(destination).map_err(|e| ExportError::io(destination, e))?;
        }
    }

    std::os::unix::fs::symlink(&target, destination)
        .map_err(|e| ExportError::io(destination, e))?;
    Ok(true)
}

/// Without unix links, file links are copied and directory links skipped
#[cfg(not(unix))]
fn copy_link(path: &Path, destination: &Path) -> Result<bool, ExportError> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => {
            debug!(path = %path.display(), "not following directory symlink");
            Ok(false)
        }
        Ok(_) => {
            fs::copy(path, destination).map_err(|e| ExportError::io(path, e))?;
            Ok(true)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "skipping dangling symlink");
            Ok(false)
        }
    }
}

impl CopyStrategy for ManualCopy<'_> {
    fn kind(&self) -> CopyStrategyKind {
        CopyStrategyKind::Manual
    }

    fn copy(&self, src: &Path, dst: &Path) -> Result<Option<CopyReport>, ExportError> {
        self.copy_all(src, dst).map(Some)
    }
}

/// Picks a copy strategy per call
pub struct TreeCopier<'a> {
    filter: ExcludeFilter,
    process: &'a dyn ProcessProvider,
    allow_bulk: bool,
}

impl<'a> TreeCopier<'a> {
    pub fn new(filter: ExcludeFilter, process: &'a dyn ProcessProvider) -> Self {
        Self {
            filter,
            process,
            allow_bulk: true,
        }
    }

    pub fn with_bulk_copy(mut self, allow_bulk: bool) -> Self {
        self.allow_bulk = allow_bulk;
        self
    }

    /// Copy the filtered `src` tree into `dst`
    ///
    /// Partial output is left in place on failure. `src` is only read.
    pub fn copy_tree(&self, src: &Path, dst: &Path) -> Result<CopyReport, ExportError> {
        if !src.is_dir() {
            return Err(ExportError::io(
                src,
                io::Error::new(io::ErrorKind::NotFound, "source is not a directory"),
            ));
        }

        if self.allow_bulk {
            // Probed on every call; rsync may appear or vanish between exports
            match self.process.find_program(RSYNC) {
                Some(path) => {
                    debug!(rsync = %path.display(), "using bulk copy");
                    let bulk = BulkCopy::new(&self.filter, self.process);
                    if let Some(report) = bulk.copy(src, dst)? {
                        return Ok(report);
                    }
                    info!("falling back to manual copy");
                }
                None => debug!("rsync not found; using manual copy"),
            }
        }

        ManualCopy::new(&self.filter).copy_all(src, dst)
    }
}

#[cfg(test)]
mod tests {
    include!("copier.test.rs");
}
