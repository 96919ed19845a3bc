//! Patch version allocation from existing archive names
//!
//! Archives are named `<mod_name>_<major>.<minor>.<patch>.zip`. The next
//! version is one past the highest well-formed patch found next to the
//! exported tree, including patches that already outgrew the padding width.
//! Anything that does not fit the scheme is ignored.

use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Fixed `major.minor` and zero-padded patch width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionScheme {
    pub major: u32,
    pub minor: u32,
    pub patch_width: usize,
}

impl Default for VersionScheme {
    fn default() -> Self {
        Self {
            major: 1,
            minor: 1,
            patch_width: 4,
        }
    }
}

impl VersionScheme {
    /// Version handed out when no prior archive exists
    pub fn seed(&self) -> String {
        self.format(1)
    }

    pub fn format(&self, patch: u32) -> String {
        format!(
            "{}.{}.{:0width$}",
            self.major,
            self.minor,
            patch,
            width = self.patch_width
        )
    }

    /// Patch number of a version string, if it belongs to this scheme
    ///
    /// The patch must be exactly `patch_width` ASCII digits, so `1.1.5` is
    /// rejected under a four-digit scheme. Longer patches count only when
    /// they have no leading zero, which is how [`format`](Self::format)
    /// writes a patch that outgrew the width.
    pub fn parse_patch(&self, version: &str) -> Option<u32> {
        let mut parts = version.split('.');
        let (major, minor, patch) = (parts.next()?, parts.next()?, parts.next()?);
        if parts.next().is_some() {
            return None;
        }

        if major.parse::<u32>().ok()? != self.major || minor.parse::<u32>().ok()? != self.minor {
            return None;
        }

        if !patch.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let overflowed = patch.len() > self.patch_width && !patch.starts_with('0');
        if patch.len() != self.patch_width && !overflowed {
            return None;
        }

        patch.parse().ok()
    }

    fn prefix(&self, mod_name: &str) -> String {
        format!("{}_{}.{}.", mod_name, self.major, self.minor)
    }
}

/// Computes the next archive version for one mod
#[derive(Debug, Clone)]
pub struct VersionAllocator {
    mod_name: String,
    scheme: VersionScheme,
}

impl VersionAllocator {
    pub fn new(mod_name: impl Into<String>, scheme: VersionScheme) -> Self {
        Self {
            mod_name: mod_name.into(),
            scheme,
        }
    }

    pub fn scheme(&self) -> &VersionScheme {
        &self.scheme
    }

    /// Next version given the archives currently in `dir`
    ///
    /// Never fails: an unreadable directory yields the seed version.
    pub fn next_version(&self, dir: &Path) -> String {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(dir = %dir.display(), error = %e, "cannot list archive directory");
                return self.scheme.seed();
            }
        };

        let prefix = self.scheme.prefix(&self.mod_name);
        let highest = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| !t.is_dir()).unwrap_or(false))
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| name.starts_with(&prefix) && name.ends_with(".zip"))
            .filter_map(|name| self.patch_of(&name))
            .max();

        let Some(highest) = highest else {
            debug!(mod_name = %self.mod_name, "no prior archives; using seed version");
            return self.scheme.seed();
        };

        let next = highest.saturating_add(1);
        let version = self.scheme.format(next);
        if version.len() > self.scheme.seed().len() {
            warn!(
                version = %version,
                width = self.scheme.patch_width,
                "patch number overflows its width"
            );
        }

        debug!(mod_name = %self.mod_name, highest, version = %version, "allocated version");
        version
    }

    fn patch_of(&self, file_name: &str) -> Option<u32> {
        let version = file_name
            .strip_suffix(".zip")?
            .strip_prefix(self.mod_name.as_str())?
            .strip_prefix('_')?;
        self.scheme.parse_patch(version)
    }
}

#[cfg(test)]
mod tests {
    include!("versions.test.rs");
}
