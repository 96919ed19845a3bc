//! Filesystem-based integration testing utilities
//!
//! Provides systematic test patterns for filesystem operations with:
//! - Automatic temporary directory creation and cleanup
//! - RAII-based resource management
//! - A ready-made mod source tree and mods directory layout

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Manifest written by [`TempDirFixture::mod_source`]
pub fn sample_manifest(name: &str, version: &str) -> String {
    format!(
        "{{\n\t\"name\": \"{name}\",\n\t\"version\": \"{version}\",\n\t\"title\": \"Sample Mod\",\n\t\"author\": \"tester\",\n\t\"factorio_version\": \"2.0\",\n\t\"dependencies\": [\"base >= 2.0\"]\n}}"
    )
}

/// Temporary directory fixture with automatic cleanup
pub struct TempDirFixture {
    /// The temporary directory (automatically cleaned up on drop)
    pub temp_dir: TempDir,
}

impl TempDirFixture {
    /// Create a new temporary directory fixture
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let temp_dir = tempfile::tempdir()?;
        Ok(Self { temp_dir })
    }

    /// Get the path to the temporary directory
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a subdirectory within the temporary directory
    pub fn create_dir(&self, subdir: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let dir_path = self.path().join(subdir);
        fs::create_dir_all(&dir_path)?;
        Ok(dir_path)
    }

    /// Write content to a file within the temporary directory
    pub fn write_file(
        &self,
        file_path: &str,
        content: &str,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let full_path = self.path().join(file_path);

        // Ensure parent directory exists
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&full_path, content)?;
        Ok(())
    }

    /// Read content from a file within the temporary directory
    pub fn read_file(&self, file_path: &str) -> Result<String, Box<dyn std::error::Error>> {
        let full_path = self.path().join(file_path);
        let content = fs::read_to_string(&full_path)?;
        Ok(content)
    }

    /// Check if a file exists within the temporary directory
    pub fn file_exists(&self, file_path: &str) -> bool {
        let full_path = self.path().join(file_path);
        full_path.exists()
    }

    /// Lay out a mod source tree under `dir` with shipped and development files
    ///
    /// Shipped: `info.json`, `control.lua`, `data.lua`, `locale/en/locale.cfg`,
    /// `graphics/icon.png`. Development only: `tests/test_export.lua`,
    /// `scripts/export_mod.py`, `.git/HEAD`, `old_1.1.0001.zip`.
    pub fn mod_source(
        &self,
        dir: &str,
        mod_name: &str,
        version: &str,
    ) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let root = self.create_dir(dir)?;

        self.write_file(&format!("{dir}/info.json"), &sample_manifest(mod_name, version))?;
        self.write_file(&format!("{dir}/control.lua"), "script.on_init(function() end)\n")?;
        self.write_file(&format!("{dir}/data.lua"), "require(\"prototypes.entity\")\n")?;
        self.write_file(&format!("{dir}/locale/en/locale.cfg"), "[mod-name]\n")?;
        self.write_file(&format!("{dir}/graphics/icon.png"), "PNG")?;

        self.write_file(&format!("{dir}/tests/test_export.lua"), "-- test\n")?;
        self.write_file(&format!("{dir}/scripts/export_mod.py"), "# tool\n")?;
        self.write_file(&format!("{dir}/.git/HEAD"), "ref: refs/heads/main\n")?;
        self.write_file(&format!("{dir}/old_1.1.0001.zip"), "")?;

        Ok(root)
    }

    /// Create `<dir>/mods`, the usual export destination, returning its path
    pub fn mods_dir(&self, dir: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
        self.create_dir(&format!("{dir}/mods"))
    }
}

/// Every file under `root`, relative and `/`-joined, sorted
pub fn relative_files(root: &Path) -> Vec<String> {
    fn walk(root: &Path, dir: &Path, out: &mut Vec<String>) {
        let Ok(entries) = fs::read_dir(dir) else {
            return;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                walk(root, &path, out);
            } else if let Ok(relative) = path.strip_prefix(root) {
                let parts: Vec<String> = relative
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect();
                out.push(parts.join("/"));
            }
        }
    }

    let mut files = Vec::new();
    walk(root, root, &mut files);
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    include!("filesystem.test.rs");
}
