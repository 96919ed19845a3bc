//! Test framework for modport
//!
//! Provides isolated filesystem fixtures with automatic cleanup and a
//! ready-made mod source layout shared by unit and end-to-end tests.

pub mod filesystem;

// Re-export core testing utilities
pub use filesystem::{TempDirFixture, relative_files, sample_manifest};
