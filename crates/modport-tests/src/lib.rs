pub mod fixtures;
pub mod test_env;

// Re-export key testing utilities
pub use fixtures::{archive_entries, archive_manifest, manifest_version};
pub use test_env::{HermeticSession, HermeticSessionBuilder, MockBehavior, TestEnvironment};
