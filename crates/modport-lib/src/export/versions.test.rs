use super::*;
use std::fs;
use tempfile::TempDir;

const MOD: &str = "PollutionSolutionsLite";

fn touch(dir: &Path, name: &str) {
    fs::write(dir.join(name), b"").unwrap();
}

fn allocator() -> VersionAllocator {
    VersionAllocator::new(MOD, VersionScheme::default())
}

#[test]
fn test_empty_directory_yields_seed() {
    let temp = TempDir::new().unwrap();
    assert_eq!(allocator().next_version(temp.path()), "1.1.0001");
}

#[test]
fn test_missing_directory_yields_seed() {
    let temp = TempDir::new().unwrap();
    assert_eq!(
        allocator().next_version(&temp.path().join("absent")),
        "1.1.0001"
    );
}

#[test]
fn test_next_after_highest_with_gaps() {
    let temp = TempDir::new().unwrap();
    for patch in ["0001", "0003", "0005"] {
        touch(temp.path(), &format!("{}_1.1.{}.zip", MOD, patch));
    }

    assert_eq!(allocator().next_version(temp.path()), "1.1.0006");
}

#[test]
fn test_legacy_and_foreign_names_are_ignored() {
    let temp = TempDir::new().unwrap();
    for name in [
        "PollutionSolutionsLite_1.1.5.zip",
        "PollutionSolutionsLite_1.1.99.zip",
        "PollutionSolutionsLite_1.0.0.zip",
        "PollutionSolutionsLite_1.1.abcd.zip",
        "PollutionSolutionsLite_1.1.0002.1.zip",
        "PollutionSolutionsLite_1.1.0007.tar.gz",
        "OtherMod_1.1.0042.zip",
        "notes.txt",
    ] {
        touch(temp.path(), name);
    }

    assert_eq!(allocator().next_version(temp.path()), "1.1.0001");
}

#[test]
fn test_directories_named_like_archives_are_ignored() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join(format!("{}_1.1.0009.zip", MOD))).unwrap();
    touch(temp.path(), &format!("{}_1.1.0002.zip", MOD));

    assert_eq!(allocator().next_version(temp.path()), "1.1.0003");
}

#[test]
fn test_sequential_allocation_is_monotonic() {
    let temp = TempDir::new().unwrap();
    let allocator = allocator();

    for expected in 1..=5u32 {
        let version = allocator.next_version(temp.path());
        assert_eq!(version, format!("1.1.{:04}", expected));
        touch(temp.path(), &format!("{}_{}.zip", MOD, version));
    }
}

#[test]
fn test_overflow_produces_wider_patch() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), &format!("{}_1.1.9999.zip", MOD));

    assert_eq!(allocator().next_version(temp.path()), "1.1.10000");
}

#[test]
fn test_allocation_keeps_increasing_past_the_width() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), &format!("{}_1.1.9999.zip", MOD));
    let allocator = allocator();

    let first = allocator.next_version(temp.path());
    touch(temp.path(), &format!("{}_{}.zip", MOD, first));
    let second = allocator.next_version(temp.path());

    assert_eq!(first, "1.1.10000");
    assert_eq!(second, "1.1.10001");
}

#[test]
fn test_custom_width_scheme() {
    let temp = TempDir::new().unwrap();
    let scheme = VersionScheme {
        major: 2,
        minor: 0,
        patch_width: 2,
    };
    touch(temp.path(), &format!("{}_2.0.07.zip", MOD));
    touch(temp.path(), &format!("{}_2.0.0008.zip", MOD));

    let allocator = VersionAllocator::new(MOD, scheme);
    assert_eq!(allocator.next_version(temp.path()), "2.0.08");
}

#[test]
fn test_parse_patch_shapes() {
    let scheme = VersionScheme::default();

    assert_eq!(scheme.parse_patch("1.1.0042"), Some(42));
    assert_eq!(scheme.parse_patch("1.1.42"), None);
    assert_eq!(scheme.parse_patch("1.1.12345"), Some(12345));
    assert_eq!(scheme.parse_patch("1.1.00042"), None);
    assert_eq!(scheme.parse_patch("1.2.0042"), None);
    assert_eq!(scheme.parse_patch("1.1.+042"), None);
    assert_eq!(scheme.parse_patch("1.1"), None);
    assert_eq!(scheme.parse_patch("1.1.0042.0"), None);
}

#[test]
fn test_seed_and_format() {
    let scheme = VersionScheme::default();
    assert_eq!(scheme.seed(), "1.1.0001");
    assert_eq!(scheme.format(120), "1.1.0120");
}
