use super::*;
use std::path::PathBuf;

fn filter(patterns: &[&str]) -> ExcludeFilter {
    ExcludeFilter::new(patterns.iter().map(|p| p.to_string()))
}

#[test]
fn test_default_filter_excludes_development_files() {
    let filter = ExcludeFilter::default();
    let base = Path::new("/work/PollutionSolutionsLite");

    for excluded in [
        ".git",
        ".git/HEAD",
        "tests",
        "tests/test_export.lua",
        "scripts/export_mod.py",
        "graphics/__pycache__",
        "tools/helper.pyc",
        "PollutionSolutionsLite_1.1.0003.zip",
        "backup.tar.gz",
        "factorio",
    ] {
        assert!(
            filter.should_exclude(&base.join(excluded), base).unwrap(),
            "{} should be excluded",
            excluded
        );
    }

    for kept in [
        "info.json",
        "control.lua",
        "data.lua",
        "graphics/entity/incinerator.png",
        "locale/en/locale.cfg",
        "changelog.txt",
    ] {
        assert!(
            !filter.should_exclude(&base.join(kept), base).unwrap(),
            "{} should be kept",
            kept
        );
    }
}

#[test]
fn test_wildcard_matches_only_file_name_suffix() {
    let filter = filter(&["*.bak"]);
    let base = Path::new("/mod");

    assert!(filter.should_exclude(Path::new("/mod/a/b/data.lua.bak"), base).unwrap());
    assert!(!filter.should_exclude(Path::new("/mod/x.bak/data.lua"), base).unwrap());
}

#[test]
fn test_plain_pattern_is_a_relative_prefix() {
    let filter = filter(&["docs"]);
    let base = Path::new("/mod");

    assert!(filter.should_exclude(Path::new("/mod/docs"), base).unwrap());
    assert!(filter.should_exclude(Path::new("/mod/docs/readme.md"), base).unwrap());
    // String prefix, not a path-component prefix
    assert!(filter.should_exclude(Path::new("/mod/docsite.lua"), base).unwrap());
    assert!(!filter.should_exclude(Path::new("/mod/prototypes/docs.lua"), base).unwrap());
}

#[test]
fn test_plain_pattern_matches_name_at_any_depth() {
    let filter = filter(&["__pycache__"]);
    let base = Path::new("/mod");

    assert!(
        filter
            .should_exclude(Path::new("/mod/scripts/lib/__pycache__"), base)
            .unwrap()
    );
}

#[test]
fn test_nested_prefix_pattern() {
    let filter = filter(&["graphics/raw"]);
    let base = Path::new("/mod");

    assert!(filter.should_exclude(Path::new("/mod/graphics/raw/a.psd"), base).unwrap());
    assert!(!filter.should_exclude(Path::new("/mod/graphics/entity/a.png"), base).unwrap());
}

#[test]
fn test_path_outside_base_is_rejected() {
    let filter = ExcludeFilter::default();

    let result = filter.should_exclude(Path::new("/elsewhere/info.json"), Path::new("/mod"));

    match result {
        Err(ExportError::InvalidArgument { reason }) => {
            assert!(reason.contains("/elsewhere/info.json"));
        }
        other => panic!("Expected InvalidArgument, got {:?}", other),
    }
}

#[test]
fn test_should_exclude_is_stable_across_calls() {
    let filter = ExcludeFilter::default();
    let base = PathBuf::from("/mod");
    let paths = [
        base.join("tests/a.lua"),
        base.join("control.lua"),
        base.join("x.zip"),
    ];

    let first: Vec<bool> = paths
        .iter()
        .map(|p| filter.should_exclude(p, &base).unwrap())
        .collect();
    let reversed: Vec<bool> = paths
        .iter()
        .rev()
        .map(|p| filter.should_exclude(p, &base).unwrap())
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();

    assert_eq!(first, vec![true, false, true]);
    assert_eq!(first, reversed);
}

#[test]
fn test_empty_patterns_are_dropped() {
    let filter = filter(&["", "tests"]);
    assert_eq!(filter.patterns(), &["tests".to_string()]);
    assert!(!filter.matches_relative(Path::new("control.lua")));
}

#[test]
fn test_extended_keeps_defaults() {
    let filter = ExcludeFilter::default().extended(vec!["notes.txt".to_string()]);

    assert!(filter.matches_relative(Path::new("notes.txt")));
    assert!(filter.matches_relative(Path::new(".git")));
}

#[test]
fn test_rsync_args_translation() {
    let filter = filter(&["tests", "*.zip", "graphics/raw", "odd[1]"]);

    assert_eq!(
        filter.rsync_exclude_args(),
        vec![
            "--exclude=tests",
            "--exclude=/tests*",
            "--exclude=*.zip",
            "--exclude=/graphics/raw*",
            "--exclude=odd\\[1\\]",
            "--exclude=/odd\\[1\\]*",
        ]
    );
}
