use super::*;

#[test]
fn test_host_os_matches_compile_target() {
    let os = HostOs::current();

    #[cfg(target_os = "linux")]
    assert_eq!(os, HostOs::Linux);
    #[cfg(target_os = "macos")]
    assert_eq!(os, HostOs::MacOs);
    #[cfg(windows)]
    assert_eq!(os, HostOs::Windows);
}

#[test]
fn test_expand_home_with_tilde_prefix() {
    let home = Path::new("/home/engineer");

    assert_eq!(
        expand_home_with("~/factorio/bin/x64/factorio", Some(home)),
        PathBuf::from("/home/engineer/factorio/bin/x64/factorio")
    );
    assert_eq!(expand_home_with("~", Some(home)), home.to_path_buf());
}

#[test]
fn test_expand_home_leaves_other_paths_alone() {
    let home = Path::new("/home/engineer");

    assert_eq!(
        expand_home_with("/opt/factorio/bin/x64/factorio", Some(home)),
        PathBuf::from("/opt/factorio/bin/x64/factorio")
    );
    // Only a leading tilde segment is special
    assert_eq!(
        expand_home_with("~other/mods", Some(home)),
        PathBuf::from("~other/mods")
    );
}

#[test]
fn test_expand_home_without_home_directory() {
    assert_eq!(
        expand_home_with("~/mods", None),
        PathBuf::from("~/mods")
    );
}
