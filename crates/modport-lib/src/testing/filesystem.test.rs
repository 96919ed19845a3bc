use super::*;

#[test]
fn test_creates_temp_dir_and_writes_file() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TempDirFixture::new()?;

    fixture.create_dir("scripts")?;
    fixture.write_file("scripts/export_config.yaml", "export: {}")?;

    assert!(fixture.file_exists("scripts/export_config.yaml"));
    assert_eq!(fixture.read_file("scripts/export_config.yaml")?, "export: {}");
    assert!(fixture.path().join("scripts").is_dir());

    Ok(())
}

#[test]
fn test_temp_dir_isolation() -> Result<(), Box<dyn std::error::Error>> {
    let fixture1 = TempDirFixture::new()?;
    let fixture2 = TempDirFixture::new()?;

    assert_ne!(fixture1.path(), fixture2.path());

    fixture1.write_file("test1.txt", "content1")?;
    fixture2.write_file("test2.txt", "content2")?;

    assert!(fixture1.file_exists("test1.txt"));
    assert!(!fixture1.file_exists("test2.txt"));
    assert!(fixture2.file_exists("test2.txt"));
    assert!(!fixture2.file_exists("test1.txt"));

    Ok(())
}

#[test]
fn test_mod_source_layout() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TempDirFixture::new()?;

    let root = fixture.mod_source("src", "SampleMod", "1.1.0003")?;

    assert_eq!(
        relative_files(&root),
        vec![
            ".git/HEAD",
            "control.lua",
            "data.lua",
            "graphics/icon.png",
            "info.json",
            "locale/en/locale.cfg",
            "old_1.1.0001.zip",
            "scripts/export_mod.py",
            "tests/test_export.lua",
        ]
    );

    let manifest: serde_json::Value = serde_json::from_str(&fixture.read_file("src/info.json")?)?;
    assert_eq!(manifest["name"], "SampleMod");
    assert_eq!(manifest["version"], "1.1.0003");

    Ok(())
}

#[test]
fn test_mods_dir() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TempDirFixture::new()?;

    let mods = fixture.mods_dir("game")?;

    assert!(mods.is_dir());
    assert_eq!(mods, fixture.path().join("game").join("mods"));

    Ok(())
}
