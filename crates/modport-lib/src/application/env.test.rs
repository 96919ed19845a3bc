use super::*;

fn env_config(vars: &[(&str, &str)]) -> EnvironmentConfig {
    EnvironmentConfig::from_vars(
        vars.iter()
            .map(|(name, value)| (name.to_string(), value.to_string())),
    )
    .unwrap()
}

#[test]
fn test_no_color_environment_variable() {
    let color = env_config(&[("NO_COLOR", "1")]).apply_color_config(ColorIntent::Auto);
    assert_eq!(color, ColorIntent::Never);
}

#[test]
fn test_force_color_environment_variable() {
    let color = env_config(&[("FORCE_COLOR", "1")]).apply_color_config(ColorIntent::Auto);
    assert_eq!(color, ColorIntent::Always);
}

#[test]
fn test_environment_variable_precedence() {
    let env = env_config(&[("CLICOLOR", "0"), ("NO_COLOR", "1"), ("FORCE_COLOR", "1")]);

    // FORCE_COLOR=1 should win, enabling color despite NO_COLOR and CLICOLOR
    assert_eq!(env.apply_color_config(ColorIntent::Auto), ColorIntent::Always);
}

#[test]
fn test_ci_environment_variable() {
    let env = env_config(&[("CI", "true"), ("FORCE_COLOR", "1")]);
    assert_eq!(env.apply_color_config(ColorIntent::Auto), ColorIntent::Never);
}

#[test]
fn test_empty_no_color_is_ignored() {
    let color = env_config(&[("NO_COLOR", "")]).apply_color_config(ColorIntent::Auto);
    assert_eq!(color, ColorIntent::Auto);
}

#[test]
fn test_invalid_force_color_values_ignored() {
    let color = env_config(&[("FORCE_COLOR", "invalid")]).apply_color_config(ColorIntent::Auto);
    assert_eq!(color, ColorIntent::Auto);
}

#[test]
fn test_appdata_dir() {
    let env = env_config(&[("APPDATA", "C:\\Users\\me\\AppData\\Roaming")]);
    assert_eq!(
        env.appdata_dir(),
        Some(PathBuf::from("C:\\Users\\me\\AppData\\Roaming"))
    );

    assert_eq!(env_config(&[("APPDATA", "")]).appdata_dir(), None);
    assert_eq!(env_config(&[]).appdata_dir(), None);
}
