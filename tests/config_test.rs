//! Tests for layered configuration

use tempfile::TempDir;

use rsclass::config::Settings;

#[test]
fn given_no_config_files_when_loading_then_defaults_apply() {
    let settings = Settings::load(None).unwrap();
    // Defaults unless a global config on this machine says otherwise;
    // scheme name is the one field no layer is expected to blank out.
    assert!(!settings.scheme.name.is_empty());
}

#[test]
fn given_explicit_config_when_loading_then_it_overrides_defaults() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("rsclass.toml");
    std::fs::write(
        &path,
        r#"
out_dir = "out"

[scheme]
name = "SfB"
edition = "1991"
"#,
    )
    .unwrap();

    let settings = Settings::load(Some(&path)).unwrap();

    assert_eq!(settings.out_dir, std::path::PathBuf::from("out"));
    assert_eq!(settings.scheme.name, "SfB");
    assert_eq!(settings.scheme.edition, "1991");
    // Unspecified fields keep their defaults
    assert_eq!(settings.scheme.source, "CRB");
}

#[test]
fn given_missing_explicit_config_when_loading_then_errors() {
    let result = Settings::load(Some(std::path::Path::new("/nonexistent/rsclass.toml")));
    assert!(result.is_err());
}

#[test]
fn given_template_when_parsing_then_it_reproduces_defaults() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("rsclass.toml");
    std::fs::write(&path, Settings::template()).unwrap();

    let settings = Settings::load(Some(&path)).unwrap();

    assert_eq!(settings.scheme, Settings::default().scheme);
}
