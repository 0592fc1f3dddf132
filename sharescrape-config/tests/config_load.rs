use sharescrape_config::SharescrapeConfigLoader;
use serial_test::serial;
use std::{fs, path::PathBuf};
use tempfile::TempDir;

/// Helper to write a YAML file in a temp dir and return its path.
fn write_yaml(tmp: &TempDir, name: &str, yaml: &str) -> PathBuf {
    let p = tmp.path().join(name);
    fs::write(&p, yaml).expect("write yaml");
    p
}

#[test]
#[serial]
fn test_config_load() {
    let tmp = TempDir::new().unwrap();

    let file_yaml = r#"
version: "0.2"
sources:
  - id: deepseek
    enabled: true
  - id: deepseek-staging
    model: deepSeekStaging
    display_name: "DeepSeek (staging)"
    markers:
      question: "div.${STAGING_QUESTION_CLASS}"
      code_block: "div.code pre"
  "#;
    let p = write_yaml(&tmp, "sharescrape.yaml", file_yaml);

    let config = temp_env::with_var("STAGING_QUESTION_CLASS", Some("q-9f8e"), || {
        SharescrapeConfigLoader::new()
            .with_file(&p)
            .load()
            .expect("load sharescrape config")
    });

    assert_eq!(config.sources.len(), 2);
    let staging = config.require_source("deepseek-staging").unwrap();
    assert_eq!(staging.profile.model, "deepSeekStaging");
    assert_eq!(staging.profile.display_name, "DeepSeek (staging)");
    assert_eq!(staging.profile.markers.question, "div.q-9f8e");
    assert_eq!(staging.profile.markers.code_block, "div.code pre");
    assert_eq!(
        staging.profile.markers.answer,
        "div.ds-markdown.ds-markdown--block"
    );
}

#[test]
#[serial]
fn missing_file_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let result = SharescrapeConfigLoader::new()
        .with_file(tmp.path().join("absent.yaml"))
        .load();
    assert!(result.is_err());
}
