//! Config loading tests: file lookup, overrides and validation end to end.

use floorwatch::config::{load_config, ConfigOverrides};
use floorwatch::utils::paths::PROJECT_CONFIG_NAME;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_load_fixture_file() {
    let loaded = load_config(Some(&fixture("venue.yaml")), &ConfigOverrides::default()).unwrap();
    let config = loaded.config;

    assert_eq!(loaded.path, Some(fixture("venue.yaml")));
    assert_eq!(config.base_url, "https://pos.example.test");
    assert_eq!(config.venue_id, "24477");
    assert_eq!(config.poll_interval, Duration::from_millis(1500));
    assert_eq!(config.request_timeout, Duration::from_secs(4));
    assert_eq!(config.auth_token.as_deref(), Some("fixture-token"));
    assert_eq!(config.sound.command.as_deref(), Some("paplay /tmp/ding.oga"));

    let options = config.engine_options();
    assert_eq!(options.venue_id, "24477");
    assert_eq!(options.poll_interval, Duration::from_millis(1500));
}

#[test]
fn test_overrides_win_over_file() {
    let overrides = ConfigOverrides {
        venue_id: Some("MOCK_TO".to_string()),
        base_url: Some("http://127.0.0.1:9000".to_string()),
        poll_interval: Some("250ms".to_string()),
    };
    let config = load_config(Some(&fixture("venue.yaml")), &overrides)
        .unwrap()
        .config;

    assert_eq!(config.venue_id, "MOCK_TO");
    assert_eq!(config.base_url, "http://127.0.0.1:9000");
    assert_eq!(config.poll_interval, Duration::from_millis(250));
    // Untouched values still come from the file
    assert_eq!(config.request_timeout, Duration::from_secs(4));
}

#[test]
fn test_missing_explicit_file_is_error() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("nope.yaml");

    let err = load_config(Some(&missing), &ConfigOverrides::default()).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to read config file"));
}

#[test]
fn test_invalid_file_names_the_path() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join(PROJECT_CONFIG_NAME);
    std::fs::write(&path, "venue_id: v\nbase_url: ftp://nowhere\n").unwrap();

    let err = load_config(Some(&path), &ConfigOverrides::default()).unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("Invalid config in"));
    assert!(message.contains("http://"));
}

#[test]
fn test_bad_interval_override_is_error() {
    let overrides = ConfigOverrides {
        poll_interval: Some("soon".to_string()),
        ..Default::default()
    };
    assert!(load_config(Some(&fixture("venue.yaml")), &overrides).is_err());
}
