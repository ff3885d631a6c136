//! Config file loading tests
//!
//! Tests that touch XDG_CONFIG_HOME are marked #[serial] so they do not race
//! on the process environment.

use pr0sauce_common::config::{load_toml_config, AppConfig, ConfigOverrides};
use pr0sauce_common::Error;
use serial_test::serial;
use std::env;
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_load_explicit_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
bind = "0.0.0.0:4000"
graphql_endpoint = "https://hasura.example.com/v1/graphql"
request_timeout_secs = 5

[logging]
level = "debug"
"#,
    )
    .unwrap();

    let loaded = load_toml_config(Some(path.as_path())).unwrap();
    assert_eq!(loaded.source.as_deref(), Some(path.as_path()));

    let config = AppConfig::resolve(&ConfigOverrides::default(), &loaded.toml).unwrap();

    assert_eq!(config.bind.port(), 4000);
    assert_eq!(
        config.graphql_endpoint.as_str(),
        "https://hasura.example.com/v1/graphql"
    );
    assert_eq!(config.oembed_endpoint.as_str(), "https://open.spotify.com/oembed");
    assert_eq!(config.request_timeout, Duration::from_secs(5));
    assert_eq!(config.log_level, "debug");
}

#[test]
fn test_missing_explicit_config_file_is_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.toml");

    let err = load_toml_config(Some(path.as_path())).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn test_unparsable_config_file_is_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "bind = [not toml").unwrap();

    let err = load_toml_config(Some(path.as_path())).unwrap_err();
    assert!(matches!(err, Error::Toml(_)));
}

#[test]
fn test_unknown_key_is_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "graphql_endpont = \"http://typo\"\n").unwrap();

    assert!(load_toml_config(Some(path.as_path())).is_err());
}

#[cfg(target_os = "linux")]
#[test]
#[serial]
fn test_default_config_file_is_picked_up() {
    let dir = TempDir::new().unwrap();
    let app_dir = dir.path().join("pr0sauce");
    fs::create_dir_all(&app_dir).unwrap();
    fs::write(app_dir.join("config.toml"), "bind = \"127.0.0.1:4321\"\n").unwrap();

    let previous = env::var("XDG_CONFIG_HOME").ok();
    env::set_var("XDG_CONFIG_HOME", dir.path());

    let result = load_toml_config(None);

    match previous {
        Some(value) => env::set_var("XDG_CONFIG_HOME", value),
        None => env::remove_var("XDG_CONFIG_HOME"),
    }

    let loaded = result.unwrap();
    assert_eq!(loaded.toml.bind.as_deref(), Some("127.0.0.1:4321"));
    assert_eq!(
        loaded.source.as_deref(),
        Some(app_dir.join("config.toml").as_path())
    );
}

#[cfg(target_os = "linux")]
#[test]
#[serial]
fn test_absent_default_config_file_uses_defaults() {
    let dir = TempDir::new().unwrap();

    let previous = env::var("XDG_CONFIG_HOME").ok();
    env::set_var("XDG_CONFIG_HOME", dir.path());

    let result = load_toml_config(None);

    match previous {
        Some(value) => env::set_var("XDG_CONFIG_HOME", value),
        None => env::remove_var("XDG_CONFIG_HOME"),
    }

    let loaded = result.unwrap();
    assert!(loaded.source.is_none());
    assert!(loaded.toml.bind.is_none());
    assert_eq!(loaded.toml.logging.level, "info");
}
