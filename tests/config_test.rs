//! 設定ファイル・環境変数のテスト

use equipment_viz::config::{Config, ENV_BASE_URL, ENV_PASSWORD, ENV_USERNAME};
use equipment_viz::error::EquipmentVizError;
use std::collections::HashMap;
use tempfile::tempdir;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn test_missing_file_gives_default() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = Config::load_from(&dir.path().join("config.json")).expect("読み込み失敗");

    assert_eq!(config.base_url, "http://127.0.0.1:8000");
    assert!(config.username.is_none());
    assert!(config.password.is_none());
}

#[test]
fn test_save_and_load() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("config.json");

    let config = Config {
        base_url: "https://plant.example.com".to_string(),
        username: Some("operator".to_string()),
        password: None,
    };
    config.save_to(&path).expect("保存失敗");

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(!content.contains("password"));

    let loaded = Config::load_from(&path).expect("読み込み失敗");
    assert_eq!(loaded.base_url, "https://plant.example.com");
    assert_eq!(loaded.username.as_deref(), Some("operator"));
}

#[test]
fn test_partial_file_uses_defaults() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"username": "operator"}"#).unwrap();

    let loaded = Config::load_from(&path).expect("読み込み失敗");
    assert_eq!(loaded.base_url, "http://127.0.0.1:8000");
    assert_eq!(loaded.username.as_deref(), Some("operator"));
}

#[test]
fn test_invalid_file_is_error() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(matches!(Config::load_from(&path), Err(EquipmentVizError::JsonParse(_))));
}

#[test]
fn test_environment_overrides() {
    let config = Config::default().with_overrides(env(&[
        (ENV_BASE_URL, "http://backend:9000"),
        (ENV_USERNAME, "ci"),
        (ENV_PASSWORD, "from-secret-store"),
    ]));

    assert_eq!(config.base_url, "http://backend:9000");
    let credentials = config.credentials().expect("資格情報が無い");
    assert_eq!(credentials.username, "ci");
    assert_eq!(credentials.password, "from-secret-store");
}

#[test]
fn test_blank_environment_values_are_ignored() {
    let config = Config {
        username: Some("operator".to_string()),
        ..Config::default()
    }
    .with_overrides(env(&[(ENV_USERNAME, "  "), (ENV_BASE_URL, "")]));

    assert_eq!(config.username.as_deref(), Some("operator"));
    assert_eq!(config.base_url, "http://127.0.0.1:8000");
}

#[test]
fn test_missing_password_is_error() {
    let config = Config {
        username: Some("operator".to_string()),
        ..Config::default()
    };
    assert!(matches!(config.credentials(), Err(EquipmentVizError::MissingCredentials)));
    assert!(matches!(config.client_config(), Err(EquipmentVizError::MissingCredentials)));
}

#[test]
fn test_client_config_endpoints() {
    let config = Config::default().with_overrides(env(&[
        (ENV_USERNAME, "operator"),
        (ENV_PASSWORD, "pw"),
    ]));
    let client = config.client_config().expect("設定生成失敗");

    assert_eq!(client.api.history_url(), "http://127.0.0.1:8000/api/history/");
    assert!(client.authorization().unwrap().starts_with("Basic "));
}
