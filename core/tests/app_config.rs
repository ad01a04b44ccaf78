use campaign_core::{
    config::{AppConfig, DEFAULT_DB_PATH, DEFAULT_MODEL_PATH},
    error::LoadError,
};
use std::io::Write;

#[test]
fn shipped_config_loads() {
    let config = AppConfig::load(concat!(env!("CARGO_MANIFEST_DIR"), "/../data/config.json")).unwrap();
    assert_eq!(config.db_path, "predictions.db");
    assert_eq!(config.model_path, "data/model/campaign_model.json");
}

#[test]
fn missing_keys_fall_back_to_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "db_path": "/tmp/other.db" }}"#).unwrap();

    let config = AppConfig::load(file.path()).unwrap();
    assert_eq!(config.db_path, "/tmp/other.db");
    assert_eq!(config.model_path, DEFAULT_MODEL_PATH);
    assert_eq!(AppConfig::default().db_path, DEFAULT_DB_PATH);
}

#[test]
fn unreadable_config_is_a_load_error() {
    let err = AppConfig::load("/nonexistent/config.json").unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }), "got {err:?}");
}
