//! Basic loader tests: documents on disk, merge order and file errors.

use serde_json::{Value, json};
use tempfile::TempDir;

use super::write_document;
use crate::loader::builder::ConfigLoader;
use crate::loader::error::ConfigError;
use crate::loader::merged::MissingKeyPolicy;
use crate::resolver::Resolver;
use crate::testing::StaticBackend;

#[test]
fn test_loader_merges_defaults_and_primary() {
    let temp_dir = TempDir::new().unwrap();
    let defaults = write_document(
        temp_dir.path(),
        "defaults.json",
        &json!({"a": 1, "b": {"x": 1}}),
    );
    let primary = write_document(temp_dir.path(), "prod.json", &json!({"b": {"y": 2}, "c": 3}));

    let config = ConfigLoader::new()
        .with_default_secrets_file(defaults)
        .with_secrets_file(primary)
        .load(&Resolver::new())
        .unwrap();

    assert_eq!(
        Value::Object(config.into_values()),
        json!({"a": 1, "b": {"x": 1, "y": 2}, "c": 3})
    );
}

#[test]
fn test_loader_with_only_primary_document() {
    let temp_dir = TempDir::new().unwrap();
    let primary = write_document(temp_dir.path(), "app.json", &json!({"foo": "bar"}));

    let config = ConfigLoader::new()
        .with_secrets_file(primary)
        .load(&Resolver::new())
        .unwrap();

    assert_eq!(config.get_str("foo").unwrap(), Some("bar"));
}

#[test]
fn test_loader_with_only_defaults_document() {
    let temp_dir = TempDir::new().unwrap();
    let defaults = write_document(temp_dir.path(), "defaults.json", &json!({"foo": "bar"}));

    let config = ConfigLoader::new()
        .with_default_secrets_file(defaults)
        .load(&Resolver::new())
        .unwrap();

    assert_eq!(config.get_str("foo").unwrap(), Some("bar"));
}

#[test]
fn test_loader_without_documents_yields_empty_config() {
    let config = ConfigLoader::new().load(&Resolver::new()).unwrap();
    assert!(config.is_empty());
}

#[test]
fn test_missing_primary_fails_before_any_fetch() {
    let temp_dir = TempDir::new().unwrap();
    let defaults = write_document(
        temp_dir.path(),
        "defaults.json",
        &json!({"token": "secret:token"}),
    );
    let backend = StaticBackend::new("secretsmanager", "secret:").with_secret("token", "t");
    let calls = backend.calls();
    let resolver = Resolver::new().with_backend(backend);

    let missing = temp_dir.path().join("missing.json");
    let err = ConfigLoader::new()
        .with_default_secrets_file(defaults)
        .with_secrets_file(missing.clone())
        .load(&resolver)
        .unwrap_err();

    assert!(matches!(err, ConfigError::FileNotFound { ref path } if *path == missing));
    assert!(calls.lock().unwrap().is_empty(), "no remote call before file checks");
}

#[test]
fn test_missing_defaults_file_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("defaults.json");

    let err = ConfigLoader::new()
        .with_default_secrets_file(missing)
        .load(&Resolver::new())
        .unwrap_err();

    assert!(matches!(err, ConfigError::FileNotFound { .. }));
    assert!(err.to_string().contains("does not exist"));
}

#[test]
fn test_malformed_document_is_a_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.json");
    std::fs::write(&path, "{\"a\": ").unwrap();

    let err = ConfigLoader::new()
        .with_secrets_file(path)
        .load(&Resolver::new())
        .unwrap_err();

    assert!(matches!(err, ConfigError::FileParse { .. }));
}

#[test]
fn test_missing_key_policy_is_applied() {
    let temp_dir = TempDir::new().unwrap();
    let primary = write_document(temp_dir.path(), "app.json", &json!({"foo": "bar"}));

    let strict = ConfigLoader::new()
        .with_secrets_file(primary.clone())
        .with_missing_key_policy(MissingKeyPolicy::Strict)
        .load(&Resolver::new())
        .unwrap();
    assert!(matches!(
        strict.get("absent"),
        Err(ConfigError::MissingKey { .. })
    ));

    let lenient = ConfigLoader::new()
        .with_secrets_file(primary)
        .load(&Resolver::new())
        .unwrap();
    assert_eq!(lenient.missing_key_policy(), MissingKeyPolicy::Warn);
    assert_eq!(lenient.get("absent").unwrap(), None);
}
