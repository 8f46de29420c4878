//! Integration tests for dotenv handling in the CLI.
//!
//! Responsibilities:
//! - Prove that invalid `.env` files cause the CLI to fail at startup.
//! - Prove that error messages do not leak secrets from the `.env` file.
//! - Ensure DOTENV_DISABLED=1 allows the CLI to skip a malformed `.env`.
//! - Ensure a valid `.env` can provide clap defaults.
//!
//! Invariants:
//! - Tests set current_dir to a temp directory to isolate `.env` file effects.

mod common;

use common::{confidential_cmd, write_document};
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_invalid_dotenv_causes_cli_failure() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(".env"), "INVALID_LINE_WITHOUT_EQUALS").unwrap();
    let primary = write_document(temp_dir.path(), "app.json", &json!({"a": 1}));

    confidential_cmd()
        .current_dir(temp_dir.path())
        .env_remove("DOTENV_DISABLED")
        .arg(&primary)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(".env"));
}

#[test]
fn test_invalid_dotenv_does_not_leak_secrets() {
    let temp_dir = TempDir::new().unwrap();
    let secret_value = "supersecret_cli_value_12345";
    fs::write(
        temp_dir.path().join(".env"),
        format!("AWS_SECRET_ACCESS_KEY={}\nINVALID_LINE", secret_value),
    )
    .unwrap();
    let primary = write_document(temp_dir.path(), "app.json", &json!({"a": 1}));

    confidential_cmd()
        .current_dir(temp_dir.path())
        .env_remove("DOTENV_DISABLED")
        .arg(&primary)
        .assert()
        .failure()
        .stderr(predicate::str::contains(secret_value).not());
}

#[test]
fn test_dotenv_disabled_skips_invalid_file() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(".env"), "INVALID_LINE_WITHOUT_EQUALS").unwrap();
    let primary = write_document(temp_dir.path(), "app.json", &json!({"a": 1}));

    confidential_cmd()
        .current_dir(temp_dir.path())
        .arg(&primary)
        .assert()
        .success();
}

#[test]
fn test_dotenv_provides_defaults_file() {
    let temp_dir = TempDir::new().unwrap();
    let defaults = write_document(temp_dir.path(), "defaults.json", &json!({"d": true}));
    let primary = write_document(temp_dir.path(), "app.json", &json!({"a": 1}));
    fs::write(
        temp_dir.path().join(".env"),
        format!("CONFIDENTIAL_DEFAULT_SECRETS_FILE={}\n", defaults.display()),
    )
    .unwrap();

    confidential_cmd()
        .current_dir(temp_dir.path())
        .env_remove("DOTENV_DISABLED")
        .arg(&primary)
        .arg("--output-json")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"d":true,"a":1}"#));
}
