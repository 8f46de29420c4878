//! End-to-end resolution through the binary against a mock AWS endpoint.
//!
//! Responsibilities:
//! - Verify `secret:` and `ssm:` references are resolved and merged.
//! - Verify remote failures map to structured exit codes.
//!
//! Invariants:
//! - Every run points `--endpoint-url` at a local `mockito` server.

mod common;

use common::{confidential_cmd, write_document};
use mockito::{Matcher, Server};
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::TempDir;

#[test]
fn test_references_are_resolved() {
    let mut server = Server::new();
    let _secret = server
        .mock("POST", "/")
        .match_header("x-amz-target", "secretsmanager.GetSecretValue")
        .match_body(Matcher::Json(json!({"SecretId": "keep_it_secret"})))
        .with_status(200)
        .with_body(json!({"Name": "keep_it_secret", "SecretString": "keep_it_safe"}).to_string())
        .create();
    let _parameter = server
        .mock("POST", "/")
        .match_header("x-amz-target", "AmazonSSM.GetParameter")
        .match_body(Matcher::Json(
            json!({"Name": "/app/limits", "WithDecryption": true}),
        ))
        .with_status(200)
        .with_body(
            json!({"Parameter": {"Name": "/app/limits", "Value": "{\"rps\": 5}"}}).to_string(),
        )
        .create();

    let temp_dir = TempDir::new().unwrap();
    let defaults = write_document(
        temp_dir.path(),
        "defaults.json",
        &json!({"limits": "ssm:/app/limits", "foo": "bar"}),
    );
    let primary = write_document(
        temp_dir.path(),
        "prod.json",
        &json!({"keep_it_secret": "secret:keep_it_secret"}),
    );

    let output = confidential_cmd()
        .arg(&primary)
        .arg("--default-secrets-file")
        .arg(&defaults)
        .args(["--endpoint-url", server.url().as_str(), "--output-json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    assert_eq!(
        serde_json::from_slice::<Value>(&output).unwrap(),
        json!({"limits": {"rps": 5}, "foo": "bar", "keep_it_secret": "keep_it_safe"})
    );
}

#[test]
fn test_missing_secret_exit_code() {
    let mut server = Server::new();
    let _mock = server
        .mock("POST", "/")
        .with_status(400)
        .with_body(
            json!({
                "__type": "ResourceNotFoundException",
                "Message": "Secrets Manager can't find the specified secret."
            })
            .to_string(),
        )
        .create();

    let temp_dir = TempDir::new().unwrap();
    let primary = write_document(temp_dir.path(), "app.json", &json!({"x": "secret:gone"}));

    confidential_cmd()
        .arg(&primary)
        .args(["--endpoint-url", server.url().as_str()])
        .assert()
        .failure()
        .code(4)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("gone").and(predicate::str::contains("secretsmanager")));
}

#[test]
fn test_access_denied_exit_code() {
    let mut server = Server::new();
    let _mock = server
        .mock("POST", "/")
        .with_status(400)
        .with_body(json!({"__type": "AccessDeniedException", "message": "denied"}).to_string())
        .create();

    let temp_dir = TempDir::new().unwrap();
    let primary = write_document(temp_dir.path(), "app.json", &json!({"x": "ssm:/locked"}));

    confidential_cmd()
        .arg(&primary)
        .args(["--endpoint-url", server.url().as_str()])
        .assert()
        .failure()
        .code(6);
}

#[test]
fn test_response_without_value_exit_code() {
    let mut server = Server::new();
    let _mock = server
        .mock("POST", "/")
        .with_status(200)
        .with_body(json!({"Name": "blob", "SecretBinary": "AAEC"}).to_string())
        .create();

    let temp_dir = TempDir::new().unwrap();
    let primary = write_document(temp_dir.path(), "app.json", &json!({"x": "secret:blob"}));

    confidential_cmd()
        .arg(&primary)
        .args(["--endpoint-url", server.url().as_str()])
        .assert()
        .failure()
        .code(6)
        .stderr(predicate::str::contains("SecretString"));
}

#[test]
fn test_service_error_exit_code() {
    let mut server = Server::new();
    let _mock = server
        .mock("POST", "/")
        .with_status(500)
        .with_body(json!({"__type": "InternalServiceError", "Message": "boom"}).to_string())
        .create();

    let temp_dir = TempDir::new().unwrap();
    let primary = write_document(temp_dir.path(), "app.json", &json!({"x": "secret:any"}));

    confidential_cmd()
        .arg(&primary)
        .args(["--endpoint-url", server.url().as_str()])
        .assert()
        .failure()
        .code(8);
}

#[test]
fn test_missing_credentials_exit_code() {
    let temp_dir = TempDir::new().unwrap();
    let primary = write_document(temp_dir.path(), "app.json", &json!({"x": "secret:any"}));
    let no_credentials = temp_dir.path().join("credentials");

    confidential_cmd()
        .env_remove("AWS_ACCESS_KEY_ID")
        .env_remove("AWS_SECRET_ACCESS_KEY")
        .env("AWS_SHARED_CREDENTIALS_FILE", &no_credentials)
        .arg(&primary)
        .args(["--endpoint-url", "http://127.0.0.1:9"])
        .assert()
        .failure()
        .code(6)
        .stderr(predicate::str::contains("No AWS credentials"));
}
