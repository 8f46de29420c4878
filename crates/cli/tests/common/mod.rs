//! Shared test utilities for confidential CLI integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory that prevents dotenv loading.
//! - Provide helpers for writing JSON documents to temporary directories.
//!
//! Invariants / Assumptions:
//! - All integration tests using this helper will be hermetic by default.
//! - AWS credentials are dummy values; no request ever reaches AWS.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use serde_json::Value;

/// Returns a hermetic `confidential` command for integration testing.
///
/// It ensures:
/// - `DOTENV_DISABLED=1` is set to prevent local `.env` contamination.
/// - Dummy AWS credentials are set so signing never reads host files.
/// - Other AWS and CONFIDENTIAL_* variables are cleared to avoid host leakage.
pub fn confidential_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("confidential");

    // Hermeticity: prevent loading local .env
    cmd.env("DOTENV_DISABLED", "1");

    cmd.env("AWS_ACCESS_KEY_ID", "AKIDTESTEXAMPLE")
        .env("AWS_SECRET_ACCESS_KEY", "test-secret-access-key");

    cmd.env_remove("AWS_SESSION_TOKEN")
        .env_remove("AWS_PROFILE")
        .env_remove("AWS_REGION")
        .env_remove("AWS_SHARED_CREDENTIALS_FILE")
        .env_remove("CONFIDENTIAL_DEFAULT_SECRETS_FILE")
        .env_remove("CONFIDENTIAL_ENDPOINT_URL")
        .env_remove("CONFIDENTIAL_TIMEOUT")
        .env_remove("RUST_LOG");

    cmd
}

/// Write `value` as JSON to `dir/name` and return the path.
#[allow(dead_code)]
pub fn write_document(dir: &Path, name: &str, value: &Value) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}
