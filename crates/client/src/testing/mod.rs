//! Testing utilities for backend and transport tests.
//!
//! Available when running tests or when the `test-utils` feature is enabled.
//!
//! # Example
//! ```ignore
//! use confidential_client::testing::{RecordingTransport, load_fixture};
//!
//! let transport = RecordingTransport::new()
//!     .respond(load_fixture("secretsmanager/get_secret_value.json"));
//! ```

use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::error::{ClientError, Result};
use crate::transport::{AwsJsonTransport, AwsService};

/// Load a JSON fixture file from the fixtures directory.
///
/// # Panics
/// - If the fixture file cannot be read
/// - If the file content is not valid JSON
pub fn load_fixture(fixture_path: &str) -> Value {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let full_path = manifest_dir.join("fixtures").join(fixture_path);
    let content = std::fs::read_to_string(&full_path)
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", full_path.display()));
    serde_json::from_str(&content).expect("Invalid JSON in fixture")
}

/// One invocation seen by a [`RecordingTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub service: AwsService,
    pub operation: String,
    pub body: Value,
}

/// Transport that replays scripted outcomes in order and records every call.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    outcomes: Mutex<VecDeque<Result<Value>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response.
    pub fn respond(self, value: Value) -> Self {
        self.push(Ok(value))
    }

    /// Queue a failure.
    pub fn fail(self, error: ClientError) -> Self {
        self.push(Err(error))
    }

    fn push(self, outcome: Result<Value>) -> Self {
        self.outcomes
            .lock()
            .expect("outcomes lock poisoned")
            .push_back(outcome);
        self
    }

    /// Shared handle to the call log; stays valid after the transport moves.
    pub fn calls(&self) -> Arc<Mutex<Vec<RecordedCall>>> {
        Arc::clone(&self.calls)
    }
}

impl AwsJsonTransport for RecordingTransport {
    fn call(&self, service: AwsService, operation: &str, body: &Value) -> Result<Value> {
        self.calls
            .lock()
            .expect("calls lock poisoned")
            .push(RecordedCall {
                service,
                operation: operation.to_string(),
                body: body.clone(),
            });

        self.outcomes
            .lock()
            .expect("outcomes lock poisoned")
            .pop_front()
            .unwrap_or_else(|| {
                Err(ClientError::InvalidResponse(format!(
                    "no scripted response for {operation}"
                )))
            })
    }
}
