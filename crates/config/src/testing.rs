//! In-memory secret backend for tests.
//!
//! Available under `cfg(test)` and with the `test-utils` feature so that other
//! workspace crates can exercise resolution without a remote service.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::resolver::{FetchError, SecretBackend};

/// A backend that answers from a fixed table and records every lookup.
///
/// Identifiers missing from the table fail with [`FetchError::NotFound`].
#[derive(Debug, Clone)]
pub struct StaticBackend {
    name: String,
    prefix: String,
    responses: HashMap<String, Result<String, FetchError>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl StaticBackend {
    /// Create an empty backend with the given name and prefix.
    pub fn new(name: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prefix: prefix.into(),
            responses: HashMap::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Answer `identifier` with `plaintext`.
    pub fn with_secret(
        mut self,
        identifier: impl Into<String>,
        plaintext: impl Into<String>,
    ) -> Self {
        self.responses.insert(identifier.into(), Ok(plaintext.into()));
        self
    }

    /// Fail lookups of `identifier` with `error`.
    pub fn with_error(mut self, identifier: impl Into<String>, error: FetchError) -> Self {
        self.responses.insert(identifier.into(), Err(error));
        self
    }

    /// Shared handle to the identifiers fetched so far, in call order.
    pub fn calls(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.calls)
    }
}

impl SecretBackend for StaticBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn prefix(&self) -> &str {
        &self.prefix
    }

    fn fetch(&self, identifier: &str) -> Result<String, FetchError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(identifier.to_string());
        }

        self.responses
            .get(identifier)
            .cloned()
            .unwrap_or_else(|| Err(FetchError::NotFound(identifier.to_string())))
    }
}
