//! The merged, fully resolved configuration handed to callers.
//!
//! Invariants:
//! - Immutable after construction.
//! - `Debug` output lists keys only, never resolved values.
//! - Only absent keys count as missing; an explicit `null` is a present value.

use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::Value;
use tracing::warn;

use super::env::export_env_variables;
use super::error::ConfigError;
use crate::document::ConfigDocument;

/// What a lookup of an absent key does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingKeyPolicy {
    /// Absent keys are an error ([`ConfigError::MissingKey`]).
    Strict,
    /// Absent keys log a warning and yield `None`.
    #[default]
    Warn,
}

/// The final configuration produced by one orchestration run.
#[derive(Clone, PartialEq)]
pub struct MergedConfig {
    values: ConfigDocument,
    missing_key_policy: MissingKeyPolicy,
}

impl fmt::Debug for MergedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MergedConfig")
            .field("keys", &self.values.keys().collect::<Vec<_>>())
            .field("missing_key_policy", &self.missing_key_policy)
            .finish()
    }
}

impl Serialize for MergedConfig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.values.serialize(serializer)
    }
}

impl MergedConfig {
    /// Wrap an already merged document.
    pub fn new(values: ConfigDocument, missing_key_policy: MissingKeyPolicy) -> Self {
        Self {
            values,
            missing_key_policy,
        }
    }

    /// Look up a top-level key, honouring the missing-key policy.
    pub fn get(&self, key: &str) -> Result<Option<&Value>, ConfigError> {
        if let Some(value) = self.values.get(key) {
            return Ok(Some(value));
        }

        match self.missing_key_policy {
            MissingKeyPolicy::Strict => Err(ConfigError::MissingKey {
                key: key.to_string(),
            }),
            MissingKeyPolicy::Warn => {
                warn!(key, "Value was not found in the secrets file. Returning None.");
                Ok(None)
            }
        }
    }

    /// Look up a top-level key that is expected to hold a string.
    ///
    /// Present non-string values yield `None`.
    pub fn get_str(&self, key: &str) -> Result<Option<&str>, ConfigError> {
        Ok(self.get(key)?.and_then(Value::as_str))
    }

    /// Returns true if the top-level key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// The missing-key policy in effect.
    pub fn missing_key_policy(&self) -> MissingKeyPolicy {
        self.missing_key_policy
    }

    /// Borrow the merged document.
    pub fn values(&self) -> &ConfigDocument {
        &self.values
    }

    /// Consume the configuration and return the merged document.
    pub fn into_values(self) -> ConfigDocument {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Render as indented, human-readable JSON.
    pub fn to_pretty_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.values)
    }

    /// Render as a single-line JSON document.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.values)
    }

    /// Export every top-level key as an upper-cased process environment variable.
    ///
    /// # Safety
    ///
    /// Same contract as [`export_env_variables`](super::export_env_variables):
    /// no other thread may access the process environment during the call.
    pub unsafe fn export_env_variables(&self) -> Result<(), ConfigError> {
        // SAFETY: forwarded to the caller.
        unsafe { export_env_variables(&self.values) }
    }
}
