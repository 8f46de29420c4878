//! Reading configuration documents from disk.
//!
//! Responsibilities:
//! - Read a UTF-8 JSON file and return its top-level mapping.
//! - Report absent files distinctly from unreadable or malformed ones.
//!
//! Does NOT handle:
//! - Secret resolution (see `walker`).
//! - Merging documents (see `merge`).
//!
//! Invariants:
//! - The top level of a document is always a JSON object.
//! - Key order from the file is preserved (`serde_json` `preserve_order`).

use std::path::Path;

use serde_json::{Map, Value};
use tracing::debug;

use crate::loader::ConfigError;

/// An ordered mapping from string keys to JSON values.
pub type ConfigDocument = Map<String, Value>;

/// Fail with [`ConfigError::FileNotFound`] when `path` does not exist.
pub fn ensure_exists(path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        Ok(())
    } else {
        Err(ConfigError::FileNotFound {
            path: path.to_path_buf(),
        })
    }
}

/// Load a configuration document from `path`.
///
/// # Errors
///
/// - [`ConfigError::FileNotFound`] if the file does not exist.
/// - [`ConfigError::FileRead`] if it exists but cannot be read.
/// - [`ConfigError::FileParse`] if it is not valid JSON.
/// - [`ConfigError::NotAnObject`] if the top-level value is not a JSON object.
pub fn load_document(path: &Path) -> Result<ConfigDocument, ConfigError> {
    ensure_exists(path)?;

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let value: Value = serde_json::from_str(&content).map_err(|source| ConfigError::FileParse {
        path: path.to_path_buf(),
        source,
    })?;

    match value {
        Value::Object(document) => {
            debug!(path = %path.display(), keys = document.len(), "Loaded configuration document");
            Ok(document)
        }
        _ => Err(ConfigError::NotAnObject {
            path: path.to_path_buf(),
        }),
    }
}
