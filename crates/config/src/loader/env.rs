//! Environment variable handling for configuration.
//!
//! Responsibilities:
//! - Read environment variables with empty values treated as unset.
//! - Export top-level configuration keys as process environment variables.
//!
//! Does NOT handle:
//! - Building the merged configuration (see builder.rs).
//! - .env file loading (handled by ConfigLoader::load_dotenv).
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Export validates every name and value before setting any variable.

use serde_json::Value;
use tracing::debug;

use super::error::ConfigError;
use crate::document::ConfigDocument;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// The string form of a value when exported as an environment variable.
///
/// Strings are exported verbatim; every other value uses its compact JSON text
/// (`42`, `true`, `null`, `{"k":"v"}`).
pub fn env_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Set one process environment variable per top-level key of `document`.
///
/// The variable name is the upper-cased key. Every pair is validated first, so
/// either all variables are set or none are.
///
/// # Safety
///
/// This calls [`std::env::set_var`]. No other thread may read or write the
/// process environment while it runs, including through libc functions such
/// as `getenv`. Calling it before any thread is spawned is always sound.
pub unsafe fn export_env_variables(document: &ConfigDocument) -> Result<(), ConfigError> {
    let pairs = document
        .iter()
        .map(|(key, value)| {
            let name = key.to_uppercase();
            let value = env_value(value);
            validate_env_pair(&name, &value)?;
            Ok::<_, ConfigError>((name, value))
        })
        .collect::<Result<Vec<_>, _>>()?;

    for (name, value) in pairs {
        debug!(name = %name, "Exporting configuration key");
        // SAFETY: the caller guarantees exclusive access to the environment.
        unsafe { std::env::set_var(&name, value) };
    }

    Ok(())
}

fn validate_env_pair(name: &str, value: &str) -> Result<(), ConfigError> {
    let message = if name.is_empty() {
        "name is empty"
    } else if name.contains('=') {
        "name contains '='"
    } else if name.contains('\0') {
        "name contains a NUL byte"
    } else if value.contains('\0') {
        "value contains a NUL byte"
    } else {
        return Ok(());
    };

    Err(ConfigError::InvalidEnvVariable {
        name: name.to_string(),
        message: message.to_string(),
    })
}
