//! Error types for configuration loading.
//!
//! Responsibilities:
//! - Define error variants for every failure while loading, resolving and exposing a configuration.
//! - Wrap resolution failures so callers see one error type.
//!
//! Does NOT handle:
//! - Classification of remote failures (see `resolver::FetchError`).
//!
//! Invariants:
//! - All error variants include context for debugging (paths, keys, backend names).
//! - Errors never include resolved secret values.
//! - Dotenv errors NEVER include raw .env line contents to prevent secret leakage.

use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

use crate::resolver::ResolutionError;

/// Errors that can occur while building a merged configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A configured document path does not exist. Raised before any remote call.
    #[error("Specified file '{path}' does not exist")]
    FileNotFound { path: PathBuf },

    #[error("Failed to read config file at {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}")]
    FileParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Config file at {path} must contain a JSON object at the top level")]
    NotAnObject { path: PathBuf },

    /// A secret reference could not be resolved; the whole load is aborted.
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    /// A strict lookup asked for a key the merged configuration does not contain.
    #[error("Value for '{key}' was not found in the secrets file")]
    MissingKey { key: String },

    /// A top-level key or value cannot be exported as an environment variable.
    #[error("Cannot export '{name}' as an environment variable: {message}")]
    InvalidEnvVariable { name: String, message: String },

    /// Failed to parse the `.env` file due to invalid syntax.
    ///
    /// SAFETY: This error only includes the byte index of the parse failure,
    /// NOT the offending line content, to prevent leaking secrets.
    #[error(
        "Failed to parse .env file at position {error_index}. Hint: set DOTENV_DISABLED=1 to skip .env loading"
    )]
    DotenvParse { error_index: usize },

    /// Failed to read the `.env` file due to an I/O error.
    #[error("Failed to read .env file: {kind}")]
    DotenvIo { kind: ErrorKind },

    /// Unknown dotenv error (future variants from dotenvy crate).
    #[error("Failed to load .env file. Hint: set DOTENV_DISABLED=1 to skip .env loading")]
    DotenvUnknown,
}
