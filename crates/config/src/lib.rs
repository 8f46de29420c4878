//! Configuration resolution for confidential.
//!
//! This crate loads JSON configuration documents, resolves string leaves that
//! reference secrets through pluggable backends, and merges a defaults document
//! with an environment-specific one into a single configuration.

pub mod constants;
mod document;
mod loader;
mod merge;
pub mod resolver;
mod walker;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use document::{ConfigDocument, ensure_exists, load_document};
pub use loader::{
    ConfigError, ConfigLoader, MergedConfig, MissingKeyPolicy, env_value, env_var_or_none,
    export_env_variables,
};
pub use merge::merge;
pub use resolver::{FetchError, ResolutionError, Resolver, SecretBackend, interpret_plaintext};
pub use walker::decrypt_tree;
