//! Configuration loader for secrets documents.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` for two-layer (defaults + overrides) loading.
//! - Expose the merged result as a `MergedConfig` with a configurable missing-key policy.
//! - Enforce `DOTENV_DISABLED` gate to prevent accidental dotenv loading in tests.
//!
//! Does NOT handle:
//! - Talking to secret services (backends are registered on a `Resolver`).
//! - Persisting resolved values; every run re-resolves from source files.
//!
//! Invariants / Assumptions:
//! - Primary document values take precedence over defaults.
//! - Environment export is opt-in and happens only after a successful merge.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

mod builder;
mod env;
mod error;
mod merged;

#[cfg(test)]
mod tests;

pub use builder::ConfigLoader;
pub use env::{env_value, env_var_or_none, export_env_variables};
pub use error::ConfigError;
pub use merged::{MergedConfig, MissingKeyPolicy};
