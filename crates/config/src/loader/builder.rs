//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` naming the defaults and primary documents.
//! - Load, decrypt and merge both documents into a `MergedConfig`.
//! - Optionally export the result as environment variables.
//!
//! Does NOT handle:
//! - Constructing secret backends (see the `confidential-client` crate).
//! - Writing environment variables (delegated to env.rs).
//!
//! Invariants / Assumptions:
//! - Every configured path is checked for existence before any remote call is made.
//! - Each document is decrypted on its own before the merge; defaults are the base.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::error::ConfigError;
use super::merged::{MergedConfig, MissingKeyPolicy};
use crate::constants::DOTENV_DISABLED_ENV;
use crate::document::{ConfigDocument, ensure_exists, load_document};
use crate::merge::merge;
use crate::resolver::Resolver;
use crate::walker::decrypt_tree;

/// Loader that builds a merged configuration from a defaults and a primary document.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    secrets_file: Option<PathBuf>,
    default_secrets_file: Option<PathBuf>,
    export_env_variables: bool,
    missing_key_policy: Option<MissingKeyPolicy>,
}

impl ConfigLoader {
    /// Create a new configuration loader with no documents.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var(DOTENV_DISABLED_ENV).ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// If `DOTENV_DISABLED` environment variable is set to "true" or "1",
    /// the .env file will not be loaded (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The `.env` file exists but has invalid syntax (`ConfigError::DotenvParse`)
    /// - The `.env` file exists but cannot be read due to I/O errors (`ConfigError::DotenvIo`)
    ///
    /// Missing `.env` files are silently ignored (returns `Ok(self)`).
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    /// Check if a dotenv error indicates the file was not found.
    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Set the primary (environment-specific) document; its values win on conflict.
    pub fn with_secrets_file(mut self, path: PathBuf) -> Self {
        self.secrets_file = Some(path);
        self
    }

    /// Set the defaults document that the primary document overrides.
    pub fn with_default_secrets_file(mut self, path: PathBuf) -> Self {
        self.default_secrets_file = Some(path);
        self
    }

    /// Export each top-level key as an upper-cased environment variable after loading.
    ///
    /// # Safety
    ///
    /// With `export` set, [`load`](Self::load) writes the process environment.
    /// The caller must ensure no other thread reads or writes the environment
    /// while `load` runs; see
    /// [`export_env_variables`](crate::loader::export_env_variables).
    pub unsafe fn with_export_env_variables(mut self, export: bool) -> Self {
        self.export_env_variables = export;
        self
    }

    /// Choose how lookups of absent keys behave.
    pub fn with_missing_key_policy(mut self, policy: MissingKeyPolicy) -> Self {
        self.missing_key_policy = Some(policy);
        self
    }

    /// Load both documents, resolve their secret references and merge them.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::FileNotFound`] if a configured path is missing; no backend is
    ///   called in that case.
    /// - Loading errors for unreadable or malformed documents.
    /// - [`ConfigError::Resolution`] for the first secret reference that fails;
    ///   no partial configuration is returned.
    /// - [`ConfigError::InvalidEnvVariable`] if export is requested and a key
    ///   cannot be used as a variable name.
    pub fn load(self, resolver: &Resolver) -> Result<MergedConfig, ConfigError> {
        for path in [&self.default_secrets_file, &self.secrets_file]
            .into_iter()
            .flatten()
        {
            ensure_exists(path)?;
        }

        let defaults = self
            .default_secrets_file
            .as_deref()
            .map(|path| parse_secrets_file(path, resolver))
            .transpose()?
            .unwrap_or_default();
        let secrets = self
            .secrets_file
            .as_deref()
            .map(|path| parse_secrets_file(path, resolver))
            .transpose()?
            .unwrap_or_default();

        let config = MergedConfig::new(
            merge(defaults, secrets),
            self.missing_key_policy.unwrap_or_default(),
        );
        info!(keys = config.len(), "Configuration resolved");

        if self.export_env_variables {
            // SAFETY: export is only enabled through the unsafe
            // `with_export_env_variables`, whose caller upholds the contract.
            unsafe { config.export_env_variables() }?;
        }

        Ok(config)
    }

    pub fn secrets_file(&self) -> Option<&PathBuf> {
        self.secrets_file.as_ref()
    }

    pub fn default_secrets_file(&self) -> Option<&PathBuf> {
        self.default_secrets_file.as_ref()
    }

    pub fn missing_key_policy(&self) -> Option<MissingKeyPolicy> {
        self.missing_key_policy
    }

    pub fn exports_env_variables(&self) -> bool {
        self.export_env_variables
    }
}

/// Load one document and resolve its secret references.
fn parse_secrets_file(path: &Path, resolver: &Resolver) -> Result<ConfigDocument, ConfigError> {
    let document = load_document(path)?;
    debug!(path = %path.display(), "Decrypting configuration document");
    Ok(decrypt_tree(resolver, document)?)
}
