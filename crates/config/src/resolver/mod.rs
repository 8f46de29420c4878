//! Prefix-based dispatch of secret references to backends.
//!
//! Responsibilities:
//! - Hold the registered backends in registration order.
//! - Pick the first backend whose prefix matches a string leaf.
//! - Re-interpret fetched plaintext as JSON when it parses.
//!
//! Does NOT handle:
//! - Walking documents (see `walker`).
//! - Talking to remote services (see the `confidential-client` crate).
//!
//! Invariants:
//! - Prefix matching is a case-sensitive plain prefix test with no escaping.
//! - When prefixes collide, the first registered backend wins; a warning is logged.
//! - Each resolution performs exactly one `fetch`; nothing is cached.

mod backend;
mod error;

use std::fmt;

use serde_json::Value;
use tracing::{debug, warn};

pub use backend::SecretBackend;
pub use error::{FetchError, ResolutionError};

/// Ordered collection of secret backends.
#[derive(Default)]
pub struct Resolver {
    backends: Vec<Box<dyn SecretBackend>>,
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.backends.iter().map(|b| (b.name(), b.prefix())))
            .finish()
    }
}

impl Resolver {
    /// Create a resolver with no backends; every leaf passes through unchanged.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a backend and return the resolver (builder style).
    pub fn with_backend<B: SecretBackend + 'static>(mut self, backend: B) -> Self {
        self.register(Box::new(backend));
        self
    }

    /// Register a backend after all previously registered ones.
    ///
    /// A backend whose prefix is already covered by an earlier backend is still
    /// registered, but it will never be selected.
    pub fn register(&mut self, backend: Box<dyn SecretBackend>) {
        if let Some(earlier) = self
            .backends
            .iter()
            .find(|earlier| backend.prefix().starts_with(earlier.prefix()))
        {
            warn!(
                backend = backend.name(),
                prefix = backend.prefix(),
                shadowed_by = earlier.name(),
                "Secret backend prefix is shadowed by an earlier backend and will never match"
            );
        }
        self.backends.push(backend);
    }

    /// Number of registered backends.
    pub fn len(&self) -> usize {
        self.backends.len()
    }

    /// Returns true when no backend is registered.
    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }

    /// Return the backend that claims `leaf`, if any.
    pub fn find_backend(&self, leaf: &str) -> Option<&dyn SecretBackend> {
        self.backends
            .iter()
            .find(|backend| leaf.starts_with(backend.prefix()))
            .map(|backend| backend.as_ref())
    }

    /// Resolve a single document value.
    ///
    /// String values claimed by a backend are fetched and re-interpreted; every
    /// other value, including strings no backend claims, is returned unchanged.
    pub fn resolve(&self, value: Value) -> Result<Value, ResolutionError> {
        match value {
            Value::String(leaf) => match self.resolve_str(&leaf)? {
                Some(resolved) => Ok(resolved),
                None => Ok(Value::String(leaf)),
            },
            other => Ok(other),
        }
    }

    /// Resolve a string leaf, returning `None` when no backend claims it.
    pub fn resolve_str(&self, leaf: &str) -> Result<Option<Value>, ResolutionError> {
        let Some(backend) = self.find_backend(leaf) else {
            return Ok(None);
        };

        let identifier = &leaf[backend.prefix().len()..];
        debug!(backend = backend.name(), identifier, "Resolving secret reference");

        let plaintext = backend
            .fetch(identifier)
            .map_err(|source| ResolutionError {
                backend: backend.name().to_string(),
                identifier: identifier.to_string(),
                source,
            })?;

        Ok(Some(interpret_plaintext(plaintext)))
    }
}

/// Parse `plaintext` as JSON, falling back to the literal string.
///
/// No trimming or coercion is applied; `"42"` becomes the number 42, while
/// `"hello"` stays the string `hello`.
pub fn interpret_plaintext(plaintext: String) -> Value {
    match serde_json::from_str(&plaintext) {
        Ok(parsed) => parsed,
        Err(_) => Value::String(plaintext),
    }
}
