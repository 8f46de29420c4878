//! The capability every secret source implements.

use super::error::FetchError;

/// A source of secret plaintext addressed by identifier.
///
/// A backend claims every string leaf that starts with its [`prefix`](Self::prefix).
/// Session setup, credentials and region selection happen when the backend is
/// constructed; `fetch` only performs the lookup.
pub trait SecretBackend: Send + Sync {
    /// Human-readable backend name used in errors and logs (e.g. `secretsmanager`).
    fn name(&self) -> &str;

    /// The literal prefix that marks a string leaf as belonging to this backend.
    fn prefix(&self) -> &str;

    /// Look up `identifier` and return its plaintext.
    ///
    /// Performs exactly one remote (or local) lookup. Implementations must not
    /// retry and must not cache.
    fn fetch(&self, identifier: &str) -> Result<String, FetchError>;
}

impl<B: SecretBackend + ?Sized> SecretBackend for Box<B> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn prefix(&self) -> &str {
        (**self).prefix()
    }

    fn fetch(&self, identifier: &str) -> Result<String, FetchError> {
        (**self).fetch(identifier)
    }
}
