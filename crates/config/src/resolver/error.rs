//! Error types for secret resolution.
//!
//! Invariants:
//! - Every failure names the backend and identifier that triggered it.
//! - Error messages never include resolved plaintext.
//! - A response that lacks its value field is `MalformedResponse`, never `NotFound`.

use thiserror::Error;

/// Why a backend could not produce plaintext for an identifier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The remote service reports that the identifier does not exist.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The caller's principal is not allowed to read the identifier.
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// The value exists but could not be decrypted with the available key material.
    #[error("Decryption failed: {0}")]
    DecryptionFailure(String),

    /// The call succeeded but the expected value field was absent or null.
    #[error("`{field}` not found in response. Does the caller have permission to read it?")]
    MalformedResponse { field: String },

    /// The remote service failed internally; not retried here.
    #[error("Service error: {0}")]
    Service(String),

    /// Any other error reported by the remote service.
    #[error("{code}: {message}")]
    Other { code: String, message: String },

    /// The request could not be sent or its response could not be read.
    #[error("Transport error: {0}")]
    Transport(String),
}

impl FetchError {
    /// Returns true when the failure points at permissions or the API contract
    /// rather than a genuinely missing resource.
    pub fn is_permission_like(&self) -> bool {
        matches!(
            self,
            Self::AccessDenied(_) | Self::DecryptionFailure(_) | Self::MalformedResponse { .. }
        )
    }

    /// Returns true when the remote side (or the path to it) failed.
    pub fn is_service_failure(&self) -> bool {
        matches!(self, Self::Service(_) | Self::Transport(_))
    }
}

/// A secret reference that could not be resolved.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Error decrypting {identifier} via {backend}: {source}")]
pub struct ResolutionError {
    /// Name of the backend that claimed the leaf.
    pub backend: String,
    /// The identifier left after stripping the backend prefix.
    pub identifier: String,
    /// What went wrong.
    #[source]
    pub source: FetchError,
}
