//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map configuration, resolution and client errors to exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//!
//! Invariants:
//! - Exit codes 1-9 are reserved for specific error categories.

use confidential_client::ClientError;
use confidential_config::{ConfigError, FetchError, ResolutionError};

/// Structured exit codes for `confidential`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - the merged configuration was printed.
    Success = 0,

    /// General error - unhandled or generic failure.
    GeneralError = 1,

    /// A configuration document does not exist.
    FileNotFound = 3,

    /// A referenced secret or parameter does not exist.
    SecretNotFound = 4,

    /// A document could not be read or parsed, or is not a JSON object.
    InvalidDocument = 5,

    /// Access denied, decryption failure, or a response without its value.
    ///
    /// Scripts should check IAM and KMS permissions for the caller.
    PermissionDenied = 6,

    /// The remote service failed or could not be reached.
    ///
    /// Scripts may retry later.
    ServiceUnavailable = 8,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&FetchError> for ExitCode {
    fn from(err: &FetchError) -> Self {
        match err {
            FetchError::NotFound(_) => ExitCode::SecretNotFound,
            FetchError::AccessDenied(_)
            | FetchError::DecryptionFailure(_)
            | FetchError::MalformedResponse { .. } => ExitCode::PermissionDenied,
            FetchError::Service(_) | FetchError::Transport(_) => ExitCode::ServiceUnavailable,
            FetchError::Other { .. } => ExitCode::GeneralError,
        }
    }
}

impl From<&ConfigError> for ExitCode {
    fn from(err: &ConfigError) -> Self {
        match err {
            ConfigError::FileNotFound { .. } => ExitCode::FileNotFound,
            ConfigError::FileRead { .. }
            | ConfigError::FileParse { .. }
            | ConfigError::NotAnObject { .. } => ExitCode::InvalidDocument,
            ConfigError::Resolution(resolution) => ExitCode::from(&resolution.source),
            _ => ExitCode::GeneralError,
        }
    }
}

impl From<&ClientError> for ExitCode {
    fn from(err: &ClientError) -> Self {
        match err {
            ClientError::Credentials(_) => ExitCode::PermissionDenied,
            ClientError::HttpError(e) if e.is_connect() || e.is_timeout() => {
                ExitCode::ServiceUnavailable
            }
            _ => ExitCode::GeneralError,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Extract the appropriate exit code from this error.
    ///
    /// Returns ExitCode::GeneralError if no known error type is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(err) = cause.downcast_ref::<ConfigError>() {
                return ExitCode::from(err);
            }
            if let Some(err) = cause.downcast_ref::<ResolutionError>() {
                return ExitCode::from(&err.source);
            }
            if let Some(err) = cause.downcast_ref::<ClientError>() {
                return ExitCode::from(err);
            }
        }

        ExitCode::GeneralError
    }
}
