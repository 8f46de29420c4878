//! Error types for the AWS client.
//!
//! Responsibilities:
//! - Describe failures of the HTTP transport and credential discovery.
//! - Classify AWS error codes into the resolver's [`FetchError`] taxonomy.
//!
//! Invariants:
//! - Error messages never contain secret key material or resolved plaintext.

use std::path::PathBuf;

use confidential_config::FetchError;
use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while talking to an AWS JSON-protocol service.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Error response from the service.
    #[error("API error ({status}) {code}: {message}")]
    ApiError {
        status: u16,
        code: String,
        message: String,
    },

    /// The service answered 2xx with a body that is not a JSON object.
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    /// Invalid endpoint URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Timeout outside the accepted range.
    #[error("Invalid timeout: {0}s (must be between 1 and 3600)")]
    InvalidTimeout(u64),

    /// Credentials could not be found or read.
    #[error(transparent)]
    Credentials(#[from] CredentialsError),
}

/// Errors raised while discovering AWS credentials.
#[derive(Error, Debug)]
pub enum CredentialsError {
    /// Neither the environment nor the shared credentials file had credentials.
    #[error("No AWS credentials found in the environment or for profile '{profile}'")]
    NotFound { profile: String },

    /// The shared credentials file has no such profile.
    #[error("Profile '{profile}' not found in {}", path.display())]
    ProfileNotFound { profile: String, path: PathBuf },

    /// The profile exists but lacks a required key.
    #[error("Profile '{profile}' is missing '{key}'")]
    IncompleteProfile { profile: String, key: &'static str },

    /// Only one half of the key pair is present in the environment.
    #[error("Environment has {present} but not {missing}")]
    IncompleteEnvironment {
        present: &'static str,
        missing: &'static str,
    },

    /// The shared credentials file exists but could not be read.
    #[error("Failed to read credentials file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Map an AWS `__type` error code onto the resolver's failure taxonomy.
///
/// Codes may arrive qualified (`com.amazonaws.ssm#ParameterNotFound`) or with a
/// trailing detail (`AccessDeniedException:http://...`); both are normalized
/// before matching.
pub fn classify_error_code(status: u16, code: &str, message: &str) -> FetchError {
    let code = normalize_error_code(code);
    let detail = if message.is_empty() {
        code.to_string()
    } else {
        message.to_string()
    };

    match code {
        "ResourceNotFoundException" | "ParameterNotFound" | "ParameterVersionNotFound" => {
            FetchError::NotFound(detail)
        }
        "AccessDeniedException" | "UnrecognizedClientException" => {
            FetchError::AccessDenied(detail)
        }
        "DecryptionFailure" | "DecryptionFailureException" | "InvalidKeyId" => {
            FetchError::DecryptionFailure(detail)
        }
        "InternalServiceError" | "InternalServerError" | "InternalFailure"
        | "ServiceUnavailable" | "ThrottlingException" => FetchError::Service(detail),
        "" if status >= 500 => FetchError::Service(format!("HTTP {status}")),
        "" if status == 403 => FetchError::AccessDenied(format!("HTTP {status}")),
        "" => FetchError::Other {
            code: format!("HTTP {status}"),
            message: detail,
        },
        other => FetchError::Other {
            code: other.to_string(),
            message: message.to_string(),
        },
    }
}

fn normalize_error_code(code: &str) -> &str {
    let code = code.rsplit_once('#').map_or(code, |(_, tail)| tail);
    code.split_once(':').map_or(code, |(head, _)| head).trim()
}

impl From<ClientError> for FetchError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::ApiError {
                status,
                code,
                message,
            } => classify_error_code(status, &code, &message),
            ClientError::Credentials(e) => FetchError::AccessDenied(e.to_string()),
            other => FetchError::Transport(other.to_string()),
        }
    }
}
