//! AWS credential discovery.
//!
//! Responsibilities:
//! - Read static credentials from the standard AWS environment variables.
//! - Read a named profile from the shared credentials file.
//! - Choose between the two for a requested profile.
//!
//! Does NOT handle:
//! - Role assumption, SSO or instance metadata.
//! - The `~/.aws/config` file.
//!
//! Invariants:
//! - The secret access key and session token are held as `SecretString` and
//!   never appear in `Debug` output.
//! - An explicitly named profile always reads the shared credentials file,
//!   ignoring environment credentials.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use confidential_config::constants::{
    AWS_ACCESS_KEY_ID_ENV, AWS_SECRET_ACCESS_KEY_ENV, AWS_SESSION_TOKEN_ENV,
    AWS_SHARED_CREDENTIALS_FILE_ENV, DEFAULT_AWS_PROFILE,
};
use confidential_config::env_var_or_none;
use secrecy::SecretString;

use crate::error::CredentialsError;

/// Static AWS credentials used to sign requests.
#[derive(Debug, Clone)]
pub struct AwsCredentials {
    access_key_id: String,
    secret_access_key: SecretString,
    session_token: Option<SecretString>,
}

impl AwsCredentials {
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: SecretString,
        session_token: Option<SecretString>,
    ) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key,
            session_token,
        }
    }

    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    pub fn secret_access_key(&self) -> &SecretString {
        &self.secret_access_key
    }

    pub fn session_token(&self) -> Option<&SecretString> {
        self.session_token.as_ref()
    }

    /// Resolve credentials for `profile`.
    ///
    /// With an explicit profile the shared credentials file is read. Without
    /// one, environment credentials win and the `default` profile is the
    /// fallback.
    pub fn discover(profile: Option<&str>) -> Result<Self, CredentialsError> {
        if let Some(profile) = profile {
            tracing::debug!(profile, "Reading AWS credentials from shared credentials file");
            return Self::from_shared_file(profile);
        }

        if let Some(credentials) = Self::from_env()? {
            tracing::debug!("Using AWS credentials from environment");
            return Ok(credentials);
        }

        Self::from_shared_file(DEFAULT_AWS_PROFILE).map_err(|e| match e {
            CredentialsError::ProfileNotFound { profile, .. } => {
                CredentialsError::NotFound { profile }
            }
            other => other,
        })
    }

    /// Read credentials from `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY` and
    /// the optional `AWS_SESSION_TOKEN`.
    ///
    /// Returns `Ok(None)` when neither key is set.
    pub fn from_env() -> Result<Option<Self>, CredentialsError> {
        let access_key_id = env_var_or_none(AWS_ACCESS_KEY_ID_ENV);
        let secret_access_key = env_var_or_none(AWS_SECRET_ACCESS_KEY_ENV);

        match (access_key_id, secret_access_key) {
            (Some(id), Some(secret)) => Ok(Some(Self::new(
                id,
                SecretString::new(secret.into()),
                env_var_or_none(AWS_SESSION_TOKEN_ENV).map(|t| SecretString::new(t.into())),
            ))),
            (None, None) => Ok(None),
            (Some(_), None) => Err(CredentialsError::IncompleteEnvironment {
                present: AWS_ACCESS_KEY_ID_ENV,
                missing: AWS_SECRET_ACCESS_KEY_ENV,
            }),
            (None, Some(_)) => Err(CredentialsError::IncompleteEnvironment {
                present: AWS_SECRET_ACCESS_KEY_ENV,
                missing: AWS_ACCESS_KEY_ID_ENV,
            }),
        }
    }

    fn from_shared_file(profile: &str) -> Result<Self, CredentialsError> {
        let path = shared_credentials_path().ok_or_else(|| CredentialsError::NotFound {
            profile: profile.to_string(),
        })?;
        if !path.exists() {
            return Err(CredentialsError::ProfileNotFound {
                profile: profile.to_string(),
                path,
            });
        }
        Self::from_profile_file(&path, profile)
    }

    /// Read `profile` from an INI-style shared credentials file.
    pub fn from_profile_file(path: &Path, profile: &str) -> Result<Self, CredentialsError> {
        let content = std::fs::read_to_string(path).map_err(|source| CredentialsError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let section =
            parse_profile(&content, profile).ok_or_else(|| CredentialsError::ProfileNotFound {
                profile: profile.to_string(),
                path: path.to_path_buf(),
            })?;

        let lookup = |key: &'static str| {
            section
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
                .filter(|v| !v.is_empty())
        };

        let access_key_id =
            lookup("aws_access_key_id").ok_or_else(|| CredentialsError::IncompleteProfile {
                profile: profile.to_string(),
                key: "aws_access_key_id",
            })?;
        let secret_access_key =
            lookup("aws_secret_access_key").ok_or_else(|| CredentialsError::IncompleteProfile {
                profile: profile.to_string(),
                key: "aws_secret_access_key",
            })?;

        Ok(Self::new(
            access_key_id,
            SecretString::new(secret_access_key.into()),
            lookup("aws_session_token").map(|t| SecretString::new(t.into())),
        ))
    }
}

/// Credentials that are looked up on first use and then reused.
///
/// Documents without remote references never trigger discovery, so a run
/// over plain values needs no AWS setup.
#[derive(Debug)]
pub struct CredentialsProvider {
    profile: Option<String>,
    cached: Mutex<Option<AwsCredentials>>,
}

impl CredentialsProvider {
    /// Discover credentials for `profile` lazily.
    pub fn discover(profile: Option<String>) -> Self {
        Self {
            profile,
            cached: Mutex::new(None),
        }
    }

    /// The profile discovery will read, if one was named.
    pub fn profile(&self) -> Option<&str> {
        self.profile.as_deref()
    }

    /// Return the credentials, discovering them on the first call.
    pub fn credentials(&self) -> Result<AwsCredentials, CredentialsError> {
        let mut cached = self.cached.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(credentials) = cached.as_ref() {
            return Ok(credentials.clone());
        }
        let credentials = AwsCredentials::discover(self.profile.as_deref())?;
        *cached = Some(credentials.clone());
        Ok(credentials)
    }
}

impl From<AwsCredentials> for CredentialsProvider {
    fn from(credentials: AwsCredentials) -> Self {
        Self {
            profile: None,
            cached: Mutex::new(Some(credentials)),
        }
    }
}

/// Location of the shared credentials file.
///
/// `AWS_SHARED_CREDENTIALS_FILE` wins; otherwise `~/.aws/credentials`.
pub fn shared_credentials_path() -> Option<PathBuf> {
    if let Some(path) = env_var_or_none(AWS_SHARED_CREDENTIALS_FILE_ENV) {
        return Some(PathBuf::from(path));
    }
    directories::BaseDirs::new().map(|dirs| dirs.home_dir().join(".aws").join("credentials"))
}

/// Collect the `key = value` pairs of `[profile]`.
///
/// Comments (`#`, `;`) and blank lines are skipped. Keys are lowercased.
fn parse_profile(content: &str, profile: &str) -> Option<Vec<(String, String)>> {
    let mut in_section = false;
    let mut found = false;
    let mut pairs = Vec::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            in_section = name.trim() == profile;
            found |= in_section;
            continue;
        }

        if in_section && let Some((key, value)) = line.split_once('=') {
            pairs.push((key.trim().to_ascii_lowercase(), value.trim().to_string()));
        }
    }

    found.then_some(pairs)
}
