//! Builder for a [`Resolver`] wired to the built-in backends.
//!
//! This module is responsible for:
//! - Collecting region, profile, endpoint and timeout settings.
//! - Creating one shared AWS transport for the Secrets Manager and Parameter
//!   Store backends.
//! - Registering the backends in a fixed order: `secret:`, `ssm:`, `keyring:`.
//!
//! # What this module does NOT handle:
//! - Walking or merging documents (see `confidential_config`).
//! - Credential lookup itself (deferred to the first remote call).
//!
//! # Invariants
//! - The timeout is between 1 second and `MAX_TIMEOUT_SECS`.
//! - Building never contacts AWS.

use std::sync::Arc;
use std::time::Duration;

use confidential_config::Resolver;
use confidential_config::constants::{
    DEFAULT_AWS_REGION, DEFAULT_TIMEOUT_SECS, KEYRING_SERVICE, MAX_TIMEOUT_SECS,
};

use crate::backends::{KeyringBackend, ParameterStoreBackend, SecretsManagerBackend};
use crate::credentials::{AwsCredentials, CredentialsProvider};
use crate::error::{ClientError, Result};
use crate::transport::AwsJsonClient;

/// Builder for the standard resolver.
///
/// # Example
///
/// ```rust,ignore
/// use confidential_client::ResolverBuilder;
///
/// let resolver = ResolverBuilder::new()
///     .region("eu-west-1")
///     .profile(Some("prod".to_string()))
///     .build()?;
/// ```
#[derive(Debug)]
pub struct ResolverBuilder {
    region: String,
    profile: Option<String>,
    endpoint_url: Option<String>,
    timeout: Duration,
    credentials: Option<AwsCredentials>,
    keyring_service: String,
}

impl Default for ResolverBuilder {
    fn default() -> Self {
        Self {
            region: DEFAULT_AWS_REGION.to_string(),
            profile: None,
            endpoint_url: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            credentials: None,
            keyring_service: KEYRING_SERVICE.to_string(),
        }
    }
}

impl ResolverBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the AWS region. Default is `us-east-1`.
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Set the shared-credentials profile to read.
    pub fn profile(mut self, profile: Option<String>) -> Self {
        self.profile = profile;
        self
    }

    /// Send every AWS request to `url` instead of the regional endpoint.
    pub fn endpoint_url(mut self, url: Option<String>) -> Self {
        self.endpoint_url = url;
        self
    }

    /// Set the per-request timeout. Default is 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Use fixed credentials instead of discovering them.
    pub fn credentials(mut self, credentials: AwsCredentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set the keyring service name. Default is `confidential`.
    pub fn keyring_service(mut self, service: impl Into<String>) -> Self {
        self.keyring_service = service.into();
        self
    }

    /// Build the resolver.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidTimeout`] for a timeout out of range,
    /// [`ClientError::InvalidUrl`] for an unparsable endpoint override, and
    /// `ClientError::HttpError` if the HTTP client fails to build.
    pub fn build(self) -> Result<Resolver> {
        let timeout_secs = self.timeout.as_secs();
        if timeout_secs == 0 || timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ClientError::InvalidTimeout(timeout_secs));
        }

        let provider = match self.credentials {
            Some(credentials) => CredentialsProvider::from(credentials),
            None => CredentialsProvider::discover(self.profile),
        };

        let transport = Arc::new(AwsJsonClient::new(
            self.region,
            provider,
            self.endpoint_url.as_deref(),
            self.timeout,
        )?);

        tracing::debug!(
            region = transport.region(),
            endpoint_override = self.endpoint_url.is_some(),
            "Building resolver"
        );

        Ok(Resolver::new()
            .with_backend(SecretsManagerBackend::new(Arc::clone(&transport)))
            .with_backend(ParameterStoreBackend::new(transport))
            .with_backend(KeyringBackend::new(self.keyring_service)))
    }
}

/// Resolver with the built-in backends and default settings.
pub fn standard_resolver() -> Result<Resolver> {
    ResolverBuilder::new().build()
}
