//! AWS and keyring secret backends for confidential.
//!
//! This crate provides the concrete [`SecretBackend`](confidential_config::SecretBackend)
//! implementations used by the CLI: AWS Secrets Manager and Systems Manager
//! Parameter Store over the AWS JSON protocol with SigV4 signing, and the OS
//! keyring. [`ResolverBuilder`] wires them into a
//! [`Resolver`](confidential_config::Resolver).

pub mod backends;
mod builder;
pub mod credentials;
pub mod error;
pub mod signing;
pub mod transport;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use backends::{KeyringBackend, ParameterStoreBackend, SecretsManagerBackend};
pub use builder::{ResolverBuilder, standard_resolver};
pub use credentials::{AwsCredentials, CredentialsProvider};
pub use error::{ClientError, CredentialsError, Result, classify_error_code};
pub use transport::{AwsJsonClient, AwsJsonTransport, AwsService};
