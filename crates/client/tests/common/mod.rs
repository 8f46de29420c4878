//! Common test utilities for integration tests.
//!
//! This module provides shared helpers for driving the AWS transport against a
//! local `mockito` server.
//!
//! # Invariants
//! - Fixtures are loaded from the `fixtures/` directory relative to the crate root
//! - All fixture files must be valid JSON
//! - Requests are signed with fixed dummy credentials, never host credentials
//!
//! # What this does NOT handle
//! - Test-specific assertions or test logic

use std::time::Duration;

use secrecy::SecretString;

#[allow(unused_imports)]
pub use confidential_client::testing::load_fixture;
#[allow(unused_imports)]
pub use confidential_client::{AwsCredentials, AwsJsonClient, AwsService, ResolverBuilder};
#[allow(unused_imports)]
pub use mockito::{Matcher, Server};

/// Content type of AWS JSON 1.1 requests and responses.
#[allow(dead_code)]
pub const AMZ_JSON: &str = "application/x-amz-json-1.1";

/// Dummy credentials used to sign test requests.
pub fn test_credentials() -> AwsCredentials {
    AwsCredentials::new(
        "AKIDTESTEXAMPLE",
        SecretString::new("test-secret-access-key".to_string().into()),
        None,
    )
}

/// Transport pointed at `server`.
#[allow(dead_code)]
pub fn client_for(server: &Server) -> AwsJsonClient {
    AwsJsonClient::new(
        "us-east-1",
        test_credentials(),
        Some(&server.url()),
        Duration::from_secs(5),
    )
    .expect("client should build")
}

/// Resolver builder pointed at `server`.
#[allow(dead_code)]
pub fn builder_for(server: &Server) -> ResolverBuilder {
    ResolverBuilder::new()
        .endpoint_url(Some(server.url()))
        .credentials(test_credentials())
        .timeout(Duration::from_secs(5))
}
