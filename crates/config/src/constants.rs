//! Centralized constants for configuration resolution.
//!
//! Responsibilities:
//! - Define the secret reference prefixes claimed by the built-in backends.
//! - Define environment variable names read by the loader.
//! - Define default values shared by the client and CLI crates.
//!
//! Does NOT handle:
//! - Backend registration order (see `confidential_client::standard_resolver`).
//! - Runtime configuration loading (see `loader` module).

/// Prefix marking a string leaf as an AWS Secrets Manager reference.
pub const SECRETS_MANAGER_PREFIX: &str = "secret:";

/// Prefix marking a string leaf as an AWS Systems Manager Parameter Store reference.
pub const PARAMETER_STORE_PREFIX: &str = "ssm:";

/// Prefix marking a string leaf as an OS keyring reference.
pub const KEYRING_PREFIX: &str = "keyring:";

/// Service name used for keyring lookups.
pub const KEYRING_SERVICE: &str = "confidential";

/// Default AWS region when none is configured.
pub const DEFAULT_AWS_REGION: &str = "us-east-1";

/// Default timeout for a single remote lookup, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum allowed timeout for a single remote lookup, in seconds.
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Environment variable naming the defaults document.
pub const DEFAULT_SECRETS_FILE_ENV: &str = "CONFIDENTIAL_DEFAULT_SECRETS_FILE";

/// Environment variable that disables `.env` loading when set to `1` or `true`.
pub const DOTENV_DISABLED_ENV: &str = "DOTENV_DISABLED";

/// Environment variable overriding the AWS service endpoint (local emulators).
pub const ENDPOINT_URL_ENV: &str = "CONFIDENTIAL_ENDPOINT_URL";

/// Environment variable setting the per-lookup timeout in seconds.
pub const TIMEOUT_ENV: &str = "CONFIDENTIAL_TIMEOUT";

/// Standard AWS environment variables.
pub const AWS_REGION_ENV: &str = "AWS_REGION";
pub const AWS_PROFILE_ENV: &str = "AWS_PROFILE";
pub const AWS_ACCESS_KEY_ID_ENV: &str = "AWS_ACCESS_KEY_ID";
pub const AWS_SECRET_ACCESS_KEY_ENV: &str = "AWS_SECRET_ACCESS_KEY";
pub const AWS_SESSION_TOKEN_ENV: &str = "AWS_SESSION_TOKEN";
pub const AWS_SHARED_CREDENTIALS_FILE_ENV: &str = "AWS_SHARED_CREDENTIALS_FILE";

/// Profile used when none is named.
pub const DEFAULT_AWS_PROFILE: &str = "default";
