//! AWS Secrets Manager backend (`secret:` prefix).

use confidential_config::constants::SECRETS_MANAGER_PREFIX;
use confidential_config::{FetchError, SecretBackend};
use serde_json::{Value, json};

use crate::transport::{AwsJsonTransport, AwsService};

const VALUE_FIELD: &str = "SecretString";

/// Reads `SecretString` from `GetSecretValue`.
#[derive(Debug)]
pub struct SecretsManagerBackend<T> {
    transport: T,
}

impl<T: AwsJsonTransport> SecretsManagerBackend<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }
}

impl<T: AwsJsonTransport> SecretBackend for SecretsManagerBackend<T> {
    fn name(&self) -> &str {
        "secretsmanager"
    }

    fn prefix(&self) -> &str {
        SECRETS_MANAGER_PREFIX
    }

    fn fetch(&self, identifier: &str) -> Result<String, FetchError> {
        let response = self.transport.call(
            AwsService::SecretsManager,
            "GetSecretValue",
            &json!({ "SecretId": identifier }),
        )?;

        response
            .get(VALUE_FIELD)
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| FetchError::MalformedResponse {
                field: VALUE_FIELD.to_string(),
            })
    }
}
